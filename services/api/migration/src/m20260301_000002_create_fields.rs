use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fields::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Fields::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Fields::UserId).uuid().not_null())
                    .col(ColumnDef::new(Fields::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Fields::Crop).string_len(100).not_null())
                    .col(ColumnDef::new(Fields::Area).double().not_null())
                    .col(ColumnDef::new(Fields::Location).string_len(200).null())
                    .col(ColumnDef::new(Fields::City).string_len(100).null())
                    .col(ColumnDef::new(Fields::Latitude).double().null())
                    .col(ColumnDef::new(Fields::Longitude).double().null())
                    .col(ColumnDef::new(Fields::Size).double().null())
                    .col(
                        ColumnDef::new(Fields::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Fields::NextAction).string_len(200).null())
                    .col(
                        ColumnDef::new(Fields::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Fields::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Fields::Table, Fields::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Fields::Table)
                    .col(Fields::UserId)
                    .name("idx_fields_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Fields::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Fields {
    Table,
    Id,
    UserId,
    Name,
    Crop,
    Area,
    Location,
    City,
    Latitude,
    Longitude,
    Size,
    Status,
    NextAction,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
