use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Equipment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Equipment::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Equipment::UserId).uuid().not_null())
                    .col(ColumnDef::new(Equipment::FieldId).uuid().null())
                    .col(ColumnDef::new(Equipment::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Equipment::Kind).string_len(50).null())
                    .col(ColumnDef::new(Equipment::Brand).string_len(50).null())
                    .col(ColumnDef::new(Equipment::Model).string_len(50).null())
                    .col(ColumnDef::new(Equipment::Year).integer().null())
                    .col(ColumnDef::new(Equipment::SerialNumber).string_len(100).null())
                    .col(ColumnDef::new(Equipment::PurchaseDate).date().null())
                    .col(
                        ColumnDef::new(Equipment::Status)
                            .string_len(20)
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Equipment::LastMaintenance).date().null())
                    .col(ColumnDef::new(Equipment::NextMaintenance).date().null())
                    .col(ColumnDef::new(Equipment::Notes).text().null())
                    .col(
                        ColumnDef::new(Equipment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Equipment::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Equipment::Table, Equipment::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Equipment::Table, Equipment::FieldId)
                            .to(Fields::Table, Fields::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Equipment::Table)
                    .col(Equipment::UserId)
                    .name("idx_equipment_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Equipment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Equipment {
    Table,
    Id,
    UserId,
    FieldId,
    Name,
    Kind,
    Brand,
    Model,
    Year,
    SerialNumber,
    PurchaseDate,
    Status,
    LastMaintenance,
    NextMaintenance,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Fields {
    Table,
    Id,
}
