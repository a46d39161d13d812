use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Staff::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Staff::UserId).uuid().not_null())
                    .col(ColumnDef::new(Staff::FieldId).uuid().null())
                    .col(ColumnDef::new(Staff::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Staff::Email).string_len(120).not_null())
                    .col(ColumnDef::new(Staff::Phone).string_len(20).null())
                    .col(ColumnDef::new(Staff::Position).string_len(50).not_null())
                    .col(ColumnDef::new(Staff::HireDate).date().null())
                    .col(ColumnDef::new(Staff::Salary).double().null())
                    .col(
                        ColumnDef::new(Staff::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Staff::Notes).text().null())
                    .col(
                        ColumnDef::new(Staff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Staff::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Staff::Table, Staff::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Staff::Table, Staff::FieldId)
                            .to(Fields::Table, Fields::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Staff email is unique per owner, not globally.
        manager
            .create_index(
                Index::create()
                    .table(Staff::Table)
                    .col(Staff::UserId)
                    .col(Staff::Email)
                    .unique()
                    .name("uq_staff_user_id_email")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Staff {
    Table,
    Id,
    UserId,
    FieldId,
    Name,
    Email,
    Phone,
    Position,
    HireDate,
    Salary,
    Status,
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
