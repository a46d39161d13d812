use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Inventory::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Inventory::UserId).uuid().not_null())
                    .col(ColumnDef::new(Inventory::FieldId).uuid().null())
                    .col(ColumnDef::new(Inventory::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Inventory::Category)
                            .string_len(50)
                            .not_null()
                            .default("general"),
                    )
                    .col(
                        ColumnDef::new(Inventory::Quantity)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Inventory::MinQuantity)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Inventory::Unit).string_len(20).not_null())
                    .col(ColumnDef::new(Inventory::Supplier).string_len(100).null())
                    .col(ColumnDef::new(Inventory::Notes).text().null())
                    .col(
                        ColumnDef::new(Inventory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Inventory::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Inventory::Table, Inventory::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Inventory::Table, Inventory::FieldId)
                            .to(Fields::Table, Fields::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Inventory::Table)
                    .col(Inventory::UserId)
                    .name("idx_inventory_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Inventory {
    Table,
    Id,
    UserId,
    FieldId,
    Name,
    Category,
    Quantity,
    MinQuantity,
    Unit,
    Supplier,
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
