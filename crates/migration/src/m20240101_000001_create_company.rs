//! Create `company` table.
//! One row per tax id; `data` holds an optional free-form JSON document.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Company::Table)
                    .if_not_exists()
                    .col(pk_auto(Company::Id))
                    .col(string(Company::TaxId).unique_key())
                    .col(string(Company::Name))
                    .col(string(Company::Status).default("PENDING"))
                    .col(json_null(Company::Data))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Company::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Company {
    Table,
    Id,
    TaxId,
    Name,
    Status,
    Data,
}
