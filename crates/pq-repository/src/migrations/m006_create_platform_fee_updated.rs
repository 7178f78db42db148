use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, string},
    sea_query,
};

#[derive(Iden)]
enum PlatformFeeUpdated {
    Table,
    Id,
    OldFee,
    NewFee,
    BlockNumber,
    BlockTimestamp,
    TransactionHash,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlatformFeeUpdated::Table)
                    .if_not_exists()
                    .col(string(PlatformFeeUpdated::Id).primary_key())
                    .col(string(PlatformFeeUpdated::OldFee))
                    .col(string(PlatformFeeUpdated::NewFee))
                    .col(big_integer(PlatformFeeUpdated::BlockNumber))
                    .col(big_integer(PlatformFeeUpdated::BlockTimestamp))
                    .col(string(PlatformFeeUpdated::TransactionHash))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(PlatformFeeUpdated::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
