use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, string},
    sea_query,
};

#[derive(Iden)]
enum QuestCancelled {
    Table,
    Id,
    QuestId,
    Requester,
    RefundAmount,
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
                    .table(QuestCancelled::Table)
                    .if_not_exists()
                    .col(string(QuestCancelled::Id).primary_key())
                    .col(big_integer(QuestCancelled::QuestId))
                    .col(string(QuestCancelled::Requester))
                    .col(string(QuestCancelled::RefundAmount))
                    .col(big_integer(QuestCancelled::BlockNumber))
                    .col(big_integer(QuestCancelled::BlockTimestamp))
                    .col(string(QuestCancelled::TransactionHash))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quest_cancelled_quest_id")
                    .table(QuestCancelled::Table)
                    .col(QuestCancelled::QuestId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(QuestCancelled::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
