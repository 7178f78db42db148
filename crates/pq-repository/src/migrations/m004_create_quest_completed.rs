use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, string},
    sea_query,
};

#[derive(Iden)]
enum QuestCompleted {
    Table,
    Id,
    QuestId,
    Requester,
    TotalSelectedSubmissions,
    TotalRewardDistributed,
    PlatformFee,
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
                    .table(QuestCompleted::Table)
                    .if_not_exists()
                    .col(string(QuestCompleted::Id).primary_key())
                    .col(big_integer(QuestCompleted::QuestId))
                    .col(string(QuestCompleted::Requester))
                    .col(string(QuestCompleted::TotalSelectedSubmissions))
                    .col(string(QuestCompleted::TotalRewardDistributed))
                    .col(string(QuestCompleted::PlatformFee))
                    .col(big_integer(QuestCompleted::BlockNumber))
                    .col(big_integer(QuestCompleted::BlockTimestamp))
                    .col(string(QuestCompleted::TransactionHash))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quest_completed_quest_id")
                    .table(QuestCompleted::Table)
                    .col(QuestCompleted::QuestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quest_completed_requester")
                    .table(QuestCompleted::Table)
                    .col(QuestCompleted::Requester)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(QuestCompleted::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
