use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, small_integer, string, text},
    sea_query,
};

#[derive(Iden)]
enum QuestCreated {
    Table,
    Id,
    QuestId,
    Requester,
    Title,
    Category,
    Reward,
    Deadline,
    MaxSubmissions,
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
                    .table(QuestCreated::Table)
                    .if_not_exists()
                    .col(string(QuestCreated::Id).primary_key())
                    .col(big_integer(QuestCreated::QuestId))
                    .col(string(QuestCreated::Requester))
                    .col(text(QuestCreated::Title))
                    .col(small_integer(QuestCreated::Category))
                    .col(string(QuestCreated::Reward))
                    .col(string(QuestCreated::Deadline))
                    .col(string(QuestCreated::MaxSubmissions))
                    .col(big_integer(QuestCreated::BlockNumber))
                    .col(big_integer(QuestCreated::BlockTimestamp))
                    .col(string(QuestCreated::TransactionHash))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quest_created_quest_id")
                    .table(QuestCreated::Table)
                    .col(QuestCreated::QuestId)
                    .to_owned(),
            )
            .await?;

        // Requester listings ordered by recency
        manager
            .create_index(
                Index::create()
                    .name("idx_quest_created_requester")
                    .table(QuestCreated::Table)
                    .col(QuestCreated::Requester)
                    .col(QuestCreated::BlockTimestamp)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quest_created_block_timestamp")
                    .table(QuestCreated::Table)
                    .col(QuestCreated::BlockTimestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(QuestCreated::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
