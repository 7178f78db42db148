use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, string, text},
    sea_query,
};

#[derive(Iden)]
enum SubmissionsSelected {
    Table,
    Id,
    QuestId,
    Requester,
    SelectedPhotographers,
    RewardPerWinner,
    Timestamp,
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
                    .table(SubmissionsSelected::Table)
                    .if_not_exists()
                    .col(string(SubmissionsSelected::Id).primary_key())
                    .col(big_integer(SubmissionsSelected::QuestId))
                    .col(string(SubmissionsSelected::Requester))
                    .col(text(SubmissionsSelected::SelectedPhotographers))
                    .col(string(SubmissionsSelected::RewardPerWinner))
                    .col(string(SubmissionsSelected::Timestamp))
                    .col(big_integer(SubmissionsSelected::BlockNumber))
                    .col(big_integer(SubmissionsSelected::BlockTimestamp))
                    .col(string(SubmissionsSelected::TransactionHash))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_selected_quest_id")
                    .table(SubmissionsSelected::Table)
                    .col(SubmissionsSelected::QuestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_selected_requester")
                    .table(SubmissionsSelected::Table)
                    .col(SubmissionsSelected::Requester)
                    .col(SubmissionsSelected::BlockTimestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(SubmissionsSelected::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
