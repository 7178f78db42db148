use sea_orm_migration::{
    async_trait::async_trait,
    prelude::{DbErr, DeriveMigrationName, Iden, Index, MigrationTrait, SchemaManager, Table},
    schema::{big_integer, string, text},
    sea_query,
};

#[derive(Iden)]
enum PhotoSubmitted {
    Table,
    Id,
    QuestId,
    Photographer,
    WatermarkedPhotoIpfs,
    SubmissionIndex,
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
                    .table(PhotoSubmitted::Table)
                    .if_not_exists()
                    .col(string(PhotoSubmitted::Id).primary_key())
                    .col(big_integer(PhotoSubmitted::QuestId))
                    .col(string(PhotoSubmitted::Photographer))
                    .col(text(PhotoSubmitted::WatermarkedPhotoIpfs))
                    .col(string(PhotoSubmitted::SubmissionIndex))
                    .col(string(PhotoSubmitted::Timestamp))
                    .col(big_integer(PhotoSubmitted::BlockNumber))
                    .col(big_integer(PhotoSubmitted::BlockTimestamp))
                    .col(string(PhotoSubmitted::TransactionHash))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photo_submitted_quest")
                    .table(PhotoSubmitted::Table)
                    .col(PhotoSubmitted::QuestId)
                    .col(PhotoSubmitted::SubmissionIndex)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_photo_submitted_photographer")
                    .table(PhotoSubmitted::Table)
                    .col(PhotoSubmitted::Photographer)
                    .col(PhotoSubmitted::BlockTimestamp)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(PhotoSubmitted::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await
    }
}
