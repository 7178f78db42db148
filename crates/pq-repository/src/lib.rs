mod codec;
mod config;
mod config_error;
pub mod error;
mod manager;
mod migrations;
mod models;
mod observability;
mod repositories;
mod types;

#[cfg(test)]
mod tests;

pub use config::{DatabaseBackend, RepositoryManagerConfig, RepositoryManagerConfigRaw};
pub use config_error::ConfigError;
pub use error::RepositoryError;
pub use manager::RepositoryManager;
pub use repositories::{
    blockchain_repository::BlockchainRepository,
    photo_submitted_repository::PhotoSubmittedRepository,
    platform_fee_repository::PlatformFeeRepository,
    quest_cancelled_repository::QuestCancelledRepository,
    quest_completed_repository::QuestCompletedRepository,
    quest_created_repository::QuestCreatedRepository,
    submissions_selected_repository::SubmissionsSelectedRepository,
};
pub use types::{
    EventMeta, OrderDirection, Page, PhotoSubmittedRecord, PlatformFeeUpdatedRecord,
    QuestCancelledRecord, QuestCompletedRecord, QuestCreatedRecord, QuestFilter,
    SubmissionFilter, SubmissionsSelectedRecord,
};
