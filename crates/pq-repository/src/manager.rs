use std::sync::Arc;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

pub use crate::config::RepositoryManagerConfig;
use crate::{
    error::RepositoryError,
    migrations::Migrator,
    repositories::{
        blockchain_repository::BlockchainRepository,
        photo_submitted_repository::PhotoSubmittedRepository,
        platform_fee_repository::PlatformFeeRepository,
        quest_cancelled_repository::QuestCancelledRepository,
        quest_completed_repository::QuestCompletedRepository,
        quest_created_repository::QuestCreatedRepository,
        submissions_selected_repository::SubmissionsSelectedRepository,
    },
};

pub struct RepositoryManager {
    conn: Arc<DatabaseConnection>,
    blockchain_repository: BlockchainRepository,
    quest_created_repository: QuestCreatedRepository,
    photo_submitted_repository: PhotoSubmittedRepository,
    submissions_selected_repository: SubmissionsSelectedRepository,
    quest_completed_repository: QuestCompletedRepository,
    quest_cancelled_repository: QuestCancelledRepository,
    platform_fee_repository: PlatformFeeRepository,
}

impl RepositoryManager {
    /// Connects to the configured database and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if:
    /// - Database connection fails (e.g. database missing, bad credentials)
    /// - Migrations fail
    pub async fn connect(config: &RepositoryManagerConfig) -> Result<Self, RepositoryError> {
        let mut opt = ConnectOptions::new(config.connection_string());
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .sqlx_logging(true)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        let conn = Arc::new(Database::connect(opt).await?);

        Migrator::up(conn.as_ref(), None).await?;

        tracing::info!(
            backend = ?config.backend,
            max_connections = config.max_connections,
            "Repository connected and migrations applied"
        );

        Ok(RepositoryManager {
            blockchain_repository: BlockchainRepository::new(Arc::clone(&conn)),
            quest_created_repository: QuestCreatedRepository::new(Arc::clone(&conn)),
            photo_submitted_repository: PhotoSubmittedRepository::new(Arc::clone(&conn)),
            submissions_selected_repository: SubmissionsSelectedRepository::new(Arc::clone(
                &conn,
            )),
            quest_completed_repository: QuestCompletedRepository::new(Arc::clone(&conn)),
            quest_cancelled_repository: QuestCancelledRepository::new(Arc::clone(&conn)),
            platform_fee_repository: PlatformFeeRepository::new(Arc::clone(&conn)),
            conn,
        })
    }

    /// Round-trips a trivial statement to the database.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        self.conn.ping().await.map_err(Into::into)
    }

    pub fn blockchain_repository(&self) -> BlockchainRepository {
        self.blockchain_repository.clone()
    }

    pub fn quest_created_repository(&self) -> QuestCreatedRepository {
        self.quest_created_repository.clone()
    }

    pub fn photo_submitted_repository(&self) -> PhotoSubmittedRepository {
        self.photo_submitted_repository.clone()
    }

    pub fn submissions_selected_repository(&self) -> SubmissionsSelectedRepository {
        self.submissions_selected_repository.clone()
    }

    pub fn quest_completed_repository(&self) -> QuestCompletedRepository {
        self.quest_completed_repository.clone()
    }

    pub fn quest_cancelled_repository(&self) -> QuestCancelledRepository {
        self.quest_cancelled_repository.clone()
    }

    pub fn platform_fee_repository(&self) -> PlatformFeeRepository {
        self.platform_fee_repository.clone()
    }
}
