use pq_repository::{
    PhotoSubmittedRepository, PlatformFeeRepository, QuestCancelledRepository,
    QuestCompletedRepository, QuestCreatedRepository, RepositoryError, RepositoryManager,
    SubmissionsSelectedRepository,
};

use super::mapper::IndexedRecord;

/// Routes each record to its table with insert-or-ignore semantics.
#[derive(Clone)]
pub(crate) struct IndexedEventWriter {
    quest_created: QuestCreatedRepository,
    photo_submitted: PhotoSubmittedRepository,
    submissions_selected: SubmissionsSelectedRepository,
    quest_completed: QuestCompletedRepository,
    quest_cancelled: QuestCancelledRepository,
    platform_fee: PlatformFeeRepository,
}

impl IndexedEventWriter {
    pub(crate) fn new(repository_manager: &RepositoryManager) -> Self {
        Self {
            quest_created: repository_manager.quest_created_repository(),
            photo_submitted: repository_manager.photo_submitted_repository(),
            submissions_selected: repository_manager.submissions_selected_repository(),
            quest_completed: repository_manager.quest_completed_repository(),
            quest_cancelled: repository_manager.quest_cancelled_repository(),
            platform_fee: repository_manager.platform_fee_repository(),
        }
    }

    /// Returns `true` when a new row was written, `false` for a replay.
    pub(crate) async fn write(&self, record: &IndexedRecord) -> Result<bool, RepositoryError> {
        match record {
            IndexedRecord::QuestCreated(record) => self.quest_created.insert(record).await,
            IndexedRecord::PhotoSubmitted(record) => self.photo_submitted.insert(record).await,
            IndexedRecord::SubmissionsSelected(record) => {
                self.submissions_selected.insert(record).await
            }
            IndexedRecord::QuestCompleted(record) => self.quest_completed.insert(record).await,
            IndexedRecord::QuestCancelled(record) => self.quest_cancelled.insert(record).await,
            IndexedRecord::PlatformFeeUpdated(record) => self.platform_fee.insert(record).await,
        }
    }
}
