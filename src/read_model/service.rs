use std::{collections::HashSet, sync::Arc, time::Duration};

use pq_blockchain::QuestContract;
use pq_domain::{Address, QuestId};
use pq_observability::record_read_model_view;
use pq_repository::{
    Page, PhotoSubmittedRepository, PlatformFeeRepository, QuestCancelledRepository,
    QuestCompletedRepository, QuestCreatedRecord, QuestCreatedRepository, QuestFilter,
    RepositoryError, RepositoryManager, SubmissionFilter, SubmissionsSelectedRepository,
};
use thiserror::Error;

use super::{
    cache::{CacheWrite, QuestViewCache},
    gallery, projections,
    reconcile::reconcile_status,
    view::{ActiveSubmission, Gallery, QuestCounts, QuestView, QuestViewState, UserStats},
};

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ReadModelError {
    #[error("Indexed store query failed: {0}")]
    Repository(#[from] RepositoryError),
}

/// Quest views and projections built from the contract and the indexed store.
pub struct QuestReadModel {
    contract: Arc<dyn QuestContract>,
    quest_created_repository: QuestCreatedRepository,
    photo_submitted_repository: PhotoSubmittedRepository,
    submissions_selected_repository: SubmissionsSelectedRepository,
    quest_completed_repository: QuestCompletedRepository,
    quest_cancelled_repository: QuestCancelledRepository,
    platform_fee_repository: PlatformFeeRepository,
    cache: QuestViewCache,
}

impl QuestReadModel {
    pub fn new(contract: Arc<dyn QuestContract>, repository_manager: &RepositoryManager) -> Self {
        Self::with_cache_ttl(contract, repository_manager, DEFAULT_CACHE_TTL)
    }

    pub fn with_cache_ttl(
        contract: Arc<dyn QuestContract>,
        repository_manager: &RepositoryManager,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            contract,
            quest_created_repository: repository_manager.quest_created_repository(),
            photo_submitted_repository: repository_manager.photo_submitted_repository(),
            submissions_selected_repository: repository_manager.submissions_selected_repository(),
            quest_completed_repository: repository_manager.quest_completed_repository(),
            quest_cancelled_repository: repository_manager.quest_cancelled_repository(),
            platform_fee_repository: repository_manager.platform_fee_repository(),
            cache: QuestViewCache::new(cache_ttl),
        }
    }

    /// Reconciled view of one quest. Contract failures become
    /// [`QuestViewState::Unavailable`]; only store failures are errors.
    pub async fn quest_view(&self, quest_id: QuestId) -> Result<QuestViewState, ReadModelError> {
        if let Some(view) = self.cache.fresh(quest_id) {
            record_read_model_view("quest", "cached");
            return Ok(QuestViewState::Ready(view));
        }

        let ticket = self.cache.begin_fetch(quest_id);
        let filter = QuestFilter::quest(quest_id);
        let latest = Page::new(Some(1), None, None);
        let (contract_read, created, completed, cancelled) = tokio::join!(
            self.contract.get_quest(quest_id),
            self.quest_created_repository.find_latest(quest_id),
            self.quest_completed_repository.find(&filter, latest),
            self.quest_cancelled_repository.find(&filter, latest),
        );
        let (created, completed, cancelled) = (created?, completed?, cancelled?);

        let state = match contract_read {
            Err(error) => {
                tracing::warn!(quest_id = %quest_id, error = %error, "Quest contract read failed");
                QuestViewState::Unavailable {
                    reason: error.to_string(),
                }
            }
            Ok(None) => match created {
                Some(record) => QuestViewState::Pending(record),
                None => QuestViewState::NotFound,
            },
            Ok(Some(quest)) => {
                let completed_event_at =
                    completed.first().map(|record| record.meta.block_timestamp);
                let cancelled_at = cancelled.first().map(|record| record.meta.block_timestamp);
                let completed_set: HashSet<QuestId> =
                    completed.iter().map(|record| record.quest_id).collect();
                let cancelled_set: HashSet<QuestId> =
                    cancelled.iter().map(|record| record.quest_id).collect();

                let as_of = [
                    created.as_ref().map(|record| record.meta.block_timestamp),
                    completed_event_at,
                    cancelled_at,
                ]
                .into_iter()
                .flatten()
                .max()
                .unwrap_or(0);

                let view = Arc::new(QuestView {
                    display_status: reconcile_status(
                        quest_id,
                        quest.status,
                        &completed_set,
                        &cancelled_set,
                    ),
                    quest,
                    completed_event_at,
                    cancelled_at,
                    indexed: created.is_some(),
                    as_of,
                });

                if self.cache.complete_fetch(ticket, Arc::clone(&view)) != CacheWrite::Stored {
                    tracing::trace!(quest_id = %quest_id, "Discarded stale quest view");
                }
                QuestViewState::Ready(view)
            }
        };

        record_read_model_view("quest", state.label());
        Ok(state)
    }

    /// Created quests that have neither completed nor been cancelled, in the
    /// page's block timestamp order.
    pub async fn active_quests(
        &self,
        page: Page,
    ) -> Result<Vec<QuestCreatedRecord>, ReadModelError> {
        let all = QuestFilter::default();
        let (created, completed, cancelled) = tokio::try_join!(
            self.quest_created_repository.find(&all, Page::unbounded()),
            self.completed_ids(&all),
            self.cancelled_ids(&all),
        )?;

        let active = projections::active_quests(created, &completed, &cancelled, page.order);
        record_read_model_view("active_quests", "ready");
        Ok(projections::paginate(active, page.offset, page.limit))
    }

    /// Quest totals by distinct quest id, so repeated events for one quest
    /// count once.
    pub async fn quest_counts(&self) -> Result<QuestCounts, ReadModelError> {
        let all = QuestFilter::default();
        let (total, completed, cancelled) = tokio::try_join!(
            self.quest_created_repository.count_distinct_quests(&all),
            self.quest_completed_repository.count_distinct_quests(&all),
            self.quest_cancelled_repository.count_distinct_quests(&all),
        )?;
        Ok(QuestCounts::new(total, completed, cancelled))
    }

    pub async fn user_stats(&self, user: Address) -> Result<UserStats, ReadModelError> {
        let as_requester = QuestFilter::requester(user);
        let as_photographer = SubmissionFilter::photographer(user);
        let (created_quests, submissions, completed_quests) = tokio::try_join!(
            self.quest_created_repository.count_distinct_quests(&as_requester),
            self.photo_submitted_repository.count(&as_photographer),
            self.quest_completed_repository.count_distinct_quests(&as_requester),
        )?;
        Ok(UserStats {
            created_quests,
            submissions,
            completed_quests,
        })
    }

    /// The photographer's submissions to quests that were not cancelled.
    pub async fn active_submissions(
        &self,
        photographer: Address,
    ) -> Result<Vec<ActiveSubmission>, ReadModelError> {
        let submissions = self
            .photo_submitted_repository
            .find(&SubmissionFilter::photographer(photographer), Page::unbounded())
            .await?;
        if submissions.is_empty() {
            return Ok(Vec::new());
        }

        let quest_ids = distinct_quest_ids(submissions.iter().map(|record| record.quest_id));
        let filter = QuestFilter {
            quest_ids: Some(quest_ids),
            requester: None,
        };
        let (quests, completed, cancelled) = tokio::try_join!(
            self.quest_created_repository.find(&filter, Page::unbounded()),
            self.completed_ids(&filter),
            self.cancelled_ids(&filter),
        )?;

        record_read_model_view("active_submissions", "ready");
        Ok(projections::active_submissions(
            &submissions,
            quests,
            &completed,
            &cancelled,
        ))
    }

    /// Winning photos from the requester's completed quests.
    pub async fn gallery(&self, requester: Address) -> Result<Gallery, ReadModelError> {
        let by_requester = QuestFilter::requester(requester);
        let (created, completed, selections, latest_fee) = tokio::try_join!(
            self.quest_created_repository.find(&by_requester, Page::unbounded()),
            self.quest_completed_repository.find(&by_requester, Page::unbounded()),
            self.submissions_selected_repository.find(&by_requester, Page::unbounded()),
            self.platform_fee_repository.latest(),
        )?;
        if selections.is_empty() || completed.is_empty() {
            return Ok(Gallery::default());
        }

        let quest_ids = distinct_quest_ids(completed.iter().map(|record| record.quest_id));
        let submissions = self
            .photo_submitted_repository
            .find(
                &SubmissionFilter {
                    quest_ids: Some(quest_ids),
                    photographer: None,
                },
                Page::unbounded(),
            )
            .await?;

        let mut photos = gallery::gallery_photos(
            created,
            &completed,
            &selections,
            &submissions,
            gallery::platform_fee(latest_fee.as_ref()),
        );

        let photo_quests = distinct_quest_ids(photos.iter().map(|photo| photo.quest_id));
        for quest_id in photo_quests {
            match self.contract.get_selected_submissions(quest_id).await {
                Ok(selected) => gallery::fill_original_cids(&mut photos, quest_id, &selected),
                Err(error) => tracing::warn!(
                    quest_id = %quest_id,
                    error = %error,
                    "Could not read original photos; using watermarked CIDs"
                ),
            }
        }

        record_read_model_view("gallery", "ready");
        Ok(gallery::summarize(photos))
    }

    async fn completed_ids(
        &self,
        filter: &QuestFilter,
    ) -> Result<HashSet<QuestId>, RepositoryError> {
        let records = self
            .quest_completed_repository
            .find(filter, Page::unbounded())
            .await?;
        Ok(records.into_iter().map(|record| record.quest_id).collect())
    }

    async fn cancelled_ids(
        &self,
        filter: &QuestFilter,
    ) -> Result<HashSet<QuestId>, RepositoryError> {
        let records = self
            .quest_cancelled_repository
            .find(filter, Page::unbounded())
            .await?;
        Ok(records.into_iter().map(|record| record.quest_id).collect())
    }
}

fn distinct_quest_ids(ids: impl Iterator<Item = QuestId>) -> Vec<QuestId> {
    let mut ids: Vec<QuestId> = ids.collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
