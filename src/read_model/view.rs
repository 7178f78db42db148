use std::sync::Arc;

use pq_domain::{ContentId, GalleryPhoto, Quest, QuestId, U256, u256_decimal};
use pq_repository::{PhotoSubmittedRecord, QuestCreatedRecord};
use serde::Serialize;

use super::reconcile::DisplayStatus;

/// A quest as read from the contract, annotated with indexed terminal events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestView {
    #[serde(flatten)]
    pub quest: Quest,
    pub display_status: DisplayStatus,
    /// Block timestamp of the indexed QuestCompleted event.
    pub completed_event_at: Option<u64>,
    /// Block timestamp of the indexed QuestCancelled event.
    pub cancelled_at: Option<u64>,
    /// Whether the QuestCreated event has been indexed yet.
    pub indexed: bool,
    /// Newest block timestamp among the indexed events this view was built from.
    pub as_of: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestViewState {
    Ready(Arc<QuestView>),
    /// Indexed, but the contract does not return the quest yet.
    Pending(QuestCreatedRecord),
    NotFound,
    Unavailable { reason: String },
}

impl QuestViewState {
    pub fn label(&self) -> &'static str {
        match self {
            QuestViewState::Ready(_) => "ready",
            QuestViewState::Pending(_) => "pending",
            QuestViewState::NotFound => "not_found",
            QuestViewState::Unavailable { .. } => "unavailable",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCounts {
    pub total: u64,
    pub completed: u64,
    pub cancelled: u64,
    pub active: u64,
}

impl QuestCounts {
    pub fn new(total: u64, completed: u64, cancelled: u64) -> Self {
        Self {
            total,
            completed,
            cancelled,
            active: total.saturating_sub(completed).saturating_sub(cancelled),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub created_quests: u64,
    pub submissions: u64,
    /// Quests this user created that have completed.
    pub completed_quests: u64,
}

/// A photographer's submission joined with its (non-cancelled) quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSubmission {
    pub quest_id: QuestId,
    pub quest_title: String,
    pub category: u8,
    #[serde(with = "u256_decimal")]
    pub reward: U256,
    #[serde(with = "u256_decimal")]
    pub deadline: U256,
    #[serde(with = "u256_decimal")]
    pub submission_index: U256,
    pub watermarked_cid: Option<ContentId>,
    #[serde(with = "u256_decimal")]
    pub submitted_at: U256,
    pub block_timestamp: u64,
    pub is_completed: bool,
}

impl ActiveSubmission {
    pub(crate) fn join(
        submission: &PhotoSubmittedRecord,
        quest: &QuestCreatedRecord,
        is_completed: bool,
    ) -> Self {
        Self {
            quest_id: submission.quest_id,
            quest_title: quest.title.clone(),
            category: quest.category,
            reward: quest.reward,
            deadline: quest.deadline,
            submission_index: submission.submission_index,
            watermarked_cid: ContentId::parse(&submission.watermarked_photo_ipfs),
            submitted_at: submission.timestamp,
            block_timestamp: submission.meta.block_timestamp,
            is_completed,
        }
    }
}

/// The winning photos a requester has paid for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gallery {
    pub photos: Vec<GalleryPhoto>,
    #[serde(with = "u256_decimal")]
    pub total_spent: U256,
    pub unique_quests: usize,
    pub unique_photographers: usize,
}
