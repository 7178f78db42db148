use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use pq_domain::{Category, ContentId, Quest, QuestId, QuestStatus, Submission};

use crate::{contracts::PhotoQuest, error::BlockchainError};

/// Parameters of a `createQuest` call. `reward` is sent as the call value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuest {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub reward: U256,
    pub deadline: u64,
    pub max_submissions: u64,
}

/// A mined, successful transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionOutcome {
    pub transaction_hash: B256,
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedQuest {
    pub quest_id: QuestId,
    pub transaction: TransactionOutcome,
}

/// The quest contract's read and write surface.
///
/// Reads return `Ok(None)` for the contract's zero-valued "missing" answers,
/// so absence is never confused with failure. Writes are signed by `sender`.
#[async_trait]
pub trait QuestContract: Send + Sync {
    async fn quest_counter(&self) -> Result<u64, BlockchainError>;

    async fn get_quest(&self, quest_id: QuestId) -> Result<Option<Quest>, BlockchainError>;

    async fn get_quest_submissions(
        &self,
        quest_id: QuestId,
    ) -> Result<Vec<Submission>, BlockchainError>;

    async fn has_photographer_submitted(
        &self,
        quest_id: QuestId,
        photographer: Address,
    ) -> Result<bool, BlockchainError>;

    async fn get_photographer_submission(
        &self,
        quest_id: QuestId,
        photographer: Address,
    ) -> Result<Option<Submission>, BlockchainError>;

    async fn get_user_quests(&self, user: Address) -> Result<Vec<QuestId>, BlockchainError>;

    async fn get_photographer_quests(
        &self,
        photographer: Address,
    ) -> Result<Vec<QuestId>, BlockchainError>;

    async fn get_selected_submissions(
        &self,
        quest_id: QuestId,
    ) -> Result<Vec<Submission>, BlockchainError>;

    async fn create_quest(
        &self,
        sender: Address,
        quest: &NewQuest,
    ) -> Result<CreatedQuest, BlockchainError>;

    async fn submit_photo(
        &self,
        sender: Address,
        quest_id: QuestId,
        watermarked: &ContentId,
        original: &ContentId,
    ) -> Result<TransactionOutcome, BlockchainError>;

    /// `indices` must already be sorted ascending.
    async fn select_submissions(
        &self,
        sender: Address,
        quest_id: QuestId,
        indices: &[u64],
    ) -> Result<TransactionOutcome, BlockchainError>;
}

pub(crate) fn u64_field(field: &'static str, value: U256) -> Result<u64, BlockchainError> {
    u64::try_from(value).map_err(|_| BlockchainError::OutOfRange {
        field,
        value: value.to_string(),
    })
}

pub(crate) fn quest_id_field(value: U256) -> Result<QuestId, BlockchainError> {
    QuestId::from_u256(value).ok_or_else(|| BlockchainError::OutOfRange {
        field: "questId",
        value: value.to_string(),
    })
}

/// `None` for the zero quest the contract returns for unknown ids.
pub(crate) fn quest_from_contract(raw: PhotoQuest::Quest) -> Result<Option<Quest>, BlockchainError> {
    if raw.creator == Address::ZERO {
        return Ok(None);
    }

    let category = Category::try_from(raw.category).map_err(|value| BlockchainError::OutOfRange {
        field: "category",
        value: value.to_string(),
    })?;
    let status = QuestStatus::try_from(raw.status).map_err(|value| BlockchainError::OutOfRange {
        field: "status",
        value: value.to_string(),
    })?;
    let completed_at = u64_field("completedAt", raw.completedAt)?;

    Ok(Some(Quest {
        id: quest_id_field(raw.id)?,
        creator: raw.creator,
        title: raw.title,
        description: raw.description,
        category,
        reward: raw.reward,
        deadline: u64_field("deadline", raw.deadline)?,
        max_submissions: u64_field("maxSubmissions", raw.maxSubmissions)?,
        status,
        created_at: u64_field("createdAt", raw.createdAt)?,
        completed_at: (completed_at != 0).then_some(completed_at),
        submission_count: u64_field("submissionCount", raw.submissionCount)?,
    }))
}

/// `None` for the zero submission the contract returns when nothing matches.
pub(crate) fn submission_from_contract(
    quest_id: QuestId,
    raw: PhotoQuest::Submission,
) -> Result<Option<Submission>, BlockchainError> {
    if raw.photographer == Address::ZERO {
        return Ok(None);
    }

    let watermarked_cid = ContentId::parse(&raw.watermarkedPhotoIPFS).ok_or_else(|| {
        BlockchainError::OutOfRange {
            field: "watermarkedPhotoIPFS",
            value: raw.watermarkedPhotoIPFS.clone(),
        }
    })?;

    Ok(Some(Submission {
        quest_id,
        photographer: raw.photographer,
        watermarked_cid,
        original_cid: ContentId::parse(&raw.originalPhotoIPFS),
        submission_index: u64_field("submissionIndex", raw.submissionIndex)?,
        submitted_at: u64_field("submittedAt", raw.submittedAt)?,
        is_selected: raw.isSelected,
    }))
}

pub(crate) fn submissions_from_contract(
    quest_id: QuestId,
    raw: Vec<PhotoQuest::Submission>,
) -> Result<Vec<Submission>, BlockchainError> {
    let mut submissions = Vec::with_capacity(raw.len());
    for entry in raw {
        if let Some(submission) = submission_from_contract(quest_id, entry)? {
            submissions.push(submission);
        }
    }
    Ok(submissions)
}

pub(crate) fn quest_ids_from_contract(raw: Vec<U256>) -> Result<Vec<QuestId>, BlockchainError> {
    raw.into_iter().map(quest_id_field).collect()
}
