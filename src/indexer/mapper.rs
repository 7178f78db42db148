//! Maps decoded contract events onto flat, immutable store records.
//!
//! Each event becomes exactly one record. Every field is copied from an event
//! parameter or from the log's block metadata; nothing is derived. uint256
//! parameters stay `U256`, except the quest id, which keys every table.

use pq_blockchain::{ContractEvent, ContractLog, U256};
use pq_domain::{EventId, QuestId};
use pq_repository::{
    EventMeta, PhotoSubmittedRecord, PlatformFeeUpdatedRecord, QuestCancelledRecord,
    QuestCompletedRecord, QuestCreatedRecord, SubmissionsSelectedRecord,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MapError {
    #[error("{event} log at block {block_number} has no block timestamp")]
    MissingTimestamp {
        event: &'static str,
        block_number: u64,
    },

    #[error("{event}.questId does not fit in 64 bits: {value}")]
    QuestIdOutOfRange { event: &'static str, value: U256 },
}

/// One store row, tagged by event kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IndexedRecord {
    QuestCreated(QuestCreatedRecord),
    PhotoSubmitted(PhotoSubmittedRecord),
    SubmissionsSelected(SubmissionsSelectedRecord),
    QuestCompleted(QuestCompletedRecord),
    QuestCancelled(QuestCancelledRecord),
    PlatformFeeUpdated(PlatformFeeUpdatedRecord),
}

impl IndexedRecord {
    pub(crate) fn meta(&self) -> &EventMeta {
        match self {
            IndexedRecord::QuestCreated(record) => &record.meta,
            IndexedRecord::PhotoSubmitted(record) => &record.meta,
            IndexedRecord::SubmissionsSelected(record) => &record.meta,
            IndexedRecord::QuestCompleted(record) => &record.meta,
            IndexedRecord::QuestCancelled(record) => &record.meta,
            IndexedRecord::PlatformFeeUpdated(record) => &record.meta,
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            IndexedRecord::QuestCreated(_) => "QuestCreated",
            IndexedRecord::PhotoSubmitted(_) => "PhotoSubmitted",
            IndexedRecord::SubmissionsSelected(_) => "SubmissionsSelected",
            IndexedRecord::QuestCompleted(_) => "QuestCompleted",
            IndexedRecord::QuestCancelled(_) => "QuestCancelled",
            IndexedRecord::PlatformFeeUpdated(_) => "PlatformFeeUpdated",
        }
    }
}

pub(crate) fn map_contract_log(log: &ContractLog) -> Result<IndexedRecord, MapError> {
    let event = log.event.kind();
    let block_timestamp = log.meta.block_timestamp.ok_or(MapError::MissingTimestamp {
        event,
        block_number: log.meta.block_number,
    })?;
    let meta = EventMeta {
        id: EventId::from_log(log.meta.transaction_hash, log.meta.log_index),
        block_number: log.meta.block_number,
        block_timestamp,
        transaction_hash: log.meta.transaction_hash,
    };
    let quest_id = |value: U256| {
        u64::try_from(value)
            .map(QuestId::new)
            .map_err(|_| MapError::QuestIdOutOfRange { event, value })
    };

    let record = match &log.event {
        ContractEvent::QuestCreated(e) => IndexedRecord::QuestCreated(QuestCreatedRecord {
            meta,
            quest_id: quest_id(e.questId)?,
            requester: e.requester,
            title: e.title.clone(),
            category: e.category,
            reward: e.reward,
            deadline: e.deadline,
            max_submissions: e.maxSubmissions,
        }),
        ContractEvent::PhotoSubmitted(e) => IndexedRecord::PhotoSubmitted(PhotoSubmittedRecord {
            meta,
            quest_id: quest_id(e.questId)?,
            photographer: e.photographer,
            watermarked_photo_ipfs: e.watermarkedPhotoIPFS.clone(),
            submission_index: e.submissionIndex,
            timestamp: e.timestamp,
        }),
        ContractEvent::SubmissionsSelected(e) => {
            IndexedRecord::SubmissionsSelected(SubmissionsSelectedRecord {
                meta,
                quest_id: quest_id(e.questId)?,
                requester: e.requester,
                selected_photographers: e.selectedPhotographers.clone(),
                reward_per_winner: e.rewardPerWinner,
                timestamp: e.timestamp,
            })
        }
        ContractEvent::QuestCompleted(e) => IndexedRecord::QuestCompleted(QuestCompletedRecord {
            meta,
            quest_id: quest_id(e.questId)?,
            requester: e.requester,
            total_selected_submissions: e.totalSelectedSubmissions,
            total_reward_distributed: e.totalRewardDistributed,
            platform_fee: e.platformFee,
        }),
        ContractEvent::QuestCancelled(e) => IndexedRecord::QuestCancelled(QuestCancelledRecord {
            meta,
            quest_id: quest_id(e.questId)?,
            requester: e.requester,
            refund_amount: e.refundAmount,
        }),
        ContractEvent::PlatformFeeUpdated(e) => {
            IndexedRecord::PlatformFeeUpdated(PlatformFeeUpdatedRecord {
                meta,
                old_fee: e.oldFee,
                new_fee: e.newFee,
            })
        }
    };

    Ok(record)
}
