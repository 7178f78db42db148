use pq_domain::{Address, B256, EventId, QuestId, U256, u256_decimal};
use serde::{Deserialize, Serialize};

/// Block metadata shared by every indexed event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMeta {
    pub id: EventId,
    pub block_number: u64,
    pub block_timestamp: u64,
    pub transaction_hash: B256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCreatedRecord {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub quest_id: QuestId,
    pub requester: Address,
    pub title: String,
    /// Raw contract category value (0-7).
    pub category: u8,
    #[serde(with = "u256_decimal")]
    pub reward: U256,
    #[serde(with = "u256_decimal")]
    pub deadline: U256,
    #[serde(with = "u256_decimal")]
    pub max_submissions: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSubmittedRecord {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub quest_id: QuestId,
    pub photographer: Address,
    pub watermarked_photo_ipfs: String,
    #[serde(with = "u256_decimal")]
    pub submission_index: U256,
    #[serde(with = "u256_decimal")]
    pub timestamp: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsSelectedRecord {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub quest_id: QuestId,
    pub requester: Address,
    pub selected_photographers: Vec<Address>,
    #[serde(with = "u256_decimal")]
    pub reward_per_winner: U256,
    #[serde(with = "u256_decimal")]
    pub timestamp: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCompletedRecord {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub quest_id: QuestId,
    pub requester: Address,
    #[serde(with = "u256_decimal")]
    pub total_selected_submissions: U256,
    #[serde(with = "u256_decimal")]
    pub total_reward_distributed: U256,
    #[serde(with = "u256_decimal")]
    pub platform_fee: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestCancelledRecord {
    #[serde(flatten)]
    pub meta: EventMeta,
    pub quest_id: QuestId,
    pub requester: Address,
    #[serde(with = "u256_decimal")]
    pub refund_amount: U256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformFeeUpdatedRecord {
    #[serde(flatten)]
    pub meta: EventMeta,
    #[serde(with = "u256_decimal")]
    pub old_fee: U256,
    #[serde(with = "u256_decimal")]
    pub new_fee: U256,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Asc,
    #[default]
    Desc,
}

/// Pagination over an event list, ordered by block timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u64>,
    pub offset: u64,
    pub order: OrderDirection,
}

impl Page {
    pub const DEFAULT_FIRST: u64 = 100;
    pub const MAX_FIRST: u64 = 1000;

    /// `first` is clamped to 1..=1000 (default 100).
    pub fn new(first: Option<u64>, skip: Option<u64>, order: Option<OrderDirection>) -> Self {
        Self {
            limit: Some(
                first
                    .unwrap_or(Self::DEFAULT_FIRST)
                    .clamp(1, Self::MAX_FIRST),
            ),
            offset: skip.unwrap_or(0),
            order: order.unwrap_or_default(),
        }
    }

    /// Every row, newest first.
    pub fn unbounded() -> Self {
        Self {
            limit: None,
            offset: 0,
            order: OrderDirection::Desc,
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

/// Filter for event tables keyed by quest and requester.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestFilter {
    /// Matches any of these quests when set.
    pub quest_ids: Option<Vec<QuestId>>,
    pub requester: Option<Address>,
}

impl QuestFilter {
    pub fn quest(quest_id: QuestId) -> Self {
        Self {
            quest_ids: Some(vec![quest_id]),
            requester: None,
        }
    }

    pub fn requester(requester: Address) -> Self {
        Self {
            quest_ids: None,
            requester: Some(requester),
        }
    }
}

/// Filter for photo submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub quest_ids: Option<Vec<QuestId>>,
    pub photographer: Option<Address>,
}

impl SubmissionFilter {
    pub fn quest(quest_id: QuestId) -> Self {
        Self {
            quest_ids: Some(vec![quest_id]),
            photographer: None,
        }
    }

    pub fn photographer(photographer: Address) -> Self {
        Self {
            quest_ids: None,
            photographer: Some(photographer),
        }
    }
}
