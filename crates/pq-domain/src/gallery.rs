use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{Category, ContentId, QuestId};

/// A winning photo in a requester's collection. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhoto {
    pub quest_id: QuestId,
    pub quest_title: String,
    pub category: Category,
    pub photographer: Address,
    pub watermarked_cid: ContentId,
    /// Falls back to the watermarked CID when the original could not be read.
    pub original_cid: ContentId,
    #[serde(with = "crate::u256_decimal")]
    pub submission_index: U256,
    #[serde(with = "crate::u256_decimal")]
    pub submitted_at: U256,
    pub completed_at: u64,
    /// Payout to this photographer in wei.
    #[serde(with = "crate::u256_decimal")]
    pub reward_share: U256,
}
