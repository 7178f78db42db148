use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{ContentId, QuestId};

/// A photographer's entry to a quest, as stored by the contract.
///
/// At most one per (quest, photographer). `is_selected` flips once, when the
/// creator picks winners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub quest_id: QuestId,
    pub photographer: Address,
    pub watermarked_cid: ContentId,
    pub original_cid: Option<ContentId>,
    /// 0-based position within the quest.
    pub submission_index: u64,
    pub submitted_at: u64,
    pub is_selected: bool,
}

/// Winners chosen for a quest. At most one per quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionEvent {
    pub quest_id: QuestId,
    pub requester: Address,
    pub selected_photographers: Vec<Address>,
    #[serde(with = "crate::u256_decimal")]
    pub reward_per_winner: U256,
    pub timestamp: u64,
}

impl SelectionEvent {
    pub fn includes(&self, photographer: Address) -> bool {
        self.selected_photographers.contains(&photographer)
    }
}
