use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// On-chain quest identifier (`questCounter` value at creation).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct QuestId(u64);

impl QuestId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub fn to_u256(self) -> U256 {
        U256::from(self.0)
    }

    /// Narrows a contract `uint256` id. Returns `None` when it does not fit in `u64`.
    pub fn from_u256(value: U256) -> Option<Self> {
        u64::try_from(value).ok().map(Self)
    }
}

impl From<u64> for QuestId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for QuestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for QuestId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    Portrait,
    Landscape,
    Street,
    Wildlife,
    Architecture,
    Event,
    Product,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Portrait,
        Category::Landscape,
        Category::Street,
        Category::Wildlife,
        Category::Architecture,
        Category::Event,
        Category::Product,
        Category::Other,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Portrait => "Portrait",
            Category::Landscape => "Landscape",
            Category::Street => "Street",
            Category::Wildlife => "Wildlife",
            Category::Architecture => "Architecture",
            Category::Event => "Event",
            Category::Product => "Product",
            Category::Other => "Other",
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(usize::from(value)).copied().ok_or(value)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("'{}' is not a valid category", s))
    }
}

/// Quest lifecycle status as stored by the contract (values 0-3).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QuestStatus {
    Open,
    HasSubmissions,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("Invalid quest status transition: {from:?} -> {to:?}")]
pub struct StatusTransitionError {
    pub from: QuestStatus,
    pub to: QuestStatus,
}

impl QuestStatus {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestStatus::Open => "Open",
            QuestStatus::HasSubmissions => "HasSubmissions",
            QuestStatus::Completed => "Completed",
            QuestStatus::Cancelled => "Cancelled",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, QuestStatus::Completed | QuestStatus::Cancelled)
    }

    /// Whether winners may still be selected or photos submitted.
    pub fn is_active(self) -> bool {
        !self.is_terminal()
    }

    /// Forward-only lifecycle: Open -> HasSubmissions -> Completed, or a
    /// non-terminal status -> Cancelled. Staying in place is allowed.
    pub fn can_transition_to(self, next: QuestStatus) -> bool {
        use QuestStatus::*;

        self == next
            || matches!(
                (self, next),
                (Open, HasSubmissions)
                    | (HasSubmissions, Completed)
                    | (Open, Cancelled)
                    | (HasSubmissions, Cancelled)
            )
    }

    pub fn transition_to(self, next: QuestStatus) -> Result<QuestStatus, StatusTransitionError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(StatusTransitionError {
                from: self,
                to: next,
            })
        }
    }

    /// Whether `later` can follow `self` after any number of forward steps.
    pub fn can_reach(self, later: QuestStatus) -> bool {
        self.transition_to(later).is_ok()
            || self
                .transition_to(QuestStatus::HasSubmissions)
                .and_then(|next| next.transition_to(later))
                .is_ok()
    }
}

impl TryFrom<u8> for QuestStatus {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(QuestStatus::Open),
            1 => Ok(QuestStatus::HasSubmissions),
            2 => Ok(QuestStatus::Completed),
            3 => Ok(QuestStatus::Cancelled),
            other => Err(other),
        }
    }
}

impl std::fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quest as returned by a direct contract read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub creator: Address,
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Escrowed reward in wei.
    #[serde(with = "crate::u256_decimal")]
    pub reward: U256,
    /// Unix seconds.
    pub deadline: u64,
    pub max_submissions: u64,
    pub status: QuestStatus,
    pub created_at: u64,
    pub completed_at: Option<u64>,
    pub submission_count: u64,
}

impl Quest {
    pub fn is_created_by(&self, address: Address) -> bool {
        self.creator == address
    }

    pub fn deadline_passed(&self, now: u64) -> bool {
        now >= self.deadline
    }

    pub fn is_full(&self) -> bool {
        self.submission_count >= self.max_submissions
    }

    /// Open for new photos at `now`.
    pub fn accepts_submissions(&self, now: u64) -> bool {
        self.status.is_active() && !self.deadline_passed(now) && !self.is_full()
    }
}
