mod blockchain_id;
mod content_id;
mod event_id;
mod gallery;
mod quest;
mod reward;
mod submission;
pub mod u256_decimal;

pub use blockchain_id::BlockchainId;
pub use content_id::ContentId;
pub use event_id::EventId;
pub use gallery::GalleryPhoto;
pub use quest::{Category, Quest, QuestId, QuestStatus, StatusTransitionError};
pub use reward::{DEFAULT_PLATFORM_FEE_BPS, PlatformFee, RewardShare};
pub use submission::{SelectionEvent, Submission};

pub use alloy::primitives::{Address, B256, U256};
