pub(crate) mod blockchain;
pub(crate) mod photo_submitted;
pub(crate) mod platform_fee_updated;
pub(crate) mod quest_cancelled;
pub(crate) mod quest_completed;
pub(crate) mod quest_created;
pub(crate) mod submissions_selected;
