//! Client workflows that write to the quest contract.
//!
//! Each takes the acting wallet explicitly and works against any
//! [`QuestContract`](pq_blockchain::QuestContract) implementation.

mod create_quest;
mod selection;
mod submit_photo;
mod wallet;

#[cfg(test)]
mod tests;

pub use create_quest::{CreateQuestError, QuestDraft, create_quest};
pub use selection::{SelectionError, SelectionState, SelectionWorkflow};
pub use submit_photo::{PhotoSubmission, SubmissionError, SubmittedPhoto, submit_photo};
pub use wallet::WalletContext;
