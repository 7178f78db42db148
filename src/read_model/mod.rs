//! Reconciled quest views and list projections.
//!
//! Quest status comes from a direct contract read; indexed events supply
//! timestamps and drive the list views.

mod cache;
mod gallery;
mod projections;
mod reconcile;
mod service;
mod view;


pub use reconcile::{DisplayStatus, reconcile_status};
pub use service::{QuestReadModel, ReadModelError};
pub use view::{ActiveSubmission, Gallery, QuestCounts, QuestView, QuestViewState, UserStats};
