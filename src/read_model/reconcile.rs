use std::collections::HashSet;

use pq_domain::{QuestId, QuestStatus};

/// Status shown for a quest once the contract read and the indexed terminal
/// events have been compared.
pub type DisplayStatus = QuestStatus;

/// Reconciles the contract's status with the indexed completion and
/// cancellation sets.
///
/// The contract read is current head and always wins. Indexed sets can only
/// disagree by running ahead of a stale RPC node, which is logged.
pub fn reconcile_status(
    quest_id: QuestId,
    raw: QuestStatus,
    completed: &HashSet<QuestId>,
    cancelled: &HashSet<QuestId>,
) -> DisplayStatus {
    let indexed = if cancelled.contains(&quest_id) {
        Some(QuestStatus::Cancelled)
    } else if completed.contains(&quest_id) {
        Some(QuestStatus::Completed)
    } else {
        None
    };

    if let Some(indexed) = indexed.filter(|indexed| *indexed != raw) {
        tracing::debug!(
            quest_id = %quest_id,
            contract_status = %raw,
            indexed_status = %indexed,
            "Contract status disagrees with indexed events; using contract status"
        );
    }

    raw
}
