//! Pure list projections over indexed event records.

use std::collections::{HashMap, HashSet};

use pq_domain::QuestId;
use pq_repository::{OrderDirection, PhotoSubmittedRecord, QuestCreatedRecord};

use super::view::ActiveSubmission;

/// Keeps one creation record per quest: the one with the highest block timestamp.
/// Output is newest first.
pub(crate) fn dedupe_latest(records: Vec<QuestCreatedRecord>) -> Vec<QuestCreatedRecord> {
    let mut latest: HashMap<QuestId, QuestCreatedRecord> = HashMap::with_capacity(records.len());
    for record in records {
        match latest.get(&record.quest_id) {
            Some(kept) if kept.meta.block_timestamp >= record.meta.block_timestamp => {}
            _ => {
                latest.insert(record.quest_id, record);
            }
        }
    }

    let mut deduped: Vec<_> = latest.into_values().collect();
    sort_newest_first(&mut deduped);
    deduped
}

/// Quests created but neither completed nor cancelled, ordered by block
/// timestamp in `order`.
pub(crate) fn active_quests(
    created: Vec<QuestCreatedRecord>,
    completed: &HashSet<QuestId>,
    cancelled: &HashSet<QuestId>,
    order: OrderDirection,
) -> Vec<QuestCreatedRecord> {
    let mut active: Vec<_> = dedupe_latest(created)
        .into_iter()
        .filter(|record| {
            !completed.contains(&record.quest_id) && !cancelled.contains(&record.quest_id)
        })
        .collect();
    if order == OrderDirection::Asc {
        active.reverse();
    }
    active
}

/// Joins a photographer's submissions with their quests, dropping cancelled
/// and unknown quests. Newest submission first.
pub(crate) fn active_submissions(
    submissions: &[PhotoSubmittedRecord],
    quests: Vec<QuestCreatedRecord>,
    completed: &HashSet<QuestId>,
    cancelled: &HashSet<QuestId>,
) -> Vec<ActiveSubmission> {
    let quests: HashMap<QuestId, QuestCreatedRecord> = dedupe_latest(quests)
        .into_iter()
        .map(|record| (record.quest_id, record))
        .collect();

    let mut joined: Vec<ActiveSubmission> = submissions
        .iter()
        .filter(|submission| !cancelled.contains(&submission.quest_id))
        .filter_map(|submission| {
            quests.get(&submission.quest_id).map(|quest| {
                ActiveSubmission::join(
                    submission,
                    quest,
                    completed.contains(&submission.quest_id),
                )
            })
        })
        .collect();

    joined.sort_by(|a, b| b.block_timestamp.cmp(&a.block_timestamp));
    joined
}

/// Applies `skip`/`first` to an in-memory projection.
pub(crate) fn paginate<T>(items: Vec<T>, offset: u64, limit: Option<u64>) -> Vec<T> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    let iter = items.into_iter().skip(offset);
    match limit.and_then(|limit| usize::try_from(limit).ok()) {
        Some(limit) => iter.take(limit).collect(),
        None => iter.collect(),
    }
}

fn sort_newest_first(records: &mut [QuestCreatedRecord]) {
    records.sort_by(|a, b| {
        b.meta
            .block_timestamp
            .cmp(&a.meta.block_timestamp)
            .then_with(|| b.quest_id.cmp(&a.quest_id))
    });
}
