use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use dashmap::{DashMap, mapref::entry::Entry};
use pq_domain::QuestId;

use super::view::QuestView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    quest_id: QuestId,
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheWrite {
    Stored,
    /// A newer fetch for the same quest started after this one.
    Superseded,
    /// The cached view was built from newer indexed events, or from the same
    /// events with a status this one could not have come after.
    Older,
}

struct CachedView {
    view: Arc<QuestView>,
    stored_at: Instant,
}

/// Quest views keyed by quest id.
///
/// Every fetch takes a ticket first. A result whose ticket is older than the
/// newest ticket for its quest is dropped on arrival. A stored view is never
/// replaced by one with a lower `as_of` block timestamp, nor, at the same
/// `as_of`, by one whose status moves backwards.
pub(crate) struct QuestViewCache {
    entries: DashMap<QuestId, CachedView>,
    latest_ticket: DashMap<QuestId, u64>,
    generation: AtomicU64,
    ttl: Duration,
}

impl QuestViewCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            latest_ticket: DashMap::new(),
            generation: AtomicU64::new(0),
            ttl,
        }
    }

    /// A cached view younger than the TTL.
    pub(crate) fn fresh(&self, quest_id: QuestId) -> Option<Arc<QuestView>> {
        self.entries
            .get(&quest_id)
            .filter(|cached| cached.stored_at.elapsed() < self.ttl)
            .map(|cached| Arc::clone(&cached.view))
    }

    pub(crate) fn begin_fetch(&self, quest_id: QuestId) -> FetchTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest_ticket
            .entry(quest_id)
            .and_modify(|latest| *latest = (*latest).max(generation))
            .or_insert(generation);
        FetchTicket {
            quest_id,
            generation,
        }
    }

    pub(crate) fn complete_fetch(&self, ticket: FetchTicket, view: Arc<QuestView>) -> CacheWrite {
        // The entry guard is held while the ticket is checked so a newer fetch
        // cannot store in between.
        let entry = self.entries.entry(ticket.quest_id);
        let superseded = self
            .latest_ticket
            .get(&ticket.quest_id)
            .is_some_and(|latest| *latest > ticket.generation);
        if superseded {
            return CacheWrite::Superseded;
        }

        let cached = CachedView {
            view,
            stored_at: Instant::now(),
        };
        match entry {
            Entry::Occupied(mut occupied) => {
                if is_older(&occupied.get().view, &cached.view) {
                    return CacheWrite::Older;
                }
                occupied.insert(cached);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(cached);
            }
        }
        CacheWrite::Stored
    }
}

fn is_older(stored: &QuestView, incoming: &QuestView) -> bool {
    stored.as_of > incoming.as_of
        || (stored.as_of == incoming.as_of
            && !stored.display_status.can_reach(incoming.display_status))
}
