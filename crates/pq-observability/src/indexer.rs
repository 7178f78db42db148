use std::time::Duration;

use metrics::{counter, gauge, histogram};

/// One listener tick: how many logs were fetched and how many rows were new.
pub fn record_indexer_cycle(
    blockchain_id: &str,
    status: &str,
    duration: Duration,
    fetched_events: usize,
    inserted_events: usize,
) {
    counter!(
        "pq_indexer_cycles_total",
        "blockchain_id" => blockchain_id.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "pq_indexer_cycle_duration_seconds",
        "blockchain_id" => blockchain_id.to_string(),
        "status" => status.to_string()
    )
    .record(duration.as_secs_f64());
    histogram!(
        "pq_indexer_cycle_fetched_events",
        "blockchain_id" => blockchain_id.to_string()
    )
    .record(fetched_events as f64);
    histogram!(
        "pq_indexer_cycle_inserted_events",
        "blockchain_id" => blockchain_id.to_string()
    )
    .record(inserted_events as f64);
}

/// `outcome` is "inserted", "duplicate" or "error".
pub fn record_indexed_event(blockchain_id: &str, kind: &str, outcome: &str) {
    counter!(
        "pq_indexer_events_total",
        "blockchain_id" => blockchain_id.to_string(),
        "kind" => kind.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
}

pub fn record_indexer_lag(blockchain_id: &str, head_block: u64, cursor_block: u64) {
    gauge!(
        "pq_indexer_lag_blocks",
        "blockchain_id" => blockchain_id.to_string()
    )
    .set(head_block.saturating_sub(cursor_block) as f64);
}
