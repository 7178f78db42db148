use std::time::Duration;

use metrics::{counter, histogram};

/// `outcome` is e.g. "submitted", "rejected", "invalid".
pub fn record_workflow_outcome(workflow: &str, outcome: &str, duration: Duration) {
    counter!(
        "pq_workflow_total",
        "workflow" => workflow.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    histogram!(
        "pq_workflow_duration_seconds",
        "workflow" => workflow.to_string(),
        "outcome" => outcome.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_read_model_view(view: &str, state: &str) {
    counter!(
        "pq_read_model_views_total",
        "view" => view.to_string(),
        "state" => state.to_string()
    )
    .increment(1);
}
