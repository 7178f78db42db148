use std::time::Instant;

use pq_observability::record_repository_query;

use crate::error::Result;

/// Records the outcome of a repository call and hands the result back.
pub(crate) fn observe<T>(
    repository: &str,
    method: &str,
    started: Instant,
    result: Result<T>,
    rows: impl FnOnce(&T) -> usize,
) -> Result<T> {
    match &result {
        Ok(value) => record_repository_query(
            repository,
            method,
            "ok",
            started.elapsed(),
            Some(rows(value)),
        ),
        Err(error) => {
            tracing::debug!(repository, method, error = %error, "Repository query failed");
            record_repository_query(repository, method, "error", started.elapsed(), None);
        }
    }
    result
}
