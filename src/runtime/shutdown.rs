use std::time::Duration;

use tokio::{sync::oneshot, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// Long enough for an in-flight indexer tick to persist its batch.
const PERIODIC_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(60);
const HTTP_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub(super) struct ShutdownContext {
    pub(super) periodic_shutdown: CancellationToken,
    pub(super) periodic_handle: JoinHandle<()>,
    pub(super) http_shutdown_tx: oneshot::Sender<()>,
    pub(super) handle_http_events_task: JoinHandle<()>,
}

/// Stops HTTP intake, cancels periodic tasks and waits for them, then waits
/// for in-flight HTTP requests.
pub(super) async fn graceful_shutdown(context: ShutdownContext) {
    let ShutdownContext {
        periodic_shutdown,
        mut periodic_handle,
        http_shutdown_tx,
        mut handle_http_events_task,
    } = context;

    tracing::info!("Shutting down gracefully...");

    let _ = http_shutdown_tx.send(());

    // The listener finishes its current tick before exiting.
    periodic_shutdown.cancel();
    wait_for_shutdown_task(
        "periodic_tasks",
        PERIODIC_SHUTDOWN_TIMEOUT,
        &mut periodic_handle,
        true,
    )
    .await;

    wait_for_shutdown_task(
        "http_server",
        HTTP_SHUTDOWN_TIMEOUT,
        &mut handle_http_events_task,
        false,
    )
    .await;

    tracing::info!("Shutdown complete");
}

async fn wait_for_shutdown_task(
    task: &str,
    timeout: Duration,
    handle: &mut JoinHandle<()>,
    abort_on_timeout: bool,
) {
    match tokio::time::timeout(timeout, &mut *handle).await {
        Ok(Ok(())) => tracing::debug!(task, "Task stopped"),
        Ok(Err(error)) => tracing::error!(task, error = ?error, "Shutdown task panicked"),
        Err(_) if abort_on_timeout => {
            tracing::warn!(
                task,
                timeout_secs = timeout.as_secs(),
                "Shutdown timeout reached, aborting task"
            );
            handle.abort();
            let _ = handle.await;
        }
        Err(_) => tracing::warn!(
            task,
            timeout_secs = timeout.as_secs(),
            "Shutdown timeout reached"
        ),
    }
}
