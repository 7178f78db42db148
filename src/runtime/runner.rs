use tokio::{select, signal::unix::SignalKind, sync::oneshot};
use tokio_util::sync::CancellationToken;

use super::{RuntimeDeps, shutdown};
use crate::periodic;

/// Spawns the HTTP server and the periodic tasks, then blocks until SIGINT or SIGTERM.
pub(crate) async fn run(deps: RuntimeDeps) {
    let RuntimeDeps {
        managers,
        indexer,
        http_router,
    } = deps;

    let (http_shutdown_tx, http_shutdown_rx) = oneshot::channel::<()>();

    let periodic_shutdown = CancellationToken::new();
    let periodic_handle = tokio::task::spawn({
        let shutdown = periodic_shutdown.clone();
        async move { periodic::run(&managers, indexer, shutdown).await }
    });

    let handle_http_events_task = tokio::task::spawn(async move {
        match http_router {
            Some(router) => {
                if let Err(error) = router.listen_and_handle_http_requests(http_shutdown_rx).await {
                    tracing::error!(error = %error, "HTTP API stopped with an error");
                }
            }
            // Disabled: park until shutdown so the ordering below still holds.
            None => {
                let _ = http_shutdown_rx.await;
            }
        }
    });

    let ctrl_c = tokio::signal::ctrl_c();
    let mut sigterm = tokio::signal::unix::signal(SignalKind::terminate())
        .expect("Failed to install SIGTERM handler");

    select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, initiating shutdown..."),
        _ = sigterm.recv() => tracing::info!("Received SIGTERM, initiating shutdown..."),
    }

    shutdown::graceful_shutdown(shutdown::ShutdownContext {
        periodic_shutdown,
        periodic_handle,
        http_shutdown_tx,
        handle_http_events_task,
    })
    .await;
}
