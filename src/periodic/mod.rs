//! Background tasks driven by a shared cancellation token.

mod runner;

use std::sync::Arc;

pub(crate) use runner::run_with_shutdown;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::{
    config,
    indexer::{EventListenerTask, EventSource, IndexerConfig},
    managers::Managers,
};

/// Spawns every enabled periodic task and waits for all of them to stop.
pub(crate) async fn run(managers: &Managers, indexer: IndexerConfig, shutdown: CancellationToken) {
    let mut tasks = JoinSet::new();

    if indexer.enabled {
        let chain = Arc::clone(&managers.chain);
        let start_block = chain.config().start_block();
        let source: Arc<dyn EventSource> = chain;
        let listener = EventListenerTask::new(
            source,
            &managers.repository,
            indexer,
            start_block,
            !config::is_dev_env(),
        );
        tasks.spawn(listener.run(shutdown.clone()));
    } else {
        tracing::info!("Quest event listener disabled");
    }

    while let Some(result) = tasks.join_next().await {
        if let Err(error) = result {
            tracing::error!(error = %error, "Periodic task panicked");
        }
    }
}
