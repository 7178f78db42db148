//! Photo Quest node: indexes the quest contract, serves reconciled quest
//! views over HTTP, and drives the photographer and requester workflows.

mod bootstrap;
mod config;
mod context;
mod error;
mod http_api;
mod indexer;
mod logger;
mod managers;
mod periodic;
pub mod read_model;
mod runtime;
pub mod workflows;

#[cfg(test)]
mod test_support;

pub async fn run() {
    // Install rustls crypto provider before any TLS connections
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    dotenvy::dotenv().ok();

    let bootstrap::CoreBootstrap {
        config,
        managers,
        context,
    } = bootstrap::build_core().await;

    display_banner(&config.environment);

    let http_router = bootstrap::build_http_router(&config, &context);

    runtime::run(runtime::RuntimeDeps {
        managers,
        indexer: config.indexer.clone(),
        http_router,
    })
    .await;
}

fn display_banner(environment: &str) {
    tracing::info!("======================================================");
    tracing::info!("             Photo Quest Node v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("======================================================");
    tracing::info!("Node is running in {} environment", environment);
}
