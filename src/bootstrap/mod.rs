use std::sync::Arc;

use crate::{
    config::{self, Config},
    context::Context,
    http_api::HttpApiRouter,
    managers::{self, Managers},
    read_model::QuestReadModel,
};

pub(crate) struct CoreBootstrap {
    pub(crate) config: Arc<Config>,
    pub(crate) managers: Managers,
    pub(crate) context: Arc<Context>,
}

/// Loads configuration, installs logging, then connects every manager.
pub(crate) async fn build_core() -> CoreBootstrap {
    let config = Arc::new(config::initialize_configuration());
    crate::logger::initialize(&config.logger, &config.telemetry);

    let managers = managers::initialize(&config.managers, &config.pinning).await;
    let read_model = Arc::new(QuestReadModel::new(
        managers.chain.clone(),
        &managers.repository,
    ));
    let context = Arc::new(Context::from_managers(&managers, read_model));

    CoreBootstrap {
        config,
        managers,
        context,
    }
}

pub(crate) fn build_http_router(config: &Config, context: &Arc<Context>) -> Option<HttpApiRouter> {
    if config.http_api.enabled {
        Some(HttpApiRouter::new(&config.http_api, context))
    } else {
        tracing::info!("HTTP API disabled");
        None
    }
}
