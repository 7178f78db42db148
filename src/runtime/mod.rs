mod runner;
mod shutdown;

use crate::{http_api::HttpApiRouter, indexer::IndexerConfig, managers::Managers};

pub(crate) struct RuntimeDeps {
    pub(crate) managers: Managers,
    pub(crate) indexer: IndexerConfig,
    pub(crate) http_router: Option<HttpApiRouter>,
}

pub(crate) use runner::run;
