//! Read-only JSON API over the indexed store and the reconciled quest views.

mod config;
mod http_api_router;
mod v1;

#[cfg(test)]
mod tests;

pub(crate) use config::HttpApiConfig;
pub(crate) use http_api_router::HttpApiRouter;
