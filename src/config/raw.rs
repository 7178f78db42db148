use pq_pinning::{PinningConfig, PinningConfigRaw};
use serde::{Deserialize, Serialize};

use crate::{
    config::ConfigError,
    http_api::HttpApiConfig,
    indexer::IndexerConfig,
    logger::{LoggerConfig, TelemetryConfig},
    managers::{ManagersConfig, ManagersConfigRaw},
};

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConfigRaw {
    pub environment: String,
    pub managers: ManagersConfigRaw,
    pub pinning: PinningConfigRaw,
    pub indexer: IndexerConfig,
    pub http_api: HttpApiConfig,
    pub logger: LoggerConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub environment: String,
    pub managers: ManagersConfig,
    pub pinning: PinningConfig,
    pub indexer: IndexerConfig,
    pub http_api: HttpApiConfig,
    pub logger: LoggerConfig,
    pub telemetry: TelemetryConfig,
}

impl ConfigRaw {
    pub(crate) fn resolve(self) -> Result<Config, ConfigError> {
        self.indexer.validate()?;

        Ok(Config {
            environment: self.environment,
            managers: self.managers.resolve()?,
            pinning: self.pinning.resolve()?,
            indexer: self.indexer,
            http_api: self.http_api,
            logger: self.logger,
            telemetry: self.telemetry,
        })
    }
}
