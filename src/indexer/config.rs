use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Event listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct IndexerConfig {
    pub enabled: bool,
    pub poll_interval_ms: u64,
    /// Blocks to stay behind the chain head.
    pub confirmations: u64,
    /// Outside development, a resumed listener further behind than this skips
    /// ahead to the head. A fresh store catches up this many blocks per tick.
    pub max_blocks_to_sync: u64,
    /// Blocks per `eth_getLogs` request.
    pub log_batch_size: u64,
}

impl IndexerConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidConfig(
                "indexer.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_blocks_to_sync == 0 {
            return Err(ConfigError::InvalidConfig(
                "indexer.max_blocks_to_sync must be greater than zero".to_string(),
            ));
        }
        if self.log_batch_size == 0 {
            return Err(ConfigError::InvalidConfig(
                "indexer.log_batch_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
