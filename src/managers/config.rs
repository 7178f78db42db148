use pq_blockchain::{BlockchainConfig, BlockchainConfigRaw};
use pq_repository::{RepositoryManagerConfig, RepositoryManagerConfigRaw};
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub(crate) struct ManagersConfigRaw {
    pub blockchain: BlockchainConfigRaw,
    pub repository: RepositoryManagerConfigRaw,
}

#[derive(Debug, Clone)]
pub(crate) struct ManagersConfig {
    pub blockchain: BlockchainConfig,
    pub repository: RepositoryManagerConfig,
}

impl ManagersConfigRaw {
    pub(crate) fn resolve(self) -> Result<ManagersConfig, ConfigError> {
        Ok(ManagersConfig {
            blockchain: self.blockchain.resolve()?,
            repository: self.repository.resolve()?,
        })
    }
}
