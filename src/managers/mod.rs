mod config;

use std::sync::Arc;

pub(crate) use config::{ManagersConfig, ManagersConfigRaw};
use pq_blockchain::EvmChain;
use pq_pinning::{PinataClient, PinningConfig};
use pq_repository::RepositoryManager;

/// Container for all initialized managers.
#[derive(Clone)]
pub(crate) struct Managers {
    pub repository: Arc<RepositoryManager>,
    pub chain: Arc<EvmChain>,
    pub pinning: Arc<PinataClient>,
}

/// Connects the store (running migrations), the chain client and the pinning client.
pub(crate) async fn initialize(config: &ManagersConfig, pinning: &PinningConfig) -> Managers {
    let repository = Arc::new(
        RepositoryManager::connect(&config.repository)
            .await
            .expect("Failed to initialize repository manager"),
    );

    let chain = Arc::new(
        EvmChain::connect(config.blockchain.clone())
            .await
            .expect("Failed to initialize blockchain client"),
    );

    let pinning = Arc::new(
        PinataClient::new(pinning.clone()).expect("Failed to initialize pinning client"),
    );

    Managers {
        repository,
        chain,
        pinning,
    }
}
