use std::sync::Arc;

use async_trait::async_trait;
use pq_blockchain::{BlockchainError, EvmChain};
use pq_domain::{Address, BlockchainId};
use pq_pinning::FileStore;
use pq_repository::RepositoryManager;

use crate::{managers::Managers, read_model::QuestReadModel};

/// What the status page needs to know about the chain being indexed.
#[async_trait]
pub(crate) trait ChainHead: Send + Sync {
    fn blockchain_id(&self) -> &BlockchainId;

    fn contract_address(&self) -> Address;

    async fn head_block(&self) -> Result<u64, BlockchainError>;
}

#[async_trait]
impl ChainHead for EvmChain {
    fn blockchain_id(&self) -> &BlockchainId {
        EvmChain::blockchain_id(self)
    }

    fn contract_address(&self) -> Address {
        EvmChain::contract_address(self)
    }

    async fn head_block(&self) -> Result<u64, BlockchainError> {
        self.get_block_number().await
    }
}

/// Shared state handed to the HTTP controllers.
pub(crate) struct Context {
    repository: Arc<RepositoryManager>,
    chain: Arc<dyn ChainHead>,
    file_store: Arc<dyn FileStore>,
    read_model: Arc<QuestReadModel>,
}

impl Context {
    pub(crate) fn new(
        repository: Arc<RepositoryManager>,
        chain: Arc<dyn ChainHead>,
        file_store: Arc<dyn FileStore>,
        read_model: Arc<QuestReadModel>,
    ) -> Self {
        Self {
            repository,
            chain,
            file_store,
            read_model,
        }
    }

    pub(crate) fn from_managers(managers: &Managers, read_model: Arc<QuestReadModel>) -> Self {
        Self::new(
            Arc::clone(&managers.repository),
            managers.chain.clone(),
            managers.pinning.clone(),
            read_model,
        )
    }

    pub(crate) fn repository_manager(&self) -> &Arc<RepositoryManager> {
        &self.repository
    }

    pub(crate) fn chain(&self) -> &dyn ChainHead {
        self.chain.as_ref()
    }

    pub(crate) fn file_store(&self) -> &dyn FileStore {
        self.file_store.as_ref()
    }

    pub(crate) fn read_model(&self) -> &QuestReadModel {
        &self.read_model
    }
}
