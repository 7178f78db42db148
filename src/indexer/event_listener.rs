use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use pq_blockchain::{Address, BlockchainError, BlockchainId, ContractLog, EvmChain};
use pq_observability as observability;
use pq_repository::{BlockchainRepository, RepositoryManager};
use tokio_util::sync::CancellationToken;

use super::{IndexerConfig, mapper::map_contract_log, writer::IndexedEventWriter};
use crate::{error::NodeError, periodic::run_with_shutdown};

/// Key of the listener's cursor row for `contract`: lowercase `0x` hex.
pub(crate) fn cursor_key(contract: Address) -> String {
    format!("{contract:#x}")
}

/// Where the listener reads positioned contract events from.
#[async_trait]
pub(crate) trait EventSource: Send + Sync {
    fn blockchain_id(&self) -> &BlockchainId;

    fn contract_address(&self) -> Address;

    async fn head_block(&self) -> Result<u64, BlockchainError>;

    /// Decoded logs in `[from_block, to_block]`, ordered by block, transaction and log index.
    async fn contract_logs(
        &self,
        from_block: u64,
        to_block: u64,
        batch_size: u64,
    ) -> Result<Vec<ContractLog>, BlockchainError>;
}

#[async_trait]
impl EventSource for EvmChain {
    fn blockchain_id(&self) -> &BlockchainId {
        EvmChain::blockchain_id(self)
    }

    fn contract_address(&self) -> Address {
        EvmChain::contract_address(self)
    }

    async fn head_block(&self) -> Result<u64, BlockchainError> {
        self.get_block_number().await
    }

    async fn contract_logs(
        &self,
        from_block: u64,
        to_block: u64,
        batch_size: u64,
    ) -> Result<Vec<ContractLog>, BlockchainError> {
        self.get_contract_logs(from_block, to_block, batch_size)
            .await
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct SyncStats {
    pub fetched_events: usize,
    pub inserted_events: usize,
    pub duplicate_events: usize,
    /// Cursor position after the tick, when it moved.
    pub synced_to: Option<u64>,
    pub skipped_range: bool,
}

pub(crate) struct EventListenerTask {
    source: Arc<dyn EventSource>,
    writer: IndexedEventWriter,
    blockchain_repository: BlockchainRepository,
    config: IndexerConfig,
    start_block: u64,
    skip_long_gaps: bool,
}

impl EventListenerTask {
    pub(crate) fn new(
        source: Arc<dyn EventSource>,
        repository_manager: &RepositoryManager,
        config: IndexerConfig,
        start_block: u64,
        skip_long_gaps: bool,
    ) -> Self {
        Self {
            source,
            writer: IndexedEventWriter::new(repository_manager),
            blockchain_repository: repository_manager.blockchain_repository(),
            config,
            start_block,
            skip_long_gaps,
        }
    }

    pub(crate) async fn run(self, shutdown: CancellationToken) {
        run_with_shutdown("quest_event_listener", shutdown, || self.execute()).await;
    }

    #[tracing::instrument(
        name = "periodic.quest_event_listener",
        skip(self),
        fields(blockchain_id = %self.source.blockchain_id())
    )]
    async fn execute(&self) -> Duration {
        let started = Instant::now();
        let blockchain_id = self.source.blockchain_id().as_str();

        match self.sync_once().await {
            Ok(stats) => {
                observability::record_indexer_cycle(
                    blockchain_id,
                    "ok",
                    started.elapsed(),
                    stats.fetched_events,
                    stats.inserted_events,
                );
                if stats.fetched_events > 0 {
                    tracing::debug!(
                        fetched = stats.fetched_events,
                        inserted = stats.inserted_events,
                        duplicates = stats.duplicate_events,
                        synced_to = ?stats.synced_to,
                        "Indexed quest events"
                    );
                }
            }
            Err(error) => {
                observability::record_indexer_cycle(blockchain_id, "error", started.elapsed(), 0, 0);
                tracing::error!(error = %error, "Error fetching/indexing quest events");
            }
        }

        self.config.poll_interval()
    }

    /// One listener tick. The cursor only moves once every event in the range
    /// has been written, so a failed tick (including an event that cannot be
    /// mapped) is retried from the same block.
    pub(crate) async fn sync_once(&self) -> Result<SyncStats, NodeError> {
        let mut stats = SyncStats::default();
        let blockchain_id = self.source.blockchain_id().as_str();
        let contract = cursor_key(self.source.contract_address());

        let head = self
            .source
            .head_block()
            .await?
            .saturating_sub(self.config.confirmations);

        let cursor = self
            .blockchain_repository
            .get_last_checked_block(blockchain_id, &contract)
            .await?;
        let from_block = match cursor {
            Some(last_checked) => last_checked + 1,
            None => self.start_block,
        };

        if from_block > head {
            observability::record_indexer_lag(blockchain_id, head, cursor.unwrap_or(head));
            return Ok(stats);
        }

        if let Some(last_checked) = cursor {
            let blocks_behind = head - last_checked;
            if self.skip_long_gaps && blocks_behind > self.config.max_blocks_to_sync {
                tracing::warn!(
                    contract = %contract,
                    blocks_behind,
                    max_blocks = self.config.max_blocks_to_sync,
                    "Extended downtime detected; skipping missed events"
                );
                self.advance_cursor(blockchain_id, &contract, head).await?;
                stats.skipped_range = true;
                stats.synced_to = Some(head);
                observability::record_indexer_lag(blockchain_id, head, head);
                return Ok(stats);
            }
        }

        let to_block = head.min(from_block.saturating_add(self.config.max_blocks_to_sync - 1));
        let mut logs = self
            .source
            .contract_logs(from_block, to_block, self.config.log_batch_size)
            .await?;
        logs.sort_by_key(|log| log.meta.position());
        stats.fetched_events = logs.len();

        for log in &logs {
            let record = match map_contract_log(log) {
                Ok(record) => record,
                Err(error) => {
                    tracing::error!(
                        transaction_hash = %log.meta.transaction_hash,
                        log_index = log.meta.log_index,
                        error = %error,
                        "Event cannot be stored; holding cursor"
                    );
                    observability::record_indexed_event(blockchain_id, log.event.kind(), "invalid");
                    return Err(error.into());
                }
            };

            let inserted = match self.writer.write(&record).await {
                Ok(inserted) => inserted,
                Err(error) => {
                    observability::record_indexed_event(blockchain_id, record.kind(), "error");
                    return Err(error.into());
                }
            };

            let outcome = if inserted { "inserted" } else { "duplicate" };
            observability::record_indexed_event(blockchain_id, record.kind(), outcome);
            if inserted {
                stats.inserted_events += 1;
            } else {
                stats.duplicate_events += 1;
            }
            tracing::trace!(
                id = %record.meta().id,
                kind = record.kind(),
                block_number = record.meta().block_number,
                outcome,
                "Processed event"
            );
        }

        self.advance_cursor(blockchain_id, &contract, to_block)
            .await?;
        stats.synced_to = Some(to_block);
        observability::record_indexer_lag(blockchain_id, head, to_block);

        Ok(stats)
    }

    async fn advance_cursor(
        &self,
        blockchain_id: &str,
        contract: &str,
        block: u64,
    ) -> Result<(), NodeError> {
        self.blockchain_repository
            .update_last_checked_block(blockchain_id, contract, block, chrono::Utc::now())
            .await?;
        Ok(())
    }
}
