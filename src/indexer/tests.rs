use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use pq_blockchain::{
    Address, B256, BlockchainError, BlockchainId, ContractEvent, ContractLog, LogMeta, PhotoQuest,
    U256,
};
use pq_domain::QuestId;
use pq_repository::{Page, QuestFilter, RepositoryManager, RepositoryManagerConfig};

use super::{EventListenerTask, EventSource, IndexerConfig};
use crate::error::NodeError;

fn contract() -> Address {
    Address::repeat_byte(0x42)
}

fn contract_key() -> String {
    format!("{:#x}", contract())
}

struct FakeSource {
    blockchain_id: BlockchainId,
    head: Mutex<u64>,
    logs: Vec<ContractLog>,
    fail_logs: bool,
    requested_ranges: Mutex<Vec<(u64, u64)>>,
}

impl FakeSource {
    fn new(head: u64, logs: Vec<ContractLog>) -> Self {
        Self {
            blockchain_id: BlockchainId::from("hardhat:31337"),
            head: Mutex::new(head),
            logs,
            fail_logs: false,
            requested_ranges: Mutex::new(Vec::new()),
        }
    }

    fn ranges(&self) -> Vec<(u64, u64)> {
        self.requested_ranges.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventSource for FakeSource {
    fn blockchain_id(&self) -> &BlockchainId {
        &self.blockchain_id
    }

    fn contract_address(&self) -> Address {
        contract()
    }

    async fn head_block(&self) -> Result<u64, BlockchainError> {
        Ok(*self.head.lock().unwrap())
    }

    async fn contract_logs(
        &self,
        from_block: u64,
        to_block: u64,
        _batch_size: u64,
    ) -> Result<Vec<ContractLog>, BlockchainError> {
        self.requested_ranges
            .lock()
            .unwrap()
            .push((from_block, to_block));
        if self.fail_logs {
            return Err(BlockchainError::Unavailable {
                operation: "get_logs".to_string(),
                reason: "connection refused".to_string(),
            });
        }
        Ok(self
            .logs
            .iter()
            .filter(|log| (from_block..=to_block).contains(&log.meta.block_number))
            .cloned()
            .collect())
    }
}

fn config() -> IndexerConfig {
    IndexerConfig {
        enabled: true,
        poll_interval_ms: 1_000,
        confirmations: 2,
        max_blocks_to_sync: 1_000,
        log_batch_size: 50,
    }
}

fn log_at(event: ContractEvent, block_number: u64, tx: u8, log_index: u64) -> ContractLog {
    ContractLog {
        event,
        meta: LogMeta {
            contract_address: contract(),
            transaction_hash: B256::repeat_byte(tx),
            transaction_index: 0,
            log_index,
            block_number,
            block_timestamp: Some(1_700_000_000 + block_number),
        },
    }
}

fn quest_created(quest_id: u64) -> ContractEvent {
    ContractEvent::QuestCreated(PhotoQuest::QuestCreated {
        questId: U256::from(quest_id),
        requester: Address::repeat_byte(0xaa),
        title: format!("Quest {quest_id}"),
        category: 0,
        reward: U256::from(1_000),
        deadline: U256::from(1_900_000_000u64),
        maxSubmissions: U256::from(2),
    })
}

fn quest_completed(quest_id: u64) -> ContractEvent {
    ContractEvent::QuestCompleted(PhotoQuest::QuestCompleted {
        questId: U256::from(quest_id),
        requester: Address::repeat_byte(0xaa),
        totalSelectedSubmissions: U256::from(1),
        totalRewardDistributed: U256::from(975),
        platformFee: U256::from(25),
    })
}

async fn repository() -> RepositoryManager {
    RepositoryManager::connect(&RepositoryManagerConfig::in_memory())
        .await
        .expect("in-memory store")
}

fn listener(
    source: Arc<FakeSource>,
    repository: &RepositoryManager,
    config: IndexerConfig,
    skip_long_gaps: bool,
) -> EventListenerTask {
    EventListenerTask::new(source, repository, config, 100, skip_long_gaps)
}

async fn cursor(repository: &RepositoryManager) -> Option<u64> {
    repository
        .blockchain_repository()
        .get_last_checked_block("hardhat:31337", &contract_key())
        .await
        .unwrap()
}

#[tokio::test]
async fn indexes_range_and_advances_cursor_behind_head() {
    let repository = repository().await;
    let source = Arc::new(FakeSource::new(
        110,
        vec![
            log_at(quest_created(1), 101, 1, 0),
            log_at(quest_completed(1), 105, 2, 0),
            log_at(quest_created(2), 109, 3, 0),
        ],
    ));
    let task = listener(Arc::clone(&source), &repository, config(), true);

    let stats = task.sync_once().await.unwrap();

    assert_eq!(source.ranges(), vec![(100, 108)]);
    assert_eq!(stats.fetched_events, 2);
    assert_eq!(stats.inserted_events, 2);
    assert_eq!(stats.synced_to, Some(108));
    assert_eq!(cursor(&repository).await, Some(108));

    let completed = repository
        .quest_completed_repository()
        .find(&QuestFilter::quest(QuestId::new(1)), Page::default())
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].meta.block_timestamp, 1_700_000_105);
}

#[tokio::test]
async fn replayed_range_stores_each_event_once() {
    let repository = repository().await;
    let source = Arc::new(FakeSource::new(
        120,
        vec![
            log_at(quest_created(1), 101, 1, 0),
            log_at(quest_created(2), 102, 1, 1),
        ],
    ));
    let task = listener(source, &repository, config(), true);
    task.sync_once().await.unwrap();

    repository
        .blockchain_repository()
        .update_last_checked_block(
            "hardhat:31337",
            &contract_key(),
            99,
            chrono::Utc::now(),
        )
        .await
        .unwrap();
    let replay = task.sync_once().await.unwrap();

    assert_eq!(replay.inserted_events, 0);
    assert_eq!(replay.duplicate_events, 2);
    let count = repository
        .quest_created_repository()
        .count(&QuestFilter::default())
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn failed_fetch_leaves_cursor_in_place() {
    let repository = repository().await;
    let mut source = FakeSource::new(150, vec![log_at(quest_created(1), 101, 1, 0)]);
    source.fail_logs = true;
    let task = listener(Arc::new(source), &repository, config(), true);

    let error = task.sync_once().await.unwrap_err();

    assert!(matches!(
        error,
        NodeError::Blockchain(BlockchainError::Unavailable { .. })
    ));
    assert_eq!(cursor(&repository).await, None);
}

#[tokio::test]
async fn nothing_is_fetched_within_confirmation_depth() {
    let repository = repository().await;
    let source = Arc::new(FakeSource::new(101, Vec::new()));
    let task = listener(Arc::clone(&source), &repository, config(), true);

    let stats = task.sync_once().await.unwrap();

    assert!(source.ranges().is_empty());
    assert_eq!(stats.synced_to, None);
}

#[tokio::test]
async fn long_gap_after_downtime_is_skipped_outside_development() {
    let repository = repository().await;
    repository
        .blockchain_repository()
        .update_last_checked_block(
            "hardhat:31337",
            &contract_key(),
            200,
            chrono::Utc::now(),
        )
        .await
        .unwrap();
    let source = Arc::new(FakeSource::new(5_002, Vec::new()));
    let task = listener(Arc::clone(&source), &repository, config(), true);

    let stats = task.sync_once().await.unwrap();

    assert!(stats.skipped_range);
    assert!(source.ranges().is_empty());
    assert_eq!(cursor(&repository).await, Some(5_000));
}

#[tokio::test]
async fn development_catches_up_in_bounded_steps() {
    let repository = repository().await;
    repository
        .blockchain_repository()
        .update_last_checked_block(
            "hardhat:31337",
            &contract_key(),
            200,
            chrono::Utc::now(),
        )
        .await
        .unwrap();
    let source = Arc::new(FakeSource::new(5_002, Vec::new()));
    let task = listener(Arc::clone(&source), &repository, config(), false);

    task.sync_once().await.unwrap();
    task.sync_once().await.unwrap();

    assert_eq!(source.ranges(), vec![(201, 1_200), (1_201, 2_200)]);
    assert_eq!(cursor(&repository).await, Some(2_200));
}

#[tokio::test]
async fn far_future_deadline_is_indexed() {
    let repository = repository().await;
    let created = ContractEvent::QuestCreated(PhotoQuest::QuestCreated {
        questId: U256::from(5),
        requester: Address::repeat_byte(0xaa),
        title: "Eclipse".to_string(),
        category: 0,
        reward: U256::from(1_000),
        deadline: U256::MAX,
        maxSubmissions: U256::from(2),
    });
    let source = Arc::new(FakeSource::new(110, vec![log_at(created, 101, 1, 0)]));
    let task = listener(source, &repository, config(), true);

    let stats = task.sync_once().await.unwrap();

    assert_eq!(stats.inserted_events, 1);
    let stored = repository
        .quest_created_repository()
        .find_latest(QuestId::new(5))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.deadline, U256::MAX);
}

#[tokio::test]
async fn unmappable_event_holds_cursor() {
    let repository = repository().await;
    let cancelled = ContractEvent::QuestCancelled(PhotoQuest::QuestCancelled {
        questId: U256::MAX,
        requester: Address::repeat_byte(0xaa),
        refundAmount: U256::from(1_000),
    });
    let source = Arc::new(FakeSource::new(
        110,
        vec![
            log_at(quest_created(1), 101, 1, 0),
            log_at(cancelled, 103, 2, 0),
        ],
    ));
    let task = listener(source, &repository, config(), true);

    let error = task.sync_once().await.unwrap_err();

    assert!(matches!(error, NodeError::Mapping(_)));
    assert_eq!(cursor(&repository).await, None);
    let count = repository
        .quest_created_repository()
        .count(&QuestFilter::default())
        .await
        .unwrap();
    assert_eq!(count, 1);
}
