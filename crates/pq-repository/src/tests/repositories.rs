#![allow(clippy::unwrap_used)]

use chrono::Utc;
use pq_domain::{Address, B256, EventId, QuestId, U256};

use crate::{
    EventMeta, OrderDirection, Page, PhotoSubmittedRecord, PlatformFeeUpdatedRecord,
    QuestCancelledRecord, QuestCompletedRecord, QuestCreatedRecord, QuestFilter,
    RepositoryManager, RepositoryManagerConfig, SubmissionFilter, SubmissionsSelectedRecord,
};

async fn manager() -> RepositoryManager {
    RepositoryManager::connect(&RepositoryManagerConfig::in_memory())
        .await
        .unwrap()
}

fn meta(tx: u8, log_index: u64, block_timestamp: u64) -> EventMeta {
    let transaction_hash = B256::repeat_byte(tx);
    EventMeta {
        id: EventId::from_log(transaction_hash, log_index),
        block_number: u64::from(tx),
        block_timestamp,
        transaction_hash,
    }
}

fn quest_created(tx: u8, quest_id: u64, requester: Address, ts: u64) -> QuestCreatedRecord {
    QuestCreatedRecord {
        meta: meta(tx, 0, ts),
        quest_id: QuestId::new(quest_id),
        requester,
        title: format!("Quest {quest_id}"),
        category: 1,
        reward: U256::from(500_000_000_000_000_000u64),
        deadline: U256::from(ts + 86_400),
        max_submissions: U256::from(2u64),
    }
}

fn photo(tx: u8, log_index: u64, quest_id: u64, photographer: Address) -> PhotoSubmittedRecord {
    PhotoSubmittedRecord {
        meta: meta(tx, log_index, 1_000 + u64::from(tx)),
        quest_id: QuestId::new(quest_id),
        photographer,
        watermarked_photo_ipfs: format!("bafy-{tx}-{log_index}"),
        submission_index: U256::from(log_index),
        timestamp: U256::from(1_000 + u64::from(tx)),
    }
}

#[tokio::test]
async fn duplicate_event_is_stored_once() {
    let manager = manager().await;
    let repo = manager.quest_created_repository();
    let record = quest_created(1, 1, Address::repeat_byte(0xaa), 100);

    assert!(repo.insert(&record).await.unwrap());
    assert!(!repo.insert(&record).await.unwrap());
    assert_eq!(repo.count(&QuestFilter::default()).await.unwrap(), 1);

    let stored = repo.find_latest(QuestId::new(1)).await.unwrap().unwrap();
    assert_eq!(stored, record);
}

#[tokio::test]
async fn uint256_parameters_survive_storage() {
    let manager = manager().await;
    let repo = manager.quest_created_repository();
    let mut record = quest_created(1, 1, Address::repeat_byte(0xaa), 100);
    record.deadline = U256::MAX;
    record.max_submissions = U256::from(1u128 << 70);
    repo.insert(&record).await.unwrap();

    let stored = repo.find_latest(QuestId::new(1)).await.unwrap().unwrap();
    assert_eq!(stored.deadline, U256::MAX);
    assert_eq!(stored.max_submissions, U256::from(1u128 << 70));
}

#[tokio::test]
async fn distinct_quest_count_ignores_repeated_creations() {
    let manager = manager().await;
    let repo = manager.quest_created_repository();
    let requester = Address::repeat_byte(0xaa);
    repo.insert(&quest_created(1, 1, requester, 100)).await.unwrap();
    repo.insert(&quest_created(2, 1, requester, 150)).await.unwrap();
    repo.insert(&quest_created(3, 2, requester, 200)).await.unwrap();

    let filter = QuestFilter::default();
    assert_eq!(repo.count(&filter).await.unwrap(), 3);
    assert_eq!(repo.count_distinct_quests(&filter).await.unwrap(), 2);
    assert_eq!(
        repo.count_distinct_quests(&QuestFilter::requester(Address::repeat_byte(0xbb)))
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn lists_newest_first_with_pagination() {
    let manager = manager().await;
    let repo = manager.quest_created_repository();
    let requester = Address::repeat_byte(0xaa);
    for (tx, ts) in [(1u8, 100u64), (2, 300), (3, 200)] {
        repo.insert(&quest_created(tx, u64::from(tx), requester, ts))
            .await
            .unwrap();
    }

    let newest = repo
        .find(&QuestFilter::default(), Page::new(Some(2), None, None))
        .await
        .unwrap();
    let ids: Vec<u64> = newest.iter().map(|record| record.quest_id.get()).collect();
    assert_eq!(ids, vec![2, 3]);

    let skipped = repo
        .find(&QuestFilter::default(), Page::new(Some(2), Some(2), None))
        .await
        .unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].quest_id, QuestId::new(1));

    let oldest = repo
        .find(
            &QuestFilter::default(),
            Page::new(Some(1), None, Some(OrderDirection::Asc)),
        )
        .await
        .unwrap();
    assert_eq!(oldest[0].quest_id, QuestId::new(1));
}

#[tokio::test]
async fn requester_filter_ignores_address_case() {
    let manager = manager().await;
    let repo = manager.quest_created_repository();
    let requester: Address = "0xABCDEF0000000000000000000000000000000001".parse().unwrap();
    repo.insert(&quest_created(1, 1, requester, 100)).await.unwrap();
    repo.insert(&quest_created(2, 2, Address::repeat_byte(0x01), 100))
        .await
        .unwrap();

    let lowercase: Address = "0xabcdef0000000000000000000000000000000001".parse().unwrap();
    let found = repo
        .find(&QuestFilter::requester(lowercase), Page::default())
        .await
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].requester, requester);
}

#[tokio::test]
async fn two_events_in_one_transaction_are_both_kept() {
    let manager = manager().await;
    let repo = manager.photo_submitted_repository();
    let photographer = Address::repeat_byte(0x0b);

    assert!(repo.insert(&photo(7, 0, 1, photographer)).await.unwrap());
    assert!(
        repo.insert(&photo(7, 1, 2, Address::repeat_byte(0x0c)))
            .await
            .unwrap()
    );

    assert!(repo.exists(QuestId::new(1), photographer).await.unwrap());
    assert!(!repo.exists(QuestId::new(2), photographer).await.unwrap());

    let by_quests = repo
        .find(
            &SubmissionFilter {
                quest_ids: Some(vec![QuestId::new(1), QuestId::new(2)]),
                photographer: None,
            },
            Page::default(),
        )
        .await
        .unwrap();
    assert_eq!(by_quests.len(), 2);
}

#[tokio::test]
async fn selection_keeps_photographer_order() {
    let manager = manager().await;
    let repo = manager.submissions_selected_repository();
    let record = SubmissionsSelectedRecord {
        meta: meta(9, 3, 500),
        quest_id: QuestId::new(4),
        requester: Address::repeat_byte(0xaa),
        selected_photographers: vec![Address::repeat_byte(2), Address::repeat_byte(1)],
        reward_per_winner: U256::from(250u64),
        timestamp: U256::from(500u64),
    };
    repo.insert(&record).await.unwrap();

    let found = repo
        .find(&QuestFilter::quest(QuestId::new(4)), Page::default())
        .await
        .unwrap();
    assert_eq!(found, vec![record]);
}

#[tokio::test]
async fn terminal_events_are_counted_per_table() {
    let manager = manager().await;
    let requester = Address::repeat_byte(0xaa);
    manager
        .quest_completed_repository()
        .insert(&QuestCompletedRecord {
            meta: meta(10, 0, 600),
            quest_id: QuestId::new(1),
            requester,
            total_selected_submissions: U256::from(2u64),
            total_reward_distributed: U256::from(975u64),
            platform_fee: U256::from(25u64),
        })
        .await
        .unwrap();
    manager
        .quest_cancelled_repository()
        .insert(&QuestCancelledRecord {
            meta: meta(11, 0, 700),
            quest_id: QuestId::new(2),
            requester,
            refund_amount: U256::from(1_000u64),
        })
        .await
        .unwrap();

    let filter = QuestFilter::requester(requester);
    assert_eq!(
        manager.quest_completed_repository().count(&filter).await.unwrap(),
        1
    );
    assert_eq!(
        manager.quest_cancelled_repository().count(&filter).await.unwrap(),
        1
    );
    let cancelled = manager
        .quest_cancelled_repository()
        .find(&QuestFilter::default(), Page::unbounded())
        .await
        .unwrap();
    assert_eq!(cancelled[0].refund_amount, U256::from(1_000u64));
}

#[tokio::test]
async fn latest_platform_fee_wins() {
    let manager = manager().await;
    let repo = manager.platform_fee_repository();
    assert!(repo.latest().await.unwrap().is_none());

    for (tx, ts, new_fee) in [(20u8, 100u64, 300u64), (21, 200, 200)] {
        repo.insert(&PlatformFeeUpdatedRecord {
            meta: meta(tx, 0, ts),
            old_fee: U256::from(250u64),
            new_fee: U256::from(new_fee),
        })
        .await
        .unwrap();
    }

    assert_eq!(repo.latest().await.unwrap().unwrap().new_fee, U256::from(200u64));
}

#[tokio::test]
async fn cursor_upserts_per_contract() {
    let manager = manager().await;
    let repo = manager.blockchain_repository();
    let contract = "0x0000000000000000000000000000000000000042";

    assert_eq!(
        repo.get_last_checked_block("hardhat:31337", contract)
            .await
            .unwrap(),
        None
    );

    repo.update_last_checked_block("hardhat:31337", contract, 10, Utc::now())
        .await
        .unwrap();
    repo.update_last_checked_block("hardhat:31337", contract, 25, Utc::now())
        .await
        .unwrap();

    assert_eq!(
        repo.get_last_checked_block("hardhat:31337", contract)
            .await
            .unwrap(),
        Some(25)
    );
    assert!(manager.ping().await.is_ok());
}
