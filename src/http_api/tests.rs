use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use pq_blockchain::BlockchainError;
use pq_domain::{
    Address, B256, BlockchainId, Category, EventId, Quest, QuestId, QuestStatus, U256,
};
use pq_repository::{EventMeta, PhotoSubmittedRecord, QuestCreatedRecord, RepositoryManager};
use serde_json::Value;
use tower::ServiceExt;

use super::http_api_router::routes;
use crate::{
    context::{ChainHead, Context},
    indexer::cursor_key,
    read_model::QuestReadModel,
    test_support::{ETHER, FakeFileStore, FakeQuestContract, in_memory_repository},
};

const NOW: u64 = 1_800_000_000;

struct FakeChainHead {
    blockchain_id: BlockchainId,
    head: Option<u64>,
}

#[async_trait]
impl ChainHead for FakeChainHead {
    fn blockchain_id(&self) -> &BlockchainId {
        &self.blockchain_id
    }

    fn contract_address(&self) -> Address {
        Address::repeat_byte(0xcc)
    }

    async fn head_block(&self) -> Result<u64, BlockchainError> {
        self.head.ok_or_else(|| BlockchainError::Unavailable {
            operation: "get_block_number".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

struct Harness {
    repository: Arc<RepositoryManager>,
    contract: Arc<FakeQuestContract>,
    router: Router,
}

async fn harness(head: Option<u64>) -> Harness {
    let repository = in_memory_repository().await;
    let contract = Arc::new(FakeQuestContract::at(NOW));
    let read_model = Arc::new(QuestReadModel::with_cache_ttl(
        contract.clone(),
        &repository,
        Duration::ZERO,
    ));
    let chain = Arc::new(FakeChainHead {
        blockchain_id: BlockchainId::from("hardhat:31337"),
        head,
    });
    let context = Arc::new(Context::new(
        Arc::clone(&repository),
        chain,
        Arc::new(FakeFileStore::default()),
        read_model,
    ));
    Harness {
        repository,
        contract,
        router: routes(context),
    }
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn requester() -> Address {
    Address::repeat_byte(0x0a)
}

fn meta(seed: u8, block_timestamp: u64) -> EventMeta {
    EventMeta {
        id: EventId::from_log(B256::repeat_byte(seed), u64::from(seed)),
        block_number: 100 + u64::from(seed),
        block_timestamp,
        transaction_hash: B256::repeat_byte(seed),
    }
}

async fn index_created(repository: &RepositoryManager, id: u64, block_timestamp: u64) {
    repository
        .quest_created_repository()
        .insert(&QuestCreatedRecord {
            meta: meta(id as u8, block_timestamp),
            quest_id: QuestId::new(id),
            requester: requester(),
            title: format!("Quest {id}"),
            category: 2,
            reward: U256::from(ETHER),
            deadline: U256::from(NOW + 3_600),
            max_submissions: U256::from(2),
        })
        .await
        .unwrap();
}

fn contract_quest(id: u64) -> Quest {
    Quest {
        id: QuestId::new(id),
        creator: requester(),
        title: format!("Quest {id}"),
        description: "Night markets".to_string(),
        category: Category::Street,
        reward: U256::from(ETHER),
        deadline: NOW + 3_600,
        max_submissions: 2,
        status: QuestStatus::Open,
        created_at: NOW - 60,
        completed_at: None,
        submission_count: 0,
    }
}

#[tokio::test]
async fn info_reports_package_name() {
    let harness = harness(Some(1)).await;
    let (status, body) = get(&harness.router, "/v1/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn status_reports_lag_behind_head() {
    let harness = harness(Some(130)).await;
    harness
        .repository
        .blockchain_repository()
        .update_last_checked_block(
            "hardhat:31337",
            &cursor_key(Address::repeat_byte(0xcc)),
            120,
            chrono::Utc::now(),
        )
        .await
        .unwrap();

    let (status, body) = get(&harness.router, "/v1/status").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["headBlock"], 130);
    assert_eq!(body["indexedBlock"], 120);
    assert_eq!(body["lagBlocks"], 10);
    assert_eq!(body["storeHealthy"], true);
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn status_lists_unreachable_chain() {
    let harness = harness(None).await;
    let (status, body) = get(&harness.router, "/v1/status").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["headBlock"].is_null());
    assert!(body["lagBlocks"].is_null());
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn quest_view_maps_states_to_status_codes() {
    let harness = harness(Some(1)).await;
    index_created(&harness.repository, 1, NOW - 50).await;
    index_created(&harness.repository, 2, NOW - 40).await;
    harness.contract.with_state(|state| {
        state.quests.insert(QuestId::new(1), contract_quest(1));
    });

    let (status, body) = get(&harness.router, "/v1/quests/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Quest 1");
    assert_eq!(body["indexed"], true);

    let (status, body) = get(&harness.router, "/v1/quests/2").await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["state"], "pending");
    assert_eq!(body["indexed"]["title"], "Quest 2");

    let (status, _) = get(&harness.router, "/v1/quests/9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&harness.router, "/v1/quests/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    harness.contract.set_unavailable(true);
    let (status, _) = get(&harness.router, "/v1/quests/1").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn quest_list_pages_and_filters() {
    let harness = harness(Some(1)).await;
    for id in 1..=3 {
        index_created(&harness.repository, id, NOW - 100 + id).await;
    }

    let (status, body) = get(&harness.router, "/v1/quests?first=2").await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|quest| quest["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["Quest 3", "Quest 2"]);

    let (_, body) = get(&harness.router, "/v1/quests?orderDirection=asc&skip=1").await;
    assert_eq!(body[0]["title"], "Quest 2");

    let (_, body) = get(
        &harness.router,
        &format!("/v1/quests?requester={:#x}", Address::repeat_byte(0x0b)),
    )
    .await;
    assert!(body.as_array().unwrap().is_empty());

    let (status, _) = get(&harness.router, "/v1/quests?requester=0x12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = get(&harness.router, "/v1/quests/counts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["active"], 3);
}

#[tokio::test]
async fn active_quests_honour_order_and_validate_query() {
    let harness = harness(Some(1)).await;
    for id in 1..=3 {
        index_created(&harness.repository, id, NOW - 100 + id).await;
    }
    let ids = |body: &Value| -> Vec<u64> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|quest| quest["questId"].as_u64().unwrap())
            .collect()
    };

    let (status, body) = get(&harness.router, "/v1/quests/active").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![3, 2, 1]);

    let (status, body) = get(
        &harness.router,
        "/v1/quests/active?orderDirection=asc&first=2",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);

    let (status, body) = get(&harness.router, "/v1/quests/active?requester=0x12").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn submissions_carry_gateway_urls() {
    let harness = harness(Some(1)).await;
    index_created(&harness.repository, 1, NOW - 50).await;
    let photographer = Address::repeat_byte(0xa1);
    harness
        .repository
        .photo_submitted_repository()
        .insert(&PhotoSubmittedRecord {
            meta: meta(0x81, NOW - 10),
            quest_id: QuestId::new(1),
            photographer,
            watermarked_photo_ipfs: "ipfs://bafywm".to_string(),
            submission_index: U256::ZERO,
            timestamp: U256::from(NOW - 10),
        })
        .await
        .unwrap();

    let (status, body) = get(&harness.router, "/v1/quests/1/submissions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["watermarkedUrl"], "https://gateway.test/ipfs/bafywm");

    let (_, body) = get(
        &harness.router,
        &format!("/v1/submissions?photographer={photographer:#x}"),
    )
    .await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = get(
        &harness.router,
        &format!("/v1/users/{photographer:#x}/active-submissions"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["questTitle"], "Quest 1");
    assert_eq!(body[0]["watermarkedUrl"], "https://gateway.test/ipfs/bafywm");

    let (_, body) = get(&harness.router, &format!("/v1/users/{photographer:#x}/stats")).await;
    assert_eq!(body["submissions"], 1);
}

#[tokio::test]
async fn user_routes_reject_malformed_addresses() {
    let harness = harness(Some(1)).await;
    for uri in [
        "/v1/users/nobody/stats",
        "/v1/users/0x12/gallery",
        "/v1/users/zz/active-submissions",
    ] {
        let (status, body) = get(&harness.router, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], 400);
    }
}

#[tokio::test]
async fn empty_gallery_and_fee_history() {
    let harness = harness(Some(1)).await;
    let (status, body) = get(
        &harness.router,
        &format!("/v1/users/{:#x}/gallery", requester()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["photos"].as_array().unwrap().is_empty());
    assert_eq!(body["totalSpent"], "0");

    let (status, body) = get(&harness.router, "/v1/platform-fees").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}
