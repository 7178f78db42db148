use std::{sync::Arc, time::Duration};

use pq_blockchain::format_wei_as_ether;
use pq_domain::{Address, Category, QuestId, QuestStatus, U256};
use pq_pinning::{FileRules, PhotoFile};

use super::*;
use crate::{
    read_model::{QuestReadModel, QuestViewState},
    test_support::{
        FakeFileStore, FakeQuestContract, ether, ether_fraction, in_memory_repository,
    },
};

const NOW: u64 = 1_800_000_000;
const DAY: u64 = 86_400;

fn requester() -> WalletContext {
    WalletContext::new(Address::repeat_byte(0x0a))
}

fn photographer(n: u8) -> WalletContext {
    WalletContext::new(Address::repeat_byte(0xa0 + n))
}

fn photo(name: &str) -> PhotoSubmission {
    PhotoSubmission {
        quest_id: QuestId::new(1),
        watermarked: PhotoFile::new(format!("{name}-wm.jpg"), "image/jpeg", vec![7; 256]),
        original: PhotoFile::new(format!("{name}.jpg"), "image/jpeg", vec![9; 512]),
    }
}

async fn open_quest(contract: &FakeQuestContract, reward: U256, max_submissions: u64) -> QuestId {
    let draft = QuestDraft {
        title: "Street musicians".to_string(),
        description: "Buskers in the old town".to_string(),
        category: Category::Street,
        reward,
        deadline: NOW + 7 * DAY,
        max_submissions,
    };
    create_quest(contract, &requester(), &draft, NOW)
        .await
        .unwrap()
        .quest_id
}

async fn submit(
    contract: &FakeQuestContract,
    store: &FakeFileStore,
    wallet: &WalletContext,
    submission: &PhotoSubmission,
) -> Result<SubmittedPhoto, SubmissionError> {
    submit_photo(
        contract,
        store,
        &FileRules::default(),
        wallet,
        submission,
        NOW,
    )
    .await
}

/// Two photographers enter a 0.5 ETH quest and the creator selects both.
#[tokio::test]
async fn two_winners_split_half_an_ether() {
    let contract = Arc::new(FakeQuestContract::at(NOW));
    let store = FakeFileStore::default();
    let quest_id = open_quest(&contract, ether("0.5"), 2).await;

    submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();
    submit(&contract, &store, &photographer(2), &photo("bob"))
        .await
        .unwrap();

    let mut workflow = SelectionWorkflow::load(contract.as_ref(), quest_id)
        .await
        .unwrap();
    assert_eq!(workflow.submissions().len(), 2);
    workflow.select_all().unwrap();
    let share = workflow.reward_share().unwrap();
    assert_eq!(share.per_winner, ether_fraction(1, 4));
    assert_eq!(format_wei_as_ether(share.per_winner), "0.250000000000000000");
    assert_eq!(share.remainder, U256::ZERO);

    workflow
        .submit(contract.as_ref(), &requester())
        .await
        .unwrap();
    assert!(matches!(workflow.state(), SelectionState::Succeeded(_)));

    let payouts = contract.with_state(|state| state.payouts.clone());
    assert_eq!(
        payouts,
        vec![
            (photographer(1).address, ether_fraction(1, 4)),
            (photographer(2).address, ether_fraction(1, 4)),
        ]
    );

    let repository = in_memory_repository().await;
    let read_model = QuestReadModel::with_cache_ttl(contract.clone(), &repository, Duration::ZERO);
    match read_model.quest_view(quest_id).await.unwrap() {
        QuestViewState::Ready(view) => assert_eq!(view.display_status, QuestStatus::Completed),
        other => panic!("expected a ready view, got {other:?}"),
    }
}

#[tokio::test]
async fn selecting_nothing_is_blocked_and_quest_is_untouched() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    let quest_id = open_quest(&contract, ether_fraction(1, 2), 2).await;
    submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();

    let mut workflow = SelectionWorkflow::load(&contract, quest_id).await.unwrap();
    let error = workflow.submit(&contract, &requester()).await.unwrap_err();

    assert!(matches!(error, SelectionError::NothingSelected));
    assert_eq!(error.to_string(), "Please select at least one submission");
    assert_eq!(workflow.state(), &SelectionState::Browsing);
    assert_eq!(
        contract.quest(quest_id).unwrap().status,
        QuestStatus::HasSubmissions
    );
    assert!(!contract.write_calls().contains(&"select_submissions"));
}

#[tokio::test]
async fn second_submission_from_same_photographer_is_rejected() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    open_quest(&contract, ether_fraction(1, 2), 2).await;

    submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();
    let uploads_before = store.uploaded_names().len();

    let error = submit(&contract, &store, &photographer(1), &photo("alice-again"))
        .await
        .unwrap_err();

    assert!(matches!(error, SubmissionError::AlreadySubmitted));
    assert!(error.to_string().contains("already submitted"));
    assert_eq!(store.uploaded_names().len(), uploads_before);
    let submit_calls = contract
        .write_calls()
        .into_iter()
        .filter(|call| *call == "submit_photo")
        .count();
    assert_eq!(submit_calls, 1);
}

#[tokio::test]
async fn only_the_creator_may_select() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    let quest_id = open_quest(&contract, ether_fraction(1, 2), 2).await;
    submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();

    let mut workflow = SelectionWorkflow::load(&contract, quest_id).await.unwrap();
    workflow.toggle(0).unwrap();

    assert!(matches!(
        workflow.submit(&contract, &photographer(1)).await,
        Err(SelectionError::NotCreator)
    ));
    assert_eq!(workflow.state(), &SelectionState::Selecting);
}

#[tokio::test]
async fn revert_returns_to_selecting_with_message() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    let quest_id = open_quest(&contract, ether_fraction(1, 2), 2).await;
    submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();

    let mut workflow = SelectionWorkflow::load(&contract, quest_id).await.unwrap();
    workflow.toggle(0).unwrap();
    // Someone else finalized the quest after it was loaded.
    contract.with_state(|state| {
        if let Some(quest) = state.quests.get_mut(&quest_id) {
            quest.status = QuestStatus::Completed;
        }
    });

    let error = workflow.submit(&contract, &requester()).await.unwrap_err();

    assert!(matches!(error, SelectionError::Blockchain(_)));
    assert_eq!(workflow.state(), &SelectionState::Selecting);
    assert_eq!(workflow.selected(), vec![0]);
    assert!(
        workflow
            .last_error()
            .is_some_and(|message| message.contains("no selectable submissions"))
    );
}

#[tokio::test]
async fn reloaded_quest_exposes_stale_selection() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    let quest_id = open_quest(&contract, ether_fraction(1, 2), 2).await;
    submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();
    submit(&contract, &store, &photographer(2), &photo("bob"))
        .await
        .unwrap();

    let mut workflow = SelectionWorkflow::load(&contract, quest_id).await.unwrap();
    workflow.toggle(1).unwrap();
    contract.with_state(|state| {
        if let Some(submissions) = state.submissions.get_mut(&quest_id) {
            submissions.truncate(1);
        }
    });
    workflow.reload(&contract).await.unwrap();

    assert!(matches!(
        workflow.submit(&contract, &requester()).await,
        Err(SelectionError::StaleIndex(1))
    ));
    assert!(!contract.write_calls().contains(&"select_submissions"));
}

#[tokio::test]
async fn terminal_quest_refuses_selection_locally() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    let quest_id = open_quest(&contract, ether_fraction(1, 2), 2).await;
    submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();
    contract.with_state(|state| {
        if let Some(quest) = state.quests.get_mut(&quest_id) {
            quest.status = QuestStatus::Cancelled;
        }
    });

    let mut workflow = SelectionWorkflow::load(&contract, quest_id).await.unwrap();
    workflow.toggle(0).unwrap();

    assert!(matches!(
        workflow.submit(&contract, &requester()).await,
        Err(SelectionError::QuestClosed(QuestStatus::Cancelled))
    ));
}

#[tokio::test]
async fn unsupported_file_is_rejected_before_upload() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    open_quest(&contract, ether_fraction(1, 2), 2).await;

    let mut submission = photo("clip");
    submission.original = PhotoFile::new("clip.mp4", "video/mp4", vec![0; 64]);

    let error = submit(&contract, &store, &photographer(1), &submission)
        .await
        .unwrap_err();

    match error {
        SubmissionError::InvalidFile(message) => assert!(message.starts_with("File type must be")),
        other => panic!("expected a file error, got {other:?}"),
    }
    assert!(store.uploaded_names().is_empty());
}

#[tokio::test]
async fn full_or_expired_quest_takes_no_photos() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    open_quest(&contract, ether_fraction(1, 2), 1).await;
    submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();

    assert!(matches!(
        submit(&contract, &store, &photographer(2), &photo("bob")).await,
        Err(SubmissionError::QuestFull)
    ));

    let late = submit_photo(
        &contract,
        &store,
        &FileRules::default(),
        &photographer(3),
        &photo("carol"),
        NOW + 8 * DAY,
    )
    .await;
    assert!(matches!(
        late,
        Err(SubmissionError::DeadlinePassed | SubmissionError::QuestFull)
    ));
}

#[tokio::test]
async fn deadline_is_checked_before_upload() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    open_quest(&contract, ether_fraction(1, 2), 5).await;

    let late = submit_photo(
        &contract,
        &store,
        &FileRules::default(),
        &photographer(1),
        &photo("alice"),
        NOW + 8 * DAY,
    )
    .await;

    assert!(matches!(late, Err(SubmissionError::DeadlinePassed)));
    assert!(store.uploaded_names().is_empty());
}

#[tokio::test]
async fn failed_upload_never_reaches_the_contract() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    open_quest(&contract, ether_fraction(1, 2), 2).await;
    store.fail_uploads();

    let error = submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap_err();

    assert!(matches!(error, SubmissionError::Upload(_)));
    assert!(!contract.write_calls().contains(&"submit_photo"));
}

#[tokio::test]
async fn uploads_watermarked_before_original() {
    let contract = FakeQuestContract::at(NOW);
    let store = FakeFileStore::default();
    let quest_id = open_quest(&contract, ether_fraction(1, 2), 2).await;

    let submitted = submit(&contract, &store, &photographer(1), &photo("alice"))
        .await
        .unwrap();

    assert_eq!(store.uploaded_names(), vec!["alice-wm.jpg", "alice.jpg"]);
    let stored = contract.with_state(|state| state.submissions[&quest_id][0].clone());
    assert_eq!(stored.watermarked_cid, submitted.watermarked.cid);
    assert_eq!(stored.original_cid, Some(submitted.original.cid));
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_contract() {
    let contract = FakeQuestContract::at(NOW);
    let draft = QuestDraft {
        title: String::new(),
        description: String::new(),
        category: Category::Other,
        reward: U256::from(1),
        deadline: NOW + DAY,
        max_submissions: 1,
    };

    assert!(matches!(
        create_quest(&contract, &requester(), &draft, NOW).await,
        Err(CreateQuestError::Invalid(_))
    ));
    assert!(contract.write_calls().is_empty());
}

#[tokio::test]
async fn unreachable_chain_surfaces_as_blockchain_error() {
    let contract = FakeQuestContract::at(NOW);
    let quest_id = open_quest(&contract, ether_fraction(1, 2), 2).await;
    contract.set_unavailable(true);

    match SelectionWorkflow::load(&contract, quest_id).await {
        Err(SelectionError::Blockchain(error)) => assert!(error.is_unavailable()),
        other => panic!("expected an unavailable chain, got {other:?}"),
    }
}
