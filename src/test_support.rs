//! In-memory doubles for the contract and the pinning service.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use pq_blockchain::{BlockchainError, CreatedQuest, NewQuest, QuestContract, TransactionOutcome};
use pq_domain::{Address, B256, ContentId, Quest, QuestId, QuestStatus, Submission, U256};
use pq_pinning::{FileStore, PhotoFile, PinningError, UploadOptions, UploadedFile};
use pq_repository::{RepositoryManager, RepositoryManagerConfig};

pub(crate) const ETHER: u64 = 1_000_000_000_000_000_000;

pub(crate) fn ether_fraction(numerator: u64, denominator: u64) -> U256 {
    U256::from(ETHER) * U256::from(numerator) / U256::from(denominator)
}

/// Wei for a decimal ether amount such as `"0.5"`.
pub(crate) fn ether(amount: &str) -> U256 {
    pq_blockchain::parse_ether_to_wei(amount).unwrap()
}

pub(crate) async fn in_memory_repository() -> Arc<RepositoryManager> {
    Arc::new(
        RepositoryManager::connect(&RepositoryManagerConfig::in_memory())
            .await
            .unwrap(),
    )
}

#[derive(Default)]
pub(crate) struct ChainState {
    pub now: u64,
    pub block_number: u64,
    pub counter: u64,
    pub quests: BTreeMap<QuestId, Quest>,
    pub submissions: BTreeMap<QuestId, Vec<Submission>>,
    pub payouts: Vec<(Address, U256)>,
    pub write_calls: Vec<&'static str>,
    pub unavailable: bool,
}

/// Contract double that enforces the same rules as the deployed contract.
#[derive(Default)]
pub(crate) struct FakeQuestContract {
    state: Mutex<ChainState>,
}

impl FakeQuestContract {
    pub(crate) fn at(now: u64) -> Self {
        Self {
            state: Mutex::new(ChainState {
                now,
                block_number: 1,
                ..ChainState::default()
            }),
        }
    }

    pub(crate) fn with_state<R>(&self, f: impl FnOnce(&mut ChainState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub(crate) fn set_unavailable(&self, unavailable: bool) {
        self.with_state(|state| state.unavailable = unavailable);
    }

    pub(crate) fn quest(&self, quest_id: QuestId) -> Option<Quest> {
        self.with_state(|state| state.quests.get(&quest_id).cloned())
    }

    pub(crate) fn write_calls(&self) -> Vec<&'static str> {
        self.with_state(|state| state.write_calls.clone())
    }

    fn read<R>(
        &self,
        operation: &str,
        f: impl FnOnce(&ChainState) -> R,
    ) -> Result<R, BlockchainError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(unavailable(operation));
        }
        Ok(f(&state))
    }

    fn write<R>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&mut ChainState) -> Result<R, String>,
    ) -> Result<(R, TransactionOutcome), BlockchainError> {
        let mut state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(unavailable(operation));
        }
        state.write_calls.push(operation);
        let value = f(&mut state).map_err(|reason| BlockchainError::Reverted { reason })?;
        state.block_number += 1;
        let outcome = TransactionOutcome {
            transaction_hash: B256::repeat_byte(state.block_number as u8),
            block_number: Some(state.block_number),
        };
        Ok((value, outcome))
    }
}

fn unavailable(operation: &str) -> BlockchainError {
    BlockchainError::Unavailable {
        operation: operation.to_string(),
        reason: "connection refused".to_string(),
    }
}

#[async_trait]
impl QuestContract for FakeQuestContract {
    async fn quest_counter(&self) -> Result<u64, BlockchainError> {
        self.read("quest_counter", |state| state.counter)
    }

    async fn get_quest(&self, quest_id: QuestId) -> Result<Option<Quest>, BlockchainError> {
        self.read("get_quest", |state| state.quests.get(&quest_id).cloned())
    }

    async fn get_quest_submissions(
        &self,
        quest_id: QuestId,
    ) -> Result<Vec<Submission>, BlockchainError> {
        self.read("get_quest_submissions", |state| {
            state.submissions.get(&quest_id).cloned().unwrap_or_default()
        })
    }

    async fn has_photographer_submitted(
        &self,
        quest_id: QuestId,
        photographer: Address,
    ) -> Result<bool, BlockchainError> {
        self.read("has_photographer_submitted", |state| {
            state
                .submissions
                .get(&quest_id)
                .is_some_and(|list| list.iter().any(|s| s.photographer == photographer))
        })
    }

    async fn get_photographer_submission(
        &self,
        quest_id: QuestId,
        photographer: Address,
    ) -> Result<Option<Submission>, BlockchainError> {
        self.read("get_photographer_submission", |state| {
            state.submissions.get(&quest_id).and_then(|list| {
                list.iter()
                    .find(|s| s.photographer == photographer)
                    .cloned()
            })
        })
    }

    async fn get_user_quests(&self, user: Address) -> Result<Vec<QuestId>, BlockchainError> {
        self.read("get_user_quests", |state| {
            state
                .quests
                .values()
                .filter(|quest| quest.creator == user)
                .map(|quest| quest.id)
                .collect()
        })
    }

    async fn get_photographer_quests(
        &self,
        photographer: Address,
    ) -> Result<Vec<QuestId>, BlockchainError> {
        self.read("get_photographer_quests", |state| {
            state
                .submissions
                .iter()
                .filter(|(_, list)| list.iter().any(|s| s.photographer == photographer))
                .map(|(quest_id, _)| *quest_id)
                .collect()
        })
    }

    async fn get_selected_submissions(
        &self,
        quest_id: QuestId,
    ) -> Result<Vec<Submission>, BlockchainError> {
        self.read("get_selected_submissions", |state| {
            state
                .submissions
                .get(&quest_id)
                .map(|list| list.iter().filter(|s| s.is_selected).cloned().collect())
                .unwrap_or_default()
        })
    }

    async fn create_quest(
        &self,
        sender: Address,
        quest: &NewQuest,
    ) -> Result<CreatedQuest, BlockchainError> {
        let (quest_id, transaction) = self.write("create_quest", |state| {
            if quest.reward.is_zero() {
                return Err("Reward must be greater than 0".to_string());
            }
            if quest.deadline <= state.now {
                return Err("Deadline must be in the future".to_string());
            }
            state.counter += 1;
            let quest_id = QuestId::new(state.counter);
            state.quests.insert(
                quest_id,
                Quest {
                    id: quest_id,
                    creator: sender,
                    title: quest.title.clone(),
                    description: quest.description.clone(),
                    category: quest.category,
                    reward: quest.reward,
                    deadline: quest.deadline,
                    max_submissions: quest.max_submissions,
                    status: QuestStatus::Open,
                    created_at: state.now,
                    completed_at: None,
                    submission_count: 0,
                },
            );
            Ok(quest_id)
        })?;
        Ok(CreatedQuest {
            quest_id,
            transaction,
        })
    }

    async fn submit_photo(
        &self,
        sender: Address,
        quest_id: QuestId,
        watermarked: &ContentId,
        original: &ContentId,
    ) -> Result<TransactionOutcome, BlockchainError> {
        let ((), outcome) = self.write("submit_photo", |state| {
            let now = state.now;
            let quest = state
                .quests
                .get_mut(&quest_id)
                .ok_or_else(|| "Quest does not exist".to_string())?;
            if !quest.status.is_active() {
                return Err("Quest is not active".to_string());
            }
            if quest.deadline_passed(now) {
                return Err("Quest deadline has passed".to_string());
            }
            if quest.is_full() {
                return Err("Maximum submissions reached".to_string());
            }
            let submissions = state.submissions.entry(quest_id).or_default();
            if submissions.iter().any(|s| s.photographer == sender) {
                return Err("Already submitted to this quest".to_string());
            }

            submissions.push(Submission {
                quest_id,
                photographer: sender,
                watermarked_cid: watermarked.clone(),
                original_cid: Some(original.clone()),
                submission_index: quest.submission_count,
                submitted_at: now,
                is_selected: false,
            });
            quest.submission_count += 1;
            quest.status = QuestStatus::HasSubmissions;
            Ok(())
        })?;
        Ok(outcome)
    }

    async fn select_submissions(
        &self,
        sender: Address,
        quest_id: QuestId,
        indices: &[u64],
    ) -> Result<TransactionOutcome, BlockchainError> {
        let ((), outcome) = self.write("select_submissions", |state| {
            let now = state.now;
            let quest = state
                .quests
                .get_mut(&quest_id)
                .ok_or_else(|| "Quest does not exist".to_string())?;
            if quest.creator != sender {
                return Err("Only quest creator can select submissions".to_string());
            }
            if quest.status != QuestStatus::HasSubmissions {
                return Err("Quest has no selectable submissions".to_string());
            }
            if indices.is_empty() {
                return Err("Must select at least one submission".to_string());
            }
            if indices.windows(2).any(|pair| pair[0] >= pair[1]) {
                return Err("Indices must be ascending".to_string());
            }
            let submissions = state.submissions.entry(quest_id).or_default();
            if indices.iter().any(|index| *index >= submissions.len() as u64) {
                return Err("Invalid submission index".to_string());
            }

            let per_winner = quest.reward / U256::from(indices.len());
            for index in indices {
                let submission = &mut submissions[*index as usize];
                submission.is_selected = true;
                state.payouts.push((submission.photographer, per_winner));
            }
            quest.status = QuestStatus::Completed;
            quest.completed_at = Some(now);
            Ok(())
        })?;
        Ok(outcome)
    }
}

/// File store double returning deterministic CIDs.
#[derive(Default)]
pub(crate) struct FakeFileStore {
    uploads: Mutex<Vec<String>>,
    failing: Mutex<bool>,
}

impl FakeFileStore {
    pub(crate) fn uploaded_names(&self) -> Vec<String> {
        self.uploads.lock().unwrap().clone()
    }

    pub(crate) fn fail_uploads(&self) {
        *self.failing.lock().unwrap() = true;
    }

    fn pin(&self, name: &str, size: u64) -> pq_pinning::Result<UploadedFile> {
        if *self.failing.lock().unwrap() {
            return Err(PinningError::Service {
                status: 503,
                message: "pinning service unavailable".to_string(),
            });
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(name.to_string());
        let cid = ContentId::parse(&format!("bafy{}{}", uploads.len(), name.replace('.', "")))
            .unwrap();
        Ok(UploadedFile {
            url: format!("https://ipfs.io/ipfs/{cid}"),
            gateway_url: self.url_for(&cid),
            cid,
            size,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        })
    }
}

#[async_trait]
impl FileStore for FakeFileStore {
    async fn upload(
        &self,
        file: &PhotoFile,
        _options: &UploadOptions,
    ) -> pq_pinning::Result<UploadedFile> {
        self.pin(&file.name, file.size())
    }

    fn url_for(&self, cid: &ContentId) -> String {
        format!("https://gateway.test/ipfs/{cid}")
    }
}
