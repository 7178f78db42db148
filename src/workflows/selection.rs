use std::{collections::BTreeSet, time::Instant};

use pq_blockchain::{BlockchainError, QuestContract, TransactionOutcome};
use pq_domain::{Quest, QuestId, QuestStatus, RewardShare, Submission};
use pq_observability::record_workflow_outcome;
use thiserror::Error;

use super::WalletContext;

const WORKFLOW: &str = "select_submissions";

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Please select at least one submission")]
    NothingSelected,

    #[error("Only the quest creator can select winners")]
    NotCreator,

    #[error("Quest is already {0}")]
    QuestClosed(QuestStatus),

    #[error("Submission #{0} is not part of the loaded submissions")]
    StaleIndex(u64),

    #[error("Quest {0} does not exist")]
    QuestNotFound(QuestId),

    #[error("Winners were already selected for this quest")]
    AlreadySucceeded,

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    /// Loaded, nothing selected.
    Browsing,
    Selecting,
    /// Selection frozen while the write is in flight.
    Submitting,
    Succeeded(TransactionOutcome),
}

/// Winner selection for one quest, driven by its creator.
#[derive(Debug, Clone)]
pub struct SelectionWorkflow {
    quest: Quest,
    submissions: Vec<Submission>,
    selected: BTreeSet<u64>,
    state: SelectionState,
    last_error: Option<String>,
}

impl SelectionWorkflow {
    pub fn new(quest: Quest, submissions: Vec<Submission>) -> Self {
        Self {
            quest,
            submissions,
            selected: BTreeSet::new(),
            state: SelectionState::Browsing,
            last_error: None,
        }
    }

    pub async fn load(
        contract: &dyn QuestContract,
        quest_id: QuestId,
    ) -> Result<Self, SelectionError> {
        let (quest, submissions) = Self::read(contract, quest_id).await?;
        Ok(Self::new(quest, submissions))
    }

    /// Re-reads the quest and its submissions, keeping the current selection.
    pub async fn reload(&mut self, contract: &dyn QuestContract) -> Result<(), SelectionError> {
        let (quest, submissions) = Self::read(contract, self.quest.id).await?;
        self.quest = quest;
        self.submissions = submissions;
        Ok(())
    }

    pub fn quest(&self) -> &Quest {
        &self.quest
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Message of the last failed submit, cleared by the next one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Selected submission indices, ascending.
    pub fn selected(&self) -> Vec<u64> {
        self.selected.iter().copied().collect()
    }

    pub fn toggle(&mut self, index: u64) -> Result<(), SelectionError> {
        self.ensure_editable()?;
        if !self.is_loaded(index) {
            return Err(SelectionError::StaleIndex(index));
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        self.settle();
        Ok(())
    }

    pub fn select_all(&mut self) -> Result<(), SelectionError> {
        self.ensure_editable()?;
        self.selected = self.loaded_indices().collect();
        self.settle();
        Ok(())
    }

    pub fn deselect_all(&mut self) -> Result<(), SelectionError> {
        self.ensure_editable()?;
        self.selected.clear();
        self.settle();
        Ok(())
    }

    /// Selects everything, or clears the selection when everything is already selected.
    pub fn toggle_all(&mut self) -> Result<(), SelectionError> {
        let everything_selected = !self.submissions.is_empty()
            && self.loaded_indices().all(|index| self.selected.contains(&index));
        if everything_selected {
            self.deselect_all()
        } else {
            self.select_all()
        }
    }

    /// Per-winner payout for the current selection. `None` when nothing is selected.
    pub fn reward_share(&self) -> Option<RewardShare> {
        RewardShare::split(self.quest.reward, self.selected.len() as u64)
    }

    /// Sends the selection in one `selectSubmissions` transaction.
    ///
    /// Refusals leave the workflow untouched. A failed write returns to
    /// [`SelectionState::Selecting`] with the same selection.
    pub async fn submit(
        &mut self,
        contract: &dyn QuestContract,
        wallet: &WalletContext,
    ) -> Result<TransactionOutcome, SelectionError> {
        let started = Instant::now();
        if let Err(error) = self.check_submittable(wallet) {
            tracing::debug!(
                quest_id = %self.quest.id,
                wallet = %wallet,
                error = %error,
                "Selection refused"
            );
            record_workflow_outcome(WORKFLOW, "rejected", started.elapsed());
            return Err(error);
        }

        let indices = self.selected();
        self.state = SelectionState::Submitting;
        self.last_error = None;
        tracing::info!(
            quest_id = %self.quest.id,
            winners = indices.len(),
            "Submitting winner selection"
        );

        match contract
            .select_submissions(wallet.address, self.quest.id, &indices)
            .await
        {
            Ok(outcome) => {
                tracing::info!(
                    quest_id = %self.quest.id,
                    transaction_hash = %outcome.transaction_hash,
                    "Winners selected"
                );
                self.state = SelectionState::Succeeded(outcome);
                record_workflow_outcome(WORKFLOW, "submitted", started.elapsed());
                Ok(outcome)
            }
            Err(error) => {
                tracing::warn!(quest_id = %self.quest.id, error = %error, "Winner selection failed");
                self.state = SelectionState::Selecting;
                self.last_error = Some(error.to_string());
                record_workflow_outcome(WORKFLOW, "failed", started.elapsed());
                Err(error.into())
            }
        }
    }

    fn check_submittable(&self, wallet: &WalletContext) -> Result<(), SelectionError> {
        self.ensure_editable()?;
        if self.selected.is_empty() {
            return Err(SelectionError::NothingSelected);
        }
        if !self.quest.is_created_by(wallet.address) {
            return Err(SelectionError::NotCreator);
        }
        if self.quest.status.is_terminal() {
            return Err(SelectionError::QuestClosed(self.quest.status));
        }
        if let Some(stale) = self.selected.iter().find(|index| !self.is_loaded(**index)) {
            return Err(SelectionError::StaleIndex(*stale));
        }
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), SelectionError> {
        match self.state {
            SelectionState::Succeeded(_) => Err(SelectionError::AlreadySucceeded),
            _ => Ok(()),
        }
    }

    fn settle(&mut self) {
        self.state = if self.selected.is_empty() {
            SelectionState::Browsing
        } else {
            SelectionState::Selecting
        };
    }

    fn is_loaded(&self, index: u64) -> bool {
        self.submissions
            .iter()
            .any(|submission| submission.submission_index == index)
    }

    fn loaded_indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.submissions
            .iter()
            .map(|submission| submission.submission_index)
    }

    async fn read(
        contract: &dyn QuestContract,
        quest_id: QuestId,
    ) -> Result<(Quest, Vec<Submission>), SelectionError> {
        let quest = contract
            .get_quest(quest_id)
            .await?
            .ok_or(SelectionError::QuestNotFound(quest_id))?;
        let submissions = contract.get_quest_submissions(quest_id).await?;
        Ok((quest, submissions))
    }
}
