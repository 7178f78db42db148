use std::time::Instant;

use pq_blockchain::{BlockchainError, CreatedQuest, NewQuest, QuestContract, format_wei_as_ether};
use pq_domain::{Category, U256};
use pq_observability::record_workflow_outcome;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use super::WalletContext;

const WORKFLOW: &str = "create_quest";

#[derive(Debug, Error)]
pub enum CreateQuestError {
    #[error("Invalid quest: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Reward must be greater than zero")]
    ZeroReward,

    #[error("Deadline must be in the future")]
    DeadlineNotInFuture,

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("title cannot be blank".into());
        return Err(error);
    }
    Ok(())
}

/// A quest as entered by its requester, before it is sent to the contract.
#[derive(Debug, Clone, Validate)]
pub struct QuestDraft {
    #[validate(
        length(min = 1, max = 100, message = "title must be 1 to 100 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: String,
    pub category: Category,
    /// Escrowed with the transaction, in wei.
    pub reward: U256,
    /// Unix seconds.
    pub deadline: u64,
    #[validate(range(min = 1, max = 100, message = "maxSubmissions must be between 1 and 100"))]
    pub max_submissions: u64,
}

impl QuestDraft {
    fn check(&self, now: u64) -> Result<(), CreateQuestError> {
        self.validate()?;
        if self.reward.is_zero() {
            return Err(CreateQuestError::ZeroReward);
        }
        if self.deadline <= now {
            return Err(CreateQuestError::DeadlineNotInFuture);
        }
        Ok(())
    }
}

/// Validates `draft` and calls the payable `createQuest` with the reward as value.
pub async fn create_quest(
    contract: &dyn QuestContract,
    wallet: &WalletContext,
    draft: &QuestDraft,
    now: u64,
) -> Result<CreatedQuest, CreateQuestError> {
    let started = Instant::now();
    if let Err(error) = draft.check(now) {
        record_workflow_outcome(WORKFLOW, "invalid", started.elapsed());
        return Err(error);
    }

    let new_quest = NewQuest {
        title: draft.title.trim().to_string(),
        description: draft.description.clone(),
        category: draft.category,
        reward: draft.reward,
        deadline: draft.deadline,
        max_submissions: draft.max_submissions,
    };

    match contract.create_quest(wallet.address, &new_quest).await {
        Ok(created) => {
            tracing::info!(
                quest_id = %created.quest_id,
                wallet = %wallet,
                reward_eth = %format_wei_as_ether(draft.reward),
                transaction_hash = %created.transaction.transaction_hash,
                "Quest created"
            );
            record_workflow_outcome(WORKFLOW, "submitted", started.elapsed());
            Ok(created)
        }
        Err(error) => {
            tracing::warn!(wallet = %wallet, error = %error, "Quest creation failed");
            record_workflow_outcome(WORKFLOW, "failed", started.elapsed());
            Err(error.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestDraft {
        QuestDraft {
            title: "Foggy bridges".to_string(),
            description: "Early morning, any city".to_string(),
            category: Category::Architecture,
            reward: U256::from(1),
            deadline: 200,
            max_submissions: 10,
        }
    }

    #[test]
    fn accepts_well_formed_draft() {
        assert!(draft().check(100).is_ok());
    }

    #[test]
    fn rejects_blank_or_long_title() {
        let long = "x".repeat(101);
        for title in ["", "   ", long.as_str()] {
            let draft = QuestDraft {
                title: title.to_string(),
                ..draft()
            };
            match draft.check(100) {
                Err(CreateQuestError::Invalid(errors)) => {
                    assert!(errors.field_errors().contains_key("title"))
                }
                other => panic!("expected a title error, got {other:?}"),
            }
        }
    }

    #[test]
    fn title_limit_counts_characters() {
        let draft = QuestDraft {
            title: "é".repeat(100),
            ..draft()
        };
        assert!(draft.check(100).is_ok());
    }

    #[test]
    fn rejects_out_of_range_max_submissions() {
        for max_submissions in [0, 101] {
            let draft = QuestDraft {
                max_submissions,
                ..draft()
            };
            assert!(matches!(
                draft.check(100),
                Err(CreateQuestError::Invalid(_))
            ));
        }
    }

    #[test]
    fn rejects_zero_reward_and_past_deadline() {
        let free = QuestDraft {
            reward: U256::ZERO,
            ..draft()
        };
        assert!(matches!(free.check(100), Err(CreateQuestError::ZeroReward)));
        assert!(matches!(
            draft().check(200),
            Err(CreateQuestError::DeadlineNotInFuture)
        ));
    }

    #[test]
    fn description_may_be_empty_but_not_too_long() {
        let empty = QuestDraft {
            description: String::new(),
            ..draft()
        };
        assert!(empty.check(100).is_ok());

        let long = QuestDraft {
            description: "d".repeat(1001),
            ..draft()
        };
        assert!(long.check(100).is_err());
    }
}
