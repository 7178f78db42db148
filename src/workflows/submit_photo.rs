use std::time::Instant;

use pq_blockchain::{BlockchainError, QuestContract, TransactionOutcome};
use pq_domain::{QuestId, QuestStatus};
use pq_observability::record_workflow_outcome;
use pq_pinning::{
    FileRules, FileStore, PhotoFile, PinningError, UploadOptions, UploadedFile, validate_file,
};
use thiserror::Error;

use super::WalletContext;

const WORKFLOW: &str = "submit_photo";

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("You have already submitted a photo to this quest")]
    AlreadySubmitted,

    #[error("Quest {0} does not exist")]
    QuestNotFound(QuestId),

    #[error("Quest is {0} and no longer accepts photos")]
    QuestClosed(QuestStatus),

    #[error("Quest deadline has passed")]
    DeadlinePassed,

    #[error("Quest has reached its maximum number of submissions")]
    QuestFull,

    /// A file failed the type or size rules; nothing was uploaded.
    #[error("{0}")]
    InvalidFile(String),

    #[error("Photo upload failed: {0}")]
    Upload(PinningError),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

impl SubmissionError {
    fn outcome(&self) -> &'static str {
        match self {
            SubmissionError::InvalidFile(_) => "invalid",
            SubmissionError::Upload(_) | SubmissionError::Blockchain(_) => "failed",
            _ => "rejected",
        }
    }
}

/// Both renditions of a photo entered into a quest.
#[derive(Debug, Clone)]
pub struct PhotoSubmission {
    pub quest_id: QuestId,
    /// Rendered by the client; this node never draws the watermark.
    pub watermarked: PhotoFile,
    pub original: PhotoFile,
}

#[derive(Debug, Clone)]
pub struct SubmittedPhoto {
    pub watermarked: UploadedFile,
    pub original: UploadedFile,
    pub transaction: TransactionOutcome,
}

/// Checks eligibility against the contract, validates and pins both files,
/// then calls `submitPhoto`. `now` is unix seconds.
pub async fn submit_photo(
    contract: &dyn QuestContract,
    file_store: &dyn FileStore,
    rules: &FileRules,
    wallet: &WalletContext,
    submission: &PhotoSubmission,
    now: u64,
) -> Result<SubmittedPhoto, SubmissionError> {
    let started = Instant::now();
    let result = run(contract, file_store, rules, wallet, submission, now).await;

    match &result {
        Ok(submitted) => {
            tracing::info!(
                quest_id = %submission.quest_id,
                wallet = %wallet,
                watermarked_cid = %submitted.watermarked.cid,
                transaction_hash = %submitted.transaction.transaction_hash,
                "Photo submitted"
            );
            record_workflow_outcome(WORKFLOW, "submitted", started.elapsed());
        }
        Err(error) => {
            tracing::warn!(
                quest_id = %submission.quest_id,
                wallet = %wallet,
                error = %error,
                "Photo submission did not go through"
            );
            record_workflow_outcome(WORKFLOW, error.outcome(), started.elapsed());
        }
    }
    result
}

async fn run(
    contract: &dyn QuestContract,
    file_store: &dyn FileStore,
    rules: &FileRules,
    wallet: &WalletContext,
    submission: &PhotoSubmission,
    now: u64,
) -> Result<SubmittedPhoto, SubmissionError> {
    let quest_id = submission.quest_id;

    if contract
        .has_photographer_submitted(quest_id, wallet.address)
        .await?
    {
        return Err(SubmissionError::AlreadySubmitted);
    }

    let quest = contract
        .get_quest(quest_id)
        .await?
        .ok_or(SubmissionError::QuestNotFound(quest_id))?;
    if quest.status.is_terminal() {
        return Err(SubmissionError::QuestClosed(quest.status));
    }
    if quest.deadline_passed(now) {
        return Err(SubmissionError::DeadlinePassed);
    }
    if quest.is_full() {
        return Err(SubmissionError::QuestFull);
    }

    for file in [&submission.watermarked, &submission.original] {
        validate_file(file, rules).map_err(|error| match error {
            PinningError::Validation(message) => SubmissionError::InvalidFile(message),
            other => SubmissionError::Upload(other),
        })?;
    }

    let watermarked = file_store
        .upload(
            &submission.watermarked,
            &upload_options(quest_id, wallet, "watermarked"),
        )
        .await
        .map_err(SubmissionError::Upload)?;
    let original = file_store
        .upload(
            &submission.original,
            &upload_options(quest_id, wallet, "original"),
        )
        .await
        .map_err(SubmissionError::Upload)?;

    let transaction = contract
        .submit_photo(wallet.address, quest_id, &watermarked.cid, &original.cid)
        .await?;

    Ok(SubmittedPhoto {
        watermarked,
        original,
        transaction,
    })
}

fn upload_options(quest_id: QuestId, wallet: &WalletContext, rendition: &str) -> UploadOptions {
    UploadOptions::named(format!("quest-{quest_id}-{rendition}"))
        .with_key_value("questId", quest_id.to_string())
        .with_key_value("photographer", wallet.to_string())
        .with_key_value("type", rendition)
}
