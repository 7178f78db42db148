use pq_domain::ContentId;
use pq_pinning::FileStore;
use pq_repository::{PhotoSubmittedRecord, QuestCreatedRecord};
use serde::Serialize;

/// Returned with 202 while the contract does not yet serve an indexed quest.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PendingQuestResponse {
    pub state: &'static str,
    pub indexed: QuestCreatedRecord,
}

impl PendingQuestResponse {
    pub(crate) fn new(indexed: QuestCreatedRecord) -> Self {
        Self {
            state: "pending",
            indexed,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmissionResponse {
    #[serde(flatten)]
    pub submission: PhotoSubmittedRecord,
    pub watermarked_url: Option<String>,
}

impl SubmissionResponse {
    pub(crate) fn new(submission: PhotoSubmittedRecord, file_store: &dyn FileStore) -> Self {
        let watermarked_url = ContentId::parse(&submission.watermarked_photo_ipfs)
            .map(|cid| file_store.url_for(&cid));
        Self {
            submission,
            watermarked_url,
        }
    }
}
