use std::collections::{HashMap, HashSet};

use pq_domain::{
    Address, Category, ContentId, GalleryPhoto, PlatformFee, QuestId, RewardShare, Submission, U256,
};
use pq_repository::{
    PhotoSubmittedRecord, PlatformFeeUpdatedRecord, QuestCompletedRecord, QuestCreatedRecord,
    SubmissionsSelectedRecord,
};

use super::{projections::dedupe_latest, view::Gallery};

/// Platform fee from the newest indexed update, or the 2.5 % default.
pub(crate) fn platform_fee(latest: Option<&PlatformFeeUpdatedRecord>) -> PlatformFee {
    latest
        .and_then(|record| u64::try_from(record.new_fee).ok())
        .map(PlatformFee::new)
        .unwrap_or_default()
}

/// Builds the requester's winning photos from indexed events.
///
/// A selection contributes only when its quest was created by the requester
/// and has completed. Each share is the selection's `reward_per_winner`; `fee`
/// is only used to estimate it when the event carries zero. Original CIDs
/// start out as the watermarked CID; see [`fill_original_cids`].
pub(crate) fn gallery_photos(
    created: Vec<QuestCreatedRecord>,
    completed: &[QuestCompletedRecord],
    selections: &[SubmissionsSelectedRecord],
    submissions: &[PhotoSubmittedRecord],
    fee: PlatformFee,
) -> Vec<GalleryPhoto> {
    let quests: HashMap<QuestId, QuestCreatedRecord> = dedupe_latest(created)
        .into_iter()
        .map(|record| (record.quest_id, record))
        .collect();
    let completed_at: HashMap<QuestId, u64> = completed
        .iter()
        .map(|record| (record.quest_id, record.meta.block_timestamp))
        .collect();
    let by_photographer: HashMap<(QuestId, Address), &PhotoSubmittedRecord> = submissions
        .iter()
        .map(|record| ((record.quest_id, record.photographer), record))
        .collect();

    let mut photos = Vec::new();
    let mut seen_quests = HashSet::new();
    for selection in latest_first(selections) {
        if !seen_quests.insert(selection.quest_id) {
            continue;
        }
        let (Some(quest), Some(&completed_at)) = (
            quests.get(&selection.quest_id),
            completed_at.get(&selection.quest_id),
        ) else {
            continue;
        };

        let Some(reward_share) = paid_share(selection, quest, fee) else {
            continue;
        };

        for photographer in &selection.selected_photographers {
            let Some(submission) = by_photographer.get(&(selection.quest_id, *photographer))
            else {
                tracing::debug!(
                    quest_id = %selection.quest_id,
                    photographer = %photographer,
                    "Selected photographer has no indexed submission"
                );
                continue;
            };
            let Some(watermarked_cid) = ContentId::parse(&submission.watermarked_photo_ipfs)
            else {
                continue;
            };

            photos.push(GalleryPhoto {
                quest_id: quest.quest_id,
                quest_title: quest.title.clone(),
                category: Category::try_from(quest.category).unwrap_or(Category::Other),
                photographer: *photographer,
                original_cid: watermarked_cid.clone(),
                watermarked_cid,
                submission_index: submission.submission_index,
                submitted_at: submission.timestamp,
                completed_at,
                reward_share,
            });
        }
    }

    photos.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then_with(|| a.quest_id.cmp(&b.quest_id))
            .then_with(|| a.submission_index.cmp(&b.submission_index))
    });
    photos
}

/// Replaces the stand-in original CIDs of one quest's photos with those read
/// from the contract.
pub(crate) fn fill_original_cids(
    photos: &mut [GalleryPhoto],
    quest_id: QuestId,
    selected: &[Submission],
) {
    let originals: HashMap<Address, &ContentId> = selected
        .iter()
        .filter_map(|submission| {
            submission
                .original_cid
                .as_ref()
                .map(|cid| (submission.photographer, cid))
        })
        .collect();

    for photo in photos.iter_mut().filter(|photo| photo.quest_id == quest_id) {
        if let Some(original) = originals.get(&photo.photographer) {
            photo.original_cid = (*original).clone();
        }
    }
}

pub(crate) fn summarize(photos: Vec<GalleryPhoto>) -> Gallery {
    let total_spent = photos
        .iter()
        .fold(U256::ZERO, |total, photo| total.saturating_add(photo.reward_share));
    let unique_quests = photos
        .iter()
        .map(|photo| photo.quest_id)
        .collect::<HashSet<_>>()
        .len();
    let unique_photographers = photos
        .iter()
        .map(|photo| photo.photographer)
        .collect::<HashSet<_>>()
        .len();

    Gallery {
        photos,
        total_spent,
        unique_quests,
        unique_photographers,
    }
}

/// Amount each winner received: the emitted per-winner reward, or the fee-based
/// estimate when the event carries zero.
fn paid_share(
    selection: &SubmissionsSelectedRecord,
    quest: &QuestCreatedRecord,
    fee: PlatformFee,
) -> Option<U256> {
    if !selection.reward_per_winner.is_zero() {
        return Some(selection.reward_per_winner);
    }
    let winners = selection.selected_photographers.len() as u64;
    RewardShare::split(fee.net_of_fee(quest.reward), winners).map(|share| share.per_winner)
}

fn latest_first(selections: &[SubmissionsSelectedRecord]) -> Vec<&SubmissionsSelectedRecord> {
    let mut ordered: Vec<_> = selections.iter().collect();
    ordered.sort_by(|a, b| b.meta.block_timestamp.cmp(&a.meta.block_timestamp));
    ordered
}
