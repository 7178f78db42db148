use pq_domain::{GalleryPhoto, U256, u256_decimal};
use pq_pinning::FileStore;
use serde::Serialize;

use crate::read_model::{ActiveSubmission, Gallery};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GalleryPhotoResponse {
    #[serde(flatten)]
    pub photo: GalleryPhoto,
    pub watermarked_url: String,
    pub original_url: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GalleryResponse {
    pub photos: Vec<GalleryPhotoResponse>,
    #[serde(with = "u256_decimal")]
    pub total_spent: U256,
    pub unique_quests: usize,
    pub unique_photographers: usize,
}

impl GalleryResponse {
    pub(crate) fn new(gallery: Gallery, file_store: &dyn FileStore) -> Self {
        let photos = gallery
            .photos
            .into_iter()
            .map(|photo| GalleryPhotoResponse {
                watermarked_url: file_store.url_for(&photo.watermarked_cid),
                original_url: file_store.url_for(&photo.original_cid),
                photo,
            })
            .collect();
        Self {
            photos,
            total_spent: gallery.total_spent,
            unique_quests: gallery.unique_quests,
            unique_photographers: gallery.unique_photographers,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActiveSubmissionResponse {
    #[serde(flatten)]
    pub submission: ActiveSubmission,
    pub watermarked_url: Option<String>,
}

impl ActiveSubmissionResponse {
    pub(crate) fn new(submission: ActiveSubmission, file_store: &dyn FileStore) -> Self {
        let watermarked_url = submission
            .watermarked_cid
            .as_ref()
            .map(|cid| file_store.url_for(cid));
        Self {
            submission,
            watermarked_url,
        }
    }
}
