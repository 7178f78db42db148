use std::collections::BTreeMap;

use async_trait::async_trait;
use pq_domain::ContentId;
use serde::Serialize;

use crate::{error::Result, validation::PhotoFile};

/// Optional pin metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOptions {
    pub name: Option<String>,
    pub key_values: BTreeMap<String, String>,
}

impl UploadOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            key_values: BTreeMap::new(),
        }
    }

    pub fn with_key_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.key_values.insert(key.into(), value.into());
        self
    }
}

/// A pinned file and where to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub cid: ContentId,
    pub size: u64,
    pub created_at: String,
    /// Public ipfs.io URL.
    pub url: String,
    /// Configured gateway URL, or the public one when none is configured.
    pub gateway_url: String,
}

/// Content-addressed storage for photos.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Validates and pins `file`.
    async fn upload(&self, file: &PhotoFile, options: &UploadOptions) -> Result<UploadedFile>;

    /// Retrieval URL for `cid` on the preferred gateway.
    fn url_for(&self, cid: &ContentId) -> String;
}
