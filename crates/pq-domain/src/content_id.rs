use serde::{Deserialize, Serialize};

const IPFS_SCHEME: &str = "ipfs://";

/// IPFS content identifier of a pinned photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    /// Normalizes a raw CID, dropping an `ipfs://` prefix and surrounding whitespace.
    ///
    /// Returns `None` for an empty value.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let cid = trimmed.strip_prefix(IPFS_SCHEME).unwrap_or(trimmed);
        if cid.is_empty() {
            None
        } else {
            Some(Self(cid.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `ipfs://` URI form.
    pub fn to_uri(&self) -> String {
        format!("{IPFS_SCHEME}{}", self.0)
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
