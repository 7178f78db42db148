use serde::{Deserialize, Serialize};

use crate::error::{PinningError, Result};

const MIB: u64 = 1024 * 1024;

/// Size and type limits applied before anything is uploaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRules {
    pub max_size_bytes: u64,
    /// Accepted MIME types.
    pub allowed_types: Vec<String>,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            max_size_bytes: 10 * MIB,
            allowed_types: ["image/jpeg", "image/png", "image/gif", "image/webp"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// A photo held in memory, ready to validate and upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub fn validate_file(file: &PhotoFile, rules: &FileRules) -> Result<()> {
    if file.size() > rules.max_size_bytes {
        return Err(PinningError::Validation(format!(
            "File size must be less than {}MB",
            (rules.max_size_bytes as f64 / MIB as f64).round() as u64
        )));
    }

    let content_type = file.content_type.trim().to_ascii_lowercase();
    if !rules
        .allowed_types
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&content_type))
    {
        return Err(PinningError::Validation(format!(
            "File type must be one of: {}",
            rules.allowed_types.join(", ")
        )));
    }

    Ok(())
}
