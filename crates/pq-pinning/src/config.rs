use serde::{Deserialize, Serialize};

use crate::{ConfigError, gateway::PUBLIC_GATEWAYS, validation::FileRules};

pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.pinata.cloud/v3/files";

/// Pinning service settings.
///
/// **Secret handling**: the JWT should be provided via configuration
/// (resolved at config load time) or environment variable:
/// - `PQ_PINATA_JWT` - bearer token for uploads (reads work without it)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PinningConfigRaw {
    pub jwt: Option<String>,
    pub upload_url: String,
    /// Dedicated gateway host, with or without scheme (e.g. "example.mypinata.cloud").
    pub gateway: Option<String>,
    /// Gateways tried in order when the dedicated one fails.
    pub fallback_gateways: Vec<String>,
    pub max_file_size_bytes: u64,
    pub allowed_types: Vec<String>,
    pub request_timeout_ms: u64,
}

impl PinningConfigRaw {
    pub fn resolve(self) -> Result<PinningConfig, ConfigError> {
        if self.max_file_size_bytes == 0 {
            return Err(ConfigError::InvalidConfig(
                "pinning.max_file_size_bytes must be greater than zero".to_string(),
            ));
        }
        if self.allowed_types.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "pinning.allowed_types must list at least one MIME type".to_string(),
            ));
        }
        if !self.upload_url.starts_with("http://") && !self.upload_url.starts_with("https://") {
            return Err(ConfigError::InvalidConfig(format!(
                "pinning.upload_url must be an http(s) URL, got '{}'",
                self.upload_url
            )));
        }

        Ok(PinningConfig {
            jwt: self.jwt.filter(|jwt| !jwt.trim().is_empty()),
            upload_url: self.upload_url,
            gateway: self
                .gateway
                .map(|gateway| gateway.trim().trim_end_matches('/').to_string())
                .filter(|gateway| !gateway.is_empty()),
            fallback_gateways: self
                .fallback_gateways
                .into_iter()
                .map(|gateway| gateway.trim().trim_end_matches('/').to_string())
                .filter(|gateway| !gateway.is_empty())
                .collect(),
            file_rules: FileRules {
                max_size_bytes: self.max_file_size_bytes,
                allowed_types: self.allowed_types,
            },
            request_timeout_ms: self.request_timeout_ms,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PinningConfig {
    pub jwt: Option<String>,
    pub upload_url: String,
    pub gateway: Option<String>,
    pub fallback_gateways: Vec<String>,
    pub file_rules: FileRules,
    pub request_timeout_ms: u64,
}

impl Default for PinningConfigRaw {
    fn default() -> Self {
        let rules = FileRules::default();
        Self {
            jwt: None,
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            gateway: None,
            fallback_gateways: PUBLIC_GATEWAYS.iter().map(|gateway| gateway.to_string()).collect(),
            max_file_size_bytes: rules.max_size_bytes,
            allowed_types: rules.allowed_types,
            request_timeout_ms: 60_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve() {
        let config = PinningConfigRaw::default().resolve().unwrap();
        assert!(config.jwt.is_none());
        assert_eq!(config.file_rules.max_size_bytes, 10 * 1024 * 1024);
        assert_eq!(config.fallback_gateways.len(), PUBLIC_GATEWAYS.len());
    }

    #[test]
    fn gateway_is_trimmed_and_blank_jwt_dropped() {
        let raw = PinningConfigRaw {
            jwt: Some("  ".to_string()),
            gateway: Some("https://example.mypinata.cloud/".to_string()),
            ..PinningConfigRaw::default()
        };
        let config = raw.resolve().unwrap();
        assert!(config.jwt.is_none());
        assert_eq!(
            config.gateway.as_deref(),
            Some("https://example.mypinata.cloud")
        );
    }

    #[test]
    fn rejects_empty_type_list() {
        let raw = PinningConfigRaw {
            allowed_types: Vec::new(),
            ..PinningConfigRaw::default()
        };
        assert!(matches!(raw.resolve(), Err(ConfigError::InvalidConfig(_))));
    }
}
