use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct HttpApiConfig {
    /// Whether the HTTP API server is enabled. Defaults to true.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub port: u16,
}

fn default_enabled() -> bool {
    true
}
