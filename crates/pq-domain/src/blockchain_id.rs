use serde::{Deserialize, Serialize};

/// Identifier of the chain a quest contract is deployed on.
///
/// Format: "chaintype:chainid" (e.g., "hardhat:31337", "base:8453", "base-sepolia:84532").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct BlockchainId(String);

impl BlockchainId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric chain id parsed from the suffix, e.g. "base:8453" -> 8453.
    pub fn chain_id(&self) -> Option<u64> {
        self.0.split_once(':').and_then(|(_, id)| id.parse().ok())
    }

    /// True for local development chains.
    pub fn is_development_chain(&self) -> bool {
        matches!(
            self.0.split_once(':').map(|(kind, _)| kind),
            Some("hardhat" | "anvil" | "localhost")
        )
    }
}

impl std::fmt::Display for BlockchainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BlockchainId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BlockchainId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
