use std::time::Duration;

use alloy::{primitives::Address, signers::local::PrivateKeySigner};
use pq_domain::BlockchainId;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Connection settings for the chain hosting the quest contract.
///
/// **Secret handling**: the wallet key should be provided via configuration
/// (resolved at config load time) or environment variable:
/// - `PQ_WALLET_PRIVATE_KEY` - signer for quest writes (optional; reads work without it)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockchainConfigRaw {
    /// Format: "chaintype:chainid" (e.g., "hardhat:31337", "base:8453").
    pub blockchain_id: BlockchainId,

    /// Address of the deployed quest contract.
    pub contract_address: String,

    /// Block the contract was deployed at. Indexing starts here on an empty store.
    #[serde(default)]
    pub start_block: u64,

    /// HTTP or WebSocket endpoints. Extra entries are fallbacks.
    #[serde(default)]
    pub rpc_endpoints: Vec<String>,

    pub wallet_private_key: Option<String>,

    /// Maximum RPC requests per second. `None` means unlimited.
    pub max_rpc_requests_per_second: Option<u32>,

    /// Confirmations to wait for when fetching transaction receipts.
    pub tx_confirmations: u64,

    /// Receipt wait timeout in milliseconds. 0 disables the timeout.
    pub tx_receipt_timeout_ms: u64,
}

impl BlockchainConfigRaw {
    pub fn ensure_rpc_endpoints(&self) -> Result<(), ConfigError> {
        if self.rpc_endpoints.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "rpc_endpoints must include at least one endpoint".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ensure_max_rpc_requests_per_second(&self) -> Result<(), ConfigError> {
        if self.max_rpc_requests_per_second == Some(0) {
            return Err(ConfigError::InvalidConfig(
                "max_rpc_requests_per_second must be greater than 0 when set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn ensure_blockchain_id(&self) -> Result<(), ConfigError> {
        if self.blockchain_id.chain_id().is_none() {
            return Err(ConfigError::InvalidConfig(format!(
                "invalid blockchain_id '{}': expected 'chaintype:chainid' (e.g., 'hardhat:31337')",
                self.blockchain_id
            )));
        }
        Ok(())
    }

    pub fn resolve(self) -> Result<BlockchainConfig, ConfigError> {
        self.ensure_blockchain_id()?;
        self.ensure_rpc_endpoints()?;
        self.ensure_max_rpc_requests_per_second()?;

        let contract_address = parse_evm_address(&self.contract_address)?;

        let wallet_private_key = self
            .wallet_private_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let wallet_address = wallet_private_key
            .as_deref()
            .map(derive_evm_address_from_private_key)
            .transpose()?;

        Ok(BlockchainConfig {
            blockchain_id: self.blockchain_id,
            contract_address,
            start_block: self.start_block,
            rpc_endpoints: self.rpc_endpoints,
            wallet_private_key,
            wallet_address,
            max_rpc_requests_per_second: self.max_rpc_requests_per_second,
            tx_confirmations: self.tx_confirmations,
            tx_receipt_timeout_ms: self.tx_receipt_timeout_ms,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BlockchainConfig {
    blockchain_id: BlockchainId,
    contract_address: Address,
    start_block: u64,
    rpc_endpoints: Vec<String>,
    wallet_private_key: Option<String>,
    wallet_address: Option<Address>,
    max_rpc_requests_per_second: Option<u32>,
    tx_confirmations: u64,
    tx_receipt_timeout_ms: u64,
}

impl BlockchainConfig {
    pub fn blockchain_id(&self) -> &BlockchainId {
        &self.blockchain_id
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    pub fn start_block(&self) -> u64 {
        self.start_block
    }

    pub fn rpc_endpoints(&self) -> &[String] {
        &self.rpc_endpoints
    }

    pub fn wallet_private_key(&self) -> Option<&str> {
        self.wallet_private_key.as_deref()
    }

    /// Address derived from the configured key.
    pub fn wallet_address(&self) -> Option<Address> {
        self.wallet_address
    }

    pub fn max_rpc_requests_per_second(&self) -> Option<u32> {
        self.max_rpc_requests_per_second
    }

    pub fn tx_confirmations(&self) -> u64 {
        self.tx_confirmations
    }

    pub fn tx_receipt_timeout(&self) -> Option<Duration> {
        if self.tx_receipt_timeout_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.tx_receipt_timeout_ms))
        }
    }
}

fn parse_evm_address(value: &str) -> Result<Address, ConfigError> {
    value
        .parse::<Address>()
        .map_err(|e| ConfigError::InvalidConfig(format!("invalid EVM address '{}': {}", value, e)))
}

fn derive_evm_address_from_private_key(private_key: &str) -> Result<Address, ConfigError> {
    let signer: PrivateKeySigner = private_key
        .parse()
        .map_err(|e| ConfigError::InvalidConfig(format!("invalid EVM private key: {}", e)))?;
    Ok(signer.address())
}
