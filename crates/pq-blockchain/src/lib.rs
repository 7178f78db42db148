mod chain;
mod config;
mod config_error;
mod contract_events;
mod contracts;
mod error;
mod error_classification;
mod provider;
mod quest_contract;
mod rpc_executor;
mod rpc_rate_limiter;
mod utils;
mod wallets;

pub use chain::{EvmChain, MAXIMUM_NUMBERS_OF_BLOCKS_TO_FETCH};
pub use config::{BlockchainConfig, BlockchainConfigRaw};
pub use config_error::ConfigError;
pub use contract_events::{
    ContractEvent, ContractLog, LogMeta, decode_contract_event, decode_contract_log,
    monitored_contract_events,
};
pub use contracts::PhotoQuest;
pub use error::BlockchainError;
pub use quest_contract::{CreatedQuest, NewQuest, QuestContract, TransactionOutcome};
pub use utils::{format_wei_as_ether, parse_ether_to_wei};
pub use wallets::signer_from_private_key;

pub use alloy::{
    primitives::{Address, B256, U256},
    rpc::types::Log,
};
pub use pq_domain::BlockchainId;
