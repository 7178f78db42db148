use alloy::{
    contract::Error as ContractError,
    signers::local::LocalSignerError,
    transports::{RpcError, TransportErrorKind},
};

use crate::error_classification::{decode_revert_reason_lossy, is_revert};

#[derive(Debug, thiserror::Error)]
pub enum BlockchainError {
    /// The chain could not be reached after retries. Never means "no data".
    #[error("Blockchain unavailable during {operation}: {reason}")]
    Unavailable { operation: String, reason: String },

    /// The contract rejected the call.
    #[error("Transaction reverted: {reason}")]
    Reverted { reason: String },

    #[error("Contract error: {0}")]
    Contract(ContractError),

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("Invalid private key (length: {key_length})")]
    InvalidPrivateKey {
        key_length: usize,
        #[source]
        source: LocalSignerError,
    },

    #[error("RPC connection failed after trying {attempts} endpoint(s)")]
    RpcConnectionFailed { attempts: usize },

    #[error("Failed to get logs: {reason}")]
    GetLogs {
        reason: String,
        #[source]
        source: Option<RpcError<TransportErrorKind>>,
    },

    #[error("Failed to get block number: {reason}")]
    GetBlockNumber {
        reason: String,
        #[source]
        source: Option<RpcError<TransportErrorKind>>,
    },

    #[error("Transaction receipt failed: {reason}")]
    ReceiptFailed { reason: String },

    #[error("Receipt for {transaction_hash} has no {event} event")]
    MissingEvent {
        event: &'static str,
        transaction_hash: String,
    },

    #[error("No wallet configured; {operation} requires a signer")]
    WalletRequired { operation: &'static str },

    #[error("Sender {sender} does not match the configured wallet {wallet}")]
    WalletMismatch { sender: String, wallet: String },

    #[error("Contract returned an out-of-range {field}: {value}")]
    OutOfRange { field: &'static str, value: String },

    #[error("Provider initialization failed: {reason}")]
    ProviderInit { reason: String },
}

impl BlockchainError {
    pub(crate) fn get_logs(err: RpcError<TransportErrorKind>) -> Self {
        Self::GetLogs {
            reason: err.to_string(),
            source: Some(err),
        }
    }

    pub(crate) fn get_block_number(err: RpcError<TransportErrorKind>) -> Self {
        Self::GetBlockNumber {
            reason: err.to_string(),
            source: Some(err),
        }
    }

    pub(crate) fn unavailable(operation: &str, err: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            operation: operation.to_string(),
            reason: err.to_string(),
        }
    }

    /// Sorts a contract error into revert, unavailability or anything else.
    pub(crate) fn from_contract(operation: &str, err: ContractError) -> Self {
        if is_revert(&err) {
            let reason = decode_revert_reason_lossy(&err)
                .unwrap_or_else(|| "execution reverted".to_string());
            return Self::Reverted { reason };
        }

        match err {
            ContractError::TransportError(inner) => Self::unavailable(operation, inner),
            other => Self::Contract(other),
        }
    }

    /// True for failures that mean "could not ask", as opposed to a definite answer.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. }
                | Self::RpcConnectionFailed { .. }
                | Self::GetLogs { .. }
                | Self::GetBlockNumber { .. }
                | Self::ProviderInit { .. }
        )
    }
}
