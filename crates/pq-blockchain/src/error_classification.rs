use std::time::Duration;

use alloy::{
    contract::Error as ContractError,
    hex,
    primitives::Bytes,
    providers::PendingTransactionError,
    sol_types::decode_revert_reason,
    transports::{RpcError, TransportErrorKind},
};

pub fn is_retryable_rpc_error(err: &RpcError<TransportErrorKind>) -> bool {
    match err {
        RpcError::Transport(kind) => match kind {
            TransportErrorKind::MissingBatchResponse(_) => true,
            TransportErrorKind::BackendGone => true,
            TransportErrorKind::HttpError(http) => {
                http.is_rate_limit_err() || http.is_temporarily_unavailable()
            }
            TransportErrorKind::Custom(custom) => {
                let msg = custom.to_string().to_ascii_lowercase();
                msg.contains("too many requests")
                    || msg.contains("rate limit")
                    || msg.contains("connection")
                    || msg.contains("timed out")
            }
            _ => false,
        },
        RpcError::ErrorResp(payload) => payload.is_retry_err(),
        RpcError::NullResp => true,
        RpcError::DeserError { text, .. } => {
            let lowered = text.to_ascii_lowercase();
            lowered.contains("rate limit") || lowered.contains("too many requests")
        }
        _ => false,
    }
}

/// Some providers return `{ "rate": { "backoff_seconds": n } }` in the error data.
pub fn rpc_backoff_hint(err: &RpcError<TransportErrorKind>) -> Option<Duration> {
    let RpcError::ErrorResp(payload) = err else {
        return None;
    };

    let data = payload.try_data_as::<serde_json::Value>()?;
    let Ok(data) = data else {
        return None;
    };

    let backoff_seconds = data["rate"]["backoff_seconds"].as_f64()?;
    Some(Duration::from_secs(backoff_seconds.ceil() as u64))
}

fn is_retryable_pending_tx_error(err: &PendingTransactionError) -> bool {
    match err {
        PendingTransactionError::TransportError(inner) => is_retryable_rpc_error(inner),
        _ => false,
    }
}

pub fn is_retryable_contract_error(err: &ContractError) -> bool {
    if is_revert(err) {
        return false;
    }

    match err {
        ContractError::TransportError(inner) => is_retryable_rpc_error(inner),
        ContractError::PendingTransactionError(inner) => is_retryable_pending_tx_error(inner),
        _ => false,
    }
}

pub fn contract_error_backoff_hint(err: &ContractError) -> Option<Duration> {
    match err {
        ContractError::TransportError(inner) => rpc_backoff_hint(inner),
        ContractError::PendingTransactionError(PendingTransactionError::TransportError(inner)) => {
            rpc_backoff_hint(inner)
        }
        _ => None,
    }
}

/// The node answered and the contract said no.
pub fn is_revert(err: &ContractError) -> bool {
    if err.as_revert_data().is_some() {
        return true;
    }

    match err {
        ContractError::TransportError(RpcError::ErrorResp(payload)) => {
            payload.message.to_ascii_lowercase().contains("revert")
        }
        _ => false,
    }
}

fn spelunk_hex_revert(value: &serde_json::Value) -> Option<Bytes> {
    match value {
        serde_json::Value::String(s) => s.parse().ok(),
        serde_json::Value::Object(o) => o.values().find_map(spelunk_hex_revert),
        _ => None,
    }
}

fn extract_revert_data_lossy(err: &ContractError) -> Option<Bytes> {
    if let Some(data) = err.as_revert_data() {
        return Some(data);
    }

    let ContractError::TransportError(transport) = err else {
        return None;
    };

    let payload = transport.as_error_resp()?;
    let raw = payload.data.as_ref()?;
    let s = raw.get().trim();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(s)
        && let Some(bytes) = spelunk_hex_revert(&value)
    {
        return Some(bytes);
    }

    s.trim_matches('"').parse().ok()
}

/// Human-readable revert reason, falling back to the provider's message.
pub fn decode_revert_reason_lossy(err: &ContractError) -> Option<String> {
    if let Some(revert_data) = extract_revert_data_lossy(err) {
        if let Some(reason) = decode_revert_reason(&revert_data) {
            return Some(reason);
        }
        if revert_data.len() >= 4 {
            return Some(format!(
                "custom error 0x{}",
                hex::encode(&revert_data[..4])
            ));
        }
    }

    match err {
        ContractError::TransportError(RpcError::ErrorResp(payload)) => {
            Some(payload.message.to_string())
        }
        _ => None,
    }
}
