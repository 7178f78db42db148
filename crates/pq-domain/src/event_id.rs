use alloy::primitives::{B256, hex};
use serde::{Deserialize, Serialize};

/// Identifier of an indexed event record.
///
/// The transaction hash bytes followed by the log index as a 4-byte
/// little-endian integer, hex encoded with a `0x` prefix. Unique per log,
/// so two events emitted by one transaction never collide.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn from_log(transaction_hash: B256, log_index: u64) -> Self {
        let index = u32::try_from(log_index).unwrap_or(u32::MAX);
        let mut bytes = Vec::with_capacity(36);
        bytes.extend_from_slice(transaction_hash.as_slice());
        bytes.extend_from_slice(&index.to_le_bytes());
        Self(hex::encode_prefixed(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_little_endian_log_index() {
        let id = EventId::from_log(B256::repeat_byte(0xab), 1);
        let expected = format!("0x{}01000000", "ab".repeat(32));
        assert_eq!(id.as_str(), expected);
    }

    #[test]
    fn same_transaction_different_logs_get_distinct_ids() {
        let tx = B256::repeat_byte(0x11);
        assert_ne!(EventId::from_log(tx, 0), EventId::from_log(tx, 1));
        assert_eq!(EventId::from_log(tx, 3), EventId::from_log(tx, 3));
    }
}
