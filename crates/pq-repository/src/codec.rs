//! Column encodings: addresses as lowercase `0x` hex, uint256 event
//! parameters as decimal strings, block metadata as signed 64-bit integers.

use pq_domain::{Address, B256, QuestId, U256};

use crate::error::{RepositoryError, Result};

pub(crate) fn address_to_db(address: &Address) -> String {
    format!("{address:#x}")
}

pub(crate) fn address_from_db(column: &'static str, value: &str) -> Result<Address> {
    value.parse().map_err(|_| RepositoryError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

pub(crate) fn addresses_to_db(addresses: &[Address]) -> String {
    let encoded: Vec<String> = addresses.iter().map(address_to_db).collect();
    serde_json::Value::from(encoded).to_string()
}

pub(crate) fn addresses_from_db(column: &'static str, value: &str) -> Result<Vec<Address>> {
    let raw: Vec<String> =
        serde_json::from_str(value).map_err(|_| RepositoryError::InvalidValue {
            column,
            value: value.to_string(),
        })?;
    raw.iter()
        .map(|address| address_from_db(column, address))
        .collect()
}

pub(crate) fn hash_to_db(hash: &B256) -> String {
    format!("{hash:#x}")
}

pub(crate) fn hash_from_db(column: &'static str, value: &str) -> Result<B256> {
    value.parse().map_err(|_| RepositoryError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

pub(crate) fn amount_to_db(amount: &U256) -> String {
    amount.to_string()
}

pub(crate) fn amount_from_db(column: &'static str, value: &str) -> Result<U256> {
    U256::from_str_radix(value, 10).map_err(|_| RepositoryError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

pub(crate) fn u64_to_db(column: &'static str, value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| RepositoryError::OutOfRange {
        column,
        value: value.to_string(),
    })
}

pub(crate) fn u64_from_db(value: i64) -> u64 {
    value.max(0) as u64
}

pub(crate) fn quest_id_to_db(quest_id: QuestId) -> Result<i64> {
    u64_to_db("quest_id", quest_id.get())
}

pub(crate) fn quest_ids_to_db(quest_ids: &[QuestId]) -> Result<Vec<i64>> {
    quest_ids.iter().copied().map(quest_id_to_db).collect()
}

pub(crate) fn quest_id_from_db(value: i64) -> QuestId {
    QuestId::new(u64_from_db(value))
}
