use serde::Serialize;

/// Indexer and dependency health, for operators.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StatusResponse {
    pub blockchain_id: String,
    pub contract_address: String,
    /// `None` when the chain could not be reached.
    pub head_block: Option<u64>,
    /// Last block the listener has fully indexed.
    pub indexed_block: Option<u64>,
    pub lag_blocks: Option<u64>,
    pub store_healthy: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}
