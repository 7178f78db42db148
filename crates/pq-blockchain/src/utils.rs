use alloy::primitives::{
    U256,
    utils::{format_ether, parse_ether},
};

/// Wei to a decimal ether string, e.g. `500000000000000000` -> `"0.500000000000000000"`.
pub fn format_wei_as_ether(wei: U256) -> String {
    format_ether(wei)
}

pub fn parse_ether_to_wei(amount: &str) -> Result<U256, String> {
    parse_ether(amount.trim()).map_err(|e| e.to_string())
}
