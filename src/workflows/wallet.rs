use std::fmt;

use pq_domain::Address;

/// The connected account a workflow acts for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletContext {
    pub address: Address,
}

impl WalletContext {
    pub fn new(address: Address) -> Self {
        Self { address }
    }
}

impl fmt::Display for WalletContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}
