use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// 2.5 %, used when no fee update has been observed.
pub const DEFAULT_PLATFORM_FEE_BPS: u64 = 250;
const BPS_DENOMINATOR: u64 = 10_000;

/// Equal split of a reward across winners, in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardShare {
    pub per_winner: U256,
    /// Wei left over by integer division.
    pub remainder: U256,
    pub winners: u64,
}

impl RewardShare {
    /// `None` when there are no winners.
    pub fn split(total: U256, winners: u64) -> Option<Self> {
        if winners == 0 {
            return None;
        }
        let (per_winner, remainder) = total.div_rem(U256::from(winners));
        Some(Self {
            per_winner,
            remainder,
            winners,
        })
    }
}

/// Platform fee in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFee {
    pub bps: u64,
}

impl Default for PlatformFee {
    fn default() -> Self {
        Self {
            bps: DEFAULT_PLATFORM_FEE_BPS,
        }
    }
}

impl PlatformFee {
    pub fn new(bps: u64) -> Self {
        Self {
            bps: bps.min(BPS_DENOMINATOR),
        }
    }

    pub fn fee_on(&self, amount: U256) -> U256 {
        amount * U256::from(self.bps) / U256::from(BPS_DENOMINATOR)
    }

    pub fn net_of_fee(&self, amount: U256) -> U256 {
        amount.saturating_sub(self.fee_on(amount))
    }
}
