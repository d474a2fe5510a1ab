//! Sponsorship records.

use levy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Largest accepted per-wallet limit.
pub const MAX_WALLET_LIMIT: u64 = 1_000_000;

/// A contract sponsoring its callers' fees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePayContract {
    /// Sponsoring contract.
    pub contract_address: Address,
    /// Prepaid balance in the bond denom.
    pub balance: U256,
    /// Sponsored calls allowed per wallet.
    pub wallet_limit: u64,
}

/// Sponsored calls made by a wallet on a contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePayWalletUsage {
    /// Sponsoring contract.
    pub contract_address: Address,
    /// Calling wallet.
    pub wallet_address: Address,
    /// Sponsored calls so far.
    pub uses: u64,
}

/// Module params.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePayParams {
    /// Whether sponsored transactions are accepted.
    pub enable_feepay: bool,
}

impl Default for FeePayParams {
    fn default() -> Self {
        Self { enable_feepay: true }
    }
}
