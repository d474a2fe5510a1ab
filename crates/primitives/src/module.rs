//! Well-known module accounts.

use alloy_primitives::{Address, keccak256};

/// Module account that receives escrowed transaction fees.
pub const FEE_COLLECTOR: &str = "fee_collector";

/// Module account that receives settled fees when distribution is enabled.
pub const DISTRIBUTION: &str = "distribution";

/// Module account pooling sponsor funds for gasless contract calls.
pub const FEEPAY: &str = "feepay";

/// Fee market module name.
pub const FEEMARKET: &str = "feemarket";

/// Governance module name, whose account is the default parameter authority.
pub const GOVERNANCE: &str = "gov";

/// Derives the deterministic account address of a module.
///
/// The address is the last 20 bytes of `keccak256(name)`.
pub fn module_address(name: &str) -> Address {
    let hash = keccak256(name.as_bytes());
    Address::from_slice(&hash[12..])
}
