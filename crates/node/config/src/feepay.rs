//! Fee sponsorship configuration.

use levy_primitives::Coin;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default staking denomination, in which sponsor balances are held.
pub const DEFAULT_BOND_DENOM: &str = "ujuno";

/// Fee sponsorship configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeePayConfig {
    /// Denomination of sponsor balances and sponsored payments.
    #[serde(default = "default_bond_denom")]
    pub bond_denom: String,
}

impl Default for FeePayConfig {
    fn default() -> Self {
        Self { bond_denom: DEFAULT_BOND_DENOM.to_string() }
    }
}

impl FeePayConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Coin::zero(self.bond_denom.as_str()).validate().map_err(ConfigError::InvalidBondDenom)
    }
}

fn default_bond_denom() -> String {
    DEFAULT_BOND_DENOM.to_string()
}
