//! Fee market parameters.

use levy_primitives::{Coin, Dec};
use serde::{Deserialize, Serialize};

use crate::FeeMarketError;

/// Default additive increase of the learning rate, `0.025`.
pub const DEFAULT_ALPHA: Dec = Dec::from_raw_u64(25_000_000_000_000_000);

/// Default multiplicative decrease of the learning rate, `0.95`.
pub const DEFAULT_BETA: Dec = Dec::from_raw_u64(950_000_000_000_000_000);

/// Default multiplicative increase of the learning rate, `0.25`.
pub const DEFAULT_GAMMA: Dec = Dec::from_raw_u64(250_000_000_000_000_000);

/// Default additive decrease of the learning rate, `0`.
pub const DEFAULT_DELTA: Dec = Dec::ZERO;

/// Default floor of the base gas price, `0.001`.
pub const DEFAULT_MIN_BASE_GAS_PRICE: Dec = Dec::from_raw_u64(1_000_000_000_000_000);

/// Default lower learning rate bound, `0.01`.
pub const DEFAULT_MIN_LEARNING_RATE: Dec = Dec::from_raw_u64(10_000_000_000_000_000);

/// Default upper learning rate bound, `0.50`.
pub const DEFAULT_MAX_LEARNING_RATE: Dec = Dec::from_raw_u64(500_000_000_000_000_000);

/// Fixed learning rate of the EIP-1559 configuration, `0.125`.
pub const EIP1559_LEARNING_RATE: Dec = Dec::from_raw_u64(125_000_000_000_000_000);

/// Default target gas per block.
pub const DEFAULT_MAX_BLOCK_UTILIZATION: u64 = 30_000_000;

/// Default number of blocks averaged by the AIMD configuration.
pub const DEFAULT_WINDOW: u64 = 8;

/// Largest accepted window, in blocks.
pub const MAX_WINDOW: u64 = 10_000;

/// Default fee denomination.
pub const DEFAULT_FEE_DENOM: &str = "ujuno";

/// Governance-controlled fee market parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    /// Additive learning rate increase when over target.
    pub alpha: Dec,
    /// Multiplicative learning rate decrease when under target.
    pub beta: Dec,
    /// Multiplicative learning rate increase when over target.
    pub gamma: Dec,
    /// Additive learning rate decrease when under target.
    pub delta: Dec,
    /// Floor of the base gas price.
    pub min_base_gas_price: Dec,
    /// Lower bound of the learning rate.
    pub min_learning_rate: Dec,
    /// Upper bound of the learning rate.
    pub max_learning_rate: Dec,
    /// Target gas per block.
    pub max_block_utilization: u64,
    /// Number of blocks averaged.
    pub window: u64,
    /// Native fee denomination.
    pub fee_denom: String,
    /// Whether the market prices fees.
    pub enabled: bool,
    /// Whether settled fees go to the distribution module.
    pub distribute_fees: bool,
}

impl Default for Params {
    fn default() -> Self {
        Self::aimd()
    }
}

impl Params {
    /// AIMD configuration averaging several blocks.
    pub fn aimd() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            delta: DEFAULT_DELTA,
            min_base_gas_price: DEFAULT_MIN_BASE_GAS_PRICE,
            min_learning_rate: DEFAULT_MIN_LEARNING_RATE,
            max_learning_rate: DEFAULT_MAX_LEARNING_RATE,
            max_block_utilization: DEFAULT_MAX_BLOCK_UTILIZATION,
            window: DEFAULT_WINDOW,
            fee_denom: DEFAULT_FEE_DENOM.to_string(),
            enabled: true,
            distribute_fees: false,
        }
    }

    /// EIP-1559 configuration: one-block window and a fixed learning rate.
    pub fn eip1559() -> Self {
        Self {
            alpha: Dec::ZERO,
            beta: Dec::ONE,
            gamma: Dec::ZERO,
            delta: Dec::ZERO,
            min_learning_rate: EIP1559_LEARNING_RATE,
            max_learning_rate: EIP1559_LEARNING_RATE,
            window: 1,
            ..Self::aimd()
        }
    }

    /// Checks the parameter invariants.
    pub fn validate(&self) -> Result<(), FeeMarketError> {
        let invalid = |reason: &str| Err(FeeMarketError::InvalidParams(reason.to_string()));
        if self.window == 0 {
            return invalid("window must be greater than 0");
        }
        if self.window > MAX_WINDOW {
            return invalid("window exceeds maximum");
        }
        if self.beta > Dec::ONE {
            return invalid("beta must be at most 1");
        }
        if self.min_learning_rate > self.max_learning_rate {
            return invalid("min learning rate must not exceed max learning rate");
        }
        if self.max_block_utilization == 0 {
            return invalid("max block utilization must be greater than 0");
        }
        Coin::zero(self.fee_denom.as_str())
            .validate()
            .map_err(|err| FeeMarketError::InvalidParams(err.to_string()))
    }
}
