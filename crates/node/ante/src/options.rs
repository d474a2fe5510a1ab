//! Validator-local admission options.

use levy_config::{ConfigError, DEFAULT_MAX_UNWRAP_DEPTH, FeeConfig};
use levy_primitives::DecCoin;

/// Admission options resolved from node configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnteOptions {
    /// Minimum gas prices, enforced in CheckTx while the fee market is disabled.
    pub min_gas_prices: Vec<DecCoin>,
    /// Maximum nesting of authorization exec messages.
    pub max_unwrap_depth: usize,
}

impl Default for AnteOptions {
    fn default() -> Self {
        Self { min_gas_prices: Vec::new(), max_unwrap_depth: DEFAULT_MAX_UNWRAP_DEPTH }
    }
}

impl AnteOptions {
    /// Parses options from the fee configuration, failing on malformed prices.
    pub fn from_config(config: &FeeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            min_gas_prices: config.parsed_min_gas_prices()?,
            max_unwrap_depth: config.max_unwrap_depth,
        })
    }
}
