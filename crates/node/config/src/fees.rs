//! Fee admission configuration.

use levy_primitives::DecCoin;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default maximum nesting of authorization exec messages that is unwrapped.
pub const DEFAULT_MAX_UNWRAP_DEPTH: usize = 5;

/// Default gas charged in simulation for the settlement bank sends.
pub const DEFAULT_SIMULATION_BANK_SEND_GAS: u64 = 12_490;

/// Fee admission configuration local to this validator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeeConfig {
    /// Minimum gas prices, comma separated (e.g. `"0.001ujuno,0.05uatom"`).
    ///
    /// Only enforced in CheckTx while the fee market is disabled.
    #[serde(default)]
    pub min_gas_prices: String,

    /// Maximum depth of nested authorization exec messages.
    #[serde(default = "default_max_unwrap_depth")]
    pub max_unwrap_depth: usize,

    /// Extra gas consumed by settlement when simulating.
    #[serde(default = "default_simulation_bank_send_gas")]
    pub simulation_bank_send_gas: u64,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            min_gas_prices: String::new(),
            max_unwrap_depth: DEFAULT_MAX_UNWRAP_DEPTH,
            simulation_bank_send_gas: DEFAULT_SIMULATION_BANK_SEND_GAS,
        }
    }
}

impl FeeConfig {
    /// Parses the configured minimum gas prices, sorted by denom.
    pub fn parsed_min_gas_prices(&self) -> Result<Vec<DecCoin>, ConfigError> {
        let mut prices = self
            .min_gas_prices
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                entry.parse::<DecCoin>().map_err(|source| ConfigError::InvalidMinGasPrice {
                    value: entry.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        prices.sort_by(|a, b| a.denom.cmp(&b.denom));
        Ok(prices)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_unwrap_depth == 0 {
            return Err(ConfigError::InvalidUnwrapDepth(self.max_unwrap_depth));
        }
        self.parsed_min_gas_prices().map(|_| ())
    }
}

const fn default_max_unwrap_depth() -> usize {
    DEFAULT_MAX_UNWRAP_DEPTH
}

const fn default_simulation_bank_send_gas() -> u64 {
    DEFAULT_SIMULATION_BANK_SEND_GAS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fee_config() {
        let config = FeeConfig::default();
        assert_eq!(config.max_unwrap_depth, DEFAULT_MAX_UNWRAP_DEPTH);
        assert_eq!(config.simulation_bank_send_gas, 12_490);
        assert!(config.parsed_min_gas_prices().unwrap().is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn test_min_gas_prices_parse_sorted() {
        let config =
            FeeConfig { min_gas_prices: "0.05uosmo, 0.001ujuno".to_string(), ..Default::default() };
        let prices = config.parsed_min_gas_prices().unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].denom, "ujuno");
        assert_eq!(prices[1].amount, "0.05".parse().unwrap());
    }

    #[test]
    fn test_invalid_min_gas_price_rejected() {
        let config = FeeConfig { min_gas_prices: "cheap".to_string(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidMinGasPrice { .. })));
    }

    #[test]
    fn test_zero_unwrap_depth_rejected() {
        let config = FeeConfig { max_unwrap_depth: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUnwrapDepth(0))));
    }

    #[test]
    fn test_fee_config_serde_defaults() {
        let config: FeeConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, FeeConfig::default());
    }
}
