//! Top-level node configuration.

use std::path::Path;

use levy_primitives::{Address, GOVERNANCE, module_address};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, FeeConfig, FeePayConfig};

/// Default chain identifier.
pub const DEFAULT_CHAIN_ID: &str = "levy-1";

/// Complete node configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeConfig {
    /// Chain identifier.
    #[serde(default = "default_chain_id")]
    pub chain_id: String,

    /// Address allowed to update module parameters.
    #[serde(default = "default_authority")]
    pub authority: Address,

    /// Fee admission settings.
    #[serde(default)]
    pub fees: FeeConfig,

    /// Fee sponsorship settings.
    #[serde(default)]
    pub feepay: FeePayConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            chain_id: DEFAULT_CHAIN_ID.to_string(),
            authority: default_authority(),
            fees: FeeConfig::default(),
            feepay: FeePayConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Loads and validates a configuration file.
    ///
    /// The format is chosen by extension: `.toml` or `.json`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let config: Self = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents)?,
            Some("json") => serde_json::from_str(&contents)?,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml()?)
            .map_err(|source| ConfigError::Write { path: path.to_path_buf(), source })
    }

    /// Validates every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chain_id.trim().is_empty() {
            return Err(ConfigError::EmptyChainId);
        }
        self.fees.validate()?;
        self.feepay.validate()
    }
}

fn default_chain_id() -> String {
    DEFAULT_CHAIN_ID.to_string()
}

fn default_authority() -> Address {
    module_address(GOVERNANCE)
}
