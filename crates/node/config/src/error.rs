//! Configuration error types.

use std::path::PathBuf;

use levy_primitives::CoinError;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to parse JSON configuration.
    #[error("failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Failed to serialize configuration to TOML.
    #[error("failed to serialize config to TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Failed to write file.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path.
        path: PathBuf,
        /// IO error.
        source: std::io::Error,
    },

    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// A minimum gas price entry could not be parsed.
    #[error("invalid minimum gas price {value:?}: {source}")]
    InvalidMinGasPrice {
        /// Offending entry.
        value: String,
        /// Parse failure.
        source: CoinError,
    },

    /// The bond denomination is malformed.
    #[error("invalid bond denom: {0}")]
    InvalidBondDenom(#[source] CoinError),

    /// The authorization unwrap depth must be at least one.
    #[error("max unwrap depth must be at least 1, got {0}")]
    InvalidUnwrapDepth(usize),

    /// The chain identifier is empty.
    #[error("chain id must not be empty")]
    EmptyChainId,
}

#[cfg(test)]
mod tests {
    use std::io::{Error as IoError, ErrorKind};

    use super::*;

    #[test]
    fn test_read_error_display() {
        let err = ConfigError::Read {
            path: PathBuf::from("/etc/levy/node.toml"),
            source: IoError::new(ErrorKind::NotFound, "file not found"),
        };
        let display = err.to_string();
        assert!(display.contains("failed to read config file"));
        assert!(display.contains("/etc/levy/node.toml"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_write_error_display() {
        let err = ConfigError::Write {
            path: PathBuf::from("/var/lib/levy/node.toml"),
            source: IoError::new(ErrorKind::PermissionDenied, "permission denied"),
        };
        let display = err.to_string();
        assert!(display.contains("failed to write"));
        assert!(display.contains("permission denied"));
    }

    #[test]
    fn test_invalid_min_gas_price_display() {
        let source = "ujuno".parse::<levy_primitives::DecCoin>().unwrap_err();
        let err = ConfigError::InvalidMinGasPrice { value: "ujuno".to_string(), source };
        assert!(err.to_string().starts_with("invalid minimum gas price \"ujuno\""));
    }

    #[test]
    fn test_invalid_unwrap_depth_display() {
        let err = ConfigError::InvalidUnwrapDepth(0);
        assert_eq!(err.to_string(), "max unwrap depth must be at least 1, got 0");
    }

    #[test]
    fn test_toml_parse_error_from() {
        let result: Result<toml::Value, _> = toml::from_str("invalid = [unclosed");
        let config_err: ConfigError = result.unwrap_err().into();
        assert!(config_err.to_string().contains("failed to parse TOML config"));
    }

    #[test]
    fn test_json_parse_error_from() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{invalid}");
        let config_err: ConfigError = result.unwrap_err().into();
        assert!(config_err.to_string().contains("failed to parse JSON config"));
    }

    #[test]
    fn test_config_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigError>();
    }
}
