//! Store keys of the fee market module.

/// Singleton params key.
pub const PARAMS_KEY: &[u8] = b"feemarket/params";

/// Singleton state key.
pub const STATE_KEY: &[u8] = b"feemarket/state";

/// Height at which the market was last enabled.
pub const ENABLED_HEIGHT_KEY: &[u8] = b"feemarket/enabled_height";
