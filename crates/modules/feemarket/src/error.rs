//! Fee market error types.

use levy_domain::ResolverError;
use levy_primitives::{Address, DecError};
use levy_traits::StoreError;
use thiserror::Error;

/// Codespace of fee market errors.
pub const CODESPACE: &str = "feemarket";

/// Errors returned by the fee market keeper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeMarketError {
    /// Parameters failed validation.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// State failed validation.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// The state window length differs from the configured window.
    #[error("window length mismatch: params window {params}, state window {state}")]
    WindowMismatch {
        /// `Params.window`.
        params: u64,
        /// `len(State.window)`.
        state: usize,
    },

    /// The message signer is not the governance authority.
    #[error("invalid authority: expected {expected}, got {got}")]
    InvalidAuthority {
        /// Configured authority.
        expected: Address,
        /// Message signer.
        got: Address,
    },

    /// Params have not been initialized.
    #[error("fee market params not found")]
    ParamsNotFound,

    /// State has not been initialized.
    #[error("fee market state not found")]
    StateNotFound,

    /// Denom conversion failed.
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Store access failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Decimal arithmetic failed.
    #[error("fee market arithmetic: {0}")]
    Math(#[from] DecError),
}

impl FeeMarketError {
    /// Stable machine-readable code within [`CODESPACE`].
    pub const fn code(&self) -> u32 {
        match self {
            Self::InvalidParams(_) => 2,
            Self::InvalidState(_) => 3,
            Self::WindowMismatch { .. } => 4,
            Self::InvalidAuthority { .. } => 5,
            Self::ParamsNotFound => 6,
            Self::StateNotFound => 7,
            Self::Resolver(_) => 8,
            Self::Store(_) => 9,
            Self::Math(_) => 10,
        }
    }

    /// Codespace of the error.
    pub const fn codespace(&self) -> &'static str {
        CODESPACE
    }
}
