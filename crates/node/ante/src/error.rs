//! Admission error types.

use levy_domain::{BankError, FeeGrantError, UnwrapError};
use levy_feemarket::FeeMarketError;
use levy_feepay::FeePayError;
use levy_primitives::{Address, Coins, DecError};
use levy_traits::StoreError;
use thiserror::Error;

/// Codespace of admission errors.
pub const CODESPACE: &str = "ante";

const FEEGRANT_CODESPACE: &str = "feegrant";

/// Reasons a transaction is rejected at admission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnteError {
    /// Zero gas limit outside simulation.
    #[error("invalid gas limit: must provide positive gas")]
    InvalidGasLimit,

    /// No fee coin was declared.
    #[error("no fee coins provided")]
    NoFeeCoins,

    /// More than one fee denom was declared.
    #[error("too many fee coins: expected one, got {0}")]
    TooManyFeeCoins(usize),

    /// The declared fee is below the required fee.
    #[error("insufficient fee: got {got}, required {required}")]
    InsufficientFee {
        /// Declared fee.
        got: Coins,
        /// Required fee.
        required: Coins,
    },

    /// A bank transfer failed, usually for lack of funds.
    #[error("insufficient funds: {0}")]
    Bank(#[from] BankError),

    /// The paying account does not exist.
    #[error("fee payer address {0} does not exist")]
    UnknownAddress(Address),

    /// The fee grant could not pay.
    #[error(transparent)]
    FeeGrant(#[from] FeeGrantError),

    /// The sponsorship ledger refused.
    #[error(transparent)]
    FeePay(#[from] FeePayError),

    /// The fee market could not price the transaction.
    #[error(transparent)]
    FeeMarket(#[from] FeeMarketError),

    /// Authorization exec messages are nested too deep.
    #[error(transparent)]
    UnwrapDepthExceeded(#[from] UnwrapError),

    /// Both the sponsored and the standard route failed.
    #[error("failed to deduct fees: sponsored route: {sponsored}; standard route: {standard}")]
    DeductFeesFailed {
        /// Error of the sponsored route.
        sponsored: Box<AnteError>,
        /// Error of the standard route.
        standard: Box<AnteError>,
    },

    /// Fee arithmetic failed.
    #[error("fee arithmetic: {0}")]
    Math(#[from] DecError),

    /// Store access failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AnteError {
    /// Stable machine-readable code within [`AnteError::codespace`].
    pub const fn code(&self) -> u32 {
        match self {
            Self::InvalidGasLimit => 1,
            Self::NoFeeCoins => 2,
            Self::TooManyFeeCoins(_) => 3,
            Self::InsufficientFee { .. } => 4,
            Self::Bank(BankError::InsufficientFunds { .. }) => 5,
            Self::Bank(_) => 11,
            Self::UnknownAddress(_) => 6,
            Self::UnwrapDepthExceeded(_) => 7,
            Self::DeductFeesFailed { .. } => 8,
            Self::Math(_) => 9,
            Self::Store(_) => 10,
            Self::FeeGrant(FeeGrantError::NotFound { .. }) => 1,
            Self::FeeGrant(FeeGrantError::FeeLimitExceeded { .. }) => 2,
            Self::FeeGrant(FeeGrantError::MessageNotAllowed(_)) => 3,
            Self::FeeGrant(FeeGrantError::Store(_)) => 4,
            Self::FeePay(err) => err.code(),
            Self::FeeMarket(err) => err.code(),
        }
    }

    /// Codespace the code belongs to.
    pub const fn codespace(&self) -> &'static str {
        match self {
            Self::FeeGrant(_) => FEEGRANT_CODESPACE,
            Self::FeePay(err) => err.codespace(),
            Self::FeeMarket(err) => err.codespace(),
            _ => CODESPACE,
        }
    }
}
