//! Settlement error types.

use levy_domain::{BankError, OutOfGas};
use levy_feemarket::FeeMarketError;
use levy_primitives::{Coin, DecError};
use levy_traits::StoreError;
use thiserror::Error;

/// Codespace of settlement errors.
pub const CODESPACE: &str = "post";

/// Reasons settlement fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PostError {
    /// The true cost exceeds the escrowed fee.
    #[error("insufficient funds: escrowed {reserved}, true cost {required}")]
    InsufficientFunds {
        /// Fee escrowed at admission.
        reserved: Coin,
        /// Cost of the gas actually used.
        required: Coin,
    },

    /// Settlement gas exceeded the limit.
    #[error(transparent)]
    OutOfGas(#[from] OutOfGas),

    /// A bank transfer failed.
    #[error(transparent)]
    Bank(#[from] BankError),

    /// The fee market could not price the transaction.
    #[error(transparent)]
    FeeMarket(#[from] FeeMarketError),

    /// Fee arithmetic failed.
    #[error("settlement arithmetic: {0}")]
    Math(#[from] DecError),

    /// Store access failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl PostError {
    /// Stable machine-readable code within [`PostError::codespace`].
    pub const fn code(&self) -> u32 {
        match self {
            Self::InsufficientFunds { .. } => 1,
            Self::OutOfGas(_) => 2,
            Self::Bank(_) => 3,
            Self::Math(_) => 4,
            Self::Store(_) => 5,
            Self::FeeMarket(err) => err.code(),
        }
    }

    /// Codespace the code belongs to.
    pub const fn codespace(&self) -> &'static str {
        match self {
            Self::FeeMarket(err) => err.codespace(),
            _ => CODESPACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortfall_display() {
        let err = PostError::InsufficientFunds {
            reserved: Coin::new("ujuno", 100u64),
            required: Coin::new("ujuno", 150u64),
        };
        assert_eq!(err.to_string(), "insufficient funds: escrowed 100ujuno, true cost 150ujuno");
        assert_eq!((err.codespace(), err.code()), ("post", 1));
    }
}
