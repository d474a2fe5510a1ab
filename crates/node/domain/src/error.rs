//! Errors surfaced by external collaborators.

use levy_primitives::{Address, Coins};
use levy_traits::StoreError;
use thiserror::Error;

/// Bank collaborator failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    /// The sender does not hold the requested amount.
    #[error("insufficient funds: {available} is smaller than {required}")]
    InsufficientFunds {
        /// Amount requested.
        required: Coins,
        /// Amount held in the requested denoms.
        available: Coins,
    },

    /// The named module has no account.
    #[error("unknown module account: {0}")]
    UnknownModule(String),

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fee grant collaborator failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeGrantError {
    /// No allowance exists from granter to grantee.
    #[error("fee-grant not found: granter {granter}, grantee {grantee}")]
    NotFound {
        /// Granting account.
        granter: Address,
        /// Account using the grant.
        grantee: Address,
    },

    /// The allowance cannot cover the fee.
    #[error("fee limit exceeded: {fee} exceeds remaining allowance {remaining}")]
    FeeLimitExceeded {
        /// Requested fee.
        fee: Coins,
        /// Remaining spend limit.
        remaining: Coins,
    },

    /// The allowance does not cover one of the transaction's messages.
    #[error("message type {0} not allowed by fee allowance")]
    MessageNotAllowed(String),

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Denomination resolver failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// No conversion is known for the denom.
    #[error("unsupported denom: {0}")]
    UnsupportedDenom(String),

    /// Conversion arithmetic failed.
    #[error("conversion of {denom} failed: {reason}")]
    Conversion {
        /// Target denom.
        denom: String,
        /// Failure description.
        reason: String,
    },

    /// Underlying store failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Nested authorization exec messages exceed the configured depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("authorization exec nesting exceeds max depth {max_depth}")]
pub struct UnwrapError {
    /// Configured maximum depth.
    pub max_depth: usize,
}

/// Gas consumption exceeded the meter limit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("out of gas in location: {descriptor}; gas wanted: {limit}, gas used: {used}")]
pub struct OutOfGas {
    /// Label of the consuming operation.
    pub descriptor: String,
    /// Meter limit.
    pub limit: u64,
    /// Gas that would have been consumed.
    pub used: u64,
}
