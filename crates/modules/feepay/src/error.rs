//! Fee sponsorship error types.

use levy_domain::BankError;
use levy_primitives::{Address, DecError, U256};
use levy_traits::StoreError;
use thiserror::Error;

/// Codespace of fee sponsorship errors.
pub const CODESPACE: &str = "feepay";

/// Errors returned by the fee sponsorship keeper.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeePayError {
    /// The contract has no sponsorship registration.
    #[error("contract {0} is not registered with the fee pay module")]
    ContractNotRegistered(Address),

    /// The contract is already registered.
    #[error("contract {0} is already registered with the fee pay module")]
    ContractAlreadyRegistered(Address),

    /// The sponsor balance cannot cover the required fee.
    #[error("contract {contract} has insufficient funds: balance {balance}, required {required}")]
    ContractNotEnoughFunds {
        /// Sponsoring contract.
        contract: Address,
        /// Prepaid balance.
        balance: U256,
        /// Required fee.
        required: U256,
    },

    /// The wallet used up its sponsored calls on this contract.
    #[error("wallet {wallet} exceeded usage limit {limit} for contract {contract}")]
    WalletExceededUsageLimit {
        /// Sponsoring contract.
        contract: Address,
        /// Calling wallet.
        wallet: Address,
        /// Per-wallet limit.
        limit: u64,
    },

    /// The sender is not the admin of a contract that has one.
    #[error("sender {sender} is not the admin of contract {contract}")]
    ContractNotAdmin {
        /// Contract.
        contract: Address,
        /// Message sender.
        sender: Address,
    },

    /// The sender is not the creator of a contract without admin.
    #[error("sender {sender} is not the creator of contract {contract}")]
    ContractNotCreator {
        /// Contract.
        contract: Address,
        /// Message sender.
        sender: Address,
    },

    /// The wallet limit is out of range.
    #[error("invalid wallet limit {0}: must be at most {max}", max = crate::MAX_WALLET_LIMIT)]
    InvalidWalletLimit(u64),

    /// Funding is not exactly one coin of the bond denom.
    #[error("invalid fund amount: {0}")]
    InvalidFundAmount(String),

    /// No contract exists at the address.
    #[error("{0} is not a contract")]
    InvalidContract(Address),

    /// Fee sponsorship is disabled.
    #[error("fee pay module is disabled")]
    FeePayDisabled,

    /// The message signer is not the governance authority.
    #[error("invalid authority: expected {expected}, got {got}")]
    InvalidAuthority {
        /// Configured authority.
        expected: Address,
        /// Message signer.
        got: Address,
    },

    /// A bank transfer failed.
    #[error(transparent)]
    Bank(#[from] BankError),

    /// Store access failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Fee arithmetic failed.
    #[error("fee pay arithmetic: {0}")]
    Math(#[from] DecError),
}

impl FeePayError {
    /// Stable machine-readable code within [`CODESPACE`].
    pub const fn code(&self) -> u32 {
        match self {
            Self::ContractNotRegistered(_) => 1,
            Self::ContractAlreadyRegistered(_) => 2,
            Self::ContractNotEnoughFunds { .. } => 4,
            Self::WalletExceededUsageLimit { .. } => 5,
            Self::ContractNotAdmin { .. } => 6,
            Self::ContractNotCreator { .. } => 7,
            Self::InvalidWalletLimit(_) => 8,
            Self::InvalidFundAmount(_) => 9,
            Self::InvalidContract(_) => 10,
            Self::FeePayDisabled => 11,
            Self::InvalidAuthority { .. } => 12,
            Self::Bank(_) => 13,
            Self::Store(_) => 14,
            Self::Math(_) => 15,
        }
    }

    /// Codespace of the error.
    pub const fn codespace(&self) -> &'static str {
        CODESPACE
    }
}
