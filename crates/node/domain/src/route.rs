//! Per-transaction fee route decided at admission.

use levy_primitives::{Address, Coin, Coins};
use serde::{Deserialize, Serialize};

/// How the fee of the current transaction was paid.
///
/// The admission stage records the route on the transaction's
/// [`Context`](crate::Context) and settlement reads it back, so concurrent
/// transactions never share routing state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeRoute {
    /// Genesis transaction, no fee logic ran.
    Genesis,
    /// A registered contract paid from its prepaid balance.
    Sponsored {
        /// Sponsoring contract.
        contract: Address,
        /// Wallet whose usage was counted.
        wallet: Address,
        /// Amount moved from the sponsor pool to the fee collector.
        fee: Coin,
    },
    /// The fee market priced the fee and it was escrowed.
    Standard {
        /// Declared fee payer.
        payer: Address,
        /// Account actually debited; the granter when a fee grant paid.
        deducted_from: Address,
        /// Escrowed amount.
        fee: Coin,
    },
    /// The fee market was disabled and the declared fee was taken as is.
    Legacy {
        /// Account actually debited.
        deducted_from: Address,
        /// Deducted amount.
        fee: Coins,
    },
}

impl FeeRoute {
    /// Short route name for logs and events.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Genesis => "genesis",
            Self::Sponsored { .. } => "sponsored",
            Self::Standard { .. } => "standard",
            Self::Legacy { .. } => "legacy",
        }
    }

    /// True for the sponsored route.
    pub const fn is_sponsored(&self) -> bool {
        matches!(self, Self::Sponsored { .. })
    }
}
