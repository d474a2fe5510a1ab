//! Fee-bearing transactions.

use levy_primitives::{Address, Coins};
use serde::{Deserialize, Serialize};

use crate::{Msg, UnwrapError, flatten_msgs};

/// Decoded transaction as seen by the fee pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTx {
    msgs: Vec<Msg>,
    fee: Coins,
    gas_limit: u64,
    fee_payer: Address,
    fee_granter: Option<Address>,
}

impl FeeTx {
    /// Creates a transaction paid by `fee_payer`.
    pub const fn new(msgs: Vec<Msg>, fee: Coins, gas_limit: u64, fee_payer: Address) -> Self {
        Self { msgs, fee, gas_limit, fee_payer, fee_granter: None }
    }

    /// Sets the account whose fee allowance pays the fee.
    #[must_use]
    pub fn with_granter(mut self, granter: Address) -> Self {
        self.fee_granter = Some(granter);
        self
    }

    /// Messages in execution order.
    pub fn msgs(&self) -> &[Msg] {
        &self.msgs
    }

    /// Declared fee.
    pub const fn fee(&self) -> &Coins {
        &self.fee
    }

    /// Declared gas limit.
    pub const fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// Account responsible for the fee.
    pub const fn fee_payer(&self) -> Address {
        self.fee_payer
    }

    /// Account whose allowance pays the fee, if any.
    pub const fn fee_granter(&self) -> Option<Address> {
        self.fee_granter
    }

    /// Leaf messages with authorization execs unwrapped.
    pub fn flattened_msgs(&self, max_depth: usize) -> Result<Vec<&Msg>, UnwrapError> {
        flatten_msgs(&self.msgs, max_depth)
    }

    /// Target contract when the transaction is exactly one direct contract call.
    pub fn single_contract_call(&self) -> Option<Address> {
        match self.msgs.as_slice() {
            [msg] => msg.contract(),
            _ => None,
        }
    }
}
