//! Interfaces of the collaborators the fee pipeline depends on.
//!
//! Every method takes the store explicitly so the same keeper works against
//! committed state, a block branch or a throwaway simulation view.

use levy_primitives::{Address, Coins, DecCoin, U256};
use levy_traits::{KvStore, StoreError};
use serde::{Deserialize, Serialize};

use crate::{BankError, FeeGrantError, Msg, ResolverError};

/// Balance ledger.
pub trait BankKeeper {
    /// Spendable balance of `address` in `denom`.
    fn balance(&self, store: &dyn KvStore, address: &Address, denom: &str) -> Result<U256, BankError>;

    /// Moves `amount` from an account to a module account.
    fn send_coins_from_account_to_module(
        &self,
        store: &mut dyn KvStore,
        sender: &Address,
        module: &str,
        amount: &Coins,
    ) -> Result<(), BankError>;

    /// Moves `amount` from a module account to an account.
    fn send_coins_from_module_to_account(
        &self,
        store: &mut dyn KvStore,
        module: &str,
        recipient: &Address,
        amount: &Coins,
    ) -> Result<(), BankError>;

    /// Moves `amount` between module accounts.
    fn send_coins_from_module_to_module(
        &self,
        store: &mut dyn KvStore,
        sender: &str,
        recipient: &str,
        amount: &Coins,
    ) -> Result<(), BankError>;
}

/// Account registry.
pub trait AccountKeeper {
    /// True if an account exists at `address`.
    fn has_account(&self, store: &dyn KvStore, address: &Address) -> Result<bool, StoreError>;

    /// Address of a module account, if the module has one.
    fn module_address(&self, module: &str) -> Option<Address>;
}

/// Fee allowance registry.
pub trait FeeGrantKeeper {
    /// Spends `fee` from the allowance `granter` gave `grantee`.
    ///
    /// `msgs` are the transaction's leaf messages, already unwrapped.
    fn use_granted_fees(
        &self,
        store: &mut dyn KvStore,
        granter: &Address,
        grantee: &Address,
        fee: &Coins,
        msgs: &[&Msg],
    ) -> Result<(), FeeGrantError>;
}

/// Ownership metadata of an instantiated contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// Account that instantiated the contract.
    pub creator: Address,
    /// Migration admin, if any.
    pub admin: Option<Address>,
}

impl ContractInfo {
    /// The account allowed to manage the contract: the admin if set, else the creator.
    pub fn manager(&self) -> Address {
        self.admin.unwrap_or(self.creator)
    }
}

/// Contract registry.
pub trait ContractKeeper {
    /// Metadata for `contract`, or `None` if no contract lives there.
    fn contract_info(
        &self,
        store: &dyn KvStore,
        contract: &Address,
    ) -> Result<Option<ContractInfo>, StoreError>;
}

/// Converts gas prices between denominations.
pub trait DenomResolver {
    /// Expresses `price` in `denom`, truncating.
    fn convert_to_denom(
        &self,
        store: &dyn KvStore,
        price: &DecCoin,
        denom: &str,
    ) -> Result<DecCoin, ResolverError>;

    /// Denominations other than the fee denom that fees may be paid in.
    fn extra_denoms(&self, store: &dyn KvStore) -> Result<Vec<String>, ResolverError>;
}
