//! Account registry.

use levy_domain::AccountKeeper;
use levy_primitives::{Address, module_address};
use levy_traits::{KvStore, StoreError};

/// Prefix of account markers.
pub const ACCOUNTS_PREFIX: &[u8] = b"auth/accounts/";

pub(crate) fn account_key(address: &Address) -> Vec<u8> {
    [ACCOUNTS_PREFIX, address.to_string().as_bytes()].concat()
}

/// Accounts exist once created or once they received coins.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoreAccounts;

impl StoreAccounts {
    /// Creates the account at `address`.
    pub fn create_account(&self, store: &mut dyn KvStore, address: &Address) -> Result<(), StoreError> {
        store.set(&account_key(address), Vec::new())
    }
}

impl AccountKeeper for StoreAccounts {
    fn has_account(&self, store: &dyn KvStore, address: &Address) -> Result<bool, StoreError> {
        store.has(&account_key(address))
    }

    fn module_address(&self, module: &str) -> Option<Address> {
        Some(module_address(module))
    }
}
