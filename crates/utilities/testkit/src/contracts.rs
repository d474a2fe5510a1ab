//! Contract registry.

use levy_domain::{ContractInfo, ContractKeeper};
use levy_primitives::Address;
use levy_traits::{KvStore, KvStoreExt, StoreError};

/// Prefix of contract metadata entries.
pub const CONTRACTS_PREFIX: &[u8] = b"wasm/contracts/";

fn contract_key(address: &Address) -> Vec<u8> {
    [CONTRACTS_PREFIX, address.to_string().as_bytes()].concat()
}

/// Contract registry storing [`ContractInfo`] as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoreContracts;

impl StoreContracts {
    /// Records a contract at `address`.
    pub fn instantiate(
        &self,
        store: &mut dyn KvStore,
        address: &Address,
        creator: Address,
        admin: Option<Address>,
    ) -> Result<(), StoreError> {
        store.set_json(&contract_key(address), &ContractInfo { creator, admin })
    }
}

impl ContractKeeper for StoreContracts {
    fn contract_info(
        &self,
        store: &dyn KvStore,
        contract: &Address,
    ) -> Result<Option<ContractInfo>, StoreError> {
        store.get_json(&contract_key(contract))
    }
}
