//! Genesis import and export.

use std::collections::BTreeSet;

use levy_domain::{BankKeeper, ContractKeeper};
use levy_traits::KvStore;
use serde::{Deserialize, Serialize};

use crate::{FeePayContract, FeePayError, FeePayKeeper, FeePayParams, MAX_WALLET_LIMIT};

/// Fee sponsorship genesis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Module params.
    pub params: FeePayParams,
    /// Registered contracts.
    pub contracts: Vec<FeePayContract>,
}

impl GenesisState {
    /// Rejects duplicate registrations and out-of-range wallet limits.
    pub fn validate(&self) -> Result<(), FeePayError> {
        let mut seen = BTreeSet::new();
        for contract in &self.contracts {
            if !seen.insert(contract.contract_address) {
                return Err(FeePayError::ContractAlreadyRegistered(contract.contract_address));
            }
            if contract.wallet_limit > MAX_WALLET_LIMIT {
                return Err(FeePayError::InvalidWalletLimit(contract.wallet_limit));
            }
        }
        Ok(())
    }
}

impl<B: BankKeeper, C: ContractKeeper> FeePayKeeper<B, C> {
    /// Writes a validated genesis into `store`.
    pub fn init_genesis(&self, store: &mut dyn KvStore, genesis: &GenesisState) -> Result<(), FeePayError> {
        genesis.validate()?;
        self.set_params(store, &genesis.params)?;
        for contract in &genesis.contracts {
            self.set_contract(store, contract)?;
        }
        Ok(())
    }

    /// Reads params and registrations as a genesis.
    pub fn export_genesis(&self, store: &dyn KvStore) -> Result<GenesisState, FeePayError> {
        Ok(GenesisState { params: self.get_params(store)?, contracts: self.get_contracts(store)? })
    }
}
