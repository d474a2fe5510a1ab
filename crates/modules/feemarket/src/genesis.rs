//! Genesis import and export.

use levy_domain::DenomResolver;
use levy_traits::KvStore;
use serde::{Deserialize, Serialize};

use crate::{FeeMarketError, FeeMarketKeeper, Params, State};

/// Fee market genesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    /// Initial params.
    pub params: Params,
    /// Initial controller state.
    pub state: State,
}

impl Default for GenesisState {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl GenesisState {
    /// Genesis with a fresh state derived from `params`.
    pub fn new(params: Params) -> Self {
        let state = State::from_params(&params);
        Self { params, state }
    }

    /// Validates params, state and their consistency.
    pub fn validate(&self) -> Result<(), FeeMarketError> {
        self.params.validate()?;
        self.state.validate_against(&self.params)
    }
}

impl<R: DenomResolver> FeeMarketKeeper<R> {
    /// Writes a validated genesis into `store`.
    pub fn init_genesis(&self, store: &mut dyn KvStore, genesis: &GenesisState) -> Result<(), FeeMarketError> {
        genesis.validate()?;
        self.set_params(store, &genesis.params)?;
        self.set_state(store, &genesis.state)
    }

    /// Reads the current params and state as a genesis.
    pub fn export_genesis(&self, store: &dyn KvStore) -> Result<GenesisState, FeeMarketError> {
        Ok(GenesisState { params: self.get_params(store)?, state: self.get_state(store)? })
    }
}
