//! Persistence and pricing for the fee market.

use levy_domain::DenomResolver;
use levy_primitives::{Address, DecCoin};
use levy_traits::{KvStore, KvStoreExt};
use tracing::{debug, info};

use crate::{
    ENABLED_HEIGHT_KEY, FeeMarketError, FeeMarketQuerier, GasPriceController, PARAMS_KEY, Params,
    STATE_KEY, State,
};

/// Fee market keeper.
#[derive(Clone, Debug)]
pub struct FeeMarketKeeper<R> {
    authority: Address,
    resolver: R,
}

impl<R: DenomResolver> FeeMarketKeeper<R> {
    /// Creates a keeper whose params may be updated by `authority`.
    pub const fn new(authority: Address, resolver: R) -> Self {
        Self { authority, resolver }
    }

    /// Governance authority.
    pub const fn authority(&self) -> Address {
        self.authority
    }

    /// Denom resolver.
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Read-only query view over `store`.
    pub const fn querier<'a>(&'a self, store: &'a dyn KvStore) -> FeeMarketQuerier<'a, R> {
        FeeMarketQuerier::new(self, store)
    }

    /// Current params.
    pub fn get_params(&self, store: &dyn KvStore) -> Result<Params, FeeMarketError> {
        store.get_json(PARAMS_KEY)?.ok_or(FeeMarketError::ParamsNotFound)
    }

    /// Validates and stores params.
    pub fn set_params(&self, store: &mut dyn KvStore, params: &Params) -> Result<(), FeeMarketError> {
        params.validate()?;
        Ok(store.set_json(PARAMS_KEY, params)?)
    }

    /// Current state.
    pub fn get_state(&self, store: &dyn KvStore) -> Result<State, FeeMarketError> {
        store.get_json(STATE_KEY)?.ok_or(FeeMarketError::StateNotFound)
    }

    /// Validates and stores state.
    pub fn set_state(&self, store: &mut dyn KvStore, state: &State) -> Result<(), FeeMarketError> {
        state.validate()?;
        Ok(store.set_json(STATE_KEY, state)?)
    }

    /// Height of the last disabled to enabled transition, if any.
    pub fn get_enabled_height(&self, store: &dyn KvStore) -> Result<Option<u64>, FeeMarketError> {
        Ok(store.get_json(ENABLED_HEIGHT_KEY)?)
    }

    /// Records the enable height.
    pub fn set_enabled_height(&self, store: &mut dyn KvStore, height: u64) -> Result<(), FeeMarketError> {
        Ok(store.set_json(ENABLED_HEIGHT_KEY, &height)?)
    }

    /// Replaces params and resets state from them.
    ///
    /// A disabled to enabled transition records `height` as the enable height
    /// before the new params are persisted.
    pub fn update_params(
        &self,
        store: &mut dyn KvStore,
        height: u64,
        params: &Params,
    ) -> Result<(), FeeMarketError> {
        params.validate()?;
        let was_enabled = match self.get_params(store) {
            Ok(current) => current.enabled,
            Err(FeeMarketError::ParamsNotFound) => false,
            Err(err) => return Err(err),
        };
        if !was_enabled && params.enabled {
            self.set_enabled_height(store, height)?;
            info!(height, "fee market enabled");
        }
        self.set_params(store, params)?;
        let state = State::from_params(params);
        self.set_state(store, &state)?;
        info!(
            height,
            window = params.window,
            enabled = params.enabled,
            fee_denom = %params.fee_denom,
            "fee market params updated, state reset"
        );
        Ok(())
    }

    /// Current gas price expressed in `denom`.
    pub fn get_current_gas_price(
        &self,
        store: &dyn KvStore,
        denom: &str,
    ) -> Result<DecCoin, FeeMarketError> {
        let params = self.get_params(store)?;
        let state = self.get_state(store)?;
        let native = DecCoin::new(params.fee_denom, state.base_gas_price);
        if native.denom == denom {
            return Ok(native);
        }
        Ok(self.resolver.convert_to_denom(store, &native, denom)?)
    }

    /// Current gas price in the fee denom and in every resolver-supported denom.
    pub fn get_current_gas_prices(&self, store: &dyn KvStore) -> Result<Vec<DecCoin>, FeeMarketError> {
        let params = self.get_params(store)?;
        let mut prices = vec![self.get_current_gas_price(store, &params.fee_denom)?];
        for denom in self.resolver.extra_denoms(store)? {
            if denom != params.fee_denom {
                prices.push(self.get_current_gas_price(store, &denom)?);
            }
        }
        prices.sort_by(|a, b| a.denom.cmp(&b.denom));
        Ok(prices)
    }

    /// Runs the controller for a finalized block and persists the new state.
    ///
    /// Returns `None` while the market is disabled.
    pub fn update_fee_market(
        &self,
        store: &mut dyn KvStore,
        block_gas_used: u64,
    ) -> Result<Option<State>, FeeMarketError> {
        let params = self.get_params(store)?;
        if !params.enabled {
            debug!(block_gas_used, "fee market disabled, skipping update");
            return Ok(None);
        }
        let state = self.get_state(store)?;
        let next = GasPriceController::new(&params).update(&state, block_gas_used)?;
        self.set_state(store, &next)?;
        debug!(
            block_gas_used,
            base_gas_price = %next.base_gas_price,
            learning_rate = %next.learning_rate,
            index = next.index,
            "fee market updated"
        );
        Ok(Some(next))
    }
}
