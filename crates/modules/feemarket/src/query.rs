//! Read-only queries over fee market state.

use levy_domain::DenomResolver;
use levy_primitives::DecCoin;
use levy_traits::KvStore;

use crate::{FeeMarketError, FeeMarketKeeper, Params, State};

/// Query view bound to one store snapshot.
pub struct FeeMarketQuerier<'a, R> {
    keeper: &'a FeeMarketKeeper<R>,
    store: &'a dyn KvStore,
}

impl<R: std::fmt::Debug> std::fmt::Debug for FeeMarketQuerier<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeeMarketQuerier").field("keeper", self.keeper).finish_non_exhaustive()
    }
}

impl<'a, R: DenomResolver> FeeMarketQuerier<'a, R> {
    /// Creates a querier.
    pub const fn new(keeper: &'a FeeMarketKeeper<R>, store: &'a dyn KvStore) -> Self {
        Self { keeper, store }
    }

    /// Current params.
    pub fn params(&self) -> Result<Params, FeeMarketError> {
        self.keeper.get_params(self.store)
    }

    /// Current controller state.
    pub fn state(&self) -> Result<State, FeeMarketError> {
        self.keeper.get_state(self.store)
    }

    /// Current gas price in `denom`.
    pub fn gas_price(&self, denom: &str) -> Result<DecCoin, FeeMarketError> {
        self.keeper.get_current_gas_price(self.store, denom)
    }

    /// Current gas prices in every supported denom.
    pub fn gas_prices(&self) -> Result<Vec<DecCoin>, FeeMarketError> {
        self.keeper.get_current_gas_prices(self.store)
    }

    /// Height of the last enable transition.
    pub fn enabled_height(&self) -> Result<Option<u64>, FeeMarketError> {
        self.keeper.get_enabled_height(self.store)
    }
}
