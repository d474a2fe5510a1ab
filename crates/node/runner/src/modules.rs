//! Construction of the fee modules and their pipelines.

use std::sync::Arc;

use anyhow::Context as _;
use levy_ante::{
    AnteChain, AnteOptions, FeeMarketCheckDecorator, FeeRouteDecorator, SetUpContextDecorator,
    SponsoredFeeDecorator,
};
use levy_config::{FeeConfig, NodeConfig};
use levy_domain::{AccountKeeper, BankKeeper, ContractKeeper, DenomResolver, FeeGrantKeeper};
use levy_feemarket::FeeMarketKeeper;
use levy_feepay::FeePayKeeper;
use levy_post::FeeMarketDeductDecorator;
use levy_traits::KvStore;
use serde::{Deserialize, Serialize};

/// Genesis of every fee module.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppGenesis {
    /// Fee market genesis.
    pub feemarket: levy_feemarket::GenesisState,
    /// Fee sponsorship genesis.
    pub feepay: levy_feepay::GenesisState,
}

/// The fee market and sponsorship keepers, shared by admission and settlement.
#[derive(Debug)]
pub struct FeeModules<B, C, R> {
    /// Fee market keeper.
    pub feemarket: Arc<FeeMarketKeeper<R>>,
    /// Fee sponsorship keeper.
    pub feepay: Arc<FeePayKeeper<B, C>>,
}

impl<B, C, R> FeeModules<B, C, R>
where
    B: BankKeeper + Clone + Send + Sync + 'static,
    C: ContractKeeper + Send + Sync + 'static,
    R: DenomResolver + Send + Sync + 'static,
{
    /// Creates both keepers with the configured authority and bond denom.
    pub fn new(config: &NodeConfig, bank: B, contracts: C, resolver: R) -> Self {
        let feemarket = Arc::new(FeeMarketKeeper::new(config.authority, resolver));
        let feepay = Arc::new(FeePayKeeper::new(
            bank,
            contracts,
            config.feepay.bond_denom.clone(),
            config.authority,
        ));
        Self { feemarket, feepay }
    }

    /// Writes both module geneses into `store`.
    pub fn init_genesis(&self, store: &mut dyn KvStore, genesis: &AppGenesis) -> anyhow::Result<()> {
        self.feemarket
            .init_genesis(store, &genesis.feemarket)
            .context("fee market genesis")?;
        self.feepay.init_genesis(store, &genesis.feepay).context("fee pay genesis")?;
        Ok(())
    }

    /// Reads both module geneses back from `store`.
    pub fn export_genesis(&self, store: &dyn KvStore) -> anyhow::Result<AppGenesis> {
        Ok(AppGenesis {
            feemarket: self.feemarket.export_genesis(store).context("fee market genesis")?,
            feepay: self.feepay.export_genesis(store).context("fee pay genesis")?,
        })
    }

    /// Assembles the admission chain: context setup, then fee routing.
    pub fn ante_chain<A, G>(&self, bank: B, accounts: A, feegrant: G, options: AnteOptions) -> AnteChain
    where
        A: AccountKeeper + Clone + Send + Sync + 'static,
        G: FeeGrantKeeper + Send + Sync + 'static,
    {
        let sponsored = SponsoredFeeDecorator::new(
            Arc::clone(&self.feepay),
            Arc::clone(&self.feemarket),
            accounts.clone(),
        );
        let standard = FeeMarketCheckDecorator::new(
            bank,
            accounts,
            feegrant,
            Arc::clone(&self.feemarket),
            options,
        );
        AnteChain::new()
            .with(SetUpContextDecorator)
            .with(FeeRouteDecorator::new(sponsored, standard))
    }

    /// Builds the settlement handler.
    pub fn post_handler(&self, bank: B, config: &FeeConfig) -> FeeMarketDeductDecorator<B, R> {
        FeeMarketDeductDecorator::new(bank, Arc::clone(&self.feemarket))
            .with_bank_send_gas(config.simulation_bank_send_gas)
    }
}

#[cfg(test)]
mod tests {
    use levy_feemarket::{NativeDenomResolver, Params};
    use levy_feepay::FeePayParams;
    use levy_overlay::MemStore;
    use levy_testkit::{StoreBank, StoreContracts};

    use super::*;

    fn modules() -> FeeModules<StoreBank, StoreContracts, NativeDenomResolver> {
        FeeModules::new(&NodeConfig::default(), StoreBank::default(), StoreContracts, NativeDenomResolver)
    }

    #[test]
    fn genesis_round_trips() {
        let modules = modules();
        let mut store = MemStore::new();
        let genesis = AppGenesis {
            feemarket: levy_feemarket::GenesisState::new(Params::eip1559()),
            feepay: levy_feepay::GenesisState {
                params: FeePayParams { enable_feepay: false },
                contracts: Vec::new(),
            },
        };
        modules.init_genesis(&mut store, &genesis).unwrap();
        assert_eq!(modules.export_genesis(&store).unwrap(), genesis);
    }

    #[test]
    fn invalid_genesis_is_reported_with_module() {
        let modules = modules();
        let mut store = MemStore::new();
        let mut genesis = AppGenesis::default();
        genesis.feemarket.params.window = 0;
        let err = modules.init_genesis(&mut store, &genesis).unwrap_err();
        assert_eq!(err.to_string(), "fee market genesis");
    }

    #[test]
    fn ante_chain_has_setup_and_route() {
        let modules = modules();
        let chain = modules.ante_chain(
            StoreBank::default(),
            levy_testkit::StoreAccounts,
            levy_testkit::StoreFeeGrants,
            AnteOptions::default(),
        );
        assert_eq!(chain.len(), 2);
    }
}
