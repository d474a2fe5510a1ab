//! Test harness driving whole blocks through a fee-aware application.

use std::sync::Arc;

use levy_ante::AnteOptions;
use levy_config::ConfigError;
use levy_domain::{BankError, BankKeeper, Context, FeeTx, Msg};
use levy_feemarket::{FeeMarketError, MsgUpdateParams, NativeDenomResolver, Params, State};
use levy_feepay::{FeePayContract, FeePayError, FeePayParams, WalletEligibility};
use levy_primitives::{Address, Coins, U256};
use levy_runner::{AppGenesis, FeeApp, FeeModules, RunnerError, TxResult};
use levy_testkit::{StoreAccounts, StoreBank, StoreContracts, StoreFeeGrants};
use thiserror::Error;
use tracing::{debug, info};

use crate::{DENOM, TestConfig, TestSetup};

/// Type URL of the governance message replacing fee market params.
pub const MSG_UPDATE_PARAMS: &str = "/levy.feemarket.v1.MsgUpdateParams";

const GOVERNANCE_GAS: u64 = 100_000;

/// Installs a log subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Errors from test harness execution.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The application failed outside of transaction processing.
    #[error(transparent)]
    Runner(#[from] RunnerError),
    /// The node configuration was rejected.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    /// Balance lookup failed.
    #[error("bank query failed: {0}")]
    Bank(#[from] BankError),
    /// Sponsorship lookup failed.
    #[error("fee pay query failed: {0}")]
    FeePay(#[from] FeePayError),
    /// Fee market lookup failed.
    #[error("fee market query failed: {0}")]
    FeeMarket(#[from] FeeMarketError),
    /// Balance mismatch.
    #[error("balance mismatch for {address}: expected {expected}, got {actual}")]
    BalanceMismatch {
        /// The address with the mismatch.
        address: Address,
        /// Expected balance.
        expected: U256,
        /// Actual balance.
        actual: U256,
    },
}

/// A transaction placed in a block.
#[derive(Clone, Debug)]
pub enum BlockTx {
    /// A transaction whose messages the harness executes.
    Tx(FeeTx),
    /// A governance transaction replacing the fee market params.
    UpdateParams {
        /// Account paying for the proposal transaction.
        proposer: Address,
        /// Fee declared by the proposal transaction.
        fee: Coins,
        /// New params.
        params: Params,
    },
}

impl From<FeeTx> for BlockTx {
    fn from(tx: FeeTx) -> Self {
        Self::Tx(tx)
    }
}

/// Outcome of one committed block.
#[derive(Clone, Debug)]
pub struct TestOutcome {
    /// Committed height.
    pub height: u64,
    /// Per-transaction results in block order.
    pub results: Vec<TxResult>,
    /// Fee market state after the block, `None` while the market is disabled.
    pub state: Option<State>,
}

/// Drives blocks through a [`FeeApp`] backed by in-memory collaborators.
#[derive(Debug)]
pub struct TestHarness {
    app: FeeApp<NativeDenomResolver>,
    modules: FeeModules<StoreBank, StoreContracts, NativeDenomResolver>,
    bank: StoreBank,
    gas_per_msg: u64,
    max_unwrap_depth: usize,
}

impl TestHarness {
    /// Boots an application and writes the scenario's genesis.
    pub fn new(config: TestConfig, setup: TestSetup) -> Result<Self, HarnessError> {
        init_tracing();
        let bank = StoreBank::default();
        let modules =
            FeeModules::new(&config.node, bank.clone(), StoreContracts, NativeDenomResolver);
        let options = AnteOptions::from_config(&config.node.fees)?;
        let max_unwrap_depth = options.max_unwrap_depth;
        let ante = modules.ante_chain(bank.clone(), StoreAccounts, StoreFeeGrants, options);
        let post = modules.post_handler(bank.clone(), &config.node.fees);
        let app = FeeApp::new(&config.node, ante, post, Arc::clone(&modules.feemarket));

        let genesis = AppGenesis {
            feemarket: levy_feemarket::GenesisState::new(config.params),
            feepay: levy_feepay::GenesisState {
                params: FeePayParams { enable_feepay: config.feepay_enabled },
                contracts: Vec::new(),
            },
        };
        app.init_chain(|store| {
            modules.init_genesis(store, &genesis)?;
            for (address, amount) in &setup.accounts {
                bank.mint(store, address, amount)?;
            }
            for contract in &setup.contracts {
                let (address, admin) = (&contract.address, &contract.admin);
                StoreContracts.instantiate(store, address, *admin, Some(*admin))?;
                modules.feepay.register_contract(store, admin, address, contract.wallet_limit)?;
                if contract.funding > 0 {
                    let funding = crate::ujuno(contract.funding);
                    bank.mint(store, admin, &funding)?;
                    modules.feepay.fund_contract(store, admin, address, &funding)?;
                }
            }
            for (granter, grantee, allowance) in &setup.grants {
                StoreFeeGrants.grant(store, granter, grantee, allowance)?;
            }
            Ok(())
        })?;
        info!(
            accounts = setup.accounts.len(),
            contracts = setup.contracts.len(),
            "harness initialized"
        );
        Ok(Self { app, modules, bank, gas_per_msg: config.gas_per_msg, max_unwrap_depth })
    }

    /// The application under test.
    pub const fn app(&self) -> &FeeApp<NativeDenomResolver> {
        &self.app
    }

    /// Runs one block with `txs` and commits it.
    pub fn block<I>(&self, txs: I) -> Result<TestOutcome, HarnessError>
    where
        I: IntoIterator,
        I::Item: Into<BlockTx>,
    {
        let height = self.app.height() + 1;
        self.app.begin_block(height)?;
        let mut results = Vec::new();
        for tx in txs {
            let result = match tx.into() {
                BlockTx::Tx(tx) => self.app.deliver_tx(&tx, |ctx| self.execute(ctx, &tx))?,
                BlockTx::UpdateParams { proposer, fee, params } => {
                    let authority = self.modules.feemarket.authority();
                    let msg = Msg::Other { type_url: MSG_UPDATE_PARAMS.to_string(), signer: authority };
                    let tx = FeeTx::new(vec![msg], fee, GOVERNANCE_GAS, proposer);
                    let update = MsgUpdateParams { authority, params };
                    self.app.deliver_tx(&tx, |ctx| {
                        Ok(self.modules.feemarket.handle_update_params(ctx, &update)?)
                    })?
                }
            };
            results.push(result);
        }
        let state = self.app.end_block()?;
        self.app.commit()?;
        debug!(height, txs = results.len(), "harness block committed");
        Ok(TestOutcome { height, results, state })
    }

    /// Runs `count` blocks, each holding `txs`.
    pub fn blocks(&self, count: usize, txs: &[FeeTx]) -> Result<Vec<TestOutcome>, HarnessError> {
        (0..count).map(|_| self.block(txs.iter().cloned())).collect()
    }

    /// Mempool admission of `tx`.
    pub fn check(&self, tx: &FeeTx) -> TxResult {
        self.app.check_tx(tx)
    }

    /// Gas estimation of `tx`.
    pub fn simulate(&self, tx: &FeeTx) -> TxResult {
        self.app.simulate(tx, |ctx| self.execute(ctx, tx))
    }

    fn execute(&self, ctx: &mut Context<'_>, tx: &FeeTx) -> anyhow::Result<()> {
        for msg in tx.flattened_msgs(self.max_unwrap_depth)? {
            ctx.gas_meter_mut().consume(self.gas_per_msg, msg.type_url())?;
            match msg {
                Msg::Send { from, to, amount } => {
                    self.bank.send_coins(ctx.store_mut(), from, to, amount)?;
                }
                Msg::ExecuteContract { sender, contract, funds, .. } if !funds.is_empty() => {
                    self.bank.send_coins(ctx.store_mut(), sender, contract, funds)?;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Committed balance of `address` in the scenario denom.
    pub fn balance(&self, address: &Address) -> Result<U256, HarnessError> {
        Ok(self.app.query(|store| self.bank.balance(store, address, DENOM))?)
    }

    /// Committed balance of a module account in the scenario denom.
    pub fn module_balance(&self, module: &str) -> Result<U256, HarnessError> {
        Ok(self.app.query(|store| self.bank.module_balance(store, module, DENOM))?)
    }

    /// Fails unless `address` holds exactly `expected`.
    pub fn assert_balance(&self, address: &Address, expected: u64) -> Result<(), HarnessError> {
        let expected = U256::from(expected);
        let actual = self.balance(address)?;
        if actual != expected {
            return Err(HarnessError::BalanceMismatch { address: *address, expected, actual });
        }
        Ok(())
    }

    /// Committed sponsorship of `contract`.
    pub fn contract(&self, contract: &Address) -> Result<FeePayContract, HarnessError> {
        Ok(self.app.query(|store| self.modules.feepay.querier(store).contract(contract))?)
    }

    /// Committed sponsored call count of `wallet` on `contract`.
    pub fn contract_uses(&self, contract: &Address, wallet: &Address) -> Result<u64, HarnessError> {
        Ok(self
            .app
            .query(|store| self.modules.feepay.querier(store).contract_uses(contract, wallet))?)
    }

    /// Whether `wallet` may still be sponsored by `contract`.
    pub fn wallet_is_eligible(
        &self,
        contract: &Address,
        wallet: &Address,
    ) -> Result<WalletEligibility, HarnessError> {
        Ok(self
            .app
            .query(|store| self.modules.feepay.querier(store).wallet_is_eligible(contract, wallet))?)
    }

    /// Enable height recorded by the fee market.
    pub fn enabled_height(&self) -> Result<Option<u64>, HarnessError> {
        Ok(self.app.query(|store| self.modules.feemarket.querier(store).enabled_height())?)
    }
}
