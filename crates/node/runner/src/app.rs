//! Block driver running admission, execution and settlement per transaction.

use std::sync::Arc;

use anyhow::Context as _;
use levy_ante::{AnteChain, AnteHandler};
use levy_config::NodeConfig;
use levy_domain::{BlockInfo, Context, DenomResolver, ExecMode, FeeTx};
use levy_feemarket::{FeeMarketKeeper, Params, State};
use levy_overlay::{ChangeSet, MemStore, OverlayStore};
use levy_post::PostHandler;
use levy_primitives::DecCoin;
use levy_traits::KvStore;
use parking_lot::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::{RunnerError, TxResult, result::TxFailure};

#[derive(Debug, Default)]
struct Committed {
    store: MemStore,
    height: u64,
}

#[derive(Debug)]
struct PendingBlock {
    height: u64,
    changes: ChangeSet,
    gas_used: u64,
}

/// Fee-aware application driven by a consensus engine.
///
/// Block execution is strictly sequential: `begin_block`, any number of
/// `deliver_tx`, `end_block`, then `commit`. Writes of the block in progress
/// live in an overlay and reach the committed store only on `commit`, so
/// queries always observe the last committed block.
///
/// Lock order is committed store, then pending block or check state. `commit`
/// never holds two locks at once.
pub struct FeeApp<R> {
    chain_id: String,
    ante: AnteChain,
    post: Box<dyn PostHandler + Send + Sync>,
    feemarket: Arc<FeeMarketKeeper<R>>,
    committed: RwLock<Committed>,
    pending: Mutex<Option<PendingBlock>>,
    check_state: Mutex<ChangeSet>,
}

impl<R> std::fmt::Debug for FeeApp<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeeApp")
            .field("chain_id", &self.chain_id)
            .field("ante", &self.ante)
            .field("height", &self.committed.read().height)
            .finish_non_exhaustive()
    }
}

impl<R: DenomResolver> FeeApp<R> {
    /// Creates an application over an empty store.
    pub fn new(
        config: &NodeConfig,
        ante: AnteChain,
        post: impl PostHandler + Send + Sync + 'static,
        feemarket: Arc<FeeMarketKeeper<R>>,
    ) -> Self {
        Self {
            chain_id: config.chain_id.clone(),
            ante,
            post: Box::new(post),
            feemarket,
            committed: RwLock::new(Committed::default()),
            pending: Mutex::new(None),
            check_state: Mutex::new(ChangeSet::new()),
        }
    }

    /// Chain identifier.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Height of the last committed block.
    pub fn height(&self) -> u64 {
        self.committed.read().height
    }

    /// Writes genesis state with `init` and commits it at height zero.
    pub fn init_chain<F>(&self, init: F) -> Result<(), RunnerError>
    where
        F: FnOnce(&mut dyn KvStore) -> anyhow::Result<()>,
    {
        let mut committed = self.committed.write();
        if committed.height != 0 || self.pending.lock().is_some() {
            return Err(RunnerError::already_initialized(committed.height));
        }
        let mut view = OverlayStore::new(&committed.store);
        init(&mut view).context("genesis failed")?;
        let changes = view.into_changes();
        let writes = changes.len();
        changes.apply_to(&mut committed.store).context("writing genesis")?;
        info!(chain_id = %self.chain_id, writes, "chain initialized");
        Ok(())
    }

    /// Opens block `height`, which must follow the last committed block.
    pub fn begin_block(&self, height: u64) -> Result<(), RunnerError> {
        let committed = self.committed.read();
        let mut pending = self.pending.lock();
        if let Some(block) = pending.as_ref() {
            return Err(RunnerError::block_in_progress(block.height));
        }
        let expected = committed.height + 1;
        if height != expected {
            return Err(RunnerError::unexpected_height(height, expected));
        }
        *pending = Some(PendingBlock { height, changes: ChangeSet::new(), gas_used: 0 });
        debug!(height, "block started");
        Ok(())
    }

    /// Runs `tx` through admission, `execute` and settlement in the open block.
    ///
    /// A rejected admission leaves no trace. When `execute` fails its writes
    /// are dropped while the admission fee stays charged. When settlement
    /// fails the writes of both execution and settlement are dropped.
    pub fn deliver_tx<F>(&self, tx: &FeeTx, execute: F) -> Result<TxResult, RunnerError>
    where
        F: FnOnce(&mut Context<'_>) -> anyhow::Result<()>,
    {
        let committed = self.committed.read();
        let mut pending = self.pending.lock();
        let block = pending.as_mut().ok_or_else(RunnerError::no_block)?;

        let mut view =
            OverlayStore::with_changes(&committed.store, std::mem::take(&mut block.changes));
        let mut ctx = Context::new(
            &mut view,
            BlockInfo::new(block.height, self.chain_id.as_str()),
            ExecMode::Finalize,
        );
        let outcome = self.run_tx(&mut ctx, tx, false, execute);
        let result = TxResult::new(&mut ctx, tx, outcome);
        drop(ctx);
        block.changes = view.into_changes();
        block.gas_used = block.gas_used.saturating_add(result.gas_used);

        if !result.is_ok() {
            debug!(height = block.height, code = result.code, log = %result.log, "tx failed");
        }
        Ok(result)
    }

    /// Runs admission for mempool entry.
    ///
    /// Admission writes accumulate across checks until the next commit, so a
    /// payer cannot spend the same balance twice in one mempool.
    pub fn check_tx(&self, tx: &FeeTx) -> TxResult {
        self.check(tx, ExecMode::Check)
    }

    /// Re-validates a mempool transaction after a commit.
    pub fn recheck_tx(&self, tx: &FeeTx) -> TxResult {
        self.check(tx, ExecMode::ReCheck)
    }

    fn check(&self, tx: &FeeTx, mode: ExecMode) -> TxResult {
        let committed = self.committed.read();
        let mut check_state = self.check_state.lock();

        let mut view =
            OverlayStore::with_changes(&committed.store, std::mem::take(&mut *check_state));
        let mut ctx = Context::new(
            &mut view,
            BlockInfo::new(committed.height + 1, self.chain_id.as_str()),
            mode,
        );
        let outcome = ctx.branch(|ctx| self.ante.handle(ctx, tx, false)).map_err(TxFailure::Ante);
        let result = TxResult::new(&mut ctx, tx, outcome);
        drop(ctx);
        *check_state = view.into_changes();
        result
    }

    /// Runs the whole pipeline against a throwaway view of committed state.
    pub fn simulate<F>(&self, tx: &FeeTx, execute: F) -> TxResult
    where
        F: FnOnce(&mut Context<'_>) -> anyhow::Result<()>,
    {
        let committed = self.committed.read();
        let mut view = OverlayStore::new(&committed.store);
        let mut ctx = Context::new(
            &mut view,
            BlockInfo::new(committed.height + 1, self.chain_id.as_str()),
            ExecMode::Simulate,
        );
        let outcome = self.run_tx(&mut ctx, tx, true, execute);
        TxResult::new(&mut ctx, tx, outcome)
    }

    fn run_tx<F>(
        &self,
        ctx: &mut Context<'_>,
        tx: &FeeTx,
        simulate: bool,
        execute: F,
    ) -> Result<(), TxFailure>
    where
        F: FnOnce(&mut Context<'_>) -> anyhow::Result<()>,
    {
        ctx.branch(|ctx| self.ante.handle(ctx, tx, simulate)).map_err(TxFailure::Ante)?;
        let executed = ctx.branch(|ctx| {
            let executed = ctx.branch(|ctx| execute(ctx).map_err(TxFailure::Execute));
            self.post
                .post_handle(ctx, tx, simulate, executed.is_ok())
                .map_err(TxFailure::Post)?;
            Ok::<_, TxFailure>(executed)
        })?;
        executed
    }

    /// Feeds the block's gas usage to the fee market controller.
    ///
    /// Returns the new fee market state, or `None` while the market is disabled.
    pub fn end_block(&self) -> Result<Option<State>, RunnerError> {
        let committed = self.committed.read();
        let mut pending = self.pending.lock();
        let block = pending.as_mut().ok_or_else(RunnerError::no_block)?;

        let mut view =
            OverlayStore::with_changes(&committed.store, std::mem::take(&mut block.changes));
        let updated = self.feemarket.update_fee_market(&mut view, block.gas_used);
        block.changes = view.into_changes();
        let state = updated.with_context(|| format!("fee market update at {}", block.height))?;
        if let Some(state) = &state {
            debug!(
                height = block.height,
                gas_used = block.gas_used,
                base_gas_price = %state.base_gas_price,
                "block ended"
            );
        }
        Ok(state)
    }

    /// Persists the open block and resets the mempool check state.
    pub fn commit(&self) -> Result<u64, RunnerError> {
        let block = self.pending.lock().take().ok_or_else(RunnerError::no_block)?;
        let writes = block.changes.len();
        {
            let mut committed = self.committed.write();
            if let Err(err) = block.changes.apply_to(&mut committed.store) {
                warn!(height = block.height, %err, "commit failed");
                return Err(anyhow::Error::from(err).context("commit failed").into());
            }
            committed.height = block.height;
        }
        *self.check_state.lock() = ChangeSet::new();
        info!(height = block.height, gas_used = block.gas_used, writes, "block committed");
        Ok(block.height)
    }

    /// Runs `f` against the last committed state.
    pub fn query<T>(&self, f: impl FnOnce(&dyn KvStore) -> T) -> T {
        let committed = self.committed.read();
        f(&committed.store)
    }

    /// Current fee market params.
    pub fn params(&self) -> Result<Params, RunnerError> {
        self.query(|store| self.feemarket.querier(store).params()).map_err(RunnerError::query)
    }

    /// Current fee market state.
    pub fn state(&self) -> Result<State, RunnerError> {
        self.query(|store| self.feemarket.querier(store).state()).map_err(RunnerError::query)
    }

    /// Current minimum gas price in `denom`.
    pub fn gas_price(&self, denom: &str) -> Result<DecCoin, RunnerError> {
        self.query(|store| self.feemarket.querier(store).gas_price(denom)).map_err(RunnerError::query)
    }

    /// Current minimum gas prices in every supported denom.
    pub fn gas_prices(&self) -> Result<Vec<DecCoin>, RunnerError> {
        self.query(|store| self.feemarket.querier(store).gas_prices()).map_err(RunnerError::query)
    }
}

#[cfg(test)]
mod tests {
    use levy_ante::AnteOptions;
    use levy_domain::{BankKeeper, Msg};
    use levy_feemarket::NativeDenomResolver;
    use levy_primitives::{Address, Coin, Coins, FEE_COLLECTOR, U256};
    use levy_testkit::{StoreAccounts, StoreBank, StoreContracts, StoreFeeGrants, random_address};

    use anyhow::bail;

    use super::*;
    use crate::{AppGenesis, FeeModules};

    const DENOM: &str = "ujuno";
    const GAS: u64 = 200_000;

    fn app() -> (FeeApp<NativeDenomResolver>, StoreBank, Address) {
        let config = NodeConfig::default();
        let bank = StoreBank::default();
        let modules = FeeModules::new(&config, bank.clone(), StoreContracts, NativeDenomResolver);
        let ante = modules.ante_chain(bank.clone(), StoreAccounts, StoreFeeGrants, AnteOptions::default());
        let post = modules.post_handler(bank.clone(), &config.fees);
        let app = FeeApp::new(&config, ante, post, Arc::clone(&modules.feemarket));

        let alice = random_address();
        app.init_chain(|store| {
            modules.init_genesis(store, &AppGenesis::default())?;
            bank.mint(store, &alice, &ujuno(1_000_000))?;
            Ok(())
        })
        .unwrap();
        (app, bank, alice)
    }

    fn ujuno(amount: u64) -> Coins {
        Coins::single(Coin::new(DENOM, amount))
    }

    fn send(from: Address, fee: u64) -> FeeTx {
        FeeTx::new(vec![Msg::Send { from, to: random_address(), amount: ujuno(1) }], ujuno(fee), GAS, from)
    }

    fn balance(app: &FeeApp<NativeDenomResolver>, bank: &StoreBank, address: &Address) -> U256 {
        app.query(|store| bank.balance(store, address, DENOM)).unwrap()
    }

    fn burn(gas: u64) -> impl FnOnce(&mut Context<'_>) -> anyhow::Result<()> {
        move |ctx| Ok(ctx.gas_meter_mut().consume(gas, "execute")?)
    }

    #[test]
    fn block_lifecycle_enforces_order() {
        let (app, _, alice) = app();
        let err = app.deliver_tx(&send(alice, 200), burn(0)).unwrap_err();
        assert_eq!(err.to_string(), "no block in progress");
        let err = app.begin_block(2).unwrap_err();
        assert_eq!(err.to_string(), "unexpected block height 2, expected 1");
        app.begin_block(1).unwrap();
        let err = app.begin_block(1).unwrap_err();
        assert_eq!(err.to_string(), "block 1 already in progress");
        app.end_block().unwrap();
        assert_eq!(app.commit().unwrap(), 1);
        assert_eq!(app.height(), 1);
        assert!(app.commit().is_err());
        let err = app.init_chain(|_| Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "chain already initialized at height 1");
    }

    #[test]
    fn queries_see_only_committed_state() {
        let (app, bank, alice) = app();
        app.begin_block(1).unwrap();
        let result = app.deliver_tx(&send(alice, 400), burn(100_000)).unwrap();
        assert!(result.is_ok(), "{}", result.log);
        assert_eq!(balance(&app, &bank, &alice), U256::from(1_000_000u64));

        app.end_block().unwrap();
        app.commit().unwrap();
        // 400 escrowed, 100_000 gas at 0.001 costs 100, 300 refunded.
        assert_eq!(balance(&app, &bank, &alice), U256::from(999_900u64));
        let collector = app.query(|store| bank.module_balance(store, FEE_COLLECTOR, DENOM)).unwrap();
        assert_eq!(collector, U256::from(100u64));
    }

    #[test]
    fn failed_execution_keeps_fee() {
        let (app, bank, alice) = app();
        app.begin_block(1).unwrap();
        let result = app
            .deliver_tx(&send(alice, 200), |ctx| {
                ctx.gas_meter_mut().consume(50_000, "execute")?;
                bail!("contract panicked")
            })
            .unwrap();
        assert_eq!((result.code, result.codespace.as_str()), (1, "execute"));
        assert_eq!(result.gas_used, 50_000);
        app.end_block().unwrap();
        app.commit().unwrap();
        // Charged for the 50_000 gas used, tip of 150 refunded.
        assert_eq!(balance(&app, &bank, &alice), U256::from(999_950u64));
    }

    #[test]
    fn rejected_admission_has_no_effect() {
        let (app, bank, alice) = app();
        app.begin_block(1).unwrap();
        let result = app.deliver_tx(&send(alice, 199), burn(0)).unwrap();
        assert_eq!((result.code, result.codespace.as_str()), (4, "ante"));
        assert_eq!(result.fee_route, None);
        assert!(result.events.is_empty());
        app.end_block().unwrap();
        app.commit().unwrap();
        assert_eq!(balance(&app, &bank, &alice), U256::from(1_000_000u64));
    }

    #[test]
    fn check_state_accumulates_until_commit() {
        let (app, bank, alice) = app();
        assert!(app.check_tx(&send(alice, 600_000)).is_ok());
        let second = app.check_tx(&send(alice, 600_000));
        assert_eq!(second.code, 5);

        app.begin_block(1).unwrap();
        app.end_block().unwrap();
        app.commit().unwrap();
        assert!(app.recheck_tx(&send(alice, 600_000)).is_ok());
        assert_eq!(balance(&app, &bank, &alice), U256::from(1_000_000u64));
    }

    #[test]
    fn simulation_reports_gas_without_writes() {
        let (app, bank, alice) = app();
        let tx = FeeTx::new(vec![], Coins::empty(), GAS, alice);
        let result = app.simulate(&tx, burn(100_000));
        assert!(result.is_ok(), "{}", result.log);
        assert_eq!(result.gas_used, 100_000 + 12_490);
        assert_eq!(balance(&app, &bank, &alice), U256::from(1_000_000u64));
    }

    #[test]
    fn end_block_moves_price_with_usage() {
        let (app, _, alice) = app();
        let floor = app.gas_price(DENOM).unwrap();
        app.begin_block(1).unwrap();
        // Five full transactions push the window average above the target.
        for _ in 0..5 {
            let tx = FeeTx::new(
                vec![Msg::Send { from: alice, to: random_address(), amount: ujuno(1) }],
                ujuno(100_000),
                50_000_000,
                alice,
            );
            assert!(app.deliver_tx(&tx, burn(50_000_000)).unwrap().is_ok());
        }
        let state = app.end_block().unwrap().unwrap();
        app.commit().unwrap();
        assert_eq!(app.state().unwrap(), state);
        assert!(app.gas_price(DENOM).unwrap().amount > floor.amount);
        assert_eq!(app.gas_prices().unwrap().len(), 1);
        assert!(app.params().unwrap().enabled);
    }
}
