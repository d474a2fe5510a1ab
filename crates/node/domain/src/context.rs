//! Per-transaction execution context.

use levy_overlay::{ChangeSet, OverlayStore};
use levy_traits::{KvStore, StoreError};

use crate::{Event, FeeRoute, GasMeter};

/// Mode the pipeline is invoked in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecMode {
    /// Mempool admission of a new transaction.
    Check,
    /// Mempool re-validation after a block commits.
    ReCheck,
    /// Gas estimation against a throwaway view.
    Simulate,
    /// Block execution.
    Finalize,
}

/// Block-level information visible to a transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// Height of the block being built or checked against.
    pub height: u64,
    /// Chain identifier.
    pub chain_id: String,
}

impl BlockInfo {
    /// Creates block info.
    pub fn new(height: u64, chain_id: impl Into<String>) -> Self {
        Self { height, chain_id: chain_id.into() }
    }
}

/// Mutable state threaded through one transaction's ante, execution and post stages.
pub struct Context<'a> {
    store: &'a mut dyn KvStore,
    block: BlockInfo,
    mode: ExecMode,
    gas_meter: GasMeter,
    priority: i64,
    events: Vec<Event>,
    fee_route: Option<FeeRoute>,
}

struct BranchOutcome {
    gas_meter: GasMeter,
    priority: i64,
    events: Vec<Event>,
    fee_route: Option<FeeRoute>,
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("block", &self.block)
            .field("mode", &self.mode)
            .field("gas_meter", &self.gas_meter)
            .field("priority", &self.priority)
            .field("fee_route", &self.fee_route)
            .finish_non_exhaustive()
    }
}

impl<'a> Context<'a> {
    /// Creates a context with an unbounded gas meter.
    pub fn new(store: &'a mut dyn KvStore, block: BlockInfo, mode: ExecMode) -> Self {
        Self {
            store,
            block,
            mode,
            gas_meter: GasMeter::infinite(),
            priority: 0,
            events: Vec::new(),
            fee_route: None,
        }
    }

    /// Replaces the gas meter.
    #[must_use]
    pub fn with_gas_meter(mut self, gas_meter: GasMeter) -> Self {
        self.gas_meter = gas_meter;
        self
    }

    /// Read access to state.
    pub fn store(&self) -> &dyn KvStore {
        &*self.store
    }

    /// Write access to state.
    pub fn store_mut(&mut self) -> &mut dyn KvStore {
        &mut *self.store
    }

    /// Current block information.
    pub const fn block(&self) -> &BlockInfo {
        &self.block
    }

    /// Current block height.
    pub const fn block_height(&self) -> u64 {
        self.block.height
    }

    /// Invocation mode.
    pub const fn mode(&self) -> ExecMode {
        self.mode
    }

    /// True for mempool admission, including re-checks.
    pub const fn is_check_tx(&self) -> bool {
        matches!(self.mode, ExecMode::Check | ExecMode::ReCheck)
    }

    /// Gas meter.
    pub const fn gas_meter(&self) -> &GasMeter {
        &self.gas_meter
    }

    /// Mutable gas meter.
    pub const fn gas_meter_mut(&mut self) -> &mut GasMeter {
        &mut self.gas_meter
    }

    /// Mempool priority assigned so far.
    pub const fn priority(&self) -> i64 {
        self.priority
    }

    /// Sets the mempool priority.
    pub const fn set_priority(&mut self, priority: i64) {
        self.priority = priority;
    }

    /// Appends an event.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events emitted so far.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drains emitted events.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Fee route chosen at admission.
    pub const fn fee_route(&self) -> Option<&FeeRoute> {
        self.fee_route.as_ref()
    }

    /// Records the fee route.
    pub fn set_fee_route(&mut self, route: FeeRoute) {
        self.fee_route = Some(route);
    }

    /// Runs `f` on a branch of this context.
    ///
    /// On success the branch's writes, events, priority and route are merged
    /// back. On failure they are dropped. Gas consumed inside the branch is
    /// kept either way.
    pub fn branch<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Context<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let (result, changes, outcome) = self.run_branch(f);
        self.gas_meter = outcome.gas_meter;
        let value = result?;
        changes.apply_to(&mut *self.store)?;
        self.absorb(outcome);
        Ok(value)
    }

    /// Like [`Context::branch`], but state writes are always discarded.
    pub fn dry_run<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Context<'_>) -> Result<T, E>,
    {
        let (result, _, outcome) = self.run_branch(f);
        self.gas_meter = outcome.gas_meter;
        let value = result?;
        self.absorb(outcome);
        Ok(value)
    }

    fn run_branch<T, E, F>(&mut self, f: F) -> (Result<T, E>, ChangeSet, BranchOutcome)
    where
        F: FnOnce(&mut Context<'_>) -> Result<T, E>,
    {
        let mut overlay = OverlayStore::new(&*self.store);
        let mut child = Context {
            store: &mut overlay,
            block: self.block.clone(),
            mode: self.mode,
            gas_meter: self.gas_meter,
            priority: self.priority,
            events: Vec::new(),
            fee_route: self.fee_route.clone(),
        };
        let result = f(&mut child);
        let outcome = BranchOutcome {
            gas_meter: child.gas_meter,
            priority: child.priority,
            events: child.events,
            fee_route: child.fee_route,
        };
        (result, overlay.into_changes(), outcome)
    }

    fn absorb(&mut self, outcome: BranchOutcome) {
        self.priority = outcome.priority;
        self.events.extend(outcome.events);
        self.fee_route = outcome.fee_route;
    }
}
