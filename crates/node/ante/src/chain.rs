//! Decorator chaining.

use levy_domain::{Context, FeeTx};

use crate::AnteError;

/// A complete admission handler.
pub trait AnteHandler {
    /// Admits `tx` or rejects it with an error.
    fn handle(&self, ctx: &mut Context<'_>, tx: &FeeTx, simulate: bool) -> Result<(), AnteError>;
}

/// One admission step.
///
/// On success a decorator calls `next` exactly once. On rejection it returns
/// the error without calling `next`.
pub trait AnteDecorator {
    /// Runs this step, then the rest of the chain.
    fn ante_handle(
        &self,
        ctx: &mut Context<'_>,
        tx: &FeeTx,
        simulate: bool,
        next: &dyn AnteHandler,
    ) -> Result<(), AnteError>;
}

/// Handler that admits everything. Ends a chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminator;

impl AnteHandler for Terminator {
    fn handle(&self, _ctx: &mut Context<'_>, _tx: &FeeTx, _simulate: bool) -> Result<(), AnteError> {
        Ok(())
    }
}

type BoxedDecorator = Box<dyn AnteDecorator + Send + Sync>;

/// Ordered list of decorators run as a single handler.
#[derive(Default)]
pub struct AnteChain {
    decorators: Vec<BoxedDecorator>,
}

impl std::fmt::Debug for AnteChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnteChain").field("decorators", &self.decorators.len()).finish()
    }
}

impl AnteChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decorator.
    #[must_use]
    pub fn with(mut self, decorator: impl AnteDecorator + Send + Sync + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Number of decorators.
    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    /// True when the chain has no decorators.
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }
}

struct Link<'a> {
    rest: &'a [BoxedDecorator],
}

impl AnteHandler for Link<'_> {
    fn handle(&self, ctx: &mut Context<'_>, tx: &FeeTx, simulate: bool) -> Result<(), AnteError> {
        match self.rest.split_first() {
            Some((first, rest)) => first.ante_handle(ctx, tx, simulate, &Link { rest }),
            None => Terminator.handle(ctx, tx, simulate),
        }
    }
}

impl AnteHandler for AnteChain {
    fn handle(&self, ctx: &mut Context<'_>, tx: &FeeTx, simulate: bool) -> Result<(), AnteError> {
        Link { rest: &self.decorators }.handle(ctx, tx, simulate)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use levy_domain::{BlockInfo, ExecMode};
    use levy_overlay::MemStore;
    use levy_primitives::{Address, Coins};

    use super::*;

    struct Record {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
        reject: bool,
    }

    impl AnteDecorator for Record {
        fn ante_handle(
            &self,
            ctx: &mut Context<'_>,
            tx: &FeeTx,
            simulate: bool,
            next: &dyn AnteHandler,
        ) -> Result<(), AnteError> {
            self.log.lock().unwrap().push(self.name);
            if self.reject {
                return Err(AnteError::InvalidGasLimit);
            }
            next.handle(ctx, tx, simulate)
        }
    }

    fn tx() -> FeeTx {
        FeeTx::new(vec![], Coins::empty(), 1, Address::ZERO)
    }

    #[test]
    fn decorators_run_in_order_and_stop_on_rejection() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let record = |name, reject| Record { name, log: Arc::clone(&log), reject };
        let chain = AnteChain::new().with(record("a", false)).with(record("b", true)).with(record("c", false));
        assert_eq!(chain.len(), 3);

        let mut store = MemStore::new();
        let mut ctx = Context::new(&mut store, BlockInfo::new(1, "levy-test"), ExecMode::Finalize);
        let err = chain.handle(&mut ctx, &tx(), false).unwrap_err();
        assert_eq!(err, AnteError::InvalidGasLimit);
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn empty_chain_admits() {
        let mut store = MemStore::new();
        let mut ctx = Context::new(&mut store, BlockInfo::new(1, "levy-test"), ExecMode::Check);
        assert!(AnteChain::new().is_empty());
        AnteChain::new().handle(&mut ctx, &tx(), false).unwrap();
    }
}
