//! Fee route selection.

use levy_domain::{
    AccountKeeper, BankKeeper, Context, ContractKeeper, DenomResolver, FeeGrantKeeper, FeeRoute,
    FeeTx,
};
use tracing::{debug, warn};

use crate::{AnteDecorator, AnteError, AnteHandler, FeeMarketCheckDecorator, SponsoredFeeDecorator};

/// Chooses and executes the fee route of a transaction.
///
/// Sponsorable transactions try the sponsored route first and fall back to
/// the standard route. The chosen [`FeeRoute`] is recorded on the context.
#[derive(Debug)]
pub struct FeeRouteDecorator<B, C, A, G, R> {
    sponsored: SponsoredFeeDecorator<B, C, A, R>,
    standard: FeeMarketCheckDecorator<B, A, G, R>,
}

impl<B, C, A, G, R> FeeRouteDecorator<B, C, A, G, R>
where
    B: BankKeeper,
    C: ContractKeeper,
    A: AccountKeeper,
    G: FeeGrantKeeper,
    R: DenomResolver,
{
    /// Creates the decorator.
    pub const fn new(
        sponsored: SponsoredFeeDecorator<B, C, A, R>,
        standard: FeeMarketCheckDecorator<B, A, G, R>,
    ) -> Self {
        Self { sponsored, standard }
    }

    fn select_route(&self, ctx: &mut Context<'_>, tx: &FeeTx, simulate: bool) -> Result<FeeRoute, AnteError> {
        if !self.sponsored.is_eligible(ctx, tx)? {
            return scoped(ctx, simulate, |ctx| self.standard.deduct(ctx, tx, simulate));
        }
        let sponsored = match scoped(ctx, simulate, |ctx| self.sponsored.deduct(ctx, tx)) {
            Ok(route) => return Ok(route),
            Err(err) => err,
        };
        warn!(payer = %tx.fee_payer(), error = %sponsored, "sponsored route failed, falling back to standard route");
        scoped(ctx, simulate, |ctx| self.standard.deduct(ctx, tx, simulate)).map_err(|standard| {
            AnteError::DeductFeesFailed { sponsored: Box::new(sponsored), standard: Box::new(standard) }
        })
    }
}

impl<B, C, A, G, R> AnteDecorator for FeeRouteDecorator<B, C, A, G, R>
where
    B: BankKeeper,
    C: ContractKeeper,
    A: AccountKeeper,
    G: FeeGrantKeeper,
    R: DenomResolver,
{
    fn ante_handle(
        &self,
        ctx: &mut Context<'_>,
        tx: &FeeTx,
        simulate: bool,
        next: &dyn AnteHandler,
    ) -> Result<(), AnteError> {
        if ctx.block_height() == 0 {
            ctx.set_fee_route(FeeRoute::Genesis);
            return next.handle(ctx, tx, simulate);
        }
        if tx.gas_limit() == 0 && !simulate {
            return Err(AnteError::InvalidGasLimit);
        }
        tx.flattened_msgs(self.standard.options().max_unwrap_depth)?;

        let route = self.select_route(ctx, tx, simulate)?;
        debug!(route = route.name(), payer = %tx.fee_payer(), priority = ctx.priority(), "fee route selected");
        ctx.set_fee_route(route);
        next.handle(ctx, tx, simulate)
    }
}

/// Runs `f` in a branch; simulations never keep its writes.
fn scoped<T, F>(ctx: &mut Context<'_>, simulate: bool, f: F) -> Result<T, AnteError>
where
    F: FnOnce(&mut Context<'_>) -> Result<T, AnteError>,
{
    if simulate { ctx.dry_run(f) } else { ctx.branch(f) }
}
