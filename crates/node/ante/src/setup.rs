//! Gas meter installation.

use levy_domain::{Context, FeeTx, GasMeter};

use crate::{AnteDecorator, AnteError, AnteHandler};

/// Bounds the context's gas meter by the transaction's gas limit.
///
/// Genesis transactions and simulations keep an unbounded meter.
#[derive(Clone, Copy, Debug, Default)]
pub struct SetUpContextDecorator;

impl AnteDecorator for SetUpContextDecorator {
    fn ante_handle(
        &self,
        ctx: &mut Context<'_>,
        tx: &FeeTx,
        simulate: bool,
        next: &dyn AnteHandler,
    ) -> Result<(), AnteError> {
        let meter = if simulate || ctx.block_height() == 0 {
            GasMeter::infinite()
        } else {
            GasMeter::new(tx.gas_limit())
        };
        *ctx.gas_meter_mut() = meter;
        next.handle(ctx, tx, simulate)
    }
}
