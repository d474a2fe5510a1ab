//! Post handler interface.

use levy_domain::{Context, FeeTx};

use crate::PostError;

/// Settlement step run after message execution.
pub trait PostHandler {
    /// Settles `tx`. `success` reports whether its messages executed.
    fn post_handle(
        &self,
        ctx: &mut Context<'_>,
        tx: &FeeTx,
        simulate: bool,
        success: bool,
    ) -> Result<(), PostError>;
}

/// Post handler that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopPostHandler;

impl PostHandler for NoopPostHandler {
    fn post_handle(
        &self,
        _ctx: &mut Context<'_>,
        _tx: &FeeTx,
        _simulate: bool,
        _success: bool,
    ) -> Result<(), PostError> {
        Ok(())
    }
}
