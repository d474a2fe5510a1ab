//! Governance messages of the fee market.

use levy_domain::{Context, DenomResolver};
use levy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{FeeMarketError, FeeMarketKeeper, Params};

/// Replaces the fee market params.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParams {
    /// Signer, must be the governance authority.
    pub authority: Address,
    /// New params.
    pub params: Params,
}

impl<R: DenomResolver> FeeMarketKeeper<R> {
    /// Handles [`MsgUpdateParams`] at the context's block height.
    pub fn handle_update_params(
        &self,
        ctx: &mut Context<'_>,
        msg: &MsgUpdateParams,
    ) -> Result<(), FeeMarketError> {
        if msg.authority != self.authority() {
            return Err(FeeMarketError::InvalidAuthority {
                expected: self.authority(),
                got: msg.authority,
            });
        }
        let height = ctx.block_height();
        self.update_params(ctx.store_mut(), height, &msg.params)
    }
}
