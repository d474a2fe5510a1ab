//! Settlement of escrowed fees.

use std::sync::Arc;

use levy_config::DEFAULT_SIMULATION_BANK_SEND_GAS;
use levy_domain::{
    ATTRIBUTE_KEY_FEE, ATTRIBUTE_KEY_FEE_PAYER, ATTRIBUTE_KEY_TIP, ATTRIBUTE_KEY_TIP_PAYEE,
    BankKeeper, Context, DenomResolver, EVENT_TYPE_FEE_SETTLED, Event, FeeRoute, FeeTx,
};
use levy_feemarket::FeeMarketKeeper;
use levy_primitives::{Coin, Coins, DISTRIBUTION, FEE_COLLECTOR};
use tracing::debug;

use crate::{PostError, PostHandler};

/// Settles standard-route fees against the gas actually consumed.
#[derive(Debug)]
pub struct FeeMarketDeductDecorator<B, R> {
    bank: B,
    feemarket: Arc<FeeMarketKeeper<R>>,
    bank_send_gas: u64,
}

impl<B: BankKeeper, R: DenomResolver> FeeMarketDeductDecorator<B, R> {
    /// Creates the decorator with the default simulation surcharge.
    pub const fn new(bank: B, feemarket: Arc<FeeMarketKeeper<R>>) -> Self {
        Self { bank, feemarket, bank_send_gas: DEFAULT_SIMULATION_BANK_SEND_GAS }
    }

    /// Sets the gas consumed in simulation for the settlement bank sends.
    #[must_use]
    pub fn with_bank_send_gas(mut self, gas: u64) -> Self {
        self.bank_send_gas = gas;
        self
    }
}

impl<B: BankKeeper, R: DenomResolver> PostHandler for FeeMarketDeductDecorator<B, R> {
    fn post_handle(
        &self,
        ctx: &mut Context<'_>,
        _tx: &FeeTx,
        simulate: bool,
        success: bool,
    ) -> Result<(), PostError> {
        let Some(FeeRoute::Standard { payer, deducted_from, fee }) = ctx.fee_route().cloned() else {
            return Ok(());
        };
        let params = self.feemarket.get_params(ctx.store())?;
        if !params.enabled {
            return Ok(());
        }
        let height = ctx.block_height();
        if self.feemarket.get_enabled_height(ctx.store())? == Some(height) {
            debug!(height, "fee market enabled in this block, settlement skipped");
            return Ok(());
        }
        if simulate {
            ctx.gas_meter_mut().consume(self.bank_send_gas, "simulated fee settlement")?;
            return Ok(());
        }

        let gas_used = ctx.gas_meter().consumed();
        let price = self.feemarket.get_current_gas_price(ctx.store(), &fee.denom)?;
        let cost = price.fee_for_gas(gas_used)?;
        let Some(tip_amount) = fee.amount.checked_sub(cost.amount) else {
            return Err(PostError::InsufficientFunds { reserved: fee, required: cost });
        };

        if params.distribute_fees && !cost.is_zero() {
            self.bank.send_coins_from_module_to_module(
                ctx.store_mut(),
                FEE_COLLECTOR,
                DISTRIBUTION,
                &Coins::single(cost.clone()),
            )?;
        }
        let tip = Coin::new(fee.denom.as_str(), tip_amount);
        if !tip.is_zero() {
            self.bank.send_coins_from_module_to_account(
                ctx.store_mut(),
                FEE_COLLECTOR,
                &deducted_from,
                &Coins::single(tip.clone()),
            )?;
        }

        ctx.emit(
            Event::new(EVENT_TYPE_FEE_SETTLED)
                .attr(ATTRIBUTE_KEY_FEE, &cost)
                .attr(ATTRIBUTE_KEY_FEE_PAYER, payer)
                .attr(ATTRIBUTE_KEY_TIP, &tip)
                .attr(ATTRIBUTE_KEY_TIP_PAYEE, deducted_from),
        );
        debug!(%payer, cost = %cost, tip = %tip, gas_used, success, "fee settled");
        Ok(())
    }
}
