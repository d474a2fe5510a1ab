//! Standard fee route.

use std::sync::Arc;

use levy_domain::{
    ATTRIBUTE_KEY_FEE, ATTRIBUTE_KEY_FEE_PAYER, AccountKeeper, BankKeeper, Context, DenomResolver,
    EVENT_TYPE_TX, Event, FeeGrantKeeper, FeeRoute, FeeTx,
};
use levy_feemarket::FeeMarketKeeper;
use levy_primitives::{Address, Coin, Coins, FEE_COLLECTOR};
use tracing::debug;

use crate::{AnteError, AnteOptions, get_tx_priority, min_gas_price_priority};

/// Prices, checks and escrows the declared fee.
#[derive(Debug)]
pub struct FeeMarketCheckDecorator<B, A, G, R> {
    bank: B,
    accounts: A,
    feegrant: G,
    feemarket: Arc<FeeMarketKeeper<R>>,
    options: AnteOptions,
}

impl<B, A, G, R> FeeMarketCheckDecorator<B, A, G, R>
where
    B: BankKeeper,
    A: AccountKeeper,
    G: FeeGrantKeeper,
    R: DenomResolver,
{
    /// Creates the decorator.
    pub const fn new(
        bank: B,
        accounts: A,
        feegrant: G,
        feemarket: Arc<FeeMarketKeeper<R>>,
        options: AnteOptions,
    ) -> Self {
        Self { bank, accounts, feegrant, feemarket, options }
    }

    /// Admission options.
    pub const fn options(&self) -> &AnteOptions {
        &self.options
    }

    /// Deducts the fee of `tx`. Callers run this inside a branch.
    pub fn deduct(&self, ctx: &mut Context<'_>, tx: &FeeTx, simulate: bool) -> Result<FeeRoute, AnteError> {
        let params = self.feemarket.get_params(ctx.store())?;
        if !params.enabled {
            return self.deduct_legacy(ctx, tx, simulate);
        }

        let fee = match tx.fee().iter().collect::<Vec<_>>().as_slice() {
            [] if simulate => Coin::zero(params.fee_denom.as_str()),
            [] => return Err(AnteError::NoFeeCoins),
            [coin] => (*coin).clone(),
            coins => return Err(AnteError::TooManyFeeCoins(coins.len())),
        };
        let gas_limit = tx.gas_limit();
        let price = self.feemarket.get_current_gas_price(ctx.store(), &fee.denom)?;
        if !simulate {
            let required = price.fee_for_gas(gas_limit)?;
            if fee.amount < required.amount {
                return Err(AnteError::InsufficientFee {
                    got: Coins::single(fee),
                    required: Coins::single(required),
                });
            }
        }

        let deducted_from = self.escrow(ctx, tx, &Coins::single(fee.clone()))?;
        let priority = get_tx_priority(&fee, gas_limit, &price);
        ctx.set_priority(priority);
        debug!(payer = %deducted_from, fee = %fee, %price, priority, "fee escrowed");
        Ok(FeeRoute::Standard { payer: tx.fee_payer(), deducted_from, fee })
    }

    /// Deduction while the fee market is disabled.
    ///
    /// CheckTx enforces the validator's minimum gas prices, then the declared
    /// fee is taken as is.
    fn deduct_legacy(&self, ctx: &mut Context<'_>, tx: &FeeTx, simulate: bool) -> Result<FeeRoute, AnteError> {
        let fee = tx.fee().clone();
        let gas_limit = tx.gas_limit();
        if ctx.is_check_tx() && !simulate && !self.options.min_gas_prices.is_empty() {
            let required: Coins = self
                .options
                .min_gas_prices
                .iter()
                .map(|price| price.fee_for_gas(gas_limit))
                .collect::<Result<Vec<_>, _>>()?
                .into();
            if !required.is_empty() && !fee.is_any_gte(&required) {
                return Err(AnteError::InsufficientFee { got: fee, required });
            }
        }

        let deducted_from = self.escrow(ctx, tx, &fee)?;
        ctx.set_priority(min_gas_price_priority(&fee, gas_limit));
        debug!(payer = %deducted_from, fee = %fee, "fee deducted with fee market disabled");
        Ok(FeeRoute::Legacy { deducted_from, fee })
    }

    /// Spends a fee grant if one is named, then moves `fee` to the fee
    /// collector. Returns the debited account.
    fn escrow(&self, ctx: &mut Context<'_>, tx: &FeeTx, fee: &Coins) -> Result<Address, AnteError> {
        let payer = tx.fee_payer();
        let deducted_from = match tx.fee_granter() {
            Some(granter) if granter != payer => {
                let msgs = tx.flattened_msgs(self.options.max_unwrap_depth)?;
                self.feegrant.use_granted_fees(ctx.store_mut(), &granter, &payer, fee, &msgs)?;
                granter
            }
            Some(granter) => granter,
            None => payer,
        };
        if !self.accounts.has_account(ctx.store(), &deducted_from)? {
            return Err(AnteError::UnknownAddress(deducted_from));
        }
        if !fee.is_empty() {
            self.bank.send_coins_from_account_to_module(ctx.store_mut(), &deducted_from, FEE_COLLECTOR, fee)?;
        }
        ctx.emit(
            Event::new(EVENT_TYPE_TX)
                .attr(ATTRIBUTE_KEY_FEE, fee)
                .attr(ATTRIBUTE_KEY_FEE_PAYER, deducted_from),
        );
        Ok(deducted_from)
    }
}
