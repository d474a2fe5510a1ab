//! Sponsored fee route.

use std::sync::Arc;

use levy_domain::{
    ATTRIBUTE_KEY_FEE, ATTRIBUTE_KEY_FEE_PAYER, AccountKeeper, BankKeeper, Context, ContractKeeper,
    DenomResolver, EVENT_TYPE_TX, Event, FeeRoute, FeeTx,
};
use levy_feemarket::FeeMarketKeeper;
use levy_feepay::{FeePayError, FeePayKeeper};
use levy_primitives::Address;
use tracing::debug;

use crate::AnteError;

/// Charges a sponsorable transaction's fee to its target contract.
#[derive(Debug)]
pub struct SponsoredFeeDecorator<B, C, A, R> {
    feepay: Arc<FeePayKeeper<B, C>>,
    feemarket: Arc<FeeMarketKeeper<R>>,
    accounts: A,
}

impl<B, C, A, R> SponsoredFeeDecorator<B, C, A, R>
where
    B: BankKeeper,
    C: ContractKeeper,
    A: AccountKeeper,
    R: DenomResolver,
{
    /// Creates the decorator.
    pub const fn new(
        feepay: Arc<FeePayKeeper<B, C>>,
        feemarket: Arc<FeeMarketKeeper<R>>,
        accounts: A,
    ) -> Self {
        Self { feepay, feemarket, accounts }
    }

    /// Sponsorship keeper.
    pub fn feepay(&self) -> &FeePayKeeper<B, C> {
        &self.feepay
    }

    /// True if `tx` may take the sponsored route.
    pub fn is_eligible(&self, ctx: &Context<'_>, tx: &FeeTx) -> Result<bool, AnteError> {
        Ok(self.feepay.is_valid_sponsored_tx(ctx.store(), tx)?)
    }

    /// Charges the sponsor. Callers run this inside a branch.
    ///
    /// The required fee is `ceil(price * gas_limit)` with the price taken from
    /// the fee market in the bond denom.
    pub fn deduct(&self, ctx: &mut Context<'_>, tx: &FeeTx) -> Result<FeeRoute, AnteError> {
        let Some(contract) = tx.single_contract_call() else {
            return Err(FeePayError::ContractNotRegistered(Address::ZERO).into());
        };
        let wallet = tx.fee_payer();
        let price = self.feemarket.get_current_gas_price(ctx.store(), self.feepay.bond_denom())?;
        let required = self.feepay.compute_required_fee(&price, tx.gas_limit())?;

        if !self.accounts.has_account(ctx.store(), &wallet)? {
            return Err(AnteError::UnknownAddress(wallet));
        }
        self.feepay.check_and_deduct(ctx.store_mut(), &contract, &wallet, &required)?;

        ctx.set_priority(0);
        ctx.emit(
            Event::new(EVENT_TYPE_TX)
                .attr(ATTRIBUTE_KEY_FEE, &required)
                .attr(ATTRIBUTE_KEY_FEE_PAYER, contract),
        );
        debug!(%contract, %wallet, fee = %required, "fee sponsored by contract");
        Ok(FeeRoute::Sponsored { contract, wallet, fee: required })
    }
}
