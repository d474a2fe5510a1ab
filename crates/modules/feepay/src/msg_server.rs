//! Sponsorship messages.

use levy_domain::{BankKeeper, Context, ContractKeeper};
use levy_primitives::{Address, Coins};
use serde::{Deserialize, Serialize};

use crate::{FeePayContract, FeePayError, FeePayKeeper, FeePayParams};

/// Registers a contract for fee sponsorship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRegisterFeePayContract {
    /// Contract admin, or creator when the contract has no admin.
    pub sender: Address,
    /// Contract to register.
    pub contract_address: Address,
    /// Sponsored calls allowed per wallet.
    pub wallet_limit: u64,
}

/// Removes a contract's registration and refunds its balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUnregisterFeePayContract {
    /// Contract admin, or creator when the contract has no admin.
    pub sender: Address,
    /// Contract to unregister.
    pub contract_address: Address,
}

/// Adds funds to a contract's sponsorship balance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgFundFeePayContract {
    /// Funding account.
    pub sender: Address,
    /// Contract to fund.
    pub contract_address: Address,
    /// Exactly one coin of the bond denom.
    pub amount: Coins,
}

/// Changes a contract's per-wallet limit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateFeePayContractWalletLimit {
    /// Contract admin, or creator when the contract has no admin.
    pub sender: Address,
    /// Contract to update.
    pub contract_address: Address,
    /// New limit.
    pub wallet_limit: u64,
}

/// Replaces the module params.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParams {
    /// Signer, must be the governance authority.
    pub authority: Address,
    /// New params.
    pub params: FeePayParams,
}

impl<B: BankKeeper, C: ContractKeeper> FeePayKeeper<B, C> {
    /// Handles [`MsgRegisterFeePayContract`].
    pub fn handle_register(
        &self,
        ctx: &mut Context<'_>,
        msg: &MsgRegisterFeePayContract,
    ) -> Result<FeePayContract, FeePayError> {
        self.register_contract(ctx.store_mut(), &msg.sender, &msg.contract_address, msg.wallet_limit)
    }

    /// Handles [`MsgUnregisterFeePayContract`], returning the refund.
    pub fn handle_unregister(
        &self,
        ctx: &mut Context<'_>,
        msg: &MsgUnregisterFeePayContract,
    ) -> Result<Coins, FeePayError> {
        self.unregister_contract(ctx.store_mut(), &msg.sender, &msg.contract_address)
    }

    /// Handles [`MsgFundFeePayContract`].
    pub fn handle_fund(
        &self,
        ctx: &mut Context<'_>,
        msg: &MsgFundFeePayContract,
    ) -> Result<FeePayContract, FeePayError> {
        self.fund_contract(ctx.store_mut(), &msg.sender, &msg.contract_address, &msg.amount)
    }

    /// Handles [`MsgUpdateFeePayContractWalletLimit`].
    pub fn handle_update_wallet_limit(
        &self,
        ctx: &mut Context<'_>,
        msg: &MsgUpdateFeePayContractWalletLimit,
    ) -> Result<FeePayContract, FeePayError> {
        self.update_wallet_limit(ctx.store_mut(), &msg.sender, &msg.contract_address, msg.wallet_limit)
    }

    /// Handles [`MsgUpdateParams`].
    pub fn handle_update_params(
        &self,
        ctx: &mut Context<'_>,
        msg: &MsgUpdateParams,
    ) -> Result<(), FeePayError> {
        if msg.authority != self.authority() {
            return Err(FeePayError::InvalidAuthority { expected: self.authority(), got: msg.authority });
        }
        self.set_params(ctx.store_mut(), &msg.params)
    }
}
