//! Sponsorship ledger.

use levy_domain::{BankKeeper, ContractInfo, ContractKeeper, FeeTx};
use levy_primitives::{Address, Coin, Coins, DecCoin, FEE_COLLECTOR, FEEPAY};
use levy_traits::{KvStore, KvStoreExt};
use tracing::{debug, info};

use crate::{
    CONTRACTS_PREFIX, FeePayContract, FeePayError, FeePayParams, FeePayQuerier, FeePayWalletUsage,
    MAX_WALLET_LIMIT, PARAMS_KEY, contract_key, contract_uses_key, contract_uses_prefix,
};

/// Keeper of sponsor registrations, balances and per-wallet usage.
#[derive(Clone, Debug)]
pub struct FeePayKeeper<B, C> {
    bank: B,
    contracts: C,
    bond_denom: String,
    authority: Address,
}

impl<B: BankKeeper, C: ContractKeeper> FeePayKeeper<B, C> {
    /// Creates a keeper holding sponsor balances in `bond_denom`.
    pub fn new(bank: B, contracts: C, bond_denom: impl Into<String>, authority: Address) -> Self {
        Self { bank, contracts, bond_denom: bond_denom.into(), authority }
    }

    /// Bank collaborator.
    pub const fn bank(&self) -> &B {
        &self.bank
    }

    /// Denomination of sponsor balances.
    pub fn bond_denom(&self) -> &str {
        &self.bond_denom
    }

    /// Governance authority.
    pub const fn authority(&self) -> Address {
        self.authority
    }

    /// Read-only query view over `store`.
    pub const fn querier<'a>(&'a self, store: &'a dyn KvStore) -> FeePayQuerier<'a, B, C> {
        FeePayQuerier::new(self, store)
    }

    /// Module params, defaulting to enabled when unset.
    pub fn get_params(&self, store: &dyn KvStore) -> Result<FeePayParams, FeePayError> {
        Ok(store.get_json(PARAMS_KEY)?.unwrap_or_default())
    }

    /// Stores module params.
    pub fn set_params(&self, store: &mut dyn KvStore, params: &FeePayParams) -> Result<(), FeePayError> {
        Ok(store.set_json(PARAMS_KEY, params)?)
    }

    /// True if `contract` has a sponsorship registration.
    pub fn is_contract_registered(&self, store: &dyn KvStore, contract: &Address) -> Result<bool, FeePayError> {
        Ok(store.has(&contract_key(contract))?)
    }

    /// Registration of `contract`.
    pub fn get_contract(&self, store: &dyn KvStore, contract: &Address) -> Result<FeePayContract, FeePayError> {
        store.get_json(&contract_key(contract))?.ok_or(FeePayError::ContractNotRegistered(*contract))
    }

    /// Every registration, ordered by contract key.
    pub fn get_contracts(&self, store: &dyn KvStore) -> Result<Vec<FeePayContract>, FeePayError> {
        Ok(store.scan_json(CONTRACTS_PREFIX)?)
    }

    /// Stores a registration.
    pub fn set_contract(&self, store: &mut dyn KvStore, contract: &FeePayContract) -> Result<(), FeePayError> {
        Ok(store.set_json(&contract_key(&contract.contract_address), contract)?)
    }

    /// Returns the contract's ownership info if `sender` may manage it.
    ///
    /// The admin manages a contract that has one, otherwise the creator does.
    pub fn ensure_contract_manager(
        &self,
        store: &dyn KvStore,
        sender: &Address,
        contract: &Address,
    ) -> Result<ContractInfo, FeePayError> {
        let info = self
            .contracts
            .contract_info(store, contract)?
            .ok_or(FeePayError::InvalidContract(*contract))?;
        match info.admin {
            Some(admin) if admin != *sender => {
                Err(FeePayError::ContractNotAdmin { contract: *contract, sender: *sender })
            }
            None if info.creator != *sender => {
                Err(FeePayError::ContractNotCreator { contract: *contract, sender: *sender })
            }
            _ => Ok(info),
        }
    }

    /// Registers `contract` with a zero balance.
    pub fn register_contract(
        &self,
        store: &mut dyn KvStore,
        sender: &Address,
        contract: &Address,
        wallet_limit: u64,
    ) -> Result<FeePayContract, FeePayError> {
        validate_wallet_limit(wallet_limit)?;
        if self.is_contract_registered(store, contract)? {
            return Err(FeePayError::ContractAlreadyRegistered(*contract));
        }
        self.ensure_contract_manager(store, sender, contract)?;
        let registration =
            FeePayContract { contract_address: *contract, balance: Default::default(), wallet_limit };
        self.set_contract(store, &registration)?;
        info!(%contract, wallet_limit, "fee pay contract registered");
        Ok(registration)
    }

    /// Removes `contract`, refunding its balance to its manager.
    ///
    /// Every usage counter of the contract is deleted. Returns the refund.
    pub fn unregister_contract(
        &self,
        store: &mut dyn KvStore,
        sender: &Address,
        contract: &Address,
    ) -> Result<Coins, FeePayError> {
        let registration = self.get_contract(store, contract)?;
        let info = self.ensure_contract_manager(store, sender, contract)?;
        let refund = Coins::single(Coin::new(self.bond_denom.as_str(), registration.balance));
        if !refund.is_empty() {
            self.bank.send_coins_from_module_to_account(store, FEEPAY, &info.manager(), &refund)?;
        }
        store.delete(&contract_key(contract))?;
        for (key, _) in store.prefix_scan(&contract_uses_prefix(contract))? {
            store.delete(&key)?;
        }
        info!(%contract, refund = %refund, "fee pay contract unregistered");
        Ok(refund)
    }

    /// Adds `amount` to the balance of `contract`, paid by `sender`.
    pub fn fund_contract(
        &self,
        store: &mut dyn KvStore,
        sender: &Address,
        contract: &Address,
        amount: &Coins,
    ) -> Result<FeePayContract, FeePayError> {
        let coin = match amount.iter().collect::<Vec<_>>().as_slice() {
            [coin] if coin.denom == self.bond_denom => (*coin).clone(),
            _ => {
                return Err(FeePayError::InvalidFundAmount(format!(
                    "expected a single {} coin, got \"{amount}\"",
                    self.bond_denom
                )));
            }
        };
        let mut registration = self.get_contract(store, contract)?;
        registration.balance = registration
            .balance
            .checked_add(coin.amount)
            .ok_or_else(|| FeePayError::InvalidFundAmount(format!("balance overflow for {contract}")))?;
        self.bank.send_coins_from_account_to_module(store, sender, FEEPAY, amount)?;
        self.set_contract(store, &registration)?;
        info!(%contract, %sender, amount = %coin, balance = %registration.balance, "fee pay contract funded");
        Ok(registration)
    }

    /// Changes the per-wallet limit of `contract`.
    pub fn update_wallet_limit(
        &self,
        store: &mut dyn KvStore,
        sender: &Address,
        contract: &Address,
        wallet_limit: u64,
    ) -> Result<FeePayContract, FeePayError> {
        validate_wallet_limit(wallet_limit)?;
        let mut registration = self.get_contract(store, contract)?;
        self.ensure_contract_manager(store, sender, contract)?;
        registration.wallet_limit = wallet_limit;
        self.set_contract(store, &registration)?;
        info!(%contract, wallet_limit, "fee pay wallet limit updated");
        Ok(registration)
    }

    /// Sponsored calls `wallet` made on `contract`.
    pub fn get_contract_uses(
        &self,
        store: &dyn KvStore,
        contract: &Address,
        wallet: &Address,
    ) -> Result<u64, FeePayError> {
        let usage: Option<FeePayWalletUsage> = store.get_json(&contract_uses_key(contract, wallet))?;
        Ok(usage.map_or(0, |usage| usage.uses))
    }

    /// Counts one more sponsored call and returns the new total.
    pub fn increment_contract_uses(
        &self,
        store: &mut dyn KvStore,
        contract: &Address,
        wallet: &Address,
    ) -> Result<u64, FeePayError> {
        let uses = self.get_contract_uses(store, contract, wallet)?.saturating_add(1);
        let usage = FeePayWalletUsage { contract_address: *contract, wallet_address: *wallet, uses };
        store.set_json(&contract_uses_key(contract, wallet), &usage)?;
        Ok(uses)
    }

    /// True once `wallet` reached the contract's per-wallet limit.
    pub fn has_wallet_exceeded_usage_limit(
        &self,
        store: &dyn KvStore,
        registration: &FeePayContract,
        wallet: &Address,
    ) -> Result<bool, FeePayError> {
        let uses = self.get_contract_uses(store, &registration.contract_address, wallet)?;
        Ok(uses >= registration.wallet_limit)
    }

    /// Checks that `contract` can sponsor another call from `wallet`.
    pub fn is_wallet_eligible(
        &self,
        store: &dyn KvStore,
        contract: &Address,
        wallet: &Address,
    ) -> Result<(), FeePayError> {
        let registration = self.get_contract(store, contract)?;
        if registration.balance.is_zero() {
            return Err(FeePayError::ContractNotEnoughFunds {
                contract: *contract,
                balance: registration.balance,
                required: Default::default(),
            });
        }
        if self.has_wallet_exceeded_usage_limit(store, &registration, wallet)? {
            return Err(FeePayError::WalletExceededUsageLimit {
                contract: *contract,
                wallet: *wallet,
                limit: registration.wallet_limit,
            });
        }
        Ok(())
    }

    /// Fee a sponsor pays for `gas_limit` gas at `price`, rounded up.
    pub fn compute_required_fee(&self, price: &DecCoin, gas_limit: u64) -> Result<Coin, FeePayError> {
        Ok(price.fee_for_gas(gas_limit)?)
    }

    /// True if `tx` qualifies for sponsorship.
    ///
    /// Sponsorship must be enabled, the fee must be zero, and the transaction
    /// must be a single direct call to a registered contract.
    pub fn is_valid_sponsored_tx(&self, store: &dyn KvStore, tx: &FeeTx) -> Result<bool, FeePayError> {
        if !tx.fee().is_empty() {
            return Ok(false);
        }
        let Some(contract) = tx.single_contract_call() else {
            return Ok(false);
        };
        if !self.get_params(store)?.enable_feepay {
            return Ok(false);
        }
        self.is_contract_registered(store, &contract)
    }

    /// Charges `required` to the sponsor on behalf of `wallet`.
    ///
    /// Moves the fee from the sponsor pool to the fee collector, decrements
    /// the contract balance and counts the wallet's use. Callers run this in
    /// a rollback scope shared with the rest of admission.
    pub fn check_and_deduct(
        &self,
        store: &mut dyn KvStore,
        contract: &Address,
        wallet: &Address,
        required: &Coin,
    ) -> Result<FeePayContract, FeePayError> {
        if !self.get_params(store)?.enable_feepay {
            return Err(FeePayError::FeePayDisabled);
        }
        let mut registration = self.get_contract(store, contract)?;
        if self.has_wallet_exceeded_usage_limit(store, &registration, wallet)? {
            return Err(FeePayError::WalletExceededUsageLimit {
                contract: *contract,
                wallet: *wallet,
                limit: registration.wallet_limit,
            });
        }
        let Some(remaining) = registration.balance.checked_sub(required.amount) else {
            return Err(FeePayError::ContractNotEnoughFunds {
                contract: *contract,
                balance: registration.balance,
                required: required.amount,
            });
        };
        let fee = Coins::single(required.clone());
        if !fee.is_empty() {
            self.bank.send_coins_from_module_to_module(store, FEEPAY, FEE_COLLECTOR, &fee)?;
        }
        registration.balance = remaining;
        self.set_contract(store, &registration)?;
        let uses = self.increment_contract_uses(store, contract, wallet)?;
        debug!(%contract, %wallet, fee = %required, uses, balance = %remaining, "sponsored fee deducted");
        Ok(registration)
    }
}

const fn validate_wallet_limit(wallet_limit: u64) -> Result<(), FeePayError> {
    if wallet_limit > MAX_WALLET_LIMIT {
        return Err(FeePayError::InvalidWalletLimit(wallet_limit));
    }
    Ok(())
}
