//! Balance ledger.

use levy_domain::{BankError, BankKeeper};
use levy_primitives::{
    Address, Coin, Coins, DISTRIBUTION, FEE_COLLECTOR, FEEMARKET, FEEPAY, GOVERNANCE, U256,
    module_address,
};
use levy_traits::{KvStore, KvStoreExt};

use crate::accounts::account_key;

/// Prefix of balance entries, keyed `{address}/{denom}`.
pub const BALANCES_PREFIX: &[u8] = b"bank/balances/";

fn balance_key(address: &Address, denom: &str) -> Vec<u8> {
    [BALANCES_PREFIX, format!("{address}/{denom}").as_bytes()].concat()
}

/// Bank storing one JSON amount per account and denom.
#[derive(Clone, Debug)]
pub struct StoreBank {
    modules: Vec<String>,
}

impl Default for StoreBank {
    fn default() -> Self {
        Self::new([FEE_COLLECTOR, DISTRIBUTION, FEEPAY, FEEMARKET, GOVERNANCE])
    }
}

impl StoreBank {
    /// Creates a bank that knows the given module accounts.
    pub fn new<I, S>(modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { modules: modules.into_iter().map(Into::into).collect() }
    }

    /// Credits `amount` to `address` out of thin air.
    pub fn mint(&self, store: &mut dyn KvStore, address: &Address, amount: &Coins) -> Result<(), BankError> {
        for coin in amount {
            let balance = self.balance(store, address, &coin.denom)?;
            let next = balance.checked_add(coin.amount).unwrap_or(U256::MAX);
            store.set_json(&balance_key(address, &coin.denom), &next)?;
        }
        store.set(&account_key(address), Vec::new())?;
        Ok(())
    }

    /// Balance of a module account.
    pub fn module_balance(&self, store: &dyn KvStore, module: &str, denom: &str) -> Result<U256, BankError> {
        let address = self.module_account(module)?;
        self.balance(store, &address, denom)
    }

    /// All non-zero balances of `address`.
    pub fn balances(&self, store: &dyn KvStore, address: &Address) -> Result<Coins, BankError> {
        let prefix = [BALANCES_PREFIX, format!("{address}/").as_bytes()].concat();
        let mut coins = Vec::new();
        for (key, _) in store.prefix_scan(&prefix)? {
            let denom = String::from_utf8_lossy(&key[prefix.len()..]).into_owned();
            let amount = self.balance(store, address, &denom)?;
            coins.push(Coin::new(denom, amount));
        }
        Ok(coins.into())
    }

    fn module_account(&self, module: &str) -> Result<Address, BankError> {
        if self.modules.iter().any(|m| m == module) {
            Ok(module_address(module))
        } else {
            Err(BankError::UnknownModule(module.to_string()))
        }
    }

    /// Moves `amount` between two accounts.
    pub fn send_coins(
        &self,
        store: &mut dyn KvStore,
        from: &Address,
        to: &Address,
        amount: &Coins,
    ) -> Result<(), BankError> {
        let held: Coins = amount
            .iter()
            .map(|coin| Ok(Coin::new(coin.denom.clone(), self.balance(store, from, &coin.denom)?)))
            .collect::<Result<Vec<_>, BankError>>()?
            .into();
        if !held.is_all_gte(amount) {
            return Err(BankError::InsufficientFunds { required: amount.clone(), available: held });
        }
        for coin in amount {
            let from_balance = self.balance(store, from, &coin.denom)? - coin.amount;
            store.set_json(&balance_key(from, &coin.denom), &from_balance)?;
        }
        self.mint(store, to, amount)
    }
}

impl BankKeeper for StoreBank {
    fn balance(&self, store: &dyn KvStore, address: &Address, denom: &str) -> Result<U256, BankError> {
        Ok(store.get_json(&balance_key(address, denom))?.unwrap_or_default())
    }

    fn send_coins_from_account_to_module(
        &self,
        store: &mut dyn KvStore,
        sender: &Address,
        module: &str,
        amount: &Coins,
    ) -> Result<(), BankError> {
        let recipient = self.module_account(module)?;
        self.send_coins(store, sender, &recipient, amount)
    }

    fn send_coins_from_module_to_account(
        &self,
        store: &mut dyn KvStore,
        module: &str,
        recipient: &Address,
        amount: &Coins,
    ) -> Result<(), BankError> {
        let sender = self.module_account(module)?;
        self.send_coins(store, &sender, recipient, amount)
    }

    fn send_coins_from_module_to_module(
        &self,
        store: &mut dyn KvStore,
        sender: &str,
        recipient: &str,
        amount: &Coins,
    ) -> Result<(), BankError> {
        let from = self.module_account(sender)?;
        let to = self.module_account(recipient)?;
        self.send_coins(store, &from, &to, amount)
    }
}
