//! Mempool priority scoring.

use levy_primitives::{Coin, Coins, Dec, DecCoin, U256};

/// Scale applied to the normalized gas price.
pub const PRIORITY_SCALE: u64 = 1_000_000;

/// Priority of a fee-market transaction.
///
/// The effective gas price `fee / gas_limit` is normalized by the current
/// base price. Paying at most the base price yields `0`, anything above
/// yields `truncate(normalized * 10^6)`, saturating at `i64::MAX`.
pub fn get_tx_priority(fee: &Coin, gas_limit: u64, price: &DecCoin) -> i64 {
    if gas_limit == 0 {
        return 0;
    }
    let Ok(effective) = Dec::from_ratio(fee.amount, U256::from(gas_limit)) else {
        return i64::MAX;
    };
    if price.amount.is_zero() {
        return if effective.is_zero() { 0 } else { i64::MAX };
    }
    let Ok(normalized) = effective.checked_quo(price.amount) else {
        return i64::MAX;
    };
    if normalized <= Dec::ONE {
        return 0;
    }
    normalized
        .checked_mul_int(U256::from(PRIORITY_SCALE))
        .map_or(i64::MAX, |scaled| i64::try_from(scaled.truncate()).unwrap_or(i64::MAX))
}

/// Priority used while the fee market is disabled: the smallest per-denom
/// integer gas price of the fee.
pub fn min_gas_price_priority(fee: &Coins, gas_limit: u64) -> i64 {
    if gas_limit == 0 {
        return 0;
    }
    let gas = U256::from(gas_limit);
    fee.iter()
        .map(|coin| i64::try_from(coin.amount / gas).unwrap_or(i64::MAX))
        .min()
        .unwrap_or(0)
}
