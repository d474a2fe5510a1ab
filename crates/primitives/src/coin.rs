//! Coin amounts and sorted coin sets.

use std::{collections::BTreeMap, fmt, str::FromStr};

use alloy_primitives::{U256, ruint::UintTryFrom};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Dec, DecError};

/// Errors raised while parsing or validating coins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoinError {
    /// The denomination is empty or contains invalid characters.
    #[error("invalid denom: {0:?}")]
    InvalidDenom(String),

    /// The coin string could not be split into amount and denom.
    #[error("invalid coin: {0:?}")]
    InvalidCoin(String),

    /// The amount could not be parsed.
    #[error(transparent)]
    Amount(#[from] DecError),
}

fn validate_denom(denom: &str) -> Result<(), CoinError> {
    let mut chars = denom.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
        && denom.len() <= 128;
    if valid { Ok(()) } else { Err(CoinError::InvalidDenom(denom.to_string())) }
}

fn split_amount(s: &str) -> Result<(&str, &str), CoinError> {
    let at = s
        .find(|c: char| c.is_ascii_alphabetic())
        .ok_or_else(|| CoinError::InvalidCoin(s.to_string()))?;
    let (amount, denom) = s.split_at(at);
    if amount.is_empty() {
        return Err(CoinError::InvalidCoin(s.to_string()));
    }
    validate_denom(denom)?;
    Ok((amount, denom))
}

/// A whole-number amount of a single denomination.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Denomination.
    pub denom: String,
    /// Amount in base units.
    pub amount: U256,
}

impl Coin {
    /// Creates a coin.
    pub fn new<A>(denom: impl Into<String>, amount: A) -> Self
    where
        U256: UintTryFrom<A>,
    {
        Self { denom: denom.into(), amount: U256::from(amount) }
    }

    /// Creates a zero-amount coin.
    pub fn zero(denom: impl Into<String>) -> Self {
        Self { denom: denom.into(), amount: U256::ZERO }
    }

    /// Returns true when the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Validates the denomination.
    pub fn validate(&self) -> Result<(), CoinError> {
        validate_denom(&self.denom)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount(s.trim())?;
        if !amount.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoinError::InvalidCoin(s.to_string()));
        }
        let amount = U256::from_str_radix(amount, 10).map_err(|_| DecError::Overflow)?;
        Ok(Self::new(denom, amount))
    }
}

/// A decimal amount of a single denomination, used for gas prices.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DecCoin {
    /// Denomination.
    pub denom: String,
    /// Decimal amount.
    pub amount: Dec,
}

impl DecCoin {
    /// Creates a decimal coin.
    pub fn new(denom: impl Into<String>, amount: Dec) -> Self {
        Self { denom: denom.into(), amount }
    }

    /// Returns `ceil(amount * gas)` as a coin of the same denom.
    pub fn fee_for_gas(&self, gas: u64) -> Result<Coin, DecError> {
        let cost = self.amount.checked_mul_int(U256::from(gas))?;
        Ok(Coin::new(self.denom.clone(), cost.ceil()))
    }
}

impl fmt::Display for DecCoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for DecCoin {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, denom) = split_amount(s.trim())?;
        Ok(Self::new(denom, amount.parse()?))
    }
}

/// A set of coins sorted by denom, holding no zero amounts and no duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Coin>", into = "Vec<Coin>")]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// Creates an empty set.
    pub const fn empty() -> Self {
        Self(Vec::new())
    }

    /// Creates a set holding a single coin, empty if the coin is zero.
    pub fn single(coin: Coin) -> Self {
        if coin.is_zero() { Self::empty() } else { Self(vec![coin]) }
    }

    /// Returns true when the set holds no coins.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct denominations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the coins in denom order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// First coin in denom order.
    pub fn first(&self) -> Option<&Coin> {
        self.0.first()
    }

    /// Amount held in `denom`, zero when absent.
    pub fn amount_of(&self, denom: &str) -> U256 {
        self.0.iter().find(|c| c.denom == denom).map_or(U256::ZERO, |c| c.amount)
    }

    /// Returns the sum, or `None` on overflow.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let mut totals = self.to_map();
        for coin in other.iter() {
            let entry = totals.entry(coin.denom.clone()).or_default();
            *entry = entry.checked_add(coin.amount)?;
        }
        Some(Self::from_map(totals))
    }

    /// Returns `self - other`, or `None` if any denom would go negative.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let mut totals = self.to_map();
        for coin in other.iter() {
            let entry = totals.entry(coin.denom.clone()).or_default();
            *entry = entry.checked_sub(coin.amount)?;
        }
        Some(Self::from_map(totals))
    }

    /// True when `self` holds at least `other` in every denom of `other`.
    pub fn is_all_gte(&self, other: &Self) -> bool {
        other.iter().all(|c| self.amount_of(&c.denom) >= c.amount)
    }

    /// True when `self` holds at least `other` in some denom of `other`.
    pub fn is_any_gte(&self, other: &Self) -> bool {
        other.iter().any(|c| self.amount_of(&c.denom) >= c.amount)
    }

    /// Validates every denomination.
    pub fn validate(&self) -> Result<(), CoinError> {
        self.0.iter().try_for_each(Coin::validate)
    }

    fn to_map(&self) -> BTreeMap<String, U256> {
        self.0.iter().map(|c| (c.denom.clone(), c.amount)).collect()
    }

    fn from_map(map: BTreeMap<String, U256>) -> Self {
        Self(
            map.into_iter()
                .filter(|(_, amount)| !amount.is_zero())
                .map(|(denom, amount)| Coin { denom, amount })
                .collect(),
        )
    }
}

impl FromIterator<Coin> for Coins {
    /// Collects coins, summing duplicate denoms and dropping zeros.
    ///
    /// Amounts that overflow saturate at `U256::MAX`.
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        let mut totals = BTreeMap::<String, U256>::new();
        for coin in iter {
            let entry = totals.entry(coin.denom).or_default();
            *entry = entry.saturating_add(coin.amount);
        }
        Self::from_map(totals)
    }
}

impl From<Vec<Coin>> for Coins {
    fn from(coins: Vec<Coin>) -> Self {
        coins.into_iter().collect()
    }
}

impl From<Coins> for Vec<Coin> {
    fn from(coins: Coins) -> Self {
        coins.0
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{coin}")?;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = CoinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::empty());
        }
        s.split(',').map(str::parse).collect::<Result<Vec<Coin>, _>>().map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn coins(s: &str) -> Coins {
        s.parse().unwrap()
    }

    #[test]
    fn coin_accepts_native_and_wide_amounts() {
        let narrow = Coin::new("ujuno", 7u64);
        let wide = Coin::new("ujuno", U256::from(7u64));
        assert_eq!(narrow, wide);
        assert!(!narrow.is_zero());
        assert!(Coin::new("ujuno", 0u128).is_zero());
        assert!(Dec::ZERO.is_zero());
    }

    #[test]
    fn coins_are_sorted_merged_and_nonzero() {
        let set: Coins =
            vec![Coin::new("uosmo", 5u64), Coin::new("ujuno", 3u64), Coin::new("ujuno", 2u64), Coin::zero("uatom")]
                .into();
        assert_eq!(set.to_string(), "5ujuno,5uosmo");
        assert_eq!(set.len(), 2);
        assert_eq!(set.amount_of("uatom"), U256::ZERO);
    }

    #[test]
    fn add_and_sub() {
        let a = coins("10ujuno,4uosmo");
        let b = coins("3ujuno");
        assert_eq!(a.checked_add(&b).unwrap(), coins("13ujuno,4uosmo"));
        assert_eq!(a.checked_sub(&b).unwrap(), coins("7ujuno,4uosmo"));
        assert_eq!(b.checked_sub(&a), None);
        assert_eq!(a.checked_sub(&coins("4uosmo")).unwrap(), coins("10ujuno"));
    }

    #[rstest]
    #[case("10ujuno", "10ujuno", true, true)]
    #[case("10ujuno", "11ujuno", false, false)]
    #[case("10ujuno", "5ujuno,100uosmo", false, true)]
    #[case("", "1ujuno", false, false)]
    fn comparisons(#[case] have: &str, #[case] need: &str, #[case] all: bool, #[case] any: bool) {
        let have = coins(have);
        let need = coins(need);
        assert_eq!(have.is_all_gte(&need), all);
        assert_eq!(have.is_any_gte(&need), any);
    }

    #[rstest]
    #[case("0.001ujuno", "ujuno", "0.001")]
    #[case("1.5ibc/27394FB0", "ibc/27394FB0", "1.5")]
    fn parse_dec_coin(#[case] input: &str, #[case] denom: &str, #[case] amount: &str) {
        let coin: DecCoin = input.parse().unwrap();
        assert_eq!(coin.denom, denom);
        assert_eq!(coin.amount, amount.parse().unwrap());
    }

    #[rstest]
    #[case("ujuno")]
    #[case("12")]
    #[case("1.5ujuno")]
    #[case("10u juno")]
    fn parse_coin_rejects(#[case] input: &str) {
        assert!(input.parse::<Coin>().is_err());
    }

    #[test]
    fn fee_for_gas_rounds_up() {
        let price: DecCoin = "0.0015ujuno".parse().unwrap();
        assert_eq!(price.fee_for_gas(1000).unwrap(), Coin::new("ujuno", 2u64));
        assert_eq!(price.fee_for_gas(0).unwrap(), Coin::zero("ujuno"));
    }

    #[test]
    fn serde_roundtrip_normalizes() {
        let json = r#"[{"denom":"uosmo","amount":"0x1"},{"denom":"ujuno","amount":"0x2"}]"#;
        let set: Coins = serde_json::from_str(json).unwrap();
        assert_eq!(set.to_string(), "2ujuno,1uosmo");
        let back: Coins = serde_json::from_str(&serde_json::to_string(&set).unwrap()).unwrap();
        assert_eq!(back, set);
    }
}
