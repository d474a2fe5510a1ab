//! Fixed-point decimal arithmetic with 18 fractional digits.

use std::{fmt, str::FromStr};

use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Number of fractional digits carried by a [`Dec`].
pub const DEC_PRECISION: usize = 18;

const ONE_RAW: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Errors raised by decimal parsing and arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecError {
    /// The input is not a non-negative decimal number.
    #[error("invalid decimal string: {0:?}")]
    Parse(String),

    /// The input carries more fractional digits than the precision allows.
    #[error("decimal {0:?} exceeds {DEC_PRECISION} fractional digits")]
    Precision(String),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// Result does not fit in 256 bits.
    #[error("decimal overflow")]
    Overflow,

    /// Result would be negative.
    #[error("decimal underflow")]
    Underflow,
}

/// Non-negative fixed-point decimal backed by a [`U256`] scaled by `10^18`.
///
/// All arithmetic is deterministic: multiplication and division truncate
/// toward zero, and rounding up happens only through [`Dec::ceil`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(U256);

impl Dec {
    /// Zero.
    pub const ZERO: Self = Self(U256::ZERO);

    /// One.
    pub const ONE: Self = Self(ONE_RAW);

    /// Largest representable value.
    pub const MAX: Self = Self(U256::MAX);

    /// Creates a decimal from its raw scaled representation.
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Creates a decimal from a raw scaled `u64`, e.g. `25 * 10^15` for `0.025`.
    pub const fn from_raw_u64(raw: u64) -> Self {
        Self(U256::from_limbs([raw, 0, 0, 0]))
    }

    /// Returns the raw scaled representation.
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Creates a decimal holding a whole number.
    pub fn from_u64(value: u64) -> Self {
        // u64::MAX * 10^18 < 2^128, never overflows.
        Self(U256::from(value) * ONE_RAW)
    }

    /// Creates a decimal holding a whole [`U256`] number.
    pub fn from_int(value: U256) -> Result<Self, DecError> {
        value.checked_mul(ONE_RAW).map(Self).ok_or(DecError::Overflow)
    }

    /// Returns `numerator / denominator`, truncated to the decimal precision.
    pub fn from_ratio(numerator: U256, denominator: U256) -> Result<Self, DecError> {
        if denominator.is_zero() {
            return Err(DecError::DivisionByZero);
        }
        let scaled = numerator.checked_mul(ONE_RAW).ok_or(DecError::Overflow)?;
        Ok(Self(scaled / denominator))
    }

    /// Returns true when the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition.
    pub fn checked_add(&self, other: Self) -> Result<Self, DecError> {
        self.0.checked_add(other.0).map(Self).ok_or(DecError::Overflow)
    }

    /// Checked subtraction.
    pub fn checked_sub(&self, other: Self) -> Result<Self, DecError> {
        self.0.checked_sub(other.0).map(Self).ok_or(DecError::Underflow)
    }

    /// Subtraction clamped at zero.
    pub fn saturating_sub(&self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Checked multiplication, truncating the result.
    pub fn checked_mul(&self, other: Self) -> Result<Self, DecError> {
        let product = self.0.checked_mul(other.0).ok_or(DecError::Overflow)?;
        Ok(Self(product / ONE_RAW))
    }

    /// Checked division, truncating the result.
    pub fn checked_quo(&self, other: Self) -> Result<Self, DecError> {
        if other.is_zero() {
            return Err(DecError::DivisionByZero);
        }
        let scaled = self.0.checked_mul(ONE_RAW).ok_or(DecError::Overflow)?;
        Ok(Self(scaled / other.0))
    }

    /// Multiplies by a whole number.
    pub fn checked_mul_int(&self, value: U256) -> Result<Self, DecError> {
        self.0.checked_mul(value).map(Self).ok_or(DecError::Overflow)
    }

    /// Divides by a whole number, truncating.
    pub fn checked_quo_int(&self, value: U256) -> Result<Self, DecError> {
        if value.is_zero() {
            return Err(DecError::DivisionByZero);
        }
        Ok(Self(self.0 / value))
    }

    /// Smallest whole number greater than or equal to `self`.
    pub fn ceil(&self) -> U256 {
        let whole = self.0 / ONE_RAW;
        if (self.0 % ONE_RAW).is_zero() { whole } else { whole + U256::from(1u8) }
    }

    /// Whole part of `self`, dropping the fraction.
    pub fn truncate(&self) -> U256 {
        self.0 / ONE_RAW
    }
}

impl fmt::Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / ONE_RAW;
        let frac = (self.0 % ONE_RAW).to::<u64>();
        write!(f, "{whole}.{frac:018}")
    }
}

impl FromStr for Dec {
    type Err = DecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DecError::Parse(s.to_string());
        let (whole, frac) = match s.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > DEC_PRECISION {
            return Err(DecError::Precision(s.to_string()));
        }

        let whole = U256::from_str_radix(whole, 10).map_err(|_| DecError::Overflow)?;
        let frac: u64 = if frac.is_empty() {
            0
        } else {
            format!("{frac:0<DEC_PRECISION$}").parse().map_err(|_| invalid())?
        };
        whole
            .checked_mul(ONE_RAW)
            .and_then(|raw| raw.checked_add(U256::from(frac)))
            .map(Self)
            .ok_or(DecError::Overflow)
    }
}

impl Serialize for Dec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
