//! Transaction gas accounting.

use crate::OutOfGas;

/// Tracks gas consumed against a limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    consumed: u64,
}

impl GasMeter {
    /// Meter bounded by `limit`.
    pub const fn new(limit: u64) -> Self {
        Self { limit, consumed: 0 }
    }

    /// Meter without a practical limit, used for genesis and block hooks.
    pub const fn infinite() -> Self {
        Self::new(u64::MAX)
    }

    /// Gas limit.
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Gas consumed so far, never above the limit.
    pub const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Gas left before the limit.
    pub const fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.consumed)
    }

    /// Consumes `amount` gas.
    ///
    /// Past the limit, or past `u64::MAX`, the meter is left full and an error is returned.
    pub fn consume(&mut self, amount: u64, descriptor: &str) -> Result<(), OutOfGas> {
        match self.consumed.checked_add(amount) {
            Some(used) if used <= self.limit => {
                self.consumed = used;
                Ok(())
            }
            used => {
                self.consumed = self.limit;
                Err(OutOfGas {
                    descriptor: descriptor.to_string(),
                    limit: self.limit,
                    used: used.unwrap_or(u64::MAX),
                })
            }
        }
    }
}
