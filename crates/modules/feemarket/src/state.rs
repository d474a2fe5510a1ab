//! Fee market state.

use levy_primitives::{Dec, U256};
use serde::{Deserialize, Serialize};

use crate::{FeeMarketError, MAX_WINDOW, Params};

/// Controller state updated once per block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    /// Current base gas price in the fee denom.
    pub base_gas_price: Dec,
    /// Current learning rate.
    pub learning_rate: Dec,
    /// Gas used by recent blocks, written circularly.
    pub window: Vec<u64>,
    /// Next write position in `window`.
    pub index: u64,
}

impl State {
    /// Fresh state with a zeroed window of `window` blocks, capped at [`MAX_WINDOW`].
    pub fn new(window: u64, base_gas_price: Dec, learning_rate: Dec) -> Self {
        let len = window.min(MAX_WINDOW) as usize;
        Self { base_gas_price, learning_rate, window: vec![0; len], index: 0 }
    }

    /// Initial state for `params`: floor price and minimum learning rate.
    pub fn from_params(params: &Params) -> Self {
        Self::new(params.window, params.min_base_gas_price, params.min_learning_rate)
    }

    /// Checks the state invariants.
    pub fn validate(&self) -> Result<(), FeeMarketError> {
        if self.window.is_empty() {
            return Err(FeeMarketError::InvalidState("window must not be empty".into()));
        }
        if self.index >= self.window.len() as u64 {
            return Err(FeeMarketError::InvalidState(format!(
                "index {} out of range for window of {}",
                self.index,
                self.window.len()
            )));
        }
        Ok(())
    }

    /// Checks the state against `params`.
    pub fn validate_against(&self, params: &Params) -> Result<(), FeeMarketError> {
        self.validate_window(params)?;
        if self.base_gas_price < params.min_base_gas_price {
            return Err(FeeMarketError::InvalidState(format!(
                "base gas price {} below minimum {}",
                self.base_gas_price, params.min_base_gas_price
            )));
        }
        Ok(())
    }

    pub(crate) fn validate_window(&self, params: &Params) -> Result<(), FeeMarketError> {
        self.validate()?;
        if self.window.len() as u64 != params.window {
            return Err(FeeMarketError::WindowMismatch {
                params: params.window,
                state: self.window.len(),
            });
        }
        Ok(())
    }

    /// Writes `gas_used` at the current index and advances it.
    pub fn record(&mut self, gas_used: u64) {
        let len = self.window.len() as u64;
        if len == 0 {
            return;
        }
        let slot = (self.index % len) as usize;
        self.window[slot] = gas_used;
        self.index = (self.index + 1) % len;
    }

    /// Average window gas divided by `target`.
    pub fn utilization(&self, target: u64) -> Result<Dec, FeeMarketError> {
        let total = self.window.iter().fold(U256::ZERO, |acc, gas| acc + U256::from(*gas));
        let average = Dec::from_ratio(total, U256::from(self.window.len()))?;
        Ok(average.checked_quo_int(U256::from(target))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_caps_window_length() {
        let state = State::new(u64::MAX, Dec::ONE, Dec::ZERO);
        assert_eq!(state.window.len() as u64, MAX_WINDOW);
    }

    #[test]
    fn record_wraps_index() {
        let mut state = State::new(3, Dec::ONE, Dec::ZERO);
        for gas in [10, 20, 30, 40] {
            state.record(gas);
        }
        assert_eq!(state.window, vec![40, 20, 30]);
        assert_eq!(state.index, 1);
    }

    #[test]
    fn utilization_averages_window() {
        let mut state = State::new(4, Dec::ONE, Dec::ZERO);
        state.record(100);
        state.record(300);
        assert_eq!(state.utilization(100).unwrap(), Dec::ONE);
        assert_eq!(state.utilization(50).unwrap(), Dec::from_u64(2));
    }

    #[test]
    fn utilization_does_not_overflow_on_full_blocks() {
        let mut state = State::new(2, Dec::ONE, Dec::ZERO);
        state.record(u64::MAX);
        state.record(u64::MAX);
        assert_eq!(state.utilization(u64::MAX).unwrap(), Dec::ONE);
    }

    #[test]
    fn validate_against_params() {
        let params = Params::aimd();
        State::from_params(&params).validate_against(&params).unwrap();

        let short = State::new(2, params.min_base_gas_price, params.min_learning_rate);
        assert!(matches!(
            short.validate_against(&params),
            Err(FeeMarketError::WindowMismatch { params: 8, state: 2 })
        ));

        let cheap = State::new(params.window, Dec::ZERO, params.min_learning_rate);
        assert!(matches!(cheap.validate_against(&params), Err(FeeMarketError::InvalidState(_))));

        let mut bad_index = State::from_params(&params);
        bad_index.index = 8;
        assert!(matches!(bad_index.validate(), Err(FeeMarketError::InvalidState(_))));
    }
}
