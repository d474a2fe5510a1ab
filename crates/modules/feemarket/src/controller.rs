//! Congestion-driven base gas price controller.

use levy_primitives::Dec;

use crate::{FeeMarketError, Params, State};

/// Computes the next [`State`] from the gas used by a finalized block.
///
/// With `u = avg(window) / max_block_utilization`:
///
/// - over target (`u > 1`): `lr' = lr * (1 + gamma) + alpha`
/// - otherwise: `lr' = lr * beta - delta`, floored at zero
///
/// `lr'` is clamped to `[min_learning_rate, max_learning_rate]` and the price
/// becomes `max(min_base_gas_price, price * (1 + lr' * (u - 1)))`.
#[derive(Clone, Copy, Debug)]
pub struct GasPriceController<'p> {
    params: &'p Params,
}

impl<'p> GasPriceController<'p> {
    /// Controller for `params`.
    pub const fn new(params: &'p Params) -> Self {
        Self { params }
    }

    /// Returns the state after a block that used `block_gas_used` gas.
    pub fn update(&self, state: &State, block_gas_used: u64) -> Result<State, FeeMarketError> {
        state.validate_window(self.params)?;

        let mut next = state.clone();
        next.record(block_gas_used);
        let utilization = next.utilization(self.params.max_block_utilization)?;
        next.learning_rate = self.next_learning_rate(state.learning_rate, utilization);
        next.base_gas_price =
            self.next_base_gas_price(state.base_gas_price, next.learning_rate, utilization)?;
        Ok(next)
    }

    /// Learning rate after observing `utilization`.
    pub fn next_learning_rate(&self, learning_rate: Dec, utilization: Dec) -> Dec {
        let p = self.params;
        let next = if utilization > Dec::ONE {
            Dec::ONE
                .checked_add(p.gamma)
                .and_then(|factor| learning_rate.checked_mul(factor))
                .and_then(|grown| grown.checked_add(p.alpha))
                .unwrap_or(Dec::MAX)
        } else {
            learning_rate.checked_mul(p.beta).unwrap_or(Dec::MAX).saturating_sub(p.delta)
        };
        next.max(p.min_learning_rate).min(p.max_learning_rate)
    }

    /// Base gas price after observing `utilization` with `learning_rate`.
    pub fn next_base_gas_price(
        &self,
        base_gas_price: Dec,
        learning_rate: Dec,
        utilization: Dec,
    ) -> Result<Dec, FeeMarketError> {
        let price = if utilization >= Dec::ONE {
            let excess = utilization.checked_sub(Dec::ONE)?;
            let step = base_gas_price.checked_mul(learning_rate)?.checked_mul(excess)?;
            base_gas_price.checked_add(step).unwrap_or(Dec::MAX)
        } else {
            let slack = Dec::ONE.checked_sub(utilization)?;
            let step = base_gas_price.checked_mul(learning_rate)?.checked_mul(slack)?;
            base_gas_price.saturating_sub(step)
        };
        Ok(price.max(self.params.min_base_gas_price))
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};
    use rstest::rstest;

    use super::*;

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    fn params() -> Params {
        Params { max_block_utilization: 1_000, window: 2, ..Params::aimd() }
    }

    #[test]
    fn full_blocks_raise_price_and_rate() {
        let params = params();
        let controller = GasPriceController::new(&params);
        let state = State::new(2, dec("0.1"), dec("0.1"));

        // window [2000, 2000] after two updates, u = 2
        let next = controller.update(&controller.update(&state, 2_000).unwrap(), 2_000).unwrap();
        assert!(next.learning_rate > state.learning_rate);
        assert!(next.base_gas_price > state.base_gas_price);
    }

    #[test]
    fn exact_learning_rate_step() {
        let params = params();
        let controller = GasPriceController::new(&params);
        // 0.1 * 1.25 + 0.025
        assert_eq!(controller.next_learning_rate(dec("0.1"), dec("2")), dec("0.15"));
        // 0.1 * 0.95 - 0
        assert_eq!(controller.next_learning_rate(dec("0.1"), dec("0.5")), dec("0.095"));
        // at target counts as not over target
        assert_eq!(controller.next_learning_rate(dec("0.1"), Dec::ONE), dec("0.095"));
    }

    #[test]
    fn exact_price_step() {
        let params = params();
        let controller = GasPriceController::new(&params);
        // 1 * (1 + 0.5 * (2 - 1))
        assert_eq!(controller.next_base_gas_price(Dec::ONE, dec("0.5"), dec("2")).unwrap(), dec("1.5"));
        // 1 * (1 + 0.5 * (0.5 - 1))
        assert_eq!(
            controller.next_base_gas_price(Dec::ONE, dec("0.5"), dec("0.5")).unwrap(),
            dec("0.75")
        );
        // target utilization leaves the price alone
        assert_eq!(controller.next_base_gas_price(Dec::ONE, dec("0.5"), Dec::ONE).unwrap(), Dec::ONE);
    }

    #[test]
    fn empty_blocks_floor_at_min_price() {
        let params = params();
        let controller = GasPriceController::new(&params);
        let mut state = State::new(2, dec("0.0011"), params.max_learning_rate);
        for _ in 0..200 {
            state = controller.update(&state, 0).unwrap();
        }
        assert_eq!(state.base_gas_price, params.min_base_gas_price);
        assert_eq!(state.learning_rate, params.min_learning_rate);
    }

    #[test]
    fn eip1559_keeps_fixed_rate() {
        let params = Params { max_block_utilization: 1_000, ..Params::eip1559() };
        let controller = GasPriceController::new(&params);
        let state = State::from_params(&params);
        let up = controller.update(&state, 2_000).unwrap();
        assert_eq!(up.learning_rate, crate::EIP1559_LEARNING_RATE);
        // 0.001 * (1 + 0.125)
        assert_eq!(up.base_gas_price, dec("0.001125"));
    }

    #[test]
    fn window_mismatch_is_rejected() {
        let params = params();
        let controller = GasPriceController::new(&params);
        let state = State::new(3, Dec::ONE, dec("0.1"));
        assert!(matches!(
            controller.update(&state, 0),
            Err(FeeMarketError::WindowMismatch { params: 2, state: 3 })
        ));
    }

    #[rstest]
    #[case::aimd(Params::aimd())]
    #[case::eip1559(Params::eip1559())]
    fn bounds_hold_for_random_traces(#[case] params: Params) {
        let controller = GasPriceController::new(&params);
        let mut rng = StdRng::seed_from_u64(0x1e7f);
        let mut state = State::from_params(&params);
        for _ in 0..500 {
            let gas = rng.random_range(0..=params.max_block_utilization * 3);
            let next = controller.update(&state, gas).unwrap();
            assert!(next.base_gas_price >= params.min_base_gas_price);
            assert!(next.learning_rate >= params.min_learning_rate);
            assert!(next.learning_rate <= params.max_learning_rate);
            assert!(next.index < next.window.len() as u64);
            assert_eq!(controller.update(&state, gas).unwrap(), next);
            state = next;
        }
    }
}
