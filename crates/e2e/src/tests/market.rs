//! Base price movement across blocks and gas estimation.

use levy_feemarket::Params;
use levy_primitives::Dec;

use super::{ALICE, FUNDS, send_with_gas};
use crate::{DENOM, TestConfig, TestHarness, TestSetup};

const BIG_GAS: u64 = 20_000_000;

fn loaded_harness() -> TestHarness {
    let config = TestConfig::default().with_params(Params::eip1559()).with_gas_per_msg(BIG_GAS);
    TestHarness::new(config, TestSetup::funded_wallet(ALICE, 10 * FUNDS)).unwrap()
}

fn price(harness: &TestHarness) -> Dec {
    harness.app().gas_price(DENOM).unwrap().amount
}

#[test]
fn congestion_raises_price_and_idle_blocks_restore_floor() {
    let harness = loaded_harness();
    let floor = Params::eip1559().min_base_gas_price;
    assert_eq!(price(&harness), floor);

    // Two 20M gas transactions overshoot the 30M target by a third.
    let tx = send_with_gas(ALICE, 30_000, BIG_GAS);
    let outcome = harness.block([tx.clone(), tx.clone()]).unwrap();
    assert!(outcome.results.iter().all(|result| result.is_ok()));
    let raised = price(&harness);
    assert_eq!(raised, "0.001041666666666666".parse().unwrap());
    assert_eq!(outcome.state.unwrap().base_gas_price, raised);

    // The old floor fee no longer covers the gas limit.
    let stale = send_with_gas(ALICE, 20_000, BIG_GAS);
    assert_eq!(harness.check(&stale).code, 4);

    harness.blocks(2, &[]).unwrap();
    assert_eq!(price(&harness), floor);
    assert!(harness.check(&stale).is_ok());
}

#[test]
fn aimd_price_never_drops_below_floor() {
    let harness = TestHarness::new(TestConfig::default(), TestSetup::funded_wallet(ALICE, FUNDS)).unwrap();
    let outcomes = harness.blocks(3, &[]).unwrap();
    let floor = Params::default().min_base_gas_price;
    for outcome in outcomes {
        let state = outcome.state.unwrap();
        assert_eq!(state.base_gas_price, floor);
    }
    assert_eq!(harness.app().height(), 3);
}

#[test]
fn simulation_estimates_gas_without_fee() {
    let harness = TestHarness::new(TestConfig::default(), TestSetup::funded_wallet(ALICE, FUNDS)).unwrap();
    let tx = send_with_gas(ALICE, 0, 0);
    let result = harness.simulate(&tx);
    assert!(result.is_ok(), "{}", result.log);
    // One message plus the surcharge for the settlement bank sends.
    assert_eq!(result.gas_used, crate::DEFAULT_GAS_PER_MSG + 12_490);
    harness.assert_balance(&ALICE, FUNDS).unwrap();
    assert_eq!(harness.app().height(), 0);
}
