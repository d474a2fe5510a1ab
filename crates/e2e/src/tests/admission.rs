//! Fee admission through the fee market route.

use levy_domain::{FeeRoute, FeeTx, Msg};
use levy_primitives::{Coin, FEE_COLLECTOR};
use rstest::rstest;

use super::{ALICE, BOB, FUNDS, GAS, send};
use crate::{TestConfig, TestHarness, TestSetup, ujuno};

fn harness() -> TestHarness {
    TestHarness::new(TestConfig::default(), TestSetup::funded_wallet(ALICE, FUNDS)).unwrap()
}

/// At the 0.001 floor a 200_000 gas transaction must pay at least 200.
#[rstest]
#[case::exact(200, true)]
#[case::overpaid(400, true)]
#[case::one_short(199, false)]
fn fee_must_cover_base_price(#[case] fee: u64, #[case] admitted: bool) {
    let harness = harness();
    let outcome = harness.block([send(ALICE, fee)]).unwrap();
    let result = &outcome.results[0];
    assert_eq!(result.is_ok(), admitted, "{}", result.log);
    if admitted {
        assert_eq!(
            result.fee_route,
            Some(FeeRoute::Standard { payer: ALICE, deducted_from: ALICE, fee: Coin::new("ujuno", fee) })
        );
        // 50_000 gas used at 0.001 costs 50, the rest comes back as a tip.
        harness.assert_balance(&ALICE, FUNDS - 50 - 1).unwrap();
        harness.assert_balance(&BOB, 1).unwrap();
    } else {
        assert_eq!((result.code, result.codespace.as_str()), (4, "ante"));
        harness.assert_balance(&ALICE, FUNDS).unwrap();
        harness.assert_balance(&BOB, 0).unwrap();
    }
}

#[rstest]
#[case::at_floor(200, 0)]
#[case::double(400, 2_000_000)]
#[case::triple(600, 3_000_000)]
fn priority_scales_with_overpayment(#[case] fee: u64, #[case] priority: i64) {
    let harness = harness();
    let result = harness.check(&send(ALICE, fee));
    assert!(result.is_ok(), "{}", result.log);
    assert_eq!(result.priority, priority);
}

#[rstest]
#[case::no_coins(FeeTx::new(vec![], levy_primitives::Coins::empty(), GAS, ALICE), 2)]
#[case::two_denoms(
    FeeTx::new(
        vec![],
        vec![Coin::new("uatom", 500u64), Coin::new("ujuno", 500u64)].into(),
        GAS,
        ALICE,
    ),
    3
)]
#[case::zero_gas(crate::tests::send_with_gas(ALICE, 200, 0), 1)]
fn malformed_fees_are_rejected(#[case] tx: FeeTx, #[case] code: u32) {
    let harness = harness();
    let result = harness.check(&tx);
    assert_eq!((result.code, result.codespace.as_str()), (code, "ante"));
    assert_eq!(result.fee_route, None);
}

#[test]
fn unknown_payer_is_rejected() {
    let harness = harness();
    let result = harness.check(&send(BOB, 200));
    assert_eq!(result.code, 6);
}

#[test]
fn exec_nesting_is_bounded() {
    let harness = harness();
    let mut msg = Msg::Send { from: ALICE, to: BOB, amount: ujuno(1) };
    for _ in 0..6 {
        msg = Msg::Exec { grantee: ALICE, msgs: vec![msg] };
    }
    let result = harness.check(&FeeTx::new(vec![msg], ujuno(200), GAS, ALICE));
    assert_eq!(result.code, 7);
    harness.assert_balance(&ALICE, FUNDS).unwrap();
}

#[test]
fn mempool_tracks_pending_spends_until_commit() {
    let harness = harness();
    assert!(harness.check(&send(ALICE, 600_000)).is_ok());
    let second = harness.check(&send(ALICE, 600_000));
    assert_eq!((second.code, second.codespace.as_str()), (5, "ante"));

    // Nothing was delivered, so after the commit the balance is whole again.
    harness.block(Vec::<FeeTx>::new()).unwrap();
    assert!(harness.app().recheck_tx(&send(ALICE, 600_000)).is_ok());
    harness.assert_balance(&ALICE, FUNDS).unwrap();
    assert_eq!(harness.module_balance(FEE_COLLECTOR).unwrap(), levy_primitives::U256::ZERO);
}

#[test]
fn disabled_market_enforces_local_minimum_in_check_only() {
    let config = TestConfig::default().with_market_disabled().with_min_gas_prices("0.01ujuno");
    let harness = TestHarness::new(config, TestSetup::funded_wallet(ALICE, FUNDS)).unwrap();

    // 0.01 * 200_000 = 2000.
    let short = harness.check(&send(ALICE, 1999));
    assert_eq!(short.code, 4);
    let enough = harness.check(&send(ALICE, 2000));
    assert!(enough.is_ok(), "{}", enough.log);
    assert_eq!(enough.priority, 0);
    assert!(matches!(enough.fee_route, Some(FeeRoute::Legacy { .. })));

    // Block execution does not apply the validator-local minimum.
    let outcome = harness.block([send(ALICE, 1)]).unwrap();
    assert!(outcome.results[0].is_ok());
    assert_eq!(outcome.state, None);
    harness.assert_balance(&ALICE, FUNDS - 1 - 1).unwrap();
}
