//! Integration tests for levy-post.

use std::sync::Arc;

use levy_domain::{
    BankKeeper, BlockInfo, Context, EVENT_TYPE_FEE_SETTLED, ExecMode, FeeRoute, FeeTx, GasMeter,
};
use levy_feemarket::{FeeMarketKeeper, GenesisState, NativeDenomResolver, Params};
use levy_overlay::MemStore;
use levy_post::{FeeMarketDeductDecorator, PostError, PostHandler};
use levy_primitives::{
    Address, Coin, Coins, DISTRIBUTION, FEE_COLLECTOR, GOVERNANCE, U256, module_address,
};
use levy_testkit::{StoreBank, random_address};
use rstest::rstest;

const DENOM: &str = "ujuno";
const HEIGHT: u64 = 9;

struct Env {
    store: MemStore,
    bank: StoreBank,
    feemarket: Arc<FeeMarketKeeper<NativeDenomResolver>>,
    post: FeeMarketDeductDecorator<StoreBank, NativeDenomResolver>,
    payer: Address,
}

fn env(params: Params) -> Env {
    let bank = StoreBank::default();
    let feemarket = Arc::new(FeeMarketKeeper::new(module_address(GOVERNANCE), NativeDenomResolver));
    let mut store = MemStore::new();
    feemarket.init_genesis(&mut store, &GenesisState::new(params)).unwrap();
    bank.mint(&mut store, &module_address(FEE_COLLECTOR), &Coins::single(Coin::new(DENOM, 300u64))).unwrap();
    let post = FeeMarketDeductDecorator::new(bank.clone(), Arc::clone(&feemarket));
    Env { store, bank, feemarket, post, payer: random_address() }
}

fn standard(payer: Address) -> FeeRoute {
    FeeRoute::Standard { payer, deducted_from: payer, fee: Coin::new(DENOM, 300u64) }
}

fn settle(env: &mut Env, route: FeeRoute, gas_used: u64, mode: ExecMode) -> (Result<(), PostError>, u64, usize) {
    let tx = FeeTx::new(vec![], Coins::empty(), 300_000, env.payer);
    let mut meter = GasMeter::new(300_000);
    meter.consume(gas_used, "execution").unwrap();
    let mut ctx =
        Context::new(&mut env.store, BlockInfo::new(HEIGHT, "levy-test"), mode).with_gas_meter(meter);
    ctx.set_fee_route(route);
    let result = env.post.post_handle(&mut ctx, &tx, mode == ExecMode::Simulate, true);
    let settled = ctx.events().iter().filter(|e| e.kind == EVENT_TYPE_FEE_SETTLED).count();
    (result, ctx.gas_meter().consumed(), settled)
}

fn module_balance(env: &Env, module: &str) -> U256 {
    env.bank.module_balance(&env.store, module, DENOM).unwrap()
}

#[test]
fn unused_gas_refunded_as_tip() {
    let mut env = env(Params::default());
    let payer = env.payer;
    let (result, _, settled) = settle(&mut env, standard(payer), 100_000, ExecMode::Finalize);
    result.unwrap();
    assert_eq!(settled, 1);
    assert_eq!(env.bank.balance(&env.store, &payer, DENOM).unwrap(), U256::from(200u64));
    assert_eq!(module_balance(&env, FEE_COLLECTOR), U256::from(100u64));
}

#[test]
fn distributed_fees_leave_the_collector() {
    let mut env = env(Params { distribute_fees: true, ..Params::default() });
    let payer = env.payer;
    settle(&mut env, standard(payer), 250_000, ExecMode::Finalize).0.unwrap();
    assert_eq!(module_balance(&env, DISTRIBUTION), U256::from(250u64));
    assert_eq!(module_balance(&env, FEE_COLLECTOR), U256::ZERO);
    assert_eq!(env.bank.balance(&env.store, &payer, DENOM).unwrap(), U256::from(50u64));
}

#[test]
fn cost_above_escrow_is_rejected() {
    let mut env = env(Params::default());
    let payer = env.payer;
    let route = FeeRoute::Standard { payer, deducted_from: payer, fee: Coin::new(DENOM, 100u64) };
    let (result, _, _) = settle(&mut env, route, 150_000, ExecMode::Finalize);
    assert!(matches!(result.unwrap_err(), PostError::InsufficientFunds { .. }));
    assert_eq!(module_balance(&env, FEE_COLLECTOR), U256::from(300u64));
}

#[test]
fn enabling_block_skips_settlement() {
    let mut env = env(Params { enabled: false, ..Params::default() });
    env.feemarket.update_params(&mut env.store, HEIGHT, &Params::default()).unwrap();
    assert_eq!(env.feemarket.get_enabled_height(&env.store).unwrap(), Some(HEIGHT));

    let payer = env.payer;
    let (result, gas, settled) = settle(&mut env, standard(payer), 100_000, ExecMode::Finalize);
    result.unwrap();
    assert_eq!((gas, settled), (100_000, 0));
    assert_eq!(module_balance(&env, FEE_COLLECTOR), U256::from(300u64));
}

#[test]
fn simulation_charges_bank_send_gas_only() {
    let mut env = env(Params::default());
    let payer = env.payer;
    let (result, gas, settled) = settle(&mut env, standard(payer), 100_000, ExecMode::Simulate);
    result.unwrap();
    assert_eq!((gas, settled), (112_490, 0));
    assert_eq!(module_balance(&env, FEE_COLLECTOR), U256::from(300u64));
}

#[rstest]
#[case::genesis(FeeRoute::Genesis)]
#[case::sponsored(FeeRoute::Sponsored {
    contract: Address::repeat_byte(1),
    wallet: Address::repeat_byte(2),
    fee: Coin::new(DENOM, 300u64),
})]
#[case::legacy(FeeRoute::Legacy { deducted_from: Address::repeat_byte(2), fee: Coins::single(Coin::new(DENOM, 300u64)) })]
fn other_routes_are_not_settled(#[case] route: FeeRoute) {
    let mut env = env(Params::default());
    let (result, _, settled) = settle(&mut env, route, 100_000, ExecMode::Finalize);
    result.unwrap();
    assert_eq!(settled, 0);
    assert_eq!(module_balance(&env, FEE_COLLECTOR), U256::from(300u64));
}
