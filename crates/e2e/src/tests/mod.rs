//! End-to-end scenarios.

use levy_domain::{FeeTx, Msg};
use levy_primitives::{Address, Coins};

use crate::ujuno;

mod admission;
mod market;

const ALICE: Address = Address::repeat_byte(0xa1);
const BOB: Address = Address::repeat_byte(0xb0);
const GAS: u64 = 200_000;
const FUNDS: u64 = 1_000_000;

/// Sends one coin from `from` to [`BOB`].
fn send(from: Address, fee: u64) -> FeeTx {
    send_with_gas(from, fee, GAS)
}

fn send_with_gas(from: Address, fee: u64, gas: u64) -> FeeTx {
    let fee = if fee == 0 { Coins::empty() } else { ujuno(fee) };
    FeeTx::new(vec![Msg::Send { from, to: BOB, amount: ujuno(1) }], fee, gas, from)
}

/// A single contract call from `wallet`.
fn call(wallet: Address, contract: Address, fee: u64) -> FeeTx {
    let fee = if fee == 0 { Coins::empty() } else { ujuno(fee) };
    FeeTx::new(vec![Msg::execute_contract(wallet, contract)], fee, GAS, wallet)
}
