//! Store keys of the fee sponsorship module.

use levy_primitives::Address;

/// Singleton params key.
pub const PARAMS_KEY: &[u8] = b"feepay/params";

/// Prefix of contract registrations.
pub const CONTRACTS_PREFIX: &[u8] = b"feepay/contracts/";

/// Prefix of per-wallet usage counters.
pub const CONTRACT_USES_PREFIX: &[u8] = b"feepay/contract-uses/";

/// Key of a contract registration.
pub fn contract_key(contract: &Address) -> Vec<u8> {
    [CONTRACTS_PREFIX, contract.to_string().as_bytes()].concat()
}

/// Prefix of every usage counter of `contract`.
pub fn contract_uses_prefix(contract: &Address) -> Vec<u8> {
    [CONTRACT_USES_PREFIX, format!("{contract}-").as_bytes()].concat()
}

/// Key of the usage counter of `wallet` on `contract`.
pub fn contract_uses_key(contract: &Address, wallet: &Address) -> Vec<u8> {
    [CONTRACT_USES_PREFIX, format!("{contract}-{wallet}").as_bytes()].concat()
}
