//! Shared primitive types for the fee pipeline.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

pub use alloy_primitives::{Address, B256, U256, address};

mod coin;
pub use coin::{Coin, CoinError, Coins, DecCoin};

mod dec;
pub use dec::{DEC_PRECISION, Dec, DecError};

mod module;
pub use module::{DISTRIBUTION, FEE_COLLECTOR, FEEMARKET, FEEPAY, GOVERNANCE, module_address};
