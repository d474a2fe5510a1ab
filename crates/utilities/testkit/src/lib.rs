//! Test collaborators for the levy fee pipeline.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod accounts;
pub use accounts::{ACCOUNTS_PREFIX, StoreAccounts};

mod bank;
pub use bank::{BALANCES_PREFIX, StoreBank};

mod contracts;
pub use contracts::{CONTRACTS_PREFIX, StoreContracts};

mod feegrant;
pub use feegrant::{BasicAllowance, GRANTS_PREFIX, StoreFeeGrants};

mod resolver;
pub use resolver::FixedRateResolver;

mod util;
pub use util::random_address;
