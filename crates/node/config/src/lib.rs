//! Configuration types for levy nodes.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::ConfigError;

mod fees;
pub use fees::{DEFAULT_MAX_UNWRAP_DEPTH, DEFAULT_SIMULATION_BANK_SEND_GAS, FeeConfig};

mod feepay;
pub use feepay::{DEFAULT_BOND_DENOM, FeePayConfig};

mod node;
pub use node::{DEFAULT_CHAIN_ID, NodeConfig};
