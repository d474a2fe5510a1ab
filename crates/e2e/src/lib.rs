//! End-to-end testing framework for the levy fee pipeline.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod harness;
pub use harness::{BlockTx, HarnessError, MSG_UPDATE_PARAMS, TestHarness, TestOutcome, init_tracing};

mod setup;
pub use setup::{DEFAULT_GAS_PER_MSG, DENOM, SponsoredContract, TestConfig, TestSetup, ujuno};

#[cfg(test)]
mod tests;
