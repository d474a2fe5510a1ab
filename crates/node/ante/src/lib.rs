//! Fee admission pipeline.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod chain;
pub use chain::{AnteChain, AnteDecorator, AnteHandler, Terminator};

mod error;
pub use error::{AnteError, CODESPACE};

mod feemarket;
pub use feemarket::FeeMarketCheckDecorator;

mod options;
pub use options::AnteOptions;

mod priority;
pub use priority::{PRIORITY_SCALE, get_tx_priority, min_gas_price_priority};

mod route;
pub use route::FeeRouteDecorator;

mod setup;
pub use setup::SetUpContextDecorator;

mod sponsored;
pub use sponsored::SponsoredFeeDecorator;
