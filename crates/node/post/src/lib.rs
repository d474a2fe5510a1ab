//! Fee settlement pipeline.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod deduct;
pub use deduct::FeeMarketDeductDecorator;

mod error;
pub use error::{CODESPACE, PostError};

mod handler;
pub use handler::{NoopPostHandler, PostHandler};
