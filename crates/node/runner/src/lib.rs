#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod app;
pub use app::FeeApp;

mod error;
pub use error::RunnerError;

mod modules;
pub use modules::{AppGenesis, FeeModules};

mod result;
pub use result::TxResult;
