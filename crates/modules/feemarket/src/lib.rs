//! Dynamic gas pricing driven by block utilization.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod controller;
pub use controller::GasPriceController;

mod error;
pub use error::{CODESPACE, FeeMarketError};

mod genesis;
pub use genesis::GenesisState;

mod keeper;
pub use keeper::FeeMarketKeeper;

mod keys;
pub use keys::{ENABLED_HEIGHT_KEY, PARAMS_KEY, STATE_KEY};

mod msg_server;
pub use msg_server::MsgUpdateParams;

mod params;
pub use params::{
    DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_DELTA, DEFAULT_FEE_DENOM, DEFAULT_GAMMA,
    DEFAULT_MAX_BLOCK_UTILIZATION, DEFAULT_MAX_LEARNING_RATE, DEFAULT_MIN_BASE_GAS_PRICE,
    DEFAULT_MIN_LEARNING_RATE, DEFAULT_WINDOW, EIP1559_LEARNING_RATE, MAX_WINDOW, Params,
};

mod query;
pub use query::FeeMarketQuerier;

mod resolver;
pub use resolver::NativeDenomResolver;

mod state;
pub use state::State;
