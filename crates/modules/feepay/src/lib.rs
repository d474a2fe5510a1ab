//! Contract-sponsored transaction fees.

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
pub use error::{CODESPACE, FeePayError};

mod genesis;
pub use genesis::GenesisState;

mod keeper;
pub use keeper::FeePayKeeper;

mod keys;
pub use keys::{
    CONTRACT_USES_PREFIX, CONTRACTS_PREFIX, PARAMS_KEY, contract_key, contract_uses_key,
    contract_uses_prefix,
};

mod msg_server;
pub use msg_server::{
    MsgFundFeePayContract, MsgRegisterFeePayContract, MsgUnregisterFeePayContract,
    MsgUpdateFeePayContractWalletLimit, MsgUpdateParams,
};

mod query;
pub use query::{
    ContractsPage, DEFAULT_PAGE_LIMIT, FeePayQuerier, MAX_PAGE_LIMIT, PageRequest,
    WalletEligibility,
};

mod types;
pub use types::{FeePayContract, FeePayParams, FeePayWalletUsage, MAX_WALLET_LIMIT};
