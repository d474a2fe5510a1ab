//! Core domain types shared by the fee pipeline.
#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/refcell/levy/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod context;
pub use context::{BlockInfo, Context, ExecMode};

mod error;
pub use error::{BankError, FeeGrantError, OutOfGas, ResolverError, UnwrapError};

mod events;
pub use events::{
    ATTRIBUTE_KEY_FEE, ATTRIBUTE_KEY_FEE_PAYER, ATTRIBUTE_KEY_TIP, ATTRIBUTE_KEY_TIP_PAYEE,
    EVENT_TYPE_FEE_SETTLED, EVENT_TYPE_TX, Event,
};

mod gas;
pub use gas::GasMeter;

mod keepers;
pub use keepers::{
    AccountKeeper, BankKeeper, ContractInfo, ContractKeeper, DenomResolver, FeeGrantKeeper,
};

mod msg;
pub use msg::{MSG_EXEC, MSG_EXECUTE_CONTRACT, MSG_SEND, Msg, flatten_msgs};

mod route;
pub use route::FeeRoute;

mod tx;
pub use tx::FeeTx;
