//! Per-transaction outcome reported to the consensus engine.

use levy_ante::AnteError;
use levy_domain::{Context, Event, FeeRoute, FeeTx};
use levy_post::PostError;
use levy_traits::StoreError;
use serde::{Deserialize, Serialize};

/// Codespace of failures raised by message execution.
const EXECUTE_CODESPACE: &str = "execute";

/// Codespace of failures raised while merging transaction writes.
const STORE_CODESPACE: &str = "store";

/// Outcome of checking, simulating or delivering one transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    /// Zero on success, otherwise the failing stage's error code.
    pub code: u32,
    /// Namespace of `code`. Empty on success.
    pub codespace: String,
    /// Human-readable failure. Empty on success.
    pub log: String,
    /// Declared gas limit.
    pub gas_wanted: u64,
    /// Gas consumed across every stage that ran.
    pub gas_used: u64,
    /// Mempool priority assigned at admission.
    pub priority: i64,
    /// Events of the stages whose writes were kept.
    pub events: Vec<Event>,
    /// Fee route chosen at admission, if admission succeeded.
    pub fee_route: Option<FeeRoute>,
}

impl TxResult {
    /// True when every stage succeeded.
    pub const fn is_ok(&self) -> bool {
        self.code == 0
    }

    pub(crate) fn new(ctx: &mut Context<'_>, tx: &FeeTx, outcome: Result<(), TxFailure>) -> Self {
        let (code, codespace, log) = match outcome {
            Ok(()) => (0, String::new(), String::new()),
            Err(failure) => (failure.code(), failure.codespace().to_string(), failure.to_string()),
        };
        Self {
            code,
            codespace,
            log,
            gas_wanted: tx.gas_limit(),
            gas_used: ctx.gas_meter().consumed(),
            priority: ctx.priority(),
            events: ctx.take_events(),
            fee_route: ctx.fee_route().cloned(),
        }
    }
}

/// Failure of one pipeline stage.
#[derive(Debug)]
pub(crate) enum TxFailure {
    Ante(AnteError),
    Execute(anyhow::Error),
    Post(PostError),
    Store(StoreError),
}

impl TxFailure {
    const fn code(&self) -> u32 {
        match self {
            Self::Ante(err) => err.code(),
            Self::Post(err) => err.code(),
            Self::Execute(_) | Self::Store(_) => 1,
        }
    }

    const fn codespace(&self) -> &'static str {
        match self {
            Self::Ante(err) => err.codespace(),
            Self::Post(err) => err.codespace(),
            Self::Execute(_) => EXECUTE_CODESPACE,
            Self::Store(_) => STORE_CODESPACE,
        }
    }
}

impl std::fmt::Display for TxFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ante(err) => write!(f, "{err}"),
            Self::Execute(err) => write!(f, "{err:#}"),
            Self::Post(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl From<StoreError> for TxFailure {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}
