use std::fmt;

use anyhow::anyhow;

/// Failure of the block driver itself, outside any single transaction.
///
/// Transaction failures never surface here; they are reported through
/// [`crate::TxResult`] codes. A `RunnerError` means a lifecycle call was made
/// out of order or the committed store could not be read or written.
#[derive(Debug)]
pub struct RunnerError(pub anyhow::Error);

impl RunnerError {
    /// A per-block call arrived with no block begun.
    pub(crate) fn no_block() -> Self {
        Self(anyhow!("no block in progress"))
    }

    /// `begin_block` was called before the previous block was committed.
    pub(crate) fn block_in_progress(height: u64) -> Self {
        Self(anyhow!("block {height} already in progress"))
    }

    /// `begin_block` skipped or repeated a height.
    pub(crate) fn unexpected_height(height: u64, expected: u64) -> Self {
        Self(anyhow!("unexpected block height {height}, expected {expected}"))
    }

    /// `init_chain` ran on a chain that already has blocks or genesis.
    pub(crate) fn already_initialized(height: u64) -> Self {
        Self(anyhow!("chain already initialized at height {height}"))
    }

    /// A read-only query over committed state failed.
    pub(crate) fn query(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(anyhow::Error::from(err).context("query failed"))
    }
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for RunnerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl From<anyhow::Error> for RunnerError {
    fn from(e: anyhow::Error) -> Self {
        Self(e)
    }
}
