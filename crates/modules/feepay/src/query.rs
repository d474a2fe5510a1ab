//! Read-only sponsorship queries.

use levy_domain::{BankKeeper, ContractKeeper};
use levy_primitives::Address;
use levy_traits::KvStore;
use serde::{Deserialize, Serialize};

use crate::{FeePayContract, FeePayError, FeePayKeeper, FeePayParams};

/// Default page size of [`FeePayQuerier::contracts`].
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: usize = 1_000;

/// Offset pagination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Entries to skip.
    pub offset: usize,
    /// Entries to return, capped at [`MAX_PAGE_LIMIT`]. Zero means the default.
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { offset: 0, limit: DEFAULT_PAGE_LIMIT }
    }
}

/// One page of registrations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractsPage {
    /// Registrations in key order.
    pub contracts: Vec<FeePayContract>,
    /// Number of registrations overall.
    pub total: usize,
}

/// Eligibility of a wallet for a sponsored call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletEligibility {
    /// Whether a sponsored call would currently be accepted.
    pub eligible: bool,
    /// Why not, when ineligible.
    pub reason: Option<String>,
}

/// Query view bound to one store snapshot.
pub struct FeePayQuerier<'a, B, C> {
    keeper: &'a FeePayKeeper<B, C>,
    store: &'a dyn KvStore,
}

impl<B: std::fmt::Debug, C: std::fmt::Debug> std::fmt::Debug for FeePayQuerier<'_, B, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeePayQuerier").field("keeper", self.keeper).finish_non_exhaustive()
    }
}

impl<'a, B: BankKeeper, C: ContractKeeper> FeePayQuerier<'a, B, C> {
    /// Creates a querier.
    pub const fn new(keeper: &'a FeePayKeeper<B, C>, store: &'a dyn KvStore) -> Self {
        Self { keeper, store }
    }

    /// Registration of `contract`.
    pub fn contract(&self, contract: &Address) -> Result<FeePayContract, FeePayError> {
        self.keeper.get_contract(self.store, contract)
    }

    /// A page of registrations.
    pub fn contracts(&self, page: PageRequest) -> Result<ContractsPage, FeePayError> {
        let all = self.keeper.get_contracts(self.store)?;
        let limit = match page.limit {
            0 => DEFAULT_PAGE_LIMIT,
            limit => limit.min(MAX_PAGE_LIMIT),
        };
        let total = all.len();
        let contracts = all.into_iter().skip(page.offset).take(limit).collect();
        Ok(ContractsPage { contracts, total })
    }

    /// Sponsored calls `wallet` made on `contract`.
    pub fn contract_uses(&self, contract: &Address, wallet: &Address) -> Result<u64, FeePayError> {
        self.keeper.get_contract_uses(self.store, contract, wallet)
    }

    /// Whether `wallet` can make a sponsored call on `contract`.
    pub fn wallet_is_eligible(
        &self,
        contract: &Address,
        wallet: &Address,
    ) -> Result<WalletEligibility, FeePayError> {
        match self.keeper.is_wallet_eligible(self.store, contract, wallet) {
            Ok(()) => Ok(WalletEligibility { eligible: true, reason: None }),
            Err(err @ (FeePayError::Store(_) | FeePayError::Math(_))) => Err(err),
            Err(err) => Ok(WalletEligibility { eligible: false, reason: Some(err.to_string()) }),
        }
    }

    /// Module params.
    pub fn params(&self) -> Result<FeePayParams, FeePayError> {
        self.keeper.get_params(self.store)
    }
}
