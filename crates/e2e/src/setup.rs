//! Test configuration and setup utilities.

use levy_config::NodeConfig;
use levy_feemarket::{DEFAULT_FEE_DENOM, Params};
use levy_primitives::{Address, Coin, Coins};
use levy_testkit::BasicAllowance;

/// Denom every scenario pays fees in.
pub const DENOM: &str = DEFAULT_FEE_DENOM;

/// Gas the harness charges for executing one leaf message.
pub const DEFAULT_GAS_PER_MSG: u64 = 50_000;

/// Single-coin amount in [`DENOM`].
pub fn ujuno(amount: u64) -> Coins {
    Coins::single(Coin::new(DENOM, amount))
}

/// Configuration for an e2e test run.
#[derive(Clone, Debug)]
pub struct TestConfig {
    /// Node configuration.
    pub node: NodeConfig,
    /// Fee market params written at genesis.
    pub params: Params,
    /// Whether fee sponsorship starts enabled.
    pub feepay_enabled: bool,
    /// Gas charged per executed leaf message.
    pub gas_per_msg: u64,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            node: NodeConfig::default(),
            params: Params::default(),
            feepay_enabled: true,
            gas_per_msg: DEFAULT_GAS_PER_MSG,
        }
    }
}

impl TestConfig {
    /// Replace the genesis fee market params.
    #[must_use]
    pub fn with_params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Start with the fee market disabled.
    #[must_use]
    pub fn with_market_disabled(mut self) -> Self {
        self.params.enabled = false;
        self
    }

    /// Send consumed fees to the distribution module.
    #[must_use]
    pub const fn with_distribute_fees(mut self) -> Self {
        self.params.distribute_fees = true;
        self
    }

    /// Enable or disable fee sponsorship.
    #[must_use]
    pub const fn with_feepay(mut self, enabled: bool) -> Self {
        self.feepay_enabled = enabled;
        self
    }

    /// Set the validator-local minimum gas prices, e.g. `"0.01ujuno"`.
    #[must_use]
    pub fn with_min_gas_prices(mut self, prices: &str) -> Self {
        self.node.fees.min_gas_prices = prices.to_string();
        self
    }

    /// Set gas charged per executed message.
    #[must_use]
    pub const fn with_gas_per_msg(mut self, gas: u64) -> Self {
        self.gas_per_msg = gas;
        self
    }
}

/// Contract registered for fee sponsorship at genesis.
#[derive(Clone, Debug)]
pub struct SponsoredContract {
    /// Contract address.
    pub address: Address,
    /// Contract admin, registers and funds the sponsorship.
    pub admin: Address,
    /// Sponsored calls allowed per wallet.
    pub wallet_limit: u64,
    /// Prepaid balance in [`DENOM`].
    pub funding: u64,
}

/// Genesis state of a scenario.
#[derive(Clone, Debug, Default)]
pub struct TestSetup {
    /// Genesis account allocations.
    pub accounts: Vec<(Address, Coins)>,
    /// Contracts registered for sponsorship.
    pub contracts: Vec<SponsoredContract>,
    /// Fee allowances as `(granter, grantee, allowance)`.
    pub grants: Vec<(Address, Address, BasicAllowance)>,
}

impl TestSetup {
    /// Create an empty test setup.
    pub const fn empty() -> Self {
        Self { accounts: Vec::new(), contracts: Vec::new(), grants: Vec::new() }
    }

    /// A single wallet holding `amount`.
    pub fn funded_wallet(address: Address, amount: u64) -> Self {
        Self::empty().with_account(address, amount)
    }

    /// Add an account holding `amount` of [`DENOM`].
    #[must_use]
    pub fn with_account(mut self, address: Address, amount: u64) -> Self {
        self.accounts.push((address, ujuno(amount)));
        self
    }

    /// Add a sponsored contract.
    #[must_use]
    pub fn with_contract(mut self, contract: SponsoredContract) -> Self {
        self.contracts.push(contract);
        self
    }

    /// Add a fee allowance.
    #[must_use]
    pub fn with_grant(mut self, granter: Address, grantee: Address, allowance: BasicAllowance) -> Self {
        self.grants.push((granter, grantee, allowance));
        self
    }
}
