//! Fee allowance registry.

use levy_domain::{FeeGrantError, FeeGrantKeeper, Msg};
use levy_primitives::{Address, Coins};
use levy_traits::{KvStore, KvStoreExt};
use serde::{Deserialize, Serialize};

/// Prefix of allowances, keyed `{granter}/{grantee}`.
pub const GRANTS_PREFIX: &[u8] = b"feegrant/allowances/";

fn grant_key(granter: &Address, grantee: &Address) -> Vec<u8> {
    [GRANTS_PREFIX, format!("{granter}/{grantee}").as_bytes()].concat()
}

/// Allowance with an optional spend limit and message filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicAllowance {
    /// Remaining spendable amount. Unlimited when `None`.
    pub spend_limit: Option<Coins>,
    /// Allowed message type URLs. Empty allows every message.
    pub allowed_messages: Vec<String>,
}

/// Fee grant registry storing [`BasicAllowance`] as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoreFeeGrants;

impl StoreFeeGrants {
    /// Grants `allowance` from `granter` to `grantee`, replacing any existing one.
    pub fn grant(
        &self,
        store: &mut dyn KvStore,
        granter: &Address,
        grantee: &Address,
        allowance: &BasicAllowance,
    ) -> Result<(), FeeGrantError> {
        Ok(store.set_json(&grant_key(granter, grantee), allowance)?)
    }

    /// Current allowance, if any.
    pub fn allowance(
        &self,
        store: &dyn KvStore,
        granter: &Address,
        grantee: &Address,
    ) -> Result<Option<BasicAllowance>, FeeGrantError> {
        Ok(store.get_json(&grant_key(granter, grantee))?)
    }
}

impl FeeGrantKeeper for StoreFeeGrants {
    fn use_granted_fees(
        &self,
        store: &mut dyn KvStore,
        granter: &Address,
        grantee: &Address,
        fee: &Coins,
        msgs: &[&Msg],
    ) -> Result<(), FeeGrantError> {
        let mut allowance = self
            .allowance(store, granter, grantee)?
            .ok_or(FeeGrantError::NotFound { granter: *granter, grantee: *grantee })?;
        let allowed = |msg: &&&Msg| allowance.allowed_messages.iter().any(|url| url == msg.type_url());
        if !allowance.allowed_messages.is_empty()
            && let Some(msg) = msgs.iter().find(|msg| !allowed(msg))
        {
            return Err(FeeGrantError::MessageNotAllowed(msg.type_url().to_string()));
        }
        if let Some(limit) = &allowance.spend_limit {
            let remaining = limit.checked_sub(fee).ok_or_else(|| FeeGrantError::FeeLimitExceeded {
                fee: fee.clone(),
                remaining: limit.clone(),
            })?;
            allowance.spend_limit = Some(remaining);
        }
        self.grant(store, granter, grantee, &allowance)
    }
}
