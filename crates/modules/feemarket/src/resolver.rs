//! Denom resolver accepting only the native fee denom.

use levy_domain::{DenomResolver, ResolverError};
use levy_primitives::DecCoin;
use levy_traits::KvStore;

/// Resolver for chains that accept fees only in the fee denom.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeDenomResolver;

impl DenomResolver for NativeDenomResolver {
    fn convert_to_denom(
        &self,
        _store: &dyn KvStore,
        price: &DecCoin,
        denom: &str,
    ) -> Result<DecCoin, ResolverError> {
        if price.denom == denom {
            Ok(price.clone())
        } else {
            Err(ResolverError::UnsupportedDenom(denom.to_string()))
        }
    }

    fn extra_denoms(&self, _store: &dyn KvStore) -> Result<Vec<String>, ResolverError> {
        Ok(Vec::new())
    }
}
