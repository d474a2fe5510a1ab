//! Fixed exchange-rate denom resolver.

use std::collections::BTreeMap;

use levy_domain::{DenomResolver, ResolverError};
use levy_primitives::{Dec, DecCoin};
use levy_traits::KvStore;

/// Converts prices with constant rates, expressed as units of the target
/// denom per unit of the fee denom.
#[derive(Clone, Debug, Default)]
pub struct FixedRateResolver {
    rates: BTreeMap<String, Dec>,
}

impl FixedRateResolver {
    /// Adds a conversion rate for `denom`.
    #[must_use]
    pub fn with_rate(mut self, denom: impl Into<String>, rate: Dec) -> Self {
        self.rates.insert(denom.into(), rate);
        self
    }
}

impl DenomResolver for FixedRateResolver {
    fn convert_to_denom(
        &self,
        _store: &dyn KvStore,
        price: &DecCoin,
        denom: &str,
    ) -> Result<DecCoin, ResolverError> {
        if price.denom == denom {
            return Ok(price.clone());
        }
        let rate = self.rates.get(denom).ok_or_else(|| ResolverError::UnsupportedDenom(denom.to_string()))?;
        let amount = price.amount.checked_mul(*rate).map_err(|err| ResolverError::Conversion {
            denom: denom.to_string(),
            reason: err.to_string(),
        })?;
        Ok(DecCoin::new(denom, amount))
    }

    fn extra_denoms(&self, _store: &dyn KvStore) -> Result<Vec<String>, ResolverError> {
        Ok(self.rates.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use levy_overlay::MemStore;

    use super::*;

    #[test]
    fn converts_with_rate() {
        let store = MemStore::new();
        let resolver = FixedRateResolver::default().with_rate("uatom", "2.5".parse().unwrap());
        let price = DecCoin::new("ujuno", "0.002".parse().unwrap());
        let converted = resolver.convert_to_denom(&store, &price, "uatom").unwrap();
        assert_eq!(converted, DecCoin::new("uatom", "0.005".parse().unwrap()));
        assert!(matches!(
            resolver.convert_to_denom(&store, &price, "uosmo"),
            Err(ResolverError::UnsupportedDenom(_))
        ));
    }
}
