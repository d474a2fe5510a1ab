//! Events emitted during transaction processing.

use serde::{Deserialize, Serialize};

/// Event type for the fee-paid event.
pub const EVENT_TYPE_TX: &str = "tx";

/// Event type emitted when the fee market settles a transaction.
pub const EVENT_TYPE_FEE_SETTLED: &str = "fee_settled";

/// Attribute holding a fee amount.
pub const ATTRIBUTE_KEY_FEE: &str = "fee";

/// Attribute holding the paying account.
pub const ATTRIBUTE_KEY_FEE_PAYER: &str = "fee_payer";

/// Attribute holding the refunded tip.
pub const ATTRIBUTE_KEY_TIP: &str = "tip";

/// Attribute holding the tip recipient.
pub const ATTRIBUTE_KEY_TIP_PAYEE: &str = "tip_payee";

/// A typed event with ordered key-value attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event type.
    pub kind: String,
    /// Attributes in emission order.
    pub attributes: Vec<(String, String)>,
}

impl Event {
    /// Creates an event without attributes.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), attributes: Vec::new() }
    }

    /// Appends an attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.attributes.push((key.into(), value.to_string()));
        self
    }

    /// Returns the first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}
