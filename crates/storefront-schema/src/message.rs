//! Domain message keys carried by cart errors and API fault payloads.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Message keys the storefront reacts to. Unknown keys are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MessageKey {
    PurchaseStepsQuantity,
    ProductStockReached,
    ProductOutOfStock,
    ProductNotFound,
    MinOrderQuantity,
    Other(String),
}

impl MessageKey {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKey::PurchaseStepsQuantity => "purchase-steps-quantity",
            MessageKey::ProductStockReached => "product-stock-reached",
            MessageKey::ProductOutOfStock => "product-out-of-stock",
            MessageKey::ProductNotFound => "product-not-found",
            MessageKey::MinOrderQuantity => "min-order-quantity",
            MessageKey::Other(key) => key,
        }
    }

    /// Whether this is one of the known keys.
    pub fn is_known(&self) -> bool {
        !matches!(self, MessageKey::Other(_))
    }
}

impl From<&str> for MessageKey {
    fn from(key: &str) -> Self {
        match key {
            "purchase-steps-quantity" => MessageKey::PurchaseStepsQuantity,
            "product-stock-reached" => MessageKey::ProductStockReached,
            "product-out-of-stock" => MessageKey::ProductOutOfStock,
            "product-not-found" => MessageKey::ProductNotFound,
            "min-order-quantity" => MessageKey::MinOrderQuantity,
            other => MessageKey::Other(other.to_string()),
        }
    }
}

impl From<String> for MessageKey {
    fn from(key: String) -> Self {
        MessageKey::from(key.as_str())
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MessageKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MessageKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(MessageKey::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_keys() {
        let key = MessageKey::from("product-out-of-stock");
        assert_eq!(key, MessageKey::ProductOutOfStock);
        assert!(key.is_known());
        assert_eq!(key.to_string(), "product-out-of-stock");
    }

    #[test]
    fn test_unknown_key_kept() {
        let key: MessageKey = serde_json::from_str(r#""promotion-not-eligible""#).unwrap();
        assert_eq!(key, MessageKey::Other("promotion-not-eligible".to_string()));
        assert!(!key.is_known());
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""promotion-not-eligible""#);
    }
}
