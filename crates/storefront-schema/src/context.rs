//! Sales channel context (the session). Not part of the refinement set.

use serde::{Deserialize, Serialize};

/// The session context the platform resolves for a context token.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesChannelContext {
    pub token: Option<String>,
    pub currency: Option<serde_json::Value>,
    pub sales_channel: Option<serde_json::Value>,
    pub customer: Option<serde_json::Value>,
    pub payment_method: Option<serde_json::Value>,
    pub shipping_method: Option<serde_json::Value>,
    pub shipping_location: Option<serde_json::Value>,
    pub tax_state: Option<String>,
    pub context: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

impl SalesChannelContext {
    /// Whether a customer is logged in on this context.
    pub fn is_logged_in(&self) -> bool {
        self.customer.as_ref().is_some_and(|c| !c.is_null())
    }

    /// ISO code of the active currency, if present.
    pub fn currency_iso_code(&self) -> Option<&str> {
        self.currency.as_ref()?.get("isoCode")?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_context_accessors() {
        let context: SalesChannelContext = serde_json::from_value(json!({
            "token": "ctx-1",
            "currency": { "isoCode": "EUR" },
            "customer": null,
            "taxState": "gross"
        }))
        .unwrap();
        assert_eq!(context.currency_iso_code(), Some("EUR"));
        assert!(!context.is_logged_in());
        assert_eq!(context.token.as_deref(), Some("ctx-1"));
    }
}
