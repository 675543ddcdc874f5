//! Cart and line item shapes.
//!
//! The cart is read and modified only through the platform; nothing here
//! computes prices or quantities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::{LineItemId, ProductId};
use crate::media::Media;
use crate::message::MessageKey;
use crate::refinement::{EntitySet, Extended};

/// A shopping cart as returned by the platform.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Cart<E: EntitySet> {
    pub name: Option<String>,
    pub token: Option<String>,
    pub price: Option<serde_json::Value>,
    pub line_items: Option<Vec<LineItem<E>>>,
    pub errors: Option<E::CartErrors>,
    pub deliveries: Option<serde_json::Value>,
    pub transactions: Option<serde_json::Value>,
    pub modified: Option<bool>,
    pub customer_comment: Option<String>,
    pub affiliate_code: Option<String>,
    pub campaign_code: Option<String>,
    pub api_alias: Option<String>,
}

/// A cart position; container items nest further items in `children`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct LineItem<E: EntitySet> {
    pub id: LineItemId,
    pub referenced_id: Option<String>,
    pub label: Option<String>,
    pub quantity: u32,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub good: Option<bool>,
    pub description: Option<String>,
    pub removable: Option<bool>,
    pub stackable: Option<bool>,
    pub modified: Option<bool>,
    pub payload: Option<E::LineItemPayload>,
    pub price: Option<E::LineItemPrice>,
    pub cover: Option<Media>,
    pub children: Option<Vec<LineItem<E>>>,
    pub api_alias: Option<String>,
}

pub type ExtendedCart = Cart<Extended>;
pub type ExtendedLineItem = LineItem<Extended>;

/// Refined line item payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemPayload {
    pub updated_at: Option<String>,
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Refined line item price.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPrice {
    pub unit_price: f64,
    pub quantity: u32,
    pub total_price: f64,
    pub calculated_taxes: Vec<CalculatedTax>,
    pub tax_rules: Vec<TaxRule>,
    pub reference_price: Option<serde_json::Value>,
    pub list_price: Option<serde_json::Value>,
    pub regulation_price: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedTax {
    pub tax: f64,
    pub tax_rate: f64,
    pub price: f64,
    pub api_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxRule {
    pub tax_rate: f64,
    pub percentage: f64,
    pub api_alias: Option<String>,
}

/// An error or notice the platform attached to the cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartError {
    pub key: Option<String>,
    pub level: Option<serde_json::Value>,
    pub message: Option<String>,
    pub message_key: Option<String>,
}

impl CartError {
    /// The message key, parsed into the known enumeration.
    pub fn message_key(&self) -> Option<MessageKey> {
        self.message_key.as_deref().map(MessageKey::from)
    }
}

impl<E: EntitySet> Cart<E> {
    /// Line items, or an empty slice for an empty cart.
    pub fn line_items(&self) -> &[LineItem<E>] {
        self.line_items.as_deref().unwrap_or_default()
    }

    /// Total number of units across all top-level line items.
    pub fn item_count(&self) -> u32 {
        self.line_items()
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Find a line item by id, searching nested items too.
    pub fn line_item(&self, id: &LineItemId) -> Option<&LineItem<E>> {
        fn search<'a, E: EntitySet>(
            items: &'a [LineItem<E>],
            id: &LineItemId,
        ) -> Option<&'a LineItem<E>> {
            items.iter().find_map(|item| {
                if &item.id == id {
                    Some(item)
                } else {
                    search(item.children.as_deref().unwrap_or_default(), id)
                }
            })
        }
        search(self.line_items(), id)
    }
}

impl ExtendedCart {
    /// Cart errors, or an empty slice.
    pub fn errors(&self) -> &[CartError] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Message keys of all cart errors, in order.
    pub fn message_keys(&self) -> Vec<MessageKey> {
        self.errors().iter().filter_map(CartError::message_key).collect()
    }
}

/// A line item to add, as sent in the `items` body of the add operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LineItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referenced_id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stackable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<LineItemPayload>,
}

impl LineItemInput {
    /// A product line item with the product id as line item id.
    pub fn product(product_id: &ProductId, quantity: u32) -> Self {
        Self {
            id: Some(LineItemId::new(product_id.as_str())),
            referenced_id: Some(product_id.as_str().to_string()),
            kind: Some("product".to_string()),
            quantity: Some(quantity),
            ..Self::default()
        }
    }

    /// A promotion line item for a promotion code.
    pub fn promotion(code: impl Into<String>) -> Self {
        Self {
            referenced_id: Some(code.into()),
            kind: Some("promotion".to_string()),
            ..Self::default()
        }
    }
}

/// Request body of the add-line-item operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartItems {
    pub items: Vec<LineItemInput>,
}

impl CartItems {
    pub fn new(items: Vec<LineItemInput>) -> Self {
        Self { items }
    }
}
