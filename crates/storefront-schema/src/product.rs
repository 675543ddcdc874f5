//! Product entity and its variant family tree.

use serde::{Deserialize, Serialize};

use crate::cms::CmsPage;
use crate::ids::ProductId;
use crate::media::ProductMedia;
use crate::refinement::{EntitySet, Extended};
use crate::seo::SeoUrl;

/// A product; variants appear as `children` of their parent product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Product<E: EntitySet> {
    pub id: ProductId,
    pub parent_id: Option<ProductId>,
    pub product_number: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub stock: Option<i64>,
    pub available_stock: Option<i64>,
    pub available: Option<bool>,
    pub is_closeout: Option<bool>,
    pub min_purchase: Option<u32>,
    pub max_purchase: Option<u32>,
    pub purchase_steps: Option<u32>,
    pub rating_average: Option<f64>,
    pub calculated_price: Option<CalculatedPrice>,
    pub calculated_cheapest_price: Option<CalculatedPrice>,
    pub cover: Option<ProductMedia>,
    pub media: Option<Vec<ProductMedia>>,
    pub options: Option<Vec<PropertyGroupOption>>,
    pub properties: Option<Vec<PropertyGroupOption>>,
    pub seo_urls: Option<Vec<SeoUrl>>,
    pub children: Option<Vec<Product<E>>>,
    pub cms_page: Option<CmsPage<E>>,
    pub translated: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

pub type ExtendedProduct = Product<Extended>;

impl<E: EntitySet> Product<E> {
    /// Variant products, or an empty slice when none were loaded.
    pub fn variants(&self) -> &[Product<E>] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether this is a variant of another product.
    pub fn is_variant(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Display name, falling back to the translated name.
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or_else(|| {
            self.translated
                .as_ref()
                .and_then(|t| t.get("name"))
                .and_then(|n| n.as_str())
        })
    }

    /// URL of the cover image, if loaded.
    pub fn cover_url(&self) -> Option<&str> {
        self.cover.as_ref().and_then(ProductMedia::url)
    }

    /// Unit price as calculated by the platform.
    pub fn unit_price(&self) -> Option<f64> {
        self.calculated_price.as_ref().map(|p| p.unit_price)
    }
}

/// A price calculated by the platform for the current context.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedPrice {
    pub unit_price: f64,
    pub quantity: Option<u32>,
    pub total_price: f64,
    pub list_price: Option<serde_json::Value>,
    pub reference_price: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

/// A property value, e.g. `Color: Blue`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroupOption {
    pub id: String,
    pub group_id: Option<String>,
    pub name: Option<String>,
    pub position: Option<i32>,
    pub color_hex_code: Option<String>,
    pub group: Option<PropertyGroup>,
    pub translated: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

/// A property group, e.g. `Color`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyGroup {
    pub id: String,
    pub name: Option<String>,
    pub display_type: Option<String>,
    pub api_alias: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_variant_tree_keeps_refinement() {
        let product: ExtendedProduct = serde_json::from_value(json!({
            "id": "parent",
            "name": "Runner",
            "calculatedPrice": { "unitPrice": 89.0, "totalPrice": 89.0 },
            "children": [{
                "id": "child",
                "parentId": "parent",
                "translated": { "name": "Runner Blue" },
                "options": [{ "id": "blue", "name": "Blue", "group": { "id": "color", "name": "Color" } }],
                "cmsPage": { "id": "p", "sections": [{ "id": "s", "blocks": [{ "id": "b", "slots": [{
                    "id": "slot", "config": { "content": { "source": "static", "value": "desc" } }
                }]}]}]}
            }]
        }))
        .unwrap();

        assert!(!product.is_variant());
        assert_eq!(product.unit_price(), Some(89.0));

        let variant = &product.variants()[0];
        assert!(variant.is_variant());
        assert_eq!(variant.display_name(), Some("Runner Blue"));
        assert_eq!(variant.options.as_ref().unwrap()[0].group.as_ref().unwrap().name.as_deref(), Some("Color"));

        let slot = variant.cms_page.as_ref().unwrap().slots().next().unwrap();
        assert_eq!(slot.config.as_ref().unwrap().content_value(), Some("desc"));
    }

    #[test]
    fn test_cover_url() {
        let product: ExtendedProduct = serde_json::from_value(json!({
            "id": "p1",
            "cover": { "id": "pm1", "mediaId": "m1", "media": { "id": "m1", "url": "https://cdn.test/m1.jpg" } }
        }))
        .unwrap();
        assert_eq!(product.cover_url(), Some("https://cdn.test/m1.jpg"));
    }
}
