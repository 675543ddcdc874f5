//! Search result envelopes.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::product::Product;
use crate::refinement::{EntitySet, Extended};
use crate::seo::SeoUrl;

/// The platform's generic search result. `elements` is typed per operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySearchResult<T> {
    pub entity: Option<String>,
    pub total: Option<u64>,
    pub aggregations: Option<serde_json::Value>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(default = "Vec::new")]
    pub elements: Vec<T>,
    pub api_alias: Option<String>,
}

impl<T> Default for EntitySearchResult<T> {
    fn default() -> Self {
        Self {
            entity: None,
            total: None,
            aggregations: None,
            page: None,
            limit: None,
            elements: Vec::new(),
            api_alias: None,
        }
    }
}

impl<T> EntitySearchResult<T> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn first(&self) -> Option<&T> {
        self.elements.first()
    }

    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }
}

pub type CategoryListingResult<E> = EntitySearchResult<Category<E>>;
pub type ProductSearchResult<E> = EntitySearchResult<Product<E>>;
pub type SeoUrlSearchResult = EntitySearchResult<SeoUrl>;

/// A product listing page: search result plus sorting and filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct ProductListingResult<E: EntitySet> {
    pub entity: Option<String>,
    pub total: Option<u64>,
    pub aggregations: Option<serde_json::Value>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(default = "Vec::new")]
    pub elements: Vec<Product<E>>,
    pub sorting: Option<String>,
    pub available_sortings: Option<Vec<serde_json::Value>>,
    pub current_filters: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

pub type ExtendedProductListingResult = ProductListingResult<Extended>;

impl<E: EntitySet> ProductListingResult<E> {
    pub fn products(&self) -> &[Product<E>] {
        &self.elements
    }

    /// Number of pages at the current limit, when both are known.
    pub fn page_count(&self) -> Option<u64> {
        let total = self.total?;
        let limit = u64::from(self.limit.filter(|limit| *limit > 0)?);
        Some(total.div_ceil(limit))
    }
}

/// A cross-selling group configured on a product.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossSelling {
    pub id: String,
    pub name: Option<String>,
    pub position: Option<i32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub active: Option<bool>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
    pub translated: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

/// One cross-selling group together with its products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct CrossSellingElement<E: EntitySet> {
    pub cross_selling: Option<CrossSelling>,
    #[serde(default = "Vec::new")]
    pub products: Vec<Product<E>>,
    pub total: Option<u64>,
    pub stream_id: Option<String>,
    pub api_alias: Option<String>,
}

pub type ExtendedCrossSellingElement = CrossSellingElement<Extended>;
pub type ExtendedCrossSellingElementCollection = Vec<ExtendedCrossSellingElement>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_elements_decode_as_refined_products() {
        let listing: ExtendedProductListingResult = serde_json::from_value(json!({
            "total": 25,
            "page": 1,
            "limit": 10,
            "sorting": "name-asc",
            "elements": [{
                "id": "p1",
                "seoUrls": [{ "id": "s1", "foreignKey": "p1", "routeName": "frontend.detail.page",
                              "pathInfo": "/detail/p1", "seoPathInfo": "runner/SW1" }],
                "children": [{ "id": "p1-blue", "parentId": "p1" }]
            }]
        }))
        .unwrap();

        assert_eq!(listing.page_count(), Some(3));
        let product = &listing.products()[0];
        assert_eq!(product.variants()[0].parent_id.as_ref().unwrap().as_str(), "p1");
        assert_eq!(product.seo_urls.as_ref().unwrap()[0].seo_path_info, "runner/SW1");
    }

    #[test]
    fn test_missing_elements_is_empty() {
        let result: SeoUrlSearchResult = serde_json::from_value(json!({ "total": 0 })).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.total, Some(0));
    }

    #[test]
    fn test_cross_selling_collection() {
        let groups: ExtendedCrossSellingElementCollection = serde_json::from_value(json!([{
            "crossSelling": { "id": "cs1", "name": "Similar", "type": "productStream" },
            "products": [{ "id": "p2" }, { "id": "p3" }],
            "total": 2
        }]))
        .unwrap();
        assert_eq!(groups[0].products.len(), 2);
        assert_eq!(groups[0].cross_selling.as_ref().unwrap().name.as_deref(), Some("Similar"));
    }
}
