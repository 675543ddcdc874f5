//! Storefront overrides of the generic catalog.
//!
//! Each operation here replaces the generic contract of the same name as a
//! whole: its request and response schemas are written in terms of the
//! refined ([`Extended`](storefront_schema::Extended)) entities. `searchPage`
//! has no generic counterpart and is added to the catalog.

use serde::Serialize;
use storefront_schema::{
    CartItems, CategoryId, EntitySearchResult, ExtendedCart, ExtendedCategory, ExtendedCriteria,
    ExtendedCrossSellingElementCollection, ExtendedProduct, ExtendedProductListingResult,
    LineItemId, NavigationCriteria, PipeList, ProductId, ProductListingCriteria, SearchCriteria,
    SeoUrlSearchResult,
};
use storefront_transport::Method;

use crate::catalog::OperationSet;
use crate::contract::{ListStyle, OperationContract, ParamSpec, ParamType, ResponseSchema, SchemaRef};
use crate::operation::Operation;

/// Build the override set.
pub fn override_operations() -> OperationSet {
    [
        AddLineItem::contract(),
        DeleteLineItem::contract(),
        ReadCart::contract(),
        ReadCategory::contract(),
        ReadCategoryList::contract(),
        ReadNavigation::contract(),
        ReadProduct::contract(),
        ReadProductCrossSellings::contract(),
        ReadProductListing::contract(),
        ReadSeoUrl::contract(),
        SearchPage::contract(),
    ]
    .into_iter()
    .collect()
}

fn extended_criteria() -> SchemaRef {
    SchemaRef::object("ExtendedCriteria")
}

fn extended_cart() -> SchemaRef {
    SchemaRef::object("ExtendedCart")
}

// ---- Cart ----

pub struct AddLineItem;

impl Operation for AddLineItem {
    const KEY: &'static str = "addLineItem post /checkout/cart/line-item";
    type Params = CartItems;
    type Response = ExtendedCart;

    fn contract() -> OperationContract {
        OperationContract::new("addLineItem", Method::Post, "/checkout/cart/line-item")
            .body(SchemaRef::object("ExtendedCartItems"))
            .ok(extended_cart())
    }
}

pub struct DeleteLineItem;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DeleteLineItemParams {
    pub ids: Vec<LineItemId>,
}

impl Operation for DeleteLineItem {
    const KEY: &'static str = "deleteLineItem delete /checkout/cart/line-item?id[]={ids}";
    type Params = DeleteLineItemParams;
    type Response = ExtendedCart;

    fn contract() -> OperationContract {
        OperationContract::new(
            "deleteLineItem",
            Method::Delete,
            "/checkout/cart/line-item?id[]={ids}",
        )
        .query_param(ParamSpec::required("ids", ParamType::List(ListStyle::Bracket)))
        .ok(extended_cart())
    }
}

pub struct ReadCart;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReadCartParams {
    /// Name of a new cart; ignored for an existing one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Operation for ReadCart {
    const KEY: &'static str = "readCart get /checkout/cart?name";
    type Params = ReadCartParams;
    type Response = ExtendedCart;

    fn contract() -> OperationContract {
        OperationContract::new("readCart", Method::Get, "/checkout/cart?name")
            .query_param(ParamSpec::optional("name", ParamType::String))
            .ok(extended_cart())
    }
}

// ---- Category & navigation ----

pub struct ReadCategory;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadCategoryParams {
    pub navigation_id: CategoryId,
    /// Resolve only these slot ids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slots: Option<PipeList>,
    #[serde(flatten)]
    pub criteria: ProductListingCriteria,
}

impl Operation for ReadCategory {
    const KEY: &'static str = "readCategory post /category/{navigationId}?slots";
    type Params = ReadCategoryParams;
    type Response = ExtendedCategory;

    fn contract() -> OperationContract {
        OperationContract::new("readCategory", Method::Post, "/category/{navigationId}?slots")
            .path_param("navigationId")
            .query_param(ParamSpec::optional("slots", ParamType::List(ListStyle::Pipe)))
            .body(SchemaRef::object("ExtendedProductListingCriteria"))
            .ok(SchemaRef::object("ExtendedCategory"))
    }
}

pub struct ReadCategoryList;

impl Operation for ReadCategoryList {
    const KEY: &'static str = "readCategoryList post /category";
    type Params = ExtendedCriteria;
    type Response = EntitySearchResult<ExtendedCategory>;

    fn contract() -> OperationContract {
        OperationContract::new("readCategoryList", Method::Post, "/category")
            .body(extended_criteria())
            .ok(SchemaRef::search_result("ExtendedCategory"))
    }
}

pub struct ReadNavigation;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadNavigationParams {
    pub active_id: String,
    pub root_id: String,
    /// Ask the platform to resolve SEO URLs for the returned categories.
    #[serde(rename = "sw-include-seo-urls", skip_serializing_if = "Option::is_none")]
    pub include_seo_urls: Option<bool>,
    #[serde(flatten)]
    pub criteria: NavigationCriteria,
}

impl Operation for ReadNavigation {
    const KEY: &'static str =
        "readNavigation post /navigation/{activeId}/{rootId} sw-include-seo-urls";
    type Params = ReadNavigationParams;
    type Response = Vec<ExtendedCategory>;

    fn contract() -> OperationContract {
        OperationContract::new("readNavigation", Method::Post, "/navigation/{activeId}/{rootId}")
            .path_param("activeId")
            .path_param("rootId")
            .header_param(ParamSpec::optional("sw-include-seo-urls", ParamType::Boolean))
            .required_body(SchemaRef::object("ExtendedNavigationCriteria"))
            .ok(SchemaRef::array("ExtendedCategory"))
    }
}

// ---- Products ----

pub struct ReadProduct;

impl Operation for ReadProduct {
    const KEY: &'static str = "readProduct post /product";
    type Params = ExtendedCriteria;
    type Response = EntitySearchResult<ExtendedProduct>;

    fn contract() -> OperationContract {
        OperationContract::new("readProduct", Method::Post, "/product")
            .body(extended_criteria())
            .ok(SchemaRef::search_result("ExtendedProduct"))
    }
}

pub struct ReadProductCrossSellings;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadProductCrossSellingsParams {
    pub product_id: ProductId,
}

impl Operation for ReadProductCrossSellings {
    const KEY: &'static str = "readProductCrossSellings post /product/{productId}/cross-selling";
    type Params = ReadProductCrossSellingsParams;
    type Response = ExtendedCrossSellingElementCollection;

    fn contract() -> OperationContract {
        OperationContract::new(
            "readProductCrossSellings",
            Method::Post,
            "/product/{productId}/cross-selling",
        )
        .path_param("productId")
        .ok(SchemaRef::array("ExtendedCrossSellingElement"))
    }
}

pub struct ReadProductListing;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadProductListingParams {
    pub category_id: CategoryId,
    #[serde(flatten)]
    pub criteria: ProductListingCriteria,
}

impl Operation for ReadProductListing {
    const KEY: &'static str = "readProductListing post /product-listing/{categoryId}";
    type Params = ReadProductListingParams;
    type Response = ExtendedProductListingResult;

    fn contract() -> OperationContract {
        OperationContract::new("readProductListing", Method::Post, "/product-listing/{categoryId}")
            .path_param("categoryId")
            .body(SchemaRef::object("ExtendedProductListingCriteria"))
            .ok(SchemaRef::object("ExtendedProductListingResult"))
    }
}

pub struct SearchPage;

impl Operation for SearchPage {
    const KEY: &'static str = "searchPage post /search";
    type Params = SearchCriteria;
    type Response = ExtendedProductListingResult;

    fn contract() -> OperationContract {
        OperationContract::new("searchPage", Method::Post, "/search")
            .required_body(SchemaRef::object("ExtendedSearchCriteria"))
            .ok(SchemaRef::object("ExtendedProductListingResult"))
    }
}

// ---- SEO ----

pub struct ReadSeoUrl;

impl Operation for ReadSeoUrl {
    const KEY: &'static str = "readSeoUrl post /seo-url";
    type Params = ExtendedCriteria;
    type Response = SeoUrlSearchResult;

    fn contract() -> OperationContract {
        OperationContract::new("readSeoUrl", Method::Post, "/seo-url")
            .body(extended_criteria())
            .ok(SchemaRef::search_result("SeoUrl"))
            .response(404, ResponseSchema::ApiError)
    }
}
