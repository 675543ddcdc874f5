//! Convenience facade: one call per storefront use case.
//!
//! Every method fixes an operation and shapes its parameters, then delegates
//! to the [`Dispatcher`]. Faults are returned as they are; callers that
//! prefer an empty result over an error can opt into [`BestEffort`].

use storefront_schema::{
    CartItems, CategoryId, CategoryListingResult, ExtendedCart, ExtendedCategory, ExtendedCriteria,
    ExtendedCrossSellingElementCollection, ExtendedProductListingResult, Extended, FilterNode,
    LineItemId, LineItemInput, NavigationCriteria, ProductId, ProductListingCriteria,
    ProductSearchResult, RouteName, SalesChannelContext, SearchCriteria, SeoUrlSearchResult,
    StoreNavigationType,
};
use storefront_transport::Transport;
#[cfg(not(target_arch = "wasm32"))]
use storefront_transport::TimeoutTransport;
use tracing::error;

use crate::base::ReadContext;
use crate::config::ApiConfig;
use crate::dispatch::Dispatcher;
use crate::encode::encode_component;
use crate::fault::Fault;
use crate::operation::NoParams;
use crate::overrides::{
    AddLineItem, DeleteLineItem, DeleteLineItemParams, ReadCart, ReadCartParams, ReadCategory,
    ReadCategoryList, ReadCategoryParams, ReadNavigation, ReadNavigationParams, ReadProduct,
    ReadProductCrossSellings, ReadProductCrossSellingsParams, ReadProductListing,
    ReadProductListingParams, ReadSeoUrl, SearchPage,
};

/// Default page for SEO URL lookups.
pub const DEFAULT_SEO_PAGE: u32 = 1;
/// Default page size for SEO URL lookups.
pub const DEFAULT_SEO_LIMIT: u32 = 100;

/// Storefront API facade.
#[derive(Debug, Clone)]
pub struct StorefrontApi<T> {
    dispatcher: Dispatcher<T>,
}

impl<T: Transport> StorefrontApi<T> {
    pub fn new(dispatcher: Dispatcher<T>) -> Self {
        Self { dispatcher }
    }

    /// Facade over the storefront catalog.
    pub fn from_config(config: ApiConfig, transport: T) -> Self {
        Self::new(Dispatcher::new(config, transport))
    }

    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// A facade bound to a cart / session token.
    pub fn for_cart(&self, context_token: impl Into<String>) -> Self
    where
        T: Clone,
    {
        Self::new(self.dispatcher.with_context_token(context_token))
    }

    /// Navigation tree of a menu, `depth` levels deep, with SEO URLs.
    pub async fn navigation(
        &self,
        kind: StoreNavigationType,
        depth: u32,
    ) -> Result<Vec<ExtendedCategory>, Fault> {
        let params = ReadNavigationParams {
            active_id: kind.as_str().to_string(),
            root_id: kind.as_str().to_string(),
            include_seo_urls: Some(true),
            criteria: NavigationCriteria::depth(depth),
        };
        self.dispatcher.invoke::<ReadNavigation>(&params).await
    }

    /// One category with its CMS page.
    pub async fn category(
        &self,
        category_id: &CategoryId,
        criteria: ProductListingCriteria,
    ) -> Result<ExtendedCategory, Fault> {
        let params = ReadCategoryParams {
            navigation_id: category_id.clone(),
            slots: None,
            criteria,
        };
        self.dispatcher.invoke::<ReadCategory>(&params).await
    }

    pub async fn category_list(
        &self,
        criteria: ExtendedCriteria,
    ) -> Result<CategoryListingResult<Extended>, Fault> {
        self.dispatcher.invoke::<ReadCategoryList>(&criteria).await
    }

    /// Products matching `criteria`, across all categories.
    pub async fn products(
        &self,
        criteria: ExtendedCriteria,
    ) -> Result<ProductSearchResult<Extended>, Fault> {
        self.dispatcher.invoke::<ReadProduct>(&criteria).await
    }

    /// The product listing of one category.
    pub async fn category_products(
        &self,
        category_id: &CategoryId,
        criteria: ProductListingCriteria,
    ) -> Result<ExtendedProductListingResult, Fault> {
        let params = ReadProductListingParams {
            category_id: category_id.clone(),
            criteria,
        };
        self.dispatcher.invoke::<ReadProductListing>(&params).await
    }

    /// Full-text product search. The term is sent URI-component encoded.
    pub async fn search(
        &self,
        term: &str,
        criteria: ProductListingCriteria,
    ) -> Result<ExtendedProductListingResult, Fault> {
        let params = SearchCriteria::new(encode_component(term), criteria);
        self.dispatcher.invoke::<SearchPage>(&params).await
    }

    /// SEO URLs registered for a route, one page at a time.
    pub async fn seo_urls(
        &self,
        route: RouteName,
        page: u32,
        limit: u32,
    ) -> Result<SeoUrlSearchResult, Fault> {
        let criteria = ExtendedCriteria::new()
            .page(page)
            .limit(limit)
            .filter(FilterNode::equals("routeName", route.as_str()));
        self.seo_url(criteria).await
    }

    /// SEO URLs matching arbitrary criteria.
    pub async fn seo_url(&self, criteria: ExtendedCriteria) -> Result<SeoUrlSearchResult, Fault> {
        self.dispatcher.invoke::<ReadSeoUrl>(&criteria).await
    }

    /// Cross-selling groups of a product.
    pub async fn cross_sell(
        &self,
        product_id: &ProductId,
    ) -> Result<ExtendedCrossSellingElementCollection, Fault> {
        let params = ReadProductCrossSellingsParams {
            product_id: product_id.clone(),
        };
        self.dispatcher.invoke::<ReadProductCrossSellings>(&params).await
    }

    /// The session context of the configured token.
    pub async fn context(&self) -> Result<SalesChannelContext, Fault> {
        self.dispatcher.invoke::<ReadContext>(&NoParams {}).await
    }

    /// The cart of the configured token.
    pub async fn cart(&self) -> Result<ExtendedCart, Fault> {
        self.dispatcher
            .invoke::<ReadCart>(&ReadCartParams::default())
            .await
    }

    pub async fn add_line_items(&self, items: Vec<LineItemInput>) -> Result<ExtendedCart, Fault> {
        self.dispatcher
            .invoke::<AddLineItem>(&CartItems::new(items))
            .await
    }

    pub async fn remove_line_items(&self, ids: &[LineItemId]) -> Result<ExtendedCart, Fault> {
        let params = DeleteLineItemParams { ids: ids.to_vec() };
        self.dispatcher.invoke::<DeleteLineItem>(&params).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl<T: Transport> StorefrontApi<TimeoutTransport<T>> {
    /// Facade whose calls are bounded by the configured timeout.
    pub fn timed(config: ApiConfig, transport: T) -> Self {
        Self::new(Dispatcher::timed(config, transport))
    }
}

/// Opt-in policy that turns a fault into "no result", logging it.
pub trait BestEffort<T> {
    /// The value on success; on failure, log the fault and return `None`.
    fn or_log(self, operation: &str) -> Option<T>;
}

impl<T> BestEffort<T> for Result<T, Fault> {
    fn or_log(self, operation: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(fault) => {
                error!(operation, kind = %fault.kind(), error = %fault, "Storefront call failed");
                if let Some(payload) = fault.payload() {
                    error!(operation, details = ?payload.errors, "Details");
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use storefront_transport::{Method, ReplayTransport};

    fn api(transport: ReplayTransport) -> StorefrontApi<Arc<ReplayTransport>> {
        StorefrontApi::from_config(
            ApiConfig::new("https://shop.test", "SWSC123"),
            Arc::new(transport),
        )
    }

    fn sent_body(api: &StorefrontApi<Arc<ReplayTransport>>) -> serde_json::Value {
        let request = api.dispatcher().transport().last_request().unwrap();
        serde_json::from_slice(request.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_navigation_uses_type_as_both_ids() {
        let api = api(ReplayTransport::new().respond(
            Method::Post,
            "/navigation/footer-navigation/footer-navigation",
            200,
            json!([{ "id": "c1", "children": [{ "id": "c2" }] }]),
        ));

        let tree = api
            .navigation(StoreNavigationType::FooterNavigation, 2)
            .await
            .unwrap();
        assert_eq!(tree[0].children()[0].id.as_str(), "c2");

        let request = api.dispatcher().transport().last_request().unwrap();
        assert_eq!(request.header_value("sw-include-seo-urls"), Some("true"));
        assert_eq!(sent_body(&api), json!({ "depth": 2 }));
    }

    #[tokio::test]
    async fn test_seo_urls_filter_by_route() {
        let api = api(ReplayTransport::new().respond(
            Method::Post,
            "/seo-url",
            200,
            json!({ "total": 0, "elements": [] }),
        ));

        let result = api
            .seo_urls(RouteName::ProductDetail, DEFAULT_SEO_PAGE, DEFAULT_SEO_LIMIT)
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(
            sent_body(&api),
            json!({
                "page": 1,
                "limit": 100,
                "filter": [{ "type": "equals", "field": "routeName", "value": "frontend.detail.page" }]
            })
        );
    }

    #[tokio::test]
    async fn test_search_encodes_term() {
        let api = api(ReplayTransport::new().respond(
            Method::Post,
            "/search",
            200,
            json!({ "total": 0, "elements": [] }),
        ));
        let criteria = ProductListingCriteria::from(ExtendedCriteria::new().limit(10));

        api.search("blue shoe", criteria).await.unwrap();
        assert_eq!(sent_body(&api), json!({ "search": "blue%20shoe", "limit": 10 }));
    }

    #[tokio::test]
    async fn test_cross_sell_sends_no_body() {
        let api = api(ReplayTransport::new().respond(
            Method::Post,
            "/product/p1/cross-selling",
            200,
            json!([]),
        ));
        let groups = api.cross_sell(&ProductId::new("p1")).await.unwrap();
        assert!(groups.is_empty());
        assert!(api.dispatcher().transport().last_request().unwrap().body.is_none());
    }

    #[tokio::test]
    async fn test_for_cart_sends_token() {
        let api = api(ReplayTransport::new().respond(
            Method::Get,
            "/checkout/cart",
            200,
            json!({ "token": "cart-1", "lineItems": [] }),
        ));
        let cart = api.for_cart("cart-1").cart().await.unwrap();
        assert_eq!(cart.token.as_deref(), Some("cart-1"));

        let request = api.dispatcher().transport().last_request().unwrap();
        assert_eq!(request.header_value("sw-context-token"), Some("cart-1"));
        assert_eq!(request.url, "https://shop.test/store-api/checkout/cart?name");
    }

    #[tokio::test]
    async fn test_best_effort_swallows_fault() {
        let api = api(ReplayTransport::new().respond(
            Method::Get,
            "/context",
            500,
            json!({ "errors": [{ "status": "500", "code": "FRAMEWORK__INTERNAL" }] }),
        ));
        let context = api.context().await.or_log("context");
        assert!(context.is_none());
    }

    #[test]
    fn test_best_effort_passes_value() {
        let ok: Result<u32, Fault> = Ok(7);
        assert_eq!(ok.or_log("noop"), Some(7));
    }
}
