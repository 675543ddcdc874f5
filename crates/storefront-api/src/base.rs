//! The platform's published, generic operation catalog.
//!
//! Schemas here name the generic entities (`Category`, `Criteria`, ...). The
//! storefront replaces a handful of these contracts, see [`crate::overrides`].

use storefront_schema::SalesChannelContext;
use storefront_transport::Method;

use crate::catalog::OperationSet;
use crate::contract::{ListStyle, OperationContract, ParamSpec, ParamType, ResponseSchema, SchemaRef};
use crate::operation::{NoParams, Operation};

fn criteria() -> SchemaRef {
    SchemaRef::object("Criteria")
}

fn op(name: &str, method: Method, path: &str) -> OperationContract {
    OperationContract::new(name, method, path)
}

/// Build the generic operation catalog.
pub fn base_operations() -> OperationSet {
    [
        // Context
        ReadContext::contract(),
        op("updateContext", Method::Patch, "/context")
            .required_body(SchemaRef::object("ContextPatch"))
            .ok(SchemaRef::object("ContextTokenResponse")),
        // Category & navigation
        op("readCategory", Method::Post, "/category/{navigationId}?slots")
            .path_param("navigationId")
            .query_param(ParamSpec::optional("slots", ParamType::List(ListStyle::Pipe)))
            .body(SchemaRef::object("ProductListingCriteria"))
            .ok(SchemaRef::object("Category")),
        op("readCategoryList", Method::Post, "/category")
            .body(criteria())
            .ok(SchemaRef::search_result("Category")),
        op("readNavigation", Method::Post, "/navigation/{activeId}/{rootId}")
            .path_param("activeId")
            .path_param("rootId")
            .header_param(ParamSpec::optional("sw-include-seo-urls", ParamType::Boolean))
            .required_body(SchemaRef::object("NavigationCriteria"))
            .ok(SchemaRef::array("Category")),
        op("readBreadcrumb", Method::Get, "/breadcrumb/{id}")
            .path_param("id")
            .query_param(ParamSpec::optional(
                "type",
                ParamType::enumerated(["product", "category"]),
            ))
            .query_param(ParamSpec::optional("referrerCategoryId", ParamType::String))
            .ok(SchemaRef::object("BreadcrumbCollection")),
        // CMS
        op("readCms", Method::Post, "/cms/{id}")
            .path_param("id")
            .body(SchemaRef::object("CmsSlotsCriteria"))
            .ok(SchemaRef::object("CmsPage")),
        op("readLandingPage", Method::Post, "/landing-page/{landingPageId}")
            .path_param("landingPageId")
            .body(SchemaRef::object("CmsSlotsCriteria"))
            .ok(SchemaRef::object("LandingPage")),
        // Products
        op("readProduct", Method::Post, "/product")
            .body(criteria())
            .ok(SchemaRef::search_result("Product")),
        op("readProductDetail", Method::Post, "/product/{productId}")
            .path_param("productId")
            .body(criteria())
            .ok(SchemaRef::object("ProductDetailResponse")),
        op("readProductCrossSellings", Method::Post, "/product/{productId}/cross-selling")
            .path_param("productId")
            .ok(SchemaRef::object("CrossSellingElementCollection")),
        op("readProductListing", Method::Post, "/product-listing/{categoryId}")
            .path_param("categoryId")
            .body(SchemaRef::object("ProductListingCriteria"))
            .ok(SchemaRef::object("ProductListingResult")),
        op("readProductReviews", Method::Post, "/product/{productId}/reviews")
            .path_param("productId")
            .body(criteria())
            .ok(SchemaRef::search_result("ProductReview")),
        op("readProductManufacturer", Method::Post, "/product-manufacturer")
            .body(criteria())
            .ok(SchemaRef::search_result("ProductManufacturer")),
        op("searchSuggest", Method::Post, "/search-suggest")
            .required_body(SchemaRef::object("ProductSearchCriteria"))
            .ok(SchemaRef::object("ProductListingResult")),
        // SEO
        op("readSeoUrl", Method::Post, "/seo-url")
            .body(criteria())
            .ok(SchemaRef::search_result("SeoUrl")),
        // Cart
        op("readCart", Method::Get, "/checkout/cart?name")
            .query_param(ParamSpec::optional("name", ParamType::String))
            .ok(SchemaRef::object("Cart")),
        op("deleteCart", Method::Delete, "/checkout/cart")
            .response(204, ResponseSchema::NoContent),
        op("addLineItem", Method::Post, "/checkout/cart/line-item")
            .body(SchemaRef::object("CartItems"))
            .ok(SchemaRef::object("Cart")),
        op("updateLineItem", Method::Patch, "/checkout/cart/line-item")
            .body(SchemaRef::object("CartItems"))
            .ok(SchemaRef::object("Cart")),
        op("deleteLineItem", Method::Delete, "/checkout/cart/line-item?id[]={ids}")
            .query_param(ParamSpec::required("ids", ParamType::List(ListStyle::Bracket)))
            .ok(SchemaRef::object("Cart")),
        op("removeLineItem", Method::Post, "/checkout/cart/line-item/delete")
            .required_body(SchemaRef::object("LineItemIds"))
            .ok(SchemaRef::object("Cart")),
        // Checkout
        op("createOrder", Method::Post, "/checkout/order")
            .body(SchemaRef::object("OrderCreate"))
            .ok(SchemaRef::object("Order")),
        op("readOrder", Method::Post, "/order")
            .body(criteria())
            .ok(SchemaRef::object("OrderRouteResponse")),
        op("readPaymentMethod", Method::Post, "/payment-method?onlyAvailable")
            .query_param(ParamSpec::optional("onlyAvailable", ParamType::Boolean))
            .body(criteria())
            .ok(SchemaRef::search_result("PaymentMethod")),
        op("readShippingMethod", Method::Post, "/shipping-method?onlyAvailable")
            .query_param(ParamSpec::optional("onlyAvailable", ParamType::Boolean))
            .body(criteria())
            .ok(SchemaRef::search_result("ShippingMethod")),
        // Account
        op("loginCustomer", Method::Post, "/account/login")
            .required_body(SchemaRef::object("CustomerLogin"))
            .ok(SchemaRef::object("ContextTokenResponse")),
        op("logoutCustomer", Method::Post, "/account/logout")
            .ok(SchemaRef::object("ContextTokenResponse")),
        op("readCustomer", Method::Post, "/account/customer")
            .body(criteria())
            .ok(SchemaRef::object("Customer")),
        op("register", Method::Post, "/account/register")
            .required_body(SchemaRef::object("CustomerRegistration"))
            .ok(SchemaRef::object("Customer")),
        // System
        op("readCurrency", Method::Post, "/currency")
            .body(criteria())
            .ok(SchemaRef::array("Currency")),
        op("readLanguages", Method::Post, "/language")
            .body(criteria())
            .ok(SchemaRef::search_result("Language")),
        op("readCountry", Method::Post, "/country")
            .body(criteria())
            .ok(SchemaRef::search_result("Country")),
        op("readSalutation", Method::Post, "/salutation")
            .body(criteria())
            .ok(SchemaRef::search_result("Salutation")),
        op("sendContactMail", Method::Post, "/contact-form")
            .required_body(SchemaRef::object("ContactForm"))
            .ok(SchemaRef::object("ContactFormResult")),
        op("readSitemap", Method::Get, "/sitemap").ok(SchemaRef::array("Sitemap")),
    ]
    .into_iter()
    .collect()
}

/// `readContext get /context`: the current session context.
#[derive(Debug, Clone, Copy)]
pub struct ReadContext;

impl Operation for ReadContext {
    const KEY: &'static str = "readContext get /context";
    type Params = NoParams;
    type Response = SalesChannelContext;

    fn contract() -> OperationContract {
        op("readContext", Method::Get, "/context").ok(SchemaRef::object("SalesChannelContext"))
    }
}
