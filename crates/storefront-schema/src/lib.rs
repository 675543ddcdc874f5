//! # storefront-schema
//!
//! Entity definitions for the storefront API contract layer.
//!
//! Entities that take part in a refinement (`Category`, the CMS chain,
//! `Product`, `Criteria`, `Cart`, `LineItem`) are generic over an
//! [`EntitySet`]: [`Generic`] mirrors the platform's published schema, while
//! [`Extended`] gives the refined fields concrete types. See
//! [`refinement`] for how the set propagates through recursive fields.
//!
//! ```ignore
//! use storefront_schema::prelude::*;
//!
//! let category: ExtendedCategory = serde_json::from_str(body)?;
//! for child in category.children() {
//!     // children are ExtendedCategory as well
//! }
//! ```

pub mod cart;
pub mod category;
pub mod cms;
pub mod context;
pub mod criteria;
pub mod error;
pub mod ids;
pub mod media;
pub mod message;
pub mod navigation;
pub mod product;
pub mod refinement;
pub mod result;
pub mod seo;

pub use cart::{
    CalculatedTax, Cart, CartError, CartItems, ExtendedCart, ExtendedLineItem, LineItem,
    LineItemInput, LineItemPayload, ProductPrice, TaxRule,
};
pub use category::{Category, ExtendedCategory};
pub use cms::{
    CmsBlock, CmsPage, CmsSection, CmsSlot, ExtendedCmsBlock, ExtendedCmsPage, ExtendedCmsSection,
    ExtendedCmsSlot, SlotConfig, SlotConfigField, SlotContent,
};
pub use context::SalesChannelContext;
pub use criteria::{
    Criteria, ExtendedCriteria, FilterNode, FilterValue, NavigationCriteria, PipeList,
    ProductListingCriteria, SearchCriteria, SortField, SortOrder, TotalCountMode,
};
pub use error::SchemaError;
pub use ids::{CategoryId, CmsPageId, LineItemId, MediaId, ProductId, SeoUrlId};
pub use media::{Media, MediaThumbnail, ProductMedia};
pub use message::MessageKey;
pub use navigation::StoreNavigationType;
pub use product::{CalculatedPrice, ExtendedProduct, Product, PropertyGroup, PropertyGroupOption};
pub use refinement::{EntitySet, Extended, Generic, RefinedField};
pub use result::{
    CategoryListingResult, CrossSelling, CrossSellingElement, EntitySearchResult,
    ExtendedCrossSellingElement, ExtendedCrossSellingElementCollection,
    ExtendedProductListingResult, ProductListingResult, ProductSearchResult, SeoUrlSearchResult,
};
pub use seo::{RouteName, SeoUrl};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::cart::{CartItems, ExtendedCart, LineItemInput};
    pub use crate::category::ExtendedCategory;
    pub use crate::cms::ExtendedCmsPage;
    pub use crate::criteria::{ExtendedCriteria, FilterNode, ProductListingCriteria, SortField};
    pub use crate::ids::{CategoryId, LineItemId, ProductId};
    pub use crate::message::MessageKey;
    pub use crate::navigation::StoreNavigationType;
    pub use crate::product::ExtendedProduct;
    pub use crate::refinement::{EntitySet, Extended, Generic};
    pub use crate::result::{EntitySearchResult, ExtendedProductListingResult};
    pub use crate::seo::{RouteName, SeoUrl};
}
