//! Entity sets: the generic platform schema and its refinement.
//!
//! Every entity that takes part in a refinement is defined once, generic over
//! an [`EntitySet`]. The set decides the type of each refined field, and every
//! self-referential field (`Category::children`, `CmsSection::blocks`,
//! `FilterNode::queries`, ...) is typed with the *same* set parameter. A
//! refinement chosen at the root therefore holds at every depth: a
//! `Category<Extended>` can only ever contain `Category<Extended>` children,
//! whose CMS slots are `CmsSlot<Extended>`, and so on.
//!
//! Entities outside the set (`SeoUrl`, `Media`, `PropertyGroupOption`) are
//! plain types shared by both sets.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cart::{CartError, LineItemPayload, ProductPrice};
use crate::cms::SlotConfig;
use crate::criteria::FilterNode;

/// Field bounds shared by every refinable field type.
pub trait RefinedField:
    Serialize + DeserializeOwned + Debug + Clone + PartialEq + Send + Sync + 'static
{
}

impl<T> RefinedField for T where
    T: Serialize + DeserializeOwned + Debug + Clone + PartialEq + Send + Sync + 'static
{
}

/// A family of field types used to instantiate the generic entities.
pub trait EntitySet:
    Debug + Clone + Copy + PartialEq + Eq + Default + Send + Sync + 'static
{
    /// `CmsSlot.config`.
    type SlotConfig: RefinedField;
    /// Entries of `Criteria.filter` and `Criteria.post-filter`.
    type Filter: RefinedField;
    /// `LineItem.price`.
    type LineItemPrice: RefinedField;
    /// `LineItem.payload`.
    type LineItemPayload: RefinedField;
    /// `Cart.errors`.
    type CartErrors: RefinedField;

    /// Name used in diagnostics and operation contracts.
    const NAME: &'static str;
}

/// The platform's generic schema: refinable fields stay opaque JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generic;

impl EntitySet for Generic {
    type SlotConfig = serde_json::Value;
    type Filter = serde_json::Value;
    type LineItemPrice = serde_json::Value;
    type LineItemPayload = serde_json::Value;
    type CartErrors = serde_json::Value;

    const NAME: &'static str = "generic";
}

/// The storefront refinement: refinable fields carry concrete structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extended;

impl EntitySet for Extended {
    type SlotConfig = SlotConfig;
    type Filter = FilterNode;
    type LineItemPrice = ProductPrice;
    type LineItemPayload = LineItemPayload;
    type CartErrors = Vec<CartError>;

    const NAME: &'static str = "extended";
}
