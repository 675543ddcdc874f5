//! Search criteria and filter trees.
//!
//! Criteria are request bodies: every field is optional and omitted from the
//! wire when unset.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::refinement::{EntitySet, Extended};

/// Search criteria accepted by every search-style operation.
///
/// `associations` nest further criteria of the same entity set, so a refined
/// filter type holds inside associations too.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Criteria<E: EntitySet> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Vec<E::Filter>>,
    #[serde(rename = "post-filter", default, skip_serializing_if = "Option::is_none")]
    pub post_filter: Option<Vec<E::Filter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<SortField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub associations: Option<BTreeMap<String, Criteria<E>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregations: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub includes: Option<BTreeMap<String, Vec<String>>>,
    #[serde(rename = "total-count-mode", default, skip_serializing_if = "Option::is_none")]
    pub total_count_mode: Option<TotalCountMode>,
}

pub type ExtendedCriteria = Criteria<Extended>;

impl<E: EntitySet> Criteria<E> {
    pub fn new() -> Self {
        Self {
            page: None,
            limit: None,
            term: None,
            ids: None,
            filter: None,
            post_filter: None,
            sort: None,
            associations: None,
            aggregations: None,
            grouping: None,
            fields: None,
            includes: None,
            total_count_mode: None,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    /// Append a filter.
    pub fn filter(mut self, filter: E::Filter) -> Self {
        self.filter.get_or_insert_with(Vec::new).push(filter);
        self
    }

    /// Append a post-filter (applied after aggregations).
    pub fn post_filter(mut self, filter: E::Filter) -> Self {
        self.post_filter.get_or_insert_with(Vec::new).push(filter);
        self
    }

    pub fn sort(mut self, sort: SortField) -> Self {
        self.sort.get_or_insert_with(Vec::new).push(sort);
        self
    }

    /// Load an association, with its own nested criteria.
    pub fn association(mut self, name: impl Into<String>, criteria: Criteria<E>) -> Self {
        self.associations
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), criteria);
        self
    }

    /// Restrict the fields returned for an entity (by api alias).
    pub fn include<I, S>(mut self, entity: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes
            .get_or_insert_with(BTreeMap::new)
            .insert(entity.into(), fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn total_count_mode(mut self, mode: TotalCountMode) -> Self {
        self.total_count_mode = Some(mode);
        self
    }

    /// Number of association levels below this criteria.
    pub fn association_depth(&self) -> usize {
        self.associations
            .iter()
            .flat_map(|assoc| assoc.values())
            .map(|nested| 1 + nested.association_depth())
            .max()
            .unwrap_or(0)
    }
}

/// Sort order of a sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortField {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub natural_sorting: Option<bool>,
}

impl SortField {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Some(SortOrder::Asc),
            natural_sorting: None,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: Some(SortOrder::Desc),
            natural_sorting: None,
        }
    }
}

/// How the platform computes `total` on search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TotalCountMode {
    None,
    Exact,
    NextPages,
}

/// A refined filter node.
///
/// Compound filters (`multi`, `not`) nest further nodes in `queries`, to any
/// depth.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterNode {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub value: Option<FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<Vec<FilterNode>>,
}

/// A filter value: string, boolean or an explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
    Null,
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Flag(value)
    }
}

/// A present key deserializes to `Some`, even when its value is `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl FilterNode {
    fn leaf(kind: &str, field: impl Into<String>, value: FilterValue) -> Self {
        Self {
            kind: kind.to_string(),
            field: Some(field.into()),
            value: Some(value),
            ..Self::default()
        }
    }

    fn compound(kind: &str, operator: &str, queries: Vec<FilterNode>) -> Self {
        Self {
            kind: kind.to_string(),
            operator: Some(operator.to_string()),
            queries: Some(queries),
            ..Self::default()
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::leaf("equals", field, value.into())
    }

    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::leaf("contains", field, FilterValue::Text(value.into()))
    }

    pub fn prefix(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::leaf("prefix", field, FilterValue::Text(value.into()))
    }

    /// `equals` against `null`.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::leaf("equals", field, FilterValue::Null)
    }

    /// All of `queries` must match.
    pub fn and(queries: Vec<FilterNode>) -> Self {
        Self::compound("multi", "and", queries)
    }

    /// Any of `queries` must match.
    pub fn or(queries: Vec<FilterNode>) -> Self {
        Self::compound("multi", "or", queries)
    }

    /// None of `queries` may match.
    pub fn not(queries: Vec<FilterNode>) -> Self {
        Self::compound("not", "or", queries)
    }

    /// Nested filter nodes, or an empty slice for leaves.
    pub fn queries(&self) -> &[FilterNode] {
        self.queries.as_deref().unwrap_or_default()
    }

    /// Depth of this filter tree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.queries().iter().map(FilterNode::depth).max().unwrap_or(0)
    }
}

/// A list sent as one `|`-separated string, e.g. `"a|b|c"`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PipeList(pub Vec<String>);

impl PipeList {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for PipeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("|"))
    }
}

impl Serialize for PipeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PipeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let joined = String::deserialize(deserializer)?;
        if joined.is_empty() {
            return Ok(PipeList::default());
        }
        Ok(PipeList(joined.split('|').map(str::to_string).collect()))
    }
}

/// Criteria for product listings: the refined criteria plus the listing
/// parameters and flags the platform evaluates for listing pages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProductListingCriteria {
    #[serde(flatten)]
    pub criteria: ExtendedCriteria,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<PipeList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_filter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_filter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PipeList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_filter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_whitelist: Option<PipeList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_filter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduce_aggregations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_free: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_free_filter: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_aggregations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_aggregations: Option<bool>,
}

impl ProductListingCriteria {
    pub fn new(criteria: ExtendedCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn manufacturers<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manufacturer = Some(PipeList::new(ids));
        self
    }

    pub fn properties<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = Some(PipeList::new(ids));
        self
    }

    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    /// Skip aggregation computation on the platform.
    pub fn without_aggregations(mut self) -> Self {
        self.no_aggregations = Some(true);
        self
    }
}

impl From<ExtendedCriteria> for ProductListingCriteria {
    fn from(criteria: ExtendedCriteria) -> Self {
        Self::new(criteria)
    }
}

/// Body of the full-text product search.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub search: String,
    #[serde(flatten)]
    pub listing: ProductListingCriteria,
}

impl SearchCriteria {
    pub fn new(search: impl Into<String>, listing: ProductListingCriteria) -> Self {
        Self {
            search: search.into(),
            listing,
        }
    }
}

/// Body of the navigation tree read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NavigationCriteria {
    #[serde(flatten)]
    pub criteria: ExtendedCriteria,
    #[serde(rename = "buildTree", default, skip_serializing_if = "Option::is_none")]
    pub build_tree: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
}

impl NavigationCriteria {
    pub fn depth(depth: u32) -> Self {
        Self {
            depth: Some(depth),
            ..Self::default()
        }
    }
}
