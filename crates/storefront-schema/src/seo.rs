//! SEO URL entity and route names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::ids::SeoUrlId;

/// A human-readable URL registered for an entity route.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoUrl {
    pub id: SeoUrlId,
    pub sales_channel_id: Option<String>,
    pub language_id: Option<String>,
    pub foreign_key: String,
    pub route_name: String,
    pub path_info: String,
    pub seo_path_info: String,
    pub is_canonical: Option<bool>,
    pub is_modified: Option<bool>,
    pub is_deleted: Option<bool>,
    pub url: Option<String>,
    pub api_alias: Option<String>,
}

impl SeoUrl {
    /// The route this URL belongs to, if it is one the storefront knows.
    pub fn route(&self) -> Option<RouteName> {
        self.route_name.parse().ok()
    }
}

/// Storefront routes SEO URLs are resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RouteName {
    #[serde(rename = "frontend.navigation.page")]
    Navigation,
    #[serde(rename = "frontend.detail.page")]
    ProductDetail,
    #[serde(rename = "frontend.landing.page")]
    LandingPage,
}

impl RouteName {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteName::Navigation => "frontend.navigation.page",
            RouteName::ProductDetail => "frontend.detail.page",
            RouteName::LandingPage => "frontend.landing.page",
        }
    }
}

impl fmt::Display for RouteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frontend.navigation.page" => Ok(RouteName::Navigation),
            "frontend.detail.page" => Ok(RouteName::ProductDetail),
            "frontend.landing.page" => Ok(RouteName::LandingPage),
            other => Err(SchemaError::UnknownVariant {
                kind: "route name",
                value: other.to_string(),
            }),
        }
    }
}
