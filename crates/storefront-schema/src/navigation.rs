//! Navigation menu types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// The navigation menus configured on a sales channel.
///
/// Passed as both the active and the root id of the navigation read, the
/// platform resolves it to the menu's entry category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreNavigationType {
    MainNavigation,
    FooterNavigation,
    ServiceNavigation,
}

impl StoreNavigationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreNavigationType::MainNavigation => "main-navigation",
            StoreNavigationType::FooterNavigation => "footer-navigation",
            StoreNavigationType::ServiceNavigation => "service-navigation",
        }
    }
}

impl fmt::Display for StoreNavigationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreNavigationType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main-navigation" => Ok(StoreNavigationType::MainNavigation),
            "footer-navigation" => Ok(StoreNavigationType::FooterNavigation),
            "service-navigation" => Ok(StoreNavigationType::ServiceNavigation),
            other => Err(SchemaError::UnknownVariant {
                kind: "navigation type",
                value: other.to_string(),
            }),
        }
    }
}
