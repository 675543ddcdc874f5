//! CMS layout hierarchy: page → section → block → slot.
//!
//! Each link of the chain is generic over the entity set, so refining the
//! slot configuration reaches slots through every intermediate level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::CmsPageId;
use crate::refinement::{EntitySet, Extended};

/// A CMS page (layout).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct CmsPage<E: EntitySet> {
    pub id: CmsPageId,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub sections: Option<Vec<CmsSection<E>>>,
    pub translated: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

/// A horizontal section of a CMS page.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct CmsSection<E: EntitySet> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub position: Option<i32>,
    pub sizing_mode: Option<String>,
    pub background_color: Option<String>,
    pub blocks: Option<Vec<CmsBlock<E>>>,
    pub api_alias: Option<String>,
}

/// A block within a section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct CmsBlock<E: EntitySet> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub position: Option<i32>,
    pub section_position: Option<String>,
    pub slots: Option<Vec<CmsSlot<E>>>,
    pub api_alias: Option<String>,
}

/// A content slot within a block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct CmsSlot<E: EntitySet> {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub slot: Option<String>,
    pub block_id: Option<String>,
    pub config: Option<E::SlotConfig>,
    pub data: Option<serde_json::Value>,
    pub translated: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

pub type ExtendedCmsPage = CmsPage<Extended>;
pub type ExtendedCmsSection = CmsSection<Extended>;
pub type ExtendedCmsBlock = CmsBlock<Extended>;
pub type ExtendedCmsSlot = CmsSlot<Extended>;

/// Refined slot configuration.
///
/// `content` carries the slot's main value; every other config entry has the
/// same `{source, value}` shape and is kept in `fields`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlotConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<SlotContent>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, SlotConfigField>,
}

/// The `content` entry of a slot configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SlotContent {
    /// `static` or `mapped`.
    pub source: String,
    pub value: String,
}

/// Any other slot configuration entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotConfigField {
    pub source: String,
    pub value: serde_json::Value,
}

impl SlotConfig {
    /// The static or mapped content value, if configured.
    pub fn content_value(&self) -> Option<&str> {
        self.content.as_ref().map(|c| c.value.as_str())
    }

    /// Look up another config entry by name.
    pub fn field(&self, name: &str) -> Option<&SlotConfigField> {
        self.fields.get(name)
    }
}

impl<E: EntitySet> CmsPage<E> {
    /// Iterate over every slot of the page, section by section, block by block.
    pub fn slots(&self) -> impl Iterator<Item = &CmsSlot<E>> {
        self.sections
            .iter()
            .flatten()
            .flat_map(|section| section.blocks.iter().flatten())
            .flat_map(|block| block.slots.iter().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refinement::Generic;
    use serde_json::json;

    fn layout() -> serde_json::Value {
        json!({
            "id": "page-1",
            "type": "product_list",
            "sections": [{
                "id": "sec-1",
                "type": "default",
                "blocks": [{
                    "id": "block-1",
                    "type": "text",
                    "slots": [{
                        "id": "slot-1",
                        "type": "text",
                        "slot": "content",
                        "config": {
                            "content": { "source": "static", "value": "<h1>Hello</h1>" },
                            "verticalAlign": { "source": "static", "value": null }
                        }
                    }]
                }]
            }]
        })
    }

    #[test]
    fn test_refined_slot_config_reached_through_chain() {
        let page: ExtendedCmsPage = serde_json::from_value(layout()).unwrap();
        let slot = page.slots().next().unwrap();
        let config = slot.config.as_ref().unwrap();

        assert_eq!(config.content_value(), Some("<h1>Hello</h1>"));
        assert_eq!(config.field("verticalAlign").unwrap().source, "static");
    }

    #[test]
    fn test_generic_slot_config_stays_opaque() {
        let page: CmsPage<Generic> = serde_json::from_value(layout()).unwrap();
        let slot = page.slots().next().unwrap();
        let config = slot.config.as_ref().unwrap();
        assert_eq!(config["content"]["value"], "<h1>Hello</h1>");
    }

    #[test]
    fn test_slot_without_content() {
        let config: SlotConfig = serde_json::from_value(json!({
            "media": { "source": "static", "value": "media-1" }
        }))
        .unwrap();
        assert_eq!(config.content_value(), None);
        assert_eq!(config.field("media").unwrap().value, json!("media-1"));
    }
}
