//! Media entities. Not part of the refinement set.

use serde::{Deserialize, Serialize};

use crate::ids::MediaId;

/// A media file (image, video, document).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: MediaId,
    pub url: Option<String>,
    pub alt: Option<String>,
    pub title: Option<String>,
    pub file_name: Option<String>,
    pub file_extension: Option<String>,
    pub mime_type: Option<String>,
    pub thumbnails: Option<Vec<MediaThumbnail>>,
    pub translated: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

/// A pre-rendered thumbnail of a media file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaThumbnail {
    pub id: Option<String>,
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Association between a product and a media file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductMedia {
    pub id: String,
    pub product_id: Option<String>,
    pub media_id: MediaId,
    pub position: Option<i32>,
    pub media: Option<Media>,
    pub api_alias: Option<String>,
}

impl ProductMedia {
    /// URL of the underlying media file, if loaded.
    pub fn url(&self) -> Option<&str> {
        self.media.as_ref().and_then(|m| m.url.as_deref())
    }
}
