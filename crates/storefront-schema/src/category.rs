//! Category tree entity.

use serde::{Deserialize, Serialize};

use crate::cms::CmsPage;
use crate::ids::CategoryId;
use crate::media::Media;
use crate::refinement::{EntitySet, Extended};
use crate::seo::SeoUrl;

/// A category node in the navigation tree.
///
/// `children` and `cmsPage` are typed with the same entity set as the node
/// itself; `seoUrls` and `media` always hold the shared base entities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Category<E: EntitySet> {
    pub id: CategoryId,
    pub parent_id: Option<CategoryId>,
    pub level: Option<u32>,
    pub path: Option<String>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub visible: Option<bool>,
    /// `page`, `link` or `folder`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub child_count: Option<u32>,
    pub breadcrumb: Option<Vec<String>>,
    pub external_link: Option<String>,
    pub link_type: Option<String>,
    pub link_new_tab: Option<bool>,
    pub cms_page_id: Option<String>,
    pub media: Option<Media>,
    pub seo_urls: Option<Vec<SeoUrl>>,
    pub children: Option<Vec<Category<E>>>,
    pub cms_page: Option<CmsPage<E>>,
    pub translated: Option<serde_json::Value>,
    pub api_alias: Option<String>,
}

pub type ExtendedCategory = Category<Extended>;

impl<E: EntitySet> Category<E> {
    /// Child categories, or an empty slice when none were loaded.
    pub fn children(&self) -> &[Category<E>] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether this node has loaded children.
    pub fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    /// Depth of the loaded subtree; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(Category::depth).max().unwrap_or(0)
    }

    /// Depth-first search for a node by id, including this node.
    pub fn find(&self, id: &CategoryId) -> Option<&Category<E>> {
        if &self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in the loaded subtree, including this node.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Category::node_count).sum::<usize>()
    }

    /// Canonical SEO path, if SEO URLs were loaded.
    pub fn seo_path(&self) -> Option<&str> {
        let urls = self.seo_urls.as_deref()?;
        urls.iter()
            .find(|url| url.is_canonical == Some(true))
            .or_else(|| urls.first())
            .map(|url| url.seo_path_info.as_str())
    }
}
