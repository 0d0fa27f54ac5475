//! # Layout Requests
//!
//! A JSON description of one pass: the configuration plus the sections to
//! lay out. This is what the CLI and the wasm binding accept. Library users
//! with their own data model implement `DataSource` and `SizingPolicy`
//! directly instead.
//!
//! ```json
//! {
//!   "config": {
//!     "viewport": { "width": 320, "height": 480 },
//!     "itemSize": { "width": 100, "height": 50 }
//!   },
//!   "sections": [
//!     { "itemCount": 7 },
//!     { "items": [{ "width": 310, "height": 120 }], "startOnNewPage": true }
//!   ],
//!   "footers": { "0": { "width": 320, "height": 20 } }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::layout::{LayoutEngine, LayoutIndex};
use crate::model::{ItemKey, Size};
use crate::policy::ExplicitSizes;

/// A complete layout request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    #[serde(default)]
    pub config: LayoutConfig,

    #[serde(default)]
    pub sections: Vec<RequestSection>,

    /// Footer sizes by page number. Pages not listed use
    /// `config.footerSize`.
    #[serde(default)]
    pub footers: BTreeMap<usize, Size>,
}

/// One section of a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSection {
    /// Number of items. Defaults to `items.len()`.
    #[serde(default)]
    pub item_count: Option<usize>,

    /// Explicit sizes for the leading items. Items past the end of this
    /// list use `config.itemSize`.
    #[serde(default)]
    pub items: Vec<Size>,

    /// Overrides `config.startAllSectionsOnNewPage` for this section.
    #[serde(default)]
    pub start_on_new_page: Option<bool>,
}

impl RequestSection {
    pub fn count(&self) -> usize {
        self.item_count.unwrap_or(0).max(self.items.len())
    }
}

impl LayoutRequest {
    /// Item counts per section.
    pub fn item_counts(&self) -> Vec<usize> {
        self.sections.iter().map(RequestSection::count).collect()
    }

    /// The per-item, per-page and per-section answers this request carries.
    pub fn policy(&self) -> ExplicitSizes {
        let mut policy = ExplicitSizes::new();
        for (section, sec) in self.sections.iter().enumerate() {
            for (item, size) in sec.items.iter().enumerate() {
                policy.set_item(ItemKey::new(section, item), *size);
            }
            if let Some(new_page) = sec.start_on_new_page {
                policy.set_section_break(section, new_page);
            }
        }
        for (page, size) in &self.footers {
            policy.set_footer(*page, *size);
        }
        policy
    }

    /// Run a full pass over this request.
    pub fn layout(&self) -> LayoutIndex {
        let engine = LayoutEngine::new(self.config.clone());
        engine.layout(&self.item_counts(), &self.policy())
    }
}
