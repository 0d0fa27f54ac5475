//! # Paged Grid Layout Engine
//!
//! This is the heart of the crate.
//!
//! ## The Problem
//!
//! A paging scroll container snaps to viewport-sized steps. Lay a wrapping
//! grid out as one continuous strip and the page edges fall wherever they
//! fall: an item straddling the edge shows its top half on one page and its
//! bottom half on the next.
//!
//! ## How the Engine Works
//!
//! The page is the unit of layout, not an afterthought. One pass:
//!
//! 1. Resolve every item's size (policy first, config fallback)
//! 2. Pack each section's items into rows bounded by the cross extent
//! 3. Before placing a row on the current page, ask: "does it fit, with
//!    room left for this page's footer?"
//! 4. If it fits: place it, advance the cursor
//! 5. If it doesn't, or the row opens a section that wants a fresh page:
//!    close the page (placing its footer after the last row) and open the
//!    next one at exactly one viewport further along the scroll axis
//! 6. Flatten the pages into an immutable [`LayoutIndex`]
//!
//! Pages tile at the viewport stride no matter how full they are, so a
//! paging scroll view lands on page boundaries cleanly.

pub mod index;
pub mod page_break;
pub mod rows;

use tracing::{debug, debug_span};

use crate::config::LayoutConfig;
use crate::model::ItemKey;
use crate::policy::{DataSource, SizingPolicy, SizingResolver};

pub use index::{ElementKind, LayoutElement, LayoutIndex, LayoutInfo};
use page_break::PagePacker;
use rows::pack_rows;

/// The main layout engine.
///
/// Holds the configuration; every call to [`LayoutEngine::layout`] is an
/// independent full pass.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    /// Negative or non-finite measurements in `config` are clamped to zero.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config: config.sanitized(),
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Main entry point: lay out every section into pages.
    ///
    /// Notifies `policy` through [`SizingPolicy::layout_finalized`] once the
    /// index is built.
    pub fn layout(&self, source: &dyn DataSource, policy: &dyn SizingPolicy) -> LayoutIndex {
        let config = &self.config;
        let _span = debug_span!(
            "layout",
            sections = source.number_of_sections(),
            direction = ?config.scroll_direction
        )
        .entered();

        let resolver = SizingResolver::new(config, policy);
        let mut packer = PagePacker::new(config, &resolver);
        let cross_extent = config.content_cross_extent();
        let direction = config.scroll_direction;
        let spacing = config.minimum_row_spacing;
        let mut row_count = 0;

        for section in 0..source.number_of_sections() {
            let count = source.number_of_items(section);
            if count == 0 {
                continue;
            }

            let sized = (0..count).map(|item| {
                let key = ItemKey::new(section, item);
                (key, resolver.size_for_item(key))
            });
            let rows = pack_rows(section, sized, direction, cross_extent, spacing);
            row_count += rows.len();

            let force = resolver.starts_on_new_page(section);
            for (i, row) in rows.into_iter().enumerate() {
                packer.push_row(row, force && i == 0);
            }
        }

        let index = LayoutIndex::build(packer.finish(), config);
        debug!(
            items = index.item_count(),
            rows = row_count,
            pages = index.page_count(),
            "layout pass complete"
        );

        policy.layout_finalized(&index);
        index
    }
}
