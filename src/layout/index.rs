//! # Layout Index
//!
//! The result of a pass, flattened for querying. Built once from the page
//! packer's output and never mutated afterwards; a new pass builds a new
//! index.

use std::collections::HashMap;

use serde::Serialize;

use super::page_break::LaidOutPage;
use crate::config::LayoutConfig;
use crate::model::{Frame, ItemKey, ScrollDirection, Size};

/// Queryable geometry for one completed pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutIndex {
    direction: ScrollDirection,
    viewport: Size,
    frames: HashMap<ItemKey, Frame>,
    item_pages: HashMap<ItemKey, usize>,
    page_items: Vec<Vec<ItemKey>>,
    footers: Vec<Option<Frame>>,
    origins: Vec<f64>,
    /// Furthest primary coordinate touched by anything on the page. Only
    /// differs from `origin + page extent` when an oversized row overflows.
    page_ends: Vec<f64>,
}

/// What kind of thing an element in a rect query is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ElementKind {
    Item { key: ItemKey },
    Footer,
}

/// An item or footer returned from [`LayoutIndex::elements_in_rect`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutElement {
    pub kind: ElementKind,
    pub page: usize,
    pub frame: Frame,
}

impl LayoutIndex {
    /// An index with no pages.
    pub fn empty(config: &LayoutConfig) -> Self {
        Self::build(Vec::new(), config)
    }

    /// Flatten laid-out pages into lookup tables.
    pub fn build(pages: Vec<LaidOutPage>, config: &LayoutConfig) -> Self {
        let direction = config.scroll_direction;
        let page_extent = config.page_primary_extent();
        let item_count = pages.iter().map(|p| p.items.len()).sum();

        let mut index = LayoutIndex {
            direction,
            viewport: config.viewport,
            frames: HashMap::with_capacity(item_count),
            item_pages: HashMap::with_capacity(item_count),
            page_items: Vec::with_capacity(pages.len()),
            footers: Vec::with_capacity(pages.len()),
            origins: Vec::with_capacity(pages.len()),
            page_ends: Vec::with_capacity(pages.len()),
        };

        for page in pages {
            let mut end = page.origin + page_extent;
            let mut keys = Vec::with_capacity(page.items.len());

            for placed in page.items {
                end = end.max(primary_end(direction, &placed.frame));
                index.frames.insert(placed.key, placed.frame);
                index.item_pages.insert(placed.key, page.number);
                keys.push(placed.key);
            }
            if let Some(footer) = &page.footer {
                end = end.max(primary_end(direction, footer));
            }

            index.page_items.push(keys);
            index.footers.push(page.footer);
            index.origins.push(page.origin);
            index.page_ends.push(end);
        }

        index
    }

    // ── Point queries ───────────────────────────────────────────

    pub fn frame(&self, key: ItemKey) -> Option<Frame> {
        self.frames.get(&key).copied()
    }

    pub fn page(&self, key: ItemKey) -> Option<usize> {
        self.item_pages.get(&key).copied()
    }

    /// Items on a page in layout order. Empty for out-of-range pages.
    pub fn items(&self, page: usize) -> &[ItemKey] {
        self.page_items.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn footer_frame(&self, page: usize) -> Option<Frame> {
        self.footers.get(page).copied().flatten()
    }

    pub fn page_count(&self) -> usize {
        self.page_items.len()
    }

    pub fn item_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_items.is_empty()
    }

    pub fn scroll_direction(&self) -> ScrollDirection {
        self.direction
    }

    // ── Scroll geometry ─────────────────────────────────────────

    /// Total scrollable size: whole pages along the primary axis, the
    /// viewport along the cross axis.
    pub fn content_size(&self) -> Size {
        let dir = self.direction;
        dir.size(
            self.page_count() as f64 * dir.primary(self.viewport),
            dir.cross(self.viewport),
        )
    }

    /// Primary-axis coordinate where a page begins.
    pub fn page_origin(&self, page: usize) -> Option<f64> {
        self.origins.get(page).copied()
    }

    /// The page shown at a primary-axis scroll offset.
    pub fn page_at_offset(&self, offset: f64) -> Option<usize> {
        let extent = self.direction.primary(self.viewport);
        if self.is_empty() || !offset.is_finite() || offset < 0.0 || extent <= 0.0 {
            return None;
        }
        let page = (offset / extent).floor() as usize;
        (page < self.page_count()).then_some(page)
    }

    /// Every item and footer whose frame intersects `rect`, page by page,
    /// items before the footer within each page.
    pub fn elements_in_rect(&self, rect: Frame) -> Vec<LayoutElement> {
        let dir = self.direction;
        let rect_start = dir.primary_of(rect.origin);
        let rect_end = rect_start + dir.primary(rect.size);
        let mut elements = Vec::new();

        for page in 0..self.page_count() {
            if self.origins[page] >= rect_end || self.page_ends[page] <= rect_start {
                continue;
            }
            for &key in &self.page_items[page] {
                if let Some(frame) = self.frames.get(&key) {
                    if frame.intersects(&rect) {
                        elements.push(LayoutElement {
                            kind: ElementKind::Item { key },
                            page,
                            frame: *frame,
                        });
                    }
                }
            }
            if let Some(footer) = self.footers[page] {
                if footer.intersects(&rect) {
                    elements.push(LayoutElement {
                        kind: ElementKind::Footer,
                        page,
                        frame: footer,
                    });
                }
            }
        }

        elements
    }

    /// Serializable snapshot for tooling and the CLI.
    pub fn info(&self) -> LayoutInfo {
        LayoutInfo {
            page_count: self.page_count(),
            scroll_direction: self.direction,
            content_size: self.content_size(),
            pages: (0..self.page_count())
                .map(|page| PageInfo {
                    number: page,
                    origin: self.origins[page],
                    items: self.page_items[page]
                        .iter()
                        .filter_map(|key| {
                            self.frames.get(key).map(|frame| ItemInfo {
                                section: key.section,
                                item: key.item,
                                frame: *frame,
                            })
                        })
                        .collect(),
                    footer: self.footers[page],
                })
                .collect(),
        }
    }
}

fn primary_end(direction: ScrollDirection, frame: &Frame) -> f64 {
    direction.primary_of(frame.origin) + direction.primary(frame.size)
}

// ── Serializable layout metadata ────────────────────────────────

/// Complete layout metadata for all pages.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub page_count: usize,
    pub scroll_direction: ScrollDirection,
    pub content_size: Size,
    pub pages: Vec<PageInfo>,
}

/// Layout metadata for a single page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub number: usize,
    pub origin: f64,
    pub items: Vec<ItemInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Frame>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemInfo {
    pub section: usize,
    pub item: usize,
    pub frame: Frame,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::page_break::PlacedItem;
    use crate::model::Point;

    fn config() -> LayoutConfig {
        LayoutConfig::with_viewport(300.0, 400.0)
    }

    fn placed(section: usize, item: usize, x: f64, y: f64) -> PlacedItem {
        PlacedItem {
            key: ItemKey::new(section, item),
            frame: Frame::new(Point::new(x, y), Size::new(100.0, 50.0)),
        }
    }

    fn two_pages() -> LayoutIndex {
        let pages = vec![
            LaidOutPage {
                number: 0,
                origin: 0.0,
                items: vec![placed(0, 0, 0.0, 0.0), placed(0, 1, 110.0, 0.0)],
                footer: Some(Frame::new(Point::new(0.0, 60.0), Size::new(300.0, 20.0))),
                row_count: 1,
            },
            LaidOutPage {
                number: 1,
                origin: 400.0,
                items: vec![placed(1, 0, 0.0, 400.0)],
                footer: None,
                row_count: 1,
            },
        ];
        LayoutIndex::build(pages, &config())
    }

    #[test]
    fn point_queries() {
        let index = two_pages();
        assert_eq!(index.page_count(), 2);
        assert_eq!(index.item_count(), 3);
        assert_eq!(index.page(ItemKey::new(0, 1)), Some(0));
        assert_eq!(index.page(ItemKey::new(1, 0)), Some(1));
        assert_eq!(index.page(ItemKey::new(5, 5)), None);
        assert_eq!(
            index.frame(ItemKey::new(1, 0)).map(|f| f.origin),
            Some(Point::new(0.0, 400.0))
        );
        assert_eq!(index.items(0), &[ItemKey::new(0, 0), ItemKey::new(0, 1)]);
        assert!(index.items(2).is_empty());
        assert!(index.footer_frame(0).is_some());
        assert!(index.footer_frame(1).is_none());
        assert!(index.footer_frame(9).is_none());
    }

    #[test]
    fn empty_index() {
        let index = LayoutIndex::empty(&config());
        assert_eq!(index.page_count(), 0);
        assert!(index.items(0).is_empty());
        assert_eq!(index.frame(ItemKey::new(0, 0)), None);
        assert_eq!(index.content_size(), Size::new(300.0, 0.0));
        assert_eq!(index.page_at_offset(0.0), None);
    }

    #[test]
    fn scroll_geometry() {
        let index = two_pages();
        assert_eq!(index.content_size(), Size::new(300.0, 800.0));
        assert_eq!(index.page_origin(1), Some(400.0));
        assert_eq!(index.page_origin(2), None);
        assert_eq!(index.page_at_offset(0.0), Some(0));
        assert_eq!(index.page_at_offset(399.9), Some(0));
        assert_eq!(index.page_at_offset(400.0), Some(1));
        assert_eq!(index.page_at_offset(800.0), None);
        assert_eq!(index.page_at_offset(-1.0), None);
    }

    #[test]
    fn rect_query_returns_items_then_footer() {
        let index = two_pages();
        let rect = Frame::new(Point::new(0.0, 0.0), Size::new(300.0, 400.0));
        let found = index.elements_in_rect(rect);
        assert_eq!(found.len(), 3);
        assert_eq!(
            found[0].kind,
            ElementKind::Item {
                key: ItemKey::new(0, 0)
            }
        );
        assert_eq!(found[2].kind, ElementKind::Footer);
        assert!(found.iter().all(|e| e.page == 0));
    }

    #[test]
    fn rect_query_spanning_pages() {
        let index = two_pages();
        let rect = Frame::new(Point::new(0.0, 70.0), Size::new(50.0, 400.0));
        let found = index.elements_in_rect(rect);
        // footer (60..80) and page 1's first item (400..450)
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, ElementKind::Footer);
        assert_eq!(found[1].page, 1);
    }

    #[test]
    fn info_snapshot_serializes() {
        let index = two_pages();
        let info = index.info();
        assert_eq!(info.page_count, 2);
        assert_eq!(info.pages[0].items.len(), 2);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["pageCount"], 2);
        assert_eq!(json["pages"][0]["footer"]["size"]["height"], 20.0);
        assert!(json["pages"][1].get("footer").is_none());
    }
}
