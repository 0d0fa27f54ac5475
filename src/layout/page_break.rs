//! # Page Break Decisions
//!
//! Packs rows into pages along the primary axis. Before placing a row we ask
//! "does this fit, with the footer still room for?" If it does, it goes on
//! the current page. If it doesn't, the page is closed and the row opens the
//! next one. Rows are never split, which is the whole point: no item is ever
//! cut at a page edge.

use tracing::trace;

use super::rows::{Row, FIT_TOLERANCE};
use crate::config::LayoutConfig;
use crate::model::{Edges, Frame, ItemKey, ScrollDirection, Size};
use crate::policy::SizingResolver;

/// What to do with the next row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Place the row on the current page.
    Place,
    /// The row starts a section that wants a fresh page.
    ForcedBreak,
    /// The row doesn't fit in what's left of the current page.
    Overflow,
}

/// Decide where the next row goes.
///
/// An empty page always takes the row, so a row deeper than the page is
/// placed alone instead of looping forever, and a forced break never
/// produces a blank page.
pub fn decide_break(
    page_is_empty: bool,
    cursor: f64,
    row_extent: f64,
    footer_reservation: f64,
    available: f64,
    force_new_page: bool,
) -> BreakDecision {
    if page_is_empty {
        return BreakDecision::Place;
    }
    if force_new_page {
        return BreakDecision::ForcedBreak;
    }
    if cursor + row_extent + footer_reservation > available + FIT_TOLERANCE {
        return BreakDecision::Overflow;
    }
    BreakDecision::Place
}

/// An item with its final frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedItem {
    pub key: ItemKey,
    pub frame: Frame,
}

/// A finished page.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutPage {
    /// Zero-based, in emission order.
    pub number: usize,
    /// Primary-axis coordinate of the page's leading edge.
    pub origin: f64,
    pub items: Vec<PlacedItem>,
    pub footer: Option<Frame>,
    pub row_count: usize,
}

/// Where we are on the page being filled.
#[derive(Debug, Clone)]
struct PageCursor {
    number: usize,
    origin: f64,
    /// Primary-axis advance from the content start, including the spacing
    /// after the last placed row.
    y: f64,
    footer_size: Size,
    items: Vec<PlacedItem>,
    row_count: usize,
}

impl PageCursor {
    fn new(number: usize, origin: f64, footer_size: Size) -> Self {
        Self {
            number,
            origin,
            y: 0.0,
            footer_size,
            items: Vec::new(),
            row_count: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Room that must stay free below the last row for this page's footer.
    fn footer_reservation(&self, direction: ScrollDirection, spacing: f64) -> f64 {
        if self.footer_size.is_zero() {
            0.0
        } else {
            spacing + direction.primary(self.footer_size)
        }
    }

    fn finalize(self, direction: ScrollDirection, inset: &Edges) -> LaidOutPage {
        let footer = if self.footer_size.is_zero() {
            None
        } else {
            let primary = self.origin + direction.primary_start(inset) + self.y;
            let cross = direction.cross_start(inset);
            Some(Frame::new(direction.point(primary, cross), self.footer_size))
        };

        LaidOutPage {
            number: self.number,
            origin: self.origin,
            items: self.items,
            footer,
            row_count: self.row_count,
        }
    }
}

/// Accumulates rows into pages for one pass.
pub struct PagePacker<'a> {
    resolver: &'a SizingResolver<'a>,
    direction: ScrollDirection,
    inset: Edges,
    /// Full page size along the primary axis; pages tile at this stride.
    page_extent: f64,
    /// Room for rows and footer once insets are removed.
    available: f64,
    spacing: f64,
    pages: Vec<LaidOutPage>,
    cursor: PageCursor,
}

impl<'a> PagePacker<'a> {
    /// `config` is expected to be sanitized already.
    pub fn new(config: &LayoutConfig, resolver: &'a SizingResolver<'a>) -> Self {
        let cursor = PageCursor::new(0, 0.0, resolver.size_for_footer(0));
        Self {
            resolver,
            direction: config.scroll_direction,
            inset: config.page_content_inset,
            page_extent: config.page_primary_extent(),
            available: config.content_primary_extent(),
            spacing: config.minimum_row_spacing,
            pages: Vec::new(),
            cursor,
        }
    }

    /// Place the next row, breaking the page first if needed.
    ///
    /// `force_new_page` is only meaningful for the first row of a section.
    pub fn push_row(&mut self, row: Row, force_new_page: bool) -> BreakDecision {
        let decision = decide_break(
            self.cursor.is_empty(),
            self.cursor.y,
            row.primary_extent,
            self.cursor.footer_reservation(self.direction, self.spacing),
            self.available,
            force_new_page,
        );

        if decision != BreakDecision::Place {
            trace!(
                page = self.cursor.number,
                rows = self.cursor.row_count,
                ?decision,
                "closing page"
            );
            self.new_page();
        }

        self.place(row);
        decision
    }

    /// Close the in-progress page and return every page in order.
    pub fn finish(mut self) -> Vec<LaidOutPage> {
        if !self.cursor.is_empty() {
            let last = self.cursor.finalize(self.direction, &self.inset);
            self.pages.push(last);
        }
        self.pages
    }

    fn new_page(&mut self) {
        let number = self.cursor.number + 1;
        let origin = number as f64 * self.page_extent;
        let next = PageCursor::new(number, origin, self.resolver.size_for_footer(number));
        let done = std::mem::replace(&mut self.cursor, next);
        self.pages.push(done.finalize(self.direction, &self.inset));
    }

    fn place(&mut self, row: Row) {
        let dir = self.direction;
        let primary = self.cursor.origin + dir.primary_start(&self.inset) + self.cursor.y;
        let cross_start = dir.cross_start(&self.inset);

        for item in row.items {
            let origin = dir.point(primary, cross_start + item.cross_offset);
            self.cursor.items.push(PlacedItem {
                key: item.key,
                frame: Frame::new(origin, item.size),
            });
        }

        self.cursor.y += row.primary_extent + self.spacing;
        self.cursor.row_count += 1;
    }
}
