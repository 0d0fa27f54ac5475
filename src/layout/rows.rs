//! # Row Packing
//!
//! Groups the items of one section into rows along the cross axis. A row
//! keeps taking items until the next one would overflow the page's cross
//! extent. Rows never span sections.

use crate::model::{ItemKey, ScrollDirection, Size};

/// Slack for float noise when comparing a cursor against an extent, so that
/// `3 * 100 + 2 * 10` still fits in `320`.
pub(crate) const FIT_TOLERANCE: f64 = 1e-9;

/// A run of items sharing one position along the primary axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub section: usize,
    pub items: Vec<RowItem>,
    /// Sum of member cross sizes plus the spacing between them.
    pub cross_extent: f64,
    /// The row is as deep as its deepest item.
    pub primary_extent: f64,
}

/// An item placed within its row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowItem {
    pub key: ItemKey,
    pub size: Size,
    /// Offset from the row's cross-axis start.
    pub cross_offset: f64,
}

impl Row {
    fn new(section: usize) -> Self {
        Self {
            section,
            items: Vec::new(),
            cross_extent: 0.0,
            primary_extent: 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = ItemKey> + '_ {
        self.items.iter().map(|i| i.key)
    }
}

/// Pack the sized items of a single section into rows.
///
/// `cross_extent` is the page's cross size with insets already removed.
/// An item wider than `cross_extent` gets a row of its own; nothing is
/// dropped or resized.
pub fn pack_rows<I>(
    section: usize,
    items: I,
    direction: ScrollDirection,
    cross_extent: f64,
    spacing: f64,
) -> Vec<Row>
where
    I: IntoIterator<Item = (ItemKey, Size)>,
{
    let mut rows = Vec::new();
    let mut current = Row::new(section);
    let mut cursor = 0.0;

    for (key, size) in items {
        let cross = direction.cross(size);
        let primary = direction.primary(size);

        if !current.is_empty() && cursor + cross > cross_extent + FIT_TOLERANCE {
            rows.push(std::mem::replace(&mut current, Row::new(section)));
            cursor = 0.0;
        }

        current.items.push(RowItem {
            key,
            size,
            cross_offset: cursor,
        });
        current.cross_extent = cursor + cross;
        current.primary_extent = current.primary_extent.max(primary);
        cursor += cross + spacing;
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}
