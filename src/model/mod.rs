//! # Geometry Model
//!
//! The value types the layout engine speaks in: item keys, sizes, points,
//! frames and insets, plus the axis helpers that let the packers work in
//! scroll-relative terms.
//!
//! All packing math is written against two abstract axes:
//! - the **primary** axis, along which content scrolls and pages tile
//! - the **cross** axis, which is fixed to the viewport and along which
//!   items wrap into rows
//!
//! `ScrollDirection` maps those back to x/y and width/height, so the row and
//! page packers never need to know which way the grid scrolls.

use serde::{Deserialize, Serialize};

/// Identifies one item by section and position within that section.
///
/// Ordering is lexicographic: section first, then item. This is the order
/// the packers visit items in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ItemKey {
    pub section: usize,
    pub item: usize,
}

impl ItemKey {
    pub fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section, self.item)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// The "absent" sentinel. A footer of this size is not rendered.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Both components finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Replace negative and non-finite components with zero.
    pub fn clamped(&self) -> Self {
        Self {
            width: clamp_non_negative(self.width),
            height: clamp_non_negative(self.height),
        }
    }
}

/// A position in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Final position and size of an item or footer.
///
/// Coordinates span all pages concatenated along the primary axis, so the
/// frame of an item on page 3 of a vertical grid has `y >= 3 * viewport.height`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub origin: Point,
    pub size: Size,
}

impl Frame {
    pub fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    /// Whether two frames overlap. Frames that merely touch along an edge
    /// do not intersect.
    pub fn intersects(&self, other: &Frame) -> bool {
        self.min_x() < other.max_x()
            && other.min_x() < self.max_x()
            && self.min_y() < other.max_y()
            && other.min_y() < self.max_y()
    }
}

/// Margins applied inside every page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Edges {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Edges {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            left: v,
            bottom: v,
            right: v,
        }
    }

    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            left: horizontal,
            bottom: vertical,
            right: horizontal,
        }
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }

    pub fn is_valid(&self) -> bool {
        [self.top, self.left, self.bottom, self.right]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    pub fn clamped(&self) -> Self {
        Self {
            top: clamp_non_negative(self.top),
            left: clamp_non_negative(self.left),
            bottom: clamp_non_negative(self.bottom),
            right: clamp_non_negative(self.right),
        }
    }
}

/// Which geometric dimension the grid scrolls along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScrollDirection {
    #[default]
    Vertical,
    Horizontal,
}

impl ScrollDirection {
    /// Extent of `size` along the scroll axis.
    pub fn primary(self, size: Size) -> f64 {
        match self {
            ScrollDirection::Vertical => size.height,
            ScrollDirection::Horizontal => size.width,
        }
    }

    /// Extent of `size` along the fixed axis.
    pub fn cross(self, size: Size) -> f64 {
        match self {
            ScrollDirection::Vertical => size.width,
            ScrollDirection::Horizontal => size.height,
        }
    }

    /// Coordinate of `point` along the scroll axis.
    pub fn primary_of(self, point: Point) -> f64 {
        match self {
            ScrollDirection::Vertical => point.y,
            ScrollDirection::Horizontal => point.x,
        }
    }

    /// Build a point from axis-relative coordinates.
    pub fn point(self, primary: f64, cross: f64) -> Point {
        match self {
            ScrollDirection::Vertical => Point::new(cross, primary),
            ScrollDirection::Horizontal => Point::new(primary, cross),
        }
    }

    /// Build a size from axis-relative extents.
    pub fn size(self, primary: f64, cross: f64) -> Size {
        match self {
            ScrollDirection::Vertical => Size::new(cross, primary),
            ScrollDirection::Horizontal => Size::new(primary, cross),
        }
    }

    /// Inset at the leading edge of the scroll axis (top or left).
    pub fn primary_start(self, inset: &Edges) -> f64 {
        match self {
            ScrollDirection::Vertical => inset.top,
            ScrollDirection::Horizontal => inset.left,
        }
    }

    /// Combined insets along the scroll axis.
    pub fn primary_insets(self, inset: &Edges) -> f64 {
        match self {
            ScrollDirection::Vertical => inset.vertical(),
            ScrollDirection::Horizontal => inset.horizontal(),
        }
    }

    /// Inset at the leading edge of the fixed axis (left or top).
    pub fn cross_start(self, inset: &Edges) -> f64 {
        match self {
            ScrollDirection::Vertical => inset.left,
            ScrollDirection::Horizontal => inset.top,
        }
    }

    /// Combined insets along the fixed axis.
    pub fn cross_insets(self, inset: &Edges) -> f64 {
        match self {
            ScrollDirection::Vertical => inset.horizontal(),
            ScrollDirection::Horizontal => inset.vertical(),
        }
    }
}

/// Zero for negative and non-finite values, the value itself otherwise.
pub(crate) fn clamp_non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
