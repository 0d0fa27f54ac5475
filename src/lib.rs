//! # Pagegrid
//!
//! A paged grid layout engine.
//!
//! Paging scroll containers snap to viewport-sized steps, but a wrapping
//! grid laid out as one continuous strip doesn't care where those steps
//! fall. Items end up cut in half at page edges.
//!
//! Pagegrid does the opposite: **the page is the fundamental unit of
//! layout.** Items are packed into rows, rows are packed into pages, and a
//! row that doesn't fit on the current page moves to the next one whole.
//! Every page is exactly one viewport long, so paging always lands cleanly.
//!
//! ## Architecture
//!
//! ```text
//! DataSource + SizingPolicy + LayoutConfig
//!       ↓
//!   [policy]            - Resolve item/footer sizes, section breaks
//!       ↓
//!   [layout::rows]      - Pack items into rows along the cross axis
//!       ↓
//!   [layout::page_break] - Pack rows into pages, place footers
//!       ↓
//!   [layout::index]     - Immutable, queryable LayoutIndex
//!       ↓
//!   [shared]            - Atomic publish to concurrent readers
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod model;
pub mod policy;
pub mod request;
pub mod shared;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::LayoutConfig;
pub use error::PagedError;
pub use layout::{LayoutEngine, LayoutIndex, LayoutInfo};
pub use model::{Edges, Frame, ItemKey, Point, ScrollDirection, Size};
pub use policy::{DataSource, ExplicitSizes, SizingPolicy};
pub use shared::SharedLayout;

use request::LayoutRequest;

/// Lay out a request described as JSON.
///
/// This is the entry point for the CLI and the wasm binding.
pub fn layout_json(json: &str) -> Result<LayoutInfo, PagedError> {
    let request: LayoutRequest = serde_json::from_str(json)?;
    Ok(request.layout().info())
}

/// Lay out a JSON request and return the snapshot as pretty JSON.
pub fn layout_json_to_string(json: &str) -> Result<String, PagedError> {
    let info = layout_json(json)?;
    serde_json::to_string_pretty(&info).map_err(PagedError::SerializeError)
}
