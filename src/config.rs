//! # Layout Configuration
//!
//! Everything a pass reads besides the data source and sizing policy. Set
//! before a pass, read-only during it. A changed config means a full
//! recompute; there is no incremental update.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{clamp_non_negative, Edges, ScrollDirection, Size};

/// Configuration for one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Size of the scroll container. One page is exactly one viewport.
    pub viewport: Size,

    /// Used when the sizing policy declines to size an item.
    pub item_size: Size,

    /// Used when the sizing policy declines to size a footer.
    /// `Size::ZERO` means pages have no footer.
    pub footer_size: Size,

    /// Minimum gap between rows along the primary axis, and between items
    /// along the cross axis.
    pub minimum_row_spacing: f64,

    /// Whether each section starts on a fresh page when the policy has no
    /// opinion.
    pub start_all_sections_on_new_page: bool,

    /// Margin inside every page, on all four sides.
    pub page_content_inset: Edges,

    pub scroll_direction: ScrollDirection,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport: Size::ZERO,
            item_size: Size::ZERO,
            footer_size: Size::ZERO,
            minimum_row_spacing: 10.0,
            start_all_sections_on_new_page: false,
            page_content_inset: Edges::default(),
            scroll_direction: ScrollDirection::Vertical,
        }
    }
}

impl LayoutConfig {
    /// A default configuration for the given viewport.
    pub fn with_viewport(width: f64, height: f64) -> Self {
        Self {
            viewport: Size::new(width, height),
            ..Default::default()
        }
    }

    /// Copy of this config with every negative or non-finite measurement
    /// clamped to zero. A degenerate page is better than no layout.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();

        if !self.viewport.is_valid() {
            warn!(viewport = ?self.viewport, "invalid viewport, clamping to zero");
            config.viewport = self.viewport.clamped();
        }
        if !self.item_size.is_valid() {
            warn!(item_size = ?self.item_size, "invalid default item size, clamping to zero");
            config.item_size = self.item_size.clamped();
        }
        if !self.footer_size.is_valid() {
            warn!(footer_size = ?self.footer_size, "invalid default footer size, clamping to zero");
            config.footer_size = self.footer_size.clamped();
        }
        if !self.page_content_inset.is_valid() {
            warn!(inset = ?self.page_content_inset, "invalid page content inset, clamping to zero");
            config.page_content_inset = self.page_content_inset.clamped();
        }
        let spacing = clamp_non_negative(self.minimum_row_spacing);
        if spacing != self.minimum_row_spacing {
            warn!(
                spacing = self.minimum_row_spacing,
                "invalid minimum row spacing, clamping to zero"
            );
            config.minimum_row_spacing = spacing;
        }

        config
    }

    /// Page extent along the scroll axis, insets included.
    pub fn page_primary_extent(&self) -> f64 {
        self.scroll_direction.primary(self.viewport)
    }

    /// Room for rows along the scroll axis once insets are taken out.
    pub fn content_primary_extent(&self) -> f64 {
        let dir = self.scroll_direction;
        (dir.primary(self.viewport) - dir.primary_insets(&self.page_content_inset)).max(0.0)
    }

    /// Room for items along the fixed axis once insets are taken out.
    pub fn content_cross_extent(&self) -> f64 {
        let dir = self.scroll_direction;
        (dir.cross(self.viewport) - dir.cross_insets(&self.page_content_inset)).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.item_size, Size::ZERO);
        assert_eq!(config.footer_size, Size::ZERO);
        assert_eq!(config.minimum_row_spacing, 10.0);
        assert!(!config.start_all_sections_on_new_page);
        assert_eq!(config.page_content_inset, Edges::default());
        assert_eq!(config.scroll_direction, ScrollDirection::Vertical);
    }

    #[test]
    fn content_extents_subtract_insets() {
        let mut config = LayoutConfig::with_viewport(320.0, 480.0);
        config.page_content_inset = Edges {
            top: 10.0,
            left: 5.0,
            bottom: 20.0,
            right: 15.0,
        };
        assert_eq!(config.content_cross_extent(), 300.0);
        assert_eq!(config.content_primary_extent(), 450.0);
        assert_eq!(config.page_primary_extent(), 480.0);

        config.scroll_direction = ScrollDirection::Horizontal;
        assert_eq!(config.content_cross_extent(), 450.0);
        assert_eq!(config.content_primary_extent(), 300.0);
        assert_eq!(config.page_primary_extent(), 320.0);
    }

    #[test]
    fn insets_larger_than_viewport_leave_no_room() {
        let mut config = LayoutConfig::with_viewport(100.0, 100.0);
        config.page_content_inset = Edges::uniform(80.0);
        assert_eq!(config.content_cross_extent(), 0.0);
        assert_eq!(config.content_primary_extent(), 0.0);
    }

    #[test]
    fn sanitize_clamps_negative_and_nan() {
        let config = LayoutConfig {
            viewport: Size::new(-1.0, 200.0),
            item_size: Size::new(f64::NAN, 10.0),
            footer_size: Size::new(5.0, -5.0),
            minimum_row_spacing: -3.0,
            page_content_inset: Edges::uniform(-2.0),
            ..Default::default()
        };
        let clean = config.sanitized();
        assert_eq!(clean.viewport, Size::new(0.0, 200.0));
        assert_eq!(clean.item_size, Size::new(0.0, 10.0));
        assert_eq!(clean.footer_size, Size::new(5.0, 0.0));
        assert_eq!(clean.minimum_row_spacing, 0.0);
        assert_eq!(clean.page_content_inset, Edges::default());
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let json = r#"{
            "viewport": { "width": 320, "height": 480 },
            "itemSize": { "width": 100, "height": 50 },
            "startAllSectionsOnNewPage": true,
            "scrollDirection": "Horizontal"
        }"#;
        let config: LayoutConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.viewport, Size::new(320.0, 480.0));
        assert_eq!(config.item_size, Size::new(100.0, 50.0));
        assert!(config.start_all_sections_on_new_page);
        assert_eq!(config.scroll_direction, ScrollDirection::Horizontal);
        assert_eq!(config.minimum_row_spacing, 10.0);
    }
}
