//! # Data Source and Sizing Policy
//!
//! The two capability seams the engine consults during a pass.
//!
//! `DataSource` says how many sections and items there are. `SizingPolicy`
//! may size individual items and footers and decide which sections start on
//! a fresh page. Every policy method is optional: returning `None` means
//! "no answer" and the engine falls back to `LayoutConfig`. Answering
//! `Some(Size::ZERO)` is different from declining: it is a real zero.

use std::collections::HashMap;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::layout::index::LayoutIndex;
use crate::model::{ItemKey, Size};

/// Supplies the shape of the content: sections and their item counts.
pub trait DataSource {
    fn number_of_sections(&self) -> usize;
    fn number_of_items(&self, section: usize) -> usize;
}

impl DataSource for [usize] {
    fn number_of_sections(&self) -> usize {
        self.len()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.get(section).copied().unwrap_or(0)
    }
}

impl DataSource for Vec<usize> {
    fn number_of_sections(&self) -> usize {
        self.as_slice().number_of_sections()
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.as_slice().number_of_items(section)
    }
}

impl<const N: usize> DataSource for [usize; N] {
    fn number_of_sections(&self) -> usize {
        N
    }

    fn number_of_items(&self, section: usize) -> usize {
        self.as_slice().number_of_items(section)
    }
}

/// Per-item, per-page and per-section overrides.
///
/// All methods have "declined" defaults, so an implementor only writes the
/// ones it cares about.
pub trait SizingPolicy {
    fn item_size(&self, _key: ItemKey) -> Option<Size> {
        None
    }

    /// Footer size for a page. `Some(Size::ZERO)` suppresses the footer.
    fn footer_size(&self, _page: usize) -> Option<Size> {
        None
    }

    fn starts_section_on_new_page(&self, _section: usize) -> Option<bool> {
        None
    }

    /// Called once after a pass, when the index is ready to query.
    fn layout_finalized(&self, _index: &LayoutIndex) {}
}

/// The policy that declines everything.
impl SizingPolicy for () {}

impl<P: SizingPolicy + ?Sized> SizingPolicy for &P {
    fn item_size(&self, key: ItemKey) -> Option<Size> {
        (**self).item_size(key)
    }

    fn footer_size(&self, page: usize) -> Option<Size> {
        (**self).footer_size(page)
    }

    fn starts_section_on_new_page(&self, section: usize) -> Option<bool> {
        (**self).starts_section_on_new_page(section)
    }

    fn layout_finalized(&self, index: &LayoutIndex) {
        (**self).layout_finalized(index)
    }
}

/// Resolves sizes and break rules for one pass: policy first, config second.
pub struct SizingResolver<'a> {
    config: &'a LayoutConfig,
    policy: &'a dyn SizingPolicy,
}

impl<'a> SizingResolver<'a> {
    pub fn new(config: &'a LayoutConfig, policy: &'a dyn SizingPolicy) -> Self {
        Self { config, policy }
    }

    pub fn size_for_item(&self, key: ItemKey) -> Size {
        match self.policy.item_size(key) {
            Some(size) if size.is_valid() => size,
            Some(size) => {
                debug!(%key, ?size, "policy returned an invalid item size, using default");
                self.config.item_size
            }
            None => self.config.item_size,
        }
    }

    /// `Size::ZERO` means no footer on that page.
    pub fn size_for_footer(&self, page: usize) -> Size {
        match self.policy.footer_size(page) {
            Some(size) if size.is_valid() => size,
            Some(size) => {
                debug!(page, ?size, "policy returned an invalid footer size, using default");
                self.config.footer_size
            }
            None => self.config.footer_size,
        }
    }

    pub fn starts_on_new_page(&self, section: usize) -> bool {
        self.policy
            .starts_section_on_new_page(section)
            .unwrap_or(self.config.start_all_sections_on_new_page)
    }
}

/// A table-driven policy: explicit answers for some keys, declines the rest.
#[derive(Debug, Clone, Default)]
pub struct ExplicitSizes {
    items: HashMap<ItemKey, Size>,
    footers: HashMap<usize, Size>,
    section_breaks: HashMap<usize, bool>,
}

impl ExplicitSizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: ItemKey, size: Size) -> Self {
        self.set_item(key, size);
        self
    }

    pub fn with_footer(mut self, page: usize, size: Size) -> Self {
        self.set_footer(page, size);
        self
    }

    pub fn with_section_break(mut self, section: usize, new_page: bool) -> Self {
        self.set_section_break(section, new_page);
        self
    }

    pub fn set_item(&mut self, key: ItemKey, size: Size) {
        self.items.insert(key, size);
    }

    pub fn set_footer(&mut self, page: usize, size: Size) {
        self.footers.insert(page, size);
    }

    pub fn set_section_break(&mut self, section: usize, new_page: bool) {
        self.section_breaks.insert(section, new_page);
    }
}

impl SizingPolicy for ExplicitSizes {
    fn item_size(&self, key: ItemKey) -> Option<Size> {
        self.items.get(&key).copied()
    }

    fn footer_size(&self, page: usize) -> Option<Size> {
        self.footers.get(&page).copied()
    }

    fn starts_section_on_new_page(&self, section: usize) -> Option<bool> {
        self.section_breaks.get(&section).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LayoutConfig {
        LayoutConfig {
            item_size: Size::new(100.0, 50.0),
            footer_size: Size::new(300.0, 20.0),
            start_all_sections_on_new_page: true,
            ..LayoutConfig::with_viewport(320.0, 400.0)
        }
    }

    #[test]
    fn declining_policy_falls_back_to_config() {
        let config = config();
        let resolver = SizingResolver::new(&config, &());
        assert_eq!(resolver.size_for_item(ItemKey::new(0, 0)), Size::new(100.0, 50.0));
        assert_eq!(resolver.size_for_footer(3), Size::new(300.0, 20.0));
        assert!(resolver.starts_on_new_page(1));
    }

    #[test]
    fn policy_answers_win() {
        let config = config();
        let policy = ExplicitSizes::new()
            .with_item(ItemKey::new(0, 1), Size::new(40.0, 40.0))
            .with_footer(0, Size::ZERO)
            .with_section_break(2, false);
        let resolver = SizingResolver::new(&config, &policy);

        assert_eq!(resolver.size_for_item(ItemKey::new(0, 1)), Size::new(40.0, 40.0));
        assert_eq!(resolver.size_for_item(ItemKey::new(0, 2)), Size::new(100.0, 50.0));
        // An explicit zero is an answer, not a decline.
        assert_eq!(resolver.size_for_footer(0), Size::ZERO);
        assert_eq!(resolver.size_for_footer(1), Size::new(300.0, 20.0));
        assert!(!resolver.starts_on_new_page(2));
        assert!(resolver.starts_on_new_page(3));
    }

    #[test]
    fn invalid_policy_answers_are_declines() {
        let config = config();
        let policy = ExplicitSizes::new()
            .with_item(ItemKey::new(0, 0), Size::new(-10.0, 50.0))
            .with_footer(0, Size::new(f64::NAN, 20.0));
        let resolver = SizingResolver::new(&config, &policy);
        assert_eq!(resolver.size_for_item(ItemKey::new(0, 0)), Size::new(100.0, 50.0));
        assert_eq!(resolver.size_for_footer(0), Size::new(300.0, 20.0));
    }

    #[test]
    fn resolution_is_idempotent() {
        let config = config();
        let policy = ExplicitSizes::new().with_item(ItemKey::new(1, 4), Size::new(7.0, 9.0));
        let resolver = SizingResolver::new(&config, &policy);
        let key = ItemKey::new(1, 4);
        assert_eq!(resolver.size_for_item(key), resolver.size_for_item(key));
    }

    #[test]
    fn slice_data_source() {
        let counts = vec![3, 0, 5];
        assert_eq!(counts.number_of_sections(), 3);
        assert_eq!(counts.number_of_items(1), 0);
        assert_eq!(counts.number_of_items(2), 5);
        assert_eq!(counts.number_of_items(9), 0);

        let fixed = [2usize, 4];
        assert_eq!(fixed.number_of_sections(), 2);
        assert_eq!(fixed.number_of_items(1), 4);
    }
}
