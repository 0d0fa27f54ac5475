//! # Shared Layout Handle
//!
//! Publishes layout indexes to concurrent readers. A pass always builds a
//! complete new index off to the side; publishing is a single pointer swap,
//! so a reader holds either the old index or the new one, never a half-built
//! one.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::layout::{LayoutEngine, LayoutIndex};
use crate::policy::{DataSource, SizingPolicy};

/// The current layout, readable from any thread.
#[derive(Debug)]
pub struct SharedLayout {
    current: RwLock<Arc<LayoutIndex>>,
}

impl SharedLayout {
    pub fn new(index: LayoutIndex) -> Self {
        Self {
            current: RwLock::new(Arc::new(index)),
        }
    }

    /// The index as of now. Later publishes don't affect the returned
    /// snapshot.
    pub fn snapshot(&self) -> Arc<LayoutIndex> {
        Arc::clone(&self.current.read())
    }

    /// Replace the current index, returning the one it replaced.
    pub fn publish(&self, index: LayoutIndex) -> Arc<LayoutIndex> {
        self.swap(Arc::new(index))
    }

    /// Run a full pass and publish the result.
    ///
    /// The pass runs without holding the lock; readers keep seeing the
    /// previous index until the swap.
    pub fn recompute(
        &self,
        engine: &LayoutEngine,
        source: &dyn DataSource,
        policy: &dyn SizingPolicy,
    ) -> Arc<LayoutIndex> {
        let index = Arc::new(engine.layout(source, policy));
        self.swap(Arc::clone(&index));
        index
    }

    fn swap(&self, next: Arc<LayoutIndex>) -> Arc<LayoutIndex> {
        let previous = std::mem::replace(&mut *self.current.write(), next);
        debug!(replaced_pages = previous.page_count(), "published layout");
        previous
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::config::LayoutConfig;
    use crate::model::{ItemKey, Size};

    fn engine() -> LayoutEngine {
        LayoutEngine::new(LayoutConfig {
            item_size: Size::new(100.0, 50.0),
            ..LayoutConfig::with_viewport(320.0, 400.0)
        })
    }

    #[test]
    fn snapshots_survive_republish() {
        let engine = engine();
        let shared = SharedLayout::new(engine.layout(&[3usize], &()));
        let before = shared.snapshot();

        let after = shared.recompute(&engine, &[40usize], &());
        assert_eq!(before.page_count(), 1);
        assert_eq!(after.page_count(), 3);
        assert_eq!(shared.snapshot().page_count(), 3);
        assert_eq!(before.page(ItemKey::new(0, 30)), None);
    }

    #[test]
    fn readers_see_whole_indexes() {
        let engine = engine();
        let small = engine.layout(&[3usize], &());
        let large = engine.layout(&[40usize], &());
        let shared = Arc::new(SharedLayout::new(small.clone()));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for _ in 0..200 {
                        let index = shared.snapshot();
                        let items: usize = (0..index.page_count())
                            .map(|p| index.items(p).len())
                            .sum();
                        assert!(items == 3 || items == 40);
                        assert_eq!(items, index.item_count());
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            shared.publish(large.clone());
            shared.publish(small.clone());
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
