//! A content block that reacts to scrolling.
//!
//! Each [`ParallaxBlock`] owns a subscription on the shared
//! [`ScrollTracker`], its one-time [`BlockGeometry`] measurement, and the
//! transform computed from the latest sample.  Geometry and transform live
//! in `Rc<Cell<_>>` so the subscription callback can update them in place.

use std::cell::Cell;
use std::rc::Rc;

use super::tracker::{ScrollTracker, Subscription};
use super::transform::{self, BlockGeometry, BlockTransform};

/// Stable identifier of a block within its page.
pub type BlockId = usize;

/// Answers the one-time "where did this block land?" query.
///
/// Returns `None` while the block has not been laid out yet.
pub trait GeometryProvider {
    fn geometry_of(&self, id: BlockId) -> Option<BlockGeometry>;
}

/// Scroll-reactive block.
pub struct ParallaxBlock {
    id: BlockId,
    tracker: ScrollTracker,
    geometry: Rc<Cell<Option<BlockGeometry>>>,
    transform: Rc<Cell<BlockTransform>>,
    _subscription: Subscription,
}

impl ParallaxBlock {
    /// Subscribe a new, not-yet-measured block.  Its transform is inert
    /// until [`measure_with`](Self::measure_with) succeeds.
    pub fn mount(id: BlockId, tracker: &ScrollTracker) -> Self {
        let geometry: Rc<Cell<Option<BlockGeometry>>> = Rc::new(Cell::new(None));
        let transform = Rc::new(Cell::new(BlockTransform::INERT));

        let subscription = {
            let geometry = Rc::clone(&geometry);
            let transform = Rc::clone(&transform);
            tracker.subscribe(move |state| {
                transform.set(transform::compute(state, geometry.get()));
            })
        };

        Self {
            id,
            tracker: tracker.clone(),
            geometry,
            transform,
            _subscription: subscription,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    #[cfg(test)]
    pub fn geometry(&self) -> Option<BlockGeometry> {
        self.geometry.get()
    }

    pub fn transform(&self) -> BlockTransform {
        self.transform.get()
    }

    pub fn is_measured(&self) -> bool {
        self.geometry.get().is_some()
    }

    /// Query `provider` once.  A no-op once geometry is known; returns
    /// whether the block is measured afterwards.
    pub fn measure_with(&self, provider: &dyn GeometryProvider) -> bool {
        if self.is_measured() {
            return true;
        }
        let Some(geometry) = provider.geometry_of(self.id) else {
            return false;
        };
        tracing::debug!(
            block = self.id,
            top = geometry.top,
            height = geometry.height,
            "block measured"
        );
        self.geometry.set(Some(geometry));
        // Reflect the current scroll position without waiting for the next
        // sample.
        self.transform
            .set(transform::compute(self.tracker.current(), Some(geometry)));
        true
    }

    /// Forget the measurement; the block renders inert until re-measured.
    pub fn invalidate_geometry(&self) {
        self.geometry.set(None);
        self.transform.set(BlockTransform::INERT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tracker::NoHooks;
    use crate::core::transform::ScrollState;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Provider backed by a map, counting queries.
    #[derive(Default)]
    struct MapProvider {
        geometry: HashMap<BlockId, BlockGeometry>,
        queries: RefCell<u32>,
    }

    impl GeometryProvider for MapProvider {
        fn geometry_of(&self, id: BlockId) -> Option<BlockGeometry> {
            *self.queries.borrow_mut() += 1;
            self.geometry.get(&id).copied()
        }
    }

    #[test]
    fn unmeasured_block_stays_inert_while_scrolling() {
        let tracker = ScrollTracker::new(NoHooks);
        let block = ParallaxBlock::mount(0, &tracker);
        tracker.publish(ScrollState::new(400.0, 800.0));
        assert_eq!(block.transform(), BlockTransform::INERT);
    }

    #[test]
    fn measurement_happens_once_then_tracks_scroll() {
        let tracker = ScrollTracker::new(NoHooks);
        tracker.publish(ScrollState::new(0.0, 800.0));
        let block = ParallaxBlock::mount(0, &tracker);

        let mut provider = MapProvider::default();
        provider.geometry.insert(0, BlockGeometry::new(0.0, 900.0));

        assert!(block.measure_with(&provider));
        assert!(block.measure_with(&provider));
        assert_eq!(*provider.queries.borrow(), 1);
        assert!(block.transform().is_active);

        tracker.scroll_to(100.0);
        let t = block.transform();
        assert!((t.translate_y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn failed_measurement_is_retried() {
        let tracker = ScrollTracker::new(NoHooks);
        let block = ParallaxBlock::mount(3, &tracker);
        let mut provider = MapProvider::default();

        assert!(!block.measure_with(&provider));
        provider.geometry.insert(3, BlockGeometry::new(10.0, 10.0));
        assert!(block.measure_with(&provider));
        assert_eq!(*provider.queries.borrow(), 2);
    }

    #[test]
    fn invalidation_allows_remeasure() {
        let tracker = ScrollTracker::new(NoHooks);
        tracker.publish(ScrollState::new(0.0, 800.0));
        let block = ParallaxBlock::mount(0, &tracker);
        let mut provider = MapProvider::default();
        provider.geometry.insert(0, BlockGeometry::new(0.0, 100.0));
        block.measure_with(&provider);

        block.invalidate_geometry();
        assert!(!block.is_measured());
        assert_eq!(block.transform(), BlockTransform::INERT);

        provider.geometry.insert(0, BlockGeometry::new(50.0, 100.0));
        block.measure_with(&provider);
        assert_eq!(block.geometry(), Some(BlockGeometry::new(50.0, 100.0)));
    }

    #[test]
    fn dropping_blocks_releases_subscriptions() {
        let tracker = ScrollTracker::new(NoHooks);
        let blocks: Vec<_> = (0..4).map(|id| ParallaxBlock::mount(id, &tracker)).collect();
        assert_eq!(tracker.subscriber_count(), 4);
        drop(blocks);
        assert_eq!(tracker.subscriber_count(), 0);
        assert!(!tracker.is_attached());
    }
}
