//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Duration;

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    block::{BlockId, ParallaxBlock},
    content::{self, Body, Page},
    dot_grid::DotGrid,
    gradient::OvalGradient,
    rotation::NameRotator,
    route::Route,
    tracker::{ScrollTracker, SignalHooks},
};
use crate::ui::layout::{point_in_rect, AppLayout};
use crate::ui::nav::nav_targets;
use crate::ui::page_widget::{self, block_at, PageLayout, Placement};
use crate::ui::smooth_scroll::SmoothScroll;

/// Opacity used for every hover gradient.
const GRADIENT_OPACITY: f64 = 0.9;
/// Ticks between dot-grid drift steps.
const DRIFT_EVERY: u32 = 6;

/// Top-level application state.
pub struct AppState {
    pub route: Route,
    pub page: Page,
    /// Shared scroll signal; every mounted block subscribes to it.
    pub tracker: ScrollTracker,
    /// One block per page section, indexed by section.
    pub blocks: Vec<ParallaxBlock>,
    /// Hover gradients, indexed by block id.
    pub gradients: Vec<Option<OvalGradient>>,
    /// Section layout for the current content width (`None` before the
    /// first frame).
    pub page_layout: Option<PageLayout>,
    pub scroll: SmoothScroll,
    pub rotator: NameRotator,
    pub dots: Option<DotGrid>,
    pub dot_phase: u32,
    frames: u32,
    /// Block under the mouse cursor.
    pub hovered_block: Option<BlockId>,
    /// Nav target under the mouse cursor.
    pub hovered_nav: Option<usize>,
    /// Last cell the mouse reported, if any.
    pub pointer: Option<(u16, u16)>,
    pub config: AppConfig,
    /// Full terminal area as of the last resize.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(route: Route, config: AppConfig, hooks: impl SignalHooks + 'static) -> Self {
        let tracker = ScrollTracker::new(hooks);
        let page = content::page(route);
        let blocks = mount_blocks(&page, &tracker);
        let gradients = page_gradients(&page);
        Self {
            route,
            page,
            tracker,
            blocks,
            gradients,
            page_layout: None,
            scroll: SmoothScroll::new(config.smooth_scroll_speed),
            rotator: NameRotator::with_interval(Duration::from_millis(config.name_interval_ms)),
            dots: config.dot_preset.map(|p| p.grid()),
            dot_phase: 0,
            frames: 0,
            hovered_block: None,
            hovered_nav: None,
            pointer: None,
            config,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    /// Rows of page visible at once.
    pub fn viewport_rows(&self) -> u16 {
        self.layout().content_area.height
    }

    /// Switch pages.  The new page's blocks are mounted before the old ones
    /// are dropped, so the shared scroll listener stays attached.
    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        tracing::debug!("navigate {} -> {}", self.route, route);
        self.route = route;
        self.page = content::page(route);
        self.blocks = mount_blocks(&self.page, &self.tracker);
        self.gradients = page_gradients(&self.page);
        self.hovered_block = None;
        self.hovered_nav = None;
        self.status_message = None;
        self.page_layout = None;
        self.relayout();
        self.scroll.jump_to(0.0);
        self.publish_scroll();
    }

    /// Record a new terminal size and lay the page out again if the content
    /// width changed.
    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        let width_changed = self
            .page_layout
            .as_ref()
            .map_or(true, |l| l.area_width != self.layout().content_area.width);
        if width_changed {
            self.relayout();
            if self.config.remeasure_on_resize {
                for block in &self.blocks {
                    block.invalidate_geometry();
                }
            }
        } else {
            self.update_scroll_extent();
        }
        self.tracker
            .resize(f64::from(self.viewport_rows()) * self.config.row_px);
        // The extent may have shrunk under the current offset.
        self.publish_scroll();
    }

    fn relayout(&mut self) {
        let width = self.layout().content_area.width;
        self.page_layout = Some(PageLayout::compute(&self.page, width, self.config.row_px));
        self.update_scroll_extent();
    }

    fn update_scroll_extent(&mut self) {
        let max = self
            .page_layout
            .as_ref()
            .map_or(0, |l| l.max_scroll(self.viewport_rows()));
        self.scroll.set_max(f64::from(max));
    }

    /// One-time geometry query for every block that still lacks it.  Called
    /// after each frame is drawn; a no-op for already-measured blocks.
    pub fn measure_blocks(&mut self) {
        let Some(layout) = self.page_layout.as_ref() else {
            return;
        };
        for block in &self.blocks {
            block.measure_with(layout);
        }
    }

    /// Push the displayed scroll position (in pixels) to every subscriber.
    /// The viewport height is kept current by [`AppState::resize`].
    pub fn publish_scroll(&self) {
        self.tracker
            .scroll_to(self.scroll.position() * self.config.row_px);
    }

    /// Advance animations by one frame of length `dt`.
    pub fn tick(&mut self, dt: Duration) {
        self.rotator.advance(dt);
        self.scroll.tick();
        self.publish_scroll();
        // Blocks keep sliding under a still cursor while the scroll settles.
        self.refresh_hover();

        self.frames = self.frames.wrapping_add(1);
        if self.dots.is_some_and(|d| d.drift) && self.frames % DRIFT_EVERY == 0 {
            self.dot_phase = self.dot_phase.wrapping_add(1);
        }
    }

    /// Where each block lands on screen right now.
    pub fn placements(&self) -> Vec<Placement> {
        match self.page_layout.as_ref() {
            Some(layout) => page_widget::placements(
                self.layout().content_area,
                layout,
                &self.blocks,
                self.scroll.position(),
            ),
            None => Vec::new(),
        }
    }

    /// Recompute what lies under the last known pointer position: the
    /// hovered nav target, the hovered block, and the link list shown in the
    /// status bar while a link block is hovered.
    pub fn refresh_hover(&mut self) {
        let Some((col, row)) = self.pointer else {
            return;
        };
        let layout = self.layout();

        self.hovered_nav = nav_targets(layout.nav_area, &self.page.nav)
            .iter()
            .position(|t| point_in_rect(t.area, col, row));

        self.hovered_block = if point_in_rect(layout.content_area, col, row) {
            block_at(&self.placements(), col, row)
        } else {
            None
        };

        self.status_message = self
            .hovered_block
            .and_then(|id| self.page.sections.get(id))
            .and_then(|section| match section.body {
                Body::Links(links) => Some(
                    links
                        .iter()
                        .map(|l| l.url)
                        .collect::<Vec<_>>()
                        .join("  "),
                ),
                _ => None,
            });
    }

    /// Drop all blocks, releasing their subscriptions (and with them the
    /// scroll listener).
    pub fn unmount(&mut self) {
        self.blocks.clear();
    }
}

fn mount_blocks(page: &Page, tracker: &ScrollTracker) -> Vec<ParallaxBlock> {
    (0..page.sections.len())
        .map(|id| ParallaxBlock::mount(id, tracker))
        .collect()
}

fn page_gradients(page: &Page) -> Vec<Option<OvalGradient>> {
    page.sections
        .iter()
        .map(|s| {
            s.gradient.and_then(|glow| match OvalGradient::from_hex(glow.stops, GRADIENT_OPACITY) {
                Ok(g) => Some(g.with_size(f64::from(glow.width), f64::from(glow.height))),
                Err(err) => {
                    tracing::warn!("dropping hover gradient: {err}");
                    None
                }
            })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::core::tracker::NoHooks;

    pub(crate) fn state_at(route: Route, width: u16, height: u16) -> AppState {
        let mut state = AppState::new(route, AppConfig::default(), NoHooks);
        state.resize(Rect::new(0, 0, width, height));
        state.measure_blocks();
        state
    }

    #[test]
    fn blocks_are_measured_after_first_layout() {
        let state = state_at(Route::Home, 80, 30);
        assert_eq!(state.blocks.len(), state.page.sections.len());
        assert!(state.blocks.iter().all(|b| b.is_measured()));
        assert_eq!(state.tracker.subscriber_count(), state.blocks.len());
        assert!(state.tracker.is_attached());
    }

    #[test]
    fn publishes_pixels_to_the_tracker() {
        let mut state = state_at(Route::About, 80, 30);
        state.scroll.jump_to(5.0);
        state.publish_scroll();
        let s = state.tracker.current();
        assert_eq!(s.scroll_y, 5.0 * 16.0);
        assert_eq!(s.viewport_height, f64::from(state.viewport_rows()) * 16.0);
    }

    #[test]
    fn resize_reports_the_new_viewport_height() {
        let mut state = state_at(Route::About, 80, 30);
        let seen = Rc::new(Cell::new(0.0));
        let sink = Rc::clone(&seen);
        let _sub = state
            .tracker
            .subscribe(move |s| sink.set(s.viewport_height));

        state.resize(Rect::new(0, 0, 80, 20));
        assert_eq!(seen.get(), f64::from(state.viewport_rows()) * 16.0);
        assert_eq!(state.tracker.current().viewport_height, seen.get());
    }

    #[test]
    fn navigation_swaps_blocks_without_detaching() {
        let mut state = state_at(Route::Home, 80, 30);
        state.scroll.scroll_to(10.0);
        state.navigate(Route::About);
        assert_eq!(state.route, Route::About);
        assert_eq!(state.tracker.subscriber_count(), state.page.sections.len());
        assert!(state.tracker.is_attached());
        assert_eq!(state.scroll.position(), 0.0);
        assert!(state.blocks.iter().all(|b| !b.is_measured()));
        state.measure_blocks();
        assert!(state.blocks.iter().all(|b| b.is_measured()));
    }

    #[test]
    fn resize_keeps_geometry_unless_configured() {
        let mut state = state_at(Route::About, 80, 30);
        let before = state.blocks[2].geometry();
        state.resize(Rect::new(0, 0, 40, 30));
        state.measure_blocks();
        assert_eq!(state.blocks[2].geometry(), before);

        let mut config = AppConfig::default();
        config.remeasure_on_resize = true;
        let mut state = AppState::new(Route::About, config, NoHooks);
        state.resize(Rect::new(0, 0, 80, 30));
        state.measure_blocks();
        let before = state.blocks[2].geometry();
        state.resize(Rect::new(0, 0, 40, 30));
        state.measure_blocks();
        assert_ne!(state.blocks[2].geometry(), before);
    }

    #[test]
    fn unmount_releases_the_listener() {
        let mut state = state_at(Route::Home, 80, 30);
        state.unmount();
        assert!(!state.tracker.is_attached());
    }

    #[test]
    fn tick_moves_toward_target_and_updates_transforms() {
        let mut state = state_at(Route::About, 80, 20);
        state.scroll.scroll_to(state.scroll.target() + 12.0);
        for _ in 0..60 {
            state.tick(Duration::from_millis(33));
        }
        assert_eq!(state.scroll.position(), state.scroll.target());
        assert_eq!(state.tracker.current().scroll_y, state.scroll.position() * 16.0);
        assert!(state.blocks[0].transform().opacity < 1.0);
    }
}
