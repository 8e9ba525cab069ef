//! Scroll-reactive block transform.
//!
//! Turns the current [`ScrollState`] plus a block's one-time
//! [`BlockGeometry`] into a [`BlockTransform`]: how far the block is pushed
//! down, how faded it is, and how much it shrinks.  All distances are in
//! virtual pixels.
//!
//! Only blocks near the viewport center are *active* and get the translate /
//! scale emphasis.  Opacity reacts to every block's distance from its
//! original position, active or not.

// ───────────────────────────────────────── tuning ────────────

/// Downward travel per pixel scrolled past the block's top (active only).
pub const TRANSLATE_RATE: f64 = 0.15;
/// Opacity lost per pixel scrolled past the block's top.
pub const OPACITY_RATE: f64 = 0.0003;
/// Scale lost per pixel scrolled past the block's top (active only).
pub const SCALE_RATE: f64 = 0.00005;
/// Floor for [`BlockTransform::opacity`].
pub const MIN_OPACITY: f64 = 0.8;
/// Floor for [`BlockTransform::scale`].
pub const MIN_SCALE: f64 = 0.98;

// ───────────────────────────────────────── inputs ────────────

/// Global scroll sample: offset of the viewport top and its height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollState {
    pub scroll_y: f64,
    pub viewport_height: f64,
}

impl ScrollState {
    pub fn new(scroll_y: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            viewport_height,
        }
    }

    /// Vertical midpoint of what is currently visible.
    pub fn viewport_center(&self) -> f64 {
        self.scroll_y + self.viewport_height / 2.0
    }
}

/// Position of a block relative to the top of the scrollable area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    pub top: f64,
    pub height: f64,
}

impl BlockGeometry {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn center(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

// ───────────────────────────────────────── output ────────────

/// Visual transform applied to a block for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockTransform {
    pub translate_y: f64,
    pub opacity: f64,
    pub scale: f64,
    pub is_active: bool,
}

impl BlockTransform {
    /// No translation, fully opaque, unscaled, not active.
    pub const INERT: Self = Self {
        translate_y: 0.0,
        opacity: 1.0,
        scale: 1.0,
        is_active: false,
    };
}

impl Default for BlockTransform {
    fn default() -> Self {
        Self::INERT
    }
}

// ───────────────────────────────────────── calculator ────────

/// Compute the transform for a block.
///
/// Returns [`BlockTransform::INERT`] when the block has not been measured
/// yet, when the viewport has no height, or when any input is non-finite.
pub fn compute(state: ScrollState, geometry: Option<BlockGeometry>) -> BlockTransform {
    let Some(geometry) = geometry else {
        return BlockTransform::INERT;
    };
    let finite = state.scroll_y.is_finite()
        && state.viewport_height.is_finite()
        && geometry.top.is_finite()
        && geometry.height.is_finite();
    if !finite || state.viewport_height <= 0.0 {
        return BlockTransform::INERT;
    }

    let distance_from_center = (state.viewport_center() - geometry.center()).abs();
    let is_active = distance_from_center < state.viewport_height / 2.0;

    let distance_from_top = state.scroll_y - geometry.top;

    let translate_y = if is_active {
        (distance_from_top * TRANSLATE_RATE).max(0.0)
    } else {
        0.0
    };
    // Capped at 1.0: a block still below its resting position would
    // otherwise brighten past fully opaque.
    let opacity = (1.0 - distance_from_top * OPACITY_RATE).clamp(MIN_OPACITY, 1.0);
    let scale = if is_active {
        (1.0 - distance_from_top * SCALE_RATE).clamp(MIN_SCALE, 1.0)
    } else {
        1.0
    };

    BlockTransform {
        translate_y,
        opacity,
        scale,
        is_active,
    }
}
