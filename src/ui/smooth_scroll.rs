//! Row-level smooth scroll with exponential ease-out.
//!
//! Input moves the *target* row instantly; each tick the displayed position
//! closes a fixed fraction of the remaining gap, so the page glides and
//! decelerates into place.  Every intermediate position is published to the
//! scroll tracker, which is what drives the block transforms.

/// Row-offset smooth scroll animator.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Displayed position in rows (fractional while animating).
    position: f64,
    /// Where input wants the page to be.
    target: f64,
    /// Largest allowed target.
    max: f64,
    /// Damping: `gap *= (1 - speed)` each tick.
    /// Higher speed = faster settle.  Good range: 0.25–0.45 at 30 fps.
    speed: f64,
}

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            position: 0.0,
            target: 0.0,
            max: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Update the scrollable extent, pulling the target back into range.
    pub fn set_max(&mut self, max: f64) {
        self.max = max.max(0.0);
        self.target = self.target.clamp(0.0, self.max);
    }

    pub fn scroll_by(&mut self, rows: f64) {
        self.target = (self.target + rows).clamp(0.0, self.max);
    }

    pub fn scroll_to(&mut self, row: f64) {
        self.target = row.clamp(0.0, self.max);
    }

    /// Teleport without animation (used on navigation).
    pub fn jump_to(&mut self, row: f64) {
        self.scroll_to(row);
        self.position = self.target;
    }

    /// Close part of the gap toward the target.  Call once per frame.
    pub fn tick(&mut self) {
        let gap = self.target - self.position;
        self.position += gap * self.speed;
        if (self.target - self.position).abs() < 0.05 {
            self.position = self.target;
        }
    }

    /// Current displayed position (fractional rows).
    pub fn position(&self) -> f64 {
        self.position
    }

    #[cfg(test)]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// True while the displayed position still differs from the target.
    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.position != self.target
    }
}
