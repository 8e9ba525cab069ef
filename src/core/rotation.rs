//! Rotating name label.
//!
//! Shows each name for `interval`, then fades it for `fade`, then swaps to
//! the next name and starts the interval over.  Time is fed in explicitly so
//! the rotator is deterministic under test.

use std::time::Duration;

pub const DEFAULT_NAMES: &[&str] = &["Adriel", "Ivan", "DV"];
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(2000);
pub const DEFAULT_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Showing,
    Fading,
}

#[derive(Debug, Clone)]
pub struct NameRotator {
    names: Vec<String>,
    index: usize,
    phase: Phase,
    /// Time spent in the current phase.
    elapsed: Duration,
    interval: Duration,
    fade: Duration,
}

impl NameRotator {
    /// An empty `names` list falls back to [`DEFAULT_NAMES`].
    pub fn new(names: Vec<String>, interval: Duration, fade: Duration) -> Self {
        let names = if names.is_empty() {
            DEFAULT_NAMES.iter().map(|s| s.to_string()).collect()
        } else {
            names
        };
        Self {
            names,
            index: 0,
            phase: Phase::Showing,
            elapsed: Duration::ZERO,
            interval: interval.max(Duration::from_millis(1)),
            fade,
        }
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self::new(Vec::new(), interval, DEFAULT_FADE)
    }

    pub fn label(&self) -> &str {
        &self.names[self.index]
    }

    pub fn is_fading(&self) -> bool {
        self.phase == Phase::Fading
    }

    /// Advance the clock by `dt`.  Returns `true` if the label changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut changed = false;
        let mut remaining = self.elapsed + dt;
        loop {
            let budget = match self.phase {
                Phase::Showing => self.interval,
                Phase::Fading => self.fade,
            };
            if remaining < budget {
                break;
            }
            remaining -= budget;
            match self.phase {
                Phase::Showing => self.phase = Phase::Fading,
                Phase::Fading => {
                    self.index = (self.index + 1) % self.names.len();
                    self.phase = Phase::Showing;
                    changed = true;
                }
            }
        }
        self.elapsed = remaining;
        changed
    }
}

impl Default for NameRotator {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_INTERVAL, DEFAULT_FADE)
    }
}
