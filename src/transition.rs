//! Timed color interpolation driving the detail chart repaint.
//!
//! A transition is a plain value: the host's event loop advances it by calling
//! [`ColorTransition::color_at`] (through `StreamGraph::tick`) with its own clock.
//! Replacing the value cancels the previous animation.

use std::time::Duration;

use crate::style::Rgb;

/// Cubic ease-in-out on `[0, 1]`.
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTransition {
    pub from: Rgb,
    pub to: Rgb,
    pub start: Duration,
    pub duration: Duration,
}

impl ColorTransition {
    pub fn new(from: Rgb, to: Rgb, start: Duration, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    pub fn color_at(&self, now: Duration) -> Rgb {
        self.from.lerp(self.to, ease_cubic_in_out(self.progress(now)))
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        self.progress(now) >= 1.0
    }
}
