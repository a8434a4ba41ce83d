//! One-finger translation clamped to scale-dependent bounds.

use crate::models::config::ZoomConfig;
use crate::models::transform::CommittedState;

/// Largest offset magnitude allowed per axis at a given scale.
pub trait PanBounds {
    fn max_offset(&self, scale: f64) -> (f64, f64);
}

/// Bounds derived from the content extent: content overflows the viewport
/// proportionally to the scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentBounds {
    pub width: f64,
    pub height: f64,
}

impl ContentBounds {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn from_config(config: &ZoomConfig) -> Self {
        Self::new(config.content_width, config.content_height)
    }
}

impl PanBounds for ContentBounds {
    fn max_offset(&self, scale: f64) -> (f64, f64) {
        (
            overflow_magnitude(self.width, scale),
            overflow_magnitude(self.height, scale),
        )
    }
}

/// Scale-independent bounds, for free-form panning inside a fixed box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedBounds {
    pub max_x: f64,
    pub max_y: f64,
}

impl PanBounds for FixedBounds {
    fn max_offset(&self, _scale: f64) -> (f64, f64) {
        (sanitize_magnitude(self.max_x), sanitize_magnitude(self.max_y))
    }
}

/// `|extent / scale - extent| / 2`, zero at scale 1.
pub fn overflow_magnitude(extent: f64, scale: f64) -> f64 {
    if !scale.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    sanitize_magnitude(((extent / scale - extent) / 2.0).abs())
}

fn sanitize_magnitude(value: f64) -> f64 {
    if value.is_finite() {
        value.abs()
    } else {
        0.0
    }
}

/// Clamps one axis to `[-magnitude, magnitude]`, keeping the overshoot's sign.
pub fn clamp_axis(candidate: f64, magnitude: f64) -> f64 {
    if candidate >= 0.0 && candidate <= magnitude {
        candidate
    } else if candidate < 0.0 && candidate >= -magnitude {
        candidate
    } else if candidate < 0.0 {
        -magnitude
    } else {
        magnitude
    }
}

#[derive(Debug, Default, Clone)]
pub struct PanTracker {
    suppress_next: bool,
}

impl PanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next sample is treated as zero movement.
    pub fn suppress_next_sample(&mut self) {
        self.suppress_next = true;
    }

    /// Offsets for a one-finger sample with cumulative delta `(dx, dy)`.
    ///
    /// Dividing by the live scale keeps drag speed constant under zoom.
    pub fn update(
        &mut self,
        dx: f64,
        dy: f64,
        scale: f64,
        committed: &CommittedState,
        bounds: &dyn PanBounds,
    ) -> (f64, f64) {
        let (dx, dy) = if self.suppress_next {
            self.suppress_next = false;
            (0.0, 0.0)
        } else {
            (dx, dy)
        };
        let safe_scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let candidate_x = committed.last_offset_x + dx / safe_scale;
        let candidate_y = committed.last_offset_y + dy / safe_scale;
        let (max_x, max_y) = bounds.max_offset(safe_scale);
        (clamp_axis(candidate_x, max_x), clamp_axis(candidate_y, max_y))
    }
}
