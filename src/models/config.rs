//! Per-controller configuration.

use serde::{Deserialize, Serialize};

/// Resting scale below which a released gesture snaps back up.
pub const DEFAULT_SNAP_FLOOR: f64 = 1.0;
/// Resting scale above which a released gesture snaps back down.
///
/// Deliberately independent of `max_scale`: a pinch may overshoot this
/// while the fingers are down.
pub const DEFAULT_SNAP_CEILING: f64 = 3.0;
pub const DEFAULT_SNAP_DURATION_MS: u64 = 250;
/// Movement (px, per axis) a single finger needs before the controller claims it.
pub const DEFAULT_CAPTURE_THRESHOLD_PX: f64 = 2.0;
/// Floor for the initial two-finger distance.
pub const DEFAULT_MIN_TOUCH_DISTANCE_PX: f64 = 1.0;

/// Easing curve for the snap-back interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SnapEasing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl SnapEasing {
    /// Maps linear progress in `[0, 1]` onto the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            SnapEasing::Linear => t,
            SnapEasing::EaseIn => t * t * t,
            SnapEasing::EaseOut => 1.0 - (1.0 - t).powi(3),
            SnapEasing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomConfig {
    /// Enables pinch capture entirely.
    pub scalable: bool,
    /// Enables one-finger translation.
    pub pan_enabled: bool,
    /// Exclusive lower bound for a live pinch scale.
    pub min_scale: f64,
    /// Exclusive upper bound for a live pinch scale.
    pub max_scale: f64,
    pub content_width: f64,
    pub content_height: f64,
    pub snap_floor: f64,
    pub snap_ceiling: f64,
    pub snap_duration_ms: u64,
    pub snap_easing: SnapEasing,
    pub capture_threshold_px: f64,
    pub min_touch_distance_px: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            scalable: true,
            pan_enabled: false,
            min_scale: 0.5,
            max_scale: 10.0,
            content_width: 360.0,
            content_height: 360.0,
            snap_floor: DEFAULT_SNAP_FLOOR,
            snap_ceiling: DEFAULT_SNAP_CEILING,
            snap_duration_ms: DEFAULT_SNAP_DURATION_MS,
            snap_easing: SnapEasing::default(),
            capture_threshold_px: DEFAULT_CAPTURE_THRESHOLD_PX,
            min_touch_distance_px: DEFAULT_MIN_TOUCH_DISTANCE_PX,
        }
    }
}

impl ZoomConfig {
    pub fn with_content_size(mut self, width: f64, height: f64) -> Self {
        self.content_width = width;
        self.content_height = height;
        self
    }

    pub fn with_pan_enabled(mut self, pan_enabled: bool) -> Self {
        self.pan_enabled = pan_enabled;
        self
    }

    pub fn with_scale_range(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }

    /// Whether a live pinch scale may be applied (strict on both ends).
    pub fn accepts_scale(&self, scale: f64) -> bool {
        scale > self.min_scale && scale < self.max_scale
    }

    pub(crate) fn safe_min_touch_distance(&self) -> f64 {
        if self.min_touch_distance_px.is_finite() {
            self.min_touch_distance_px.max(f64::EPSILON)
        } else {
            DEFAULT_MIN_TOUCH_DISTANCE_PX
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_bounds_are_strict() {
        let config = ZoomConfig::default();
        assert!(!config.accepts_scale(0.5));
        assert!(!config.accepts_scale(10.0));
        assert!(config.accepts_scale(0.51));
        assert!(config.accepts_scale(9.99));
    }

    #[test]
    fn snap_thresholds_stay_separate_from_pinch_bounds() {
        let config = ZoomConfig::default();
        assert_eq!(config.snap_floor, 1.0);
        assert_eq!(config.snap_ceiling, 3.0);
        assert!(config.max_scale > config.snap_ceiling);
        assert!(config.min_scale < config.snap_floor);
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: ZoomConfig =
            serde_json::from_str(r#"{"panEnabled":true,"snapEasing":"linear"}"#)
                .expect("config must parse");
        assert!(config.pan_enabled);
        assert!(config.scalable);
        assert_eq!(config.snap_easing, SnapEasing::Linear);
        assert_eq!(config.snap_duration_ms, 250);
    }

    #[test]
    fn easing_curves_hit_endpoints() {
        for easing in [
            SnapEasing::Linear,
            SnapEasing::EaseIn,
            SnapEasing::EaseOut,
            SnapEasing::EaseInOut,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12);
            assert!((easing.apply(2.0) - 1.0).abs() < 1e-12);
        }
        assert!((SnapEasing::EaseInOut.apply(0.5) - 0.5).abs() < 1e-12);
        assert!(SnapEasing::EaseIn.apply(0.25) < 0.25);
        assert!(SnapEasing::EaseOut.apply(0.25) > 0.25);
    }
}
