//! Gesture-end state machine: snap the content back into its resting range.

use crate::models::config::{SnapEasing, ZoomConfig};
use crate::models::transform::Transform;

/// Eased interpolation of one value over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: SnapEasing,
}

impl Tween {
    pub fn new(from: f64, to: f64, start_ms: u64, duration_ms: u64, easing: SnapEasing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`; timestamps before the start count as zero.
    pub fn progress(&self, now_ms: u64) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms);
        (elapsed as f64 / self.duration_ms as f64).clamp(0.0, 1.0)
    }

    pub fn value_at(&self, now_ms: u64) -> f64 {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        lerp(self.from, self.to, self.easing.apply(t))
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.progress(now_ms) >= 1.0
    }
}

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start + (end - start) * t
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapKind {
    /// Zoomed out past the resting floor; recenters as well.
    ToMin,
    /// Zoomed in past the resting ceiling; offsets are kept.
    ToMax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    SnapToMin,
    SnapToMax,
    Commit,
}

impl ReleaseDecision {
    pub fn evaluate(scale: f64, config: &ZoomConfig) -> Self {
        if scale < config.snap_floor {
            ReleaseDecision::SnapToMin
        } else if scale > config.snap_ceiling {
            ReleaseDecision::SnapToMax
        } else {
            ReleaseDecision::Commit
        }
    }
}

/// Scale and both offsets interpolated in parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    pub kind: SnapKind,
    pub scale: Tween,
    pub translate_x: Tween,
    pub translate_y: Tween,
}

impl SnapAnimation {
    pub fn new(kind: SnapKind, current: Transform, now_ms: u64, config: &ZoomConfig) -> Self {
        let target = match kind {
            SnapKind::ToMin => Transform::new(config.snap_floor, 0.0, 0.0),
            SnapKind::ToMax => Transform {
                scale: config.snap_ceiling,
                ..current
            },
        };
        let tween = |from: f64, to: f64| {
            Tween::new(from, to, now_ms, config.snap_duration_ms, config.snap_easing)
        };
        Self {
            kind,
            scale: tween(current.scale, target.scale),
            translate_x: tween(current.translate_x, target.translate_x),
            translate_y: tween(current.translate_y, target.translate_y),
        }
    }

    pub fn sample(&self, now_ms: u64) -> Transform {
        Transform::new(
            self.scale.value_at(now_ms),
            self.translate_x.value_at(now_ms),
            self.translate_y.value_at(now_ms),
        )
    }

    pub fn target(&self) -> Transform {
        Transform::new(self.scale.to, self.translate_x.to, self.translate_y.to)
    }

    pub fn is_finished(&self, now_ms: u64) -> bool {
        self.scale.is_finished(now_ms)
            && self.translate_x.is_finished(now_ms)
            && self.translate_y.is_finished(now_ms)
    }
}

/// Result of advancing the animator by one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapStatus {
    /// Nothing in flight.
    Idle,
    /// Still running; the sampled value for this frame.
    Animating(Transform),
    /// Finished on this frame; the final value to commit.
    Completed { kind: SnapKind, value: Transform },
}

#[derive(Debug, Default, Clone)]
pub struct BoundarySnapAnimator {
    active: Option<SnapAnimation>,
}

impl BoundarySnapAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    /// Decides what a release at `current` does, starting an animation if needed.
    pub fn release(
        &mut self,
        current: Transform,
        now_ms: u64,
        config: &ZoomConfig,
    ) -> ReleaseDecision {
        let decision = ReleaseDecision::evaluate(current.scale, config);
        let kind = match decision {
            ReleaseDecision::SnapToMin => SnapKind::ToMin,
            ReleaseDecision::SnapToMax => SnapKind::ToMax,
            ReleaseDecision::Commit => return decision,
        };
        let animation = SnapAnimation::new(kind, current, now_ms, config);
        log::info!(
            "snap {:?}: scale {:.3} -> {:.3} over {}ms",
            kind,
            animation.scale.from,
            animation.scale.to,
            config.snap_duration_ms
        );
        self.active = Some(animation);
        decision
    }

    pub fn tick(&mut self, now_ms: u64) -> SnapStatus {
        let Some(animation) = self.active else {
            return SnapStatus::Idle;
        };
        if animation.is_finished(now_ms) {
            self.active = None;
            return SnapStatus::Completed {
                kind: animation.kind,
                value: animation.target(),
            };
        }
        let value = animation.sample(now_ms);
        log::trace!("snap tick ts={now_ms} scale={:.4}", value.scale);
        SnapStatus::Animating(value)
    }

    /// Drops the animation without sampling it.
    pub fn stop(&mut self) {
        self.active = None;
    }

    /// Drops the animation without its completion effects, returning the
    /// value it had reached at `now_ms`.
    pub fn cancel(&mut self, now_ms: u64) -> Option<(SnapKind, Transform)> {
        self.active
            .take()
            .map(|animation| (animation.kind, animation.sample(now_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_config() -> ZoomConfig {
        ZoomConfig {
            snap_easing: SnapEasing::Linear,
            ..ZoomConfig::default()
        }
    }

    #[test]
    fn release_decision_uses_resting_thresholds() {
        let config = ZoomConfig::default();
        assert_eq!(ReleaseDecision::evaluate(0.7, &config), ReleaseDecision::SnapToMin);
        assert_eq!(ReleaseDecision::evaluate(4.2, &config), ReleaseDecision::SnapToMax);
        assert_eq!(ReleaseDecision::evaluate(1.8, &config), ReleaseDecision::Commit);
        assert_eq!(ReleaseDecision::evaluate(1.0, &config), ReleaseDecision::Commit);
        assert_eq!(ReleaseDecision::evaluate(3.0, &config), ReleaseDecision::Commit);
    }

    #[test]
    fn tween_interpolates_and_clamps() {
        let tween = Tween::new(0.0, 10.0, 100, 200, SnapEasing::Linear);
        assert_eq!(tween.value_at(50), 0.0);
        assert_eq!(tween.value_at(100), 0.0);
        assert_eq!(tween.value_at(200), 5.0);
        assert_eq!(tween.value_at(300), 10.0);
        assert_eq!(tween.value_at(10_000), 10.0);
        assert!(tween.is_finished(300));
        assert!(!tween.is_finished(299));
    }

    #[test]
    fn zero_duration_finishes_immediately() {
        let tween = Tween::new(2.0, 1.0, 100, 0, SnapEasing::EaseInOut);
        assert!(tween.is_finished(100));
        assert_eq!(tween.value_at(100), 1.0);
    }

    #[test]
    fn snap_to_min_recenters_and_completes() {
        let config = linear_config();
        let mut animator = BoundarySnapAnimator::new();
        let decision = animator.release(Transform::new(0.7, 30.0, -20.0), 1_000, &config);
        assert_eq!(decision, ReleaseDecision::SnapToMin);
        assert!(animator.is_animating());

        match animator.tick(1_125) {
            SnapStatus::Animating(value) => {
                assert!((value.scale - 0.85).abs() < 1e-9);
                assert!((value.translate_x - 15.0).abs() < 1e-9);
                assert!((value.translate_y + 10.0).abs() < 1e-9);
            }
            other => panic!("expected animating, got {other:?}"),
        }

        assert_eq!(
            animator.tick(1_250),
            SnapStatus::Completed {
                kind: SnapKind::ToMin,
                value: Transform::new(1.0, 0.0, 0.0),
            }
        );
        assert_eq!(animator.tick(1_300), SnapStatus::Idle);
    }

    #[test]
    fn snap_to_max_keeps_offsets() {
        let config = ZoomConfig::default();
        let mut animator = BoundarySnapAnimator::new();
        animator.release(Transform::new(4.2, 12.0, 8.0), 0, &config);

        let SnapStatus::Animating(mid) = animator.tick(100) else {
            panic!("animation must still run at 100ms");
        };
        assert!(mid.scale < 4.2 && mid.scale > 3.0);
        assert_eq!((mid.translate_x, mid.translate_y), (12.0, 8.0));

        assert_eq!(
            animator.tick(250),
            SnapStatus::Completed {
                kind: SnapKind::ToMax,
                value: Transform::new(3.0, 12.0, 8.0),
            }
        );
    }

    #[test]
    fn commit_release_starts_nothing() {
        let config = ZoomConfig::default();
        let mut animator = BoundarySnapAnimator::new();
        assert_eq!(
            animator.release(Transform::new(1.8, 0.0, 0.0), 0, &config),
            ReleaseDecision::Commit
        );
        assert!(!animator.is_animating());
        assert_eq!(animator.tick(16), SnapStatus::Idle);
    }

    fn animation_sample(now_ms: u64) -> Transform {
        SnapAnimation::new(
            SnapKind::ToMin,
            Transform::new(0.6, 0.0, 0.0),
            0,
            &ZoomConfig::default(),
        )
        .sample(now_ms)
    }

    #[test]
    fn cancel_drops_completion() {
        let config = ZoomConfig::default();
        let mut animator = BoundarySnapAnimator::new();
        animator.release(Transform::new(0.6, 0.0, 0.0), 0, &config);
        assert_eq!(animator.cancel(120), Some((SnapKind::ToMin, animation_sample(120))));
        assert_eq!(animator.tick(1_000), SnapStatus::Idle);
        assert_eq!(animator.cancel(1_000), None);
    }
}
