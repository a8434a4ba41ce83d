//! Two-finger scale tracking relative to the distance at gesture start.

use crate::algorithm::geometry::floored_pinch_distance;
use crate::error::GestureError;
use crate::models::config::ZoomConfig;
use crate::models::touch::TouchPoint;
use crate::models::transform::CommittedState;

/// Lives exactly as long as two fingers are down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    /// Distance between the touches when the session began, floored.
    pub initial_distance: f64,
    /// Committed scale when the session began.
    pub baseline_scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PinchOutcome {
    /// Candidate was inside the live bounds and should be applied.
    Applied(f64),
    /// Candidate hit or crossed a bound; the frame keeps its previous scale.
    Rejected(f64),
}

#[derive(Debug, Default, Clone)]
pub struct PinchTracker {
    session: Option<GestureSession>,
}

impl PinchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn begin(
        &mut self,
        touches: &[TouchPoint],
        committed: &CommittedState,
        config: &ZoomConfig,
    ) -> Result<GestureSession, GestureError> {
        let initial_distance = floored_pinch_distance(touches, config.safe_min_touch_distance())?;
        let session = GestureSession {
            initial_distance,
            baseline_scale: committed.last_scale,
        };
        log::debug!(
            "pinch session: initial_distance={:.2} baseline_scale={:.3}",
            session.initial_distance,
            session.baseline_scale
        );
        self.session = Some(session);
        Ok(session)
    }

    /// Computes the candidate scale for the current two-finger sample.
    ///
    /// A second finger landing after the grant starts the session here.
    pub fn update(
        &mut self,
        touches: &[TouchPoint],
        committed: &CommittedState,
        config: &ZoomConfig,
    ) -> Result<PinchOutcome, GestureError> {
        let session = match self.session {
            Some(session) => session,
            None => self.begin(touches, committed, config)?,
        };
        let current = floored_pinch_distance(touches, config.safe_min_touch_distance())?;
        let candidate = current / session.initial_distance * session.baseline_scale;
        if config.accepts_scale(candidate) {
            Ok(PinchOutcome::Applied(candidate))
        } else {
            log::debug!(
                "pinch scale {candidate:.3} rejected, outside ({}, {})",
                config.min_scale,
                config.max_scale
            );
            Ok(PinchOutcome::Rejected(candidate))
        }
    }

    pub fn end(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(distance: f64) -> [TouchPoint; 2] {
        [
            TouchPoint::new(0, 100.0, 200.0),
            TouchPoint::new(1, 100.0 + distance, 200.0),
        ]
    }

    fn committed(scale: f64) -> CommittedState {
        CommittedState {
            last_scale: scale,
            ..CommittedState::default()
        }
    }

    #[test]
    fn scale_follows_distance_ratio_times_baseline() {
        let config = ZoomConfig::default();
        let mut tracker = PinchTracker::new();
        tracker
            .begin(&pair(100.0), &committed(2.0), &config)
            .expect("session must begin");

        let outcome = tracker
            .update(&pair(150.0), &committed(2.0), &config)
            .expect("update must succeed");
        assert_eq!(outcome, PinchOutcome::Applied(3.0));
    }

    #[test]
    fn values_at_the_limits_are_rejected() {
        let config = ZoomConfig::default().with_scale_range(0.5, 4.0);
        let mut tracker = PinchTracker::new();
        tracker
            .begin(&pair(100.0), &committed(1.0), &config)
            .expect("session must begin");

        for (distance, expected) in [(400.0, 4.0), (50.0, 0.5), (500.0, 5.0), (10.0, 0.1)] {
            let outcome = tracker
                .update(&pair(distance), &committed(1.0), &config)
                .expect("update must succeed");
            assert_eq!(outcome, PinchOutcome::Rejected(expected));
        }
    }

    #[test]
    fn baseline_is_captured_at_begin() {
        let config = ZoomConfig::default();
        let mut tracker = PinchTracker::new();
        tracker
            .begin(&pair(100.0), &committed(1.5), &config)
            .expect("session must begin");
        let outcome = tracker
            .update(&pair(200.0), &committed(9.0), &config)
            .expect("update must succeed");
        assert_eq!(outcome, PinchOutcome::Applied(3.0));
    }

    #[test]
    fn coinciding_start_is_floored_instead_of_failing() {
        let config = ZoomConfig::default();
        let mut tracker = PinchTracker::new();
        let session = tracker
            .begin(&pair(0.0), &committed(1.0), &config)
            .expect("degenerate start must be recovered");
        assert_eq!(session.initial_distance, 1.0);

        let outcome = tracker
            .update(&pair(2.0), &committed(1.0), &config)
            .expect("update must succeed");
        assert_eq!(outcome, PinchOutcome::Applied(2.0));
    }

    #[test]
    fn late_second_finger_starts_session_on_update() {
        let config = ZoomConfig::default();
        let mut tracker = PinchTracker::new();
        assert!(!tracker.is_active());

        let outcome = tracker
            .update(&pair(80.0), &committed(1.2), &config)
            .expect("update must succeed");
        assert_eq!(outcome, PinchOutcome::Applied(1.2));
        assert_eq!(
            tracker.session.map(|session| session.initial_distance),
            Some(80.0)
        );

        tracker.end();
        assert!(tracker.session.is_none());
    }
}
