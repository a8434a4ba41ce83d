//! Touch input as delivered by the host event dispatch.

use serde::{Deserialize, Serialize};

use crate::error::GestureError;

/// A single active contact in screen-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchPoint {
    #[serde(default)]
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// One host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureInput {
    /// Host timestamp in milliseconds.
    #[serde(default)]
    pub ts: u64,
    #[serde(default)]
    pub touches: Vec<TouchPoint>,
    pub active_touches: usize,
    /// Cumulative horizontal movement since the gesture grant.
    #[serde(default)]
    pub dx: f64,
    /// Cumulative vertical movement since the gesture grant.
    #[serde(default)]
    pub dy: f64,
}

impl GestureInput {
    pub fn new(ts: u64, touches: Vec<TouchPoint>, dx: f64, dy: f64) -> Self {
        let active_touches = touches.len();
        Self {
            ts,
            touches,
            active_touches,
            dx,
            dy,
        }
    }

    pub fn is_pinch(&self) -> bool {
        self.active_touches == 2
    }

    pub fn is_single(&self) -> bool {
        self.active_touches == 1
    }

    /// Rejects events whose touch array cannot back the declared count.
    ///
    /// Only the first two entries are ever read, so a declared count above
    /// two is satisfied by two entries.
    pub fn validate(&self) -> Result<(), GestureError> {
        let required = self.active_touches.min(2);
        if self.touches.len() < required {
            return Err(GestureError::OutOfRangeInput {
                declared: self.active_touches,
                provided: self.touches.len(),
            });
        }
        let coordinates_finite = self
            .touches
            .iter()
            .take(required)
            .all(|touch| touch.x.is_finite() && touch.y.is_finite());
        if !coordinates_finite || !self.dx.is_finite() || !self.dy.is_finite() {
            return Err(GestureError::NonFiniteInput);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_second_touch_is_out_of_range() {
        let input = GestureInput {
            ts: 0,
            touches: vec![TouchPoint::new(0, 10.0, 10.0)],
            active_touches: 2,
            dx: 0.0,
            dy: 0.0,
        };
        assert_eq!(
            input.validate(),
            Err(GestureError::OutOfRangeInput {
                declared: 2,
                provided: 1
            })
        );
    }

    #[test]
    fn nan_delta_is_rejected() {
        let input = GestureInput::new(0, vec![TouchPoint::new(0, 1.0, 1.0)], f64::NAN, 0.0);
        assert_eq!(input.validate(), Err(GestureError::NonFiniteInput));
    }

    #[test]
    fn three_declared_touches_need_only_two_entries() {
        let input = GestureInput {
            ts: 0,
            touches: vec![TouchPoint::new(0, 0.0, 0.0), TouchPoint::new(1, 5.0, 5.0)],
            active_touches: 3,
            dx: 0.0,
            dy: 0.0,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn parses_camel_case_event() {
        let raw = r#"{"ts":12,"touches":[{"x":1,"y":2}],"activeTouches":1,"dx":3.5}"#;
        let input: GestureInput = serde_json::from_str(raw).expect("event must parse");
        assert_eq!(input.active_touches, 1);
        assert_eq!(input.touches[0].id, 0);
        assert_eq!(input.dx, 3.5);
        assert_eq!(input.dy, 0.0);
    }
}
