use crate::error::GestureError;
use crate::models::touch::TouchPoint;

pub fn distance(a: TouchPoint, b: TouchPoint) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Per-touch movement between two samples of the same contact.
pub fn delta(from: TouchPoint, to: TouchPoint) -> (f64, f64) {
    (to.x - from.x, to.y - from.y)
}

/// Distance between the first two touches.
///
/// Returns `DegenerateGeometry` when the touches are closer than
/// `min_distance`, since the result ends up as a divisor.
pub fn pinch_distance(touches: &[TouchPoint], min_distance: f64) -> Result<f64, GestureError> {
    let (a, b) = match touches {
        [a, b, ..] => (*a, *b),
        _ => {
            return Err(GestureError::OutOfRangeInput {
                declared: 2,
                provided: touches.len(),
            })
        }
    };
    let value = distance(a, b);
    if value < min_distance {
        return Err(GestureError::DegenerateGeometry { distance: value });
    }
    Ok(value)
}

/// Like [`pinch_distance`], but floors coinciding touches to `min_distance`.
pub fn floored_pinch_distance(
    touches: &[TouchPoint],
    min_distance: f64,
) -> Result<f64, GestureError> {
    match pinch_distance(touches, min_distance) {
        Err(GestureError::DegenerateGeometry { distance }) => {
            log::debug!("pinch distance {distance:.3}px floored to {min_distance}px");
            Ok(min_distance)
        }
        other => other,
    }
}
