//! Error taxonomy for the gesture path and the trace replay command.

use thiserror::Error;

/// Recoverable conditions raised while interpreting touch input.
///
/// None of these ever reach the rendering side: the controller either
/// recovers locally (floors the distance) or drops the offending event.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GestureError {
    /// Two touches (nearly) coincide, so their distance cannot be a divisor.
    #[error("touches coincide (distance {distance}px)")]
    DegenerateGeometry { distance: f64 },
    /// The event declares more active touches than it carries.
    #[error("event declares {declared} active touches but carries {provided}")]
    OutOfRangeInput { declared: usize, provided: usize },
    /// A coordinate or delta is NaN or infinite.
    #[error("event carries a non-finite coordinate")]
    NonFiniteInput,
}

/// Failures of the offline trace replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read trace file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse trace: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported trace schemaVersion: expected {expected}, got {found}")]
    UnsupportedSchema { expected: u32, found: u32 },
    #[error("Usage: pinch-zoom-replay <trace.json>")]
    MissingTracePath,
}
