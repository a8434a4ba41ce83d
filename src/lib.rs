pub mod algorithm;
pub mod commands;
pub mod error;
pub mod models;

use std::path::PathBuf;

pub use algorithm::controller::{PinchZoomController, ZoomObserver};
pub use algorithm::pan::{ContentBounds, FixedBounds, PanBounds};
pub use algorithm::snap::{ReleaseDecision, SnapKind, SnapStatus};
pub use error::{GestureError, ReplayError};
pub use models::config::{SnapEasing, ZoomConfig};
pub use models::touch::{GestureInput, TouchPoint};
pub use models::transform::{CommittedState, Transform};

/// Replays the trace named on the command line and prints the report as JSON.
pub fn run() -> Result<(), ReplayError> {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(ReplayError::MissingTracePath)?;
    let trace = commands::replay::load_trace(&path)?;
    let report = commands::replay::replay_trace(&trace);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}
