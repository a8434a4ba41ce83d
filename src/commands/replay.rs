//! replay: drives a controller from a recorded gesture trace (trace.json).
//! schemaVersion: 1

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::algorithm::controller::PinchZoomController;
use crate::error::ReplayError;
use crate::models::config::ZoomConfig;
use crate::models::touch::GestureInput;

pub const SCHEMA_VERSION: u32 = 1;

fn default_frame_interval_ms() -> u64 {
    16
}

/// One recorded host event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TraceStep {
    /// First contact of a gesture.
    Start(GestureInput),
    /// Pointer movement; captured once the arbiter claims it.
    Move(GestureInput),
    /// All fingers lifted.
    Release { ts: u64 },
    /// Another responder took the gesture.
    Terminate { ts: u64 },
    /// Explicit frame tick.
    Tick { ts: u64 },
    /// Content reloaded.
    Reset { ts: u64 },
}

impl TraceStep {
    pub fn ts(&self) -> u64 {
        match self {
            TraceStep::Start(input) | TraceStep::Move(input) => input.ts,
            TraceStep::Release { ts }
            | TraceStep::Terminate { ts }
            | TraceStep::Tick { ts }
            | TraceStep::Reset { ts } => *ts,
        }
    }
}

/// Root object of trace.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureTrace {
    pub schema_version: u32,
    /// Spacing of the synthetic frames inserted while a snap animation runs.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
    #[serde(default)]
    pub config: ZoomConfig,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SampleSource {
    Step,
    /// Frame inserted by the replayer between steps or after the last one.
    Frame,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformSample {
    pub ts: u64,
    pub source: SampleSource,
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub animating: bool,
    pub captured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub samples: Vec<TransformSample>,
    /// Every zoom-change notification, in order.
    pub zoom_changes: Vec<bool>,
}

impl ReplayReport {
    pub fn last(&self) -> Option<&TransformSample> {
        self.samples.last()
    }
}

/// Reads and validates a trace file.
pub fn load_trace(path: &Path) -> Result<GestureTrace, ReplayError> {
    log::info!("load_trace: path={}", path.display());
    let raw = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_trace(&raw)
}

pub fn parse_trace(raw: &str) -> Result<GestureTrace, ReplayError> {
    let trace: GestureTrace = serde_json::from_str(raw)?;
    if trace.schema_version != SCHEMA_VERSION {
        return Err(ReplayError::UnsupportedSchema {
            expected: SCHEMA_VERSION,
            found: trace.schema_version,
        });
    }
    Ok(trace)
}

struct Replayer {
    controller: PinchZoomController,
    captured: bool,
    clock_ms: u64,
    frame_interval_ms: u64,
    samples: Vec<TransformSample>,
}

impl Replayer {
    fn sample(&mut self, ts: u64, source: SampleSource) {
        let transform = self.controller.transform();
        self.samples.push(TransformSample {
            ts,
            source,
            scale: transform.scale,
            translate_x: transform.translate_x,
            translate_y: transform.translate_y,
            animating: self.controller.is_animating(),
            captured: self.captured,
        });
    }

    /// Emits frames strictly before `until_ms` while a snap is in flight.
    fn advance_frames(&mut self, until_ms: Option<u64>) {
        while self.controller.is_animating() {
            let next = self.clock_ms.saturating_add(self.frame_interval_ms);
            if until_ms.is_some_and(|until| next >= until) {
                break;
            }
            self.clock_ms = next;
            self.controller.tick(next);
            self.sample(next, SampleSource::Frame);
        }
    }

    fn apply(&mut self, step: &TraceStep) {
        let ts = step.ts();
        self.advance_frames(Some(ts));
        self.clock_ms = self.clock_ms.max(ts);

        match step {
            TraceStep::Start(input) => {
                self.captured = self.controller.touch_start(input);
                if self.captured {
                    self.controller.grant(input);
                }
            }
            TraceStep::Move(input) => {
                if !self.captured && self.controller.should_capture_move(input) {
                    self.captured = true;
                    self.controller.grant(input);
                }
                if self.captured {
                    self.controller.touch_move(input);
                }
            }
            TraceStep::Release { ts } => {
                if std::mem::take(&mut self.captured) {
                    self.controller.release(*ts);
                }
            }
            TraceStep::Terminate { ts } => {
                if std::mem::take(&mut self.captured) {
                    self.controller.terminate(*ts);
                }
            }
            TraceStep::Tick { ts } => {
                self.controller.tick(*ts);
            }
            TraceStep::Reset { .. } => {
                self.captured = false;
                self.controller.reset();
            }
        }
        self.sample(ts, SampleSource::Step);
    }
}

/// Runs every step of `trace` and drains any snap left running at the end.
pub fn replay_trace(trace: &GestureTrace) -> ReplayReport {
    let zoom_changes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&zoom_changes);
    let mut controller = PinchZoomController::new(trace.config.clone());
    controller.set_zoom_observer(Box::new(move |settled| sink.borrow_mut().push(settled)));

    let mut replayer = Replayer {
        controller,
        captured: false,
        clock_ms: trace.steps.first().map(TraceStep::ts).unwrap_or(0),
        frame_interval_ms: trace.frame_interval_ms.max(1),
        samples: Vec::with_capacity(trace.steps.len()),
    };
    for step in &trace.steps {
        replayer.apply(step);
    }
    replayer.advance_frames(None);

    log::info!(
        "replay_trace: steps={} samples={}",
        trace.steps.len(),
        replayer.samples.len()
    );
    let zoom_changes = zoom_changes.borrow().clone();
    ReplayReport {
        samples: replayer.samples,
        zoom_changes,
    }
}
