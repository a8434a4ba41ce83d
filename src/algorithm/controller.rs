//! Pinch/pan controller: routes host events through capture, tracking and
//! snap-back, and owns the transform the renderer reads.

use crate::algorithm::arbiter::GestureArbiter;
use crate::algorithm::pan::{ContentBounds, PanBounds, PanTracker};
use crate::algorithm::pinch::{PinchOutcome, PinchTracker};
use crate::algorithm::snap::{BoundarySnapAnimator, ReleaseDecision, SnapKind, SnapStatus};
use crate::models::config::ZoomConfig;
use crate::models::touch::GestureInput;
use crate::models::transform::{CommittedState, Transform, TransformListener, TransformState};

/// Receives `false` at every gesture start and `true` once content has
/// settled back at the resting floor.
pub type ZoomObserver = Box<dyn FnMut(bool)>;

pub struct PinchZoomController {
    config: ZoomConfig,
    bounds: Box<dyn PanBounds>,
    transform: TransformState,
    committed: CommittedState,
    pinch: PinchTracker,
    pan: PanTracker,
    snap: BoundarySnapAnimator,
    pinched_this_gesture: bool,
    zoom_observer: Option<ZoomObserver>,
}

impl PinchZoomController {
    /// Controller with pan bounds derived from the configured content size.
    pub fn new(config: ZoomConfig) -> Self {
        let bounds = ContentBounds::from_config(&config);
        Self::with_bounds(config, Box::new(bounds))
    }

    pub fn with_bounds(config: ZoomConfig, bounds: Box<dyn PanBounds>) -> Self {
        let mut pan = PanTracker::new();
        pan.suppress_next_sample();
        Self {
            config,
            bounds,
            transform: TransformState::default(),
            committed: CommittedState::default(),
            pinch: PinchTracker::new(),
            pan,
            snap: BoundarySnapAnimator::new(),
            pinched_this_gesture: false,
            zoom_observer: None,
        }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn transform(&self) -> Transform {
        self.transform.get()
    }

    pub fn committed(&self) -> CommittedState {
        self.committed
    }

    pub fn is_animating(&self) -> bool {
        self.snap.is_animating()
    }

    pub fn subscribe(&mut self, listener: TransformListener) {
        self.transform.subscribe(listener);
    }

    pub fn set_zoom_observer(&mut self, observer: ZoomObserver) {
        self.zoom_observer = Some(observer);
    }

    /// First contact of a gesture. Never captures.
    pub fn touch_start(&mut self, input: &GestureInput) -> bool {
        self.notify_zoom(false);
        GestureArbiter::new(&self.config).should_capture_on_start(input)
    }

    pub fn should_capture_move(&self, input: &GestureInput) -> bool {
        GestureArbiter::new(&self.config).should_capture_on_move(input)
    }

    /// The host handed the gesture to this controller.
    pub fn grant(&mut self, input: &GestureInput) {
        self.interrupt_snap(input.ts);
        self.pinched_this_gesture = false;
        self.pinch.end();

        if let Err(err) = input.validate() {
            log::debug!("grant ignored: {err}");
            return;
        }
        if input.is_pinch() {
            if let Err(err) = self.pinch.begin(&input.touches, &self.committed, &self.config) {
                log::warn!("pinch session not started: {err}");
            }
        }
    }

    pub fn touch_move(&mut self, input: &GestureInput) {
        self.interrupt_snap(input.ts);
        if let Err(err) = input.validate() {
            log::debug!("move ignored: {err}");
            return;
        }

        if input.is_pinch() {
            self.pinched_this_gesture = true;
            match self.pinch.update(&input.touches, &self.committed, &self.config) {
                Ok(PinchOutcome::Applied(scale)) => {
                    self.transform.set_scale(scale);
                    self.pan.suppress_next_sample();
                }
                Ok(PinchOutcome::Rejected(_)) => {}
                Err(err) => log::debug!("pinch sample ignored: {err}"),
            }
            return;
        }

        if input.active_touches > 2 {
            return;
        }
        if self.pinch.is_active() {
            self.pinch.end();
        }
        if !input.is_single() || self.pinched_this_gesture || !self.config.pan_enabled {
            return;
        }

        let current = self.transform.get();
        let (translate_x, translate_y) = self.pan.update(
            input.dx,
            input.dy,
            current.scale,
            &self.committed,
            self.bounds.as_ref(),
        );
        self.transform.set(Transform {
            translate_x,
            translate_y,
            ..current
        });
    }

    /// Gesture ended. Returns `None` when a snap animation is already in flight.
    pub fn release(&mut self, now_ms: u64) -> Option<ReleaseDecision> {
        self.pinch.end();
        self.pinched_this_gesture = false;
        self.pan.suppress_next_sample();

        if self.snap.is_animating() {
            log::debug!("release ignored: snap already in flight");
            return None;
        }

        let current = self.transform.get();
        let decision = self.snap.release(current, now_ms, &self.config);
        if decision == ReleaseDecision::Commit {
            self.commit(current);
        }
        Some(decision)
    }

    /// Another responder took the gesture over.
    pub fn terminate(&mut self, now_ms: u64) -> Option<ReleaseDecision> {
        self.release(now_ms)
    }

    /// Advances a running snap animation; call once per rendered frame.
    pub fn tick(&mut self, now_ms: u64) -> SnapStatus {
        let status = self.snap.tick(now_ms);
        match status {
            SnapStatus::Idle => {}
            SnapStatus::Animating(value) => self.transform.set(value),
            SnapStatus::Completed { kind, value } => {
                self.transform.set(value);
                self.commit(value);
                if kind == SnapKind::ToMin {
                    self.notify_zoom(true);
                }
            }
        }
        status
    }

    /// Back to identity, dropping any session or animation.
    pub fn reset(&mut self) {
        self.snap.stop();
        self.pinch.end();
        self.pinched_this_gesture = false;
        self.pan.suppress_next_sample();
        self.transform.set(Transform::IDENTITY);
        self.committed = CommittedState::default();
    }

    /// Freezes a running snap at its value for `now_ms` and makes that the baseline.
    fn interrupt_snap(&mut self, now_ms: u64) {
        if let Some((kind, frozen)) = self.snap.cancel(now_ms) {
            log::info!("snap {kind:?} interrupted at scale {:.3}", frozen.scale);
            self.transform.set(frozen);
            self.commit(frozen);
        }
    }

    fn commit(&mut self, value: Transform) {
        let next = CommittedState::from_transform(value);
        if next != self.committed {
            log::info!(
                "commit: scale={:.3} offset=({:.2}, {:.2})",
                next.last_scale,
                next.last_offset_x,
                next.last_offset_y
            );
        }
        self.committed = next;
    }

    fn notify_zoom(&mut self, settled: bool) {
        if let Some(observer) = self.zoom_observer.as_mut() {
            observer(settled);
        }
    }
}

impl std::fmt::Debug for PinchZoomController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinchZoomController")
            .field("config", &self.config)
            .field("transform", &self.transform)
            .field("committed", &self.committed)
            .field("pinch", &self.pinch)
            .field("snap", &self.snap)
            .finish()
    }
}
