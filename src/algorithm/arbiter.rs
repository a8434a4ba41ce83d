//! Capture decisions: whether this controller claims a gesture from its children.

use crate::models::config::ZoomConfig;
use crate::models::touch::GestureInput;

#[derive(Debug, Clone, Copy)]
pub struct GestureArbiter<'a> {
    config: &'a ZoomConfig,
}

impl<'a> GestureArbiter<'a> {
    pub fn new(config: &'a ZoomConfig) -> Self {
        Self { config }
    }

    /// A fresh touch never claims the gesture, so taps reach nested content.
    pub fn should_capture_on_start(&self, _input: &GestureInput) -> bool {
        false
    }

    pub fn should_capture_on_move(&self, input: &GestureInput) -> bool {
        let threshold = self.config.capture_threshold_px;
        self.config.scalable
            && (input.dx.abs() > threshold || input.dy.abs() > threshold || input.is_pinch())
    }
}
