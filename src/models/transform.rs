//! Live and committed transform values.

use serde::{Deserialize, Serialize};

/// Content transform read by the renderer every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

/// Baseline the next gesture computes its deltas from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedState {
    pub last_scale: f64,
    pub last_offset_x: f64,
    pub last_offset_y: f64,
}

impl CommittedState {
    pub fn from_transform(transform: Transform) -> Self {
        Self {
            last_scale: transform.scale,
            last_offset_x: transform.translate_x,
            last_offset_y: transform.translate_y,
        }
    }

    pub fn as_transform(self) -> Transform {
        Transform::new(self.last_scale, self.last_offset_x, self.last_offset_y)
    }
}

impl Default for CommittedState {
    fn default() -> Self {
        CommittedState::from_transform(Transform::IDENTITY)
    }
}

pub type TransformListener = Box<dyn FnMut(Transform)>;

/// Observable holder of the live transform.
///
/// Listeners run synchronously after every write that changes the value.
pub struct TransformState {
    current: Transform,
    listeners: Vec<TransformListener>,
}

impl TransformState {
    pub fn new(initial: Transform) -> Self {
        Self {
            current: initial,
            listeners: Vec::new(),
        }
    }

    pub fn get(&self) -> Transform {
        self.current
    }

    pub fn subscribe(&mut self, listener: TransformListener) {
        self.listeners.push(listener);
    }

    pub fn set(&mut self, next: Transform) {
        if next == self.current {
            return;
        }
        self.current = next;
        for listener in &mut self.listeners {
            listener(next);
        }
    }

    pub fn set_scale(&mut self, scale: f64) {
        let next = Transform { scale, ..self.current };
        self.set(next);
    }
}

impl Default for TransformState {
    fn default() -> Self {
        TransformState::new(Transform::IDENTITY)
    }
}

impl std::fmt::Debug for TransformState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformState")
            .field("current", &self.current)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
