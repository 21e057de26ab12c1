use std::collections::HashSet;

use super::types::{InputEvent, Key, PointerId};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Up,
}

/// A pointer going down or up during one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerTransition {
    pub pointer: PointerId,
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
}

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys, held pointers).
/// `InputFrame` provides events and transitions for the current frame, in
/// arrival order.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    /// Keys pressed this frame (repeats excluded).
    pub keys_pressed: HashSet<Key>,

    /// Keys released this frame.
    pub keys_released: HashSet<Key>,

    /// Pointer downs and ups in arrival order. Ups include pointers released
    /// because the mouse left the window or focus was lost.
    pub pointer_transitions: Vec<PointerTransition>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.pointer_transitions.clear();
    }

    pub fn pointer_downs(&self) -> impl Iterator<Item = &PointerTransition> {
        self.pointer_transitions.iter().filter(|t| t.phase == PointerPhase::Down)
    }

    pub fn pointer_ups(&self) -> impl Iterator<Item = &PointerTransition> {
        self.pointer_transitions.iter().filter(|t| t.phase == PointerPhase::Up)
    }

    pub(crate) fn push_pointer(&mut self, pointer: PointerId, phase: PointerPhase, x: f32, y: f32) {
        self.pointer_transitions.push(PointerTransition { pointer, phase, x, y });
    }
}
