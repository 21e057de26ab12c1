use std::fmt;

/// Keyboard key identifier.
///
/// Only keys the application binds are named; everything else maps to
/// `Key::Unknown` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    A,
    D,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Identifies one pointer: the mouse, or a single finger on a touch screen.
///
/// Touch ids are stable for the lifetime of one touch, so two fingers can
/// hold two different controls at once.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

/// Platform-agnostic input events emitted by the runtime.
///
/// Positions are logical pixels. Only the primary mouse button produces
/// `PointerDown` / `PointerUp`.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerMoved { pointer: PointerId, x: f32, y: f32 },
    PointerDown { pointer: PointerId, x: f32, y: f32 },
    PointerUp { pointer: PointerId, x: f32, y: f32 },

    /// Mouse left the window surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
