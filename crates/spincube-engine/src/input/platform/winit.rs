use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::Window;

use crate::input::{InputEvent, InputState, Key, KeyState, PointerId};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Touches become pointers with their own id; only the left mouse button
/// produces pointer down/up. Returns `None` for events not represented by
/// the input subsystem.
pub fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(window, *position);
            Some(InputEvent::PointerMoved { pointer: PointerId::Mouse, x, y })
        }

        WindowEvent::MouseInput { state: st, button: MouseButton::Left, .. } => {
            // winit 0.30 does not expose cursor query; use tracked pointer position.
            let (x, y) = state.pointer_pos.unwrap_or((0.0, 0.0));
            let pointer = PointerId::Mouse;

            Some(match st {
                ElementState::Pressed => InputEvent::PointerDown { pointer, x, y },
                ElementState::Released => InputEvent::PointerUp { pointer, x, y },
            })
        }

        WindowEvent::Touch(touch) => Some(translate_touch(window, touch)),

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            Some(InputEvent::Key {
                key: map_key(event.physical_key),
                state: st,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn translate_touch(window: &Window, touch: &Touch) -> InputEvent {
    let (x, y) = to_logical_f32(window, touch.location);
    let pointer = PointerId::Touch(touch.id);

    match touch.phase {
        TouchPhase::Started => InputEvent::PointerDown { pointer, x, y },
        TouchPhase::Moved => InputEvent::PointerMoved { pointer, x, y },
        TouchPhase::Ended | TouchPhase::Cancelled => InputEvent::PointerUp { pointer, x, y },
    }
}

fn to_logical_f32(window: &Window, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let scale = window.scale_factor();
    let logical = pos.to_logical::<f64>(scale);
    (logical.x as f32, logical.y as f32)
}

fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
            KeyCode::Space => Key::Space,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::KeyA => Key::A,
            KeyCode::KeyD => Key::D,

            other => Key::Unknown(other as u32),
        },

        // NativeKeyCode has no stable numeric in winit 0.30.
        PhysicalKey::Unidentified(_) => Key::Unknown(0),
    }
}
