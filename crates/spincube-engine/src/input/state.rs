use std::collections::{HashMap, HashSet};

use super::frame::{InputFrame, PointerPhase};
use super::types::{InputEvent, Key, KeyState, PointerId};

/// Current input state for a single window.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Mouse position in logical pixels, `None` while outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Pointers currently held down, with their latest position.
    pub pointers_down: HashMap<PointerId, (f32, f32)>,
}

impl InputState {
    /// Applies an input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Nothing stays held across a focus loss.
                    for key in self.keys_down.drain() {
                        frame.keys_released.insert(key);
                    }
                    self.release_all_pointers(frame);
                }
            }

            InputEvent::PointerMoved { pointer, x, y } => {
                if *pointer == PointerId::Mouse {
                    self.pointer_pos = Some((*x, *y));
                }
                if let Some(pos) = self.pointers_down.get_mut(pointer) {
                    *pos = (*x, *y);
                }
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
                if let Some((x, y)) = self.pointers_down.remove(&PointerId::Mouse) {
                    frame.push_pointer(PointerId::Mouse, PointerPhase::Up, x, y);
                }
            }

            InputEvent::PointerDown { pointer, x, y } => {
                if *pointer == PointerId::Mouse {
                    self.pointer_pos = Some((*x, *y));
                }
                if self.pointers_down.insert(*pointer, (*x, *y)).is_none() {
                    frame.push_pointer(*pointer, PointerPhase::Down, *x, *y);
                }
            }

            InputEvent::PointerUp { pointer, x, y } => {
                if self.pointers_down.remove(pointer).is_some() {
                    frame.push_pointer(*pointer, PointerPhase::Up, *x, *y);
                }
            }

            InputEvent::Key { key, state, repeat } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) && !*repeat {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn pointer_down(&self, pointer: PointerId) -> bool {
        self.pointers_down.contains_key(&pointer)
    }

    fn release_all_pointers(&mut self, frame: &mut InputFrame) {
        for (pointer, (x, y)) in self.pointers_down.drain() {
            frame.push_pointer(pointer, PointerPhase::Up, x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(pointer: PointerId, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerDown { pointer, x, y }
    }

    fn up(pointer: PointerId, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerUp { pointer, x, y }
    }

    #[test]
    fn press_and_release_are_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, down(PointerId::Mouse, 5.0, 6.0));
        state.apply_event(&mut frame, down(PointerId::Mouse, 5.0, 6.0));
        assert_eq!(frame.pointer_downs().count(), 1);
        assert!(state.pointer_down(PointerId::Mouse));

        state.apply_event(&mut frame, up(PointerId::Mouse, 7.0, 8.0));
        state.apply_event(&mut frame, up(PointerId::Mouse, 7.0, 8.0));
        assert_eq!(frame.pointer_ups().count(), 1);
        assert_eq!(frame.pointer_transitions[1].x, 7.0);
        assert!(!state.pointer_down(PointerId::Mouse));
    }

    #[test]
    fn transitions_keep_arrival_order() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, down(PointerId::Touch(1), 0.0, 0.0));
        state.apply_event(&mut frame, up(PointerId::Touch(1), 0.0, 0.0));
        state.apply_event(&mut frame, down(PointerId::Touch(1), 3.0, 0.0));

        let phases: Vec<_> = frame.pointer_transitions.iter().map(|t| t.phase).collect();
        assert_eq!(phases, vec![PointerPhase::Down, PointerPhase::Up, PointerPhase::Down]);
        assert!(state.pointer_down(PointerId::Touch(1)));
    }

    #[test]
    fn touches_are_tracked_independently() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, down(PointerId::Touch(1), 10.0, 10.0));
        state.apply_event(&mut frame, down(PointerId::Touch(2), 90.0, 10.0));
        state.apply_event(&mut frame, up(PointerId::Touch(1), 10.0, 10.0));

        assert!(!state.pointer_down(PointerId::Touch(1)));
        assert!(state.pointer_down(PointerId::Touch(2)));
        assert_eq!(frame.pointer_downs().count(), 2);
        assert_eq!(frame.pointer_ups().count(), 1);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, down(PointerId::Touch(3), 1.0, 2.0));
        state.apply_event(
            &mut frame,
            InputEvent::Key { key: Key::ArrowLeft, state: KeyState::Pressed, repeat: false },
        );
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(state.pointers_down.is_empty());
        assert!(state.keys_down.is_empty());
        assert!(frame.keys_released.contains(&Key::ArrowLeft));
        assert_eq!(frame.pointer_ups().count(), 1);
    }

    #[test]
    fn mouse_leaving_window_releases_mouse_only() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, down(PointerId::Mouse, 1.0, 1.0));
        state.apply_event(&mut frame, down(PointerId::Touch(9), 2.0, 2.0));
        state.apply_event(&mut frame, InputEvent::PointerLeft);

        assert_eq!(state.pointer_pos, None);
        assert!(!state.pointer_down(PointerId::Mouse));
        assert!(state.pointer_down(PointerId::Touch(9)));
    }

    #[test]
    fn key_repeat_is_not_a_new_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        let press = |repeat| InputEvent::Key { key: Key::D, state: KeyState::Pressed, repeat };
        state.apply_event(&mut frame, press(false));
        frame.clear();
        state.apply_event(&mut frame, press(true));

        assert!(frame.keys_pressed.is_empty());
        assert!(state.key_down(Key::D));
    }
}
