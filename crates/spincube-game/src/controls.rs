//! Press-and-hold movement input.
//!
//! UI handlers and key bindings push [`MovementCommand`]s into a
//! [`CommandQueue`]; the frame update drains it once into [`MovementFlags`].

use std::cell::RefCell;
use std::rc::Rc;

use spincube_engine::input::{InputFrame, Key};

/// Distance the player moves along x per frame while one control is held.
pub const MOVE_STEP: f32 = 0.1;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MovementCommand {
    Press(Direction),
    Release(Direction),
}

/// Single-threaded command queue shared between UI callbacks and the frame
/// update. Cloning yields another handle to the same queue.
#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    inner: Rc<RefCell<Vec<MovementCommand>>>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, command: MovementCommand) {
        self.inner.borrow_mut().push(command);
    }

    /// Removes and returns every queued command in arrival order.
    pub fn drain(&self) -> Vec<MovementCommand> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

/// Whether each control is currently held.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct MovementFlags {
    pub left: bool,
    pub right: bool,
}

impl MovementFlags {
    /// Applies commands in order; the last write for a direction wins.
    pub fn apply(&mut self, commands: impl IntoIterator<Item = MovementCommand>) {
        for command in commands {
            match command {
                MovementCommand::Press(Direction::Left) => self.left = true,
                MovementCommand::Release(Direction::Left) => self.left = false,
                MovementCommand::Press(Direction::Right) => self.right = true,
                MovementCommand::Release(Direction::Right) => self.right = false,
            }
        }
    }

    /// x offset for this frame. Both or neither held cancels out.
    pub fn step(self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -MOVE_STEP,
            (false, true) => MOVE_STEP,
            _ => 0.0,
        }
    }
}

fn key_direction(key: Key) -> Option<Direction> {
    match key {
        Key::ArrowLeft | Key::A => Some(Direction::Left),
        Key::ArrowRight | Key::D => Some(Direction::Right),
        _ => None,
    }
}

/// Translates this frame's key transitions into movement commands.
///
/// Releases come first: a key released and pressed again within one frame
/// ends up held.
pub fn key_commands(frame: &InputFrame) -> Vec<MovementCommand> {
    let released = frame.keys_released.iter().filter_map(|&k| key_direction(k)).map(MovementCommand::Release);
    let pressed = frame.keys_pressed.iter().filter_map(|&k| key_direction(k)).map(MovementCommand::Press);
    released.chain(pressed).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use Direction::{Left, Right};
    use MovementCommand::{Press, Release};

    #[test]
    fn single_direction_moves_one_step() {
        let mut flags = MovementFlags::default();
        flags.apply([Press(Left)]);
        assert_eq!(flags.step(), -MOVE_STEP);

        flags.apply([Release(Left), Press(Right)]);
        assert_eq!(flags.step(), MOVE_STEP);
    }

    #[test]
    fn both_or_neither_cancel() {
        let mut flags = MovementFlags::default();
        assert_eq!(flags.step(), 0.0);

        flags.apply([Press(Left), Press(Right)]);
        assert_eq!(flags.step(), 0.0);
    }

    #[test]
    fn last_write_wins_within_a_drain() {
        let mut flags = MovementFlags::default();
        flags.apply([Press(Left), Release(Left), Press(Left)]);
        assert!(flags.left);

        flags.apply([Release(Left), Press(Left), Release(Left)]);
        assert!(!flags.left);
    }

    #[test]
    fn queue_handles_share_storage_and_drain_in_order() {
        let queue = CommandQueue::new();
        let handle = queue.clone();
        handle.push(Press(Right));
        handle.push(Release(Right));

        assert_eq!(queue.drain(), vec![Press(Right), Release(Right)]);
        assert!(queue.is_empty());
    }

    #[test]
    fn arrow_keys_and_letters_map_to_directions() {
        let mut frame = InputFrame::default();
        frame.keys_pressed.insert(Key::A);
        frame.keys_released.insert(Key::ArrowRight);
        frame.keys_pressed.insert(Key::Enter);

        assert_eq!(key_commands(&frame), vec![Release(Right), Press(Left)]);
    }
}
