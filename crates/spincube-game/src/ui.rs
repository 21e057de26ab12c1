//! Widget tree for the start screen and the movement controls.

use std::cell::Cell;
use std::rc::Rc;

use spincube_ui::prelude::*;

use crate::controls::{CommandQueue, Direction, MovementCommand};

pub const START_LABEL: &str = "Start";
pub const LEFT_LABEL: &str = "Left";
pub const RIGHT_LABEL: &str = "Right";

const LABEL_SIZE: f32 = 14.0;
const START_COLOR: u32 = 0x841584;
const CONTROL_COLOR: u32 = 0xff0000;
const CONTROL_BORDER_COLOR: u32 = 0x00ffff;

/// Builds this frame's tree.
///
/// `surface` is the scene rect from the shell; the idle layout places the
/// Start button right below it. Without a font, labels collapse to blank
/// boxes of the same height so layout stays stable.
pub fn build_ui(
    running: bool,
    surface: Rect,
    font: Option<FontId>,
    queue: &CommandQueue,
    start_requested: &Rc<Cell<bool>>,
) -> Element {
    if running {
        controls(font, queue).into()
    } else {
        start_screen(surface, font, start_requested).into()
    }
}

fn label(text: &str, font: Option<FontId>) -> Element {
    match font {
        Some(font) => Text::new(text, font, LABEL_SIZE, Color::WHITE).into(),
        None => Container::new().min_size(0.0, LABEL_SIZE * 1.2).into(),
    }
}

fn start_screen(surface: Rect, font: Option<FontId>, start_requested: &Rc<Cell<bool>>) -> Column {
    let start = start_requested.clone();
    let button = Button::new(label(START_LABEL, font))
        .background(Color::from_hex(START_COLOR))
        .padding(Edges::symmetric(8.0, 16.0))
        .accessibility_label(START_LABEL)
        .on_click(move || start.set(true));

    Column::new()
        .cross_align(Align::Center)
        .child(Container::new().min_size(0.0, surface.origin.y + surface.size.y))
        .child(button)
}

fn control_button(text: &'static str, direction: Direction, font: Option<FontId>, queue: &CommandQueue) -> Button {
    let (on_press, on_release) = (queue.clone(), queue.clone());
    Button::new(label(text, font))
        .background(Color::from_hex(CONTROL_COLOR))
        .border(Border::new(1.0, Color::from_hex(CONTROL_BORDER_COLOR)))
        .padding(Edges::symmetric(100.0, 32.0))
        .accessibility_label(text)
        .on_press(move || on_press.push(MovementCommand::Press(direction)))
        .on_release(move || on_release.push(MovementCommand::Release(direction)))
}

/// Left/Right buttons splitting a row pinned to the bottom edge.
fn controls(font: Option<FontId>, queue: &CommandQueue) -> Stack {
    let row = Row::new()
        .cross_align(Align::Start)
        .flex(control_button(LEFT_LABEL, Direction::Left, font, queue), 1.0)
        .flex(control_button(RIGHT_LABEL, Direction::Right, font, queue), 1.0);

    Stack::new().item(
        StackItem::new(row)
            .left(AnchorVal::Px(0.0))
            .right(AnchorVal::Px(0.0))
            .bottom(AnchorVal::Px(0.0)),
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use spincube_engine::input::{PointerId, PointerPhase, PointerTransition};

    use super::*;
    use crate::controls::MovementFlags;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn frame(ui: &mut UiScene, running: bool, queue: &CommandQueue, start: &Rc<Cell<bool>>, input: &UiInput) {
        let surface = Rect::new(80.0, 0.0, 640.0, 480.0);
        let _ = ui.frame(build_ui(running, surface, None, queue, start), VIEWPORT, input);
    }

    /// One running frame at an arbitrary window size.
    fn controls_frame(ui: &mut UiScene, viewport: Vec2, queue: &CommandQueue, input: &UiInput) {
        let surface = Rect::new(0.0, 0.0, viewport.x, viewport.y);
        let _ = ui.frame(build_ui(true, surface, None, queue, &Rc::new(Cell::new(false))), viewport, input);
    }

    fn tap(pointer: PointerId, at: Vec2, phase: PointerPhase) -> UiInput {
        UiInput { hover_pos: None, transitions: vec![PointerTransition { pointer, phase, x: at.x, y: at.y }] }
    }

    fn center(r: Rect) -> Vec2 {
        Vec2::new(r.origin.x + r.size.x * 0.5, r.origin.y + r.size.y * 0.5)
    }

    #[test]
    fn idle_shows_only_start_below_the_surface() {
        let mut ui = UiScene::new();
        frame(&mut ui, false, &CommandQueue::new(), &Rc::new(Cell::new(false)), &UiInput::default());

        let start = ui.find(START_LABEL).unwrap();
        assert_eq!(start.origin.y, 480.0);
        assert_eq!(start.origin.x + start.size.x * 0.5, 400.0);
        assert!(ui.find(LEFT_LABEL).is_none());
        assert!(ui.find(RIGHT_LABEL).is_none());
    }

    #[test]
    fn running_shows_only_controls_in_bottom_halves() {
        let mut ui = UiScene::new();
        frame(&mut ui, true, &CommandQueue::new(), &Rc::new(Cell::new(false)), &UiInput::default());

        assert!(ui.find(START_LABEL).is_none());
        let left = ui.find(LEFT_LABEL).unwrap();
        let right = ui.find(RIGHT_LABEL).unwrap();
        assert_eq!(left.size.x, 400.0);
        assert_eq!(right.origin.x, 400.0);
        assert_relative_eq!(left.origin.y + left.size.y, 600.0, epsilon = 1e-3);
        assert!(left.size.y >= 200.0);
    }

    #[test]
    fn clicking_start_raises_the_request() {
        let mut ui = UiScene::new();
        let queue = CommandQueue::new();
        let start = Rc::new(Cell::new(false));
        frame(&mut ui, false, &queue, &start, &UiInput::default());
        let at = center(ui.find(START_LABEL).unwrap());

        frame(&mut ui, false, &queue, &start, &tap(PointerId::Mouse, at, PointerPhase::Down));
        assert!(!start.get());
        frame(&mut ui, false, &queue, &start, &tap(PointerId::Mouse, at, PointerPhase::Up));
        assert!(start.get());
    }

    #[test]
    fn holding_both_controls_with_two_touches() {
        let mut ui = UiScene::new();
        let queue = CommandQueue::new();
        let start = Rc::new(Cell::new(false));
        frame(&mut ui, true, &queue, &start, &UiInput::default());
        let left = center(ui.find(LEFT_LABEL).unwrap());
        let right = center(ui.find(RIGHT_LABEL).unwrap());

        let input = UiInput {
            hover_pos: None,
            transitions: vec![
                PointerTransition { pointer: PointerId::Touch(1), phase: PointerPhase::Down, x: left.x, y: left.y },
                PointerTransition { pointer: PointerId::Touch(2), phase: PointerPhase::Down, x: right.x, y: right.y },
            ],
        };
        frame(&mut ui, true, &queue, &start, &input);
        assert_eq!(
            queue.drain(),
            vec![MovementCommand::Press(Direction::Left), MovementCommand::Press(Direction::Right)]
        );

        // Touch 1 slides off the button before lifting.
        frame(&mut ui, true, &queue, &start, &tap(PointerId::Touch(1), Vec2::new(10.0, 10.0), PointerPhase::Up));
        assert_eq!(queue.drain(), vec![MovementCommand::Release(Direction::Left)]);
    }

    #[test]
    fn resize_while_held_releases_the_pressed_control() {
        let mut ui = UiScene::new();
        let queue = CommandQueue::new();
        let mut flags = MovementFlags::default();
        let at = Vec2::new(390.0, 550.0);

        controls_frame(&mut ui, VIEWPORT, &queue, &UiInput::default());
        controls_frame(&mut ui, VIEWPORT, &queue, &tap(PointerId::Touch(1), at, PointerPhase::Down));
        flags.apply(queue.drain());
        assert!(flags.left);

        // At 700 wide the same point lies over Right.
        let narrow = Vec2::new(700.0, 600.0);
        controls_frame(&mut ui, narrow, &queue, &UiInput::default());
        assert!(ui.find(RIGHT_LABEL).unwrap().contains(at));
        controls_frame(&mut ui, narrow, &queue, &tap(PointerId::Touch(1), at, PointerPhase::Up));

        let commands = queue.drain();
        assert_eq!(commands, vec![MovementCommand::Release(Direction::Left)]);
        flags.apply(commands);
        assert!(!flags.left && !flags.right);
    }

    #[test]
    fn second_finger_on_a_held_control_keeps_it_held() {
        let mut ui = UiScene::new();
        let queue = CommandQueue::new();
        let mut flags = MovementFlags::default();

        controls_frame(&mut ui, VIEWPORT, &queue, &UiInput::default());
        let left = center(ui.find(LEFT_LABEL).unwrap());
        controls_frame(&mut ui, VIEWPORT, &queue, &tap(PointerId::Touch(1), left, PointerPhase::Down));
        controls_frame(&mut ui, VIEWPORT, &queue, &tap(PointerId::Touch(2), left, PointerPhase::Down));
        controls_frame(&mut ui, VIEWPORT, &queue, &tap(PointerId::Touch(1), left, PointerPhase::Up));

        let commands = queue.drain();
        assert_eq!(commands, vec![MovementCommand::Press(Direction::Left)]);
        flags.apply(commands);
        assert!(flags.left);

        controls_frame(&mut ui, VIEWPORT, &queue, &tap(PointerId::Touch(2), left, PointerPhase::Up));
        flags.apply(queue.drain());
        assert!(!flags.left);
    }
}
