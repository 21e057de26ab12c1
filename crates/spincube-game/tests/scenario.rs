//! Drives the demo frame by frame without a window or GPU.

use approx::assert_relative_eq;

use spincube_engine::coords::{Rect, Vec2};
use spincube_engine::input::{InputEvent, InputFrame, InputState, Key, KeyState, PointerId};
use spincube_game::config::GameConfig;
use spincube_game::host::{CUBE_NAME, PLAYER_NAME};
use spincube_game::ui::{LEFT_LABEL, RIGHT_LABEL, START_LABEL};
use spincube_game::SpincubeApp;

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

struct Harness {
    app: SpincubeApp,
    state: InputState,
    frame: InputFrame,
    elapsed: f32,
}

impl Harness {
    fn new() -> Self {
        let config = GameConfig {
            font_paths: Vec::new(),
            texture_url: "/nonexistent/spincube/star.png".to_string(),
            ..GameConfig::default()
        };
        let mut app = SpincubeApp::new(config);
        app.init_scene().unwrap();
        Self { app, state: InputState { focused: true, ..InputState::default() }, frame: InputFrame::default(), elapsed: 0.0 }
    }

    fn send(&mut self, ev: InputEvent) {
        self.state.apply_event(&mut self.frame, ev);
    }

    fn tick(&mut self) {
        self.elapsed += 1.0 / 60.0;
        let _ = self.app.update(&self.state, &self.frame, VIEWPORT, self.elapsed);
        self.frame.clear();
    }

    fn control(&self, label: &str) -> Vec2 {
        let r: Rect = self.app.ui().find(label).unwrap_or_else(|| panic!("{label} not painted"));
        Vec2::new(r.origin.x + r.size.x * 0.5, r.origin.y + r.size.y * 0.5)
    }

    fn player_x(&self) -> f32 {
        self.app.host().object(PLAYER_NAME).unwrap().transform.position.x
    }

    fn click_start(&mut self) {
        let p = self.control(START_LABEL);
        self.send(InputEvent::PointerDown { pointer: PointerId::Mouse, x: p.x, y: p.y });
        self.send(InputEvent::PointerUp { pointer: PointerId::Mouse, x: p.x, y: p.y });
        // Click is handled during this frame, applied at the start of the next.
        self.tick();
        self.tick();
    }
}

#[test]
fn idle_screen_shows_only_start() {
    let mut h = Harness::new();
    h.tick();

    assert!(!h.app.is_running());
    assert!(h.app.host().object(PLAYER_NAME).is_none());
    assert!(h.app.host().object(CUBE_NAME).is_some());
    assert!(h.app.ui().find(START_LABEL).is_some());
    assert!(h.app.ui().find(LEFT_LABEL).is_none());

    // Start sits below the scene area, which covers the top 80%.
    let start = h.app.ui().find(START_LABEL).unwrap();
    assert!(start.origin.y >= VIEWPORT.y * 0.8 - 1e-3);
}

#[test]
fn start_then_hold_left_moves_player() {
    let mut h = Harness::new();
    h.tick();
    h.click_start();

    assert!(h.app.is_running());
    assert!(h.app.ui().find(START_LABEL).is_none());
    let player = h.app.host().object(PLAYER_NAME).unwrap();
    assert_eq!(player.transform.position.to_array(), [0.0, 1.0, 0.0]);

    let left = h.control(LEFT_LABEL);
    h.send(InputEvent::PointerDown { pointer: PointerId::Touch(1), x: left.x, y: left.y });
    h.tick();
    assert_relative_eq!(h.player_x(), 0.0);

    h.tick();
    assert_relative_eq!(h.player_x(), -0.1, epsilon = 1e-6);

    h.send(InputEvent::PointerUp { pointer: PointerId::Touch(1), x: left.x, y: left.y });
    h.tick();
    h.tick();
    let stopped = h.player_x();
    h.tick();
    assert_relative_eq!(h.player_x(), stopped);
    assert!(stopped < -0.1);
}

#[test]
fn holding_both_controls_cancels_out() {
    let mut h = Harness::new();
    h.tick();
    h.click_start();

    let (left, right) = (h.control(LEFT_LABEL), h.control(RIGHT_LABEL));
    h.send(InputEvent::PointerDown { pointer: PointerId::Touch(1), x: left.x, y: left.y });
    h.send(InputEvent::PointerDown { pointer: PointerId::Touch(2), x: right.x, y: right.y });
    h.tick();
    h.tick();
    h.tick();

    assert_relative_eq!(h.player_x(), 0.0);
}

#[test]
fn arrow_keys_move_player_while_running() {
    let mut h = Harness::new();
    h.tick();

    // Ignored before Start.
    h.send(InputEvent::Key { key: Key::ArrowRight, state: KeyState::Pressed, repeat: false });
    h.tick();
    h.send(InputEvent::Key { key: Key::ArrowRight, state: KeyState::Released, repeat: false });
    h.tick();

    h.click_start();
    h.send(InputEvent::Key { key: Key::ArrowRight, state: KeyState::Pressed, repeat: false });
    h.tick();
    h.tick();
    assert_relative_eq!(h.player_x(), 0.2, epsilon = 1e-6);

    h.send(InputEvent::Key { key: Key::ArrowRight, state: KeyState::Released, repeat: false });
    h.tick();
    assert_relative_eq!(h.player_x(), 0.2, epsilon = 1e-6);
}

#[test]
fn focus_loss_stops_a_held_control() {
    let mut h = Harness::new();
    h.tick();
    h.click_start();

    let left = h.control(LEFT_LABEL);
    h.send(InputEvent::PointerDown { pointer: PointerId::Mouse, x: left.x, y: left.y });
    h.tick();
    h.send(InputEvent::Focused(false));
    h.tick();
    h.tick();
    let x = h.player_x();
    h.tick();

    assert_relative_eq!(h.player_x(), x);
}

#[test]
fn cube_spins_with_elapsed_time() {
    let mut h = Harness::new();
    h.tick();
    h.tick();

    let cube = h.app.host().object(CUBE_NAME).unwrap();
    assert_relative_eq!(cube.transform.rotation.x, h.elapsed, epsilon = 1e-6);
    assert_relative_eq!(cube.transform.rotation.y, h.elapsed, epsilon = 1e-6);
}
