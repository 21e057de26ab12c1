use std::collections::HashMap;

use spincube_engine::coords::{Rect, Vec2};
use spincube_engine::input::{InputFrame, InputState, PointerId, PointerPhase, PointerTransition};
use spincube_engine::scene::DrawList;
use spincube_engine::text::FontSystem;

use crate::constraints::{Constraints, LayoutCtx};
use crate::event::{EventCtx, UiEvent, WidgetPath};
use crate::painter::{AccessNode, Painter};
use crate::widget::{Element, Widget};

// ── UiInput ───────────────────────────────────────────────────────────────

/// Snapshot of pointer input for one UI frame.
#[derive(Debug, Clone, Default)]
pub struct UiInput {
    /// Mouse position in logical pixels, `None` while outside the window.
    pub hover_pos: Option<Vec2>,
    /// Pointer downs and ups this frame, in arrival order.
    pub transitions: Vec<PointerTransition>,
}

impl UiInput {
    /// Builds the UI view of the engine's input for this frame.
    pub fn from_engine(state: &InputState, frame: &InputFrame) -> Self {
        Self {
            hover_pos: state.pointer_pos.map(|(x, y)| Vec2::new(x, y)),
            transitions: frame.pointer_transitions.clone(),
        }
    }
}

// ── UiScene ───────────────────────────────────────────────────────────────

/// Top-level coordinator that owns UI resources across frames.
///
/// Owns the `FontSystem`, the `DrawList` populated by [`frame`](Self::frame),
/// the press origin of every held pointer and the widget each one claimed.
/// The GPU renderers live in the application and receive the `&mut DrawList`
/// returned by `frame`.
///
/// # Example
///
/// ```rust,ignore
/// let mut ui = UiScene::new();
///
/// // In your on_frame callback:
/// let draw_list = ui.frame(root, viewport, &UiInput::from_engine(ctx.input, ctx.input_frame));
/// rect_renderer.render(rctx, target, draw_list);
/// text_renderer.render(rctx, target, draw_list, &ui.font_system);
/// ```
pub struct UiScene {
    /// Public so the application can pass `&ui.font_system` to the
    /// engine's `TextRenderer::render`.
    pub font_system: FontSystem,
    /// Draw list populated by the most recent [`frame`](Self::frame) call.
    pub draw_list: DrawList,
    access: Vec<AccessNode>,
    press_starts: HashMap<PointerId, Vec2>,
    claims: HashMap<PointerId, WidgetPath>,
}

impl UiScene {
    pub fn new() -> Self {
        Self::with_fonts(FontSystem::new())
    }

    pub fn with_fonts(font_system: FontSystem) -> Self {
        Self {
            font_system,
            draw_list: DrawList::new(),
            access: Vec::new(),
            press_starts: HashMap::new(),
            claims: HashMap::new(),
        }
    }

    /// Labelled regions painted by the most recent frame.
    pub fn accessibility(&self) -> &[AccessNode] {
        &self.access
    }

    /// Rect of the control labelled `label` in the most recent frame.
    pub fn find(&self, label: &str) -> Option<Rect> {
        self.access.iter().find(|n| n.label == label).map(|n| n.rect)
    }

    /// Convenience: wrap any [`Widget`] in an [`Element`] and call [`frame`](Self::frame).
    pub fn frame_widget<W: Widget>(&mut self, root: W, viewport: Vec2, input: &UiInput) -> &mut DrawList {
        self.frame(root.into(), viewport, input)
    }

    /// Lays out, paints and routes input through a freshly built tree.
    ///
    /// Paint sees the press state from before this frame's transitions; the
    /// transitions are then dispatched in arrival order. A lifted pointer is
    /// routed to the widget that claimed it on press, not to whatever sits
    /// under its start point now; an unclaimed one is dropped. The returned
    /// list is valid until the next call.
    pub fn frame(&mut self, mut root: Element, viewport: Vec2, input: &UiInput) -> &mut DrawList {
        self.draw_list.clear();
        self.access.clear();

        let rect = Rect::new(0.0, 0.0, viewport.x, viewport.y);
        let layout = LayoutCtx { fonts: &self.font_system };
        // The root always occupies the full viewport; the pre-pass only
        // primes children.
        let _ = root.measure(Constraints::loose(viewport), &layout);

        // ── paint ─────────────────────────────────────────────────────────
        {
            let starts: Vec<Vec2> = self.press_starts.values().copied().collect();
            let mut painter = Painter::new(
                &mut self.draw_list,
                &self.font_system,
                &mut self.access,
                input.hover_pos,
                &starts,
            );
            root.paint(&mut painter, rect);
        }

        // ── events ────────────────────────────────────────────────────────
        for t in &input.transitions {
            let pos = Vec2::new(t.x, t.y);
            let (event, releasing) = match t.phase {
                PointerPhase::Down => {
                    self.press_starts.insert(t.pointer, pos);
                    (UiEvent::Press { pointer: t.pointer, pos }, None)
                }
                PointerPhase::Up => {
                    self.press_starts.remove(&t.pointer);
                    let Some(owner) = self.claims.remove(&t.pointer) else { continue };
                    (UiEvent::Release { pointer: t.pointer, pos }, Some(owner))
                }
            };
            log::trace!("ui event {event:?}");
            let mut ctx = EventCtx::new(layout, &mut self.claims, releasing);
            let _ = root.on_event(&event, rect, &mut ctx);
        }

        &mut self.draw_list
    }
}

impl Default for UiScene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use spincube_engine::paint::Color;

    use super::*;
    use crate::widgets::button::Button;
    use crate::widgets::container::Container;
    use crate::widgets::flex::{Align, Column, Row};

    fn down(pointer: PointerId, x: f32, y: f32) -> PointerTransition {
        PointerTransition { pointer, phase: PointerPhase::Down, x, y }
    }

    fn up(pointer: PointerId, x: f32, y: f32) -> PointerTransition {
        PointerTransition { pointer, phase: PointerPhase::Up, x, y }
    }

    /// 100×100 button at the top-left that logs "press"/"release"/"click".
    fn logging_button(log: &Rc<RefCell<Vec<&'static str>>>) -> Column {
        let (a, b, c) = (log.clone(), log.clone(), log.clone());
        let button = Button::new(Container::new())
            .background(Color::BLACK)
            .min_size(100.0, 100.0)
            .accessibility_label("target")
            .on_press(move || a.borrow_mut().push("press"))
            .on_release(move || b.borrow_mut().push("release"))
            .on_click(move || c.borrow_mut().push("click"));
        Column::new().cross_align(Align::Start).child(button)
    }

    /// Two buttons splitting the width, logging "<name> press" / "<name> release".
    fn split_row(log: &Rc<RefCell<Vec<String>>>) -> Row {
        let button = |name: &'static str| {
            let (p, r) = (log.clone(), log.clone());
            Button::new(Container::new())
                .min_size(0.0, 50.0)
                .on_press(move || p.borrow_mut().push(format!("{name} press")))
                .on_release(move || r.borrow_mut().push(format!("{name} release")))
        };
        Row::new().cross_align(Align::Start).flex(button("a"), 1.0).flex(button("b"), 1.0)
    }

    #[test]
    fn release_follows_the_claim_across_a_resize() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ui = UiScene::new();

        let input = UiInput { hover_pos: None, transitions: vec![down(PointerId::Touch(1), 390.0, 10.0)] };
        let _ = ui.frame_widget(split_row(&log), Vec2::new(800.0, 600.0), &input);
        assert_eq!(*log.borrow(), vec!["a press"]);

        // Narrower window: x = 390 now lies inside "b".
        let input = UiInput { hover_pos: None, transitions: vec![up(PointerId::Touch(1), 390.0, 10.0)] };
        let _ = ui.frame_widget(split_row(&log), Vec2::new(700.0, 600.0), &input);
        assert_eq!(*log.borrow(), vec!["a press", "a release"]);
    }

    #[test]
    fn button_stays_held_until_its_last_pointer_lifts() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ui = UiScene::new();
        let viewport = Vec2::new(800.0, 600.0);

        let input = UiInput {
            hover_pos: None,
            transitions: vec![down(PointerId::Touch(1), 100.0, 10.0), down(PointerId::Touch(2), 200.0, 20.0)],
        };
        let _ = ui.frame_widget(split_row(&log), viewport, &input);
        let input = UiInput { hover_pos: None, transitions: vec![up(PointerId::Touch(1), 100.0, 10.0)] };
        let _ = ui.frame_widget(split_row(&log), viewport, &input);
        assert_eq!(*log.borrow(), vec!["a press"]);

        let input = UiInput { hover_pos: None, transitions: vec![up(PointerId::Touch(2), 600.0, 300.0)] };
        let _ = ui.frame_widget(split_row(&log), viewport, &input);
        assert_eq!(*log.borrow(), vec!["a press", "a release"]);
    }

    #[test]
    fn release_outside_still_releases_but_does_not_click() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ui = UiScene::new();
        let viewport = Vec2::new(400.0, 400.0);

        let input = UiInput { hover_pos: None, transitions: vec![down(PointerId::Mouse, 10.0, 10.0)] };
        let _ = ui.frame_widget(logging_button(&log), viewport, &input);

        let input = UiInput { hover_pos: None, transitions: vec![up(PointerId::Mouse, 300.0, 300.0)] };
        let _ = ui.frame_widget(logging_button(&log), viewport, &input);

        assert_eq!(*log.borrow(), vec!["press", "release"]);
    }

    #[test]
    fn tap_within_one_frame_presses_then_clicks() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ui = UiScene::new();

        let input = UiInput {
            hover_pos: None,
            transitions: vec![down(PointerId::Touch(4), 20.0, 20.0), up(PointerId::Touch(4), 25.0, 20.0)],
        };
        let _ = ui.frame_widget(logging_button(&log), Vec2::new(400.0, 400.0), &input);

        assert_eq!(*log.borrow(), vec!["press", "release", "click"]);
    }

    #[test]
    fn up_without_known_press_is_dropped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ui = UiScene::new();

        let input = UiInput { hover_pos: None, transitions: vec![up(PointerId::Mouse, 20.0, 20.0)] };
        let _ = ui.frame_widget(logging_button(&log), Vec2::new(400.0, 400.0), &input);

        assert!(log.borrow().is_empty());
    }

    #[test]
    fn accessibility_nodes_are_rebuilt_each_frame() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ui = UiScene::new();

        let _ = ui.frame_widget(logging_button(&log), Vec2::new(400.0, 400.0), &UiInput::default());
        assert_eq!(ui.find("target"), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));

        let _ = ui.frame_widget(Container::new(), Vec2::new(400.0, 400.0), &UiInput::default());
        assert!(ui.accessibility().is_empty());
    }
}
