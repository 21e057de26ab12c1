use spincube_engine::coords::{Rect, Vec2};
use spincube_engine::paint::Color;
use spincube_engine::scene::shapes::Border;

use crate::constraints::{center_in, inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventCtx, EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

type Callback = Box<dyn FnMut()>;

/// A pressable widget that wraps any child content.
///
/// Three callbacks cover both tap and press-and-hold use:
/// - `on_press` fires when the first pointer goes down inside the button;
/// - `on_release` fires when the last pointer holding it is lifted,
///   wherever it is and however the layout has changed since;
/// - `on_click` fires alongside that release if the pointer is still inside.
///
/// A pointer that lands on the button is claimed through [`EventCtx`], so
/// extra fingers on an already held button fire nothing.
///
/// Visual state is read from `Painter` during `paint`, so the button tree can
/// be rebuilt each frame.
///
/// # Example
/// ```rust,ignore
/// Button::new(Text::new("Left", font, 16.0, Color::WHITE))
///     .background(Color::from_hex(0xff0000))
///     .border(Border::new(1.0, Color::from_hex(0x00ffff)))
///     .padding(Edges::symmetric(100.0, 32.0))
///     .on_press(|| queue.push(Press(Left)))
///     .on_release(|| queue.push(Release(Left)))
/// ```
pub struct Button {
    child: Element,
    on_press: Option<Callback>,
    on_release: Option<Callback>,
    on_click: Option<Callback>,

    background: Color,
    press_background: Option<Color>,
    border: Option<Border>,
    padding: Edges,
    min_width: f32,
    min_height: f32,
    label: Option<String>,
}

impl Button {
    pub fn new(child: impl Into<Element>) -> Self {
        Self {
            child: child.into(),
            on_press: None,
            on_release: None,
            on_click: None,
            background: Color::transparent(),
            press_background: None,
            border: None,
            padding: Edges::default(),
            min_width: 0.0,
            min_height: 0.0,
            label: None,
        }
    }

    pub fn on_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    pub fn on_release(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_release = Some(Box::new(f));
        self
    }

    pub fn on_click(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Background while a pointer that started on the button is held.
    pub fn press_background(mut self, color: Color) -> Self {
        self.press_background = Some(color);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Label exposed through the scene's accessibility nodes.
    pub fn accessibility_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Widget for Button {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding);
        let child_size = self.child.measure(inner, ctx);
        let w = (child_size.x + self.padding.h()).max(self.min_width);
        let h = (child_size.y + self.padding.v()).max(self.min_height);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let bg = match self.press_background {
            Some(pressed) if painter.is_pressed(rect) => pressed,
            _ => self.background,
        };

        match self.border {
            Some(border) => painter.bordered_rect(rect, bg, border),
            None => painter.fill_rect(rect, bg),
        }
        if let Some(label) = &self.label {
            painter.annotate(label.clone(), rect);
        }

        // Content sits centered in the padded area.
        let inner = inset_rect(rect, self.padding);
        let child_size = self.child.measure(Constraints::loose(inner.size), &painter.layout_ctx());
        self.child.paint(painter, center_in(inner, child_size));
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &mut EventCtx<'_>) -> EventResult {
        match *event {
            UiEvent::Press { pointer, pos } if rect.contains(pos) => {
                if ctx.claim(pointer) {
                    if let Some(f) = &mut self.on_press {
                        f();
                    }
                }
                EventResult::Consumed
            }
            UiEvent::Release { pos, .. } if ctx.owns_release() => {
                if ctx.holders() == 0 {
                    if let Some(f) = &mut self.on_release {
                        f();
                    }
                    if rect.contains(pos) {
                        if let Some(f) = &mut self.on_click {
                            f();
                        }
                    }
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}
