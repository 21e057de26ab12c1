use spincube_engine::coords::{Rect, Vec2};
use spincube_engine::paint::Color;
use spincube_engine::scene::shapes::Border;

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventCtx, EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

/// A single-child widget that applies padding, background, border and a
/// minimum size.
///
/// All properties are optional. An empty `Container` with a minimum size is
/// a fixed spacer.
///
/// # Example
/// ```rust,ignore
/// Container::new()
///     .padding(Edges::all(12.0))
///     .background(Color::BLACK)
///     .child(Text::new("hello", font, 14.0, Color::WHITE))
/// ```
pub struct Container {
    child: Option<Element>,
    padding: Edges,
    background: Option<Color>,
    border: Option<Border>,
    min_width: f32,
    min_height: f32,
}

impl Container {
    pub fn new() -> Self {
        Self {
            child: None,
            padding: Edges::default(),
            background: None,
            border: None,
            min_width: 0.0,
            min_height: 0.0,
        }
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.child = Some(child.into());
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    pub fn min_size(mut self, width: f32, height: f32) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Container {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner = constraints.shrink(self.padding);

        let child_size = self
            .child
            .as_ref()
            .map(|c| c.measure(inner, ctx))
            .unwrap_or(Vec2::zero());

        let w = (child_size.x + self.padding.h()).max(self.min_width);
        let h = (child_size.y + self.padding.v()).max(self.min_height);
        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let fill = self.background.unwrap_or(Color::transparent());
        match self.border {
            Some(border) => painter.bordered_rect(rect, fill, border),
            None if self.background.is_some() => painter.fill_rect(rect, fill),
            None => {}
        }

        if let Some(child) = &self.child {
            child.paint(painter, inset_rect(rect, self.padding));
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &mut EventCtx<'_>) -> EventResult {
        match &mut self.child {
            Some(child) => {
                let inner = inset_rect(rect, self.padding);
                ctx.child(0, |ctx| child.on_event(event, inner, ctx))
            }
            None => EventResult::Ignored,
        }
    }
}
