use spincube_engine::coords::{Rect, Vec2};
use spincube_engine::paint::Color;
use spincube_engine::text::FontId;

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// A single-line text widget measured with the engine's `FontSystem`.
///
/// # Example
/// ```rust,ignore
/// Text::new("Start", font, 18.0, Color::WHITE)
/// ```
pub struct Text {
    pub text: String,
    pub font: FontId,
    pub size: f32,
    pub color: Color,
}

impl Text {
    pub fn new(text: impl Into<String>, font: FontId, size: f32, color: Color) -> Self {
        Self { text: text.into(), font, size, color }
    }
}

impl Widget for Text {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let size = ctx.fonts.measure_text(&self.text, self.font, self.size);
        constraints.constrain(size)
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        painter.text(self.text.as_str(), self.font, self.size, self.color, rect.origin);
    }
}
