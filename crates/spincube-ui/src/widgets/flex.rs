use spincube_engine::coords::{Rect, Vec2};

use crate::constraints::{inset_rect, Constraints, Edges, LayoutCtx};
use crate::event::{EventCtx, EventResult, UiEvent};
use crate::painter::Painter;
use crate::widget::{Element, Widget};

// ── Align ─────────────────────────────────────────────────────────────────

/// Cross-axis alignment inside a flex container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Children fill the full cross-axis extent (default).
    #[default]
    Stretch,
    /// Children are placed at the start of the cross axis.
    Start,
    /// Children are centered on the cross axis.
    Center,
    /// Children are placed at the end of the cross axis.
    End,
}

impl Align {
    fn offset(self, space: f32, extent: f32) -> f32 {
        match self {
            Align::Stretch | Align::Start => 0.0,
            Align::Center => (space - extent) * 0.5,
            Align::End => space - extent,
        }
    }
}

// ── Column ────────────────────────────────────────────────────────────────

/// Vertical flex container. Children are stacked top to bottom.
///
/// # Example
/// ```rust,ignore
/// Column::new()
///     .cross_align(Align::Center)
///     .child(Container::new().min_size(0.0, 480.0))
///     .child(start_button)
/// ```
pub struct Column {
    children: Vec<Element>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Column {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Stretch }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    // ── layout helpers ────────────────────────────────────────────────────

    fn child_constraints(&self, inner_w: f32) -> Constraints {
        match self.cross_align {
            Align::Stretch => {
                // Only enforce the width when it is actually constrained.
                let min_x = if inner_w.is_finite() { inner_w } else { 0.0 };
                Constraints {
                    min: Vec2::new(min_x, 0.0),
                    max: Vec2::new(inner_w, f32::INFINITY),
                }
            }
            _ => Constraints::loose(Vec2::new(inner_w, f32::INFINITY)),
        }
    }

    /// Child rects for a column occupying `rect`.
    fn child_rects(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let child_c = self.child_constraints(inner.size.x);

        let mut y = inner.origin.y;
        let mut rects = Vec::with_capacity(self.children.len());
        for child in &self.children {
            let s = child.measure(child_c, ctx);
            let x = inner.origin.x + self.cross_align.offset(inner.size.x, s.x);
            rects.push(Rect::new(x, y, s.x, s.y));
            y += s.y + self.spacing;
        }
        rects
    }
}

impl Default for Column {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Column {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let child_c = self.child_constraints(inner_w);

        let sizes: Vec<Vec2> = self.children.iter().map(|c| c.measure(child_c, ctx)).collect();
        let spacing_total = self.children.len().saturating_sub(1) as f32 * self.spacing;
        let total_h: f32 = sizes.iter().map(|s| s.y).sum::<f32>() + spacing_total + self.padding.v();
        let max_child_w = sizes.iter().map(|s| s.x).fold(0.0f32, f32::max);

        let w = match self.cross_align {
            Align::Stretch if constraints.max.x.is_finite() => constraints.max.x,
            _ => max_child_w + self.padding.h(),
        };

        constraints.constrain(Vec2::new(w, total_h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.child_rects(rect, &ctx)) {
            child.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &mut EventCtx<'_>) -> EventResult {
        let rects = self.child_rects(rect, &ctx.layout);
        for (i, (child, r)) in self.children.iter_mut().zip(rects).enumerate() {
            if ctx.child(i, |ctx| child.on_event(event, r, ctx)).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

// ── Row ───────────────────────────────────────────────────────────────────

struct RowChild {
    element: Element,
    /// Share of the leftover width; `0.0` keeps the natural width.
    grow: f32,
}

/// Horizontal flex container. Children are placed left to right.
///
/// Children added with [`Row::flex`] split the width left over by the fixed
/// children in proportion to their grow factor.
///
/// # Example
/// ```rust,ignore
/// // Two buttons, each taking half the row.
/// Row::new()
///     .flex(left_button, 1.0)
///     .flex(right_button, 1.0)
/// ```
pub struct Row {
    children: Vec<RowChild>,
    spacing: f32,
    padding: Edges,
    cross_align: Align,
}

impl Row {
    pub fn new() -> Self {
        Self { children: Vec::new(), spacing: 0.0, padding: Edges::default(), cross_align: Align::Stretch }
    }

    pub fn spacing(mut self, v: f32) -> Self {
        self.spacing = v;
        self
    }

    pub fn padding(mut self, edges: Edges) -> Self {
        self.padding = edges;
        self
    }

    pub fn cross_align(mut self, align: Align) -> Self {
        self.cross_align = align;
        self
    }

    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(RowChild { element: child.into(), grow: 0.0 });
        self
    }

    /// Adds a child that grows to fill leftover width.
    pub fn flex(mut self, child: impl Into<Element>, grow: f32) -> Self {
        self.children.push(RowChild { element: child.into(), grow: grow.max(0.0) });
        self
    }

    // ── layout helpers ────────────────────────────────────────────────────

    fn cross_constraints(&self, inner_h: f32, width: Option<f32>) -> Constraints {
        // Only enforce the height when the row has a known height to fill.
        let min_h = match self.cross_align {
            Align::Stretch if inner_h.is_finite() => inner_h,
            _ => 0.0,
        };
        let (min_w, max_w) = match width {
            Some(w) => (w, w),
            None => (0.0, f32::INFINITY),
        };
        Constraints { min: Vec2::new(min_w, min_h), max: Vec2::new(max_w, inner_h) }
    }

    fn total_grow(&self) -> f32 {
        self.children.iter().map(|c| c.grow).sum()
    }

    /// Main-axis sizes: natural for fixed children, shares of the leftover
    /// width for flexible ones (zero when the width is unbounded).
    fn child_sizes(&self, inner_w: f32, inner_h: f32, ctx: &LayoutCtx) -> Vec<Vec2> {
        let natural_c = self.cross_constraints(inner_h, None);
        let spacing_total = self.children.len().saturating_sub(1) as f32 * self.spacing;

        let fixed_w: f32 = self
            .children
            .iter()
            .filter(|c| c.grow == 0.0)
            .map(|c| c.element.measure(natural_c, ctx).x)
            .sum();

        let grow_total = self.total_grow();
        let leftover = if inner_w.is_finite() { (inner_w - fixed_w - spacing_total).max(0.0) } else { 0.0 };

        self.children
            .iter()
            .map(|c| {
                if c.grow > 0.0 {
                    let w = leftover * c.grow / grow_total;
                    let s = c.element.measure(self.cross_constraints(inner_h, Some(w)), ctx);
                    Vec2::new(w, s.y)
                } else {
                    c.element.measure(natural_c, ctx)
                }
            })
            .collect()
    }

    fn child_rects(&self, rect: Rect, ctx: &LayoutCtx) -> Vec<Rect> {
        let inner = inset_rect(rect, self.padding);
        let sizes = self.child_sizes(inner.size.x, inner.size.y, ctx);

        let mut x = inner.origin.x;
        sizes
            .into_iter()
            .map(|s| {
                let y = inner.origin.y + self.cross_align.offset(inner.size.y, s.y);
                let r = Rect::new(x, y, s.x, s.y);
                x += s.x + self.spacing;
                r
            })
            .collect()
    }
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for Row {
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        let inner_w = (constraints.max.x - self.padding.h()).max(0.0);
        let inner_h = (constraints.max.y - self.padding.v()).max(0.0);
        let sizes = self.child_sizes(inner_w, inner_h, ctx);

        let spacing_total = self.children.len().saturating_sub(1) as f32 * self.spacing;
        let content_w: f32 = sizes.iter().map(|s| s.x).sum::<f32>() + spacing_total;
        let max_child_h = sizes.iter().map(|s| s.y).fold(0.0f32, f32::max);

        // Flexible children claim all bounded width.
        let w = if self.total_grow() > 0.0 && constraints.max.x.is_finite() {
            constraints.max.x
        } else {
            content_w + self.padding.h()
        };

        let h = match self.cross_align {
            Align::Stretch if constraints.max.y.is_finite() => constraints.max.y,
            _ => max_child_h + self.padding.v(),
        };

        constraints.constrain(Vec2::new(w, h))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let ctx = painter.layout_ctx();
        for (child, r) in self.children.iter().zip(self.child_rects(rect, &ctx)) {
            child.element.paint(painter, r);
        }
    }

    fn on_event(&mut self, event: &UiEvent, rect: Rect, ctx: &mut EventCtx<'_>) -> EventResult {
        let rects = self.child_rects(rect, &ctx.layout);
        for (i, (child, r)) in self.children.iter_mut().zip(rects).enumerate() {
            if ctx.child(i, |ctx| child.element.on_event(event, r, ctx)).is_consumed() {
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}
