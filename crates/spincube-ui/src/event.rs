use std::collections::HashMap;

use spincube_engine::coords::Vec2;
use spincube_engine::input::PointerId;

use crate::constraints::LayoutCtx;

/// Input events routed through the widget tree.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A pointer went down at `pos`.
    Press { pointer: PointerId, pos: Vec2 },
    /// A pointer claimed by a widget was lifted at `pos`.
    ///
    /// Includes releases forced by the mouse leaving the window or a focus
    /// loss. Only the claiming widget sees
    /// [`EventCtx::owns_release`] return `true`; geometry plays no part.
    Release { pointer: PointerId, pos: Vec2 },
}

/// Result returned by [`Widget::on_event`](crate::widget::Widget::on_event).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled; stop routing to siblings.
    Consumed,
    /// Event was not handled; keep routing.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

/// Child indices from the root down to one widget.
///
/// The tree is rebuilt every frame, so a widget is identified by where it
/// sits rather than by its address.
pub type WidgetPath = Vec<usize>;

/// Routing state handed to [`Widget::on_event`](crate::widget::Widget::on_event).
///
/// Containers call [`child`](Self::child) around each child so the context
/// always knows the path of the widget being visited.
pub struct EventCtx<'a> {
    pub layout: LayoutCtx<'a>,
    path: WidgetPath,
    claims: &'a mut HashMap<PointerId, WidgetPath>,
    /// Owner of the pointer being released, already removed from `claims`.
    releasing: Option<WidgetPath>,
}

impl<'a> EventCtx<'a> {
    pub(crate) fn new(
        layout: LayoutCtx<'a>,
        claims: &'a mut HashMap<PointerId, WidgetPath>,
        releasing: Option<WidgetPath>,
    ) -> Self {
        Self { layout, path: WidgetPath::new(), claims, releasing }
    }

    /// Runs `f` with the context pointed at child `index` of the current widget.
    pub fn child<R>(&mut self, index: usize, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(index);
        let out = f(self);
        self.path.pop();
        out
    }

    /// Path of the widget currently being visited.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Claims `pointer` for the current widget until it is lifted.
    ///
    /// Returns `true` if no other pointer was holding the widget.
    pub fn claim(&mut self, pointer: PointerId) -> bool {
        let first = self.holders() == 0;
        self.claims.insert(pointer, self.path.clone());
        first
    }

    /// Number of pointers currently holding the current widget.
    pub fn holders(&self) -> usize {
        self.claims.values().filter(|p| **p == self.path).count()
    }

    /// True while dispatching a release of a pointer this widget claimed.
    pub fn owns_release(&self) -> bool {
        self.releasing.as_deref() == Some(self.path.as_slice())
    }
}
