//! Spincube UI: an immediate widget tree on top of `spincube-engine`.
//!
//! The tree is rebuilt every frame. Retained interaction state (which pointer
//! started a press, and where) lives in [`UiScene`], so a press-and-hold
//! button keeps working even though its widget is recreated each frame.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use spincube_ui::prelude::*;
//!
//! let mut ui = UiScene::new();
//!
//! // In your frame callback:
//! let input = UiInput::from_engine(ctx.input, ctx.input_frame);
//! let draw_list = ui.frame(
//!     Column::new()
//!         .cross_align(Align::Center)
//!         .child(Button::new(Text::new("Start", font, 18.0, Color::WHITE))
//!             .accessibility_label("Start")
//!             .on_click(|| log::info!("start"))),
//!     viewport,
//!     &input,
//! );
//! // Pass draw_list to the rect and text renderers.
//! ```

pub mod constraints;
pub mod event;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

/// Everything needed to build and extend UI.
pub mod prelude {
    pub use crate::constraints::{Constraints, Edges, LayoutCtx};
    pub use crate::event::{EventCtx, EventResult, UiEvent, WidgetPath};
    pub use crate::painter::{AccessNode, Painter};
    pub use crate::scene::{UiInput, UiScene};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        button::Button,
        container::Container,
        flex::{Align, Column, Row},
        stack::{AnchorVal, SizeHint, Stack, StackItem},
        text::Text,
    };

    pub use spincube_engine::coords::{Rect, Vec2};
    pub use spincube_engine::paint::Color;
    pub use spincube_engine::scene::shapes::Border;
    pub use spincube_engine::text::FontId;
}
