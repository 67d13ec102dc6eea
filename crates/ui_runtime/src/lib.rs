//! # UI Runtime
//!
//! A retained-mode UI runtime for games: a tree of nodes laid out every frame,
//! drawn into flat screen space or onto planes anchored in the 3D world.
//!
//! ## Features
//!
//! - **Layout**: bottom-up sizing and top-down alignment against parent boxes
//! - **Cursor Capture**: exactly one pointer owner per frame, across spaces
//! - **Rich Text**: incremental word wrapping that only rewraps edited lines
//! - **Widgets**: panels, labels, buttons, text fields, sliders, scroll boxes,
//!   windows, list boxes and dropdowns
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use ui_runtime::prelude::*;
//!
//! fn main() -> Result<(), UiError> {
//!     let mut ui = Ui::new(Rc::new(MonospaceMetrics::default()), UiConfig::default())?;
//!     let button = ui.add_button(ui.root(), "Start")?;
//!
//!     let mut sink = RecordingSink::new();
//!     ui.advance_frame(&HostView::default(), &InputSnapshot::at(640.0, 360.0), &mut sink);
//!
//!     for event in ui.drain_events() {
//!         if event.source == button && event.kind == UiEventKind::Clicked {
//!             println!("clicked");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod input;
pub mod render;
pub mod events;
pub mod text;
pub mod tree;
pub mod layout;
pub mod space;
pub mod cursor;
pub mod pipeline;
pub mod widgets;

mod ui;

pub use ui::{Ui, UiError};

/// Common imports for runtime users
pub mod prelude {
    pub use crate::{
        Ui, UiError,
        config::{Config, ConfigError, ConfigFormat, UiConfig},
        cursor::CursorFlags,
        events::{UiEvent, UiEventKind},
        foundation::math::{Mat4, Rect, Vec2, Vec3, Vec4},
        input::{ButtonState, EditKey, InputSnapshot, InputTracker, MouseButton},
        layout::{DimAlignments, ParentAlignments, Placement},
        pipeline::FrameReport,
        render::{MaterialId, QuadCommand, RecordingSink, RenderSink},
        space::{HostView, SpaceKind, SpaceNode},
        text::{GlyphFormat, GlyphMetrics, MonospaceMetrics, RichText, TextMode},
        tree::{NodeEntry, NodeId, TreeError, UiTree},
        widgets::{ScrollAxis, Slider, WidgetKind},
    };
}
