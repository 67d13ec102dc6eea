//! Per-frame update pipeline
//!
//! Every frame runs four passes over the node tree:
//!
//! 1. **Size** (post-order): self-measuring widgets compute natural sizes
//! 2. **Layout** (pre-order): spaces refresh their projection, nodes resolve
//!    their cached layout, arranging widgets place their children
//! 3. **Depth** (back to front): nodes draw and hit-test; the arbiter picks
//!    the pointer owner
//! 4. **Input** (front to back): widgets read input and the resolved owner
//!
//! Passes 3 and 4 walk the cached draw order, sorted by (z-key, pre-order
//! index) and rebuilt only when the tree reports a structure change.

mod order;
mod passes;

#[cfg(test)]
mod tests;

pub use order::DrawOrder;
pub(crate) use passes::{depth_pass, input_pass, layout_pass, size_pass};

use crate::config::UiConfig;
use crate::cursor::CursorArbiter;
use crate::events::EventQueue;
use crate::foundation::math::Vec2;
use crate::input::InputSnapshot;
use crate::space::HostView;
use crate::tree::{NodeId, UiTree};

/// Explicit per-frame state handed to every pass
#[derive(Debug)]
pub struct FrameContext<'a> {
    /// Frame number, starting at 1
    pub frame: u64,
    /// Host camera and viewport
    pub view: &'a HostView,
    /// Host input for this frame
    pub input: &'a InputSnapshot,
    /// Runtime tunables
    pub config: &'a UiConfig,
    /// Capture token holder
    pub arbiter: &'a mut CursorArbiter,
    /// Frame-local event queue
    pub events: &'a mut EventQueue,
    /// Node receiving typed characters and edit keys
    pub keyboard_focus: &'a mut Option<NodeId>,
}

impl FrameContext<'_> {
    /// Pointer in the plane of the space governing `id`
    pub fn plane_pointer(&self, tree: &UiTree, id: NodeId) -> Option<Vec2> {
        if !self.input.pointer_visible {
            return None;
        }
        let space = tree.space_of(id)?;
        tree.get(space)?.kind.as_space()?.cursor().map(|cursor| cursor.plane)
    }

    /// Pointer in unscaled coordinates centered on `id`
    pub fn local_pointer(&self, tree: &UiTree, id: NodeId) -> Option<Vec2> {
        let plane = self.plane_pointer(tree, id)?;
        Some(tree.get(id)?.placement.cached.to_local(plane))
    }
}

/// Summary of one call to [`crate::Ui::advance_frame`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame number
    pub frame: u64,
    /// Nodes visited by the depth pass
    pub drawn: usize,
    /// Capture owner when the depth pass began; always `None`
    pub owner_at_depth_start: Option<NodeId>,
    /// Capture owner after the depth pass
    pub owner: Option<NodeId>,
    /// The draw order was rebuilt this frame
    pub full_reorder: bool,
}
