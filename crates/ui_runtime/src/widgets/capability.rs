//! Capabilities a widget can opt into
//!
//! Each trait corresponds to one pipeline pass. A widget's payload is taken
//! out of its node while the hook runs, so hooks may freely mutate the tree
//! (children, placements, visibility) without aliasing themselves.

use crate::pipeline::FrameContext;
use crate::tree::{NodeId, UiTree};
use super::QuadEmitter;

/// Computes a natural size from content during the size pass
///
/// Runs post-order: children are already sized when a parent is asked.
pub trait Sizable {
    /// Write the node's unscaled size (or read it back into the widget)
    fn update_size(&mut self, id: NodeId, tree: &mut UiTree);
}

/// Places child nodes during the layout pass
///
/// Runs after the node's own layout is resolved and before its children are.
pub trait Arranging {
    /// Adjust children's placements and visibility
    fn arrange(&mut self, id: NodeId, tree: &mut UiTree);
}

/// Emits quads during the depth pass
pub trait Drawable {
    /// Draw into the emitter, in unscaled node-local coordinates
    fn draw(&self, out: &mut QuadEmitter<'_>);
}

/// Reacts to input during the front-to-back input pass
pub trait Clickable {
    /// Read input and the resolved cursor owner, emit events
    fn handle_input(&mut self, id: NodeId, tree: &mut UiTree, ctx: &mut FrameContext<'_>);

    /// Drop any gesture in progress; runs on frames the node is hidden or
    /// has input disabled
    fn cancel_input(&mut self) {}
}
