//! Pointer capture arbitration
//!
//! Exactly one node may own the pointer per frame. The arbiter is reset once
//! at frame start, collects offers during the back-to-front depth pass and is
//! read-only during the input pass.

use crate::foundation::math::{Rect, Vec2};
use crate::tree::NodeId;

/// Per-node cursor behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorFlags {
    /// Node competes for pointer ownership
    pub captures_exclusively: bool,
    /// Moused-over descendants keep their own claims instead of deferring here
    pub shares_with_children: bool,
    /// Pointer was over the node's padded bounds this frame
    pub moused_over: bool,
}

impl CursorFlags {
    /// Flags for a node that takes the pointer but lets children take it first
    pub fn capturing() -> Self {
        Self { captures_exclusively: true, shares_with_children: true, moused_over: false }
    }

    /// Flags for a leaf control that owns the pointer outright
    pub fn exclusive() -> Self {
        Self { captures_exclusively: true, shares_with_children: false, moused_over: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Claim {
    node: NodeId,
    space: NodeId,
    depth: f32,
}

/// Holder of the capture token
#[derive(Debug, Clone)]
pub struct CursorArbiter {
    claim: Option<Claim>,
    previous_owner: Option<NodeId>,
    min_hit_size: f32,
}

impl CursorArbiter {
    /// Create an arbiter; hit boxes are padded to `min_hit_size`
    pub fn new(min_hit_size: f32) -> Self {
        Self { claim: None, previous_owner: None, min_hit_size }
    }

    /// Release the token; called once per frame before the depth pass
    pub fn reset(&mut self) {
        self.previous_owner = self.owner();
        self.claim = None;
    }

    /// Offer ownership to a moused-over node
    ///
    /// Offers arrive back to front. A claim in the same space as the pending
    /// owner always replaces it; across spaces the nearer one wins.
    pub fn offer(&mut self, node: NodeId, space: NodeId, depth: f32) -> bool {
        let replace = match self.claim {
            None => true,
            Some(pending) => pending.space == space || depth < pending.depth,
        };

        if replace {
            self.claim = Some(Claim { node, space, depth });
        }
        replace
    }

    /// Current owner
    pub fn owner(&self) -> Option<NodeId> {
        self.claim.map(|claim| claim.node)
    }

    /// Owner at the end of the previous frame
    pub fn previous_owner(&self) -> Option<NodeId> {
        self.previous_owner
    }

    /// True when `node` holds the token
    pub fn is_owner(&self, node: NodeId) -> bool {
        self.owner() == Some(node)
    }

    /// Space of the current owner
    pub fn captured_space(&self) -> Option<NodeId> {
        self.claim.map(|claim| claim.space)
    }

    /// Minimum hit box edge
    pub fn min_hit_size(&self) -> f32 {
        self.min_hit_size
    }

    /// Change the minimum hit box edge
    pub fn set_min_hit_size(&mut self, min_hit_size: f32) {
        self.min_hit_size = min_hit_size;
    }

    /// Pointer test against bounds padded to the minimum hit size
    pub fn hit_test(&self, bounds: &Rect, pointer: Vec2) -> bool {
        bounds.padded_to(self.min_hit_size).contains(pointer)
    }
}
