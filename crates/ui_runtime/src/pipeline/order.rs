//! Cached draw order

use crate::tree::{NodeId, UiTree};

/// Attached nodes sorted back to front by (z-key, pre-order index)
///
/// Includes hidden nodes so visibility changes never force a rebuild.
#[derive(Debug, Default, Clone)]
pub struct DrawOrder {
    nodes: Vec<NodeId>,
}

impl DrawOrder {
    /// Create an empty order
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute from the tree
    pub fn rebuild(&mut self, tree: &UiTree) {
        let mut keyed: Vec<(u16, usize, NodeId)> = tree
            .preorder(tree.root())
            .into_iter()
            .enumerate()
            .map(|(index, id)| (tree.z_key(id).unwrap_or_default(), index, id))
            .collect();
        keyed.sort_unstable_by_key(|&(z_key, index, _)| (z_key, index));

        self.nodes = keyed.into_iter().map(|(_, _, id)| id).collect();
        log::trace!("Rebuilt draw order for {} node(s)", self.nodes.len());
    }

    /// Nodes back to front
    pub fn back_to_front(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of ordered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True before the first rebuild
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
