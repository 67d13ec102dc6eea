//! Node tree
//!
//! Nodes live in a generational arena and refer to each other by [`NodeId`].
//! Parent and child links are plain fields kept consistent by [`UiTree`]: a
//! node's parent always lists it exactly once among its children.

mod node;

pub use node::{Node, ZKey};

use std::fmt::Write as _;

use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

use crate::cursor::CursorFlags;
use crate::layout::Placement;
use crate::widgets::WidgetKind;

new_key_type! {
    /// Stable handle to a node; stale after the node is destroyed
    pub struct NodeId;
}

/// Structural misuse of the tree
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Handle doesn't name a live node
    #[error("Invalid node: {0:?}")]
    InvalidNode(NodeId),
    /// Node offered as its own parent
    #[error("Node {0:?} cannot be its own parent")]
    SelfParent(NodeId),
    /// Node already has a parent
    #[error("Node {node:?} is already registered to {parent:?}")]
    AlreadyRegistered {
        /// Node being registered
        node: NodeId,
        /// Its current parent
        parent: NodeId,
    },
    /// Registration would make a node its own ancestor
    #[error("Registering {node:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Node being registered
        node: NodeId,
        /// Requested parent, a descendant of `node`
        parent: NodeId,
    },
    /// Child isn't owned by the given parent
    #[error("Node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// Claimed parent
        parent: NodeId,
        /// Claimed child
        child: NodeId,
    },
    /// The root can't be moved or destroyed
    #[error("The root node cannot be detached")]
    RootImmutable,
}

/// Everything stored per node
///
/// Links and the widget kind are owned by the tree: read them through
/// [`NodeEntry::node`] and [`NodeEntry::kind`], change them through
/// [`UiTree`] so parent lists and inherited spaces stay in step.
#[derive(Debug)]
pub struct NodeEntry {
    pub(crate) node: Node,
    /// Size, alignment and cached layout
    pub placement: Placement,
    /// Cursor arbitration flags
    pub cursor: CursorFlags,
    pub(crate) kind: WidgetKind,
}

impl NodeEntry {
    /// Entry for a widget, with the widget's default cursor behaviour
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            node: Node::default(),
            placement: Placement::default(),
            cursor: kind.default_cursor_flags(),
            kind,
        }
    }

    /// Plain grouping node
    pub fn container() -> Self {
        Self::new(WidgetKind::Container)
    }

    /// Builder: placement
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Builder: cursor flags
    pub fn with_cursor(mut self, cursor: CursorFlags) -> Self {
        self.cursor = cursor;
        self
    }

    /// Links, flags and z-key
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Widget payload
    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }
}

/// Arena of nodes with a fixed root
#[derive(Debug)]
pub struct UiTree {
    nodes: SlotMap<NodeId, NodeEntry>,
    root: NodeId,
    in_frame: bool,
    structure_changed: bool,
    pending_structure_change: bool,
}

impl UiTree {
    /// Create a tree whose root holds `root`
    pub fn new(root: NodeEntry) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(root);

        let mut tree = Self {
            nodes,
            root,
            in_frame: false,
            structure_changed: true,
            pending_structure_change: false,
        };
        tree.refresh_inherited(root);
        tree
    }

    /// Root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, attached or not
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root always exists
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True if the handle names a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Entry of a node
    pub fn get(&self, id: NodeId) -> Option<&NodeEntry> {
        self.nodes.get(id)
    }

    /// Mutable entry of a node
    ///
    /// Only placement, cursor flags and the widget's own state are writable
    /// from here; use the tree operations to change links, flags, z-offsets
    /// and the widget kind.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeEntry> {
        self.nodes.get_mut(id)
    }

    fn entry(&self, id: NodeId) -> Result<&NodeEntry, TreeError> {
        self.nodes.get(id).ok_or(TreeError::InvalidNode(id))
    }

    fn entry_mut(&mut self, id: NodeId) -> Result<&mut NodeEntry, TreeError> {
        self.nodes.get_mut(id).ok_or(TreeError::InvalidNode(id))
    }

    /// Add a detached node
    pub fn insert(&mut self, entry: NodeEntry) -> NodeId {
        let id = self.nodes.insert(entry);
        self.refresh_inherited(id);
        id
    }

    /// Attach a detached node as the last child of `parent`
    pub fn register(&mut self, id: NodeId, parent: NodeId) -> Result<(), TreeError> {
        let current = self.entry(id)?.node.parent;
        self.entry(parent)?;

        if id == parent {
            return Err(TreeError::SelfParent(id));
        }
        if id == self.root {
            return Err(TreeError::RootImmutable);
        }
        if let Some(existing) = current {
            return Err(TreeError::AlreadyRegistered { node: id, parent: existing });
        }
        if self.is_ancestor(id, parent) {
            return Err(TreeError::WouldCreateCycle { node: id, parent });
        }

        self.entry_mut(parent)?.node.children.push(id);
        self.entry_mut(id)?.node.parent = Some(parent);
        self.refresh_inherited(id);
        self.mark_structure_changed();

        log::debug!("Registered {:?} under {:?}", id, parent);
        Ok(())
    }

    /// Detach a node from its parent; no-op when already detached
    pub fn unregister(&mut self, id: NodeId) -> Result<(), TreeError> {
        if id == self.root {
            return Err(TreeError::RootImmutable);
        }
        let Some(parent) = self.entry(id)?.node.parent else {
            return Ok(());
        };

        self.entry_mut(parent)?.node.children.retain(|&child| child != id);
        self.entry_mut(id)?.node.parent = None;
        self.refresh_inherited(id);
        self.mark_structure_changed();

        log::debug!("Unregistered {:?} from {:?}", id, parent);
        Ok(())
    }

    /// Detach `child`, failing unless `parent` owns it
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        self.entry(parent)?;
        if self.entry(child)?.node.parent != Some(parent) {
            return Err(TreeError::NotAChild { parent, child });
        }
        self.unregister(child)
    }

    /// Detach a node and free it together with its whole subtree
    pub fn destroy(&mut self, id: NodeId) -> Result<Vec<NodeEntry>, TreeError> {
        self.unregister(id)?;

        let mut freed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(entry) = self.nodes.remove(next) {
                stack.extend(entry.node.children.iter().copied());
                freed.push(entry);
            }
        }

        log::debug!("Destroyed {:?} ({} node(s))", id, freed.len());
        Ok(freed)
    }

    /// Move a node to the end of its siblings so it draws and updates last
    pub fn set_focus(&mut self, id: NodeId) -> Result<(), TreeError> {
        let Some(parent) = self.entry(id)?.node.parent else {
            return Ok(());
        };

        let children = &mut self.entry_mut(parent)?.node.children;
        if children.last() == Some(&id) {
            return Ok(());
        }
        children.retain(|&child| child != id);
        children.push(id);
        self.mark_structure_changed();
        Ok(())
    }

    /// Set a node's own visibility flag
    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<(), TreeError> {
        self.entry_mut(id)?.node.visible = visible;
        Ok(())
    }

    /// Own flag AND every ancestor's flag
    pub fn is_visible_effective(&self, id: NodeId) -> bool {
        let mut next = Some(id);
        while let Some(current) = next {
            match self.nodes.get(current) {
                Some(entry) if entry.node.visible => next = entry.node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Enable or disable pointer input for a node
    pub fn set_input_enabled(&mut self, id: NodeId, enabled: bool) -> Result<(), TreeError> {
        self.entry_mut(id)?.node.input_enabled = enabled;
        Ok(())
    }

    /// Change the outer z-offset and rekey the subtree
    pub fn set_z_offset(&mut self, id: NodeId, offset: i8) -> Result<(), TreeError> {
        let node = &mut self.entry_mut(id)?.node;
        if node.z_offset != offset {
            node.z_offset = offset;
            self.refresh_inherited(id);
            self.mark_structure_changed();
        }
        Ok(())
    }

    /// Change the inner z-offset and rekey the subtree
    pub fn set_inner_z_offset(&mut self, id: NodeId, offset: u8) -> Result<(), TreeError> {
        let node = &mut self.entry_mut(id)?.node;
        if node.inner_z_offset != offset {
            node.inner_z_offset = offset;
            self.refresh_inherited(id);
            self.mark_structure_changed();
        }
        Ok(())
    }

    /// Replace a node's widget, returning the old one
    ///
    /// Cursor flags reset to the new kind's defaults. Gaining or losing a
    /// space root re-derives the space of the whole subtree.
    pub fn set_kind(&mut self, id: NodeId, kind: WidgetKind) -> Result<WidgetKind, TreeError> {
        let name = kind.name();
        let entry = self.entry_mut(id)?;
        entry.cursor = kind.default_cursor_flags();
        let old = std::mem::replace(&mut entry.kind, kind);

        if old.is_space() || entry.kind.is_space() {
            self.refresh_inherited(id);
            self.mark_structure_changed();
        }
        log::debug!("Node {:?} is now a {} (was {})", id, name, old.name());
        Ok(old)
    }

    /// Combined z-key of a node
    pub fn z_key(&self, id: NodeId) -> Option<u16> {
        self.nodes.get(id).map(|entry| entry.node.z_key)
    }

    /// Parent of a node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.node.parent
    }

    /// Children of a node, empty for unknown handles
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |entry| entry.node.children.as_slice())
    }

    /// Governing coordinate space of a node
    pub fn space_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.node.space
    }

    /// Ancestors from the parent up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// True if `ancestor` lies strictly above `id`
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        self.ancestors(id).any(|current| current == ancestor)
    }

    /// True if `id` is `ancestor` or lies below it
    pub fn is_within(&self, ancestor: NodeId, id: NodeId) -> bool {
        id == ancestor || self.is_ancestor(ancestor, id)
    }

    /// True if the node is connected to the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.is_within(self.root, id)
    }

    /// Subtree in pre-order, parents before children
    pub fn preorder(&self, from: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if let Some(entry) = self.nodes.get(id) {
                order.push(id);
                stack.extend(entry.node.children.iter().rev().copied());
            }
        }
        order
    }

    /// Open the frame window; registrations inside it take effect next frame
    pub fn begin_frame(&mut self) {
        self.in_frame = true;
    }

    /// Close the frame window and publish structure changes made inside it
    pub fn end_frame(&mut self) {
        self.in_frame = false;
        if std::mem::take(&mut self.pending_structure_change) {
            self.structure_changed = true;
        }
    }

    /// True while inside the frame window
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// Read and clear the structure-changed flag
    pub fn take_structure_changed(&mut self) -> bool {
        std::mem::take(&mut self.structure_changed)
    }

    fn mark_structure_changed(&mut self) {
        if self.in_frame {
            self.pending_structure_change = true;
        } else {
            self.structure_changed = true;
        }
    }

    /// Recompute inherited space and z-keys for a subtree
    fn refresh_inherited(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let parent = self.nodes.get(current).and_then(|entry| entry.node.parent);
            let (space, inner, outer) = match parent.and_then(|p| self.nodes.get(p)) {
                Some(parent) => (parent.node.space, parent.node.inner_sum, parent.node.outer_sum),
                None => (None, 0, 0),
            };

            if let Some(entry) = self.nodes.get_mut(current) {
                entry.node.space = if entry.kind.is_space() { Some(current) } else { space };
                entry.node.inherit_z(inner, outer);
                stack.extend(entry.node.children.iter().copied());
            }
        }
    }

    /// Indented outline of the attached tree
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(self.root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let Some(entry) = self.nodes.get(id) else {
                continue;
            };
            let cached = &entry.placement.cached;
            let _ = writeln!(
                out,
                "{:indent$}{} {:?} z={:#06x}{} pos=({:.1}, {:.1}) size=({:.1}, {:.1})",
                "",
                entry.kind.name(),
                id,
                entry.node.z_key,
                if entry.node.visible { "" } else { " hidden" },
                cached.position.x,
                cached.position.y,
                cached.size.x,
                cached.size.y,
                indent = depth * 2,
            );
            stack.extend(entry.node.children.iter().rev().map(|&child| (child, depth + 1)));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> UiTree {
        UiTree::new(NodeEntry::container())
    }

    fn add(tree: &mut UiTree, parent: NodeId) -> NodeId {
        let id = tree.insert(NodeEntry::container());
        tree.register(id, parent).unwrap();
        id
    }

    /// Every live node is listed by its parent exactly once and by nobody else
    fn assert_links_consistent(tree: &UiTree) {
        for (id, entry) in &tree.nodes {
            if let Some(parent) = entry.node.parent {
                let count = tree.children(parent).iter().filter(|&&c| c == id).count();
                assert_eq!(count, 1, "{id:?} listed {count} times by its parent");
            }
            for (other, other_entry) in &tree.nodes {
                if Some(other) != entry.node.parent {
                    assert!(!other_entry.node.children.contains(&id));
                }
            }
        }
    }

    #[test]
    fn test_register_and_unregister() {
        let mut tree = tree();
        let root = tree.root();
        let a = add(&mut tree, root);
        let b = add(&mut tree, a);

        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.children(root), &[a]);
        assert!(tree.is_ancestor(root, b));
        assert_eq!(tree.ancestors(b).collect::<Vec<_>>(), vec![a, root]);

        tree.unregister(b).unwrap();
        assert_eq!(tree.parent(b), None);
        assert!(tree.children(a).is_empty());

        // Already detached
        tree.unregister(b).unwrap();
        assert_links_consistent(&tree);
    }

    #[test]
    fn test_structural_misuse_leaves_tree_untouched() {
        let mut tree = tree();
        let root = tree.root();
        let a = add(&mut tree, root);
        let b = add(&mut tree, a);
        let stray = tree.insert(NodeEntry::container());

        assert_eq!(tree.register(a, a), Err(TreeError::SelfParent(a)));
        assert_eq!(tree.register(b, root), Err(TreeError::AlreadyRegistered { node: b, parent: a }));
        assert_eq!(tree.register(root, a), Err(TreeError::RootImmutable));
        assert_eq!(tree.remove_child(root, b), Err(TreeError::NotAChild { parent: root, child: b }));

        tree.unregister(a).unwrap();
        assert_eq!(tree.register(a, b), Err(TreeError::WouldCreateCycle { node: a, parent: b }));
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.children(b), &[] as &[NodeId]);

        tree.destroy(stray).unwrap();
        assert_eq!(tree.register(stray, root), Err(TreeError::InvalidNode(stray)));
        assert_links_consistent(&tree);
    }

    #[test]
    fn test_links_stay_consistent_under_churn() {
        let mut tree = tree();
        let root = tree.root();
        let mut ids = vec![root];
        for i in 0..24 {
            let parent = ids[(i * 7) % ids.len()];
            ids.push(add(&mut tree, parent));
        }
        for (i, &id) in ids.iter().enumerate().skip(1) {
            if i % 3 == 0 {
                tree.unregister(id).unwrap();
                let _ = tree.register(id, ids[(i * 5 + 1) % i]);
            }
        }
        assert_links_consistent(&tree);
    }

    #[test]
    fn test_destroy_frees_subtree() {
        let mut tree = tree();
        let root = tree.root();
        let a = add(&mut tree, root);
        let b = add(&mut tree, a);
        let c = add(&mut tree, b);

        let freed = tree.destroy(a).unwrap();
        assert_eq!(freed.len(), 3);
        assert!(!tree.contains(c));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.destroy(root).unwrap_err(), TreeError::RootImmutable);
    }

    #[test]
    fn test_focus_moves_to_end() {
        let mut tree = tree();
        let root = tree.root();
        let a = add(&mut tree, root);
        let b = add(&mut tree, root);
        let c = add(&mut tree, root);

        tree.set_focus(a).unwrap();
        assert_eq!(tree.children(root), &[b, c, a]);
    }

    #[test]
    fn test_visibility_cascades() {
        let mut tree = tree();
        let root = tree.root();
        let a = add(&mut tree, root);
        let b = add(&mut tree, a);

        assert!(tree.is_visible_effective(b));
        tree.set_visible(a, false).unwrap();
        assert!(tree.get(b).unwrap().node.visible);
        assert!(!tree.is_visible_effective(b));
    }

    #[test]
    fn test_z_keys_follow_ancestors() {
        let mut tree = tree();
        let root = tree.root();
        let window = add(&mut tree, root);
        let child = add(&mut tree, window);

        tree.set_inner_z_offset(window, 1).unwrap();
        tree.set_z_offset(child, -2).unwrap();
        assert_eq!(tree.z_key(window), Some(ZKey::compose(1, 0)));
        assert_eq!(tree.z_key(child), Some(ZKey::compose(1, -2)));
        assert!(tree.z_key(child) > tree.z_key(root));

        // Moving the subtree rekeys it
        tree.unregister(window).unwrap();
        assert_eq!(tree.z_key(child), Some(ZKey::compose(1, -2)));
        tree.set_z_offset(window, 5).unwrap();
        assert_eq!(tree.z_key(child), Some(ZKey::compose(1, 3)));
    }

    #[test]
    fn test_set_kind_refreshes_inherited_space() {
        use crate::space::SpaceNode;
        use crate::widgets::Panel;

        let mut tree = tree();
        let root = tree.root();
        let a = add(&mut tree, root);
        let b = add(&mut tree, a);
        let c = add(&mut tree, b);
        assert_eq!(tree.space_of(c), None);
        tree.take_structure_changed();

        let old = tree.set_kind(a, WidgetKind::Space(SpaceNode::screen())).unwrap();
        assert!(matches!(old, WidgetKind::Container));
        assert_eq!(tree.space_of(a), Some(a));
        assert_eq!(tree.space_of(c), Some(a));
        assert!(tree.get(a).unwrap().kind().is_space());
        assert!(tree.take_structure_changed());

        // Plain payload swaps keep the space and the draw order
        tree.set_kind(b, WidgetKind::Panel(Panel::default())).unwrap();
        assert_eq!(tree.space_of(c), Some(a));
        assert!(!tree.take_structure_changed());

        tree.set_kind(a, WidgetKind::Container).unwrap();
        assert_eq!(tree.space_of(c), None);
        assert_eq!(tree.set_kind(NodeId::default(), WidgetKind::Container).unwrap_err(), TreeError::InvalidNode(NodeId::default()));
    }

    #[test]
    fn test_structure_change_inside_frame_is_deferred() {
        let mut tree = tree();
        let root = tree.root();
        assert!(tree.take_structure_changed());

        add(&mut tree, root);
        assert!(tree.take_structure_changed());

        tree.begin_frame();
        add(&mut tree, root);
        assert!(!tree.take_structure_changed());
        tree.end_frame();
        assert!(tree.take_structure_changed());
        assert!(!tree.take_structure_changed());
    }

    #[test]
    fn test_debug_dump_indents_children() {
        let mut tree = tree();
        let root = tree.root();
        let a = add(&mut tree, root);
        add(&mut tree, a);

        let dump = tree.debug_dump();
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Container"));
        assert!(lines[2].starts_with("    Container"));
    }
}
