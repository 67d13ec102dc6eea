//! Node links, flags and z-ordering keys

use super::NodeId;

/// Tree-level state of a node
///
/// Links and keys are maintained by [`super::UiTree`]; only the flags are
/// freely writable.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Own visibility; effective visibility also needs every ancestor visible
    pub visible: bool,
    /// Node takes part in pointer arbitration
    pub input_enabled: bool,
    pub(super) z_offset: i8,
    pub(super) inner_z_offset: u8,
    pub(super) z_key: u16,
    pub(super) inner_sum: u8,
    pub(super) outer_sum: i32,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) space: Option<NodeId>,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            visible: true,
            input_enabled: true,
            z_offset: 0,
            inner_z_offset: 0,
            z_key: ZKey::compose(0, 0),
            inner_sum: 0,
            outer_sum: 0,
            parent: None,
            children: Vec::new(),
            space: None,
        }
    }
}

impl Node {
    /// Outer z-offset relative to siblings
    pub fn z_offset(&self) -> i8 {
        self.z_offset
    }

    /// Inner z-offset, used to stack focused windows
    pub fn inner_z_offset(&self) -> u8 {
        self.inner_z_offset
    }

    /// Combined ordering key
    pub fn z_key(&self) -> u16 {
        self.z_key
    }

    /// Parent, if registered
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in registration order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Governing coordinate space
    pub fn space(&self) -> Option<NodeId> {
        self.space
    }

    /// Recompute accumulated offsets and the key from the parent's sums
    pub(super) fn inherit_z(&mut self, parent_inner: u8, parent_outer: i32) {
        self.inner_sum = parent_inner.saturating_add(self.inner_z_offset);
        self.outer_sum = parent_outer + i32::from(self.z_offset);
        self.z_key = ZKey::compose(self.inner_sum, self.outer_sum);
    }
}

/// Combined z-key layout
///
/// High byte: saturating sum of inner offsets along the ancestor chain.
/// Low byte: sum of outer offsets clamped to `i8` and biased by 128.
pub struct ZKey;

impl ZKey {
    /// Build a key from accumulated offsets
    pub fn compose(inner_sum: u8, outer_sum: i32) -> u16 {
        let outer = outer_sum.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) + 128;
        (u16::from(inner_sum) << 8) | outer as u16
    }

    /// Inner part of a key
    pub fn inner(key: u16) -> u8 {
        (key >> 8) as u8
    }

    /// Outer part of a key, unbiased
    pub fn outer(key: u16) -> i8 {
        ((key & 0xff) as i32 - 128) as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(ZKey::compose(0, 0), 128);
        assert_eq!(ZKey::compose(1, 0), 256 + 128);
        assert_eq!(ZKey::compose(0, -128), 0);
        assert_eq!(ZKey::compose(0, 500), 255);
        assert_eq!(ZKey::outer(ZKey::compose(3, -7)), -7);
        assert_eq!(ZKey::inner(ZKey::compose(3, -7)), 3);
    }

    #[test]
    fn test_inner_dominates_outer() {
        assert!(ZKey::compose(1, -128) > ZKey::compose(0, 127));
    }

    #[test]
    fn test_inherit_saturates() {
        let mut node = Node { inner_z_offset: 200, z_offset: -3, ..Node::default() };
        node.inherit_z(100, 5);
        assert_eq!(ZKey::inner(node.z_key()), 255);
        assert_eq!(ZKey::outer(node.z_key()), 2);
    }
}
