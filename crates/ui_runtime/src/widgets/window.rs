//! Window widget - a frame that can be dragged by its header and resized by
//! its border

use crate::events::UiEventKind;
use crate::foundation::math::{Rect, Vec2, Vec4};
use crate::layout::{align_to_parent, CachedLayout, ParentAlignments};
use crate::pipeline::FrameContext;
use crate::render::MaterialId;
use crate::tree::{NodeId, UiTree};
use super::{Clickable, Drawable, QuadEmitter};

/// Border edges grabbed for a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEdges {
    /// Left edge follows the pointer
    pub left: bool,
    /// Right edge follows the pointer
    pub right: bool,
    /// Top edge follows the pointer
    pub top: bool,
    /// Bottom edge follows the pointer
    pub bottom: bool,
}

impl ResizeEdges {
    /// Edges within `border` of a local point on a box of half-size `half`
    pub fn at(local: Vec2, half: Vec2, border: f32) -> Self {
        let left = local.x <= -half.x + border;
        let top = local.y >= half.y - border;
        Self {
            left,
            right: !left && local.x >= half.x - border,
            top,
            bottom: !top && local.y <= -half.y + border,
        }
    }

    /// True if any edge is grabbed
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// What a primary-button drag is doing to the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// No drag in progress
    #[default]
    Idle,
    /// Moving the window
    Dragging,
    /// Moving some of the window's edges
    Resizing(ResizeEdges),
}

/// Movable, resizable frame
///
/// Dragging and resizing are entered on a primary press over the header or
/// border and both end as soon as the button is up, wherever the pointer is.
#[derive(Debug, Clone)]
pub struct Window {
    /// Height of the draggable header strip
    pub header_height: f32,
    /// Width of the resize border
    pub border: f32,
    /// Smallest unscaled size
    pub min_size: Vec2,
    /// Body color
    pub body_color: Vec4,
    /// Header color
    pub header_color: Vec4,
    /// Border color
    pub border_color: Vec4,
    /// Header drag enabled
    pub movable: bool,
    /// Border resize enabled
    pub resizable: bool,

    mode: WindowMode,
    last_pointer: Option<Vec2>,
}

impl Default for Window {
    fn default() -> Self {
        Self::new(4.0, Vec2::new(64.0, 48.0))
    }
}

impl Window {
    /// Create a window with a resize border and minimum size
    pub fn new(border: f32, min_size: Vec2) -> Self {
        Self {
            header_height: 20.0,
            border,
            min_size,
            body_color: Vec4::new(0.12, 0.12, 0.14, 0.95),
            header_color: Vec4::new(0.2, 0.25, 0.35, 1.0),
            border_color: Vec4::new(0.5, 0.5, 0.55, 1.0),
            movable: true,
            resizable: true,
            mode: WindowMode::Idle,
            last_pointer: None,
        }
    }

    /// Current drag mode
    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    /// Mode a primary press at `local` would enter
    fn mode_at(&self, local: Vec2, size: Vec2) -> WindowMode {
        let half = size * 0.5;
        let edges = if self.resizable { ResizeEdges::at(local, half, self.border) } else { ResizeEdges::default() };

        if edges.any() {
            WindowMode::Resizing(edges)
        } else if self.movable && local.y >= half.y - self.header_height {
            WindowMode::Dragging
        } else {
            WindowMode::Idle
        }
    }

    /// Move grabbed edges by an unscaled delta, keeping the others in place
    ///
    /// Returns true if the size changed.
    fn resize(&self, id: NodeId, tree: &mut UiTree, edges: ResizeEdges, delta: Vec2) -> bool {
        let parent = tree
            .parent(id)
            .and_then(|parent| tree.get(parent))
            .map(|entry| entry.placement.cached)
            .unwrap_or_default();
        let Some(entry) = tree.get_mut(id) else {
            return false;
        };
        let placement = &mut entry.placement;
        let scale = placement.cached.scale;

        let old = placement.unscaled_size;
        let mut size = old;
        if edges.right {
            size.x += delta.x;
        } else if edges.left {
            size.x -= delta.x;
        }
        if edges.top {
            size.y += delta.y;
        } else if edges.bottom {
            size.y -= delta.y;
        }
        let size = size.sup(&self.min_size);
        let grow = size - old;
        if grow.x == 0.0 && grow.y == 0.0 {
            return false;
        }

        let wanted = Vec2::new(
            if edges.right { grow.x * 0.5 } else if edges.left { -grow.x * 0.5 } else { 0.0 },
            if edges.top { grow.y * 0.5 } else if edges.bottom { -grow.y * 0.5 } else { 0.0 },
        );
        let induced = alignment_shift(&parent, placement.parent_alignment, old, size, scale);

        placement.offset += wanted - induced;
        placement.unscaled_size = size;
        true
    }
}

/// Unscaled center shift the parent alignment alone causes when a box grows
fn alignment_shift(
    parent: &CachedLayout,
    alignment: ParentAlignments,
    old: Vec2,
    new: Vec2,
    scale: f32,
) -> Vec2 {
    if scale <= 0.0 {
        return Vec2::zeros();
    }
    let before = align_to_parent(parent.position, parent.size, parent.padding, old * scale, alignment);
    let after = align_to_parent(parent.position, parent.size, parent.padding, new * scale, alignment);
    (after - before) / scale
}

impl Drawable for Window {
    fn draw(&self, out: &mut QuadEmitter<'_>) {
        let size = out.local_size();
        out.fill(MaterialId::SOLID, self.body_color);

        let header = self.header_height.min(size.y);
        let strip = Rect::new(Vec2::new(0.0, (size.y - header) * 0.5), Vec2::new(size.x, header));
        out.rect(&strip, MaterialId::SOLID, self.header_color);

        if self.resizable {
            out.border(self.border, MaterialId::SOLID, self.border_color);
        }
    }
}

impl Clickable for Window {
    fn handle_input(&mut self, id: NodeId, tree: &mut UiTree, ctx: &mut FrameContext<'_>) {
        let left = ctx.input.left();
        if !left.down && self.mode != WindowMode::Idle {
            log::trace!("Window {:?} left {:?}", id, self.mode);
            self.mode = WindowMode::Idle;
        }

        let Some(pointer) = ctx.plane_pointer(tree, id) else {
            self.last_pointer = None;
            return;
        };

        if left.pressed {
            let owner = ctx.arbiter.owner();
            if owner.is_some_and(|owner| tree.is_within(id, owner)) {
                let _ = tree.set_focus(id);
            }
            if owner == Some(id) {
                if let Some(entry) = tree.get(id) {
                    let local = entry.placement.cached.to_local(pointer);
                    self.mode = self.mode_at(local, entry.placement.unscaled_size);
                    self.last_pointer = Some(pointer);
                }
            }
        }

        if let Some(last) = self.last_pointer.filter(|_| left.down) {
            let scale = tree.get(id).map_or(0.0, |entry| entry.placement.cached.scale);
            let delta = if scale > 0.0 { (pointer - last) / scale } else { Vec2::zeros() };

            if delta != Vec2::zeros() {
                match self.mode {
                    WindowMode::Dragging => {
                        if let Some(entry) = tree.get_mut(id) {
                            entry.placement.offset += delta;
                            ctx.events.send(id, UiEventKind::Moved);
                        }
                    }
                    WindowMode::Resizing(edges) => {
                        if self.resize(id, tree, edges, delta) {
                            ctx.events.send(id, UiEventKind::Resized);
                        }
                    }
                    WindowMode::Idle => {}
                }
            }
        }

        self.last_pointer = Some(pointer);
    }

    fn cancel_input(&mut self) {
        self.mode = WindowMode::Idle;
        self.last_pointer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Placement;
    use crate::tree::NodeEntry;
    use crate::widgets::WidgetKind;
    use approx::assert_relative_eq;

    fn window_tree(placement: Placement) -> (UiTree, NodeId) {
        let mut tree = UiTree::new(NodeEntry::container());
        let mut placement = placement;
        placement.cached.scale = 1.0;
        let id = tree.insert(NodeEntry::new(WidgetKind::Window(Window::default())).with_placement(placement));
        tree.register(id, tree.root()).unwrap();
        (tree, id)
    }

    #[test]
    fn test_press_location_picks_mode() {
        let window = Window::default();
        let size = Vec2::new(100.0, 80.0);

        assert_eq!(window.mode_at(Vec2::new(0.0, 30.0), size), WindowMode::Dragging);
        assert_eq!(window.mode_at(Vec2::new(0.0, 0.0), size), WindowMode::Idle);
        assert_eq!(
            window.mode_at(Vec2::new(49.0, 0.0), size),
            WindowMode::Resizing(ResizeEdges { right: true, ..Default::default() })
        );
        assert_eq!(
            window.mode_at(Vec2::new(-49.0, -39.0), size),
            WindowMode::Resizing(ResizeEdges { left: true, bottom: true, ..Default::default() })
        );
    }

    #[test]
    fn test_resize_keeps_opposite_edge() {
        let (mut tree, id) = window_tree(Placement::sized(100.0, 80.0));
        let window = Window::default();

        assert!(window.resize(id, &mut tree, ResizeEdges { right: true, ..Default::default() }, Vec2::new(10.0, 0.0)));
        let placement = &tree.get(id).unwrap().placement;
        assert_relative_eq!(placement.unscaled_size, Vec2::new(110.0, 80.0));
        assert_relative_eq!(placement.offset, Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_resize_respects_min_size() {
        let (mut tree, id) = window_tree(Placement::sized(100.0, 80.0));
        let window = Window::default();

        window.resize(id, &mut tree, ResizeEdges { left: true, ..Default::default() }, Vec2::new(200.0, 0.0));
        let placement = &tree.get(id).unwrap().placement;
        assert_relative_eq!(placement.unscaled_size.x, 64.0);
        // Right edge stays at +50
        assert_relative_eq!(placement.offset.x + 32.0, 50.0);
    }

    #[test]
    fn test_resize_compensates_edge_alignment() {
        let placement = Placement::sized(100.0, 80.0)
            .with_alignment(ParentAlignments::LEFT | ParentAlignments::INNER_H);
        let (mut tree, id) = window_tree(placement);
        let window = Window::default();

        window.resize(id, &mut tree, ResizeEdges { right: true, ..Default::default() }, Vec2::new(10.0, 0.0));
        // Alignment already moves the center by half the growth
        assert_relative_eq!(tree.get(id).unwrap().placement.offset.x, 0.0);
    }
}
