//! The four per-frame passes

use std::collections::HashSet;

use crate::events::UiEventKind;
use crate::foundation::math::{finite_or_zero, sanitize_size, Vec2};
use crate::layout::{resolve, CachedLayout};
use crate::render::RenderSink;
use crate::tree::{NodeId, UiTree};
use crate::widgets::{QuadEmitter, WidgetKind};
use super::{DrawOrder, FrameContext};

/// Run `f` with a node's widget taken out of the tree
///
/// Space payloads stay in place: the tree reads them to resolve governing
/// spaces, and no space hook needs the tree.
fn with_kind<R>(tree: &mut UiTree, id: NodeId, f: impl FnOnce(&mut WidgetKind, &mut UiTree) -> R) -> Option<R> {
    let entry = tree.get_mut(id)?;
    if entry.kind.is_space() {
        return None;
    }

    let mut kind = std::mem::take(&mut entry.kind);
    let result = f(&mut kind, tree);
    if let Some(entry) = tree.get_mut(id) {
        entry.kind = kind;
    }
    Some(result)
}

/// Bottom-up natural sizes
///
/// Hidden nodes are measured too, so scroll members outside the visible
/// window report current sizes.
pub(crate) fn size_pass(tree: &mut UiTree) {
    let order = tree.preorder(tree.root());
    for &id in order.iter().rev() {
        with_kind(tree, id, |kind, tree| kind.update_size(id, tree));
    }
}

/// Top-down layout resolution
///
/// Returns the nodes that are effectively visible this frame: own flag and
/// every ancestor's set, and no culled space above them.
pub(crate) fn layout_pass(tree: &mut UiTree, ctx: &FrameContext<'_>) -> HashSet<NodeId> {
    let pointer = ctx.input.pointer_visible.then_some(ctx.input.pointer);
    let mut visible = HashSet::new();
    let mut stack = vec![(tree.root(), CachedLayout::default())];

    while let Some((id, parent)) = stack.pop() {
        let Some(entry) = tree.get_mut(id) else {
            continue;
        };
        if !entry.node.visible {
            continue;
        }

        let layout = if let WidgetKind::Space(space) = &mut entry.kind {
            space.refresh(ctx.view, pointer, ctx.config.screen_plane_distance);
            if space.culled() {
                log::trace!("Space {:?} culled", id);
                continue;
            }
            if let Some(viewport) = space.viewport_size(ctx.view) {
                entry.placement.unscaled_size = sanitize_size(viewport);
            }

            // A space is the origin of its own plane
            let placement = &mut entry.placement;
            let scale = finite_or_zero(placement.scale).max(0.0);
            placement.cached = CachedLayout {
                position: Vec2::zeros(),
                size: sanitize_size(placement.unscaled_size * scale),
                padding: sanitize_size(placement.padding * scale),
                scale,
            };
            placement.cached
        } else {
            resolve(&mut entry.placement, &parent)
        };

        visible.insert(id);
        with_kind(tree, id, |kind, tree| kind.arrange(id, tree));

        // Children are read after arranging, which may toggle their visibility
        stack.extend(tree.children(id).iter().rev().map(|&child| (child, layout)));
    }

    visible
}

/// Back-to-front drawing and capture arbitration
///
/// Returns the number of nodes visited.
pub(crate) fn depth_pass(
    tree: &mut UiTree,
    order: &DrawOrder,
    visible: &HashSet<NodeId>,
    ctx: &mut FrameContext<'_>,
    sink: &mut dyn RenderSink,
) -> usize {
    let mut drawn = 0;

    for &id in order.back_to_front() {
        let shown = visible.contains(&id);
        let over = shown && pointer_over(tree, id, ctx);
        if let Some(entry) = tree.get_mut(id) {
            entry.cursor.moused_over = over;
        }
        if shown {
            draw_node(tree, id, sink);
            drawn += 1;
        }
    }

    // Offers need every ancestor's hover flag, so they follow drawing
    for &id in order.back_to_front() {
        if !visible.contains(&id) || !competes(tree, id) {
            continue;
        }

        let target = capture_target(tree, id);
        let Some(space) = tree.space_of(target) else {
            continue;
        };
        let depth = tree
            .get(space)
            .and_then(|entry| entry.kind.as_space())
            .and_then(|space| space.cursor())
            .map(|cursor| cursor.depth);

        if let Some(depth) = depth {
            if ctx.arbiter.offer(target, space, depth) {
                log::trace!("{:?} claimed the cursor (offered by {:?})", target, id);
            }
        }
    }

    drawn
}

/// Front-to-back input handling
pub(crate) fn input_pass(
    tree: &mut UiTree,
    order: &DrawOrder,
    visible: &HashSet<NodeId>,
    ctx: &mut FrameContext<'_>,
) {
    let previous = ctx.arbiter.previous_owner();
    let owner = ctx.arbiter.owner();
    if previous != owner {
        if let Some(previous) = previous.filter(|&node| tree.contains(node)) {
            ctx.events.send(previous, UiEventKind::CursorExited);
        }
        if let Some(owner) = owner {
            ctx.events.send(owner, UiEventKind::CursorEntered);
        }
    }

    for &id in order.back_to_front().iter().rev() {
        if visible.contains(&id) && tree.get(id).is_some_and(|entry| entry.node.input_enabled) {
            with_kind(tree, id, |kind, tree| kind.handle_input(id, tree, ctx));
        } else if let Some(entry) = tree.get_mut(id) {
            entry.kind.cancel_input();
        }
    }
}

fn pointer_over(tree: &UiTree, id: NodeId, ctx: &FrameContext<'_>) -> bool {
    let Some(entry) = tree.get(id) else {
        return false;
    };
    if !entry.node.input_enabled {
        return false;
    }
    ctx.plane_pointer(tree, id)
        .is_some_and(|pointer| ctx.arbiter.hit_test(&entry.placement.cached.bounds(), pointer))
}

fn competes(tree: &UiTree, id: NodeId) -> bool {
    tree.get(id).is_some_and(|entry| {
        entry.node.input_enabled && entry.cursor.captures_exclusively && entry.cursor.moused_over
    })
}

/// Outermost hovered exclusive ancestor that keeps the pointer from its
/// children, or the node itself
fn capture_target(tree: &UiTree, id: NodeId) -> NodeId {
    tree.ancestors(id)
        .filter(|&ancestor| competes(tree, ancestor))
        .filter(|&ancestor| tree.get(ancestor).is_some_and(|entry| !entry.cursor.shares_with_children))
        .last()
        .unwrap_or(id)
}

fn draw_node(tree: &UiTree, id: NodeId, sink: &mut dyn RenderSink) -> usize {
    let Some(entry) = tree.get(id) else {
        return 0;
    };
    let Some(space) = tree.space_of(id).and_then(|space| tree.get(space)).and_then(|entry| entry.kind.as_space())
    else {
        return 0;
    };

    let mut out = QuadEmitter::new(id, &entry.placement.cached, space, sink);
    entry.kind.draw(&mut out);
    out.emitted()
}
