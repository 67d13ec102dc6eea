use approx::assert_relative_eq;

use crate::foundation::math::{Vec2, Vec4};
use crate::layout::{DimAlignments, ParentAlignments, Placement};
use crate::pipeline::DrawOrder;
use crate::space::SpaceNode;
use crate::text::TextMode;
use crate::tree::{NodeEntry, UiTree};
use crate::widgets::WidgetKind;
use super::Harness;

fn grey() -> Vec4 {
    Vec4::new(0.5, 0.5, 0.5, 1.0)
}

#[test]
fn test_root_matches_viewport() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let corner = h
        .ui
        .add_panel(
            root,
            grey(),
            Placement::sized(100.0, 50.0).with_alignment(ParentAlignments::TOP | ParentAlignments::LEFT | ParentAlignments::INNER),
        )
        .unwrap();

    h.frame(Vec2::zeros(), false);
    let cached = h.ui.tree().get(corner).unwrap().placement.cached;
    assert_relative_eq!(cached.position, Vec2::new(-400.0 + 50.0, 300.0 - 25.0));
    assert_relative_eq!(h.ui.tree().get(root).unwrap().placement.cached.size, Vec2::new(800.0, 600.0));
}

#[test]
fn test_children_resolve_against_parent_layout() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let parent = h
        .ui
        .add_container(root, Placement::sized(200.0, 100.0).with_padding(20.0, 20.0).with_offset(50.0, 0.0))
        .unwrap();
    let fill = h
        .ui
        .add_panel(
            parent,
            grey(),
            Placement::sized(1.0, 10.0)
                .with_scale(2.0)
                .with_dim_alignment(DimAlignments::WIDTH | DimAlignments::USE_PADDING),
        )
        .unwrap();
    let badge = h
        .ui
        .add_panel(parent, grey(), Placement::sized(10.0, 10.0).with_alignment(ParentAlignments::RIGHT))
        .unwrap();

    h.frame(Vec2::zeros(), false);
    let tree = h.ui.tree();

    let fill = &tree.get(fill).unwrap().placement;
    assert_relative_eq!(fill.unscaled_size.x, 90.0);
    assert_relative_eq!(fill.cached.size, Vec2::new(180.0, 20.0));
    assert_relative_eq!(fill.cached.position, Vec2::new(50.0, 0.0));

    // Outside the right edge
    assert_relative_eq!(tree.get(badge).unwrap().placement.cached.position.x, 50.0 + 100.0 + 5.0);
}

#[test]
fn test_visibility_cascades_to_drawing() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let group = h.ui.add_container(root, Placement::sized(100.0, 100.0)).unwrap();
    let panel = h.ui.add_panel(group, grey(), Placement::sized(50.0, 50.0)).unwrap();

    let shown = h.frame(Vec2::zeros(), false);
    assert_eq!(h.sink.quads_for(panel).count(), 1);

    h.ui.tree_mut().set_visible(group, false).unwrap();
    let hidden = h.frame(Vec2::zeros(), false);
    assert_eq!(h.sink.quads_for(panel).count(), 0);
    assert_eq!(hidden.drawn, shown.drawn - 2);
    assert!(!hidden.full_reorder);

    // The child's own flag is untouched
    assert!(h.ui.tree().get(panel).unwrap().node.visible);
}

#[test]
fn test_draw_order_follows_z_keys() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let back = h.ui.add_panel(root, grey(), Placement::sized(10.0, 10.0)).unwrap();
    let front = h.ui.add_panel(root, grey(), Placement::sized(10.0, 10.0)).unwrap();

    let report = h.frame(Vec2::zeros(), false);
    assert!(report.full_reorder);
    assert_eq!(h.sink.node_order(), vec![back, front]);

    let report = h.frame(Vec2::zeros(), false);
    assert!(!report.full_reorder);

    h.ui.tree_mut().set_z_offset(back, 1).unwrap();
    let report = h.frame(Vec2::zeros(), false);
    assert!(report.full_reorder);
    assert_eq!(h.sink.node_order(), vec![front, back]);
}

#[test]
fn test_registration_inside_frame_waits_for_next_frame() {
    let mut tree = UiTree::new(NodeEntry::new(WidgetKind::Space(SpaceNode::screen())));
    let mut order = DrawOrder::new();
    assert!(tree.take_structure_changed());
    order.rebuild(&tree);

    tree.begin_frame();
    let late = tree.insert(NodeEntry::container());
    tree.register(late, tree.root()).unwrap();
    assert!(!tree.take_structure_changed());
    assert!(!order.back_to_front().contains(&late));
    tree.end_frame();

    assert!(tree.take_structure_changed());
    order.rebuild(&tree);
    assert_eq!(order.back_to_front(), &[tree.root(), late]);
}

#[test]
fn test_wrapped_label_follows_node_width() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let label = h
        .ui
        .add_wrapped_label(root, "one two six ten", Placement::sized(75.0, 100.0))
        .unwrap();
    let auto = h.ui.add_label(root, "auto", TextMode::Unlined).unwrap();

    h.frame(Vec2::zeros(), false);
    let tree = h.ui.tree();
    let board = tree.get(label).unwrap().kind.as_label().unwrap().board();
    assert_eq!(board.builder().line_count(), 2);
    assert_relative_eq!(tree.get(auto).unwrap().placement.unscaled_size, Vec2::new(40.0, 16.0));
}

#[test]
fn test_debug_dump_lists_attached_nodes() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let group = h.ui.add_container(root, Placement::sized(10.0, 10.0)).unwrap();
    h.ui.add_panel(group, grey(), Placement::sized(5.0, 5.0)).unwrap();
    h.frame(Vec2::zeros(), false);

    let dump = h.ui.tree().debug_dump();
    assert_eq!(dump.lines().count(), 3);
    assert!(dump.lines().next().unwrap().starts_with("Space"));
    assert!(dump.lines().nth(2).unwrap().trim_start().starts_with("Panel"));

    h.ui.destroy(group).unwrap();
    assert_eq!(h.ui.tree().debug_dump().lines().count(), 1);
}
