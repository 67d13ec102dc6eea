use crate::cursor::CursorFlags;
use crate::events::UiEventKind;
use crate::foundation::math::{Mat4, Vec2, Vec3};
use crate::layout::Placement;
use crate::space::SpaceNode;
use crate::tree::NodeEntry;
use super::Harness;

#[test]
fn test_later_sibling_wins_capture() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let a = h.ui.add_button(root, "Alpha").unwrap();
    let b = h.ui.add_button(root, "Beta").unwrap();

    let report = h.frame(Vec2::zeros(), false);
    assert_eq!(report.owner, Some(b));
    assert_eq!(report.owner_at_depth_start, None);
    assert!(h.ui.events().contains(b, &UiEventKind::CursorEntered));

    // Only the part of Alpha outside Beta belongs to Alpha
    let report = h.frame(Vec2::new(27.0, 0.0), false);
    assert_eq!(report.owner, Some(a));
    assert!(h.ui.events().contains(b, &UiEventKind::CursorExited));
}

#[test]
fn test_hidden_owner_is_released() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let a = h.ui.add_button(root, "Alpha").unwrap();
    let b = h.ui.add_button(root, "Beta").unwrap();

    assert_eq!(h.frame(Vec2::zeros(), false).owner, Some(b));

    h.ui.tree_mut().set_visible(b, false).unwrap();
    let report = h.frame(Vec2::zeros(), false);
    assert_eq!(report.owner_at_depth_start, None);
    assert_eq!(report.owner, Some(a));
    assert!(h.sink.quads_for(b).next().is_none());

    h.ui.tree_mut().set_input_enabled(a, false).unwrap();
    assert_eq!(h.frame(Vec2::zeros(), false).owner, None);
}

#[test]
fn test_pointer_outside_everything() {
    let mut h = Harness::new();
    let root = h.ui.root();
    h.ui.add_button(root, "Alpha").unwrap();

    let report = h.frame(Vec2::new(300.0, 200.0), false);
    assert_eq!(report.owner, None);
}

#[test]
fn test_exclusive_parent_takes_children_claims() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let frame = h
        .ui
        .add(root, NodeEntry::container().with_placement(Placement::sized(200.0, 200.0)).with_cursor(CursorFlags::exclusive()))
        .unwrap();
    let inner = h.ui.add_button(frame, "Inner").unwrap();

    assert_eq!(h.frame(Vec2::zeros(), false).owner, Some(frame));

    // Sharing parents let the child keep its claim
    h.ui.tree_mut().get_mut(frame).unwrap().cursor = CursorFlags::capturing();
    assert_eq!(h.frame(Vec2::zeros(), false).owner, Some(inner));

    // Away from the child the parent still captures
    assert_eq!(h.frame(Vec2::new(80.0, 80.0), false).owner, Some(frame));
}

#[test]
fn test_nearer_space_wins_across_spaces() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let world = h
        .ui
        .add_space(
            root,
            SpaceNode::world(Mat4::new_translation(&Vec3::new(0.0, 0.0, -10.0))),
            Placement::sized(20.0, 20.0),
        )
        .unwrap();
    let far = h.ui.add_button(world, "W").unwrap();
    let near = h.ui.add_button(root, "S").unwrap();

    // The world button draws later but lies behind the screen plane
    let report = h.frame(Vec2::zeros(), false);
    assert_eq!(report.owner, Some(near));

    h.ui.tree_mut().set_visible(near, false).unwrap();
    assert_eq!(h.frame(Vec2::zeros(), false).owner, Some(far));
    assert_eq!(h.ui.tree().space_of(far), Some(world));
}

#[test]
fn test_tiny_node_is_still_hit() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let dot = h
        .ui
        .add(root, NodeEntry::container().with_placement(Placement::sized(1.0, 1.0)).with_cursor(CursorFlags::exclusive()))
        .unwrap();

    assert_eq!(h.frame(Vec2::new(3.0, -3.0), false).owner, Some(dot));
    assert_eq!(h.frame(Vec2::new(6.0, 0.0), false).owner, None);
}
