use approx::assert_relative_eq;

use crate::events::UiEventKind;
use crate::foundation::math::{Vec2, Vec4};
use crate::layout::Placement;
use crate::tree::{NodeEntry, NodeId};
use crate::widgets::{Panel, ScrollAxis, ScrollBox, WidgetKind};
use super::Harness;

fn scroll_box(h: &mut Harness, id: NodeId) -> &mut ScrollBox {
    h.ui.tree_mut().get_mut(id).unwrap().kind.as_scroll_box_mut().unwrap()
}

/// Vertical box of `count` 20x20 panels with room for 45 units
fn stacked(h: &mut Harness, count: usize) -> (NodeId, Vec<NodeId>) {
    let root = h.ui.root();
    let scroll = h.ui.add_scroll_box(root, ScrollAxis::Vertical, 45.0).unwrap();
    let members = (0..count)
        .map(|_| {
            let panel = NodeEntry::new(WidgetKind::Panel(Panel::new(Vec4::new(1.0, 1.0, 1.0, 1.0))))
                .with_placement(Placement::sized(20.0, 20.0));
            h.ui.add_scroll_member(scroll, panel).unwrap()
        })
        .collect();
    (scroll, members)
}

#[test]
fn test_scroll_to_end_clamps_to_trailing_window() {
    let mut h = Harness::new();
    let (scroll, members) = stacked(&mut h, 5);

    scroll_box(&mut h, scroll).scroll_to_end(4);
    h.frame(Vec2::new(300.0, 0.0), false);

    let window = scroll_box(&mut h, scroll);
    assert_eq!((window.start(), window.end()), (2, 4));

    let tree = h.ui.tree();
    let visible: Vec<bool> = members.iter().map(|&m| tree.get(m).unwrap().node.visible).collect();
    assert_eq!(visible, vec![false, false, true, true, true]);
    assert_relative_eq!(tree.get(scroll).unwrap().placement.unscaled_size, Vec2::new(20.0, 45.0));

    // Members stack down from the top edge; the last one overhangs
    assert_relative_eq!(tree.get(members[2]).unwrap().placement.cached.position.y, 12.5);
    assert_relative_eq!(tree.get(members[4]).unwrap().placement.cached.position.y, -27.5);
}

#[test]
fn test_start_past_the_end_is_clamped() {
    let mut h = Harness::new();
    let (scroll, _) = stacked(&mut h, 5);

    scroll_box(&mut h, scroll).scroll_to_start(4);
    h.frame(Vec2::new(300.0, 0.0), false);
    assert_eq!(scroll_box(&mut h, scroll).visible_range(), Some(2..=4));

    scroll_box(&mut h, scroll).scroll_to_end(1);
    h.frame(Vec2::new(300.0, 0.0), false);
    assert_eq!(scroll_box(&mut h, scroll).visible_range(), Some(0..=2));
}

#[test]
fn test_wheel_scrolls_while_over_the_box() {
    let mut h = Harness::new();
    let (scroll, _) = stacked(&mut h, 5);
    scroll_box(&mut h, scroll).scroll_to_end(4);
    h.frame(Vec2::zeros(), false);
    assert!(!h.ui.events().iter().any(|e| matches!(e.kind, UiEventKind::Scrolled { .. })));

    let mut input = h.input(Vec2::zeros(), false);
    input.scroll = 1.0;
    let report = h.frame_with(&input);
    assert_eq!(report.owner, Some(scroll));
    assert!(h.ui.events().contains(scroll, &UiEventKind::Scrolled { start: 1, end: 3 }));

    // Away from the box the wheel does nothing
    let mut input = h.input(Vec2::new(300.0, 0.0), false);
    input.scroll = 1.0;
    h.frame_with(&input);
    assert_eq!(scroll_box(&mut h, scroll).start(), 1);
}

#[test]
fn test_disabled_member_is_skipped() {
    let mut h = Harness::new();
    let (scroll, members) = stacked(&mut h, 4);
    scroll_box(&mut h, scroll).set_member_enabled(members[1], false);
    h.frame(Vec2::new(300.0, 0.0), false);

    let tree = h.ui.tree();
    assert!(!tree.get(members[1]).unwrap().node.visible);
    assert!(tree.get(members[3]).unwrap().node.visible);
    assert_relative_eq!(tree.get(members[2]).unwrap().placement.cached.position.y, 22.5 - 30.0);
}

#[test]
fn test_list_box_selects_clicked_row() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let list = h.ui.add_list_box(root, 0.0).unwrap();
    let rows: Vec<NodeId> = ["Row0", "Row1", "Row2"].iter().map(|text| h.ui.add_list_row(list, text).unwrap()).collect();

    h.frame(Vec2::zeros(), false);
    let tree = h.ui.tree();
    assert_relative_eq!(tree.get(list).unwrap().placement.unscaled_size, Vec2::new(48.0, 60.0));
    assert_relative_eq!(tree.get(rows[1]).unwrap().placement.cached.position.y, 0.0);

    let report = h.frame(Vec2::zeros(), true);
    assert_eq!(report.owner, Some(rows[1]));
    assert!(h.ui.events().contains(rows[1], &UiEventKind::Clicked));
    assert!(h.ui.events().contains(list, &UiEventKind::SelectionChanged(Some(1))));

    h.frame(Vec2::zeros(), false);
    let tree = h.ui.tree();
    assert_eq!(tree.get(list).unwrap().kind.as_list_box().unwrap().selection(), Some(1));
    assert!(tree.get(rows[1]).unwrap().kind.as_button().unwrap().selected);
    assert!(!tree.get(rows[0]).unwrap().kind.as_button().unwrap().selected);

    // Clicking the selected row again is not a change
    h.frame(Vec2::zeros(), true);
    assert!(!h.ui.events().iter().any(|e| e.source == list));
}
