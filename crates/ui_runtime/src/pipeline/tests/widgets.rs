use approx::assert_relative_eq;

use crate::events::UiEventKind;
use crate::foundation::math::Vec2;
use crate::input::{EditKey, MouseButton};
use crate::layout::Placement;
use crate::text::TextMode;
use crate::widgets::{Slider, WindowMode};
use super::Harness;

#[test]
fn test_button_press_and_release() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let button = h.ui.add_button(root, "Go").unwrap();

    h.frame(Vec2::zeros(), false);
    h.frame(Vec2::zeros(), true);
    let events = h.ui.drain_events();
    let kinds: Vec<_> = events.iter().filter(|e| e.source == button).map(|e| e.kind.clone()).collect();
    assert_eq!(kinds, vec![UiEventKind::Pressed(MouseButton::Left), UiEventKind::Clicked]);

    // Released even when the pointer has left the button
    h.frame(Vec2::new(200.0, 0.0), false);
    assert!(h.ui.events().contains(button, &UiEventKind::Released(MouseButton::Left)));
    assert!(h.ui.events().contains(button, &UiEventKind::CursorExited));
}

#[test]
fn test_window_drag_ends_on_release_anywhere() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let window = h.ui.add_window(root, Placement::sized(200.0, 150.0)).unwrap();
    let mode = |h: &Harness| h.ui.tree().get(window).unwrap().kind.as_window().unwrap().mode();

    h.frame(Vec2::new(0.0, 65.0), false);
    h.frame(Vec2::new(0.0, 65.0), true);
    assert_eq!(mode(&h), WindowMode::Dragging);

    h.frame(Vec2::new(30.0, 65.0), true);
    assert!(h.ui.events().contains(window, &UiEventKind::Moved));
    assert_relative_eq!(h.ui.tree().get(window).unwrap().placement.offset, Vec2::new(30.0, 0.0), epsilon = 0.1);

    // Released far outside the window
    h.frame(Vec2::new(350.0, -250.0), false);
    assert_eq!(mode(&h), WindowMode::Idle);

    h.frame(Vec2::new(300.0, -200.0), false);
    assert_relative_eq!(h.ui.tree().get(window).unwrap().placement.offset, Vec2::new(30.0, 0.0), epsilon = 0.1);
}

#[test]
fn test_window_disabled_mid_drag_does_not_resume() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let window = h.ui.add_window(root, Placement::sized(200.0, 150.0)).unwrap();
    let mode = |h: &Harness| h.ui.tree().get(window).unwrap().kind().as_window().unwrap().mode();
    let offset = |h: &Harness| h.ui.tree().get(window).unwrap().placement.offset;

    h.frame(Vec2::new(0.0, 65.0), false);
    h.frame(Vec2::new(0.0, 65.0), true);
    h.frame(Vec2::new(30.0, 65.0), true);
    assert_relative_eq!(offset(&h), Vec2::new(30.0, 0.0), epsilon = 0.1);

    h.ui.tree_mut().set_input_enabled(window, false).unwrap();
    h.frame(Vec2::new(60.0, 65.0), true);
    assert_eq!(mode(&h), WindowMode::Idle);

    // Re-enabled with the button still held: no jump from the old pointer
    h.ui.tree_mut().set_input_enabled(window, true).unwrap();
    h.frame(Vec2::new(120.0, 65.0), true);
    h.frame(Vec2::new(150.0, 65.0), true);
    assert_eq!(mode(&h), WindowMode::Idle);
    assert_relative_eq!(offset(&h), Vec2::new(30.0, 0.0), epsilon = 0.1);
    assert!(!h.ui.events().contains(window, &UiEventKind::Moved));
}

#[test]
fn test_slider_hidden_mid_drag_stops_dragging() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let slider = h.ui.add_slider(root, Slider::new(0.0, 10.0, 0.0), Placement::sized(100.0, 12.0)).unwrap();
    let value = |h: &Harness| h.ui.tree().get(slider).unwrap().kind().as_slider().unwrap().value();

    h.frame(Vec2::zeros(), false);
    h.frame(Vec2::zeros(), true);
    assert_relative_eq!(value(&h), 5.0, epsilon = 0.01);

    h.ui.tree_mut().set_visible(slider, false).unwrap();
    h.frame(Vec2::new(25.0, 0.0), true);
    h.ui.tree_mut().set_visible(slider, true).unwrap();
    h.frame(Vec2::new(25.0, 0.0), true);

    assert!(!h.ui.tree().get(slider).unwrap().kind().as_slider().unwrap().is_dragging());
    assert_relative_eq!(value(&h), 5.0, epsilon = 0.01);
}

#[test]
fn test_window_border_resize() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let window = h.ui.add_window(root, Placement::sized(200.0, 150.0)).unwrap();

    h.frame(Vec2::new(98.0, 0.0), false);
    h.frame(Vec2::new(98.0, 0.0), true);
    h.frame(Vec2::new(118.0, 0.0), true);

    assert!(h.ui.events().contains(window, &UiEventKind::Resized));
    let placement = &h.ui.tree().get(window).unwrap().placement;
    assert_relative_eq!(placement.unscaled_size.x, 220.0, epsilon = 0.1);
    // Left edge stays at -100
    assert_relative_eq!(placement.offset.x - placement.unscaled_size.x * 0.5, -100.0, epsilon = 0.1);
}

#[test]
fn test_clicked_window_comes_to_front_next_frame() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let back = h.ui.add_window(root, Placement::sized(100.0, 100.0).with_offset(-40.0, 0.0)).unwrap();
    let front = h.ui.add_window(root, Placement::sized(100.0, 100.0).with_offset(40.0, 0.0)).unwrap();

    h.frame(Vec2::new(-60.0, 0.0), false);
    let report = h.frame(Vec2::new(-60.0, 0.0), true);
    assert_eq!(report.owner, Some(back));
    assert!(!report.full_reorder);
    assert_eq!(h.ui.tree().children(root), &[front, back]);

    let report = h.frame(Vec2::new(-60.0, 0.0), false);
    assert!(report.full_reorder);
    assert_eq!(h.sink.node_order(), vec![front, back]);

    // The overlap now belongs to the focused window
    assert_eq!(h.frame(Vec2::zeros(), false).owner, Some(back));
}

#[test]
fn test_text_field_focus_and_typing() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let field = h.ui.add_text_field(root, TextMode::Unlined, Placement::sized(200.0, 24.0)).unwrap();

    h.frame(Vec2::zeros(), false);
    h.frame(Vec2::zeros(), true);
    assert_eq!(h.ui.keyboard_focus(), Some(field));
    assert!(h.ui.events().contains(field, &UiEventKind::FocusChanged(true)));

    let mut input = h.input(Vec2::new(300.0, 200.0), false);
    input.typed = vec!['h', 'i'];
    input.keys = vec![EditKey::Enter];
    h.frame_with(&input);
    assert!(h.ui.events().contains(field, &UiEventKind::TextChanged));
    assert!(h.ui.events().contains(field, &UiEventKind::Submitted));

    let text = h.ui.tree().get(field).unwrap().kind.as_text_field().unwrap().text();
    assert_eq!(text.plain_text(), "hi");

    // Clicking elsewhere drops focus
    h.frame(Vec2::new(300.0, 200.0), true);
    assert_eq!(h.ui.keyboard_focus(), None);
    assert!(h.ui.events().contains(field, &UiEventKind::FocusChanged(false)));
}

#[test]
fn test_slider_drags_past_track_end() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let slider = h.ui.add_slider(root, Slider::new(0.0, 10.0, 0.0), Placement::sized(100.0, 12.0)).unwrap();
    let value = |h: &Harness| h.ui.tree().get(slider).unwrap().kind.as_slider().unwrap().value();

    h.frame(Vec2::zeros(), false);
    h.frame(Vec2::zeros(), true);
    assert_relative_eq!(value(&h), 5.0, epsilon = 0.01);
    assert!(h.ui.events().iter().any(|e| e.source == slider && matches!(e.kind, UiEventKind::ValueChanged(_))));

    h.frame(Vec2::new(25.0, 40.0), true);
    assert_relative_eq!(value(&h), 7.5, epsilon = 0.01);

    h.frame(Vec2::new(400.0, 40.0), true);
    assert_relative_eq!(value(&h), 10.0);

    h.frame(Vec2::new(-25.0, 0.0), false);
    assert_relative_eq!(value(&h), 10.0);
}

#[test]
fn test_dropdown_pick_and_outside_close() {
    let mut h = Harness::new();
    let root = h.ui.root();
    let dropdown = h
        .ui
        .add_dropdown(root, &["Red", "Green", "Blue"], 0.0, Placement::sized(80.0, 20.0))
        .unwrap();
    let (display, list) = {
        let dropdown = h.ui.tree().get(dropdown).unwrap().kind.as_dropdown().unwrap();
        (dropdown.display(), dropdown.list())
    };
    let is_open = |h: &Harness| h.ui.tree().get(dropdown).unwrap().kind.as_dropdown().unwrap().is_open();

    h.frame(Vec2::zeros(), false);
    assert!(!h.ui.tree().get(list).unwrap().node.visible);

    h.frame(Vec2::zeros(), true);
    assert!(h.ui.events().contains(display, &UiEventKind::Clicked));
    assert!(is_open(&h));

    // Rows hang below the display: Red at -20, Green at -40
    h.frame(Vec2::new(0.0, -40.0), false);
    h.frame(Vec2::new(0.0, -40.0), true);
    assert!(h.ui.events().contains(dropdown, &UiEventKind::SelectionChanged(Some(1))));
    assert!(!is_open(&h));

    let shown = h.ui.tree().get(display).unwrap().kind.as_button().unwrap().text();
    assert_eq!(shown.plain_text(), "Green");

    // Open again, then press somewhere else
    h.frame(Vec2::zeros(), false);
    h.frame(Vec2::zeros(), true);
    assert!(is_open(&h));
    h.frame(Vec2::new(200.0, 200.0), false);
    h.frame(Vec2::new(200.0, 200.0), true);
    assert!(!is_open(&h));
}
