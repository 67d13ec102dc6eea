//! Headless panel demo
//!
//! Builds a small settings window, drives it with a scripted pointer and logs
//! the events and draw output of every frame. Run with `RUST_LOG=debug` to
//! see the runtime's own records.
//!
//! Usage: `panel_demo [config.toml|config.ron]`

use std::rc::Rc;

use ui_runtime::foundation::logging;
use ui_runtime::prelude::*;
use ui_runtime::widgets::Label;

const VIEWPORT: (f32, f32) = (1280.0, 720.0);

/// Demo errors
#[derive(thiserror::Error, Debug)]
enum DemoError {
    /// The runtime rejected an operation
    #[error("UI error: {0}")]
    Ui(#[from] UiError),
    /// The config file could not be used
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Nodes the script interacts with
struct Widgets {
    apply: NodeId,
    name: NodeId,
    volume: NodeId,
    quality: NodeId,
    log_lines: NodeId,
}

/// One scripted frame: pointer in plane coordinates, primary button, typed text
struct Step {
    pointer: Vec2,
    left_down: bool,
    typed: &'static str,
}

impl Step {
    fn hover(x: f32, y: f32) -> Self {
        Self { pointer: Vec2::new(x, y), left_down: false, typed: "" }
    }

    fn press(x: f32, y: f32) -> Self {
        Self { pointer: Vec2::new(x, y), left_down: true, typed: "" }
    }

    fn typing(text: &'static str) -> Self {
        Self { pointer: Vec2::new(0.0, -300.0), left_down: false, typed: text }
    }
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    let config = match std::env::args().nth(1) {
        Some(path) => UiConfig::load_validated(path)?,
        None => {
            log::info!("No config file given, using defaults");
            UiConfig::default()
        }
    };

    let mut ui = Ui::new(Rc::new(MonospaceMetrics::new(9.0, 18.0)), config)?;
    let widgets = build(&mut ui)?;
    log::info!("Initial tree:\n{}", ui.tree().debug_dump());

    let viewport = Vec2::new(VIEWPORT.0, VIEWPORT.1);
    let view = HostView::new(viewport, 60.0_f32.to_radians(), Mat4::identity());
    let mut tracker = InputTracker::new();
    let mut sink = RecordingSink::new();

    for step in script() {
        let pixel = Vec2::new(step.pointer.x + viewport.x * 0.5, viewport.y * 0.5 - step.pointer.y);
        let mut input = tracker.sample(pixel, [step.left_down, false, false]);
        input.typed = step.typed.chars().collect();

        sink.clear();
        let report = ui.advance_frame(&view, &input, &mut sink);
        log::debug!(
            "Frame {}: {} nodes, {} quads, owner {:?}",
            report.frame,
            report.drawn,
            sink.quads().len(),
            report.owner
        );

        for event in ui.drain_events() {
            react(&mut ui, &widgets, &event)?;
        }
    }

    log::info!("Final tree:\n{}", ui.tree().debug_dump());
    log::info!("Last frame exported {} vertex bytes", sink.vertex_bytes().len());
    Ok(())
}

/// Settings window with a name field, volume slider, quality dropdown and an
/// event log
fn build(ui: &mut Ui) -> Result<Widgets, UiError> {
    let root = ui.root();
    let window = ui.add_window(root, Placement::sized(360.0, 300.0).with_padding(12.0, 12.0))?;

    let top = ParentAlignments::TOP | ParentAlignments::LEFT | ParentAlignments::INNER | ParentAlignments::USE_PADDING;
    let title = ui.add_label(window, "Settings", TextMode::Unlined)?;
    if let Some(entry) = ui.tree_mut().get_mut(title) {
        entry.placement.parent_alignment = ParentAlignments::TOP | ParentAlignments::INNER_V;
    }

    let name = ui.add_text_field(
        window,
        TextMode::Unlined,
        Placement::sized(200.0, 22.0).with_alignment(top).with_offset(0.0, -30.0),
    )?;
    let volume = ui.add_slider(
        window,
        Slider::new(0.0, 100.0, 50.0),
        Placement::sized(200.0, 14.0).with_alignment(top).with_offset(0.0, -66.0),
    )?;
    let quality = ui.add_dropdown(
        window,
        &["Low", "Medium", "High"],
        0.0,
        Placement::sized(120.0, 22.0).with_alignment(top).with_offset(0.0, -96.0),
    )?;
    let log_lines = ui.add_scroll_box(window, ScrollAxis::Vertical, 60.0)?;
    if let Some(entry) = ui.tree_mut().get_mut(log_lines) {
        entry.placement.parent_alignment = ParentAlignments::BOTTOM | ParentAlignments::LEFT | ParentAlignments::INNER | ParentAlignments::USE_PADDING;
    }

    let apply = ui.add_button(window, "Apply")?;
    if let Some(entry) = ui.tree_mut().get_mut(apply) {
        entry.placement.parent_alignment = ParentAlignments::BOTTOM | ParentAlignments::RIGHT | ParentAlignments::INNER | ParentAlignments::USE_PADDING;
    }

    Ok(Widgets { apply, name, volume, quality, log_lines })
}

/// Pointer path over the window built by [`build`]
///
/// The window is centered, so its content's top-left corner sits at
/// (-168, 138) in plane coordinates.
fn script() -> Vec<Step> {
    vec![
        Step::hover(0.0, 0.0),
        // Focus the name field and type into it
        Step::hover(-100.0, 97.0),
        Step::press(-100.0, 97.0),
        Step::typing("Player One"),
        // Drag the volume slider
        Step::hover(-68.0, 64.0),
        Step::press(-68.0, 64.0),
        Step::press(0.0, 64.0),
        Step::hover(0.0, 64.0),
        // Pick "High" from the quality dropdown
        Step::hover(-108.0, 31.0),
        Step::press(-108.0, 31.0),
        Step::hover(-108.0, -13.0),
        Step::press(-108.0, -13.0),
        Step::hover(0.0, 0.0),
        // Drag the window by its header
        Step::hover(0.0, 140.0),
        Step::press(0.0, 140.0),
        Step::press(40.0, 120.0),
        Step::hover(40.0, 120.0),
    ]
}

/// Log an event and mirror it into the on-screen event list
fn react(ui: &mut Ui, widgets: &Widgets, event: &UiEvent) -> Result<(), UiError> {
    let line = match &event.kind {
        UiEventKind::TextChanged if event.source == widgets.name => {
            let text = ui
                .tree()
                .get(widgets.name)
                .and_then(|entry| entry.kind().as_text_field())
                .map(|field| field.text().plain_text())
                .unwrap_or_default();
            format!("name = {text:?}")
        }
        UiEventKind::ValueChanged(value) if event.source == widgets.volume => format!("volume = {value:.0}"),
        UiEventKind::SelectionChanged(Some(index)) if event.source == widgets.quality => {
            format!("quality = #{index}")
        }
        UiEventKind::Clicked if event.source == widgets.apply => "apply".to_string(),
        UiEventKind::Moved => "window moved".to_string(),
        other => {
            log::trace!("{:?} from {:?}", other, event.source);
            return Ok(());
        }
    };

    log::info!("{}", line);
    let entry = NodeEntry::new(WidgetKind::Label(Label::with_text(
        ui.metrics(),
        TextMode::Unlined,
        &RichText::from(line.as_str()),
    )));
    ui.add_scroll_member(widgets.log_lines, entry)?;
    if let Some(scroll) = ui
        .tree_mut()
        .get_mut(widgets.log_lines)
        .and_then(NodeEntry::as_scroll_box_mut)
    {
        let last = scroll.members().len().saturating_sub(1);
        scroll.scroll_to_end(last);
    }
    Ok(())
}
