//! Runtime facade
//!
//! [`Ui`] owns the node tree, the capture arbiter, the event queue and the
//! cached draw order, and runs the four pipeline passes once per host frame.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::config::{ConfigError, UiConfig};
use crate::cursor::CursorArbiter;
use crate::events::{EventQueue, UiEvent};
use crate::foundation::math::{Vec2, Vec4};
use crate::input::InputSnapshot;
use crate::layout::{DimAlignments, ParentAlignments, Placement};
use crate::pipeline::{depth_pass, input_pass, layout_pass, size_pass, DrawOrder, FrameContext, FrameReport};
use crate::render::RenderSink;
use crate::space::{HostView, SpaceNode};
use crate::text::{GlyphMetrics, RichText, TextMode};
use crate::tree::{NodeEntry, NodeId, TreeError, UiTree};
use crate::widgets::{
    Dropdown, Label, LabelButton, ListBox, Panel, ScrollAxis, ScrollBox, Slider, TextField, WidgetKind, Window,
};

/// Errors surfaced by the runtime facade
#[derive(Error, Debug)]
pub enum UiError {
    /// Structural misuse of the node tree
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),

    /// Configuration could not be loaded or is invalid
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A node doesn't hold the widget an operation needs
    #[error("Node {node:?} is not a {expected}")]
    WrongKind {
        /// Offending node
        node: NodeId,
        /// Widget the operation expected
        expected: &'static str,
    },
}

/// Retained-mode UI runtime
pub struct Ui {
    tree: UiTree,
    order: DrawOrder,
    arbiter: CursorArbiter,
    events: EventQueue,
    keyboard_focus: Option<NodeId>,
    config: UiConfig,
    metrics: Rc<dyn GlyphMetrics>,
    frame: u64,
    last_view: Option<HostView>,
}

impl fmt::Debug for Ui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ui")
            .field("frame", &self.frame)
            .field("nodes", &self.tree.len())
            .field("owner", &self.arbiter.owner())
            .field("keyboard_focus", &self.keyboard_focus)
            .finish_non_exhaustive()
    }
}

impl Ui {
    /// Create a runtime whose root is a screen space
    pub fn new(metrics: Rc<dyn GlyphMetrics>, config: UiConfig) -> Result<Self, UiError> {
        config.validate()?;

        let tree = UiTree::new(NodeEntry::new(WidgetKind::Space(SpaceNode::screen())));
        log::debug!("Created UI runtime (min hit size {})", config.min_hit_size);

        Ok(Self {
            tree,
            order: DrawOrder::new(),
            arbiter: CursorArbiter::new(config.min_hit_size),
            events: EventQueue::new(),
            keyboard_focus: None,
            config,
            metrics,
            frame: 0,
            last_view: None,
        })
    }

    /// Run one frame: size, layout, depth and input passes
    ///
    /// Events from the previous frame are dropped first; drain them before
    /// calling this again.
    pub fn advance_frame(&mut self, view: &HostView, input: &InputSnapshot, sink: &mut dyn RenderSink) -> FrameReport {
        self.frame += 1;
        self.events.clear();
        self.arbiter.reset();

        if self.last_view.map_or(true, |last| view.changed_from(&last)) {
            log::debug!("Host view changed: viewport {}x{}", view.viewport.x, view.viewport.y);
            self.last_view = Some(*view);
        }

        if let Some(focus) = self.keyboard_focus {
            if !self.tree.is_attached(focus) || !self.tree.is_visible_effective(focus) {
                log::debug!("Dropping keyboard focus from {:?}", focus);
                self.keyboard_focus = None;
            }
        }

        let full_reorder = self.tree.take_structure_changed();
        if full_reorder {
            self.order.rebuild(&self.tree);
        }

        self.tree.begin_frame();
        size_pass(&mut self.tree);

        let mut ctx = FrameContext {
            frame: self.frame,
            view,
            input,
            config: &self.config,
            arbiter: &mut self.arbiter,
            events: &mut self.events,
            keyboard_focus: &mut self.keyboard_focus,
        };

        let visible = layout_pass(&mut self.tree, &ctx);

        let owner_at_depth_start = ctx.arbiter.owner();
        let drawn = depth_pass(&mut self.tree, &self.order, &visible, &mut ctx, sink);
        let owner = ctx.arbiter.owner();
        if owner != ctx.arbiter.previous_owner() {
            log::debug!("Cursor owner {:?} -> {:?}", ctx.arbiter.previous_owner(), owner);
        }

        input_pass(&mut self.tree, &self.order, &visible, &mut ctx);
        self.tree.end_frame();

        FrameReport { frame: self.frame, drawn, owner_at_depth_start, owner, full_reorder }
    }

    /// Node tree
    pub fn tree(&self) -> &UiTree {
        &self.tree
    }

    /// Mutable node tree
    pub fn tree_mut(&mut self) -> &mut UiTree {
        &mut self.tree
    }

    /// Root screen space
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Frames advanced so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Runtime tunables
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Glyph metrics shared by every text widget
    pub fn metrics(&self) -> Rc<dyn GlyphMetrics> {
        Rc::clone(&self.metrics)
    }

    /// Events emitted by the last frame
    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Take the events emitted by the last frame
    pub fn drain_events(&mut self) -> Vec<UiEvent> {
        self.events.drain()
    }

    /// Current cursor owner
    pub fn cursor_owner(&self) -> Option<NodeId> {
        self.arbiter.owner()
    }

    /// Node receiving keyboard input
    pub fn keyboard_focus(&self) -> Option<NodeId> {
        self.keyboard_focus
    }

    /// Move keyboard focus; the previous holder notices on its next input pass
    pub fn set_keyboard_focus(&mut self, node: Option<NodeId>) {
        self.keyboard_focus = node;
    }

    /// Insert a node and register it under `parent`
    ///
    /// On failure the new node is freed again and the tree is unchanged.
    pub fn add(&mut self, parent: NodeId, entry: NodeEntry) -> Result<NodeId, UiError> {
        let id = self.tree.insert(entry);
        if let Err(err) = self.tree.register(id, parent) {
            let _ = self.tree.destroy(id);
            return Err(err.into());
        }
        Ok(id)
    }

    /// Destroy a node and its subtree, returning how many nodes were freed
    pub fn destroy(&mut self, node: NodeId) -> Result<usize, UiError> {
        let had_focus = self.keyboard_focus.is_some_and(|focus| self.tree.is_within(node, focus));
        let freed = self.tree.destroy(node)?.len();
        if had_focus {
            self.keyboard_focus = None;
        }
        Ok(freed)
    }

    /// Grouping node
    pub fn add_container(&mut self, parent: NodeId, placement: Placement) -> Result<NodeId, UiError> {
        self.add(parent, NodeEntry::container().with_placement(placement))
    }

    /// Nested coordinate space
    pub fn add_space(&mut self, parent: NodeId, space: SpaceNode, placement: Placement) -> Result<NodeId, UiError> {
        self.add(parent, NodeEntry::new(WidgetKind::Space(space)).with_placement(placement))
    }

    /// Colored rectangle
    pub fn add_panel(&mut self, parent: NodeId, color: Vec4, placement: Placement) -> Result<NodeId, UiError> {
        self.add(parent, NodeEntry::new(WidgetKind::Panel(Panel::new(color))).with_placement(placement))
    }

    /// Auto-sized text label
    pub fn add_label(&mut self, parent: NodeId, text: &str, mode: TextMode) -> Result<NodeId, UiError> {
        let mut label = Label::with_text(self.metrics(), mode, &RichText::from(text));
        label.board_mut().builder_mut().set_wrap_hysteresis(self.config.wrap_hysteresis);
        self.add(parent, NodeEntry::new(WidgetKind::Label(label)))
    }

    /// Fixed-size label wrapping its text to the node width
    pub fn add_wrapped_label(&mut self, parent: NodeId, text: &str, placement: Placement) -> Result<NodeId, UiError> {
        let mut label = Label::with_text(self.metrics(), TextMode::Wrapped, &RichText::from(text));
        label.board_mut().set_auto_resize(false);
        label.board_mut().builder_mut().set_wrap_hysteresis(self.config.wrap_hysteresis);
        self.add(parent, NodeEntry::new(WidgetKind::Label(label)).with_placement(placement))
    }

    /// Text button sized around its label
    pub fn add_button(&mut self, parent: NodeId, text: &str) -> Result<NodeId, UiError> {
        let button = LabelButton::new(self.metrics(), &RichText::from(text));
        self.add(parent, NodeEntry::new(WidgetKind::Button(button)))
    }

    /// Editable text field of a fixed size
    pub fn add_text_field(&mut self, parent: NodeId, mode: TextMode, placement: Placement) -> Result<NodeId, UiError> {
        let mut field = TextField::new(self.metrics(), mode);
        field.set_wrap_hysteresis(self.config.wrap_hysteresis);
        self.add(parent, NodeEntry::new(WidgetKind::TextField(field)).with_placement(placement))
    }

    /// Horizontal slider
    pub fn add_slider(&mut self, parent: NodeId, slider: Slider, placement: Placement) -> Result<NodeId, UiError> {
        self.add(parent, NodeEntry::new(WidgetKind::Slider(slider)).with_placement(placement))
    }

    /// Scroll box using the configured spacing and minimum visible count
    pub fn add_scroll_box(&mut self, parent: NodeId, axis: ScrollAxis, max_size: f32) -> Result<NodeId, UiError> {
        let scroll = self.scroll_box(axis, max_size);
        self.add(parent, NodeEntry::new(WidgetKind::ScrollBox(scroll)))
    }

    fn scroll_box(&self, axis: ScrollAxis, max_size: f32) -> ScrollBox {
        ScrollBox::new(axis, max_size).with_spacing(self.config.scroll_spacing, self.config.min_visible_count)
    }

    /// Add a node to a scroll box's chain
    pub fn add_scroll_member(&mut self, scroll: NodeId, entry: NodeEntry) -> Result<NodeId, UiError> {
        self.expect_kind(scroll, "scroll box", |kind| kind.as_scroll_box().is_some())?;
        let id = self.add(scroll, entry)?;
        if let Some(scroll) = self.tree.get_mut(scroll).and_then(|entry| entry.kind.as_scroll_box_mut()) {
            scroll.push_member(id);
        }
        Ok(id)
    }

    /// Movable, resizable window with the configured border and minimum size
    pub fn add_window(&mut self, parent: NodeId, placement: Placement) -> Result<NodeId, UiError> {
        let window = Window::new(self.config.window_border, Vec2::from(self.config.window_min_size));
        self.add(parent, NodeEntry::new(WidgetKind::Window(window)).with_placement(placement))
    }

    /// Empty list box
    pub fn add_list_box(&mut self, parent: NodeId, max_size: f32) -> Result<NodeId, UiError> {
        let list = ListBox::new(self.scroll_box(ScrollAxis::Vertical, max_size));
        self.add(parent, NodeEntry::new(WidgetKind::ListBox(list)))
    }

    /// Append a selectable row to a list box
    ///
    /// Rows are as wide as the widest row.
    pub fn add_list_row(&mut self, list: NodeId, text: &str) -> Result<NodeId, UiError> {
        self.expect_kind(list, "list box", |kind| kind.as_list_box().is_some())?;

        let button = LabelButton::new(self.metrics(), &RichText::from(text));
        let placement = Placement::default().with_dim_alignment(DimAlignments::WIDTH);
        let id = self.add(list, NodeEntry::new(WidgetKind::Button(button)).with_placement(placement))?;

        if let Some(list) = self.tree.get_mut(list).and_then(|entry| entry.kind.as_list_box_mut()) {
            list.push_row(id);
        }
        Ok(id)
    }

    /// Dropdown showing the first of `choices`
    ///
    /// The list opens below the display button and draws above its siblings.
    pub fn add_dropdown(
        &mut self,
        parent: NodeId,
        choices: &[&str],
        max_size: f32,
        placement: Placement,
    ) -> Result<NodeId, UiError> {
        let id = self.add(parent, NodeEntry::new(WidgetKind::Container).with_placement(placement))?;

        let first = choices.first().copied().unwrap_or_default();
        let mut display = LabelButton::new(self.metrics(), &RichText::from(first));
        display.set_auto_size(false);
        let display = self.add(
            id,
            NodeEntry::new(WidgetKind::Button(display))
                .with_placement(Placement::default().with_dim_alignment(DimAlignments::BOTH)),
        )?;

        let list = self.add_list_box(id, max_size)?;
        if let Some(entry) = self.tree.get_mut(list) {
            entry.placement.parent_alignment = ParentAlignments::BOTTOM | ParentAlignments::LEFT | ParentAlignments::INNER_H;
        }
        self.tree.set_z_offset(list, 1)?;
        self.tree.set_visible(list, false)?;

        for choice in choices {
            self.add_list_row(list, choice)?;
        }
        if let Some(list) = self.tree.get_mut(list).and_then(|entry| entry.kind.as_list_box_mut()) {
            list.set_selection(Some(0));
        }

        self.tree.set_kind(id, WidgetKind::Dropdown(Dropdown::new(display, list)))?;
        Ok(id)
    }

    fn expect_kind(&self, node: NodeId, expected: &'static str, check: impl Fn(&WidgetKind) -> bool) -> Result<(), UiError> {
        let entry = self.tree.get(node).ok_or(TreeError::InvalidNode(node))?;
        if check(&entry.kind) {
            Ok(())
        } else {
            Err(UiError::WrongKind { node, expected })
        }
    }
}
