//! Widgets
//!
//! Every node carries one [`WidgetKind`]. The pipeline dispatches each pass
//! through the enum to the capability a widget implements; variants without
//! that capability fall through to a no-op.

pub mod capability;
mod draw;

mod button;
mod dropdown;
mod label;
mod list_box;
mod panel;
mod scroll_box;
mod slider;
mod text_field;
mod window;

pub use button::{ButtonVisual, LabelButton};
pub use capability::{Arranging, Clickable, Drawable, Sizable};
pub use draw::QuadEmitter;
pub use dropdown::Dropdown;
pub use label::Label;
pub use list_box::ListBox;
pub use panel::Panel;
pub use scroll_box::{ScrollAxis, ScrollBox, ScrollMember};
pub use slider::Slider;
pub use text_field::TextField;
pub use window::{ResizeEdges, Window, WindowMode};

use crate::cursor::CursorFlags;
use crate::pipeline::FrameContext;
use crate::space::SpaceNode;
use crate::tree::{NodeEntry, NodeId, UiTree};

/// Payload of a node
#[derive(Debug, Default)]
pub enum WidgetKind {
    /// Grouping node with no behaviour of its own
    #[default]
    Container,
    /// Coordinate space root
    Space(SpaceNode),
    /// Colored rectangle
    Panel(Panel),
    /// Static text
    Label(Label),
    /// Clickable text button
    Button(LabelButton),
    /// Editable text
    TextField(TextField),
    /// Draggable value
    Slider(Slider),
    /// Scrolling member list
    ScrollBox(ScrollBox),
    /// Movable, resizable frame
    Window(Window),
    /// Scrolling list of selectable rows
    ListBox(ListBox),
    /// Button that opens a list
    Dropdown(Dropdown),
}

macro_rules! kind_accessors {
    ($($variant:ident($ty:ty) => $get:ident, $get_mut:ident;)*) => {
        impl WidgetKind {
            $(
                #[doc = concat!("Payload if this is a `", stringify!($variant), "`")]
                pub fn $get(&self) -> Option<&$ty> {
                    match self {
                        WidgetKind::$variant(widget) => Some(widget),
                        _ => None,
                    }
                }

                #[doc = concat!("Mutable payload if this is a `", stringify!($variant), "`")]
                pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        WidgetKind::$variant(widget) => Some(widget),
                        _ => None,
                    }
                }
            )*
        }

        // The widget's state is writable through an entry, its kind is not
        impl NodeEntry {
            $(
                #[doc = concat!("Mutable payload if this node is a `", stringify!($variant), "`")]
                pub fn $get_mut(&mut self) -> Option<&mut $ty> {
                    self.kind.$get_mut()
                }
            )*
        }
    };
}

kind_accessors! {
    Space(SpaceNode) => as_space, as_space_mut;
    Panel(Panel) => as_panel, as_panel_mut;
    Label(Label) => as_label, as_label_mut;
    Button(LabelButton) => as_button, as_button_mut;
    TextField(TextField) => as_text_field, as_text_field_mut;
    Slider(Slider) => as_slider, as_slider_mut;
    ScrollBox(ScrollBox) => as_scroll_box, as_scroll_box_mut;
    Window(Window) => as_window, as_window_mut;
    ListBox(ListBox) => as_list_box, as_list_box_mut;
    Dropdown(Dropdown) => as_dropdown, as_dropdown_mut;
}

impl WidgetKind {
    /// Short name used in logs and tree dumps
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Container => "Container",
            WidgetKind::Space(_) => "Space",
            WidgetKind::Panel(_) => "Panel",
            WidgetKind::Label(_) => "Label",
            WidgetKind::Button(_) => "Button",
            WidgetKind::TextField(_) => "TextField",
            WidgetKind::Slider(_) => "Slider",
            WidgetKind::ScrollBox(_) => "ScrollBox",
            WidgetKind::Window(_) => "Window",
            WidgetKind::ListBox(_) => "ListBox",
            WidgetKind::Dropdown(_) => "Dropdown",
        }
    }

    /// True for coordinate space roots
    pub fn is_space(&self) -> bool {
        matches!(self, WidgetKind::Space(_))
    }

    /// Cursor behaviour a freshly created node of this kind starts with
    pub fn default_cursor_flags(&self) -> CursorFlags {
        match self {
            WidgetKind::Container | WidgetKind::Space(_) | WidgetKind::Panel(_) | WidgetKind::Label(_) => {
                CursorFlags::default()
            }
            WidgetKind::Button(_) | WidgetKind::TextField(_) | WidgetKind::Slider(_) => CursorFlags::exclusive(),
            WidgetKind::ScrollBox(_)
            | WidgetKind::Window(_)
            | WidgetKind::ListBox(_)
            | WidgetKind::Dropdown(_) => CursorFlags::capturing(),
        }
    }

    pub(crate) fn update_size(&mut self, id: NodeId, tree: &mut UiTree) {
        match self {
            WidgetKind::Label(widget) => widget.update_size(id, tree),
            WidgetKind::Button(widget) => widget.update_size(id, tree),
            WidgetKind::TextField(widget) => widget.update_size(id, tree),
            WidgetKind::ScrollBox(widget) => widget.update_size(id, tree),
            WidgetKind::ListBox(widget) => widget.update_size(id, tree),
            WidgetKind::Container
            | WidgetKind::Space(_)
            | WidgetKind::Panel(_)
            | WidgetKind::Slider(_)
            | WidgetKind::Window(_)
            | WidgetKind::Dropdown(_) => {}
        }
    }

    pub(crate) fn arrange(&mut self, id: NodeId, tree: &mut UiTree) {
        match self {
            WidgetKind::ScrollBox(widget) => widget.arrange(id, tree),
            WidgetKind::ListBox(widget) => widget.arrange(id, tree),
            WidgetKind::Dropdown(widget) => widget.arrange(id, tree),
            WidgetKind::Container
            | WidgetKind::Space(_)
            | WidgetKind::Panel(_)
            | WidgetKind::Label(_)
            | WidgetKind::Button(_)
            | WidgetKind::TextField(_)
            | WidgetKind::Slider(_)
            | WidgetKind::Window(_) => {}
        }
    }

    pub(crate) fn draw(&self, out: &mut QuadEmitter<'_>) {
        match self {
            WidgetKind::Panel(widget) => widget.draw(out),
            WidgetKind::Label(widget) => widget.draw(out),
            WidgetKind::Button(widget) => widget.draw(out),
            WidgetKind::TextField(widget) => widget.draw(out),
            WidgetKind::Slider(widget) => widget.draw(out),
            WidgetKind::ScrollBox(widget) => widget.draw(out),
            WidgetKind::Window(widget) => widget.draw(out),
            WidgetKind::ListBox(widget) => widget.draw(out),
            WidgetKind::Container | WidgetKind::Space(_) | WidgetKind::Dropdown(_) => {}
        }
    }

    pub(crate) fn handle_input(&mut self, id: NodeId, tree: &mut UiTree, ctx: &mut FrameContext<'_>) {
        match self {
            WidgetKind::Button(widget) => widget.handle_input(id, tree, ctx),
            WidgetKind::TextField(widget) => widget.handle_input(id, tree, ctx),
            WidgetKind::Slider(widget) => widget.handle_input(id, tree, ctx),
            WidgetKind::ScrollBox(widget) => widget.handle_input(id, tree, ctx),
            WidgetKind::Window(widget) => widget.handle_input(id, tree, ctx),
            WidgetKind::ListBox(widget) => widget.handle_input(id, tree, ctx),
            WidgetKind::Dropdown(widget) => widget.handle_input(id, tree, ctx),
            WidgetKind::Container | WidgetKind::Space(_) | WidgetKind::Panel(_) | WidgetKind::Label(_) => {}
        }
    }

    pub(crate) fn cancel_input(&mut self) {
        match self {
            WidgetKind::Button(widget) => widget.cancel_input(),
            WidgetKind::TextField(widget) => widget.cancel_input(),
            WidgetKind::Slider(widget) => widget.cancel_input(),
            WidgetKind::ScrollBox(widget) => widget.cancel_input(),
            WidgetKind::Window(widget) => widget.cancel_input(),
            WidgetKind::ListBox(widget) => widget.cancel_input(),
            WidgetKind::Dropdown(widget) => widget.cancel_input(),
            WidgetKind::Container | WidgetKind::Space(_) | WidgetKind::Panel(_) | WidgetKind::Label(_) => {}
        }
    }
}
