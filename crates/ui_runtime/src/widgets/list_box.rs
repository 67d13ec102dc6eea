//! List box - a scroll box of selectable button rows

use crate::events::UiEventKind;
use crate::foundation::math::Vec4;
use crate::pipeline::FrameContext;
use crate::render::MaterialId;
use crate::tree::{NodeId, UiTree};
use super::{Arranging, Clickable, Drawable, QuadEmitter, ScrollBox, Sizable};

/// Scrolling list with a single selection
///
/// Rows are [`super::LabelButton`] children; clicking one selects it.
#[derive(Debug, Clone)]
pub struct ListBox {
    scroll: ScrollBox,
    rows: Vec<NodeId>,
    selection: Option<usize>,

    /// Background fill
    pub background: Vec4,
}

impl ListBox {
    /// Create an empty list over a configured scroll box
    pub fn new(scroll: ScrollBox) -> Self {
        Self {
            scroll,
            rows: Vec::new(),
            selection: None,
            background: Vec4::new(0.08, 0.08, 0.1, 0.95),
        }
    }

    /// Underlying scroll box
    pub fn scroll(&self) -> &ScrollBox {
        &self.scroll
    }

    /// Mutable scroll box
    pub fn scroll_mut(&mut self) -> &mut ScrollBox {
        &mut self.scroll
    }

    /// Row nodes in order
    pub fn rows(&self) -> &[NodeId] {
        &self.rows
    }

    /// Append a row; the node must also be registered under the list
    pub fn push_row(&mut self, node: NodeId) {
        if !self.rows.contains(&node) {
            self.rows.push(node);
            self.scroll.push_member(node);
        }
    }

    /// Index of a row node
    pub fn row_index(&self, node: NodeId) -> Option<usize> {
        self.rows.iter().position(|&row| row == node)
    }

    /// Selected row index
    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Selected row node
    pub fn selected_row(&self) -> Option<NodeId> {
        self.selection.and_then(|index| self.rows.get(index).copied())
    }

    /// Select a row without emitting an event; out-of-range clears
    pub fn set_selection(&mut self, selection: Option<usize>) {
        self.selection = selection.filter(|&index| index < self.rows.len());
    }
}

impl Sizable for ListBox {
    fn update_size(&mut self, id: NodeId, tree: &mut UiTree) {
        let selected = self.selected_row();
        self.rows.retain(|&row| tree.parent(row) == Some(id));
        self.selection = selected.and_then(|row| self.row_index(row));

        self.scroll.update_size(id, tree);
    }
}

impl Arranging for ListBox {
    fn arrange(&mut self, id: NodeId, tree: &mut UiTree) {
        self.scroll.arrange(id, tree);

        for (index, &row) in self.rows.iter().enumerate() {
            if let Some(button) = tree.get_mut(row).and_then(|entry| entry.kind.as_button_mut()) {
                button.selected = self.selection == Some(index);
            }
        }
    }
}

impl Drawable for ListBox {
    fn draw(&self, out: &mut QuadEmitter<'_>) {
        out.fill(MaterialId::SOLID, self.background);
    }
}

impl Clickable for ListBox {
    fn handle_input(&mut self, id: NodeId, tree: &mut UiTree, ctx: &mut FrameContext<'_>) {
        self.scroll.handle_input(id, tree, ctx);

        let clicked = ctx
            .events
            .iter()
            .filter(|event| event.kind == UiEventKind::Clicked)
            .find_map(|event| self.row_index(event.source));

        if let Some(index) = clicked {
            if self.selection != Some(index) {
                self.selection = Some(index);
                ctx.events.send(id, UiEventKind::SelectionChanged(Some(index)));
            }
        }
    }
}
