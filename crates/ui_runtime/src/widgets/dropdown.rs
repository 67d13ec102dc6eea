//! Dropdown - a button that opens a list of choices

use crate::events::UiEventKind;
use crate::pipeline::FrameContext;
use crate::tree::{NodeId, UiTree};
use super::{Arranging, Clickable};

/// Display button plus a popup [`super::ListBox`], both children of the
/// dropdown node
///
/// Clicking the display toggles the list. Picking a row copies its text to
/// the display and closes the list, as does a press anywhere outside.
#[derive(Debug, Clone)]
pub struct Dropdown {
    display: NodeId,
    list: NodeId,
    open: bool,
}

impl Dropdown {
    /// Wrap an existing display button and list box
    pub fn new(display: NodeId, list: NodeId) -> Self {
        Self { display, list, open: false }
    }

    /// Display button node
    pub fn display(&self) -> NodeId {
        self.display
    }

    /// List box node
    pub fn list(&self) -> NodeId {
        self.list
    }

    /// True while the list is shown
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide the list
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Copy the text of a list row onto the display button
    fn show_choice(&self, tree: &mut UiTree, row: NodeId) {
        let Some(text) = tree.get(row).and_then(|entry| entry.kind.as_button()).map(|button| button.text()) else {
            return;
        };
        if let Some(display) = tree.get_mut(self.display).and_then(|entry| entry.kind.as_button_mut()) {
            display.set_text(&text);
        }
    }
}

impl Arranging for Dropdown {
    fn arrange(&mut self, _id: NodeId, tree: &mut UiTree) {
        let _ = tree.set_visible(self.list, self.open);
    }
}

impl Clickable for Dropdown {
    fn handle_input(&mut self, id: NodeId, tree: &mut UiTree, ctx: &mut FrameContext<'_>) {
        let rows = tree
            .get(self.list)
            .and_then(|entry| entry.kind.as_list_box())
            .map(|list| list.rows().to_vec())
            .unwrap_or_default();

        let clicked = |source: NodeId| ctx.events.contains(source, &UiEventKind::Clicked);
        let picked = rows.iter().position(|&row| clicked(row));
        let toggled = clicked(self.display);
        let changed = ctx.events.iter().find_map(|event| match event.kind {
            UiEventKind::SelectionChanged(selection) if event.source == self.list => Some(selection),
            _ => None,
        });

        if let Some(index) = picked {
            self.open = false;
            self.show_choice(tree, rows[index]);
            if let Some(selection) = changed {
                ctx.events.send(id, UiEventKind::SelectionChanged(selection));
            }
        } else if toggled {
            self.open = !self.open;
        } else if self.open && ctx.input.left().pressed {
            let inside = ctx.arbiter.owner().is_some_and(|owner| tree.is_within(id, owner));
            if !inside {
                self.open = false;
            }
        }

        let _ = tree.set_visible(self.list, self.open);
    }
}
