//! Text label widget

use std::rc::Rc;

use crate::foundation::math::Vec2;
use crate::text::{GlyphMetrics, RichText, TextBoard, TextMode};
use crate::tree::{NodeId, UiTree};
use super::{Drawable, QuadEmitter, Sizable};

/// Static text drawn from a [`TextBoard`]
///
/// Auto-sized labels push their natural text size into the node; fixed-size
/// labels take the node size and wrap to its width.
#[derive(Debug)]
pub struct Label {
    board: TextBoard,
}

impl Label {
    /// Auto-sized label
    pub fn new(metrics: Rc<dyn GlyphMetrics>, mode: TextMode) -> Self {
        Self { board: TextBoard::new(metrics, mode) }
    }

    /// Auto-sized label holding `text`
    pub fn with_text(metrics: Rc<dyn GlyphMetrics>, mode: TextMode, text: &RichText) -> Self {
        let mut label = Self::new(metrics, mode);
        label.set_text(text);
        label
    }

    /// Text board
    pub fn board(&self) -> &TextBoard {
        &self.board
    }

    /// Mutable text board
    pub fn board_mut(&mut self) -> &mut TextBoard {
        &mut self.board
    }

    /// Replace the text
    pub fn set_text(&mut self, text: &RichText) {
        self.board.builder_mut().set_text(text);
    }

    /// Current text
    pub fn text(&self) -> RichText {
        self.board.builder().text()
    }
}

impl Sizable for Label {
    fn update_size(&mut self, id: NodeId, tree: &mut UiTree) {
        let Some(entry) = tree.get_mut(id) else {
            return;
        };
        if self.board.auto_resize() {
            entry.placement.unscaled_size = self.board.size();
        } else {
            self.board.set_fixed_size(entry.placement.unscaled_size);
        }
    }
}

impl Drawable for Label {
    fn draw(&self, out: &mut QuadEmitter<'_>) {
        out.text(&self.board, Vec2::zeros());
    }
}
