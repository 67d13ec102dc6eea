//! Editable text field
//!
//! The caret and selection are flat character offsets into the document so
//! they survive rewrapping. Line/character indices are derived on demand.

use std::ops::Range;
use std::rc::Rc;

use crate::events::UiEventKind;
use crate::foundation::math::{Rect, Vec2, Vec4};
use crate::input::EditKey;
use crate::pipeline::FrameContext;
use crate::render::MaterialId;
use crate::text::{GlyphMetrics, RichText, TextBoard, TextIndex, TextMode};
use crate::tree::{NodeId, UiTree};
use super::{Clickable, Drawable, QuadEmitter, Sizable};

/// Result of one editing key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Changed,
    Moved,
    Submitted,
    Ignored,
}

/// Editable text with a caret
#[derive(Debug)]
pub struct TextField {
    board: TextBoard,
    caret: usize,
    selection: Option<Range<usize>>,
    focused: bool,

    /// Background while unfocused
    pub background: Vec4,
    /// Background while focused
    pub focused_background: Vec4,
    /// Caret color
    pub caret_color: Vec4,
    /// Selection highlight color
    pub selection_color: Vec4,
    /// Caret width in unscaled units
    pub caret_width: f32,
    /// Space between the text and the field edge, total per axis
    pub text_padding: Vec2,
    /// Maximum number of characters, if limited
    pub max_chars: Option<usize>,
}

impl TextField {
    /// Create an empty field
    pub fn new(metrics: Rc<dyn GlyphMetrics>, mode: TextMode) -> Self {
        let mut board = TextBoard::new(metrics, mode);
        board.set_auto_resize(false);

        Self {
            board,
            caret: 0,
            selection: None,
            focused: false,
            background: Vec4::new(0.1, 0.1, 0.1, 0.9),
            focused_background: Vec4::new(0.15, 0.15, 0.2, 1.0),
            caret_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            selection_color: Vec4::new(0.3, 0.45, 0.8, 0.6),
            caret_width: 1.0,
            text_padding: Vec2::new(6.0, 4.0),
            max_chars: None,
        }
    }

    /// Text board
    pub fn board(&self) -> &TextBoard {
        &self.board
    }

    /// Ignore wrap-width changes smaller than `hysteresis`
    pub fn set_wrap_hysteresis(&mut self, hysteresis: f32) {
        self.board.builder_mut().set_wrap_hysteresis(hysteresis);
    }

    /// Current text
    pub fn text(&self) -> RichText {
        self.board.builder().text()
    }

    /// Replace the text; the caret moves to the end
    pub fn set_text(&mut self, text: &RichText) {
        self.board.builder_mut().set_text(text);
        self.caret = self.char_count();
        self.selection = None;
    }

    /// Number of characters
    pub fn char_count(&self) -> usize {
        self.board.builder().char_count()
    }

    /// Caret as a flat character offset
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Move the caret, clamped to the text
    pub fn set_caret(&mut self, offset: usize) {
        self.caret = offset.min(self.char_count());
    }

    /// Caret as a line/character index
    pub fn caret_index(&self) -> TextIndex {
        self.board.builder().offset_to_index(self.caret)
    }

    /// True while the field receives typed characters
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Selected flat character range
    pub fn selection(&self) -> Option<Range<usize>> {
        self.selection.clone()
    }

    /// Select a flat character range; empty ranges clear the selection
    pub fn select(&mut self, range: Range<usize>) {
        let count = self.char_count();
        let start = range.start.min(count);
        let end = range.end.min(count);
        self.selection = (start < end).then_some(start..end);
        self.caret = end;
    }

    /// Select everything
    pub fn select_all(&mut self) {
        self.select(0..self.char_count());
    }

    /// Selected text, empty without a selection
    pub fn selected_text(&self) -> RichText {
        match self.selection_indices() {
            Some((start, end)) => self.board.builder().text_range(start, end),
            None => RichText::new(),
        }
    }

    /// Inclusive line/character bounds of the selection
    fn selection_indices(&self) -> Option<(TextIndex, TextIndex)> {
        let range = self.selection.as_ref()?;
        let builder = self.board.builder();
        Some((builder.offset_to_index(range.start), builder.offset_to_index(range.end - 1)))
    }

    /// Remove the selected text; false without a selection
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_indices() else {
            return false;
        };
        let first = self.selection.take().map_or(self.caret, |range| range.start);
        self.board.builder_mut().remove_range(start, end);
        self.caret = first.min(self.char_count());
        true
    }

    /// Insert characters at the caret, replacing the selection
    ///
    /// Returns true if the text changed.
    pub fn insert_chars(&mut self, chars: &[char]) -> bool {
        if chars.is_empty() {
            return false;
        }
        let mut changed = self.delete_selection();

        let room = self.max_chars.map_or(usize::MAX, |max| max.saturating_sub(self.char_count()));
        let accepted: String = chars.iter().take(room).collect();
        if accepted.is_empty() {
            return changed;
        }

        let builder = self.board.builder_mut();
        let before = builder.char_count();
        let format = builder.default_format();
        let index = builder.offset_to_index(self.caret);
        builder.insert(&RichText::from_str(&accepted, format), index);

        let inserted = builder.char_count() - before;
        self.caret += inserted;
        changed |= inserted > 0;
        changed
    }

    fn apply_key(&mut self, key: EditKey) -> KeyOutcome {
        let count = self.char_count();
        match key {
            EditKey::Backspace => {
                if self.delete_selection() {
                    return KeyOutcome::Changed;
                }
                if self.caret == 0 {
                    return KeyOutcome::Ignored;
                }
                self.remove_at(self.caret - 1);
                self.caret -= 1;
                KeyOutcome::Changed
            }
            EditKey::Delete => {
                if self.delete_selection() {
                    return KeyOutcome::Changed;
                }
                if self.caret >= count {
                    return KeyOutcome::Ignored;
                }
                self.remove_at(self.caret);
                KeyOutcome::Changed
            }
            EditKey::Left => self.move_caret(self.caret.saturating_sub(1)),
            EditKey::Right => self.move_caret((self.caret + 1).min(count)),
            EditKey::Home => {
                let index = self.caret_index();
                self.move_caret(self.offset_of(TextIndex::new(index.line, 0)))
            }
            EditKey::End => {
                let index = self.caret_index();
                let end = self.board.builder().line(index.line).map_or(0, |line| line.caret_len());
                self.move_caret(self.offset_of(TextIndex::new(index.line, end)))
            }
            EditKey::Up => self.move_vertically(1.0),
            EditKey::Down => self.move_vertically(-1.0),
            EditKey::Enter => KeyOutcome::Submitted,
        }
    }

    fn offset_of(&self, index: TextIndex) -> usize {
        self.board.builder().index_to_offset(index)
    }

    fn remove_at(&mut self, offset: usize) {
        let index = self.board.builder().offset_to_index(offset);
        self.board.builder_mut().remove_range(index, index);
    }

    fn move_caret(&mut self, offset: usize) -> KeyOutcome {
        self.selection = None;
        if offset == self.caret {
            return KeyOutcome::Ignored;
        }
        self.caret = offset;
        KeyOutcome::Moved
    }

    /// Move one line up (`direction` 1) or down (-1), keeping the x position
    fn move_vertically(&mut self, direction: f32) -> KeyOutcome {
        let index = self.caret_index();
        let target_line = if direction > 0.0 { index.line.checked_sub(1) } else { Some(index.line + 1) };
        let Some(target_line) = target_line.filter(|&line| line < self.board.builder().line_count()) else {
            return KeyOutcome::Ignored;
        };

        let x = self.board.caret_offset(index).x;
        let y = self.board.caret_offset(TextIndex::new(target_line, 0)).y;
        let target = self.board.char_at(Vec2::new(x, y));
        self.move_caret(self.offset_of(target))
    }

    fn set_focused(&mut self, id: NodeId, focused: bool, ctx: &mut FrameContext<'_>) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if focused {
            *ctx.keyboard_focus = Some(id);
        } else {
            self.selection = None;
            if *ctx.keyboard_focus == Some(id) {
                *ctx.keyboard_focus = None;
            }
        }
        ctx.events.send(id, UiEventKind::FocusChanged(focused));
    }

    fn text_rect(&self, start: TextIndex, end: TextIndex) -> Rect {
        let height = self.board.builder().line(start.line).map_or(0.0, |line| line.height());
        let a = self.board.caret_offset(start);
        let b = self.board.caret_offset(end);
        Rect::from_min_max(Vec2::new(a.x, a.y - height * 0.5), Vec2::new(b.x, a.y + height * 0.5))
    }
}

impl Sizable for TextField {
    fn update_size(&mut self, id: NodeId, tree: &mut UiTree) {
        if let Some(entry) = tree.get(id) {
            self.board.set_fixed_size(entry.placement.unscaled_size - self.text_padding);
        }
    }
}

impl Drawable for TextField {
    fn draw(&self, out: &mut QuadEmitter<'_>) {
        let background = if self.focused { self.focused_background } else { self.background };
        out.fill(MaterialId::SOLID, background);

        if let Some((start, end)) = self.selection_indices() {
            for line in start.line..=end.line {
                let first = if line == start.line { start.ch } else { 0 };
                let last = if line == end.line {
                    end.ch + 1
                } else {
                    self.board.builder().line(line).map_or(0, |l| l.caret_len())
                };
                let rect = self.text_rect(TextIndex::new(line, first), TextIndex::new(line, last));
                out.rect(&rect, MaterialId::SOLID, self.selection_color);
            }
        }

        out.text(&self.board, Vec2::zeros());

        if self.focused {
            let index = self.caret_index();
            let anchor = self.board.caret_offset(index);
            let height = self.board.builder().line(index.line).map_or(0.0, |line| line.height());
            out.rect(
                &Rect::new(anchor, Vec2::new(self.caret_width, height)),
                MaterialId::SOLID,
                self.caret_color,
            );
        }
    }
}

impl Clickable for TextField {
    fn handle_input(&mut self, id: NodeId, tree: &mut UiTree, ctx: &mut FrameContext<'_>) {
        if self.focused && *ctx.keyboard_focus != Some(id) {
            self.set_focused(id, false, ctx);
        }

        if ctx.input.left().pressed {
            if ctx.arbiter.is_owner(id) {
                self.set_focused(id, true, ctx);
                if let Some(local) = ctx.local_pointer(tree, id) {
                    let index = self.board.char_at(local);
                    self.selection = None;
                    self.caret = self.offset_of(index);
                }
            } else {
                self.set_focused(id, false, ctx);
            }
        }

        if !self.focused {
            return;
        }

        let mut changed = self.insert_chars(&ctx.input.typed);
        for &key in &ctx.input.keys {
            match self.apply_key(key) {
                KeyOutcome::Changed => changed = true,
                KeyOutcome::Submitted => ctx.events.send(id, UiEventKind::Submitted),
                KeyOutcome::Moved | KeyOutcome::Ignored => {}
            }
        }

        if changed {
            ctx.events.send(id, UiEventKind::TextChanged);
        }
        let line = self.caret_index().line;
        self.board.scroll_to_line(line);
    }
}
