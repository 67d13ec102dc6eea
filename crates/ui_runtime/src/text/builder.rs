//! Incremental text layout
//!
//! [`TextBuilder`] keeps a document as laid-out [`Line`]s and edits them in
//! place. Edits rewrap from a line start that cannot have moved and stop as
//! soon as the new layout re-synchronises with an untouched old line, so
//! typing into a long document costs the affected lines, not the document.

use std::fmt;
use std::rc::Rc;

use crate::foundation::math::{finite_or_zero, Vec2};
use super::{
    is_renderable, is_separator, measure_scaled, Glyph, GlyphFormat, GlyphMetrics, Line,
    LineWrapper, RichText, TextIndex, TextMode,
};

const FALLBACK_LINE_HEIGHT: f32 = 16.0;
const DEFAULT_WRAP_HYSTERESIS: f32 = 2.0;

/// Lines replaced by the most recent relayout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelayoutSpan {
    /// First replaced line
    pub first_line: usize,
    /// Number of old lines removed
    pub old_lines: usize,
    /// Number of new lines inserted
    pub new_lines: usize,
}

/// A rich text document laid out into lines
pub struct TextBuilder {
    metrics: Rc<dyn GlyphMetrics>,
    mode: TextMode,
    wrap_width: f32,
    wrap_hysteresis: f32,
    default_format: GlyphFormat,
    empty_height: f32,
    lines: Vec<Line>,
    last_relayout: RelayoutSpan,
}

impl fmt::Debug for TextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBuilder")
            .field("mode", &self.mode)
            .field("wrap_width", &self.wrap_width)
            .field("lines", &self.lines.len())
            .field("chars", &self.char_count())
            .finish_non_exhaustive()
    }
}

impl TextBuilder {
    /// Create an empty document
    pub fn new(metrics: Rc<dyn GlyphMetrics>, mode: TextMode) -> Self {
        let mut builder = Self {
            metrics,
            mode,
            wrap_width: f32::INFINITY,
            wrap_hysteresis: DEFAULT_WRAP_HYSTERESIS,
            default_format: GlyphFormat::default(),
            empty_height: FALLBACK_LINE_HEIGHT,
            lines: Vec::new(),
            last_relayout: RelayoutSpan::default(),
        };
        builder.empty_height = builder.measure_empty_height();
        builder.lines.push(Line::from_glyphs(Vec::new(), builder.empty_height));
        builder
    }

    fn measure_empty_height(&self) -> f32 {
        let height = measure_scaled(self.metrics.as_ref(), ' ', &self.default_format).line_height;
        if height > 0.0 { height } else { FALLBACK_LINE_HEIGHT }
    }

    /// Current layout strategy
    pub fn mode(&self) -> TextMode {
        self.mode
    }

    /// Switch layout strategy; always a full relayout
    pub fn set_mode(&mut self, mode: TextMode) {
        if self.mode != mode {
            self.mode = mode;
            self.relayout_all();
        }
    }

    /// Maximum line width used by [`TextMode::Wrapped`]
    pub fn wrap_width(&self) -> f32 {
        self.wrap_width
    }

    /// Set the wrap width
    ///
    /// Changes smaller than the hysteresis band are ignored and keep the old
    /// width. Returns true when the width was applied.
    pub fn set_wrap_width(&mut self, width: f32) -> bool {
        let width = finite_or_zero(width).max(0.0);
        if (width - self.wrap_width).abs() < self.wrap_hysteresis {
            return false;
        }

        self.wrap_width = width;
        if self.mode == TextMode::Wrapped {
            self.relayout_all();
        }
        true
    }

    /// Set the wrap-width hysteresis band
    pub fn set_wrap_hysteresis(&mut self, hysteresis: f32) {
        self.wrap_hysteresis = finite_or_zero(hysteresis).max(0.0);
    }

    /// Format used to size empty lines
    pub fn default_format(&self) -> GlyphFormat {
        self.default_format
    }

    /// Change the format used to size empty lines
    pub fn set_default_format(&mut self, format: GlyphFormat) {
        self.default_format = format;
        self.empty_height = self.measure_empty_height();
        for line in self.lines.iter_mut().filter(|line| line.is_empty()) {
            line.refresh(self.empty_height);
        }
    }

    /// Append text at the end of the document
    pub fn append(&mut self, text: &RichText) {
        let end = self.last_index();
        self.insert(text, end);
    }

    /// Insert text before the character at `index` (clamped)
    pub fn insert(&mut self, text: &RichText, index: TextIndex) {
        let glyphs = self.shape(text);
        if glyphs.is_empty() {
            return;
        }

        let at = self.clamp_index(index);
        self.splice(at, at, glyphs);
    }

    /// Remove the characters from `start` to `end`, both inclusive
    pub fn remove_range(&mut self, start: TextIndex, end: TextIndex) {
        let Some((start, end)) = self.inclusive_offsets(start, end) else {
            return;
        };

        let from = self.offset_to_index(start);
        let to = self.offset_to_index(end);
        self.splice(from, to, Vec::new());
    }

    /// Apply a format to the characters from `start` to `end`, both inclusive
    pub fn set_formatting(&mut self, start: TextIndex, end: TextIndex, format: GlyphFormat) {
        let Some((start, end)) = self.inclusive_offsets(start, end) else {
            return;
        };

        let restyled: Vec<Glyph> = self
            .glyphs()
            .skip(start)
            .take(end - start)
            .map(|glyph| self.make_glyph(glyph.ch, format))
            .collect();

        let same_sizes = self
            .glyphs()
            .skip(start)
            .zip(&restyled)
            .all(|(old, new)| old.size == new.size);

        if same_sizes {
            self.restyle_in_place(start, restyled);
        } else {
            let from = self.offset_to_index(start);
            let to = self.offset_to_index(end);
            self.splice(from, to, restyled);
        }
    }

    fn restyle_in_place(&mut self, start: usize, restyled: Vec<Glyph>) {
        let mut remaining = restyled.into_iter();
        let mut offset = 0;
        let mut first_line = None;
        let mut touched = 0;

        for (index, line) in self.lines.iter_mut().enumerate() {
            let len = line.len();
            if offset + len > start {
                let skip = start.saturating_sub(offset);
                let mut changed = false;
                for glyph in line.glyphs_mut().iter_mut().skip(skip) {
                    match remaining.next() {
                        Some(new) => {
                            glyph.format = new.format;
                            glyph.material = new.material;
                            changed = true;
                        }
                        None => break,
                    }
                }
                if changed {
                    first_line.get_or_insert(index);
                    touched += 1;
                }
            }
            offset += len;
            if remaining.len() == 0 {
                break;
            }
        }

        self.last_relayout = RelayoutSpan {
            first_line: first_line.unwrap_or(0),
            old_lines: touched,
            new_lines: touched,
        };
        log::trace!("Restyled {} line(s) without rewrapping", touched);
    }

    /// Remove all text
    pub fn clear(&mut self) {
        let old_lines = self.lines.len();
        self.lines = vec![Line::from_glyphs(Vec::new(), self.empty_height)];
        self.last_relayout = RelayoutSpan { first_line: 0, old_lines, new_lines: 1 };
    }

    /// Multiply the scale of every character by `factor`
    pub fn rescale(&mut self, factor: f32) {
        if !factor.is_finite() || factor <= 0.0 {
            log::warn!("Ignoring text rescale by {}", factor);
            return;
        }

        self.default_format.scale *= factor;
        self.empty_height = self.measure_empty_height();

        let metrics = Rc::clone(&self.metrics);
        for line in &mut self.lines {
            for glyph in line.glyphs_mut().iter_mut() {
                glyph.format.scale *= factor;
                let measure = measure_scaled(metrics.as_ref(), glyph.ch, &glyph.format);
                glyph.size = Vec2::new(measure.advance, measure.line_height);
            }
        }

        self.relayout_all();
    }

    /// Replace the whole document
    pub fn set_text(&mut self, text: &RichText) {
        self.clear();
        self.append(text);
    }

    /// The whole document as rich text
    pub fn text(&self) -> RichText {
        RichText::from_chars(self.glyphs().map(|glyph| (glyph.ch, glyph.format)))
    }

    /// Characters from `start` to `end`, both inclusive
    pub fn text_range(&self, start: TextIndex, end: TextIndex) -> RichText {
        match self.inclusive_offsets(start, end) {
            Some((start, end)) => RichText::from_chars(
                self.glyphs()
                    .skip(start)
                    .take(end - start)
                    .map(|glyph| (glyph.ch, glyph.format)),
            ),
            None => RichText::new(),
        }
    }

    /// Number of lines; never zero
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Line at `index`
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// All lines in order
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Every glyph in document order
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.lines.iter().flat_map(|line| line.glyphs().iter())
    }

    /// Glyph at `index`, if it names a character
    pub fn glyph(&self, index: TextIndex) -> Option<&Glyph> {
        self.lines.get(index.line)?.glyphs().get(index.ch)
    }

    /// Total number of characters
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    /// True when the document holds no characters
    pub fn is_empty(&self) -> bool {
        self.char_count() == 0
    }

    /// Bounding size: widest line by summed line heights
    pub fn size(&self) -> Vec2 {
        self.lines.iter().fold(Vec2::zeros(), |size, line| {
            Vec2::new(size.x.max(line.width()), size.y + line.height())
        })
    }

    /// Clamp an index to a valid caret position
    pub fn clamp_index(&self, index: TextIndex) -> TextIndex {
        let line = index.line.min(self.lines.len() - 1);
        let ch = index.ch.min(self.lines[line].len());
        TextIndex::new(line, ch)
    }

    /// Position just past the last character
    pub fn last_index(&self) -> TextIndex {
        let line = self.lines.len() - 1;
        TextIndex::new(line, self.lines[line].len())
    }

    /// Flat character offset of a (clamped) index
    pub fn index_to_offset(&self, index: TextIndex) -> usize {
        let index = self.clamp_index(index);
        self.lines[..index.line].iter().map(Line::len).sum::<usize>() + index.ch
    }

    /// Index of a flat character offset
    ///
    /// Offsets on a line boundary map to the start of the following line.
    /// Offsets past the end map to [`TextBuilder::last_index`].
    pub fn offset_to_index(&self, offset: usize) -> TextIndex {
        let mut start = 0;
        for (line, glyphs) in self.lines.iter().enumerate() {
            if offset < start + glyphs.len() {
                return TextIndex::new(line, offset - start);
            }
            start += glyphs.len();
        }
        self.last_index()
    }

    /// Lines replaced by the most recent edit
    pub fn last_relayout(&self) -> RelayoutSpan {
        self.last_relayout
    }

    /// Ordered flat offsets for an inclusive index range, end made exclusive
    fn inclusive_offsets(&self, start: TextIndex, end: TextIndex) -> Option<(usize, usize)> {
        let count = self.char_count();
        let a = self.index_to_offset(start);
        let b = self.index_to_offset(end);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        if lo >= count {
            return None;
        }
        Some((lo, (hi + 1).min(count)))
    }

    fn make_glyph(&self, ch: char, format: GlyphFormat) -> Glyph {
        let measure = measure_scaled(self.metrics.as_ref(), ch, &format);
        Glyph {
            ch,
            format,
            size: Vec2::new(measure.advance, measure.line_height),
            offset: Vec2::zeros(),
            material: measure.material,
        }
    }

    fn shape(&self, text: &RichText) -> Vec<Glyph> {
        text.chars()
            .filter(|(ch, _)| is_renderable(*ch))
            .map(|(ch, format)| self.make_glyph(ch, format))
            .collect()
    }

    /// Line whose start is unaffected by an edit at `at`
    ///
    /// Walks back to the start of the word preceding the edit, then one more
    /// line unless that line follows an explicit break.
    fn restart_line(&self, at: TextIndex) -> usize {
        if self.mode == TextMode::Unlined {
            return 0;
        }

        let (mut line, mut ch) = (at.line, at.ch);
        let mut word_line = line;
        let mut in_word = false;

        loop {
            if ch == 0 {
                if line == 0 || self.lines[line - 1].ends_paragraph() {
                    if !in_word {
                        word_line = line;
                    }
                    break;
                }
                line -= 1;
                ch = self.lines[line].len();
                continue;
            }

            let prev = self.lines[line].glyphs()[ch - 1].ch;
            if prev == '\n' || (in_word && is_separator(prev)) {
                if !in_word {
                    word_line = line;
                }
                break;
            }
            if !is_separator(prev) {
                in_word = true;
                word_line = line;
            }
            ch -= 1;
        }

        if word_line > 0 && !self.lines[word_line - 1].ends_paragraph() {
            word_line - 1
        } else {
            word_line
        }
    }

    /// Replace the glyphs in `[start, end)` with `middle` and rewrap locally
    fn splice(&mut self, start: TextIndex, end: TextIndex, middle: Vec<Glyph>) {
        let first = self.restart_line(start);
        let mut wrapper = LineWrapper::new(self.mode, self.wrap_width, self.empty_height);

        for line in &self.lines[first..start.line] {
            wrapper.extend(line.glyphs().iter().cloned());
        }
        wrapper.extend(self.lines[start.line].glyphs()[..start.ch].iter().cloned());
        wrapper.extend(middle);
        wrapper.extend(self.lines[end.line].glyphs()[end.ch..].iter().cloned());

        // Stop once the open line begins exactly where an untouched old line
        // began: everything from there on wraps the same as before
        let mut stop = self.lines.len();
        for k in end.line + 1..self.lines.len() {
            if wrapper.at_line_start() {
                stop = k;
                break;
            }
            wrapper.extend(self.lines[k].glyphs().iter().cloned());
            if wrapper.current_len() == self.lines[k].len() {
                stop = k;
                break;
            }
        }

        let new_lines = if stop < self.lines.len() {
            wrapper.take_completed()
        } else {
            wrapper.finish()
        };

        self.last_relayout = RelayoutSpan {
            first_line: first,
            old_lines: stop - first,
            new_lines: new_lines.len(),
        };
        log::trace!(
            "Rewrapped lines {}..{} into {} line(s)",
            first, stop, new_lines.len()
        );

        self.lines.splice(first..stop, new_lines).for_each(drop);
    }

    fn relayout_all(&mut self) {
        let old_lines = std::mem::take(&mut self.lines);
        let count = old_lines.len();

        let mut wrapper = LineWrapper::new(self.mode, self.wrap_width, self.empty_height);
        for line in old_lines {
            wrapper.extend(line.into_glyphs());
        }
        self.lines = wrapper.finish();

        self.last_relayout = RelayoutSpan { first_line: 0, old_lines: count, new_lines: self.lines.len() };
        log::trace!("Full relayout: {} line(s) -> {} line(s)", count, self.lines.len());
    }
}
