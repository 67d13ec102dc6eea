//! Line breaking strategies
//!
//! All three layout strategies run through the same streaming [`LineWrapper`].
//! Glyphs are pushed one at a time and completed lines accumulate in order.
//! The wrapper's state at the start of a line is always "empty", so the lines
//! produced from any line start depend only on the glyphs that follow it. The
//! builder relies on this to stop an incremental rewrap as soon as the open
//! line starts exactly where an unchanged old line started.

use super::{Glyph, Line};

/// Tolerance for line-width comparisons
pub const WRAP_EPSILON: f32 = 1e-3;

/// How text is split into lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    /// Single line; newlines are stripped
    Unlined,
    /// Lines break only at explicit newlines
    #[default]
    Lined,
    /// Greedy word wrap against a maximum width, plus explicit newlines
    Wrapped,
}

/// Characters after which a word may end
pub fn is_separator(ch: char) -> bool {
    ch == '-' || (ch.is_whitespace() && ch != '\n')
}

/// Streaming greedy line breaker
#[derive(Debug)]
pub struct LineWrapper {
    mode: TextMode,
    max_width: f32,
    empty_height: f32,
    current: Vec<Glyph>,
    width: f32,
    completed: Vec<Line>,
}

impl LineWrapper {
    /// Create a wrapper; `max_width` only matters in [`TextMode::Wrapped`]
    pub fn new(mode: TextMode, max_width: f32, empty_height: f32) -> Self {
        Self {
            mode,
            max_width,
            empty_height,
            current: Vec::new(),
            width: 0.0,
            completed: Vec::new(),
        }
    }

    /// True when the next glyph will be the first of a new line
    pub fn at_line_start(&self) -> bool {
        self.current.is_empty()
    }

    /// Glyphs on the open line
    pub fn current_len(&self) -> usize {
        self.current.len()
    }

    /// Number of completed lines
    pub fn completed_len(&self) -> usize {
        self.completed.len()
    }

    /// Push every glyph of an iterator
    pub fn extend<I: IntoIterator<Item = Glyph>>(&mut self, glyphs: I) {
        for glyph in glyphs {
            self.push(glyph);
        }
    }

    /// Push one glyph, completing lines as the strategy requires
    pub fn push(&mut self, glyph: Glyph) {
        match self.mode {
            TextMode::Unlined => {
                if !glyph.is_line_break() {
                    self.append(glyph);
                }
            }
            TextMode::Lined => {
                let is_break = glyph.is_line_break();
                self.append(glyph);
                if is_break {
                    self.complete_current();
                }
            }
            TextMode::Wrapped => self.push_wrapped(glyph),
        }
    }

    fn push_wrapped(&mut self, glyph: Glyph) {
        if glyph.is_line_break() {
            self.append(glyph);
            self.complete_current();
            return;
        }

        // Trailing whitespace hangs past the edge instead of starting a line
        let hangs = glyph.ch.is_whitespace();
        if !hangs && !self.current.is_empty() && self.width + glyph.size.x > self.max_width + WRAP_EPSILON {
            let starts_word = self.current.last().is_some_and(|last| is_separator(last.ch))
                && !is_separator(glyph.ch);

            match self.last_word_boundary().filter(|_| !starts_word) {
                Some(boundary) => {
                    // Move the partial word to a fresh line and retry the glyph there
                    let carry = self.current.split_off(boundary);
                    self.complete_current();
                    for carried in carry {
                        self.append(carried);
                    }
                    self.push_wrapped(glyph);
                    return;
                }
                None => {
                    // Break right before the glyph: either it starts a word or
                    // the current word alone is wider than the line
                    self.complete_current();
                }
            }
        }

        self.append(glyph);
    }

    /// Index of the last separator/non-separator transition in the current line
    fn last_word_boundary(&self) -> Option<usize> {
        (1..self.current.len())
            .rev()
            .find(|&i| is_separator(self.current[i - 1].ch) && !is_separator(self.current[i].ch))
    }

    fn append(&mut self, glyph: Glyph) {
        self.width += glyph.size.x;
        self.current.push(glyph);
    }

    fn complete_current(&mut self) {
        let glyphs = std::mem::take(&mut self.current);
        self.width = 0.0;
        self.completed.push(Line::from_glyphs(glyphs, self.empty_height));
    }

    /// Take the completed lines, leaving the current line in place
    pub fn take_completed(&mut self) -> Vec<Line> {
        std::mem::take(&mut self.completed)
    }

    /// Complete the current line (even if empty) and return every line
    pub fn finish(mut self) -> Vec<Line> {
        self.complete_current();
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec2;
    use crate::render::MaterialId;
    use crate::text::GlyphFormat;

    fn glyphs(text: &str) -> Vec<Glyph> {
        text.chars()
            .map(|ch| Glyph {
                ch,
                format: GlyphFormat::default(),
                size: Vec2::new(if ch == '\n' { 0.0 } else { 10.0 }, 16.0),
                offset: Vec2::zeros(),
                material: MaterialId::SOLID,
            })
            .collect()
    }

    fn wrap(mode: TextMode, width: f32, text: &str) -> Vec<String> {
        let mut wrapper = LineWrapper::new(mode, width, 16.0);
        wrapper.extend(glyphs(text));
        wrapper.finish().iter().map(Line::text).collect()
    }

    #[test]
    fn test_unlined_strips_newlines() {
        assert_eq!(wrap(TextMode::Unlined, 30.0, "ab\ncd\n"), vec!["abcd"]);
    }

    #[test]
    fn test_lined_breaks_only_on_newline() {
        assert_eq!(wrap(TextMode::Lined, 30.0, "abcdef\ngh"), vec!["abcdef\n", "gh"]);
        assert_eq!(wrap(TextMode::Lined, 30.0, "ab\n"), vec!["ab\n", ""]);
    }

    #[test]
    fn test_wrapped_breaks_at_word_boundary() {
        // 10 units per glyph, 80 units per line
        assert_eq!(
            wrap(TextMode::Wrapped, 80.0, "the quick brown fox"),
            vec!["the ", "quick ", "brown ", "fox"]
        );
        assert_eq!(wrap(TextMode::Wrapped, 100.0, "ab cd ef gh"), vec!["ab cd ef ", "gh"]);
    }

    #[test]
    fn test_wrapped_forces_long_words() {
        assert_eq!(wrap(TextMode::Wrapped, 40.0, "abcdefghij"), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap(TextMode::Wrapped, 40.0, "ab cdefghij"), vec!["ab ", "cdef", "ghij"]);
    }

    #[test]
    fn test_wrapped_respects_explicit_breaks() {
        assert_eq!(wrap(TextMode::Wrapped, 100.0, "ab\ncd"), vec!["ab\n", "cd"]);
    }

    #[test]
    fn test_hyphen_is_a_break_point() {
        assert_eq!(wrap(TextMode::Wrapped, 60.0, "well-known"), vec!["well-", "known"]);
    }

    #[test]
    fn test_trailing_spaces_hang() {
        assert_eq!(wrap(TextMode::Wrapped, 30.0, "aaa bbb ccc"), vec!["aaa ", "bbb ", "ccc"]);
        assert_eq!(wrap(TextMode::Wrapped, 100.0, &"word ".repeat(4)), vec!["word word ", "word word "]);
    }

    #[test]
    fn test_glyph_wider_than_line_still_placed() {
        assert_eq!(wrap(TextMode::Wrapped, 5.0, "abc"), vec!["a", "b", "c"]);
    }
}
