//! Styled text runs
//!
//! A [`RichText`] is pure data: no measurement, no layout. Concatenation and
//! range replacement are its only structural operations.

use std::ops::{Add, AddAssign, Range};
use super::GlyphFormat;

/// A string paired with the format used for every one of its characters
#[derive(Debug, Clone, PartialEq)]
pub struct RichRun {
    /// Run content
    pub text: String,
    /// Run format
    pub format: GlyphFormat,
}

impl RichRun {
    /// Create a run
    pub fn new(text: impl Into<String>, format: GlyphFormat) -> Self {
        Self { text: text.into(), format }
    }
}

/// Ordered sequence of styled runs
///
/// Adjacent runs with equal formats are merged and empty runs are dropped, so
/// two documents with the same characters and formats compare equal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichText {
    runs: Vec<RichRun>,
}

impl RichText {
    /// Create empty rich text
    pub fn new() -> Self {
        Self::default()
    }

    /// Create rich text holding one run
    pub fn from_str(text: &str, format: GlyphFormat) -> Self {
        let mut rich = Self::new();
        rich.push_str(text, format);
        rich
    }

    /// Build rich text from a character stream
    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = (char, GlyphFormat)>,
    {
        let mut rich = Self::new();
        for (ch, format) in chars {
            rich.push_char(ch, format);
        }
        rich
    }

    /// Runs in order
    pub fn runs(&self) -> &[RichRun] {
        &self.runs
    }

    /// Append a string with the given format
    pub fn push_str(&mut self, text: &str, format: GlyphFormat) {
        if text.is_empty() {
            return;
        }

        match self.runs.last_mut() {
            Some(last) if last.format == format => last.text.push_str(text),
            _ => self.runs.push(RichRun::new(text, format)),
        }
    }

    /// Append a single character
    pub fn push_char(&mut self, ch: char, format: GlyphFormat) {
        match self.runs.last_mut() {
            Some(last) if last.format == format => last.text.push(ch),
            _ => self.runs.push(RichRun::new(ch.to_string(), format)),
        }
    }

    /// Append a run
    pub fn push_run(&mut self, run: RichRun) {
        self.push_str(&run.text, run.format);
    }

    /// Append every run of another document
    pub fn append(&mut self, other: &RichText) {
        for run in &other.runs {
            self.push_str(&run.text, run.format);
        }
    }

    /// Number of characters across all runs
    pub fn char_count(&self) -> usize {
        self.runs.iter().map(|run| run.text.chars().count()).sum()
    }

    /// True when there are no characters
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Content without formatting
    pub fn plain_text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Characters paired with their formats
    pub fn chars(&self) -> impl Iterator<Item = (char, GlyphFormat)> + '_ {
        self.runs
            .iter()
            .flat_map(|run| run.text.chars().map(move |ch| (ch, run.format)))
    }

    /// Replace the characters in `range` (char offsets) with `replacement`
    ///
    /// The range is clamped to the document.
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &RichText) {
        let count = self.char_count();
        let start = range.start.min(count);
        let end = range.end.clamp(start, count);

        let mut rebuilt = RichText::new();
        rebuilt.extend_chars(self.chars().take(start));
        rebuilt.append(replacement);
        rebuilt.extend_chars(self.chars().skip(end));
        *self = rebuilt;
    }

    /// Copy of the characters in `range` (char offsets)
    pub fn slice(&self, range: Range<usize>) -> RichText {
        let len = range.end.saturating_sub(range.start);
        RichText::from_chars(self.chars().skip(range.start).take(len))
    }

    fn extend_chars<I>(&mut self, chars: I)
    where
        I: IntoIterator<Item = (char, GlyphFormat)>,
    {
        for (ch, format) in chars {
            self.push_char(ch, format);
        }
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::from_str(text, GlyphFormat::default())
    }
}

impl Add for RichText {
    type Output = RichText;

    fn add(mut self, rhs: RichText) -> RichText {
        self.append(&rhs);
        self
    }
}

impl AddAssign<&RichText> for RichText {
    fn add_assign(&mut self, rhs: &RichText) {
        self.append(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;

    fn red() -> GlyphFormat {
        GlyphFormat::default().with_color(Vec4::new(1.0, 0.0, 0.0, 1.0))
    }

    #[test]
    fn test_adjacent_runs_merge() {
        let mut text = RichText::from("Hello");
        text.push_str(", world", GlyphFormat::default());
        assert_eq!(text.runs().len(), 1);

        text.push_str("!", red());
        assert_eq!(text.runs().len(), 2);
        assert_eq!(text.plain_text(), "Hello, world!");
        assert_eq!(text.char_count(), 13);
    }

    #[test]
    fn test_concatenation_operators() {
        let a = RichText::from("ab");
        let b = RichText::from_str("cd", red());
        let mut joined = a.clone() + b.clone();
        assert_eq!(joined.plain_text(), "abcd");
        assert_eq!(joined.runs().len(), 2);

        joined += &a;
        assert_eq!(joined.plain_text(), "abcdab");
        assert_eq!(joined.runs().len(), 3);
    }

    #[test]
    fn test_replace_range() {
        let mut text = RichText::from("The quick fox");
        text.replace_range(4..9, &RichText::from_str("slow", red()));
        assert_eq!(text.plain_text(), "The slow fox");
        assert_eq!(text.runs().len(), 3);
        assert_eq!(text.runs()[1].format, red());

        // Clamped past the end
        text.replace_range(8..100, &RichText::new());
        assert_eq!(text.plain_text(), "The slow");
        assert_eq!(text.runs().len(), 2);
    }

    #[test]
    fn test_multibyte_slicing() {
        let text = RichText::from("héllo wörld");
        assert_eq!(text.slice(1..5).plain_text(), "éllo");
        assert_eq!(text.slice(6..11).plain_text(), "wörld");
    }
}
