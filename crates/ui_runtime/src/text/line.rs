//! Laid-out lines of positioned glyphs

use crate::foundation::math::Vec2;
use crate::render::MaterialId;
use super::{GlyphFormat, TextAlignment};

/// A measured character placed within its line
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Character
    pub ch: char,
    /// Format of the run the character came from
    pub format: GlyphFormat,
    /// Measured advance (x) and line height (y)
    pub size: Vec2,
    /// Left edge of the glyph relative to the line's left edge
    pub offset: Vec2,
    /// Billboard material
    pub material: MaterialId,
}

impl Glyph {
    /// True for glyphs that end a paragraph
    pub fn is_line_break(&self) -> bool {
        self.ch == '\n'
    }
}

/// Position of a character: line index and character index within the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TextIndex {
    /// Line index
    pub line: usize,
    /// Character index within the line
    pub ch: usize,
}

impl TextIndex {
    /// Create an index
    pub fn new(line: usize, ch: usize) -> Self {
        Self { line, ch }
    }
}

/// An ordered run of glyphs with its own bounding size
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Line {
    glyphs: Vec<Glyph>,
    size: Vec2,
}

impl Line {
    /// Build a line and compute its offsets and size
    pub fn from_glyphs(glyphs: Vec<Glyph>, empty_height: f32) -> Self {
        let mut line = Self { glyphs, size: Vec2::zeros() };
        line.refresh(empty_height);
        line
    }

    /// Recompute glyph offsets and the line size
    ///
    /// Must be called whenever the glyph sequence changes.
    pub fn refresh(&mut self, empty_height: f32) {
        let mut x = 0.0f32;
        let mut height = 0.0f32;

        for glyph in &mut self.glyphs {
            glyph.offset = Vec2::new(x, 0.0);
            x += glyph.size.x;
            height = height.max(glyph.size.y);
        }

        if self.glyphs.is_empty() {
            height = empty_height;
        }

        self.size = Vec2::new(x, height);
    }

    /// Glyphs in order
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Mutable glyph access; call [`Line::refresh`] after changing sizes
    pub(crate) fn glyphs_mut(&mut self) -> &mut Vec<Glyph> {
        &mut self.glyphs
    }

    /// Take the glyphs out, leaving the line empty
    pub(crate) fn into_glyphs(self) -> Vec<Glyph> {
        self.glyphs
    }

    /// Number of characters
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// True if the line holds no characters
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Bounding size of the line
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Line width
    pub fn width(&self) -> f32 {
        self.size.x
    }

    /// Line height
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// True when the line ends with an explicit line break
    pub fn ends_paragraph(&self) -> bool {
        self.glyphs.last().is_some_and(Glyph::is_line_break)
    }

    /// Number of characters a caret can sit before, excluding a trailing break
    pub fn caret_len(&self) -> usize {
        if self.ends_paragraph() { self.glyphs.len() - 1 } else { self.glyphs.len() }
    }

    /// Alignment taken from the first glyph's format
    pub fn alignment(&self) -> TextAlignment {
        self.glyphs.first().map_or(TextAlignment::Left, |g| g.format.alignment)
    }

    /// Line content as a string
    pub fn text(&self) -> String {
        self.glyphs.iter().map(|g| g.ch).collect()
    }
}
