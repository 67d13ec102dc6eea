//! Sized, aligned and clipped view over a [`TextBuilder`]
//!
//! Board coordinates are unscaled, centered on the board and y-up, the same
//! convention every node uses inside its coordinate space.

use std::rc::Rc;

use crate::foundation::math::{sanitize_size, Rect, Vec2, Vec4};
use crate::render::MaterialId;
use super::{GlyphMetrics, Line, TextAlignment, TextBuilder, TextIndex, TextMode};

/// One visible glyph, already clipped to the board
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphQuad {
    /// Glyph bounds in board coordinates
    pub rect: Rect,
    /// Texture coordinates of the bottom-left and top-right corners after clipping
    pub uv: [Vec2; 2],
    /// Tint
    pub color: Vec4,
    /// Glyph material
    pub material: MaterialId,
}

/// Text laid out inside a box
#[derive(Debug)]
pub struct TextBoard {
    builder: TextBuilder,
    auto_resize: bool,
    fixed_size: Vec2,
    scroll: f32,
}

impl TextBoard {
    /// Create an auto-resizing board
    pub fn new(metrics: Rc<dyn GlyphMetrics>, mode: TextMode) -> Self {
        Self {
            builder: TextBuilder::new(metrics, mode),
            auto_resize: true,
            fixed_size: Vec2::zeros(),
            scroll: 0.0,
        }
    }

    /// Underlying document
    pub fn builder(&self) -> &TextBuilder {
        &self.builder
    }

    /// Mutable access to the document
    pub fn builder_mut(&mut self) -> &mut TextBuilder {
        &mut self.builder
    }

    /// True when the board takes the natural size of its text
    pub fn auto_resize(&self) -> bool {
        self.auto_resize
    }

    /// Toggle auto-resizing
    pub fn set_auto_resize(&mut self, auto_resize: bool) {
        self.auto_resize = auto_resize;
        self.sync_wrap_width();
    }

    /// Size used when not auto-resizing
    pub fn fixed_size(&self) -> Vec2 {
        self.fixed_size
    }

    /// Set the fixed size; wrapped text follows its width
    pub fn set_fixed_size(&mut self, size: Vec2) {
        self.fixed_size = sanitize_size(size);
        self.sync_wrap_width();
    }

    fn sync_wrap_width(&mut self) {
        if !self.auto_resize && self.builder.mode() == TextMode::Wrapped {
            self.builder.set_wrap_width(self.fixed_size.x);
        }
    }

    /// Current box size
    pub fn size(&self) -> Vec2 {
        if self.auto_resize { self.builder.size() } else { self.fixed_size }
    }

    /// Vertical scroll offset; positive values reveal lower lines
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Set the scroll offset, clamped to the text overflow
    pub fn set_scroll(&mut self, scroll: f32) {
        let overflow = (self.builder.size().y - self.size().y).max(0.0);
        self.scroll = if scroll.is_finite() { scroll.clamp(0.0, overflow) } else { 0.0 };
    }

    /// Scroll just enough to show a line
    pub fn scroll_to_line(&mut self, line: usize) {
        let Some(target) = self.builder.line(line) else {
            return;
        };
        let top = self.line_top_unscrolled(line);
        let bottom = top + target.height();
        let height = self.size().y;

        if top < self.scroll {
            self.set_scroll(top);
        } else if bottom > self.scroll + height {
            self.set_scroll(bottom - height);
        }
    }

    /// Distance from the text top to the top of a line
    fn line_top_unscrolled(&self, line: usize) -> f32 {
        self.builder.lines().iter().take(line).map(Line::height).sum()
    }

    /// Y coordinate of a line's top edge in board coordinates
    fn line_top(&self, line: usize) -> f32 {
        self.size().y * 0.5 + self.scroll - self.line_top_unscrolled(line)
    }

    /// X coordinate of a line's left edge in board coordinates
    fn line_left(&self, line: &Line) -> f32 {
        let half = self.size().x * 0.5;
        match line.alignment() {
            TextAlignment::Left => -half,
            TextAlignment::Center => -line.width() * 0.5,
            TextAlignment::Right => half - line.width(),
        }
    }

    /// Visible glyphs clipped to the board box
    pub fn glyph_quads(&self) -> Vec<GlyphQuad> {
        let bounds = Rect::new(Vec2::zeros(), self.size());
        let mut quads = Vec::new();
        let mut top = self.line_top(0);

        for line in self.builder.lines() {
            let bottom = top - line.height();
            if bottom >= bounds.max().y {
                top = bottom;
                continue;
            }
            if top <= bounds.min().y {
                break;
            }

            let left = self.line_left(line);
            for glyph in line.glyphs().iter().filter(|g| !g.ch.is_whitespace()) {
                let full = Rect::new(
                    Vec2::new(left + glyph.offset.x + glyph.size.x * 0.5, bottom + glyph.size.y * 0.5),
                    glyph.size,
                );
                let Some(clipped) = full.intersect(&bounds).filter(|r| !r.is_empty()) else {
                    continue;
                };
                quads.push(GlyphQuad {
                    uv: clipped_uv(&full, &clipped),
                    rect: clipped,
                    color: glyph.format.color,
                    material: glyph.material,
                });
            }
            top = bottom;
        }

        quads
    }

    /// Caret position nearest to a point in board coordinates
    pub fn char_at(&self, point: Vec2) -> TextIndex {
        let lines = self.builder.lines();
        let mut top = self.line_top(0);
        let mut line_index = lines.len() - 1;

        for (index, line) in lines.iter().enumerate() {
            if point.y >= top - line.height() {
                line_index = index;
                break;
            }
            top -= line.height();
        }

        let line = &lines[line_index];
        let x = point.x - self.line_left(line);
        let ch = line.glyphs()[..line.caret_len()]
            .iter()
            .position(|glyph| x < glyph.offset.x + glyph.size.x * 0.5)
            .unwrap_or_else(|| line.caret_len());

        TextIndex::new(line_index, ch)
    }

    /// Caret anchor for an index: x of the caret, y of the line's vertical middle
    pub fn caret_offset(&self, index: TextIndex) -> Vec2 {
        let index = self.builder.clamp_index(index);
        let line = &self.builder.lines()[index.line];
        let x = match line.glyphs().get(index.ch) {
            Some(glyph) => glyph.offset.x,
            None => line.width(),
        };

        Vec2::new(self.line_left(line) + x, self.line_top(index.line) - line.height() * 0.5)
    }
}

/// Texture coordinates of the part of `full` covered by `clipped`
fn clipped_uv(full: &Rect, clipped: &Rect) -> [Vec2; 2] {
    let size = full.size;
    if size.x <= 0.0 || size.y <= 0.0 {
        return [Vec2::zeros(), Vec2::new(1.0, 1.0)];
    }

    let min = (clipped.min() - full.min()).component_div(&size);
    let max = (clipped.max() - full.min()).component_div(&size);
    [min, max]
}
