//! Glyph formatting

use crate::foundation::math::Vec4;

/// Horizontal alignment of a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Left-aligned text
    #[default]
    Left,
    /// Center-aligned text
    Center,
    /// Right-aligned text
    Right,
}

/// Formatting shared by every character of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphFormat {
    /// Font style index passed to the glyph metrics provider
    pub style: u16,
    /// Point scale applied to the measured glyph size
    pub scale: f32,
    /// Text color (RGBA)
    pub color: Vec4,
    /// Alignment of lines that start with this format
    pub alignment: TextAlignment,
}

impl Default for GlyphFormat {
    fn default() -> Self {
        Self {
            style: 0,
            scale: 1.0,
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            alignment: TextAlignment::Left,
        }
    }
}

impl GlyphFormat {
    /// Copy with a different color
    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = color;
        self
    }

    /// Copy with a different scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Copy with a different font style
    pub fn with_style(mut self, style: u16) -> Self {
        self.style = style;
        self
    }

    /// Copy with a different alignment
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// True if switching between the two formats can change glyph widths
    pub fn affects_width(&self, other: &GlyphFormat) -> bool {
        self.style != other.style || self.scale != other.scale
    }
}
