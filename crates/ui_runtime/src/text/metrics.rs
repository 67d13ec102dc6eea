//! Glyph measurement
//!
//! Measurement is an external collaborator: the host knows its fonts and
//! billboard materials. The runtime only asks for advances and line heights
//! and refuses to let non-finite answers reach layout.

use crate::foundation::math::finite_or_zero;
use crate::render::MaterialId;
use super::GlyphFormat;

/// Unscaled measurements of one glyph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMeasure {
    /// Horizontal advance
    pub advance: f32,
    /// Height of a line set in this style
    pub line_height: f32,
    /// Billboard material used to draw the glyph
    pub material: MaterialId,
}

/// Host-provided glyph metrics
pub trait GlyphMetrics {
    /// Measure a character in the given font style
    fn measure(&self, ch: char, style: u16) -> GlyphMeasure;
}

/// Fixed-pitch metrics: every printable character has the same advance
///
/// Deterministic stand-in for a real font, used by tests and headless hosts.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    /// Advance of every printable character
    pub advance: f32,
    /// Line height of every style
    pub line_height: f32,
    /// Material returned for every glyph
    pub material: MaterialId,
}

impl MonospaceMetrics {
    /// Create monospace metrics
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self { advance, line_height, material: MaterialId(1) }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(10.0, 16.0)
    }
}

impl GlyphMetrics for MonospaceMetrics {
    fn measure(&self, ch: char, _style: u16) -> GlyphMeasure {
        GlyphMeasure {
            advance: if ch == '\n' { 0.0 } else { self.advance },
            line_height: self.line_height,
            material: self.material,
        }
    }
}

/// Characters that may enter a text document
///
/// Control characters below the printable range are dropped except newline,
/// along with DEL and the common zero-width code points.
pub fn is_renderable(ch: char) -> bool {
    match ch {
        '\n' => true,
        '\u{7f}' | '\u{200b}'..='\u{200d}' | '\u{feff}' => false,
        c => c >= ' ',
    }
}

/// Measure a character with a format's scale applied
///
/// NaN, infinite and negative results are clamped to zero.
pub fn measure_scaled(metrics: &dyn GlyphMetrics, ch: char, format: &GlyphFormat) -> GlyphMeasure {
    let raw = metrics.measure(ch, format.style);
    let scale = format.scale;
    let advance = if ch == '\n' { 0.0 } else { raw.advance * scale };
    let line_height = raw.line_height * scale;

    if !advance.is_finite() || !line_height.is_finite() {
        log::warn!(
            "Non-finite glyph size for {:?} (style {}, scale {}), clamping to zero",
            ch, format.style, scale
        );
    }

    GlyphMeasure {
        advance: finite_or_zero(advance).max(0.0),
        line_height: finite_or_zero(line_height).max(0.0),
        material: raw.material,
    }
}
