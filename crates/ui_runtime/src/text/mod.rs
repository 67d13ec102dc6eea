//! Rich text system
//!
//! This module provides styled text and its layout into lines of positioned
//! glyphs.
//!
//! # Architecture
//!
//! - [`RichText`]: Ordered runs of text sharing a [`GlyphFormat`]
//! - [`GlyphMetrics`]: Host-provided glyph measurement
//! - [`TextBuilder`]: Lays rich text out into [`Line`]s and keeps them up to
//!   date under incremental edits, using one of three [`TextMode`]s
//! - [`TextBoard`]: A sized, aligned, clipped view of a builder that emits quads

mod format;
mod rich_text;
mod metrics;
mod line;
mod wrap;
mod builder;
mod board;

pub use format::{GlyphFormat, TextAlignment};
pub use rich_text::{RichRun, RichText};
pub use metrics::{GlyphMeasure, GlyphMetrics, MonospaceMetrics, is_renderable, measure_scaled};
pub use line::{Glyph, Line, TextIndex};
pub use wrap::{TextMode, LineWrapper, is_separator, WRAP_EPSILON};
pub use builder::{TextBuilder, RelayoutSpan};
pub use board::{GlyphQuad, TextBoard};
