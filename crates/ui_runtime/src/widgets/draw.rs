//! Quad emission helper shared by drawable widgets

use crate::foundation::math::{Rect, Vec2, Vec4};
use crate::layout::CachedLayout;
use crate::render::{BlendMode, MaterialId, QuadCommand, RenderSink};
use crate::space::SpaceNode;
use crate::text::TextBoard;
use crate::tree::NodeId;

/// Full texture
fn full_uv() -> [Vec2; 2] {
    [Vec2::zeros(), Vec2::new(1.0, 1.0)]
}

/// Turns node-local rectangles into world-space quads
///
/// Local coordinates are unscaled and centered on the node, y-up.
pub struct QuadEmitter<'a> {
    node: NodeId,
    layout: &'a CachedLayout,
    space: &'a SpaceNode,
    sink: &'a mut dyn RenderSink,
    emitted: usize,
}

impl<'a> QuadEmitter<'a> {
    /// Create an emitter for one node
    pub fn new(node: NodeId, layout: &'a CachedLayout, space: &'a SpaceNode, sink: &'a mut dyn RenderSink) -> Self {
        Self { node, layout, space, sink, emitted: 0 }
    }

    /// Resolved layout of the node being drawn
    pub fn layout(&self) -> &CachedLayout {
        self.layout
    }

    /// Unscaled size of the node
    pub fn local_size(&self) -> Vec2 {
        if self.layout.scale > 0.0 { self.layout.size / self.layout.scale } else { Vec2::zeros() }
    }

    /// Quads emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Solid rectangle
    pub fn rect(&mut self, local: &Rect, material: MaterialId, tint: Vec4) {
        self.quad(local, material, tint, full_uv(), BlendMode::Alpha);
    }

    /// Rectangle covering the whole node
    pub fn fill(&mut self, material: MaterialId, tint: Vec4) {
        let local = Rect::new(Vec2::zeros(), self.local_size());
        self.rect(&local, material, tint);
    }

    /// Four strips of `width` along the node's edges
    pub fn border(&mut self, width: f32, material: MaterialId, tint: Vec4) {
        let size = self.local_size();
        let half = size * 0.5;
        let width = width.min(half.x).min(half.y);
        if width <= 0.0 {
            return;
        }

        let strips = [
            Rect::new(Vec2::new(0.0, half.y - width * 0.5), Vec2::new(size.x, width)),
            Rect::new(Vec2::new(0.0, -half.y + width * 0.5), Vec2::new(size.x, width)),
            Rect::new(Vec2::new(-half.x + width * 0.5, 0.0), Vec2::new(width, size.y - 2.0 * width)),
            Rect::new(Vec2::new(half.x - width * 0.5, 0.0), Vec2::new(width, size.y - 2.0 * width)),
        ];
        for strip in &strips {
            self.rect(strip, material, tint);
        }
    }

    /// Visible glyphs of a text board centered at `center`
    pub fn text(&mut self, board: &TextBoard, center: Vec2) {
        for glyph in board.glyph_quads() {
            let local = Rect::new(glyph.rect.center + center, glyph.rect.size);
            self.quad(&local, glyph.material, glyph.color, glyph.uv, BlendMode::Alpha);
        }
    }

    /// Fully specified quad
    pub fn quad(&mut self, local: &Rect, material: MaterialId, tint: Vec4, uv: [Vec2; 2], blend: BlendMode) {
        let plane = self.layout.rect_to_plane(local);
        if plane.is_empty() {
            return;
        }

        self.sink.draw_quad(&QuadCommand {
            node: self.node,
            material,
            corners: self.space.quad_corners(&plane),
            uv,
            tint,
            blend,
        });
        self.emitted += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::RecordingSink;
    use crate::text::{MonospaceMetrics, RichText, TextMode};
    use approx::assert_relative_eq;
    use slotmap::KeyData;
    use std::rc::Rc;

    fn layout() -> CachedLayout {
        CachedLayout { position: Vec2::new(10.0, 0.0), size: Vec2::new(40.0, 20.0), padding: Vec2::zeros(), scale: 2.0 }
    }

    #[test]
    fn test_fill_covers_scaled_bounds() {
        let space = SpaceNode::screen();
        let layout = layout();
        let mut sink = RecordingSink::new();
        let node = NodeId::from(KeyData::from_ffi(1));

        QuadEmitter::new(node, &layout, &space, &mut sink).fill(MaterialId::SOLID, Vec4::new(1.0, 0.0, 0.0, 1.0));

        let quad = &sink.quads()[0];
        assert_eq!(quad.node, node);
        assert_relative_eq!(quad.corners[0], Vec3::new(-10.0, -10.0, 0.0));
        assert_relative_eq!(quad.corners[2], Vec3::new(30.0, 10.0, 0.0));
    }

    #[test]
    fn test_border_and_empty_rects() {
        let space = SpaceNode::screen();
        let layout = layout();
        let mut sink = RecordingSink::new();
        let mut out = QuadEmitter::new(NodeId::default(), &layout, &space, &mut sink);

        out.border(2.0, MaterialId::SOLID, Vec4::zeros());
        out.rect(&Rect::new(Vec2::zeros(), Vec2::zeros()), MaterialId::SOLID, Vec4::zeros());
        assert_eq!(out.emitted(), 4);
    }

    #[test]
    fn test_text_skips_whitespace() {
        let space = SpaceNode::screen();
        let layout = CachedLayout::default();
        let mut sink = RecordingSink::new();
        let mut board = TextBoard::new(Rc::new(MonospaceMetrics::new(10.0, 16.0)), TextMode::Lined);
        board.builder_mut().append(&RichText::from("a b"));

        QuadEmitter::new(NodeId::default(), &layout, &space, &mut sink).text(&board, Vec2::zeros());
        assert_eq!(sink.quads().len(), 2);
        assert_eq!(sink.quads()[0].material, MaterialId(1));
    }
}
