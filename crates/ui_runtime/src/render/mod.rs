//! Render sink contract
//!
//! The runtime never talks to a graphics API. During the draw pass every
//! visible node emits world-space quads into a [`RenderSink`] supplied by the
//! host, in back-to-front order.

use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::tree::NodeId;

/// Opaque reference to a host material (texture + shader)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// Plain untextured material, tinted by the quad color
    pub const SOLID: MaterialId = MaterialId(0);
}

/// How a quad is blended into the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Standard alpha blending
    #[default]
    Alpha,
    /// Premultiplied alpha
    Premultiplied,
    /// Additive blending
    Additive,
}

/// A single textured quad in world space
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCommand {
    /// Node that emitted the quad
    pub node: NodeId,
    /// Material to draw with
    pub material: MaterialId,
    /// Corners in world space: bottom-left, bottom-right, top-right, top-left
    pub corners: [Vec3; 4],
    /// Texture coordinates: min (bottom-left) and max (top-right)
    pub uv: [Vec2; 2],
    /// Tint color (RGBA)
    pub tint: Vec4,
    /// Blend mode
    pub blend: BlendMode,
}

/// Backend-agnostic draw interface implemented by the host
pub trait RenderSink {
    /// Queue a quad for drawing
    fn draw_quad(&mut self, quad: &QuadCommand);
}

/// Flat vertex record for GPU upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    /// World-space position
    pub position: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// Tint color
    pub color: [f32; 4],
}

/// Render sink that records every quad it receives
///
/// Used by headless hosts and tests. A real backend can export the recorded
/// quads as raw vertex bytes with [`RecordingSink::vertex_bytes`].
#[derive(Debug, Default)]
pub struct RecordingSink {
    quads: Vec<QuadCommand>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Quads recorded so far, in draw order
    pub fn quads(&self) -> &[QuadCommand] {
        &self.quads
    }

    /// Quads emitted by one node
    pub fn quads_for(&self, node: NodeId) -> impl Iterator<Item = &QuadCommand> {
        self.quads.iter().filter(move |q| q.node == node)
    }

    /// Order in which nodes first emitted a quad
    pub fn node_order(&self) -> Vec<NodeId> {
        let mut order: Vec<NodeId> = Vec::new();
        for quad in &self.quads {
            if !order.contains(&quad.node) {
                order.push(quad.node);
            }
        }
        order
    }

    /// Forget recorded quads
    pub fn clear(&mut self) {
        self.quads.clear();
    }

    /// Expand recorded quads into two triangles each
    pub fn vertices(&self) -> Vec<QuadVertex> {
        let mut vertices = Vec::with_capacity(self.quads.len() * 6);
        for quad in &self.quads {
            let [uv_min, uv_max] = quad.uv;
            let uvs = [
                [uv_min.x, uv_min.y],
                [uv_max.x, uv_min.y],
                [uv_max.x, uv_max.y],
                [uv_min.x, uv_max.y],
            ];
            let color = [quad.tint.x, quad.tint.y, quad.tint.z, quad.tint.w];
            for index in [0usize, 1, 2, 0, 2, 3] {
                let corner = quad.corners[index];
                vertices.push(QuadVertex {
                    position: [corner.x, corner.y, corner.z],
                    uv: uvs[index],
                    color,
                });
            }
        }
        vertices
    }

    /// Recorded quads as raw vertex bytes
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }
}

impl RenderSink for RecordingSink {
    fn draw_quad(&mut self, quad: &QuadCommand) {
        self.quads.push(quad.clone());
    }
}
