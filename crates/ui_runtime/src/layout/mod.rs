//! Layout math
//!
//! Positions are node centers in the governing space's plane, y-up. Every
//! function here is pure: the same (own size, own padding, parent layout,
//! flags) always produce the same result.

use bitflags::bitflags;

use crate::foundation::math::{finite_or_zero, finite_vec2, sanitize_size, Rect, Vec2};

bitflags! {
    /// How a node attaches to its parent's box
    ///
    /// With neither LEFT nor RIGHT the node is centered horizontally, and
    /// likewise for TOP/BOTTOM. Without INNER the node sits outside the
    /// chosen edge.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParentAlignments: u16 {
        /// Attach to the left edge
        const LEFT = 1 << 0;
        /// Attach to the right edge
        const RIGHT = 1 << 1;
        /// Attach to the top edge
        const TOP = 1 << 2;
        /// Attach to the bottom edge
        const BOTTOM = 1 << 3;
        /// Stay inside the horizontal edge
        const INNER_H = 1 << 4;
        /// Stay inside the vertical edge
        const INNER_V = 1 << 5;
        /// Stay inside on both axes
        const INNER = Self::INNER_H.bits() | Self::INNER_V.bits();
        /// Align against the parent's box shrunk by its padding
        const USE_PADDING = 1 << 6;
    }
}

bitflags! {
    /// Which parent dimensions a node copies
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DimAlignments: u8 {
        /// Copy the parent's width
        const WIDTH = 1 << 0;
        /// Copy the parent's height
        const HEIGHT = 1 << 1;
        /// Copy both dimensions
        const BOTH = Self::WIDTH.bits() | Self::HEIGHT.bits();
        /// Copy the parent's size minus its padding
        const USE_PADDING = 1 << 2;
    }
}

/// Layout resolved for the current frame
///
/// Only valid for the frame whose layout pass wrote it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CachedLayout {
    /// Center in the governing plane
    pub position: Vec2,
    /// Scaled size
    pub size: Vec2,
    /// Scaled padding
    pub padding: Vec2,
    /// Effective scale after compounding with ancestors
    pub scale: f32,
}

impl Default for CachedLayout {
    fn default() -> Self {
        Self { position: Vec2::zeros(), size: Vec2::zeros(), padding: Vec2::zeros(), scale: 1.0 }
    }
}

impl CachedLayout {
    /// Bounding box in the governing plane
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// Convert a plane point to unscaled coordinates centered on this node
    pub fn to_local(&self, point: Vec2) -> Vec2 {
        if self.scale > 0.0 {
            (point - self.position) / self.scale
        } else {
            Vec2::zeros()
        }
    }

    /// Convert unscaled local coordinates back to the plane
    pub fn to_plane(&self, local: Vec2) -> Vec2 {
        self.position + local * self.scale
    }

    /// Convert an unscaled local rectangle to the plane
    pub fn rect_to_plane(&self, local: &Rect) -> Rect {
        Rect::new(self.to_plane(local.center), local.size * self.scale)
    }
}

/// Positionable part of a node
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Offset from the aligned position, in unscaled units
    pub offset: Vec2,
    /// Size before scaling
    pub unscaled_size: Vec2,
    /// Total horizontal and vertical padding, unscaled
    pub padding: Vec2,
    /// Local scale
    pub scale: f32,
    /// Don't compound with the parent's scale
    pub ignore_parent_scale: bool,
    /// Attachment to the parent's box
    pub parent_alignment: ParentAlignments,
    /// Parent dimensions to copy
    pub dim_alignment: DimAlignments,
    /// Result of the last layout pass
    pub cached: CachedLayout,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            offset: Vec2::zeros(),
            unscaled_size: Vec2::zeros(),
            padding: Vec2::zeros(),
            scale: 1.0,
            ignore_parent_scale: false,
            parent_alignment: ParentAlignments::empty(),
            dim_alignment: DimAlignments::empty(),
            cached: CachedLayout::default(),
        }
    }
}

impl Placement {
    /// Create a placement with an unscaled size
    pub fn sized(width: f32, height: f32) -> Self {
        Self { unscaled_size: sanitize_size(Vec2::new(width, height)), ..Self::default() }
    }

    /// Builder: offset
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = finite_vec2(Vec2::new(x, y));
        self
    }

    /// Builder: padding
    pub fn with_padding(mut self, x: f32, y: f32) -> Self {
        self.padding = sanitize_size(Vec2::new(x, y));
        self
    }

    /// Builder: local scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = finite_or_zero(scale).max(0.0);
        self
    }

    /// Builder: parent alignment
    pub fn with_alignment(mut self, alignment: ParentAlignments) -> Self {
        self.parent_alignment = alignment;
        self
    }

    /// Builder: dimension copying
    pub fn with_dim_alignment(mut self, dims: DimAlignments) -> Self {
        self.dim_alignment = dims;
        self
    }

    /// Builder: scale isolation
    pub fn ignoring_parent_scale(mut self) -> Self {
        self.ignore_parent_scale = true;
        self
    }

    /// Size after the local scale only
    pub fn local_size(&self) -> Vec2 {
        self.unscaled_size * self.scale
    }
}

/// Effective scale of a node
pub fn scaled(local: f32, parent: f32, ignore_parent_scale: bool) -> f32 {
    let scale = if ignore_parent_scale { local } else { local * parent };
    finite_or_zero(scale).max(0.0)
}

/// New unscaled size for a node copying its parent's dimensions
///
/// `parent_size` and `parent_padding` are the parent's scaled (cached) values;
/// `scale` is the node's effective scale.
pub fn copy_dimensions(
    unscaled_size: Vec2,
    dims: DimAlignments,
    parent_size: Vec2,
    parent_padding: Vec2,
    scale: f32,
) -> Vec2 {
    if dims.intersection(DimAlignments::BOTH).is_empty() || scale <= 0.0 {
        return unscaled_size;
    }

    let source = if dims.contains(DimAlignments::USE_PADDING) {
        parent_size - parent_padding
    } else {
        parent_size
    };
    let source = sanitize_size(source) / scale;

    Vec2::new(
        if dims.contains(DimAlignments::WIDTH) { source.x } else { unscaled_size.x },
        if dims.contains(DimAlignments::HEIGHT) { source.y } else { unscaled_size.y },
    )
}

/// Center of a box of `size` attached to a parent box
pub fn align_to_parent(
    parent_position: Vec2,
    parent_size: Vec2,
    parent_padding: Vec2,
    size: Vec2,
    alignment: ParentAlignments,
) -> Vec2 {
    let bounds = if alignment.contains(ParentAlignments::USE_PADDING) {
        sanitize_size(parent_size - parent_padding)
    } else {
        parent_size
    };
    let half_parent = bounds * 0.5;
    let half = size * 0.5;

    let inner_h = alignment.contains(ParentAlignments::INNER_H);
    let x = match (alignment.contains(ParentAlignments::LEFT), alignment.contains(ParentAlignments::RIGHT)) {
        (true, false) => parent_position.x - half_parent.x + if inner_h { half.x } else { -half.x },
        (false, true) => parent_position.x + half_parent.x + if inner_h { -half.x } else { half.x },
        _ => parent_position.x,
    };

    let inner_v = alignment.contains(ParentAlignments::INNER_V);
    let y = match (alignment.contains(ParentAlignments::TOP), alignment.contains(ParentAlignments::BOTTOM)) {
        (true, false) => parent_position.y + half_parent.y + if inner_v { -half.y } else { half.y },
        (false, true) => parent_position.y - half_parent.y + if inner_v { half.y } else { -half.y },
        _ => parent_position.y,
    };

    Vec2::new(x, y)
}

/// Resolve a node's layout against its parent's
///
/// Copies parent dimensions first (writing the new unscaled size back), then
/// aligns and applies the scaled offset.
pub fn resolve(placement: &mut Placement, parent: &CachedLayout) -> CachedLayout {
    let scale = scaled(placement.scale, parent.scale, placement.ignore_parent_scale);

    placement.unscaled_size = copy_dimensions(
        placement.unscaled_size,
        placement.dim_alignment,
        parent.size,
        parent.padding,
        scale,
    );

    let size = sanitize_size(placement.unscaled_size * scale);
    let aligned = align_to_parent(parent.position, parent.size, parent.padding, size, placement.parent_alignment);

    let cached = CachedLayout {
        position: finite_vec2(aligned + placement.offset * scale),
        size,
        padding: sanitize_size(placement.padding * scale),
        scale,
    };
    placement.cached = cached;
    cached
}
