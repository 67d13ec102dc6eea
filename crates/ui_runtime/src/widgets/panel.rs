//! Panel widget - rectangular backgrounds with optional borders

use crate::foundation::math::Vec4;
use crate::render::MaterialId;
use super::{Drawable, QuadEmitter};

/// A colored rectangle
#[derive(Debug, Clone)]
pub struct Panel {
    /// Material of the background
    pub material: MaterialId,

    /// Background color (RGBA)
    pub color: Vec4,

    /// Border color (RGBA), if border_width > 0
    pub border_color: Vec4,

    /// Border width in unscaled units
    pub border_width: f32,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            material: MaterialId::SOLID,
            color: Vec4::new(0.2, 0.2, 0.2, 0.8),
            border_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            border_width: 0.0,
        }
    }
}

impl Panel {
    /// Solid panel of one color
    pub fn new(color: Vec4) -> Self {
        Self { color, ..Self::default() }
    }

    /// Builder: material
    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = material;
        self
    }

    /// Builder: border
    pub fn with_border(mut self, width: f32, color: Vec4) -> Self {
        self.border_width = width;
        self.border_color = color;
        self
    }
}

impl Drawable for Panel {
    fn draw(&self, out: &mut QuadEmitter<'_>) {
        out.fill(self.material, self.color);
        if self.border_width > 0.0 {
            out.border(self.border_width, MaterialId::SOLID, self.border_color);
        }
    }
}
