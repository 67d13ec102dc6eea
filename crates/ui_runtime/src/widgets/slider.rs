//! Horizontal value slider

use crate::events::UiEventKind;
use crate::foundation::math::{Rect, Vec2, Vec4};
use crate::pipeline::FrameContext;
use crate::render::MaterialId;
use crate::tree::{NodeId, UiTree};
use super::{Clickable, Drawable, QuadEmitter};

/// Value in `[min, max]` picked by dragging along the node's width
///
/// A drag starts with a primary press while the slider owns the cursor and
/// continues, even off the track, until the button is released.
#[derive(Debug, Clone)]
pub struct Slider {
    min: f32,
    max: f32,
    value: f32,
    dragging: bool,

    /// Track color
    pub track_color: Vec4,
    /// Handle color
    pub handle_color: Vec4,
    /// Handle width in unscaled units
    pub handle_width: f32,
}

impl Slider {
    /// Create a slider; `value` is clamped into the range
    pub fn new(min: f32, max: f32, value: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            value: clamp_value(value, min, max),
            dragging: false,
            track_color: Vec4::new(0.25, 0.25, 0.25, 1.0),
            handle_color: Vec4::new(0.8, 0.8, 0.8, 1.0),
            handle_width: 8.0,
        }
    }

    /// Lower bound
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Current value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Set the value, clamped into the range
    pub fn set_value(&mut self, value: f32) {
        self.value = clamp_value(value, self.min, self.max);
    }

    /// Value as a fraction of the range
    pub fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span > 0.0 { (self.value - self.min) / span } else { 0.0 }
    }

    /// True while a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Value under a local x coordinate on a track of `width`
    pub fn value_at(&self, local_x: f32, width: f32) -> f32 {
        if width <= 0.0 {
            return self.value;
        }
        let t = ((local_x + width * 0.5) / width).clamp(0.0, 1.0);
        self.min + t * (self.max - self.min)
    }
}

fn clamp_value(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() { value.clamp(min, max) } else { min }
}

impl Drawable for Slider {
    fn draw(&self, out: &mut QuadEmitter<'_>) {
        let size = out.local_size();
        let track = Rect::new(Vec2::zeros(), Vec2::new(size.x, size.y / 3.0));
        out.rect(&track, MaterialId::SOLID, self.track_color);

        let x = -size.x * 0.5 + self.fraction() * size.x;
        let handle = Rect::new(Vec2::new(x, 0.0), Vec2::new(self.handle_width, size.y));
        out.rect(&handle, MaterialId::SOLID, self.handle_color);
    }
}

impl Clickable for Slider {
    fn handle_input(&mut self, id: NodeId, tree: &mut UiTree, ctx: &mut FrameContext<'_>) {
        let left = ctx.input.left();
        if left.pressed && ctx.arbiter.is_owner(id) {
            self.dragging = true;
        }
        if !left.down {
            self.dragging = false;
            return;
        }
        if !self.dragging {
            return;
        }

        let Some(local) = ctx.local_pointer(tree, id) else {
            return;
        };
        let width = tree.get(id).map_or(0.0, |entry| entry.placement.unscaled_size.x);
        let value = self.value_at(local.x, width);
        if (value - self.value).abs() > f32::EPSILON {
            self.value = value;
            ctx.events.send(id, UiEventKind::ValueChanged(value));
        }
    }

    fn cancel_input(&mut self) {
        self.dragging = false;
    }
}
