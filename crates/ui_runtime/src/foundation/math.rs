//! Math utilities and types
//!
//! Provides the math types used by layout, projection and text measurement.
//! All UI planes use a y-up coordinate system with the origin at the center
//! of the governing coordinate space.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix4,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type, also used for RGBA colors
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Replace NaN and infinities with zero
///
/// A single non-finite width breaks every sibling offset computed from it,
/// so measurements pass through this before they reach layout.
pub fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() { value } else { 0.0 }
}

/// Component-wise [`finite_or_zero`]
pub fn finite_vec2(value: Vec2) -> Vec2 {
    Vec2::new(finite_or_zero(value.x), finite_or_zero(value.y))
}

/// Non-finite or negative sizes collapse to zero
pub fn sanitize_size(value: Vec2) -> Vec2 {
    let v = finite_vec2(value);
    Vec2::new(v.x.max(0.0), v.y.max(0.0))
}

/// Axis-aligned rectangle in a UI plane, stored as center and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Center of the rectangle
    pub center: Vec2,
    /// Full width and height
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its center and size
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Create a rectangle from two corners
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self {
            center: (min + max) * 0.5,
            size: max - min,
        }
    }

    /// Minimum (bottom-left) corner
    pub fn min(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    /// Maximum (top-right) corner
    pub fn max(&self) -> Vec2 {
        self.center + self.size * 0.5
    }

    /// Grow each edge so the rectangle is at least `min_edge` wide and tall
    pub fn padded_to(&self, min_edge: f32) -> Self {
        Self {
            center: self.center,
            size: Vec2::new(self.size.x.max(min_edge), self.size.y.max(min_edge)),
        }
    }

    /// Check if the point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Intersection of two rectangles, or `None` if they don't overlap
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let min = self.min().sup(&other.min());
        let max = self.max().inf(&other.max());
        if max.x < min.x || max.y < min.y {
            None
        } else {
            Some(Rect::from_min_max(min, max))
        }
    }

    /// True when the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

/// Ray with an origin and (not necessarily normalized) direction
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Ray origin in world space
    pub origin: Vec3,
    /// Ray direction in world space
    pub direction: Vec3,
}

/// Plane defined by a point and a normal
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Any point on the plane
    pub point: Vec3,
    /// Plane normal (normalized)
    pub normal: Vec3,
}

impl Plane {
    /// Create a plane from a point and normal
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal: normal.normalize() }
    }

    /// Signed distance from the plane to a point (positive = in front)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(&(point - self.point))
    }

    /// Intersect a ray with this plane
    ///
    /// Returns the hit point if the ray is not parallel to the plane and the
    /// intersection lies in front of the ray origin.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<Vec3> {
        let denom = self.normal.dot(&ray.direction);
        if denom.abs() < 1e-6 {
            return None;
        }

        let t = self.normal.dot(&(self.point - ray.origin)) / denom;
        if !t.is_finite() || t < 0.0 {
            return None;
        }

        Some(ray.origin + ray.direction * t)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(3.5), 3.5);
        assert_eq!(finite_or_zero(f32::NAN), 0.0);
        assert_eq!(finite_or_zero(f32::INFINITY), 0.0);
        assert_eq!(sanitize_size(Vec2::new(-4.0, f32::NEG_INFINITY)), Vec2::zeros());
    }

    #[test]
    fn test_rect_contains_and_padding() {
        let rect = Rect::new(Vec2::new(10.0, 10.0), Vec2::new(2.0, 2.0));
        assert!(rect.contains(Vec2::new(11.0, 9.0)));
        assert!(!rect.contains(Vec2::new(13.0, 10.0)));

        let padded = rect.padded_to(8.0);
        assert!(padded.contains(Vec2::new(13.0, 10.0)));
        assert_relative_eq!(padded.size, Vec2::new(8.0, 8.0));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::from_min_max(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::from_min_max(Vec2::new(5.0, 5.0), Vec2::new(20.0, 20.0));
        let c = a.intersect(&b).unwrap();
        assert_relative_eq!(c.min(), Vec2::new(5.0, 5.0));
        assert_relative_eq!(c.max(), Vec2::new(10.0, 10.0));

        let d = Rect::from_min_max(Vec2::new(30.0, 30.0), Vec2::new(40.0, 40.0));
        assert!(a.intersect(&d).is_none());
    }

    #[test]
    fn test_plane_ray_intersection() {
        let plane = Plane::from_point_normal(Vec3::new(0.0, 0.0, -5.0), Vec3::z());
        let ray = Ray { origin: Vec3::zeros(), direction: Vec3::new(0.0, 0.0, -1.0) };
        let hit = plane.intersect_ray(&ray).unwrap();
        assert_relative_eq!(hit, Vec3::new(0.0, 0.0, -5.0));

        // Pointing away from the plane
        let away = Ray { origin: Vec3::zeros(), direction: Vec3::new(0.0, 0.0, 1.0) };
        assert!(plane.intersect_ray(&away).is_none());

        // Parallel to the plane
        let parallel = Ray { origin: Vec3::zeros(), direction: Vec3::x() };
        assert!(plane.intersect_ray(&parallel).is_none());
    }
}
