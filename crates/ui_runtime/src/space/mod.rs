//! Coordinate space nodes
//!
//! A space node defines the 2D plane its subtree is laid out in and maps that
//! plane into the 3D world. Every frame it also projects the host pointer ray
//! onto the plane so widgets can hit-test in plane coordinates.

use crate::foundation::math::{Mat4, Plane, Point3, Ray, Rect, Vec2, Vec3};

/// Facing below this cosine counts as edge-on
const EDGE_ON_EPSILON: f32 = 0.01;

/// Camera and viewport supplied by the host each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostView {
    /// Viewport size in pixels
    pub viewport: Vec2,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Camera-to-world transform; the camera looks down its local -Z
    pub camera: Mat4,
}

impl Default for HostView {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(1280.0, 720.0),
            fov_y: 60.0_f32.to_radians(),
            camera: Mat4::identity(),
        }
    }
}

impl HostView {
    /// Create a view
    pub fn new(viewport: Vec2, fov_y: f32, camera: Mat4) -> Self {
        Self { viewport, fov_y, camera }
    }

    /// True when any value differs from `other`
    pub fn changed_from(&self, other: &HostView) -> bool {
        self != other
    }

    /// Width over height, 1.0 for degenerate viewports
    pub fn aspect(&self) -> f32 {
        if self.viewport.y > 0.0 { self.viewport.x / self.viewport.y } else { 1.0 }
    }

    /// Camera position in world space
    pub fn camera_position(&self) -> Vec3 {
        self.camera.transform_point(&Point3::origin()).coords
    }

    /// Unit forward vector in world space
    pub fn camera_forward(&self) -> Vec3 {
        self.camera.transform_vector(&Vec3::new(0.0, 0.0, -1.0)).normalize()
    }

    /// World-space ray through a pixel (origin top-left, y down)
    pub fn pointer_ray(&self, pixel: Vec2) -> Ray {
        let w = self.viewport.x.max(1.0);
        let h = self.viewport.y.max(1.0);
        let ndc_x = 2.0 * pixel.x / w - 1.0;
        let ndc_y = 1.0 - 2.0 * pixel.y / h;
        let tan_half = (self.fov_y * 0.5).tan();

        let local = Vec3::new(ndc_x * tan_half * self.aspect(), ndc_y * tan_half, -1.0);
        Ray {
            origin: self.camera_position(),
            direction: self.camera.transform_vector(&local),
        }
    }
}

/// How a space's plane is placed in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpaceKind {
    /// Locked to the screen: one unit per pixel, origin at the viewport center
    Screen,
    /// Fixed plane-to-world transform
    World(Mat4),
    /// Transform relative to the camera
    CameraRelative(Mat4),
}

/// Pointer projected onto a plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorProjection {
    /// Pointer in plane coordinates
    pub plane: Vec2,
    /// Squared camera distance to the hit, for comparing spaces only
    pub depth: f32,
}

/// State of one coordinate space
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceNode {
    /// Placement rule
    pub kind: SpaceKind,
    /// Hide the subtree when the plane is behind the camera or seen edge-on
    pub hide_when_edge_on: bool,
    plane_to_world: Mat4,
    cursor: Option<CursorProjection>,
    origin_in_front: bool,
    faces_camera: bool,
    facing: f32,
}

impl SpaceNode {
    /// Create a space of the given kind
    pub fn new(kind: SpaceKind) -> Self {
        Self {
            kind,
            hide_when_edge_on: false,
            plane_to_world: Mat4::identity(),
            cursor: None,
            origin_in_front: true,
            faces_camera: true,
            facing: 1.0,
        }
    }

    /// Screen-locked space
    pub fn screen() -> Self {
        Self::new(SpaceKind::Screen)
    }

    /// World-anchored space
    pub fn world(plane_to_world: Mat4) -> Self {
        Self::new(SpaceKind::World(plane_to_world))
    }

    /// Plane-to-world transform from the last refresh
    pub fn plane_to_world(&self) -> &Mat4 {
        &self.plane_to_world
    }

    /// Pointer projection from the last refresh
    pub fn cursor(&self) -> Option<CursorProjection> {
        self.cursor
    }

    /// Plane origin lies in the camera's forward half-space
    pub fn origin_in_front(&self) -> bool {
        self.origin_in_front
    }

    /// Plane normal points towards the camera
    pub fn faces_camera(&self) -> bool {
        self.faces_camera
    }

    /// True when the subtree should be skipped this frame
    pub fn culled(&self) -> bool {
        self.hide_when_edge_on && (!self.origin_in_front || self.facing <= EDGE_ON_EPSILON)
    }

    /// Recompute the transform, facing flags and pointer projection
    ///
    /// `pointer` is `None` while the host hides the pointer.
    pub fn refresh(&mut self, view: &HostView, pointer: Option<Vec2>, screen_distance: f32) {
        self.plane_to_world = match self.kind {
            SpaceKind::Screen => screen_transform(view, screen_distance),
            SpaceKind::World(transform) => transform,
            SpaceKind::CameraRelative(transform) => view.camera * transform,
        };

        let origin = self.plane_to_world_point(Vec2::zeros());
        let normal = self.plane_to_world.transform_vector(&Vec3::z());
        let camera = view.camera_position();
        let to_camera = camera - origin;

        self.origin_in_front = (origin - camera).dot(&view.camera_forward()) > 0.0;
        self.facing = match (normal.try_normalize(f32::EPSILON), to_camera.try_normalize(f32::EPSILON)) {
            (Some(n), Some(c)) => n.dot(&c),
            _ => 0.0,
        };
        self.faces_camera = self.facing > 0.0;

        self.cursor = pointer.and_then(|pixel| self.project(view, pixel, origin, normal));
    }

    fn project(&self, view: &HostView, pixel: Vec2, origin: Vec3, normal: Vec3) -> Option<CursorProjection> {
        let plane = Plane::from_point_normal(origin, normal.try_normalize(f32::EPSILON)?);
        let ray = view.pointer_ray(pixel);
        let hit = plane.intersect_ray(&ray)?;
        let local = self.plane_to_world.try_inverse()?.transform_point(&Point3::from(hit));

        let projection = CursorProjection {
            plane: Vec2::new(local.x, local.y),
            depth: (hit - ray.origin).norm_squared(),
        };
        (projection.plane.iter().all(|v| v.is_finite()) && projection.depth.is_finite()).then_some(projection)
    }

    /// Map a plane point to world space
    pub fn plane_to_world_point(&self, point: Vec2) -> Vec3 {
        self.plane_to_world.transform_point(&Point3::new(point.x, point.y, 0.0)).coords
    }

    /// World-space corners of a plane rectangle: bottom-left, bottom-right,
    /// top-right, top-left
    pub fn quad_corners(&self, rect: &Rect) -> [Vec3; 4] {
        let min = rect.min();
        let max = rect.max();
        [
            self.plane_to_world_point(min),
            self.plane_to_world_point(Vec2::new(max.x, min.y)),
            self.plane_to_world_point(max),
            self.plane_to_world_point(Vec2::new(min.x, max.y)),
        ]
    }

    /// Size of the plane's visible area, for screen spaces the viewport
    pub fn viewport_size(&self, view: &HostView) -> Option<Vec2> {
        matches!(self.kind, SpaceKind::Screen).then_some(view.viewport)
    }
}

/// Plane in front of the camera where one unit covers one pixel
fn screen_transform(view: &HostView, distance: f32) -> Mat4 {
    let visible_height = 2.0 * distance * (view.fov_y * 0.5).tan();
    let units_per_pixel = visible_height / view.viewport.y.max(1.0);

    view.camera
        * Mat4::new_translation(&Vec3::new(0.0, 0.0, -distance))
        * Mat4::new_scaling(units_per_pixel)
}
