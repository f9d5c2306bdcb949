use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Camera settings used at startup.
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 5.0, 40.0),
            target: Vec3::ZERO,
        }
    }
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width / height, or 1.0 for a degenerate viewport.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Pixel coordinates (origin top-left) to normalized device coordinates
    /// in [-1, 1], Y up. `None` for a zero-sized viewport.
    pub fn to_ndc(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(Vec2::new(
            (x / self.width) * 2.0 - 1.0,
            -(y / self.height) * 2.0 + 1.0,
        ))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// Half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// xyz = eye position (Fresnel glow needs it), w unused.
    pub camera_pos: [f32; 4],
}

/// Perspective camera looking at a target point, right-handed, depth in [0, 1].
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, viewport: Viewport) -> Self {
        Self {
            position: config.position,
            target: config.target,
            up: Vec3::Y,
            fov_y: config.fov_degrees.to_radians(),
            aspect: viewport.aspect(),
            near: config.near,
            far: config.far,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.target - self.position;
        if forward.length_squared() < 1e-12 {
            return Mat4::look_to_rh(self.position, Vec3::NEG_Z, self.up);
        }
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio after a canvas resize.
    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Ray from the eye through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let far_point = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far_point - self.position)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            camera_pos: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(&CameraConfig::default(), Viewport::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn pixel_to_ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(400.0, 300.0), Some(Vec2::ZERO));
        assert_eq!(vp.to_ndc(0.0, 0.0), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(vp.to_ndc(800.0, 600.0), Some(Vec2::new(1.0, -1.0)));
    }

    #[test]
    fn zero_viewport_has_no_ndc() {
        assert_eq!(Viewport::new(0.0, 600.0).to_ndc(1.0, 1.0), None);
        assert_eq!(Viewport::new(0.0, 0.0).aspect(), 1.0);
    }

    #[test]
    fn center_ray_points_at_target() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 0.0, 10.0);
        cam.look_at(Vec3::ZERO);
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert!(approx(ray.origin, Vec3::new(0.0, 0.0, 10.0)));
        assert!(approx(ray.direction, Vec3::NEG_Z), "dir = {:?}", ray.direction);
    }

    #[test]
    fn corner_ray_leans_up_and_right() {
        let mut cam = PerspectiveCamera::default();
        cam.position = Vec3::new(0.0, 0.0, 10.0);
        cam.look_at(Vec3::ZERO);
        let ray = cam.ray_from_ndc(Vec2::new(1.0, 1.0));
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y > 0.0);
        assert!(ray.direction.z < 0.0);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn resize_updates_aspect() {
        let mut cam = PerspectiveCamera::default();
        cam.resize(Viewport::new(1000.0, 500.0));
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn defaults_match_startup_view() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 5.0, 40.0));
        assert!((cam.fov_y - 75f32.to_radians()).abs() < 1e-6);
        assert_eq!(cam.far, 100.0);
    }
}
