use glam::{Mat4, Vec3};

use crate::types::CameraUniform;

pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;
pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, 0.0, 8.0);

/// Perspective camera looking at a target point
///
/// The projection matrix is cached and only rebuilt by
/// [`PerspectiveCamera::update_projection_matrix`], so changing `aspect`
/// has no effect until that is called.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: DEFAULT_POSITION,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }

    /// Camera-to-world rotation; columns are the camera's right, up, back axes
    pub fn world_matrix(&self) -> Mat4 {
        self.view_matrix().inverse()
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection * self.view_matrix()).to_cols_array_2d(),
            position: self.position.to_array(),
            _pad: 0.0,
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_DEGREES, 800.0 / 600.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}
