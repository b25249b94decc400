use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use crate::camera::PerspectiveCamera;

const EPS: f32 = 1e-6;

/// Spherical coordinates with Y up. `phi` is the polar angle from +Y,
/// `theta` the azimuth around Y measured from +Z.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }

    /// Keep phi away from the poles so look-at stays well defined
    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

/// What a pointer drag currently does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Rotate,
    Pan,
}

/// Camera orbit around a target driven by pointer drags and the wheel
///
/// Input only accumulates deltas; nothing moves until [`OrbitControls::update`].
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    spherical_delta: Spherical,
    scale: f32,
    pan_offset: Vec3,
    drag: Option<DragMode>,
    last_pointer: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            spherical_delta: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            drag: None,
            last_pointer: None,
        }
    }

    pub fn with_damping(mut self, enabled: bool) -> Self {
        self.enable_damping = enabled;
        self
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down(&mut self, mode: DragMode, position: Vec2) {
        self.drag = Some(mode);
        self.last_pointer = Some(position);
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// Track the cursor. Drags convert movement into rotation or pan deltas
    /// relative to the viewport height.
    pub fn pointer_move(&mut self, position: Vec2, camera: &PerspectiveCamera, viewport_height: f32) {
        let previous = self.last_pointer.replace(position);
        let (Some(mode), Some(previous)) = (self.drag, previous) else {
            return;
        };
        if viewport_height <= 0.0 {
            return;
        }

        let delta = position - previous;
        match mode {
            DragMode::Rotate => {
                let delta = delta * self.rotate_speed;
                self.rotate_left(2.0 * PI * delta.x / viewport_height);
                self.rotate_up(2.0 * PI * delta.y / viewport_height);
            }
            DragMode::Pan => self.pan(delta * self.pan_speed, camera, viewport_height),
        }
    }

    /// One wheel notch. Positive scrolls toward the target.
    pub fn wheel(&mut self, delta: f32) {
        if delta > 0.0 {
            self.dolly_in(self.zoom_scale());
        } else if delta < 0.0 {
            self.dolly_out(self.zoom_scale());
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    pub fn dolly_in(&mut self, dolly_scale: f32) {
        self.scale *= dolly_scale;
    }

    pub fn dolly_out(&mut self, dolly_scale: f32) {
        self.scale /= dolly_scale;
    }

    fn zoom_scale(&self) -> f32 {
        0.95_f32.powf(self.zoom_speed)
    }

    fn pan(&mut self, delta: Vec2, camera: &PerspectiveCamera, viewport_height: f32) {
        let offset = camera.position - self.target;
        // Half the visible height at the target's depth
        let target_distance = offset.length() * (camera.fov.to_radians() / 2.0).tan();

        let world = camera.world_matrix();
        let left = 2.0 * delta.x * target_distance / viewport_height;
        let up = 2.0 * delta.y * target_distance / viewport_height;

        self.pan_offset += world.x_axis.truncate() * -left;
        self.pan_offset += world.y_axis.truncate() * up;
    }

    /// Apply accumulated input to the camera. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let previous_position = camera.position;
        let previous_target = self.target;

        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_vec3(offset);

        let rotation_factor = if self.enable_damping { self.damping_factor } else { 1.0 };
        spherical.theta += self.spherical_delta.theta * rotation_factor;
        spherical.phi += self.spherical_delta.phi * rotation_factor;

        spherical.phi = spherical.phi.clamp(self.min_polar_angle, self.max_polar_angle);
        spherical.make_safe();

        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * rotation_factor;

        camera.position = self.target + spherical.to_vec3();
        camera.look_at(self.target);

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= decay;
            self.spherical_delta.phi *= decay;
            self.pan_offset *= decay;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        camera.position.distance_squared(previous_position) > EPS
            || self.target.distance_squared(previous_target) > EPS
    }
}
