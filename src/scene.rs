use glam::{Mat4, Quat, Vec3};

use crate::core::displacement::displace_rock;
use crate::core::mesh::Mesh;
use crate::core::sphere::SphereGeometry;
use crate::math::UniformSource;
use crate::types::{LightUniform, MaterialUniform, ModelUniform};

pub const ROCK_RADIUS: f32 = 1.5;
pub const ROCK_WIDTH_SEGMENTS: u32 = 15;
pub const ROCK_HEIGHT_SEGMENTS: u32 = 10;
pub const ROCK_SCALE: Vec3 = Vec3::new(0.8, 1.8, 0.8);

pub const DISPLACEMENT_SCALE: f32 = 0.3;
pub const ROCK_ROUGHNESS: f32 = 100.0;
pub const ROCK_METALNESS: f32 = 0.0;

pub const POINT_LIGHT_COLOR: u32 = 0xffffff;
pub const POINT_LIGHT_INTENSITY: f32 = 1.0;
pub const POINT_LIGHT_POSITION: Vec3 = Vec3::new(5.0, 5.0, 5.0);
pub const AMBIENT_LIGHT_COLOR: u32 = 0xdcdcdc;
pub const AMBIENT_LIGHT_INTENSITY: f32 = 0.6;

pub const CLEAR_COLOR: u32 = 0xc0c0c0;

/// Split a 0xRRGGBB value into sRGB [0, 1] channels
pub fn hex_to_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_rgb(c: [f32; 3]) -> [f32; 3] {
    c.map(srgb_to_linear)
}

/// Standard material parameters, fixed after construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub roughness: f32,
    pub metalness: f32,
    pub displacement_scale: f32,
    pub displacement_bias: f32,
}

impl Material {
    pub fn rock() -> Self {
        Self {
            roughness: ROCK_ROUGHNESS,
            metalness: ROCK_METALNESS,
            displacement_scale: DISPLACEMENT_SCALE,
            displacement_bias: 0.0,
        }
    }

    /// Shading only understands [0, 1]
    pub fn to_uniform(&self) -> MaterialUniform {
        MaterialUniform {
            roughness: self.roughness.clamp(0.0, 1.0),
            metalness: self.metalness.clamp(0.0, 1.0),
            displacement_scale: self.displacement_scale,
            displacement_bias: self.displacement_bias,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub point: PointLight,
    pub ambient: AmbientLight,
}

impl Lights {
    /// Linear colors premultiplied by intensity
    pub fn to_uniform(&self) -> LightUniform {
        let scaled = |c: [f32; 3], i: f32| linear_rgb(c).map(|v| v * i);
        LightUniform {
            ambient: scaled(self.ambient.color, self.ambient.intensity),
            _pad1: 0.0,
            point_position: self.point.position.to_array(),
            _pad2: 0.0,
            point_color: scaled(self.point.color, self.point.intensity),
            _pad3: 0.0,
        }
    }
}

impl Default for Lights {
    fn default() -> Self {
        Self {
            point: PointLight {
                color: hex_to_rgb(POINT_LIGHT_COLOR),
                intensity: POINT_LIGHT_INTENSITY,
                position: POINT_LIGHT_POSITION,
            },
            ambient: AmbientLight {
                color: hex_to_rgb(AMBIENT_LIGHT_COLOR),
                intensity: AMBIENT_LIGHT_INTENSITY,
            },
        }
    }
}

/// The floating rock: deformed mesh, material and transform
#[derive(Debug, Clone)]
pub struct Rock {
    pub mesh: Mesh,
    pub material: Material,
    pub position: Vec3,
    pub scale: Vec3,
}

impl Rock {
    /// Build the sphere, deform it once and recompute its derived geometry
    pub fn generate<R: UniformSource + ?Sized>(rng: &mut R) -> Self {
        let mut mesh =
            SphereGeometry::new(ROCK_RADIUS, ROCK_WIDTH_SEGMENTS, ROCK_HEIGHT_SEGMENTS).build();
        displace_rock(&mut mesh, rng);
        mesh.refresh_derived();

        Self {
            mesh,
            material: Material::rock(),
            position: Vec3::ZERO,
            scale: ROCK_SCALE,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, Quat::IDENTITY, self.position)
    }

    pub fn model_uniform(&self) -> ModelUniform {
        ModelUniform::from_model(self.model_matrix())
    }

    /// Size of the scaled bounding box, zero for an empty mesh
    pub fn world_extent(&self) -> Vec3 {
        self.mesh
            .bounds()
            .map(|b| b.size() * self.scale)
            .unwrap_or(Vec3::ZERO)
    }

    /// Bounding sphere radius under the largest scale axis
    pub fn world_bounding_radius(&self) -> f32 {
        self.mesh
            .bounding_sphere()
            .map(|s| s.radius * self.scale.max_element())
            .unwrap_or(0.0)
    }
}

/// Everything drawn each frame
#[derive(Debug, Clone)]
pub struct RockScene {
    pub rock: Rock,
    pub lights: Lights,
    /// sRGB clear color
    pub clear_color: [f32; 3],
}

impl RockScene {
    pub fn new<R: UniformSource + ?Sized>(rng: &mut R) -> Self {
        Self {
            rock: Rock::generate(rng),
            lights: Lights::default(),
            clear_color: hex_to_rgb(CLEAR_COLOR),
        }
    }

    pub fn clear_color_linear(&self) -> [f32; 3] {
        linear_rgb(self.clear_color)
    }
}
