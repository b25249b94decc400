mod aabb;
mod random;

pub use aabb::{BoundingSphere, AABB};
pub use random::{RngSource, UniformSource};
