use std::f32::consts::PI;

use glam::{Vec2, Vec3};

use super::mesh::Mesh;

/// UV sphere with duplicated seam and pole vertices
///
/// Produces `(width_segments + 1) * (height_segments + 1)` vertices laid out
/// row by row from the north pole, matching the layout most web 3D
/// libraries use so textures wrap the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereGeometry {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl SphereGeometry {
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }

    pub fn vertex_count(&self) -> usize {
        ((self.width_segments + 1) * (self.height_segments + 1)) as usize
    }

    pub fn build(&self) -> Mesh {
        let ws = self.width_segments;
        let hs = self.height_segments;
        let count = self.vertex_count();

        let mut positions = Vec::with_capacity(count);
        let mut normals = Vec::with_capacity(count);
        let mut uvs = Vec::with_capacity(count);

        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;

            // Nudge pole UVs to the middle of their segment
            let u_offset = if iy == 0 {
                0.5 / ws as f32
            } else if iy == hs {
                -0.5 / ws as f32
            } else {
                0.0
            };

            let (sin_theta, cos_theta) = (v * PI).sin_cos();

            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let (sin_phi, cos_phi) = (u * 2.0 * PI).sin_cos();

                let position = Vec3::new(
                    -self.radius * cos_phi * sin_theta,
                    self.radius * cos_theta,
                    self.radius * sin_phi * sin_theta,
                );

                positions.push(position);
                normals.push(position.try_normalize().unwrap_or(Vec3::Y));
                uvs.push(Vec2::new(u + u_offset, 1.0 - v));
            }
        }

        let row = ws + 1;
        let mut indices = Vec::with_capacity((ws * (hs * 2 - 2) * 3) as usize);

        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Mesh::new(positions, normals, uvs, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rock_sphere_counts() {
        let mesh = SphereGeometry::new(1.5, 15, 10).build();
        assert_eq!(mesh.vertex_count(), 176);
        assert_eq!(mesh.indices().len(), 15 * (2 * 10 - 2) * 3);
    }

    #[test]
    fn test_vertices_lie_on_radius() {
        let radius = 1.5;
        let mesh = SphereGeometry::new(radius, 15, 10).build();
        for p in mesh.positions() {
            assert!((p.length() - radius).abs() < 1e-5, "vertex {:?} off sphere", p);
        }
    }

    #[test]
    fn test_poles_and_first_row() {
        let mesh = SphereGeometry::new(2.0, 8, 4).build();
        let positions = mesh.positions();

        // Whole first row sits on the north pole
        for p in &positions[..9] {
            assert!((*p - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        }
        // And the last row on the south pole
        for p in &positions[positions.len() - 9..] {
            assert!((*p - Vec3::new(0.0, -2.0, 0.0)).length() < 1e-5);
        }
    }

    #[test]
    fn test_seam_vertices_coincide() {
        let ws = 15;
        let mesh = SphereGeometry::new(1.5, ws, 10).build();
        let row = (ws + 1) as usize;
        let positions = mesh.positions();
        for iy in 0..=10usize {
            let first = positions[iy * row];
            let last = positions[iy * row + ws as usize];
            assert!((first - last).length() < 1e-5);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = SphereGeometry::new(1.0, 6, 5).build();
        let count = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < count));
    }

    #[test]
    fn test_segments_are_clamped() {
        let geometry = SphereGeometry::new(1.0, 1, 1);
        assert_eq!(geometry.width_segments, 3);
        assert_eq!(geometry.height_segments, 2);
        assert_eq!(geometry.build().vertex_count(), 12);
    }

    #[test]
    fn test_uvs_in_unit_range() {
        let mesh = SphereGeometry::new(1.5, 15, 10).build();
        for uv in mesh.uvs() {
            assert!(uv.y >= 0.0 && uv.y <= 1.0);
            assert!(uv.x >= -0.5 / 15.0 - 1e-6 && uv.x <= 1.0 + 0.5 / 15.0 + 1e-6);
        }
    }
}
