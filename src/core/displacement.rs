//! Rock-shaping pass over a sphere's vertices.
//!
//! Vertices on the +X side are pushed outward and up, everything else is
//! pulled further out along -X and nudged along +Z. Each vertex is handled
//! independently with fresh random draws.

use super::mesh::Mesh;
use crate::math::UniformSource;

/// Upper bound of the +X push on the bulging side
pub const BULGE_X: f32 = 0.1;
/// Upper bound of the +Y lift on the bulging side
pub const BULGE_Y: f32 = 0.2;
/// Upper bound of the -X pull on the hollowed side
pub const HOLLOW_X: f32 = 0.2;
/// Upper bound of the +Z nudge on the hollowed side
pub const HOLLOW_Z: f32 = 0.1;

/// Deform every vertex of `mesh` in place and flag its positions as changed.
///
/// Vertex count and index topology are left untouched. Returns the number of
/// vertices visited.
pub fn displace_rock<R: UniformSource + ?Sized>(mesh: &mut Mesh, rng: &mut R) -> usize {
    let positions = mesh.positions_mut();

    for p in positions.iter_mut() {
        if p.x > 0.0 {
            p.x += rng.next_uniform(0.0, BULGE_X);
            p.y += rng.next_uniform(0.0, BULGE_Y);
        } else {
            p.x -= rng.next_uniform(0.0, HOLLOW_X);
            p.z += rng.next_uniform(0.0, HOLLOW_Z);
        }
    }

    let visited = positions.len();
    mesh.mark_positions_dirty();
    visited
}
