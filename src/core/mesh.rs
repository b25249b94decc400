use glam::{Vec2, Vec3};

use crate::math::{BoundingSphere, AABB};
use crate::types::MeshVertex;

/// Indexed triangle mesh with separate attribute streams
///
/// Positions may be edited in place; call [`Mesh::mark_positions_dirty`]
/// afterwards so normals and bounds are rebuilt by [`Mesh::refresh_derived`].
#[derive(Debug, Clone)]
pub struct Mesh {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    indices: Vec<u32>,
    positions_dirty: bool,
    version: u64,
    bounds: Option<AABB>,
    bounding_sphere: Option<BoundingSphere>,
}

impl Mesh {
    pub fn new(positions: Vec<Vec3>, normals: Vec<Vec3>, uvs: Vec<Vec2>, indices: Vec<u32>) -> Self {
        debug_assert_eq!(positions.len(), normals.len());
        debug_assert_eq!(positions.len(), uvs.len());

        let bounds = AABB::from_points(&positions);
        let bounding_sphere = BoundingSphere::from_points(&positions);

        Self {
            positions,
            normals,
            uvs,
            indices,
            positions_dirty: false,
            version: 0,
            bounds,
            bounding_sphere,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable access to positions. The slice length is fixed, so the
    /// vertex count cannot change through it.
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn mark_positions_dirty(&mut self) {
        self.positions_dirty = true;
    }

    pub fn positions_dirty(&self) -> bool {
        self.positions_dirty
    }

    /// Bumped on every refresh that changed geometry; GPU copies compare
    /// against it to know when to re-upload
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Bounds as of the last refresh
    pub fn bounds(&self) -> Option<AABB> {
        self.bounds
    }

    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.bounding_sphere
    }

    /// Rebuild normals and bounds if positions changed. Returns true when
    /// anything was recomputed.
    pub fn refresh_derived(&mut self) -> bool {
        if !self.positions_dirty {
            return false;
        }

        self.compute_vertex_normals();
        self.bounds = AABB::from_points(&self.positions);
        self.bounding_sphere = BoundingSphere::from_points(&self.positions);
        self.positions_dirty = false;
        self.version += 1;
        true
    }

    /// Area-weighted smooth normals from the index topology
    pub fn compute_vertex_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (pa, pb, pc) = (self.positions[a], self.positions[b], self.positions[c]);
            let face = (pc - pb).cross(pa - pb);
            accumulated[a] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }

        // Vertices outside every triangle keep their previous normal
        for (normal, sum) in self.normals.iter_mut().zip(accumulated) {
            if let Some(n) = sum.try_normalize() {
                *normal = n;
            }
        }
    }

    /// Interleaved vertex data for upload
    pub fn to_vertices(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| MeshVertex::new(*p, *n, *uv))
            .collect()
    }
}
