use glam::{Vec2, Vec3};
use floating_rock::core::{displace_rock, Mesh, SphereGeometry};
use floating_rock::math::{RngSource, UniformSource};
use floating_rock::scene::{RockScene, ROCK_HEIGHT_SEGMENTS, ROCK_RADIUS, ROCK_WIDTH_SEGMENTS};

/// Rounding slack for differences of displaced f32 coordinates
const EPS: f32 = 1e-6;

/// Answers 0.05 for the narrow range and 0.1 for the wide one
struct FixedSource;

impl UniformSource for FixedSource {
    fn next_uniform(&mut self, _low: f32, high: f32) -> f32 {
        if high <= 0.1 {
            0.05
        } else {
            0.1
        }
    }
}

fn rock_sphere() -> Mesh {
    SphereGeometry::new(ROCK_RADIUS, ROCK_WIDTH_SEGMENTS, ROCK_HEIGHT_SEGMENTS).build()
}

fn mesh_from_points(points: &[Vec3]) -> Mesh {
    Mesh::new(
        points.to_vec(),
        vec![Vec3::Y; points.len()],
        vec![Vec2::ZERO; points.len()],
        vec![],
    )
}

#[cfg(test)]
mod displacement_tests {
    use super::*;

    #[test]
    fn test_positive_side_moves_out_and_up() {
        let before = rock_sphere();
        let mut after = before.clone();
        displace_rock(&mut after, &mut RngSource::seeded(11));

        for (a, b) in before.positions().iter().zip(after.positions()) {
            if a.x > 0.0 {
                let dx = b.x - a.x;
                let dy = b.y - a.y;
                assert!((0.0..0.1 + EPS).contains(&dx), "dx {} at {:?}", dx, a);
                assert!((0.0..0.2 + EPS).contains(&dy), "dy {} at {:?}", dy, a);
                assert_eq!(b.z, a.z);
            }
        }
    }

    #[test]
    fn test_non_positive_side_moves_out_and_forward() {
        let before = rock_sphere();
        let mut after = before.clone();
        displace_rock(&mut after, &mut RngSource::seeded(12));

        for (a, b) in before.positions().iter().zip(after.positions()) {
            if a.x <= 0.0 {
                let dx = a.x - b.x;
                let dz = b.z - a.z;
                assert!((0.0..0.2 + EPS).contains(&dx), "dx {} at {:?}", dx, a);
                assert!((0.0..0.1 + EPS).contains(&dz), "dz {} at {:?}", dz, a);
                assert_eq!(b.y, a.y);
            }
        }
    }

    #[test]
    fn test_vertex_count_and_topology_preserved() {
        let before = rock_sphere();
        let mut after = before.clone();
        let visited = displace_rock(&mut after, &mut RngSource::seeded(13));

        assert_eq!(visited, before.vertex_count());
        assert_eq!(after.vertex_count(), before.vertex_count());
        assert_eq!(after.indices(), before.indices());
    }

    #[test]
    fn test_fixed_randomness_scenario() {
        let mut mesh = mesh_from_points(&[
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.0),
            Vec3::new(-0.5, 0.0, 0.0),
        ]);
        displace_rock(&mut mesh, &mut FixedSource);

        let expected = [
            Vec3::new(1.05, 0.1, 0.0),
            Vec3::new(-1.1, 0.0, 0.05),
            Vec3::new(0.55, 0.1, 0.0),
            Vec3::new(-0.6, 0.0, 0.05),
        ];
        for (got, want) in mesh.positions().iter().zip(expected) {
            assert!((*got - want).length() < 1e-6, "got {:?}, want {:?}", got, want);
        }
        assert!(mesh.positions_dirty());
    }

    #[test]
    fn test_seeded_rocks_are_reproducible() {
        let a = RockScene::new(&mut RngSource::seeded(99));
        let b = RockScene::new(&mut RngSource::seeded(99));
        let c = RockScene::new(&mut RngSource::seeded(100));

        assert_eq!(a.rock.mesh.positions(), b.rock.mesh.positions());
        assert_ne!(a.rock.mesh.positions(), c.rock.mesh.positions());
    }

    #[test]
    fn test_scene_rock_has_fresh_normals() {
        let scene = RockScene::new(&mut RngSource::seeded(3));
        let mesh = &scene.rock.mesh;

        assert!(!mesh.positions_dirty());
        assert_eq!(mesh.version(), 1);
        for n in mesh.normals() {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }
}
