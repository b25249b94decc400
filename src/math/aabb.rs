use glam::Vec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around a point set, `None` when the set is empty
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(rest.iter().fold(Self::new(*first, *first), |acc, p| Self {
            min: acc.min.min(*p),
            max: acc.max.max(*p),
        }))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Sphere centered on the box center, reaching the farthest point
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let center = AABB::from_points(points)?.center();
        let radius_sq = points
            .iter()
            .map(|p| p.distance_squared(center))
            .fold(0.0_f32, f32::max);

        Some(Self {
            center,
            radius: radius_sq.sqrt(),
        })
    }
}
