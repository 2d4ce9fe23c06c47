use cgmath::{Point3, Vector3, Zero};

/// Axis-aligned box, used both for block colliders and the player's body.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl Aabb {
    pub fn from_center(center: Point3<f32>, half_extent: f32) -> Self {
        let half = Vector3::new(half_extent, half_extent, half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub dir: Vector3<f32>,
}

impl Ray {
    pub fn new(origin: Point3<f32>, dir: Vector3<f32>) -> Self {
        Self { origin, dir }
    }
}

/// Slab intersection of a ray against a box. Returns the entry distance and
/// the unit normal of the face crossed, or `None` when the box is missed,
/// lies behind the origin, or already contains the origin.
pub fn ray_box_intersection(ray: &Ray, aabb: &Aabb) -> Option<(f32, Vector3<f32>)> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut enter_axis = 0;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.dir[axis];

        if dir.abs() < 1e-8 {
            // Parallel to this slab: the origin must already be inside it.
            if origin < aabb.min[axis] || origin > aabb.max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t0 = (aabb.min[axis] - origin) * inv;
        let mut t1 = (aabb.max[axis] - origin) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }

        if t0 > t_enter {
            t_enter = t0;
            enter_axis = axis;
        }
        t_exit = t_exit.min(t1);

        if t_enter > t_exit {
            return None;
        }
    }

    // Entry behind the origin also covers rays starting inside the box.
    if t_enter < 0.0 {
        return None;
    }

    let mut normal = Vector3::zero();
    normal[enter_axis] = if ray.dir[enter_axis] > 0.0 { -1.0 } else { 1.0 };

    Some((t_enter, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: f32, y: f32, z: f32) -> Aabb {
        Aabb::from_center(Point3::new(x, y, z), 1.0)
    }

    #[test]
    fn test_hit_front_face() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        let (t, normal) = ray_box_intersection(&ray, &unit_box_at(5.0, 0.0, 0.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert_eq!(normal, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_hit_from_above() {
        let ray = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(0.0, -1.0, 0.0));
        let (t, normal) = ray_box_intersection(&ray, &unit_box_at(0.0, 0.0, 0.0)).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
        assert_eq!(normal, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parallel_miss() {
        let ray = Ray::new(Point3::new(0.0, 3.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(ray_box_intersection(&ray, &unit_box_at(5.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_box_behind_origin() {
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(-1.0, 0.0, 0.0));
        assert!(ray_box_intersection(&ray, &unit_box_at(5.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_origin_inside_reports_no_hit() {
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(ray_box_intersection(&ray, &unit_box_at(5.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_diagonal_picks_entry_axis() {
        // Approaches the box mostly along x, so the crossed face is the -x one.
        let dir = Vector3::new(4.0, 1.0, 0.0) / (17.0_f32).sqrt();
        let ray = Ray::new(Point3::new(0.0, 0.0, 0.0), dir);
        let (_, normal) = ray_box_intersection(&ray, &unit_box_at(5.0, 1.0, 0.0)).unwrap();
        assert_eq!(normal, Vector3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_aabb_overlap() {
        let a = unit_box_at(0.0, 0.0, 0.0);
        assert!(a.intersects(&unit_box_at(1.5, 0.0, 0.0)));
        assert!(!a.intersects(&unit_box_at(2.5, 0.0, 0.0)));
        // Touching faces do not count as overlap.
        assert!(!a.intersects(&unit_box_at(2.0, 0.0, 0.0)));
    }
}
