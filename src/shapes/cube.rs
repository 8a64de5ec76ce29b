// Copyright @yucwang 2026

use crate::core::interaction::SurfaceHit;
use crate::core::shape::Shape;
use crate::math::constants::{EPSILON, FLOAT_MAX, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

/// Unit cube spanning [-0.5, 0.5] on every local axis. Size and
/// placement come entirely from the transform.
pub struct Cube {
    to_world: Transform,
}

impl Cube {
    pub fn new(to_world: Transform) -> Self {
        Self { to_world }
    }

    fn intersect_local(&self, o: Vector3f, d: Vector3f) -> Option<Vector3f> {
        let mut t_min = -FLOAT_MAX;
        let mut t_max = FLOAT_MAX;

        for axis in 0..3 {
            let dir = d[axis];
            if dir.abs() < EPSILON {
                if o[axis] < -0.5 || o[axis] > 0.5 {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let mut t0 = (-0.5 - o[axis]) * inv;
            let mut t1 = (0.5 - o[axis]) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_max < t_min {
                return None;
            }
        }

        if t_max <= 0.0 {
            return None;
        }

        // Entry face when the ray starts outside, exit face when it
        // starts inside.
        let t_local = if t_min > 0.0 { t_min } else { t_max };
        Some(o + d * t_local)
    }
}

impl Shape for Cube {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit> {
        let o = self.to_world.inv_apply_point(ray.origin());
        let d = self.to_world.inv_apply_vector(ray.dir()).normalize();

        let p_local = self.intersect_local(o, d)?;
        let p_world = self.to_world.apply_point(p_local);
        let t_world = (p_world - ray.origin()).dot(&ray.dir());
        if !ray.in_range(t_world) {
            return None;
        }

        let n_world = self.to_world.apply_normal(cube_normal(p_local)).normalize();
        Some(SurfaceHit::new(t_world, n_world))
    }
}

// Outward face normal from the dominant coordinate of a boundary point.
fn cube_normal(p: Vector3f) -> Vector3f {
    let ax = p.x.abs();
    let ay = p.y.abs();
    let az = p.z.abs();
    if ax >= ay && ax >= az {
        Vector3f::new(p.x.signum(), 0.0, 0.0)
    } else if ay >= az {
        Vector3f::new(0.0, p.y.signum(), 0.0)
    } else {
        Vector3f::new(0.0, 0.0, p.z.signum())
    }
}

/* Tests for Cube */

#[cfg(test)]
mod tests {
    use super::{Cube, Transform, Vector3f};
    use crate::core::shape::Shape;
    use crate::math::ray::Ray3f;

    #[test]
    fn test_axis_aligned_hit() {
        let cube = Cube::new(Transform::default());
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 0.0, -1.0));

        let hit = cube.ray_intersection(&ray).unwrap();
        assert!((hit.t - 1.5).abs() < 1e-4);
        assert!((hit.normal - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-4);
    }

    #[test]
    fn test_hit_from_inside_reports_exit_face() {
        let cube = Cube::new(Transform::default());
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 1.0, 0.0));

        let hit = cube.ray_intersection(&ray).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-4);
        assert!((hit.normal - Vector3f::new(0.0, 1.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_parallel_ray_outside_slab_misses() {
        let cube = Cube::new(Transform::default());
        let ray = Ray3f::new(Vector3f::new(2.0, 2.0, 2.0), Vector3f::new(1.0, 0.0, 0.0));
        assert!(cube.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_cube_behind_origin_is_missed() {
        let cube = Cube::new(Transform::default());
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(cube.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_stretched_cube_as_wall() {
        // A thin wall made by flattening the cube along z.
        let to_world = Transform::from_trs(
            Vector3f::new(0.0, 0.0, -5.0),
            Vector3f::new(0.0, 0.0, 0.0),
            Vector3f::new(10.0, 10.0, 0.1),
        );
        let wall = Cube::new(to_world);
        let ray = Ray3f::new(Vector3f::new(3.0, 3.0, 0.0), Vector3f::new(0.0, 0.0, -1.0));

        let hit = wall.ray_intersection(&ray).unwrap();
        assert!((hit.t - 4.95).abs() < 1e-3);
        assert!((hit.normal - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-4);
    }
}
