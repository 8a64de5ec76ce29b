// Copyright @yucwang 2026

use crate::core::interaction::SurfaceHit;
use crate::core::shape::Shape;
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;

/// Unit-diameter sphere centered at the local origin. Size and placement
/// come entirely from the transform.
pub struct Sphere {
    to_world: Transform,
}

impl Sphere {
    pub fn new(to_world: Transform) -> Self {
        Self { to_world }
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit> {
        let o = self.to_world.inv_apply_point(ray.origin());
        let d = self.to_world.inv_apply_vector(ray.dir()).normalize();

        // |o + t d|^2 = 0.25 with unit d.
        let b = o.dot(&d);
        let c = o.dot(&o) - 0.25;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }

        let sqrt_disc = disc.sqrt();
        let t_near = -b - sqrt_disc;
        let t_far = -b + sqrt_disc;
        let t_local = if t_near > 0.0 {
            t_near
        } else if t_far > 0.0 {
            t_far
        } else {
            return None;
        };

        let p_local = o + d * t_local;
        let p_world = self.to_world.apply_point(p_local);
        let t_world = (p_world - ray.origin()).dot(&ray.dir());
        if !ray.in_range(t_world) {
            return None;
        }

        // Local position doubles as the outward normal direction.
        let n_world = self.to_world.apply_normal(p_local).normalize();
        Some(SurfaceHit::new(t_world, n_world))
    }
}

/* Tests for Sphere */

#[cfg(test)]
mod tests {
    use super::{Sphere, Transform};
    use crate::core::shape::Shape;
    use crate::math::constants::Vector3f;
    use crate::math::ray::Ray3f;

    #[test]
    fn test_hit_from_outside() {
        let sphere = Sphere::new(Transform::default());
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 0.0, -1.0));

        let hit = sphere.ray_intersection(&ray).unwrap();
        assert!((hit.t - 1.5).abs() < 1e-4);
        assert!((hit.normal - Vector3f::new(0.0, 0.0, 1.0)).norm() < 1e-4);
    }

    #[test]
    fn test_sphere_behind_origin_is_missed() {
        let sphere = Sphere::new(Transform::default());
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 2.0), Vector3f::new(0.0, 0.0, 1.0));
        assert!(sphere.ray_intersection(&ray).is_none());
    }

    #[test]
    fn test_hit_from_inside_keeps_outward_normal() {
        let sphere = Sphere::new(Transform::default());
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));

        let hit = sphere.ray_intersection(&ray).unwrap();
        assert!((hit.t - 0.5).abs() < 1e-4);
        // Outward, which here means along the ray.
        assert!((hit.normal - Vector3f::new(1.0, 0.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_scaled_and_translated_sphere() {
        let to_world = Transform::from_trs(
            Vector3f::new(3.0, 0.0, 0.0),
            Vector3f::new(0.0, 0.0, 0.0),
            Vector3f::new(2.0, 2.0, 2.0),
        );
        let sphere = Sphere::new(to_world);
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));

        let hit = sphere.ray_intersection(&ray).unwrap();
        assert!((hit.t - 2.0).abs() < 1e-4);
        assert!((hit.normal - Vector3f::new(-1.0, 0.0, 0.0)).norm() < 1e-4);
    }

    #[test]
    fn test_grazing_miss() {
        let sphere = Sphere::new(Transform::default());
        let ray = Ray3f::new(Vector3f::new(0.6, 0.0, 2.0), Vector3f::new(0.0, 0.0, -1.0));
        assert!(sphere.ray_intersection(&ray).is_none());
    }
}
