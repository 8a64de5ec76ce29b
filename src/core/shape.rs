// Copyright @yucwang 2026

use crate::core::interaction::SurfaceHit;
use crate::math::ray::Ray3f;

pub trait Shape: Send + Sync {
    /// Returns the nearest hit of `ray` within its range, or `None` when
    /// the ray misses. Implementations never report hits at or behind
    /// the ray origin.
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceHit>;
}
