// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };

/// Geometry of a ray/surface hit, in world space. The normal always
/// points out of the primitive, never toward the ray.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceHit {
    pub t: Float,
    pub normal: Vector3f,
}

impl SurfaceHit {
    pub fn new(t: Float, normal: Vector3f) -> Self {
        Self { t, normal }
    }
}

/// A surface hit joined with the material of the primitive that produced
/// it. This is what the scatter stage consumes.
#[derive(Debug, Clone, Copy)]
pub struct ShadeableIntersection {
    pub t: Float,
    pub normal: Vector3f,
    pub material_id: usize,
}

impl ShadeableIntersection {
    pub fn new(hit: SurfaceHit, material_id: usize) -> Self {
        Self { t: hit.t, normal: hit.normal, material_id }
    }
}
