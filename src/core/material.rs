// Copyright @yucwang 2026

use crate::core::interaction::ShadeableIntersection;
use crate::core::sampler::PathSampler;
use crate::math::constants::{ Float, RAY_OFFSET, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp;

// Below this |normal . dir| a refraction ray is treated as skimming the
// surface and passes through unchanged.
const GRAZING_COS_EPSILON: Float = 1e-2;

/// The surface models the renderer knows. A primitive is exactly one of
/// these; there are no blended or layered surfaces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Diffuse { albedo: RGBSpectrum },
    Specular { color: RGBSpectrum, exponent: Float },
    Refractive { transmittance: RGBSpectrum, ior: Float },
    Emissive { radiance: RGBSpectrum },
}

/// Outcome of a scatter: the continuation ray and the color the path
/// throughput is filtered by.
#[derive(Debug, Clone, Copy)]
pub struct ScatterRecord {
    pub ray: Ray3f,
    pub attenuation: RGBSpectrum,
}

impl Material {
    /// Classifies a weight-style material record, as found in scene
    /// files that flag surface behaviors with scalar weights instead of
    /// naming one. Emission wins over reflection, reflection over
    /// refraction, refraction over plain diffuse.
    pub fn from_weights(
        color: RGBSpectrum,
        specular_color: RGBSpectrum,
        specular_exponent: Float,
        reflective: Float,
        refractive: Float,
        ior: Float,
        emittance: Float,
    ) -> Self {
        if emittance > 0.0 {
            Material::Emissive { radiance: color * emittance }
        } else if reflective > 0.0 {
            Material::Specular { color: specular_color, exponent: specular_exponent }
        } else if refractive > 0.0 {
            Material::Refractive { transmittance: specular_color, ior }
        } else {
            Material::Diffuse { albedo: color }
        }
    }

    pub fn is_emissive(&self) -> bool {
        matches!(self, Material::Emissive { .. })
    }

    /// Radiance leaving the surface. Black for everything but lights.
    pub fn emission(&self) -> RGBSpectrum {
        match self {
            Material::Emissive { radiance } => *radiance,
            _ => RGBSpectrum::black(),
        }
    }

    /// Samples the continuation of a path that hit this surface.
    /// Returns `None` for lights: they terminate paths instead of
    /// scattering them.
    pub fn scatter(
        &self,
        ray: &Ray3f,
        hit: &ShadeableIntersection,
        sampler: &mut PathSampler,
    ) -> Option<ScatterRecord> {
        match self {
            Material::Emissive { .. } => None,
            Material::Diffuse { albedo } => {
                let dir = warp::sample_hemisphere_cosine(
                    &hit.normal,
                    sampler.next_f32(),
                    sampler.next_f32(),
                );
                Some(ScatterRecord {
                    ray: spawn_bounce_ray(ray, hit.t, &dir),
                    attenuation: *albedo,
                })
            }
            Material::Specular { color, exponent } => {
                let mirror = warp::reflect(&ray.dir(), &hit.normal);
                let dir = if *exponent == 0.0 {
                    // Perfect mirror.
                    mirror
                } else {
                    warp::sample_phong_lobe(
                        &mirror,
                        *exponent,
                        sampler.next_f32(),
                        sampler.next_f32(),
                    )
                };
                Some(ScatterRecord {
                    ray: spawn_bounce_ray(ray, hit.t, &dir),
                    attenuation: *color,
                })
            }
            Material::Refractive { transmittance, ior } => {
                let dir = ray.dir();
                let cosine = hit.normal.dot(&dir);
                let new_dir = if cosine.abs() < GRAZING_COS_EPSILON {
                    dir
                } else {
                    // Entering refracts against the outward normal with
                    // the inverse index ratio; exiting against the
                    // flipped normal with the ratio itself.
                    let (eta, n) = if cosine < 0.0 {
                        (1.0 / ior, hit.normal)
                    } else {
                        (*ior, -hit.normal)
                    };
                    warp::refract(&dir, &n, eta)
                        .unwrap_or_else(|| warp::reflect(&dir, &n))
                };
                Some(ScatterRecord {
                    ray: spawn_bounce_ray(ray, hit.t, &new_dir),
                    attenuation: *transmittance,
                })
            }
        }
    }
}

// The new ray starts a nudge down its own direction so it cannot re-hit
// the surface it just left.
fn spawn_bounce_ray(prev: &Ray3f, t: Float, dir: &Vector3f) -> Ray3f {
    Ray3f::new(prev.at(t) + dir * RAY_OFFSET, *dir)
}

/* Tests for Material */
