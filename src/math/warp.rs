// Copyright @yucwang 2026

use super::constants::{ Float, SQRT_ONE_THIRD, TWO_PI, Vector3f };

use nalgebra::{ Rotation3, Unit };

/// Draws a direction in the hemisphere around `normal`, distributed
/// proportionally to the cosine of the angle to `normal`. Grazing
/// directions are rarely sampled, which matches how little they
/// contribute for a diffuse surface.
pub fn sample_hemisphere_cosine(normal: &Vector3f, u1: Float, u2: Float) -> Vector3f {
    let up = u1.sqrt();
    let over = (1.0 - u1).sqrt();
    let around = u2 * TWO_PI;

    // Any axis not parallel to the normal works for building the tangent
    // basis. At least one component of a unit normal is below sqrt(1/3),
    // so the matching cardinal axis is a safe pick.
    let helper = if normal.x.abs() < SQRT_ONE_THIRD {
        Vector3f::new(1.0, 0.0, 0.0)
    } else if normal.y.abs() < SQRT_ONE_THIRD {
        Vector3f::new(0.0, 1.0, 0.0)
    } else {
        Vector3f::new(0.0, 0.0, 1.0)
    };

    let tangent = normal.cross(&helper).normalize();
    let bitangent = normal.cross(&tangent);

    (normal * up
        + tangent * (over * around.cos())
        + bitangent * (over * around.sin()))
    .normalize()
}

/// Draws a direction from the Phong lobe of the given exponent centered
/// on `mirror`. Higher exponents concentrate samples ever tighter around
/// the mirror direction.
pub fn sample_phong_lobe(mirror: &Vector3f, exponent: Float, u1: Float, u2: Float) -> Vector3f {
    let theta = u1.powf(1.0 / (exponent + 1.0)).acos();
    let phi = u2 * TWO_PI;

    let sin_theta = theta.sin();
    let local = Vector3f::new(
        sin_theta * phi.cos(),
        sin_theta * phi.sin(),
        theta.cos(),
    );

    // Rotate the +z pole of the lobe onto the mirror direction.
    let up = Vector3f::new(0.0, 0.0, 1.0);
    let axis = up.cross(mirror);
    if axis.norm_squared() < 1e-12 {
        // Mirror is parallel to +-z. Rotating about any perpendicular
        // axis handles both poles.
        let angle = up.dot(mirror).min(1.0).max(-1.0).acos();
        return rotate_about_axis(&local, &Vector3f::new(1.0, 0.0, 0.0), angle);
    }

    let angle = up.dot(mirror).min(1.0).max(-1.0).acos();
    rotate_about_axis(&local, &axis, angle)
}

pub fn rotate_about_axis(v: &Vector3f, axis: &Vector3f, angle: Float) -> Vector3f {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle) * v
}

pub fn reflect(incident: &Vector3f, normal: &Vector3f) -> Vector3f {
    incident - normal * (2.0 * normal.dot(incident))
}

/// Refracts `incident` through a surface with normal `normal`, where
/// `eta` is the ratio of the refraction indices on the incident and
/// transmitted sides. Returns `None` on total internal reflection.
pub fn refract(incident: &Vector3f, normal: &Vector3f, eta: Float) -> Option<Vector3f> {
    let cos_i = -normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }

    Some(incident * eta + normal * (eta * cos_i - k.sqrt()))
}

/* Tests for sampling warps */
