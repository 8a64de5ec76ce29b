// Copyright 2020 @TwoCookingMice

use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

/// Pinhole camera. Rays leave `origin` through a virtual image plane
/// one unit down the viewing axis, sized by the vertical field of view.
pub struct Camera {
    origin: Vector3f,
    forward: Vector3f,
    right: Vector3f,
    up: Vector3f,
    tan_half_fov_y: Float,
    aspect: Float,
    width: u32,
    height: u32,
}

impl Camera {
    pub fn new(
        origin: Vector3f,
        target: Vector3f,
        up_hint: Vector3f,
        fov_y: Float,
        width: u32,
        height: u32,
    ) -> Self {
        let forward = (target - origin).normalize();
        let right = forward.cross(&up_hint).normalize();
        let up = right.cross(&forward);

        Self {
            origin,
            forward,
            right,
            up,
            tan_half_fov_y: (0.5 * fov_y).tan(),
            aspect: width as Float / height as Float,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Builds the primary ray through pixel (x, y). `jitter` in [0, 1)^2
    /// moves the sample point inside the pixel footprint; (0.5, 0.5) is
    /// the pixel center.
    pub fn generate_ray(&self, x: u32, y: u32, jitter: Vector2f) -> Ray3f {
        let u = (x as Float + jitter.x) / self.width as Float;
        let v = (y as Float + jitter.y) / self.height as Float;

        let px = (2.0 * u - 1.0) * self.aspect * self.tan_half_fov_y;
        let py = (1.0 - 2.0 * v) * self.tan_half_fov_y;

        let dir = self.forward + self.right * px + self.up * py;
        Ray3f::new(self.origin, dir)
    }
}

/* Tests for Camera */

#[cfg(test)]
mod tests {
    use super::{Camera, Vector2f, Vector3f};
    use crate::math::constants::PI;

    fn test_camera() -> Camera {
        Camera::new(
            Vector3f::new(0.0, 0.0, 5.0),
            Vector3f::new(0.0, 0.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            0.5 * PI,
            128,
            64,
        )
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = test_camera();
        let ray = camera.generate_ray(64, 32, Vector2f::new(0.0, 0.0));

        assert!((ray.origin() - Vector3f::new(0.0, 0.0, 5.0)).norm() < 1e-5);
        assert!((ray.dir() - Vector3f::new(0.0, 0.0, -1.0)).norm() < 1e-5);
    }

    #[test]
    fn test_image_axes_orientation() {
        let camera = test_camera();

        // Moving right in the image moves the ray toward +x, moving down
        // moves it toward -y.
        let right = camera.generate_ray(127, 32, Vector2f::new(0.5, 0.0));
        assert!(right.dir().x > 0.0);

        let bottom = camera.generate_ray(64, 63, Vector2f::new(0.0, 0.5));
        assert!(bottom.dir().y < 0.0);
    }

    #[test]
    fn test_fov_covers_half_angle_at_image_edge() {
        let camera = test_camera();

        // fov_y of 90 degrees puts the vertical edge ray 45 degrees off
        // the viewing axis.
        let top = camera.generate_ray(64, 0, Vector2f::new(0.0, 0.0));
        let cos = top.dir().dot(&Vector3f::new(0.0, 0.0, -1.0));
        assert!((cos - (0.25 * PI).cos()).abs() < 1e-4);
    }
}
