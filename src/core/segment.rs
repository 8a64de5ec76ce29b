// Copyright @yucwang 2026

use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

/// One live path in flight. The throughput is the product of every
/// surface color the path has picked up so far; whatever radiance the
/// path eventually reaches is filtered through it before it lands on
/// the film.
#[derive(Debug, Clone, Copy)]
pub struct PathSegment {
    pub ray: Ray3f,
    pub throughput: RGBSpectrum,
    pub pixel_index: usize,
    pub remaining_bounces: u32,
}

impl PathSegment {
    pub fn spawn(ray: Ray3f, pixel_index: usize, trace_depth: u32) -> Self {
        Self {
            ray,
            throughput: RGBSpectrum::splat(1.0),
            pixel_index,
            remaining_bounces: trace_depth,
        }
    }

    /// Continues the path along `ray`, filtering its throughput by the
    /// surface color and spending one bounce.
    pub fn bounce(&mut self, attenuation: RGBSpectrum, ray: Ray3f) {
        self.throughput *= attenuation;
        self.ray = ray;
        self.remaining_bounces -= 1;
    }
}

/* Tests for PathSegment */

#[cfg(test)]
mod tests {
    use super::PathSegment;
    use crate::math::constants::Vector3f;
    use crate::math::ray::Ray3f;
    use crate::math::spectrum::RGBSpectrum;

    #[test]
    fn test_bounce_filters_throughput() {
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut segment = PathSegment::spawn(ray, 17, 8);
        assert_eq!(segment.remaining_bounces, 8);
        assert_eq!(segment.throughput, RGBSpectrum::splat(1.0));

        let next = Ray3f::new(Vector3f::new(0.0, 0.0, -2.0), Vector3f::new(0.0, 1.0, 0.0));
        segment.bounce(RGBSpectrum::new(0.5, 0.25, 1.0), next);
        segment.bounce(RGBSpectrum::new(0.5, 1.0, 1.0), next);

        assert_eq!(segment.remaining_bounces, 6);
        assert_eq!(segment.throughput, RGBSpectrum::new(0.25, 0.25, 1.0));
        assert_eq!(segment.pixel_index, 17);
    }

    #[test]
    fn test_throughput_stays_bounded_over_many_bounces() {
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(0.0, 0.0, -1.0));
        let mut segment = PathSegment::spawn(ray, 0, 200);

        // Sub-unit albedo can only shrink the throughput.
        let albedo = RGBSpectrum::new(0.9, 0.6, 0.3);
        let mut previous = segment.throughput.max_component();
        for _ in 0..200 {
            segment.bounce(albedo, ray);
            let current = segment.throughput.max_component();
            assert!(segment.throughput.is_finite());
            assert!(current >= 0.0);
            assert!(current <= previous);
            previous = current;
        }
        assert!(segment.throughput.max_component() < 1e-6);
    }
}
