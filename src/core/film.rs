// Copyright 2020 @TwoCookingMice

use crate::math::constants::{ Float, Vector3f };
use crate::math::spectrum::RGBSpectrum;

/// Running radiance sum per pixel. Iterations add into it; readers
/// divide by the iteration count to get the current estimate.
pub struct Film {
    width: u32,
    height: u32,
    accum: Vec<Vector3f>,
}

impl Film {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            accum: vec![Vector3f::zeros(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn deposit(&mut self, pixel_index: usize, value: RGBSpectrum) {
        self.accum[pixel_index] += value.to_vector();
    }

    pub fn clear(&mut self) {
        for pixel in self.accum.iter_mut() {
            *pixel = Vector3f::zeros();
        }
    }

    /// The estimate after `iterations` completed iterations, row-major.
    pub fn average(&self, iterations: u32) -> Vec<(Float, Float, Float)> {
        let inv = 1.0 / iterations.max(1) as Float;
        self.accum
            .iter()
            .map(|pixel| (pixel.x * inv, pixel.y * inv, pixel.z * inv))
            .collect()
    }

    pub fn raw(&self) -> &[Vector3f] {
        &self.accum
    }
}

/* Tests for Film */
