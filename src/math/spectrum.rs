// Copyright 2020 @TwoCookingMice

use super::constants::{Float, Vector3f};

use std::ops;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBSpectrum {
    rgb: Vector3f,
}

impl Default for RGBSpectrum {
    fn default() -> Self {
        Self { rgb: Vector3f::new(0.0, 0.0, 0.0) }
    }
}

impl RGBSpectrum {
    pub fn new(r: Float, g: Float, b: Float) -> Self {
        Self { rgb: Vector3f::new(r, g, b) }
    }

    pub fn splat(v: Float) -> Self {
        Self { rgb: Vector3f::new(v, v, v) }
    }

    pub fn black() -> Self {
        Self::default()
    }

    pub fn from_vector(v: Vector3f) -> Self {
        Self { rgb: v }
    }

    pub fn to_vector(&self) -> Vector3f {
        self.rgb
    }

    pub fn is_black(&self) -> bool {
        for idx in 0..3 {
            if self.rgb[idx] != 0.0 {
                return false;
            }
        }

        true
    }

    pub fn max_component(&self) -> Float {
        self.rgb[0].max(self.rgb[1]).max(self.rgb[2])
    }

    pub fn is_finite(&self) -> bool {
        self.rgb[0].is_finite() && self.rgb[1].is_finite() && self.rgb[2].is_finite()
    }
}

impl ops::Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, index: usize) -> &Float {
        &self.rgb[index]
    }
}

impl ops::Add for RGBSpectrum {
    type Output = RGBSpectrum;

    fn add(self, rhs: RGBSpectrum) -> RGBSpectrum {
        RGBSpectrum { rgb: self.rgb + rhs.rgb }
    }
}

impl ops::AddAssign for RGBSpectrum {
    fn add_assign(&mut self, rhs: RGBSpectrum) {
        self.rgb += rhs.rgb;
    }
}

// Spectra multiply component-wise: filtering one spectrum by another.
impl ops::Mul for RGBSpectrum {
    type Output = RGBSpectrum;

    fn mul(self, rhs: RGBSpectrum) -> RGBSpectrum {
        RGBSpectrum { rgb: self.rgb.component_mul(&rhs.rgb) }
    }
}

impl ops::MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, rhs: RGBSpectrum) {
        self.rgb = self.rgb.component_mul(&rhs.rgb);
    }
}

impl ops::Mul<Float> for RGBSpectrum {
    type Output = RGBSpectrum;

    fn mul(self, rhs: Float) -> RGBSpectrum {
        RGBSpectrum { rgb: self.rgb * rhs }
    }
}

/* Tests for RGBSpectrum */

#[cfg(test)]
mod tests {
    use super::RGBSpectrum;

    #[test]
    fn test_spectrum_black() {
        assert!(RGBSpectrum::default().is_black());
        assert!(!RGBSpectrum::new(0.0, 0.1, 0.0).is_black());
    }

    #[test]
    fn test_spectrum_arithmetic() {
        let a = RGBSpectrum::new(0.5, 1.0, 2.0);
        let b = RGBSpectrum::new(0.5, 0.5, 0.25);

        let sum = a + b;
        assert!((sum[0] - 1.0).abs() < 1e-6);
        assert!((sum[1] - 1.5).abs() < 1e-6);
        assert!((sum[2] - 2.25).abs() < 1e-6);

        let product = a * b;
        assert!((product[0] - 0.25).abs() < 1e-6);
        assert!((product[1] - 0.5).abs() < 1e-6);
        assert!((product[2] - 0.5).abs() < 1e-6);

        let scaled = a * 2.0;
        assert!((scaled[2] - 4.0).abs() < 1e-6);
        assert!((a.max_component() - 2.0).abs() < 1e-6);
    }
}
