// Copyright @yucwang 2026

use crate::math::constants::Float;

const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1;

// Wang-style avalanche mix. Bijective on u32, so distinct inputs keep
// distinct outputs.
fn mix(mut x: u32) -> u32 {
    x = (x ^ 61) ^ (x >> 16);
    x = x.wrapping_add(x << 3);
    x ^= x >> 4;
    x = x.wrapping_mul(0x27d4_eb2d);
    x ^= x >> 15;
    x
}

/// Counter-seeded pseudo random stream. Every (pixel, iteration, bounce)
/// triple owns an independent stream, so a path reconstructed for the
/// same triple replays the same decisions regardless of scheduling.
#[derive(Debug, Clone)]
pub struct PathSampler {
    state: u64,
}

impl PathSampler {
    pub fn seeded(pixel_index: usize, iteration: u32, bounce: u32) -> Self {
        // Pack iteration and bounce into one key. Iterations wrap after
        // 2^22 and bounces after 512, both far beyond any practical
        // render; masking keeps the tag bit clean either way.
        let key = (1u32 << 31) | ((bounce & 0x1ff) << 22) | (iteration & 0x3f_ffff);
        let state = ((mix(key) as u64) << 32) | (mix(pixel_index as u32) as u64);
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        (self.state >> 32) as u32
    }

    /// Uniform in [0, 1). Only the top 24 bits feed the mantissa, so the
    /// result can never round up to 1.0.
    pub fn next_f32(&mut self) -> Float {
        (self.next_u32() >> 8) as Float * (1.0 / 16777216.0)
    }
}

/* Tests for PathSampler */
