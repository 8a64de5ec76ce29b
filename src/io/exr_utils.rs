/* Copyright 2020 @TwoCookingMice */

use crate::math::constants::Float;

use exr::prelude::*;

// Write radiance estimates to an OpenEXR file, row major, linear RGB.
pub fn write_exr_to_file(image: &[(Float, Float, Float)],
                         width: usize,
                         height: usize,
                         file_path: &str) {
    debug_assert_eq!(image.len(), width * height);
    log::info!("Starting writing openexr images: {}.", file_path);

    let sample = |x: usize, y: usize| image[y * width + x];
    match write_rgb_file(file_path, width, height, sample) {
        Ok(()) => println!("EXR written to: {}.", file_path),
        Err(e) => println!("EXR written error: {}.", e.to_string())
    }
}
