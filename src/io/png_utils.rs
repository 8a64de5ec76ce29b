/* Copyright 2020 @TwoCookingMice */

use crate::math::constants::Float;

use image::{ImageBuffer, Rgb};

// Radiance to display byte: clamp, gamma encode, quantize.
fn to_display_byte(value: Float) -> u8 {
    let clamped = value.max(0.0).min(1.0);
    (clamped.powf(1.0 / 2.2) * 255.0 + 0.5) as u8
}

// Write PNG Image to file
pub fn write_png_to_file(image: &[(Float, Float, Float)],
                        width: u32,
                        height: u32,
                        file_path: &str) {
    log::info!("Starting writing png images: {}.", file_path);

    let buffer = ImageBuffer::from_fn(width, height, |x, y| {
        let (r, g, b) = image[(y * width + x) as usize];
        Rgb([to_display_byte(r), to_display_byte(g), to_display_byte(b)])
    });
    match buffer.save(file_path) {
        Ok(()) => println!("PNG written to: {}.", file_path),
        Err(e) => println!("PNG written error: {}.", e.to_string())
    }
}

/* Tests for png utils */

#[cfg(test)]
mod tests {
    use super::to_display_byte;

    #[test]
    fn test_display_byte_clamps_and_encodes() {
        assert_eq!(to_display_byte(-1.0), 0);
        assert_eq!(to_display_byte(0.0), 0);
        assert_eq!(to_display_byte(1.0), 255);
        assert_eq!(to_display_byte(42.0), 255);

        // Mid grey lands well above the linear value after encoding.
        let mid = to_display_byte(0.5);
        assert!(mid > 128 && mid < 200, "mid grey was {}", mid);
    }
}
