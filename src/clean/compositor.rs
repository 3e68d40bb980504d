// Mask application: recolour to black, clear the background

use image::{Rgba, RgbaImage};

use crate::color::Rgb;
use crate::mask::BitGrid;

pub const OPAQUE_BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Paint every masked pixel opaque black. Returns the number painted.
pub fn paint_black(image: &mut RgbaImage, mask: &BitGrid) -> usize {
    let mut painted = 0;
    for (pixel, &hit) in image.pixels_mut().zip(mask.as_slice()) {
        if hit {
            *pixel = OPAQUE_BLACK;
            painted += 1;
        }
    }
    painted
}

/// Make every pixel within `sqrt(limit_sq)` of `background` fully
/// transparent. Returns the number cleared.
pub fn clear_background(image: &mut RgbaImage, background: Rgb, limit_sq: f32) -> usize {
    let mut cleared = 0;
    for pixel in image.pixels_mut() {
        let [r, g, b, _] = pixel.0;
        if (background.distance_sq(r, g, b) as f32) < limit_sq {
            *pixel = TRANSPARENT;
            cleared += 1;
        }
    }
    cleared
}
