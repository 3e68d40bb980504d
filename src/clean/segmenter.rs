// Pixel classification: white / background / seed masks and the recolour mask

use image::RgbaImage;

use crate::color::Rgb;
use crate::mask::BitGrid;
use crate::mask::label::{Labels, label_components};

/// Pixels whose R, G and B all exceed `threshold` and whose alpha is non-zero.
pub fn white_mask(image: &RgbaImage, threshold: u8) -> BitGrid {
    BitGrid::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        r > threshold && g > threshold && b > threshold && a > 0
    })
}

/// Pixels whose squared RGB distance to `background` is below `limit_sq`.
/// Alpha is not considered.
pub fn background_mask(image: &RgbaImage, background: Rgb, limit_sq: f32) -> BitGrid {
    BitGrid::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.get_pixel(x, y).0;
        (background.distance_sq(r, g, b) as f32) < limit_sq
    })
}

/// White pixels that touch the background, including diagonally.
pub fn seed_mask(white: &BitGrid, background: &BitGrid) -> BitGrid {
    white.and(&background.dilate3x3())
}

/// Outcome of selecting whole white components that contain a seed.
pub struct RecolorSelection {
    pub mask: BitGrid,
    pub labels: Labels,
    pub seeded_components: u32,
}

/// Union of every 8-connected white component holding at least one seed.
///
/// Components are taken whole: a component is either entirely in the mask
/// or entirely outside it.
pub fn recolor_mask(white: &BitGrid, seed: &BitGrid) -> RecolorSelection {
    let labels = label_components(white);

    let mut seeded = vec![false; labels.count as usize + 1];
    for (&id, &is_seed) in labels.ids.iter().zip(seed.as_slice()) {
        if is_seed && id != 0 {
            seeded[id as usize] = true;
        }
    }

    let width = labels.width as usize;
    let mask = BitGrid::from_fn(labels.width, labels.height, |x, y| {
        let id = labels.ids[y as usize * width + x as usize];
        id != 0 && seeded[id as usize]
    });

    let seeded_components = seeded.iter().filter(|&&s| s).count() as u32;

    RecolorSelection {
        mask,
        labels,
        seeded_components,
    }
}
