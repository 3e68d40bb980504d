// Page cleaner tests: classification, whole-component recolouring, background removal

use image::{Rgba, RgbaImage};

use print_friendly::clean::segmenter::white_mask;
use print_friendly::clean::{clean_image, clean_image_with_stats};
use print_friendly::color::Rgb;
use print_friendly::config::CleanConfig;
use print_friendly::mask::label::label_components;

// ============================================================
// Helpers
// ============================================================

const BG: Rgba<u8> = Rgba([137, 144, 147, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const RED: Rgba<u8> = Rgba([200, 40, 40, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn config() -> CleanConfig {
    CleanConfig::new(Rgb::new(137, 144, 147))
}

fn filled(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Fill the half-open rectangle `[x0, x1) x [y0, y1)`.
fn fill_rect(img: &mut RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgba<u8>) {
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

fn in_rect(x: u32, y: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> bool {
    (x0..x1).contains(&x) && (y0..y1).contains(&y)
}

// ============================================================
// 1. Reference scenario
// ============================================================

/// 10x10 page: 6x6 background square, 2x2 white square sharing an edge
/// with it, everything else red.
#[test]
fn test_white_square_touching_background_turns_black() {
    let mut img = filled(10, 10, RED);
    fill_rect(&mut img, 0, 0, 6, 6, BG);
    fill_rect(&mut img, 6, 2, 8, 4, WHITE);

    let out = clean_image(&img, &config());

    assert_eq!(out.dimensions(), (10, 10));
    for (x, y, px) in out.enumerate_pixels() {
        if in_rect(x, y, 6, 2, 8, 4) {
            assert_eq!(*px, BLACK, "white square pixel ({x}, {y}) should be black");
        } else if in_rect(x, y, 0, 0, 6, 6) {
            assert_eq!(*px, CLEAR, "background pixel ({x}, {y}) should be clear");
        } else {
            assert_eq!(*px, RED, "other pixel ({x}, {y}) should be unchanged");
        }
    }
}

// ============================================================
// 2. Whole-page properties
// ============================================================

#[test]
fn test_no_background_is_noop() {
    let mut img = filled(16, 12, RED);
    fill_rect(&mut img, 2, 2, 6, 6, WHITE);
    fill_rect(&mut img, 9, 3, 14, 10, Rgba([240, 250, 235, 255]));
    fill_rect(&mut img, 0, 11, 16, 12, Rgba([20, 200, 90, 255]));

    let (out, stats) = clean_image_with_stats(&img, &config());

    assert_eq!(out, img, "page without background must not change");
    assert!(out.pixels().all(|p| p[3] == 255), "alpha must stay opaque");
    assert_eq!(stats.recolored, 0);
    assert_eq!(stats.cleared, 0);
    assert_eq!(stats.seeded_components, 0);
    assert_eq!(stats.components, 2);
}

#[test]
fn test_full_background_becomes_transparent() {
    let img = filled(7, 5, BG);
    let out = clean_image(&img, &config());
    assert!(out.pixels().all(|p| *p == CLEAR));
}

#[test]
fn test_cleaning_twice_equals_cleaning_once() {
    let mut img = filled(12, 12, BG);
    fill_rect(&mut img, 2, 2, 5, 5, WHITE);
    fill_rect(&mut img, 7, 7, 11, 11, RED);
    img.put_pixel(9, 9, WHITE);
    // anti-aliased edge next to the glyph
    img.put_pixel(5, 2, Rgba([145, 150, 152, 255]));

    let once = clean_image(&img, &config());
    let twice = clean_image(&once, &config());

    assert_eq!(once, twice);
    assert_eq!(*once.get_pixel(3, 3), BLACK);
    assert_eq!(*once.get_pixel(9, 9), WHITE, "enclosed white stays white");
    assert_eq!(*once.get_pixel(5, 2), CLEAR, "halo pixel is cleared");
}

/// Deterministic pseudo-random page mixing white, background and red.
fn noisy_page(width: u32, height: u32, seed: u64) -> RgbaImage {
    let mut state = seed;
    RgbaImage::from_fn(width, height, |_, _| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        match (state >> 33) % 5 {
            0 | 1 => WHITE,
            2 => Rgba([235, 240, 250, 255]),
            3 => BG,
            _ => RED,
        }
    })
}

#[test]
fn test_components_are_recolored_whole_or_not_at_all() {
    for seed in [1u64, 7, 42, 1234] {
        let img = noisy_page(40, 30, seed);
        let out = clean_image(&img, &config());

        let labels = label_components(&white_mask(&img, 230));
        let mut black = vec![0usize; labels.count as usize + 1];
        for (x, y, px) in out.enumerate_pixels() {
            let id = labels.get(x, y);
            if id != 0 && *px == BLACK {
                black[id as usize] += 1;
            }
        }

        let sizes = labels.sizes();
        for id in 1..=labels.count as usize {
            assert!(
                black[id] == 0 || black[id] == sizes[id],
                "seed {seed}: component {id} partially recolored ({} of {})",
                black[id],
                sizes[id]
            );
        }
    }
}

// ============================================================
// 3. Seeding rules
// ============================================================

#[test]
fn test_diagonal_contact_seeds_component() {
    let mut img = filled(6, 6, RED);
    img.put_pixel(1, 1, BG);
    fill_rect(&mut img, 2, 2, 4, 4, WHITE);

    let out = clean_image(&img, &config());

    assert_eq!(*out.get_pixel(2, 2), BLACK);
    assert_eq!(*out.get_pixel(3, 3), BLACK);
    assert_eq!(*out.get_pixel(1, 1), CLEAR);
}

#[test]
fn test_far_end_of_touching_shape_is_recolored() {
    // A long white stroke whose only contact with the background is its tip.
    let mut img = filled(20, 5, RED);
    img.put_pixel(0, 2, BG);
    fill_rect(&mut img, 1, 2, 20, 3, WHITE);
    fill_rect(&mut img, 19, 0, 20, 5, WHITE);

    let (out, stats) = clean_image_with_stats(&img, &config());

    assert_eq!(*out.get_pixel(19, 0), BLACK);
    assert_eq!(*out.get_pixel(19, 4), BLACK);
    assert_eq!(stats.recolored, 19 + 4);
    assert_eq!(stats.seeded_components, 1);
}

#[test]
fn test_white_enclosed_by_other_colour_is_kept() {
    let mut img = filled(9, 9, BG);
    fill_rect(&mut img, 2, 2, 7, 7, RED);
    img.put_pixel(4, 4, WHITE);

    let out = clean_image(&img, &config());

    assert_eq!(*out.get_pixel(4, 4), WHITE);
    assert_eq!(*out.get_pixel(2, 2), RED);
    assert_eq!(*out.get_pixel(0, 0), CLEAR);
}

#[test]
fn test_halo_does_not_seed() {
    // Near-background shade (distance ~8.7): cleared at the end but not a seed.
    let halo = Rgba([142, 149, 152, 255]);
    let mut img = filled(8, 3, RED);
    fill_rect(&mut img, 0, 0, 3, 3, halo);
    fill_rect(&mut img, 3, 0, 5, 3, WHITE);

    let out = clean_image(&img, &config());

    assert_eq!(*out.get_pixel(3, 1), WHITE, "white next to halo stays white");
    assert_eq!(*out.get_pixel(1, 1), CLEAR, "halo is cleared");
}

#[test]
fn test_transparent_white_is_not_white() {
    let mut img = filled(4, 1, BG);
    img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));
    img.put_pixel(2, 0, Rgba([255, 255, 255, 0]));

    let out = clean_image(&img, &config());

    assert_eq!(*out.get_pixel(1, 0), Rgba([255, 255, 255, 0]));
    assert_eq!(*out.get_pixel(0, 0), CLEAR);
}

#[test]
fn test_white_threshold_is_strict() {
    let edge = Rgba([230, 255, 255, 255]);
    let mut img = filled(3, 1, BG);
    img.put_pixel(1, 0, edge);

    let out = clean_image(&img, &config());
    assert_eq!(*out.get_pixel(1, 0), edge, "230 is not above the threshold");

    let lowered = CleanConfig {
        white_threshold: 200,
        ..config()
    };
    let out = clean_image(&img, &lowered);
    assert_eq!(*out.get_pixel(1, 0), BLACK);
}

#[test]
fn test_seed_distance_is_strict() {
    // distance exactly 2 is not background at the seeding stage
    let near = Rgba([139, 144, 147, 255]);
    let mut img = filled(3, 1, RED);
    img.put_pixel(0, 0, near);
    img.put_pixel(1, 0, WHITE);

    let out = clean_image(&img, &config());

    assert_eq!(*out.get_pixel(1, 0), WHITE);
    assert_eq!(*out.get_pixel(0, 0), CLEAR);
}

#[test]
fn test_white_background_colour_blackens_white() {
    // Inherited behaviour: a white background seeds every white pixel.
    let img = filled(3, 3, WHITE);
    let cfg = CleanConfig::new(Rgb::new(255, 255, 255));

    let out = clean_image(&img, &cfg);

    assert!(out.pixels().all(|p| *p == BLACK));
}

#[test]
fn test_empty_image() {
    let img = RgbaImage::new(0, 0);
    let out = clean_image(&img, &config());
    assert_eq!(out.dimensions(), (0, 0));
}
