// Page cleaner: white line art touching the background turns black,
// then the background turns transparent.

pub mod compositor;
pub mod segmenter;

use std::path::Path;

use image::{ImageError, ImageFormat, ImageReader, RgbaImage};
use serde::Serialize;

use crate::config::CleanConfig;
use crate::error::CleanError;

/// Per-page counters, for logging and the batch report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub width: u32,
    pub height: u32,
    /// 8-connected white components on the page.
    pub components: u32,
    /// Components that touched the background and were recoloured.
    pub seeded_components: u32,
    pub recolored: usize,
    pub cleared: usize,
}

/// Clean one page. The output has the same dimensions as the input.
pub fn clean_image(image: &RgbaImage, config: &CleanConfig) -> RgbaImage {
    clean_image_with_stats(image, config).0
}

/// Clean one page and report what changed.
///
/// Steps:
/// 1. White mask: R, G, B above `white_threshold` with non-zero alpha
/// 2. Background mask: distance to the background below `seed_distance`
/// 3. Seeds: white pixels inside the 3x3 dilation of the background mask
/// 4. Every white component holding a seed is painted opaque black
/// 5. Pixels within `clear_distance` of the background, measured on the
///    recoloured image, become transparent
pub fn clean_image_with_stats(image: &RgbaImage, config: &CleanConfig) -> (RgbaImage, CleanStats) {
    let white = segmenter::white_mask(image, config.white_threshold);
    let background = segmenter::background_mask(image, config.background, config.seed_limit_sq());
    let seed = segmenter::seed_mask(&white, &background);
    let selection = segmenter::recolor_mask(&white, &seed);

    let mut output = image.clone();
    let recolored = compositor::paint_black(&mut output, &selection.mask);
    let cleared =
        compositor::clear_background(&mut output, config.background, config.clear_limit_sq());

    let stats = CleanStats {
        width: image.width(),
        height: image.height(),
        components: selection.labels.count,
        seeded_components: selection.seeded_components,
        recolored,
        cleared,
    };
    (output, stats)
}

/// Decode any supported raster format into RGBA. The format is sniffed from
/// the file contents, not the extension.
pub fn load_rgba(path: &Path) -> crate::error::Result<RgbaImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| CleanError::decode(path, e))?
        .with_guessed_format()
        .map_err(|e| CleanError::decode(path, e))?;
    let image = reader.decode().map_err(|e| CleanError::decode(path, e))?;
    Ok(image.to_rgba8())
}

/// Write `image` as PNG, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> crate::error::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CleanError::write(parent, e))?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(io) => CleanError::write(path, io),
            other => CleanError::encode(path, other),
        })
}

/// Load `input`, clean it and write the result to `output` as PNG.
pub fn clean_file(
    input: &Path,
    output: &Path,
    config: &CleanConfig,
) -> crate::error::Result<CleanStats> {
    let image = load_rgba(input)?;
    let (cleaned, stats) = clean_image_with_stats(&image, config);
    save_png(&cleaned, output)?;

    tracing::debug!(
        input = %input.display(),
        output = %output.display(),
        components = stats.components,
        seeded = stats.seeded_components,
        recolored = stats.recolored,
        cleared = stats.cleared,
        "page cleaned"
    );
    Ok(stats)
}
