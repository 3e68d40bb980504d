pub mod pdfium;

use std::path::Path;

use image::DynamicImage;

/// Turns a source document into page images.
///
/// Implementations call `on_page` once per page, page 1 first, with the
/// 1-based page number, and return the number of pages rendered. An error
/// returned by `on_page` stops rasterization and is passed through.
pub trait Rasterizer {
    fn rasterize(
        &self,
        document: &Path,
        dpi: u32,
        on_page: &mut dyn FnMut(u32, DynamicImage) -> crate::error::Result<()>,
    ) -> crate::error::Result<u32>;
}

/// Pixel size of a page of `points` (1/72 inch) at `dpi`.
pub fn points_to_pixels(points: f32, dpi: u32) -> i32 {
    (points * dpi as f32 / 72.0).round() as i32
}
