// pdfium-render wrapper: document -> page images (in-memory only)

use std::path::{Path, PathBuf};

use image::DynamicImage;
use pdfium_render::prelude::*;

use super::{Rasterizer, points_to_pixels};
use crate::error::CleanError;

/// Where pdfium comes from.
enum PdfiumSource {
    Path(PathBuf),
    System,
}

/// Resolves the pdfium shared library.
///
/// Search order:
/// 1. `PDFIUM_DYNAMIC_LIB_PATH` environment variable
/// 2. `vendor/pdfium/lib/` relative to the project root (for development)
/// 3. The system library search path
fn resolve_pdfium_source() -> crate::error::Result<PdfiumSource> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(PdfiumSource::Path(p));
        }
        return Err(CleanError::render(format!(
            "PDFIUM_DYNAMIC_LIB_PATH is set to '{}' but the path does not exist",
            path
        )));
    }

    let vendor_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("vendor/pdfium/lib");
    if vendor_path.exists() {
        return Ok(PdfiumSource::Path(vendor_path));
    }

    Ok(PdfiumSource::System)
}

/// Creates a new Pdfium instance by dynamically loading the shared library.
fn create_pdfium() -> crate::error::Result<Pdfium> {
    let bindings = match resolve_pdfium_source()? {
        PdfiumSource::Path(lib_path) => {
            let lib_path_str = lib_path.to_str().ok_or_else(|| {
                CleanError::render("pdfium library path contains non-UTF-8 characters")
            })?;
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(lib_path_str))
        }
        PdfiumSource::System => Pdfium::bind_to_system_library(),
    }
    .map_err(|e| {
        CleanError::render(format!(
            "pdfium library not found ({e}): set PDFIUM_DYNAMIC_LIB_PATH or place libpdfium in vendor/pdfium/lib/"
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

/// Renders one page at `dpi`.
fn render_pdf_page(page: &PdfPage, dpi: u32) -> crate::error::Result<DynamicImage> {
    // 1 point = 1/72 inch
    let width_px = points_to_pixels(page.width().value, dpi);
    let height_px = points_to_pixels(page.height().value, dpi);

    let config = PdfRenderConfig::new()
        .set_target_width(width_px)
        .set_target_height(height_px);

    let bitmap = page.render_with_config(&config)?;
    Ok(bitmap.as_image())
}

/// Rasterizer backed by the pdfium library.
///
/// pdfium is bound on every call; documents are rendered one page at a time
/// so only a single page bitmap is alive at once.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfiumRasterizer;

impl PdfiumRasterizer {
    pub fn new() -> Self {
        PdfiumRasterizer
    }
}

impl Rasterizer for PdfiumRasterizer {
    fn rasterize(
        &self,
        document: &Path,
        dpi: u32,
        on_page: &mut dyn FnMut(u32, DynamicImage) -> crate::error::Result<()>,
    ) -> crate::error::Result<u32> {
        if dpi == 0 {
            return Err(CleanError::invalid_argument("DPI must be a positive integer"));
        }
        if !document.is_file() {
            return Err(CleanError::InputNotFound(document.to_path_buf()));
        }

        let pdfium = create_pdfium()?;
        let pdf = pdfium.load_pdf_from_file(document, None)?;

        let mut rendered = 0u32;
        for page in pdf.pages().iter() {
            let image = render_pdf_page(&page, dpi)?;
            rendered += 1;
            on_page(rendered, image)?;
        }
        Ok(rendered)
    }
}
