// Jobs: a directory of PNGs, or a document rasterized then cleaned

use std::path::{Path, PathBuf};

use crate::clean::save_png;
use crate::config::CleanConfig;
use crate::error::CleanError;
use crate::pipeline::layout;
use crate::pipeline::orchestrator::{BatchOptions, BatchReport, run_batch};
use crate::pipeline::page_processor::PageTask;
use crate::render::Rasterizer;

/// Every file directly inside `dir` whose name ends in `.png`
/// (case-insensitive), sorted by file name. Symlinks are followed.
pub fn collect_pngs(dir: &Path) -> crate::error::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CleanError::InputNotFound(dir.to_path_buf()));
    }

    let mut pngs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        // `.png` alone has no extension per Path::extension, so match the name.
        let is_png = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.to_ascii_lowercase().ends_with(".png"));
        if is_png && path.is_file() {
            pngs.push(path);
        }
    }

    pngs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pngs)
}

/// Render every page of `document` into `out_dir/page_NNN.png`.
///
/// Returns the written paths in page order. Any render or write failure
/// aborts the document.
pub fn rasterize_to_pngs(
    rasterizer: &dyn Rasterizer,
    document: &Path,
    dpi: u32,
    out_dir: &Path,
) -> crate::error::Result<Vec<PathBuf>> {
    if dpi == 0 {
        return Err(CleanError::invalid_argument("DPI must be a positive integer"));
    }
    if !document.is_file() {
        return Err(CleanError::InputNotFound(document.to_path_buf()));
    }

    std::fs::create_dir_all(out_dir).map_err(|e| CleanError::write(out_dir, e))?;
    tracing::info!(
        document = %document.display(),
        dpi,
        out_dir = %out_dir.display(),
        "rasterizing"
    );

    let mut paths = Vec::new();
    let page_count = rasterizer.rasterize(document, dpi, &mut |page_number, image| {
        let path = out_dir.join(layout::page_file_name(page_number));
        save_png(&image.to_rgba8(), &path)?;
        tracing::debug!(page = page_number, path = %path.display(), "raw page saved");
        paths.push(path);
        Ok(())
    })?;

    tracing::info!(pages = page_count, "rasterized");
    Ok(paths)
}

/// Outcome of cleaning a directory.
pub struct DirectoryResult {
    pub output_dir: PathBuf,
    pub report: BatchReport,
}

/// Clean every PNG in `input_dir` into `<input_dir>_processed/`.
pub fn clean_directory(
    input_dir: &Path,
    config: &CleanConfig,
    options: &BatchOptions,
) -> crate::error::Result<DirectoryResult> {
    let inputs = collect_pngs(input_dir)?;
    let output_dir = layout::processed_dir(input_dir);
    std::fs::create_dir_all(&output_dir).map_err(|e| CleanError::write(&output_dir, e))?;

    let tasks: Vec<PageTask> = inputs
        .into_iter()
        .filter_map(|input| {
            let name = input.file_name()?.to_os_string();
            Some(PageTask::new(input, output_dir.join(name)))
        })
        .collect();

    tracing::info!(
        input_dir = %input_dir.display(),
        pages = tasks.len(),
        background = %config.background,
        "cleaning directory"
    );

    let report = run_batch(&tasks, config, options)?;
    Ok(DirectoryResult { output_dir, report })
}

/// Outcome of rasterizing and cleaning a document.
pub struct DocumentResult {
    pub raw_dir: PathBuf,
    pub cleaned_dir: PathBuf,
    pub raw_pages: Vec<PathBuf>,
    pub report: BatchReport,
}

/// Rasterize `document` into `<root>/<stem>_raw_png/` and clean the pages
/// into `<root>/<stem>_cleaned_png/`.
pub fn clean_document(
    rasterizer: &dyn Rasterizer,
    document: &Path,
    root: &Path,
    dpi: u32,
    config: &CleanConfig,
    options: &BatchOptions,
) -> crate::error::Result<DocumentResult> {
    let raw_dir = layout::raw_dir(root, document);
    let cleaned_dir = layout::cleaned_dir(root, document);

    let raw_pages = rasterize_to_pngs(rasterizer, document, dpi, &raw_dir)?;
    std::fs::create_dir_all(&cleaned_dir).map_err(|e| CleanError::write(&cleaned_dir, e))?;

    let tasks: Vec<PageTask> = raw_pages
        .iter()
        .filter_map(|raw| {
            let name = raw.file_name()?;
            Some(PageTask::new(raw, cleaned_dir.join(name)))
        })
        .collect();

    let report = run_batch(&tasks, config, options)?;
    Ok(DocumentResult {
        raw_dir,
        cleaned_dir,
        raw_pages,
        report,
    })
}
