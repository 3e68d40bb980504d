// Output naming for raw, cleaned and directory-mode pages

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const RAW_SUFFIX: &str = "_raw_png";
const CLEANED_SUFFIX: &str = "_cleaned_png";
const PROCESSED_SUFFIX: &str = "_processed";

/// `page_NNN.png`, 1-based and zero-padded to three digits.
pub fn page_file_name(page_number: u32) -> String {
    format!("page_{page_number:03}.png")
}

/// File stem of the document, or `document` when it has none.
fn document_stem(document: &Path) -> OsString {
    document
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("document"))
}

fn with_suffix(mut name: OsString, suffix: &str) -> OsString {
    name.push(suffix);
    name
}

/// `<root>/<stem>_raw_png`
pub fn raw_dir(root: &Path, document: &Path) -> PathBuf {
    root.join(with_suffix(document_stem(document), RAW_SUFFIX))
}

/// `<root>/<stem>_cleaned_png`
pub fn cleaned_dir(root: &Path, document: &Path) -> PathBuf {
    root.join(with_suffix(document_stem(document), CLEANED_SUFFIX))
}

/// `<input_dir>_processed`, a sibling of the input directory.
///
/// Trailing separators are ignored, so `pages/` maps to `pages_processed`.
pub fn processed_dir(input_dir: &Path) -> PathBuf {
    // Path::components drops trailing separators.
    let trimmed: PathBuf = input_dir.components().collect();
    match trimmed.file_name() {
        Some(name) => trimmed.with_file_name(with_suffix(name.to_os_string(), PROCESSED_SUFFIX)),
        // `.`, `..` or `/`: append to the whole path instead
        None => PathBuf::from(with_suffix(
            trimmed.into_os_string(),
            PROCESSED_SUFFIX,
        )),
    }
}
