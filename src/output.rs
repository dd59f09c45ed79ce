//! CLI output formatting.
//!
//! Pure string builders so the exact wording is unit-testable; `main`
//! just prints what these return.

use crate::backend::Dimensions;
use crate::upload::EncodedOutput;
use std::path::Path;

/// Human-readable byte count (B / KB / MB, one decimal).
pub fn format_bytes(len: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let len = len as f64;
    if len >= MB {
        format!("{:.1} MB", len / MB)
    } else if len >= KB {
        format!("{:.1} KB", len / KB)
    } else {
        format!("{len} B")
    }
}

/// Summary line for the `identify` command.
pub fn format_identify(path: &Path, dims: Dimensions) -> String {
    format!("{}: {}x{} px", path.display(), dims.width, dims.height)
}

/// Summary line for a written export.
pub fn format_export(output: &EncodedOutput, dest: &Path) -> String {
    format!(
        "Wrote {}x{} JPEG ({}) -> {}",
        output.width,
        output.height,
        format_bytes(output.bytes.len()),
        dest.display()
    )
}
