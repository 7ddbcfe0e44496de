/*!
 * Utility functions for packfs
 */

use std::path::{Component, Path};

use once_cell::sync::Lazy;

/// Convert a root-relative path into its canonical `/`-separated string form
///
/// Only normal components survive; `.` and `..` segments never appear in
/// enumerated paths and are dropped here rather than resolved.
pub fn canonical_rel_path(path: &Path) -> String {
    let mut out = String::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&part.to_string_lossy());
        }
    }
    out
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Default entry names to ignore during enumeration
pub static DEFAULT_IGNORE: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version Control
        ".git",
        ".svn",
        ".hg",
        // OS Files
        ".DS_Store",
        "Thumbs.db",
        "desktop.ini",
        // Dependencies
        "node_modules",
        "bower_components",
        ".pnpm-store",
        "vendor",
        // Build & Dist
        "dist",
        "out",
        "target",
        "__pycache__",
        ".venv",
        // IDEs & Editors
        ".idea",
        ".vscode",
        // Caches & Temp
        ".cache",
    ]
});
