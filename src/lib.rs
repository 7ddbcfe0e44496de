/*!
 * PackFS - Pack a workspace file tree into a single text document for LLM context
 *
 * This library scans a directory into a selectable file tree, keeps that tree
 * cached behind a debounced scanner, and aggregates the selected files into
 * one fenced text document suitable as context for Large Language Models.
 */

pub mod aggregate;
pub mod clipboard;
pub mod config;
pub mod content;
pub mod error;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod workspace;


// Re-export main components for easier access
pub use aggregate::{AggregateStatistics, Aggregator};
pub use config::Config;
pub use content::{is_binary_content, ContentReader, DETECT_SAMPLE_LEN};
pub use error::{PackFsError, Result};
pub use report::{AggregateReport, FileReportInfo, ReportFormat, Reporter};
pub use scanner::{ScannerStatistics, TreeScanner};
pub use tree::{assemble_tree, file_count, mark_selected, selected_files};
pub use types::{ContentKind, FileContent, FileNode, NodeKind};
pub use utils::format_file_size;
pub use workspace::Workspace;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
