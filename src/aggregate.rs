/*!
 * Composition of the aggregated document from selected files
 */

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use indicatif::ProgressBar;

use crate::content::ContentReader;
use crate::ensure;
use crate::error::Result;
use crate::report::FileReportInfo;
use crate::types::{ContentKind, FileContent};

/// Fence delimiter wrapped around every block
const FENCE: &str = "```";

/// Aggregation statistics
#[derive(Debug, Clone, Default)]
pub struct AggregateStatistics {
    /// Number of files read
    pub files_processed: usize,
    /// Files included as text
    pub text_files: usize,
    /// Files replaced by the binary placeholder
    pub binary_files: usize,
    /// Files replaced by the read-error placeholder
    pub unreadable_files: usize,
    /// Total number of lines across text files
    pub total_lines: usize,
    /// Total number of characters across all bodies
    pub total_chars: usize,
    /// Details for each file
    pub file_details: HashMap<String, FileReportInfo>,
}

/// Composes one document from an ordered file selection
pub struct Aggregator {
    /// Content reader bound to the workspace root
    reader: ContentReader,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
    /// Aggregation statistics
    statistics: Arc<Mutex<AggregateStatistics>>,
}

impl Aggregator {
    /// Create a new aggregator
    pub fn new(reader: ContentReader, progress: Arc<ProgressBar>) -> Self {
        Self {
            reader,
            progress,
            statistics: Arc::new(Mutex::new(AggregateStatistics::default())),
        }
    }

    /// Get aggregation statistics
    pub fn get_statistics(&self) -> AggregateStatistics {
        self.statistics.lock().unwrap().clone()
    }

    /// Compose the document for the given selection
    ///
    /// The selection must be non-empty. Files are read one at a time in
    /// input order and reads fail soft, so the document always contains one
    /// block per requested path, joined by blank lines.
    pub async fn aggregate(&self, paths: &[String]) -> Result<String> {
        ensure!(
            !paths.is_empty(),
            Selection,
            "no files selected for aggregation"
        );

        let mut blocks = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path.rsplit('/').next().unwrap_or(path);
            self.progress.set_message(format!("Reading {}", name));

            let file = self.reader.read(path).await;
            self.progress.inc(1);
            self.record(&file);
            blocks.push(render_block(&file));
        }

        Ok(blocks.join("\n\n"))
    }

    /// Update statistics for one read
    fn record(&self, file: &FileContent) {
        let lines = match file.kind {
            ContentKind::Text => file.content.lines().count(),
            _ => 0,
        };
        let chars = file.content.chars().count();

        let mut stats = self.statistics.lock().unwrap();
        stats.files_processed += 1;
        match file.kind {
            ContentKind::Text => stats.text_files += 1,
            ContentKind::Binary => stats.binary_files += 1,
            ContentKind::Unreadable => stats.unreadable_files += 1,
        }
        stats.total_lines += lines;
        stats.total_chars += chars;
        stats.file_details.insert(
            file.path.clone(),
            FileReportInfo {
                kind: file.kind,
                lines,
                chars,
            },
        );
    }
}

/// Wrap one file body in the fence delimiter
///
/// Text bodies get a label line and a closing newline; placeholder bodies
/// already carry their path line and newline.
fn render_block(file: &FileContent) -> String {
    let payload = if file.is_binary() {
        file.content.clone()
    } else {
        format!("{}\n{}\n", file.path, file.content)
    };
    format!("{}\n{}{}", FENCE, payload, FENCE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_text_block() {
        let file = FileContent {
            path: "a.txt".to_string(),
            content: "hello".to_string(),
            kind: ContentKind::Text,
        };
        assert_eq!(render_block(&file), "```\na.txt\nhello\n```");
    }

    #[test]
    fn test_render_binary_block() {
        let file = FileContent {
            path: "logo.png".to_string(),
            content: "logo.png\nBinary file.\n".to_string(),
            kind: ContentKind::Binary,
        };
        assert_eq!(render_block(&file), "```\nlogo.png\nBinary file.\n```");
    }

    #[test]
    fn test_render_error_block() {
        let file = FileContent {
            path: "gone.txt".to_string(),
            content: "gone.txt\nError reading file.\n".to_string(),
            kind: ContentKind::Unreadable,
        };
        assert_eq!(render_block(&file), "```\ngone.txt\nError reading file.\n```");
    }

    #[test]
    fn test_render_multiline_text_block() {
        let file = FileContent {
            path: "src/x.rs".to_string(),
            content: "fn main() {}\n".to_string(),
            kind: ContentKind::Text,
        };
        // The label line comes first, the body keeps its own newlines
        assert_eq!(render_block(&file), "```\nsrc/x.rs\nfn main() {}\n\n```");
    }
}
