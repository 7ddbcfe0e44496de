/*!
 * Reporting functionality for packfs
 *
 * Provides functionality for generating formatted reports of aggregation
 * results using the tabled library for clean, consistent table rendering.
 */

use std::collections::HashMap;
use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::ContentKind;
use crate::utils::format_file_size;

/// Information about a file in the report
#[derive(Debug, Clone)]
pub struct FileReportInfo {
    /// How the file entered the document
    pub kind: ContentKind,
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
}

/// Summary of one aggregation run
#[derive(Debug, Clone)]
pub struct AggregateReport {
    /// Where the document went (file path, "clipboard" or "stdout")
    pub destination: String,
    /// Time taken to scan and aggregate
    pub duration: Duration,
    /// Number of files selected
    pub files_selected: usize,
    /// Files included as text
    pub text_files: usize,
    /// Files replaced by the binary placeholder
    pub binary_files: usize,
    /// Files replaced by the read-error placeholder
    pub unreadable_files: usize,
    /// Total number of lines across text files
    pub total_lines: usize,
    /// Size of the composed document in bytes
    pub document_bytes: u64,
    /// Details for each file
    pub file_details: HashMap<String, FileReportInfo>,
}

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    // Other formats could be added in the future
    // JSON, HTML, etc.
}

/// Report generator for aggregation results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string based on aggregation statistics
    pub fn generate_report(&self, report: &AggregateReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
            // Additional formats could be added here
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &AggregateReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Format a path for display, truncating long ones from the left
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.len() <= max_len {
            return path.to_string();
        }

        // Keep as many trailing segments as fit
        let mut segments = Vec::new();
        let mut current_len = 3; // Start with "..."
        for part in path.split('/').rev() {
            let part_len = part.len() + 1; // +1 for '/'
            if current_len + part_len > max_len {
                break;
            }
            segments.push(part);
            current_len += part_len;
        }

        if segments.is_empty() {
            let keep = max_len.saturating_sub(3);
            let tail: String = path
                .chars()
                .skip(path.chars().count().saturating_sub(keep))
                .collect();
            return format!("...{}", tail);
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &AggregateReport) -> String {
        // Define the summary table data structure
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let mut rows = Vec::new();

        rows.push(SummaryRow {
            key: "📂 Destination".to_string(),
            value: report.destination.clone(),
        });

        rows.push(SummaryRow {
            key: "⏱️ Process Time".to_string(),
            value: format!("{:.4?}", report.duration),
        });

        rows.push(SummaryRow {
            key: "📄 Files Selected".to_string(),
            value: self.format_number(report.files_selected),
        });

        rows.push(SummaryRow {
            key: "📝 Total Lines".to_string(),
            value: self.format_number(report.total_lines),
        });

        rows.push(SummaryRow {
            key: "📦 Document Size".to_string(),
            value: format_file_size(report.document_bytes),
        });

        if report.binary_files > 0 || report.unreadable_files > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Placeholders".to_string(),
                value: format!(
                    "{} binary / {} unreadable",
                    report.binary_files, report.unreadable_files
                ),
            });
        }

        // Create and style the table
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create a files table using the tabled crate
    fn create_files_table(&self, report: &AggregateReport) -> String {
        // Define the files table data structure
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Kind")]
            kind: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Chars")]
            chars: String,
        }

        // Sort files by character count
        let mut files: Vec<_> = report.file_details.iter().collect();
        files.sort_by(|(_, a), (_, b)| b.chars.cmp(&a.chars));

        // Determine if we show all files or just top 10
        let files_to_show = if report.file_details.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        // Generate rows for the table
        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                kind: kind_label(info.kind).to_string(),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
            })
            .collect();

        // Create and style the table
        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &AggregateReport) -> String {
        // Generate summary and files tables
        let summary_table = self.create_summary_table(report);
        let files_table = self.create_files_table(report);

        // Create proper section titles
        let summary_title = "✅  AGGREGATION COMPLETE";
        let files_title = if report.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT  📋"
        } else {
            "📋  AGGREGATED FILES"
        };

        // Combine them with appropriate spacing and titles, files first
        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }
}

/// Short display label for a content kind
fn kind_label(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Text => "text",
        ContentKind::Binary => "binary",
        ContentKind::Unreadable => "error",
    }
}
