/*!
 * Command-line interface for PackFS
 */

use std::io;
use std::sync::Arc;
use std::time::Instant;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use packfs::clipboard::copy_to_clipboard;
use packfs::config::{Args, Config};
use packfs::error::{PackFsError, ResultExt};
use packfs::report::{AggregateReport, ReportFormat, Reporter};
use packfs::tree::{mark_selected, selected_files};
use packfs::workspace::Workspace;

#[tokio::main]
async fn main() -> io::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Generate shell completions and exit when requested
    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    // Create configuration
    let config = Config::from_args(args);

    // Validate configuration
    config.validate()?;

    // Logs go to stderr; stdout is reserved for the document itself
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();

    // Create progress bar with advanced Unicode styling
    let progress = ProgressBar::new(0);
    progress.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}  Remaining: {eta_precise}  Speed: {per_sec}/s")
        .unwrap());
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    progress.set_prefix("📊 Setup");

    progress.set_message(format!(
        "📂 Scanning directory: {}",
        config.target_dir.display()
    ));

    // Add gitignore status message
    if config.respect_gitignore {
        progress.set_message("🔍 Respecting .gitignore files in the project".to_string());
    }

    // Create the workspace around the scanner and aggregator
    let workspace = Workspace::new(config.clone(), Arc::new(progress.clone()));

    // Start timing both scan and aggregation
    let start_time = Instant::now();

    // Scan the workspace into a file tree
    let tree = workspace.request_tree().await?;

    // Dump the tree as JSON and exit when only the tree was requested
    if config.tree_only {
        progress.finish_and_clear();
        let json = serde_json::to_string_pretty(tree.as_ref())?;
        println!("{}", json);
        return Ok(());
    }

    // Apply the selection patterns to a working copy of the tree
    let mut selected_tree = tree.as_ref().clone();
    let patterns = if config.select_patterns.is_empty() {
        vec!["**".to_string()]
    } else {
        config.select_patterns.clone()
    };
    mark_selected(&mut selected_tree, &patterns);
    let paths = selected_files(&selected_tree);

    // Publish the marked tree so later tree requests see the selection
    workspace.set_tree(selected_tree);

    progress.set_length(paths.len() as u64);
    progress.set_prefix("📊 Aggregating");
    progress.set_message(format!("🔎 {} files selected", paths.len()));

    // Aggregate the selected files into one document
    let document = workspace.aggregate_selected(&paths).await?;

    // Calculate total duration (scan + aggregation)
    let total_duration = start_time.elapsed();

    // Clear the progress bar before anything else lands on stdout
    progress.finish_and_clear();

    // Deliver the document
    let destination = if config.clip {
        copy_to_clipboard(&document).map_err(|e| PackFsError::Clipboard(e.to_string()))?;
        "system clipboard".to_string()
    } else if let Some(path) = &config.output_file {
        std::fs::write(path, &document)
            .with_context(|| format!("failed to write {}", path.display()))?;
        path.display().to_string()
    } else {
        println!("{}", document);
        "stdout".to_string()
    };

    // Get aggregation statistics
    let aggregate_stats = workspace.aggregate_statistics();

    // Prepare the aggregation report
    let report = AggregateReport {
        destination,
        duration: total_duration,
        files_selected: aggregate_stats.files_processed,
        text_files: aggregate_stats.text_files,
        binary_files: aggregate_stats.binary_files,
        unreadable_files: aggregate_stats.unreadable_files,
        total_lines: aggregate_stats.total_lines,
        document_bytes: document.len() as u64,
        file_details: aggregate_stats.file_details,
    };

    // The report shares stdout with the document, so skip it when the
    // document itself was printed there
    if config.clip || config.output_file.is_some() {
        let reporter = Reporter::new(ReportFormat::ConsoleTable);
        reporter.print_report(&report);
    }

    Ok(())
}
