/*!
 * Configuration handling for packfs
 */

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::{bail, ensure};

/// Command-line arguments for packfs
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "packfs",
    version = env!("CARGO_PKG_VERSION"),
    about = "Pack selected workspace files into one fenced text document",
    long_about = "Scans a workspace into a selectable file tree and packs the selected files into a single fenced text document, designed for providing context to Large Language Models (LLMs)."
)]
pub struct Args {
    /// Workspace root directory to scan
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Comma-separated glob patterns selecting files to aggregate (all files when omitted)
    #[clap(long, short, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Comma-separated list of patterns to ignore during enumeration
    #[clap(long, value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// Write the aggregated document to this file instead of stdout
    #[clap(long, short)]
    pub output: Option<String>,

    /// Copy the aggregated document to the system clipboard
    #[clap(long, help = "Copy output to system clipboard")]
    pub clip: bool,

    /// Print the file tree as JSON instead of aggregating
    #[clap(long)]
    pub tree: bool,

    /// Debounce window for scan requests, in milliseconds
    #[clap(long, default_value = "300")]
    pub debounce_ms: u64,

    /// Do not respect .gitignore files during enumeration
    #[clap(long)]
    pub no_gitignore: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Workspace root directory
    pub target_dir: PathBuf,

    /// Glob patterns selecting files to aggregate (empty selects everything)
    pub select_patterns: Vec<String>,

    /// Patterns to ignore during enumeration
    pub ignore_patterns: Vec<String>,

    /// Output file for the aggregated document (stdout when unset)
    pub output_file: Option<PathBuf>,

    /// Copy the aggregated document to the clipboard
    pub clip: bool,

    /// Print the file tree as JSON instead of aggregating
    pub tree_only: bool,

    /// Debounce window for scan requests
    pub debounce: Duration,

    /// Whether to respect .gitignore files
    pub respect_gitignore: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        Self {
            target_dir: PathBuf::from(args.directory_path),
            select_patterns: args.select,
            ignore_patterns: args.ignore_patterns,
            output_file: args.output.map(PathBuf::from),
            clip: args.clip,
            tree_only: args.tree,
            debounce: Duration::from_millis(args.debounce_ms),
            respect_gitignore: !args.no_gitignore,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.exists() && self.target_dir.is_dir(),
            Root,
            "workspace root not found: {}",
            self.target_dir.display()
        );

        // Check if output file directory exists and is writable
        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    bail!(Config, "output directory not found: {}", parent.display());
                }
            }
        }

        Ok(())
    }
}
