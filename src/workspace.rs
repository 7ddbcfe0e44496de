/*!
 * Panel-facing workspace operations
 *
 * One `Workspace` wires the debounced scanner and the aggregator over a
 * single root. Its operations are the whole surface a panel host drives:
 * request the tree, write back an edited tree, invalidate the cache, and
 * aggregate the selected files. Everything user-facing (rendering,
 * notifications, clipboard, document creation) belongs to the host.
 */

use std::sync::Arc;

use indicatif::ProgressBar;

use crate::aggregate::{AggregateStatistics, Aggregator};
use crate::config::Config;
use crate::content::ContentReader;
use crate::error::Result;
use crate::scanner::{ScannerStatistics, TreeScanner};
use crate::types::FileNode;

/// Scan and aggregation service for one workspace root
pub struct Workspace {
    /// Debounced tree scanner
    scanner: TreeScanner,
    /// Document composer
    aggregator: Aggregator,
}

impl Workspace {
    /// Create a workspace service from configuration
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        let reader = ContentReader::new(&config.target_dir);
        Self {
            scanner: TreeScanner::new(config),
            aggregator: Aggregator::new(reader, progress),
        }
    }

    /// Current file tree, freshly scanned or served from the cache
    pub async fn request_tree(&self) -> Result<Arc<Vec<FileNode>>> {
        self.scanner.scan().await
    }

    /// Replace the cached tree with one edited by the host
    pub fn set_tree(&self, tree: Vec<FileNode>) {
        self.scanner.set_tree(tree);
    }

    /// Drop the cached tree; the next request re-scans
    pub fn invalidate(&self) {
        self.scanner.invalidate();
    }

    /// Compose the aggregated document for the selected paths
    pub async fn aggregate_selected(&self, paths: &[String]) -> Result<String> {
        self.aggregator.aggregate(paths).await
    }

    /// Scanner statistics
    pub fn scanner_statistics(&self) -> ScannerStatistics {
        self.scanner.get_statistics()
    }

    /// Aggregation statistics
    pub fn aggregate_statistics(&self) -> AggregateStatistics {
        self.aggregator.get_statistics()
    }
}
