/*!
 * Debounced workspace scanning
 *
 * Enumerates all files under the workspace root, assembles the file tree
 * and caches it. Bursts of scan requests are coalesced: every call restarts
 * the debounce window and the last one to arrive triggers the single
 * enumeration that answers all of them.
 */

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use glob_match::glob_match;
use ignore::WalkBuilder;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{PackFsError, Result};
use crate::tree::assemble_tree;
use crate::types::FileNode;
use crate::utils::DEFAULT_IGNORE;
use crate::{bail, error};

/// Scanner run statistics
#[derive(Debug, Clone, Default)]
pub struct ScannerStatistics {
    /// Number of full enumerations performed
    pub scans_performed: usize,
    /// Number of scan calls answered straight from the cache
    pub cache_hits: usize,
    /// Files found by the most recent enumeration
    pub files_enumerated: usize,
}

/// Debounce and cache state shared with timer tasks
#[derive(Default)]
struct ScanState {
    /// Last completed or externally supplied tree
    cache: Option<Arc<Vec<FileNode>>>,
    /// Callers parked while a debounce window is open
    waiters: Vec<oneshot::Sender<Result<Arc<Vec<FileNode>>>>>,
    /// Bumped on every window restart; a timer holding a stale value aborts
    generation: u64,
}

/// Debounced scanner for the workspace file tree
pub struct TreeScanner {
    /// Scanner configuration
    config: Config,
    /// Debounce and cache state
    state: Arc<Mutex<ScanState>>,
    /// Scanner statistics
    statistics: Arc<Mutex<ScannerStatistics>>,
}

impl TreeScanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(ScanState::default())),
            statistics: Arc::new(Mutex::new(ScannerStatistics::default())),
        }
    }

    /// Get scanner statistics
    pub fn get_statistics(&self) -> ScannerStatistics {
        self.statistics.lock().unwrap().clone()
    }

    /// Request the workspace tree, debouncing bursts of calls
    ///
    /// A cached tree is returned immediately. Otherwise the call joins the
    /// open debounce window (restarting it) and resolves together with every
    /// other call coalesced into that window, all observing the same tree.
    pub async fn scan(&self) -> Result<Arc<Vec<FileNode>>> {
        let receiver = {
            let mut state = self.state.lock().unwrap();

            if let Some(tree) = &state.cache {
                self.statistics.lock().unwrap().cache_hits += 1;
                return Ok(Arc::clone(tree));
            }

            state.generation += 1;
            let generation = state.generation;
            let (sender, receiver) = oneshot::channel();
            state.waiters.push(sender);
            debug!(generation, "debounce window restarted");

            self.spawn_window_timer(generation);
            receiver
        };

        match receiver.await {
            Ok(outcome) => outcome,
            Err(_) => Err(error!(Enumeration, "scan was dropped before completing")),
        }
    }

    /// Replace the cached tree with an externally supplied one
    ///
    /// Callers still parked in a debounce window resolve with the new tree
    /// and the pending enumeration is superseded. A subsequent scan returns
    /// this tree verbatim until the cache is invalidated.
    pub fn set_tree(&self, tree: Vec<FileNode>) {
        let tree = Arc::new(tree);
        let waiters = {
            let mut state = self.state.lock().unwrap();
            state.cache = Some(Arc::clone(&tree));
            state.generation += 1;
            std::mem::take(&mut state.waiters)
        };

        for waiter in waiters {
            let _ = waiter.send(Ok(Arc::clone(&tree)));
        }
    }

    /// Drop the cached tree so the next scan re-enumerates
    pub fn invalidate(&self) {
        self.state.lock().unwrap().cache = None;
    }

    /// Spawn the timer task owning the window opened by `generation`
    fn spawn_window_timer(&self, generation: u64) {
        let state = Arc::clone(&self.state);
        let statistics = Arc::clone(&self.statistics);
        let config = self.config.clone();

        tokio::spawn(async move {
            tokio::time::sleep(config.debounce).await;

            let waiters = {
                let mut state = state.lock().unwrap();
                if state.generation != generation {
                    // A later call restarted the window; its timer owns the scan
                    return;
                }
                if let Some(tree) = &state.cache {
                    // Cache was filled while this timer slept; answer from it
                    let tree = Arc::clone(tree);
                    let waiters = std::mem::take(&mut state.waiters);
                    drop(state);
                    for waiter in waiters {
                        let _ = waiter.send(Ok(Arc::clone(&tree)));
                    }
                    return;
                }
                std::mem::take(&mut state.waiters)
            };

            debug!(generation, "debounce window closed, enumerating workspace");

            match enumerate_files(&config).await {
                Ok(paths) => {
                    let tree = Arc::new(assemble_tree(&paths, &config.target_dir));
                    {
                        let mut state = state.lock().unwrap();
                        state.cache = Some(Arc::clone(&tree));
                    }
                    {
                        let mut stats = statistics.lock().unwrap();
                        stats.scans_performed += 1;
                        stats.files_enumerated = paths.len();
                    }
                    for waiter in waiters {
                        let _ = waiter.send(Ok(Arc::clone(&tree)));
                    }
                }
                Err(e) => {
                    warn!(error = %e, "workspace enumeration failed");
                    for waiter in waiters {
                        let _ = waiter.send(Err(clone_scan_error(&e)));
                    }
                }
            }
        });
    }
}

/// Enumerate all files under the workspace root on the blocking pool
async fn enumerate_files(config: &Config) -> Result<Vec<PathBuf>> {
    let root = config.target_dir.clone();
    let ignore_patterns = config.ignore_patterns.clone();
    let respect_gitignore = config.respect_gitignore;

    tokio::task::spawn_blocking(move || walk_files(&root, &ignore_patterns, respect_gitignore))
        .await
        .map_err(|e| error!(Enumeration, "enumeration task failed: {}", e))?
}

/// Walk the root and collect every file path that survives filtering
///
/// Paths come back sorted so repeated scans of an unchanged root assemble
/// identical trees.
fn walk_files(
    root: &Path,
    ignore_patterns: &[String],
    respect_gitignore: bool,
) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        bail!(Root, "workspace root is not a directory: {}", root.display());
    }

    let mut files = Vec::new();

    if respect_gitignore {
        let filter_root = root.to_path_buf();
        let filter_patterns = ignore_patterns.to_vec();
        let walker = WalkBuilder::new(root)
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || !should_ignore(
                        &filter_root,
                        entry.path(),
                        entry.file_name(),
                        &filter_patterns,
                    )
            })
            .build();

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().map_or(false, |ft| ft.is_file()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => warn!(error = %e, "skipping unreadable entry"),
            }
        }
    } else {
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !should_ignore(root, entry.path(), entry.file_name(), ignore_patterns)
        });

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => warn!(error = %e, "skipping unreadable entry"),
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Check whether an entry is excluded by user patterns or the default list
///
/// User globs match the entry name or its root-relative path; the default
/// list matches names exactly. Matching a directory prunes its subtree.
fn should_ignore(root: &Path, path: &Path, file_name: &OsStr, ignore_patterns: &[String]) -> bool {
    let file_name = file_name.to_string_lossy();

    if DEFAULT_IGNORE.iter().any(|&p| p == file_name) {
        return true;
    }

    if ignore_patterns.is_empty() {
        return false;
    }

    let rel_path = crate::utils::canonical_rel_path(path.strip_prefix(root).unwrap_or(path));
    ignore_patterns
        .iter()
        .any(|p| glob_match(p, &file_name) || glob_match(p, &rel_path))
}

/// Rebuild an enumeration error for each coalesced caller
fn clone_scan_error(err: &PackFsError) -> PackFsError {
    match err {
        PackFsError::Root(msg) => PackFsError::Root(msg.clone()),
        other => PackFsError::Enumeration(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_ignore_defaults() {
        let root = Path::new("/ws");
        assert!(should_ignore(
            root,
            Path::new("/ws/node_modules"),
            OsStr::new("node_modules"),
            &[]
        ));
        assert!(should_ignore(root, Path::new("/ws/.git"), OsStr::new(".git"), &[]));
        assert!(!should_ignore(root, Path::new("/ws/src"), OsStr::new("src"), &[]));
    }

    #[test]
    fn test_should_ignore_name_globs() {
        let root = Path::new("/ws");
        let patterns = vec!["*.log".to_string()];
        assert!(should_ignore(
            root,
            Path::new("/ws/debug.log"),
            OsStr::new("debug.log"),
            &patterns
        ));
        assert!(!should_ignore(
            root,
            Path::new("/ws/debug.rs"),
            OsStr::new("debug.rs"),
            &patterns
        ));
    }

    #[test]
    fn test_should_ignore_path_globs() {
        let root = Path::new("/ws");
        let patterns = vec!["generated/**".to_string()];
        assert!(should_ignore(
            root,
            Path::new("/ws/generated/api/v1.rs"),
            OsStr::new("v1.rs"),
            &patterns
        ));
        assert!(!should_ignore(
            root,
            Path::new("/ws/src/api/v1.rs"),
            OsStr::new("v1.rs"),
            &patterns
        ));
    }
}
