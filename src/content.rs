/*!
 * Binary detection and per-file content loading
 */

use std::path::{Component, Path, PathBuf};

use tracing::warn;

use crate::types::{ContentKind, FileContent};

/// Sample window for the control-character heuristic
pub const DETECT_SAMPLE_LEN: usize = 1024;

/// Decide whether raw file bytes are binary
///
/// A NUL byte anywhere in the buffer marks it binary. Otherwise the first
/// `min(1024, len)` bytes are sampled and the buffer is binary when more
/// than 30% of the sample are control characters other than tab, LF and
/// CR. An empty buffer is text.
pub fn is_binary_content(bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return false;
    }
    if bytes.contains(&0x00) {
        return true;
    }

    let sample = &bytes[..bytes.len().min(DETECT_SAMPLE_LEN)];
    let suspicious = sample
        .iter()
        .filter(|&&b| b < 0x20 && !matches!(b, 0x09 | 0x0A | 0x0D))
        .count();

    // Integer form of "count exceeds 30% of the sample size"
    suspicious * 10 > sample.len() * 3
}

/// Loads one file at a time under a fixed workspace root
///
/// Reads never fail to the caller: binary and unreadable files come back as
/// placeholder bodies so one bad file cannot abort an aggregation.
#[derive(Debug, Clone)]
pub struct ContentReader {
    root: PathBuf,
}

impl ContentReader {
    /// Create a reader resolving relative paths against `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load one file and classify its content
    pub async fn read(&self, relative_path: &str) -> FileContent {
        let abs_path = match self.resolve(relative_path) {
            Some(path) => path,
            None => {
                warn!(path = %relative_path, "read refused: path leaves the workspace root");
                return error_placeholder(relative_path);
            }
        };

        let bytes = match tokio::fs::read(&abs_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(path = %relative_path, error = %e, "failed to read file");
                return error_placeholder(relative_path);
            }
        };

        if is_binary_content(&bytes) {
            return binary_placeholder(relative_path);
        }

        match String::from_utf8(bytes) {
            Ok(text) => FileContent {
                path: relative_path.to_string(),
                content: text,
                kind: ContentKind::Text,
            },
            Err(e) => {
                warn!(path = %relative_path, error = %e, "file is not valid UTF-8");
                error_placeholder(relative_path)
            }
        }
    }

    /// Resolve a relative path, refusing absolute paths and `..` escapes
    fn resolve(&self, relative_path: &str) -> Option<PathBuf> {
        let rel = Path::new(relative_path);
        let escapes = rel
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if relative_path.is_empty() || escapes {
            return None;
        }
        Some(self.root.join(rel))
    }
}

fn binary_placeholder(path: &str) -> FileContent {
    FileContent {
        path: path.to_string(),
        content: format!("{}\nBinary file.\n", path),
        kind: ContentKind::Binary,
    }
}

fn error_placeholder(path: &str) -> FileContent {
    FileContent {
        path: path.to_string(),
        content: format!("{}\nError reading file.\n", path),
        kind: ContentKind::Unreadable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nul_byte_is_always_binary() {
        assert!(is_binary_content(&[0x00]));
        assert!(is_binary_content(b"perfectly printable\x00text"));

        // NUL past the sample window still counts
        let mut buf = vec![b'a'; 4096];
        buf.push(0x00);
        assert!(is_binary_content(&buf));
    }

    #[test]
    fn test_printable_ascii_is_text() {
        assert!(!is_binary_content(b"hello world"));
        assert!(!is_binary_content(b"line one\nline two\r\n\tindented"));

        let long = "x".repeat(10_000);
        assert!(!is_binary_content(long.as_bytes()));
    }

    #[test]
    fn test_empty_buffer_is_text() {
        assert!(!is_binary_content(&[]));
    }

    #[test]
    fn test_control_character_ratio() {
        // 4 of 10 bytes are suspicious control characters: over the 30% bar
        let mostly_control = [0x01, 0x02, 0x03, 0x04, b'a', b'b', b'c', b'd', b'e', b'f'];
        assert!(is_binary_content(&mostly_control));

        // 3 of 10 is exactly 30%, which does not exceed the bar
        let borderline = [0x01, 0x02, 0x03, b'a', b'b', b'c', b'd', b'e', b'f', b'g'];
        assert!(!is_binary_content(&borderline));
    }

    #[test]
    fn test_sample_window_bounds_detection() {
        // Control characters only after the first 1024 bytes are not sampled
        let mut buf = vec![b'a'; DETECT_SAMPLE_LEN];
        buf.extend(std::iter::repeat(0x01).take(2048));
        assert!(!is_binary_content(&buf));
    }

    #[test]
    fn test_resolve_refuses_escaping_paths() {
        let reader = ContentReader::new("/tmp/root");
        assert!(reader.resolve("src/lib.rs").is_some());
        assert!(reader.resolve("./src/lib.rs").is_some());
        assert!(reader.resolve("../outside.txt").is_none());
        assert!(reader.resolve("/etc/passwd").is_none());
        assert!(reader.resolve("a/../../b").is_none());
        assert!(reader.resolve("").is_none());
    }
}
