/*!
 * Core types and data structures for the packfs tree model
 */

use serde::{Deserialize, Serialize};

/// Kind of a tree node, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Regular file
    File,
    /// Directory containing other entries
    Directory,
}

/// A node in the workspace file tree
///
/// Serializes to the camelCase JSON shape consumed by the panel host:
/// `type` is `"file"` or `"directory"`, `children` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileNode {
    /// Last path segment
    pub name: String,
    /// Full path relative to the workspace root, `/`-separated
    pub path: String,
    /// Node kind
    #[serde(rename = "type")]
    pub kind: NodeKind,
    /// Selection flag; initialized false, mutated only by the host
    #[serde(default)]
    pub checked: bool,
    /// Selection hint for directories; initialized false, never computed here
    #[serde(default)]
    pub partially_checked: bool,
    /// Ordered children; always empty for files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

impl FileNode {
    /// Create a file node with default selection state
    pub fn file(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::File,
            checked: false,
            partially_checked: false,
            children: Vec::new(),
        }
    }

    /// Create an empty directory node with default selection state
    pub fn directory(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: NodeKind::Directory,
            checked: false,
            partially_checked: false,
            children: Vec::new(),
        }
    }

    /// True when the node represents a file
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// True when the node represents a directory
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// Classification of one file body produced by the content reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// UTF-8 text, included verbatim
    Text,
    /// Binary content, replaced by a placeholder line
    Binary,
    /// Content that could not be read or decoded, replaced by a placeholder
    Unreadable,
}

/// Content of one file as prepared for aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    /// Path the content was requested under, relative to the workspace root
    pub path: String,
    /// Text body, or the placeholder for binary/unreadable files
    pub content: String,
    /// What the body holds
    pub kind: ContentKind,
}

impl FileContent {
    /// True when the body is a placeholder rather than file text
    pub fn is_binary(&self) -> bool {
        self.kind != ContentKind::Text
    }
}
