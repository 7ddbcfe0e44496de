/*!
 * Assembly of the workspace file tree from flat path lists
 */

use std::path::{Path, PathBuf};

use glob_match::glob_match;

use crate::types::FileNode;
use crate::utils::canonical_rel_path;

/// Build the ordered file tree from enumerated file paths
///
/// Only files are expected in `paths`; intermediate directories are
/// synthesized on the way down. Per-level child order follows first
/// appearance in the input, and re-running over the same path set yields a
/// structurally identical tree.
pub fn assemble_tree(paths: &[PathBuf], root: &Path) -> Vec<FileNode> {
    let mut roots: Vec<FileNode> = Vec::new();

    for path in paths {
        let rel = path.strip_prefix(root).unwrap_or(path);
        let rel_path = canonical_rel_path(rel);
        if rel_path.is_empty() {
            continue;
        }
        insert_path(&mut roots, &rel_path);
    }

    roots
}

/// Insert one `/`-separated relative file path into the working tree
fn insert_path(roots: &mut Vec<FileNode>, rel_path: &str) {
    let segments: Vec<&str> = rel_path.split('/').collect();
    let last = segments.len() - 1;

    let mut level = roots;
    let mut prefix = String::new();

    for (depth, segment) in segments.iter().enumerate() {
        if !prefix.is_empty() {
            prefix.push('/');
        }
        prefix.push_str(segment);

        // Existing nodes are reused as-is; kind never changes after creation
        let position = match level.iter().position(|n| n.name == *segment) {
            Some(i) => i,
            None => {
                let node = if depth == last {
                    FileNode::file(*segment, prefix.clone())
                } else {
                    FileNode::directory(*segment, prefix.clone())
                };
                level.push(node);
                level.len() - 1
            }
        };

        level = &mut level[position].children;
    }
}

/// Count file nodes in a tree
pub fn file_count(nodes: &[FileNode]) -> usize {
    nodes
        .iter()
        .map(|n| if n.is_file() { 1 } else { file_count(&n.children) })
        .sum()
}

/// Mark file nodes whose path matches any of the glob patterns
///
/// `checked` is owned by the panel host; this helper sets it on the host's
/// behalf. Directories are left untouched. Returns how many files matched.
pub fn mark_selected(nodes: &mut [FileNode], patterns: &[String]) -> usize {
    let mut marked = 0;
    for node in nodes.iter_mut() {
        if node.is_file() {
            if patterns.iter().any(|p| glob_match(p, &node.path)) {
                node.checked = true;
                marked += 1;
            }
        } else {
            marked += mark_selected(&mut node.children, patterns);
        }
    }
    marked
}

/// Collect checked file paths depth-first in tree order
pub fn selected_files(nodes: &[FileNode]) -> Vec<String> {
    let mut paths = Vec::new();
    collect_selected(nodes, &mut paths);
    paths
}

fn collect_selected(nodes: &[FileNode], out: &mut Vec<String>) {
    for node in nodes {
        if node.is_file() {
            if node.checked {
                out.push(node.path.clone());
            }
        } else {
            collect_selected(&node.children, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeKind;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(|p| PathBuf::from(format!("/ws/{}", p))).collect()
    }

    fn find<'a>(nodes: &'a [FileNode], name: &str) -> &'a FileNode {
        nodes
            .iter()
            .find(|n| n.name == name)
            .unwrap_or_else(|| panic!("missing node {}", name))
    }

    #[test]
    fn test_leaf_count_matches_input() {
        let input = paths(&[
            "src/main.rs",
            "src/lib.rs",
            "src/tree/mod.rs",
            "README.md",
            "docs/guide/intro.md",
        ]);
        let tree = assemble_tree(&input, Path::new("/ws"));

        assert_eq!(file_count(&tree), input.len());
    }

    #[test]
    fn test_every_input_path_is_reachable() {
        let input = paths(&["a/b/c.txt", "a/b/d.txt", "a/e.txt", "f.txt"]);
        let tree = assemble_tree(&input, Path::new("/ws"));

        let a = find(&tree, "a");
        let b = find(&a.children, "b");
        assert_eq!(find(&b.children, "c.txt").path, "a/b/c.txt");
        assert_eq!(find(&b.children, "d.txt").path, "a/b/d.txt");
        assert_eq!(find(&a.children, "e.txt").path, "a/e.txt");
        assert_eq!(find(&tree, "f.txt").path, "f.txt");
    }

    #[test]
    fn test_directories_are_synthesized_once() {
        let input = paths(&["a/b/one.txt", "a/b/two.txt", "a/three.txt"]);
        let tree = assemble_tree(&input, Path::new("/ws"));

        // One root, one "a", one "b": shared prefixes are reused, not duplicated
        assert_eq!(tree.len(), 1);
        let a = &tree[0];
        assert_eq!(a.kind, NodeKind::Directory);
        assert_eq!(a.children.iter().filter(|n| n.name == "b").count(), 1);
        assert_eq!(a.children.len(), 2);
    }

    #[test]
    fn test_kind_set_by_segment_position() {
        let input = paths(&["dir/file.txt"]);
        let tree = assemble_tree(&input, Path::new("/ws"));

        let dir = find(&tree, "dir");
        assert_eq!(dir.kind, NodeKind::Directory);
        let file = find(&dir.children, "file.txt");
        assert_eq!(file.kind, NodeKind::File);
        assert!(file.children.is_empty());
        assert!(!file.checked);
        assert!(!file.partially_checked);
    }

    #[test]
    fn test_insertion_order_preserved() {
        // No alphabetical sorting: zebra arrives first and stays first
        let input = paths(&["zebra.txt", "alpha/z.txt", "alpha/a.txt", "beta.txt"]);
        let tree = assemble_tree(&input, Path::new("/ws"));

        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["zebra.txt", "alpha", "beta.txt"]);

        let alpha = find(&tree, "alpha");
        let child_names: Vec<&str> = alpha.children.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(child_names, vec!["z.txt", "a.txt"]);
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let input = paths(&["src/main.rs", "src/lib.rs", "Cargo.toml", "src/a/b/c.rs"]);

        let first = assemble_tree(&input, Path::new("/ws"));
        let second = assemble_tree(&input, Path::new("/ws"));

        assert_eq!(first, second);
    }

    #[test]
    fn test_root_relative_input_accepted() {
        // Paths already relative to the root pass through strip_prefix
        let input = vec![PathBuf::from("a/b.txt"), PathBuf::from("c.txt")];
        let tree = assemble_tree(&input, Path::new("/ws"));

        assert_eq!(file_count(&tree), 2);
        assert_eq!(find(&tree, "a").children[0].path, "a/b.txt");
    }

    #[test]
    fn test_mark_selected_by_glob() {
        let input = paths(&["src/main.rs", "src/lib.rs", "README.md", "docs/a.md"]);
        let mut tree = assemble_tree(&input, Path::new("/ws"));

        let marked = mark_selected(&mut tree, &["src/**".to_string()]);
        assert_eq!(marked, 2);

        let selected = selected_files(&tree);
        assert_eq!(selected, vec!["src/main.rs", "src/lib.rs"]);
    }

    #[test]
    fn test_selected_files_in_tree_order() {
        let input = paths(&["z/one.txt", "a/two.txt", "three.txt"]);
        let mut tree = assemble_tree(&input, Path::new("/ws"));

        mark_selected(&mut tree, &["**".to_string()]);
        let selected = selected_files(&tree);

        // Depth-first in insertion order, not alphabetical
        assert_eq!(selected, vec!["z/one.txt", "a/two.txt", "three.txt"]);
    }

    #[test]
    fn test_mark_selected_exact_path() {
        let input = paths(&["a/b.txt", "a/c.txt"]);
        let mut tree = assemble_tree(&input, Path::new("/ws"));

        let marked = mark_selected(&mut tree, &["a/b.txt".to_string()]);
        assert_eq!(marked, 1);
        assert_eq!(selected_files(&tree), vec!["a/b.txt"]);
    }
}
