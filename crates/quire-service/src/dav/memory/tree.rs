//! The node tree behind [`super::MemoryStore`].

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use salvo::http::StatusCode;

/// What a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The listing at the mount prefix.
    Index,
    /// A top-level collection.
    Project,
    /// A collection inside a project.
    Folder,
    /// A managed file.
    Document,
}

impl NodeKind {
    #[must_use]
    pub const fn is_collection(self) -> bool {
        !matches!(self, Self::Document)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub title: Option<String>,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
    pub etag: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Nodes keyed by clean path (`/` for the index, no trailing slash otherwise).
#[derive(Debug, Default)]
pub struct Tree {
    pub nodes: BTreeMap<String, Node>,
    /// Lock owner by locked path.
    pub locks: HashMap<String, String>,
    revision: u64,
}

/// Returns the parent of a clean path, `None` for the root.
#[must_use]
pub fn parent_of(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/"),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

/// Returns whether `path` is `ancestor` or lies below it.
#[must_use]
pub fn is_same_or_below(path: &str, ancestor: &str) -> bool {
    if ancestor == "/" {
        return true;
    }
    path == ancestor
        || path
            .strip_prefix(ancestor)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Normalizes a clean path into a tree key.
#[must_use]
pub fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

impl Tree {
    pub fn next_etag(&mut self) -> String {
        self.revision += 1;
        format!("\"{:x}\"", self.revision)
    }

    pub fn insert(&mut self, path: &str, kind: NodeKind, title: Option<String>) -> &mut Node {
        let now = Utc::now();
        let etag = self.next_etag();
        self.nodes.entry(normalize(path)).or_insert(Node {
            kind,
            title,
            content_type: None,
            content: Vec::new(),
            etag,
            created: now,
            modified: now,
        })
    }

    /// Children of `path` in key order.
    #[must_use]
    pub fn children(&self, path: &str) -> Vec<String> {
        self.nodes
            .keys()
            .filter(|key| parent_of(key) == Some(path))
            .cloned()
            .collect()
    }

    /// The lock owner preventing changes to `path` by `owner`, if any.
    #[must_use]
    pub fn conflicting_lock(&self, path: &str, owner: &str) -> Option<&str> {
        self.locks
            .iter()
            .find(|(locked, holder)| {
                holder.as_str() != owner
                    && (is_same_or_below(path, locked) || is_same_or_below(locked, path))
            })
            .map(|(_, holder)| holder.as_str())
    }

    fn remove_subtree(&mut self, path: &str) {
        self.nodes.retain(|key, _| !is_same_or_below(key, path));
        self.locks.retain(|key, _| !is_same_or_below(key, path));
    }

    /// Copies the subtree at `src` to `dst`.
    ///
    /// Returns `201` when `dst` was created, `204` when it was replaced,
    /// `412` when it exists and `overwrite` is false, and `409` when its
    /// parent is missing or cannot hold the copied node.
    pub fn copy(&mut self, src: &str, dst: &str, overwrite: bool) -> StatusCode {
        let Some(source) = self.nodes.get(src) else {
            return StatusCode::NOT_FOUND;
        };
        if source.kind == NodeKind::Index || dst == "/" {
            return StatusCode::FORBIDDEN;
        }
        if is_same_or_below(dst, src) || is_same_or_below(src, dst) {
            return StatusCode::CONFLICT;
        }

        let Some(parent) = parent_of(dst) else {
            return StatusCode::CONFLICT;
        };
        let Some(root_kind) = self.nodes.get(parent).and_then(|p| placed_kind(p.kind, source.kind))
        else {
            return StatusCode::CONFLICT;
        };

        let replaced = self.nodes.contains_key(dst);
        if replaced {
            if !overwrite {
                return StatusCode::PRECONDITION_FAILED;
            }
            self.remove_subtree(dst);
        }

        let copies: Vec<(String, Node)> = self
            .nodes
            .range(src.to_string()..)
            .take_while(|(key, _)| key.starts_with(src))
            .filter(|(key, _)| is_same_or_below(key, src))
            .map(|(key, node)| (format!("{dst}{}", &key[src.len()..]), node.clone()))
            .collect();

        let now = Utc::now();
        for (key, mut node) in copies {
            if key == dst {
                node.kind = root_kind;
            } else if node.kind == NodeKind::Project {
                node.kind = NodeKind::Folder;
            }
            node.etag = self.next_etag();
            node.created = now;
            node.modified = now;
            self.nodes.insert(key, node);
        }

        if replaced {
            StatusCode::NO_CONTENT
        } else {
            StatusCode::CREATED
        }
    }

    /// Moves the subtree at `src` to `dst`. Statuses as for [`Self::copy`].
    pub fn r#move(&mut self, src: &str, dst: &str, overwrite: bool) -> StatusCode {
        let status = self.copy(src, dst, overwrite);
        if status.is_success() {
            self.remove_subtree(src);
        }
        status
    }
}

/// The kind a node of `kind` takes when placed below a `parent`.
fn placed_kind(parent: NodeKind, kind: NodeKind) -> Option<NodeKind> {
    match (parent, kind) {
        (NodeKind::Document, _) | (NodeKind::Index, NodeKind::Document | NodeKind::Index) => None,
        (NodeKind::Index, _) => Some(NodeKind::Project),
        (_, NodeKind::Project | NodeKind::Folder) => Some(NodeKind::Folder),
        (_, kind) => Some(kind),
    }
}
