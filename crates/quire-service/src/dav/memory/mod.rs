//! In-memory resource backend.
//!
//! Models the three resource variants the dispatcher is written against: the
//! index at the mount prefix (visible to everyone), projects below it, and
//! folders and documents inside projects. Anonymous callers can see the index
//! only; for everything else `exists` is false while `really_exists` still
//! reports presence.

mod resource;
mod tree;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use quire_core::types::Identity;

pub use resource::MemoryResource;
pub use tree::NodeKind;
use tree::{Tree, normalize};

use super::resource::{DavResource, ResourceFactory};

/// Shared handle to an in-memory tree. Cloning shares the tree.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    tree: Arc<RwLock<Tree>>,
    prefix: String,
}

impl MemoryStore {
    /// Starts a store mounted at `prefix` containing only the index.
    #[must_use]
    pub fn builder(prefix: &str) -> StoreBuilder {
        let mut tree = Tree::default();
        tree.insert("/", NodeKind::Index, None);
        StoreBuilder {
            prefix: mount_prefix(prefix),
            tree,
        }
    }

    /// A small tree for running the server without a real backend.
    #[must_use]
    pub fn demo(prefix: &str) -> Self {
        Self::builder(prefix)
            .project("handbook", "Employee Handbook")
            .folder("/handbook/policies")
            .document(
                "/handbook/policies/travel.docx",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                b"travel policy",
            )
            .document("/handbook/welcome.txt", "text/plain", b"Welcome aboard.\n")
            .project("budget", "Budget 2026")
            .document(
                "/budget/forecast.xlsx",
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                b"forecast",
            )
            .build()
    }

    /// The mount prefix, without trailing slash.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns whether a node exists at `clean_path`, ignoring visibility.
    pub async fn contains(&self, clean_path: &str) -> bool {
        self.tree.read().await.nodes.contains_key(&normalize(clean_path))
    }

    /// Returns the kind of the node at `clean_path`.
    pub async fn kind(&self, clean_path: &str) -> Option<NodeKind> {
        self.tree
            .read()
            .await
            .nodes
            .get(&normalize(clean_path))
            .map(|node| node.kind)
    }

    /// Takes a lock on `clean_path` for `owner`.
    ///
    /// ## Side Effects
    /// Replaces any existing lock on the same path.
    pub async fn lock(&self, clean_path: &str, owner: &str) {
        self.tree
            .write()
            .await
            .locks
            .insert(normalize(clean_path), owner.to_string());
    }
}

#[salvo::async_trait]
impl ResourceFactory for MemoryStore {
    async fn resolve(
        &self,
        path: &str,
        clean_path: &str,
        identity: &Identity,
    ) -> Box<dyn DavResource> {
        Box::new(MemoryResource::resolve(self.clone(), path, clean_path, identity.clone()).await)
    }
}

/// Builds a [`MemoryStore`] before it is shared.
#[derive(Debug)]
pub struct StoreBuilder {
    prefix: String,
    tree: Tree,
}

impl StoreBuilder {
    /// Adds a project directly below the index.
    #[must_use]
    pub fn project(mut self, name: &str, title: &str) -> Self {
        self.tree
            .insert(&format!("/{name}"), NodeKind::Project, Some(title.to_string()));
        self
    }

    /// Adds a folder at `clean_path`.
    #[must_use]
    pub fn folder(mut self, clean_path: &str) -> Self {
        self.tree.insert(clean_path, NodeKind::Folder, None);
        self
    }

    /// Adds a document at `clean_path`.
    #[must_use]
    pub fn document(mut self, clean_path: &str, content_type: &str, content: &[u8]) -> Self {
        let node = self.tree.insert(clean_path, NodeKind::Document, None);
        node.content_type = Some(content_type.to_string());
        node.content = content.to_vec();
        self
    }

    /// Sets the modification time of the node at `clean_path`.
    #[must_use]
    pub fn modified_at(mut self, clean_path: &str, at: DateTime<Utc>) -> Self {
        if let Some(node) = self.tree.nodes.get_mut(&normalize(clean_path)) {
            node.modified = at;
        }
        self
    }

    /// Locks `clean_path` for `owner`.
    #[must_use]
    pub fn lock(mut self, clean_path: &str, owner: &str) -> Self {
        self.tree
            .locks
            .insert(normalize(clean_path), owner.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> MemoryStore {
        MemoryStore {
            tree: Arc::new(RwLock::new(self.tree)),
            prefix: self.prefix,
        }
    }
}

fn mount_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        trimmed.to_string()
    }
}
