//! [`DavResource`] over the in-memory tree.

use chrono::{DateTime, Utc};
use salvo::http::StatusCode;

use quire_core::types::Identity;
use quire_rfc::rfc::dav::core::{Namespace, PropertyName, PropertyValue, dav_props};
use quire_rfc::rfc::uri::is_within_prefix;

use super::MemoryStore;
use super::tree::{Node, NodeKind, normalize};
use crate::dav::resource::DavResource;

/// A node of a [`MemoryStore`], resolved for one identity.
///
/// The node is read once at resolution time.
#[derive(Debug)]
pub struct MemoryResource {
    store: MemoryStore,
    path: String,
    clean_path: String,
    public_path: String,
    identity: Identity,
    node: Option<Node>,
}

impl MemoryResource {
    pub(super) async fn resolve(
        store: MemoryStore,
        path: &str,
        clean_path: &str,
        identity: Identity,
    ) -> Self {
        let key = normalize(clean_path);
        let inside = store.prefix.is_empty() || is_within_prefix(path, &store.prefix);

        let (public_path, node) = if inside {
            let public = if key == "/" {
                if store.prefix.is_empty() {
                    "/".to_string()
                } else {
                    store.prefix.clone()
                }
            } else {
                format!("{}{key}", store.prefix)
            };
            let node = store.tree.read().await.nodes.get(&key).cloned();
            (public, node)
        } else {
            (path.to_string(), None)
        };

        tracing::trace!(path = %path, clean_path = %key, found = node.is_some(), "Resolved memory resource");

        Self {
            store,
            path: path.to_string(),
            clean_path: key,
            public_path,
            identity,
            node,
        }
    }

    fn kind(&self) -> Option<NodeKind> {
        self.node.as_ref().map(|node| node.kind)
    }

    fn visible(&self) -> bool {
        match self.kind() {
            Some(NodeKind::Index) => true,
            Some(_) => !self.identity.is_anonymous(),
            None => false,
        }
    }

    fn name(&self) -> String {
        self.public_path
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Checks that `dest` can receive a copy from this resource.
    fn writable_destination(&self, dest: &dyn DavResource) -> Result<String, StatusCode> {
        if self.node.is_none() {
            return Err(StatusCode::NOT_FOUND);
        }
        if self.identity.is_anonymous() {
            return Err(StatusCode::FORBIDDEN);
        }
        if !self.store.prefix.is_empty() && !is_within_prefix(&dest.public_path(), &self.store.prefix) {
            return Err(StatusCode::BAD_GATEWAY);
        }
        Ok(normalize(dest.clean_path()))
    }
}

#[salvo::async_trait]
impl DavResource for MemoryResource {
    fn path(&self) -> &str {
        &self.path
    }

    fn clean_path(&self) -> &str {
        &self.clean_path
    }

    fn public_path(&self) -> String {
        self.public_path.clone()
    }

    fn identity(&self) -> &Identity {
        &self.identity
    }

    async fn exists(&self) -> bool {
        self.visible()
    }

    async fn really_exists(&self) -> bool {
        self.node.is_some()
    }

    async fn is_collection(&self) -> bool {
        self.kind().is_some_and(NodeKind::is_collection)
    }

    async fn etag(&self) -> Option<String> {
        self.node
            .as_ref()
            .filter(|node| node.kind == NodeKind::Document)
            .map(|node| node.etag.clone())
    }

    async fn content_type(&self) -> Option<String> {
        let node = self.node.as_ref()?;
        if node.kind.is_collection() {
            Some("inode/directory".to_string())
        } else {
            node.content_type.clone()
        }
    }

    async fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.node.as_ref().map(|node| node.modified)
    }

    async fn display_name(&self) -> Option<String> {
        let node = self.node.as_ref()?;
        Some(node.title.clone().unwrap_or_else(|| self.name()))
    }

    async fn properties(&self) -> Vec<PropertyName> {
        let mut names = vec![
            PropertyName::from(dav_props::resourcetype()),
            PropertyName::from(dav_props::displayname()),
            PropertyName::from(dav_props::creationdate()),
            PropertyName::from(dav_props::getlastmodified()),
            PropertyName::from(dav_props::getcontenttype()),
        ];
        if self.kind() == Some(NodeKind::Document) {
            names.push(PropertyName::from(dav_props::getcontentlength()));
            names.push(PropertyName::from(dav_props::getetag()));
        }
        names
    }

    async fn property(&self, name: &PropertyName) -> Option<PropertyValue> {
        if *name.namespace() != Namespace::DAV {
            return None;
        }
        let node = self.node.as_ref()?;

        match name.local_name() {
            "resourcetype" => Some(PropertyValue::ResourceType(if node.kind.is_collection() {
                vec![dav_props::collection()]
            } else {
                Vec::new()
            })),
            "displayname" => self.display_name().await.map(PropertyValue::Text),
            "creationdate" => Some(PropertyValue::DateTime(node.created)),
            "getlastmodified" => Some(PropertyValue::HttpDate(node.modified)),
            "getcontenttype" => self.content_type().await.map(PropertyValue::Text),
            "getcontentlength" if node.kind == NodeKind::Document => {
                Some(PropertyValue::Integer(i64::try_from(node.content.len()).unwrap_or(i64::MAX)))
            }
            "getetag" => self.etag().await.map(PropertyValue::Text),
            _ => None,
        }
    }

    async fn children(&self) -> Vec<Box<dyn DavResource>> {
        if !self.visible() {
            return Vec::new();
        }

        let keys = self.store.tree.read().await.children(&self.clean_path);
        let mut children: Vec<Box<dyn DavResource>> = Vec::with_capacity(keys.len());
        for key in keys {
            let path = format!("{}{key}", self.store.prefix);
            children.push(Box::new(
                Self::resolve(self.store.clone(), &path, &key, self.identity.clone()).await,
            ));
        }
        children
    }

    fn supports_locking(&self) -> bool {
        matches!(self.kind(), Some(NodeKind::Folder | NodeKind::Document))
    }

    async fn lock_check(&self) -> Result<(), StatusCode> {
        let owner = self.identity.to_string();
        let tree = self.store.tree.read().await;
        match tree.conflicting_lock(&self.clean_path, &owner) {
            Some(holder) => {
                tracing::debug!(path = %self.clean_path, holder = %holder, "Resource locked by another owner");
                Err(StatusCode::LOCKED)
            }
            None => Ok(()),
        }
    }

    fn allowed_methods(&self) -> &'static str {
        match self.kind() {
            Some(NodeKind::Index) => "OPTIONS, HEAD, PROPFIND",
            Some(NodeKind::Document) => "OPTIONS, HEAD, PROPFIND, COPY, MOVE, LOCK, UNLOCK",
            _ => "OPTIONS, HEAD, PROPFIND, COPY, MOVE",
        }
    }

    async fn copy_to(&self, dest: &dyn DavResource, overwrite: bool) -> StatusCode {
        let dst = match self.writable_destination(dest) {
            Ok(dst) => dst,
            Err(status) => return status,
        };
        let status = self
            .store
            .tree
            .write()
            .await
            .copy(&self.clean_path, &dst, overwrite);
        tracing::info!(from = %self.clean_path, to = %dst, %status, "Copied resource");
        status
    }

    async fn move_to(&self, dest: &dyn DavResource, overwrite: bool) -> StatusCode {
        let dst = match self.writable_destination(dest) {
            Ok(dst) => dst,
            Err(status) => return status,
        };
        let status = self
            .store
            .tree
            .write()
            .await
            .r#move(&self.clean_path, &dst, overwrite);
        tracing::info!(from = %self.clean_path, to = %dst, %status, "Moved resource");
        status
    }
}
