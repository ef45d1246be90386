//! The resource interface consumed by the method services.

use chrono::{DateTime, Utc};
use salvo::http::StatusCode;

use quire_core::types::Identity;
use quire_rfc::rfc::dav::core::{PropertyName, PropertyValue};

/// A hierarchical `WebDAV` resource as seen by one caller.
///
/// Instances are resolved fresh for every request and carry the identity they
/// were resolved for. `exists` answers for that identity; `really_exists`
/// answers regardless of visibility, so `exists` implies `really_exists`.
#[salvo::async_trait]
pub trait DavResource: Send + Sync {
    /// Raw request path this resource was resolved from.
    fn path(&self) -> &str;

    /// Path relative to the mount prefix.
    fn clean_path(&self) -> &str;

    /// Canonical externally visible path, including the mount prefix.
    fn public_path(&self) -> String;

    /// The identity operations run under.
    fn identity(&self) -> &Identity;

    /// Whether the resource is present and visible to [`Self::identity`].
    async fn exists(&self) -> bool;

    /// Whether the underlying object is present, ignoring visibility.
    async fn really_exists(&self) -> bool;

    async fn is_collection(&self) -> bool;

    async fn etag(&self) -> Option<String>;

    async fn content_type(&self) -> Option<String>;

    async fn last_modified(&self) -> Option<DateTime<Utc>>;

    async fn display_name(&self) -> Option<String>;

    /// Names of every property the resource exposes, in presentation order.
    async fn properties(&self) -> Vec<PropertyName>;

    /// Value of a single property, or `None` if the resource does not define it.
    async fn property(&self, name: &PropertyName) -> Option<PropertyValue>;

    /// Visible children, in listing order.
    async fn children(&self) -> Vec<Box<dyn DavResource>>;

    fn supports_locking(&self) -> bool {
        false
    }

    /// Checks that no lock held by someone else prevents modification.
    ///
    /// ## Errors
    /// Returns the status to answer with when a conflicting lock exists.
    async fn lock_check(&self) -> Result<(), StatusCode> {
        Ok(())
    }

    /// Value of the `Allow` header for OPTIONS.
    fn allowed_methods(&self) -> &'static str {
        "OPTIONS, HEAD, PROPFIND, COPY, MOVE"
    }

    /// Whether hrefs for this resource are emitted as bare paths.
    fn propstat_relative_path(&self) -> bool {
        false
    }

    /// Copies this resource to `dest`.
    ///
    /// ## Side Effects
    /// Creates or replaces the resource at the destination.
    async fn copy_to(&self, dest: &dyn DavResource, overwrite: bool) -> StatusCode;

    /// Moves this resource to `dest`.
    ///
    /// ## Side Effects
    /// Creates or replaces the destination and removes the source.
    async fn move_to(&self, dest: &dyn DavResource, overwrite: bool) -> StatusCode;
}

/// Resolves request paths to resources for a given identity.
#[salvo::async_trait]
pub trait ResourceFactory: Send + Sync {
    /// Resolves `path` (with `clean_path` relative to the mount prefix) for `identity`.
    async fn resolve(
        &self,
        path: &str,
        clean_path: &str,
        identity: &Identity,
    ) -> Box<dyn DavResource>;
}
