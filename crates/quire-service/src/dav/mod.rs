//! `WebDAV` method services and the resource interface they consume.

pub mod compat;
pub mod memory;
pub mod properties;
pub mod request;
pub mod resource;
pub mod response;
pub mod service;
pub mod traversal;

pub use request::DavRequest;
pub use resource::{DavResource, ResourceFactory};
pub use response::DavResponse;
