//! Method dispatch for the Quire `WebDAV` endpoint.
//!
//! Resources are reached through the [`dav::resource::DavResource`] trait; the
//! services in [`dav::service`] decide status codes, headers and bodies
//! without touching the HTTP transport.

pub mod auth;
pub mod dav;
