//! `WebDAV` (RFC 4918) types, request parsing, and response serialization.

pub mod build;
pub mod core;
pub mod parse;
