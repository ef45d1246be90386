//! `WebDAV` XML parsing.
//!
//! This module provides parsing for `WebDAV` XML request bodies
//! using the `quick-xml` crate.

mod error;
pub mod propfind;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use propfind::{negotiate_properties, resolve_declared_namespace};
