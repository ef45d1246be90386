//! `WebDAV` wire model for Quire: property names and values, multistatus bodies,
//! PROPFIND property negotiation, and URI helpers.

pub mod error;
pub mod rfc;
