//! `WebDAV` XML response building.

pub mod multistatus;

pub use multistatus::serialize_multistatus;
