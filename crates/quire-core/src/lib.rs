//! Quire core: configuration, shared constants, and the request identity type.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
