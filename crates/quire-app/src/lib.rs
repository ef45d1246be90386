//! Salvo HTTP layer for the Quire `WebDAV` endpoint.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod resource_handler;
