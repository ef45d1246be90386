pub mod context;
pub mod headers;
