//! Per-method services.
//!
//! Each service takes the transport-neutral [`DavRequest`](super::DavRequest)
//! and the resolved target resource and decides the outcome. Terminal
//! refusals come back as [`DavError`](quire_rfc::rfc::dav::core::DavError).

pub mod head;
pub mod options;
pub mod propfind;
pub mod transfer;

pub use head::head;
pub use options::options;
pub use propfind::propfind;
pub use transfer::{TransferMode, move_or_copy};
