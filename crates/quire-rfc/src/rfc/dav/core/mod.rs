//! Core `WebDAV` wire types.

pub mod depth;
pub mod error;
pub mod href;
pub mod multistatus;
pub mod namespace;
pub mod property;

pub use depth::Depth;
pub use error::{DavError, DavResult};
pub use href::Href;
pub use multistatus::{Multistatus, Propstat, PropstatResponse, ResponseBody, Status};
pub use namespace::{DAV_NS, Namespace, QName, dav_props};
pub use property::{DavProperty, PropertyName, PropertySelection, PropertyValue};
