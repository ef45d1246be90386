//! Quire `WebDAV` server - integration test support.
//!
//! Re-exports the workspace crates so the integration tests can reach every
//! layer through one dependency.

pub mod component {
    pub use quire_core::{config, constants, types};
    pub use quire_service::auth;

    pub mod dav {
        pub use quire_service::dav::*;
    }

    pub mod handlers {
        pub use quire_app::config::ConfigHandler;
        pub use quire_app::resource_handler::ResourceFactoryHandler;
    }
}

pub mod app {
    pub use quire_app::app::*;
}

pub mod rfc {
    pub use quire_rfc::rfc::*;
}
