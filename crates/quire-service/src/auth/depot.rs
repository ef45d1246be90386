//! Depot helpers for reading the caller's identity from Salvo requests.

use quire_core::types::Identity;

pub mod depot_keys {
    pub const IDENTITY: &str = "__identity";
}

/// Get the caller identity from the depot.
///
/// A depot without an identity is treated as anonymous.
#[must_use]
pub fn get_identity_from_depot(depot: &salvo::Depot) -> Identity {
    match depot.get::<Identity>(depot_keys::IDENTITY) {
        Ok(identity) => identity.clone(),
        Err(_missing) => {
            tracing::warn!("Depot missing identity; defaulting to anonymous");
            Identity::Anonymous
        }
    }
}
