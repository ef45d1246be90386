pub mod depot;

pub use depot::{depot_keys, get_identity_from_depot};
