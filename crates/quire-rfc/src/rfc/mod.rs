pub mod dav;
pub mod uri;
