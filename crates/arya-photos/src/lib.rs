//! Filesystem-backed hostel photo lookup.
//!
//! Photos live in a fixed `category/subcategory` directory tree. The
//! taxonomy is static; lookups never fail, they just return fewer (or
//! zero) paths when directories are missing.

pub mod index;
pub mod taxonomy;

pub use index::PhotoIndex;
pub use taxonomy::{default_taxonomy, PhotoCategory};
