//! Shared types, errors, and configuration for the Arya hostel assistant.
//!
//! Every other crate in the workspace depends on this one. It owns the
//! menu data model (days, meal slots, entries), the chat turn record,
//! the top-level error taxonomy, and TOML-backed configuration.

pub mod config;
pub mod error;
pub mod types;

pub use config::AryaConfig;
pub use error::{AryaError, Result};
pub use types::*;
