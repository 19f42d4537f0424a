//! Mess-menu storage, time resolution, and formatting.
//!
//! The menu is a seven-row table keyed by day of week, held in SQLite.
//! [`MenuService`] wraps a [`MenuSource`] and produces the formatted
//! answers the router hands back to users.

pub mod db;
pub mod format;
pub mod store;

pub use db::Database;
pub use format::{format_section, format_single, format_week, MenuSection};
pub use store::{MenuService, MenuSource, SqliteMenuSource};
