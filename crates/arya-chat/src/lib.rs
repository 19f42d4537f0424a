//! Conversational routing core for the hostel assistant.
//!
//! Provides intent classification over incoming questions, structured
//! menu and photo answers, a bounded response cache, and conversation
//! history. Free-text questions fall through to a pluggable QA backend.

pub mod cache;
pub mod error;
pub mod history;
pub mod qa;
pub mod router;

pub use cache::ResponseCache;
pub use error::ChatError;
pub use history::HistoryManager;
pub use qa::QaBackend;
pub use router::{Intent, IntentRouter, Reply, RouterBuilder};
