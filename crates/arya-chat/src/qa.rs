//! Interface to the external retrieval+generation pipeline.

use arya_core::error::AryaError;

/// Retrieval-augmented question answering.
///
/// Implementations wrap the hosted vector store and language model; the
/// router treats them as opaque, possibly slow, and possibly failing.
/// Timeouts and retries are the implementation's concern, not the
/// router's.
pub trait QaBackend: Send + Sync {
    /// Answer a free-text question from the knowledge base.
    fn answer(&self, question: &str) -> Result<String, AryaError>;
}
