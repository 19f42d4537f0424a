use thiserror::Error;

/// Top-level error type for the Arya assistant.
///
/// Subsystem crates define their own error types and convert into this
/// one so the `?` operator works across crate boundaries. Data-level
/// conditions (a missing menu day, an unreachable store) are caught at
/// component boundaries and turned into user-facing text; only
/// configuration errors are meant to reach the caller.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AryaError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// A menu record was not found for the requested day.
    #[error("Menu not found for {0}")]
    MenuNotFound(String),

    /// The menu backing store failed (connection, query, bad row).
    #[error("Menu store error: {0}")]
    MenuUnavailable(String),

    #[error("Photo index error: {0}")]
    Photos(String),

    /// The retrieval+generation backend failed or was unreachable.
    #[error("QA backend error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for AryaError {
    fn from(err: toml::de::Error) -> Self {
        AryaError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AryaError {
    fn from(err: toml::ser::Error) -> Self {
        AryaError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AryaError {
    fn from(err: serde_json::Error) -> Self {
        AryaError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Arya operations.
pub type Result<T> = std::result::Result<T, AryaError>;
