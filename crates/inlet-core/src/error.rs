use thiserror::Error;

/// Top-level error type for the Inlet system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define their
/// own error types and implement `From<SubsystemError> for InletError` so that
/// the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InletError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Intent error: {0}")]
    Intent(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for InletError {
    fn from(err: toml::de::Error) -> Self {
        InletError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for InletError {
    fn from(err: toml::ser::Error) -> Self {
        InletError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for InletError {
    fn from(err: serde_json::Error) -> Self {
        InletError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Inlet operations.
pub type Result<T> = std::result::Result<T, InletError>;
