use thiserror::Error;

/// Why a single document could not be turned into a parsed value.
#[derive(Debug, Error)]
pub enum LoadCause {
    #[error("request failed: {0}")]
    Transport(#[from] ureq::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("fetch task did not complete: {0}")]
    Task(String),
}

/// A named site document failed to load.
#[derive(Debug, Error)]
#[error("failed to load {name}: {cause}")]
pub struct DocumentLoadError {
    pub name: String,
    #[source]
    pub cause: LoadCause,
}

impl DocumentLoadError {
    pub fn new(name: impl Into<String>, cause: impl Into<LoadCause>) -> Self {
        Self { name: name.into(), cause: cause.into() }
    }
}

/// The countdown target was not a recognizable instant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid countdown target instant: {0:?}")]
pub struct InvalidTargetInstant(pub String);
