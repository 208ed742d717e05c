use thiserror::Error;

/// Errors raised by an external backend (energy evaluation, normal mode
/// computation, zero eigenvector projection).
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong while browsing normal modes.
#[derive(Error, Debug)]
pub enum BrowserError {
    /// Catalog or parameter input that doesn't fit the active configuration.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A path was requested before any mode was selected.
    #[error("no normal mode selected")]
    NoModeSelected,

    /// The backend failed. Its error is passed through untouched.
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BrowserError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;
