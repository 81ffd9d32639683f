use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Failed to fetch {target}: {reason}")]
    Fetch { target: String, reason: String },

    #[error("Failed to get access token: {0}")]
    Auth(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Diagram not found: {0}")]
    DiagramNotFound(String),

    #[error("Diagram {id} has no version {version}")]
    VersionNotFound { id: String, version: String },

    #[error("Api Error: {0}")]
    Api(String),
}

impl GalleryError {
    pub fn fetch(target: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Fetch {
            target: target.into(),
            reason: reason.to_string(),
        }
    }

    /// True for failures of a catalog read that a caller may retry as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GalleryError::Fetch { .. } | GalleryError::Auth(_) | GalleryError::Serialization(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;
