/// Result alias used across the crate.
pub type ChapterflowResult<T> = Result<T, ChapterflowError>;

/// Error returned by the fallible boundaries of the crate (loading, validation, IO).
///
/// Sequencing commands never fail: out-of-range input is normalized instead.
#[derive(thiserror::Error, Debug)]
pub enum ChapterflowError {
    /// Authored data (deck, config, timeline) violates an invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// A timeline could not be built or resolved.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// JSON decoding/encoding failed.
    #[error("serialization error: {0}")]
    Serde(String),

    /// File system access failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all wrapper for external failures.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ChapterflowError {
    /// Build a [`ChapterflowError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ChapterflowError::Timeline`].
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`ChapterflowError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ChapterflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
