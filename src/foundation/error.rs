/// Convenience result type used across audioflash.
pub type FlashResult<T> = Result<T, FlashError>;

/// Top-level error taxonomy used by library APIs.
///
/// Geometric edge cases (zero-length vectors, `acos` domain errors, walks stuck at the canvas
/// border) are recovered locally and never surface here.
#[derive(thiserror::Error, Debug)]
pub enum FlashError {
    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing, unreadable or malformed audio input.
    #[error("audio error: {0}")]
    Audio(String),

    /// Failures while serializing or rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlashError {
    /// Build a [`FlashError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlashError::Audio`] value.
    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    /// Build a [`FlashError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`FlashError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
