/// Convenience result type used across rosebloom.
pub type BloomResult<T> = Result<T, BloomError>;

/// Error taxonomy for the edges of the engine (configuration, rasterization, encoding).
///
/// Curve math, petal geometry, rose animation and bouquet layout are total and never
/// produce these.
#[derive(thiserror::Error, Debug)]
pub enum BloomError {
    /// Invalid user-provided configuration or parameters.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while rasterizing a recorded frame.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while streaming frames to an encoder.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BloomError {
    /// Build a [`BloomError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BloomError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`BloomError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`BloomError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
