/// Convenience result type used across the crate.
pub type StereoResult<T> = Result<T, StereoError>;

/// Top-level error taxonomy used by stereo synthesis APIs.
#[derive(thiserror::Error, Debug)]
pub enum StereoError {
    /// Invalid user-provided parameters or buffer shapes.
    #[error("validation error: {0}")]
    Validation(String),

    /// A pixel or depth buffer could not be allocated.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// The input image could not be read or decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// An output view could not be encoded or written.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StereoError {
    /// Build a [`StereoError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StereoError::Allocation`] value.
    pub fn allocation(msg: impl Into<String>) -> Self {
        Self::Allocation(msg.into())
    }

    /// Build a [`StereoError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`StereoError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`StereoError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for resource exhaustion, which aborts a single run only.
    pub fn is_allocation(&self) -> bool {
        matches!(self, Self::Allocation(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
