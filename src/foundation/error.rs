/// Result alias used throughout the crate.
pub type VizResult<T> = Result<T, VizError>;

/// Crate-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum VizError {
    /// The external engine raised, exited abnormally, or produced unusable output.
    #[error("engine failure: {0}")]
    Engine(String),

    /// A frame or object does not match the shape its type tag declares.
    #[error("schema violation: {0}")]
    Schema(String),

    /// History access outside `[0, len - 1]`.
    #[error("frame index {index} out of range for history of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// History length at the time of the request.
        len: usize,
    },

    /// An object's `type` is not part of the registry.
    #[error("unrecognized type tag: {0}")]
    UnrecognizedType(String),

    /// Invalid options or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// JSON encoding/decoding failure outside the engine boundary.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl VizError {
    /// Build a [`VizError::Engine`].
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Build a [`VizError::Schema`].
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Build a [`VizError::UnrecognizedType`].
    pub fn unrecognized_type(tag: impl Into<String>) -> Self {
        Self::UnrecognizedType(tag.into())
    }

    /// Build a [`VizError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`VizError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` for failures that originate at the engine boundary.
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}
