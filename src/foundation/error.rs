use crate::foundation::core::LayerKind;

/// Convenience result type used across the crate.
pub type LayerfxResult<T> = Result<T, LayerfxError>;

#[derive(thiserror::Error, Debug)]
/// Top-level error type for registry edits, command compilation and engine runs.
pub enum LayerfxError {
    /// A second layer of a singleton kind (filter, crop, trim) was added.
    ///
    /// The registry is left unchanged; the existing layer already satisfies the caller.
    #[error("duplicate layer kind: a {kind} layer is already present")]
    DuplicateLayerKind {
        /// Kind that was rejected.
        kind: LayerKind,
    },

    /// A positional removal referenced a layer that does not exist.
    #[error("index out of range: no layer at position {index} (len {len})")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Registry length at the time of the request.
        len: usize,
    },

    /// An asset could not be resolved, fetched or staged.
    #[error("asset resolution error: {0}")]
    AssetResolution(String),

    /// The external engine rejected or failed the assembled command.
    #[error("engine execution error: {0}")]
    EngineExecution(String),

    /// Output was requested before a successful run completed.
    #[error("output not ready: {0}")]
    NotReady(String),

    /// Invalid configuration or input value.
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayerfxError {
    /// Build [`LayerfxError::DuplicateLayerKind`].
    pub fn duplicate(kind: LayerKind) -> Self {
        Self::DuplicateLayerKind { kind }
    }

    /// Build [`LayerfxError::AssetResolution`].
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::AssetResolution(msg.into())
    }

    /// Build [`LayerfxError::EngineExecution`].
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::EngineExecution(msg.into())
    }

    /// Build [`LayerfxError::NotReady`].
    pub fn not_ready(msg: impl Into<String>) -> Self {
        Self::NotReady(msg.into())
    }

    /// Build [`LayerfxError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build [`LayerfxError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
