/// Convenience result type used across opweave.
pub type OpweaveResult<T> = Result<T, OpweaveError>;

/// Top-level error taxonomy used by tracker APIs.
///
/// Usage errors are fatal: a save/restore imbalance or a call after export
/// means the calling integration has corrupted its own operation stream,
/// and every downstream bounding box and dependency set would inherit the
/// corruption.
#[derive(thiserror::Error, Debug)]
pub enum OpweaveError {
    /// Caller integration bug: save/restore imbalance, closing the root
    /// group, or similar misuse of the recording protocol.
    #[error("usage error: {0}")]
    Usage(String),

    /// The recording pass has already been exported; no further calls are
    /// accepted.
    #[error("recording closed: {0}")]
    Closed(String),

    /// Invalid surface input, e.g. zero pixel dimensions at construction.
    #[error("surface error: {0}")]
    Surface(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OpweaveError {
    /// Build an [`OpweaveError::Usage`] value.
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Build an [`OpweaveError::Closed`] value.
    pub fn closed(msg: impl Into<String>) -> Self {
        Self::Closed(msg.into())
    }

    /// Build an [`OpweaveError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
