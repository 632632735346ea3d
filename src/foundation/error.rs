/// Convenience result type used across the crate.
pub type CdgResult<T> = Result<T, CdgError>;

/// Errors surfaced by host-facing, fallible APIs.
///
/// Decoding and playback never produce these; recoverable stream problems are
/// reported as [`crate::Diagnostic`] values instead.
#[derive(thiserror::Error, Debug)]
pub enum CdgError {
    /// Invalid caller-provided data (bad opcode registration, short packet slice, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Player settings could not be read or parsed.
    #[error("settings error: {0}")]
    Settings(String),

    /// IO failure while reading a stream or settings file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CdgError {
    /// Build a [`CdgError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CdgError::Settings`] value.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
