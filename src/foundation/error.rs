/// Convenience result type used across Filmstrip.
pub type FilmstripResult<T> = Result<T, FilmstripError>;

/// Top-level error taxonomy used by player APIs.
///
/// Per-frame load failures are deliberately *not* part of this taxonomy: a frame
/// that fails to load is recorded as failed and skipped at draw time, it never
/// surfaces as an error to the caller.
#[derive(thiserror::Error, Debug)]
pub enum FilmstripError {
    /// Invalid user-provided configuration or call sequencing.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while resolving or decoding an asset for a fetcher.
    #[error("asset error: {0}")]
    Asset(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FilmstripError {
    /// Build a [`FilmstripError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FilmstripError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
