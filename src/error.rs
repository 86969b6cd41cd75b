//! Error types for cache operations.

/// Errors that can occur while rendering through the cache.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The underlying render step failed. Propagated unchanged; nothing is
    /// written to the store.
    #[error("render step failed: {0}")]
    Render(anyhow::Error),

    /// The backing medium could not be reached (connection setup, PING).
    #[error("cache store unavailable: {0}")]
    StoreUnavailable(String),

    /// A store command failed after the connection was established.
    #[error("cache store operation failed: {0}")]
    Operation(String),

    /// Invalid settings or store URL.
    #[error("cache configuration error: {0}")]
    Configuration(String),
}

impl CacheError {
    /// Wraps an error raised by the external render step.
    pub fn render(err: impl Into<anyhow::Error>) -> Self {
        Self::Render(err.into())
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
