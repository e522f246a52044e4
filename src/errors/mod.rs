//! Centralized error handling for the emoji mirror
//!
//! Errors are split by blast radius: a [`FetchError`] aborts the whole
//! sync cycle at the orchestrator boundary, a [`DownloadError`] is
//! confined to the single item that raised it, and a [`WebError`] is
//! mapped to a structured HTTP 500 without ever crashing the process.

pub mod types;

pub use types::*;

/// Convenience type alias for catalog fetch results
pub type FetchResult<T> = Result<T, FetchError>;

/// Convenience type alias for per-item download results
pub type DownloadResult<T> = Result<T, DownloadError>;
