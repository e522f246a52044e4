//! Error type definitions for the emoji mirror

use thiserror::Error;

/// Failure to retrieve or decode one of the two catalog documents.
///
/// Either document failing fails the whole fetch; the pipeline never
/// operates on a partial catalog. There is no retry, the next
/// scheduled cycle retries naturally.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (proxy unreachable, timeout, DNS)
    #[error("Fetch failed: {document} - {source}")]
    Transport {
        document: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream answered with a non-success status
    #[error("Fetch failed: {document} - HTTP {status}")]
    Status {
        document: &'static str,
        status: reqwest::StatusCode,
    },

    /// Body was not the expected JSON shape
    #[error("Fetch failed: {document} - malformed JSON: {source}")]
    Malformed {
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a single asset download.
///
/// Never propagates past the item that raised it: the orchestrator
/// logs it and lets every sibling download run to completion.
#[derive(Error, Debug)]
pub enum DownloadError {
    /// Transport-level failure fetching the asset
    #[error("Download failed: {item} - {source}")]
    Transport {
        item: String,
        #[source]
        source: reqwest::Error,
    },

    /// CDN answered with a non-success status
    #[error("Download failed: {item} - HTTP {status}")]
    Status {
        item: String,
        status: reqwest::StatusCode,
    },

    /// Declared content type is outside the supported table; the item
    /// is omitted and no file is written
    #[error("Unknown content type for {item}: {content_type}")]
    UnknownContentType { item: String, content_type: String },

    /// Filesystem failure persisting the asset
    #[error("Write failed: {item} - {source}")]
    Write {
        item: String,
        #[source]
        source: std::io::Error,
    },
}

/// Web layer errors, mapped to the structured 500 response body.
#[derive(Error, Debug)]
pub enum WebError {
    /// Filesystem failure while reading a matched image
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
