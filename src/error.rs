//! Error types for chat2md.
//!
//! This module defines the error types returned by export operations.
//! Recoverable per-message problems (a turn without a content subtree, an
//! unclassifiable turn) are never surfaced here; they are skipped locally
//! and reported through `ExportResult::warnings`.

/// Error type for export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The page hostname matches no registered platform.
    #[error("unsupported page: no platform matches hostname {0:?}")]
    PlatformNotDetected(String),

    /// Extraction produced no usable conversation body.
    ///
    /// Raised when zero messages were found, or when the combined body text
    /// is shorter than the configured minimum. The caller may retry the whole
    /// pipeline after the page has finished rendering.
    #[error("empty extraction: {found} chars of body text, minimum is {minimum}")]
    EmptyExtraction {
        /// Combined body length that was actually extracted.
        found: usize,
        /// Minimum required by `Options::min_content_len`.
        minimum: usize,
    },
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;
