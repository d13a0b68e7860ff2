//! Error types for unhwp library.

use std::io;
use thiserror::Error;

/// Result type alias for unhwp operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during HWP processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading files or container streams.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as HWP.
    #[error("Unknown file format: not a valid HWP document")]
    UnknownFormat,

    /// The HWP version is not supported.
    #[error("Unsupported HWP version: {0}")]
    UnsupportedVersion(String),

    /// A fixed-size read ran past the end of the stream.
    #[error("Truncated stream: needed {needed} bytes at offset {offset}")]
    TruncatedStream {
        /// Stream position where the read started
        offset: u64,
        /// Number of bytes requested
        needed: u64,
    },

    /// A byte range could not be reinterpreted in its required encoding.
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// The document is password protected or distribution-locked.
    #[error("Document is encrypted")]
    Encrypted,

    /// A required container stream is missing.
    #[error("Missing required stream: {0}")]
    MissingStream(String),

    /// Nested paragraph lists exceeded the configured depth.
    #[error("Paragraph nesting too deep: depth {depth}")]
    NestingTooDeep {
        /// Depth at which parsing stopped
        depth: usize,
    },

    /// Error during rendering (text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Check if this error means the input ended early.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::TruncatedStream { .. })
    }
}
