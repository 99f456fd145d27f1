//! Error types for otafetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single transfer run.
///
/// Every variant is terminal for the current run; nothing is retried
/// internally. A caller wanting another attempt starts a fresh run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("redirect chain exceeded 5 hops")]
    TooManyRedirects,

    #[error("redirect response missing Location header")]
    MalformedRedirect,

    #[error("server returned HTTP {0}")]
    HttpStatus(u16),

    #[error("file I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("downloaded file empty or missing ({len} bytes)")]
    Integrity { len: u64 },

    #[error("transfer already in progress for {}", .0.display())]
    Busy(PathBuf),
}
