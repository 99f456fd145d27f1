//! Background HTTP artifact downloading with bounded redirects and
//! throttled progress.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable configuration and wire types
//! - [`core`] - Pure transformations
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Manual redirect chasing**: redirects are followed explicitly with the
//!   full header set reapplied per hop, bounded to [`MAX_REDIRECTS`] hops
//! - **Throttled progress**: percent notifications are gated to 5-point
//!   buckets, bounding event volume regardless of file size
//! - **Output validation**: implausibly small results are rejected and
//!   removed instead of being reported as success
//! - **Mechanism-only**: no retry policy and no install action; the caller
//!   owns both
//!
//! # Example
//!
//! ```no_run
//! use otafetch::{TransferOptions, TransferRequest, TransferSession};
//!
//! # async fn example() -> Result<(), otafetch::FetchError> {
//! let session = TransferSession::with_defaults(TransferOptions::default())?;
//! let request = TransferRequest::new("https://example.com/app.apk", "/tmp/app.apk");
//! let handle = session.spawn(request);
//! let path = handle.wait().await?;
//! println!("saved to {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod data;
pub mod effects;
mod error;

pub use self::core::{ProgressGate, artifact_large_enough, is_redirect, percent};
pub use data::{
    ACCEPT, CHUNK_SIZE, MAX_REDIRECTS, MIN_ARTIFACT_LEN, ProgressEvent, Release, ReleaseAsset,
    Timeouts, TransferOptions, TransferRequest, USER_AGENT,
};
pub use effects::{BoxStream, Fetcher, HttpClient, HttpResponse, TransferHandle, TransferSession};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::FetchError;
