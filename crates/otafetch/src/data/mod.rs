//! Immutable data types for transfer operations.
//!
//! This module contains the request/option types, the progress notification
//! shape, and the release manifest model. These types are immutable and
//! designed to be passed between functions without mutation.

pub mod progress;
pub mod release;
pub mod request;

pub use progress::ProgressEvent;
pub use release::{Release, ReleaseAsset};
pub use request::{
    ACCEPT, CHUNK_SIZE, MAX_REDIRECTS, MIN_ARTIFACT_LEN, Timeouts, TransferOptions,
    TransferRequest, USER_AGENT,
};
