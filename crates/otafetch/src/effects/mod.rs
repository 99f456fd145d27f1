//! I/O operations for transfers.
//!
//! The transport lives behind the [`HttpClient`] trait; the [`Fetcher`]
//! owns the connection/redirect lifecycle; the [`TransferSession`] drives
//! one end-to-end download.

mod fetcher;
mod http;
mod session;

pub use fetcher::Fetcher;
pub use http::{BoxStream, HttpClient, HttpResponse};
pub use session::{TransferHandle, TransferSession};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
