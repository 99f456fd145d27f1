use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::progress::ProgressEvent;

/// Maximum redirect hops followed before the transfer fails.
pub const MAX_REDIRECTS: u32 = 5;

/// Read granularity the engine assumes for streamed body chunks.
pub const CHUNK_SIZE: usize = 8192;

/// Smallest byte length accepted as a plausible artifact.
pub const MIN_ARTIFACT_LEN: u64 = 1000;

/// User-Agent sent with every request, including each redirect hop.
pub const USER_AGENT: &str = concat!("otafetch/", env!("CARGO_PKG_VERSION"));

/// Accept header sent with every request.
pub const ACCEPT: &str = "application/octet-stream";

/// One artifact to download. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Absolute HTTP(S) URL of the artifact.
    pub url: String,
    /// Destination file path, truncated and recreated on every run.
    pub destination: PathBuf,
}

impl TransferRequest {
    pub fn new(url: impl Into<String>, destination: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            destination: destination.into(),
        }
    }
}

/// Timeouts applied per connection attempt.
///
/// Both reset on each redirect hop; a long chain gets a fresh budget per
/// connection rather than one shared deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Time allowed to establish the connection. Default: 15 s.
    pub connect: Duration,
    /// Time allowed between body reads. Default: 60 s.
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(15),
            read: Duration::from_secs(60),
        }
    }
}

/// Configuration for a transfer.
///
/// # Examples
///
/// ```
/// use otafetch::TransferOptions;
///
/// let options = TransferOptions::default()
///     .header("X-Update-Channel", "stable");
/// ```
#[derive(Clone, Default)]
pub struct TransferOptions {
    /// Custom HTTP headers appended after the fixed set.
    ///
    /// Sent with every request, including each redirect hop.
    pub headers: Arc<[(String, String)]>,

    /// Per-connection timeouts.
    pub timeouts: Timeouts,

    /// Progress callback invoked for each throttled progress bucket.
    ///
    /// The callback receives a reference to avoid cloning on every
    /// invocation. It is never invoked after the run returns.
    pub on_progress: Option<Arc<dyn Fn(&ProgressEvent) + Send + Sync>>,
}

impl fmt::Debug for TransferOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferOptions")
            .field("headers", &self.headers)
            .field("timeouts", &self.timeouts)
            .field("on_progress", &"{ ... }")
            .finish()
    }
}

impl TransferOptions {
    /// Add a single custom HTTP header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    /// Replace the custom header set.
    #[must_use]
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Arc::from(headers);
        self
    }

    /// Override the per-connection timeouts.
    #[must_use]
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn on_progress(mut self, on_progress: Arc<dyn Fn(&ProgressEvent) + Send + Sync>) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    /// The full header set for one request: the fixed identification
    /// headers followed by any custom ones.
    pub fn request_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Accept".to_string(), ACCEPT.to_string()),
            ("User-Agent".to_string(), USER_AGENT.to_string()),
        ];
        headers.extend(self.headers.iter().cloned());
        headers
    }
}
