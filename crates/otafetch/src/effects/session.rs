use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use futures_util::StreamExt;
use once_cell::sync::Lazy;
use tokio::fs;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::core::{ProgressGate, artifact_large_enough};
use crate::data::{CHUNK_SIZE, ProgressEvent, TransferOptions, TransferRequest};
use crate::effects::fetcher::Fetcher;
use crate::effects::http::HttpClient;
use crate::error::FetchError;

/// Destinations with a transfer currently in flight.
///
/// Advisory, process-wide: a second run against a path already here is
/// rejected with [`FetchError::Busy`] instead of interleaving writes.
static IN_FLIGHT: Lazy<Mutex<HashSet<PathBuf>>> = Lazy::new(|| Mutex::new(HashSet::new()));

struct PathGuard(PathBuf);

impl PathGuard {
    fn acquire(path: &Path) -> Result<Self, FetchError> {
        let mut held = IN_FLIGHT.lock().unwrap_or_else(|e| e.into_inner());
        if !held.insert(path.to_path_buf()) {
            return Err(FetchError::Busy(path.to_path_buf()));
        }
        Ok(Self(path.to_path_buf()))
    }
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        let mut held = IN_FLIGHT.lock().unwrap_or_else(|e| e.into_inner());
        held.remove(&self.0);
    }
}

/// Drives one end-to-end download: validate input, delegate to the
/// [`Fetcher`], stream to disk, report progress, validate output.
pub struct TransferSession<C: HttpClient> {
    fetcher: Fetcher<C>,
    options: TransferOptions,
}

impl<C: HttpClient> TransferSession<C> {
    pub fn new(client: C, options: TransferOptions) -> Self {
        Self {
            fetcher: Fetcher::new(client),
            options,
        }
    }

    /// Run the transfer to completion.
    ///
    /// The destination is truncated and recreated; a prior run's output is
    /// never appended to. Connection, file handle, and the per-path guard
    /// are released on every exit path. No progress event is emitted after
    /// this returns.
    pub async fn run(&self, request: &TransferRequest) -> Result<PathBuf, FetchError> {
        if request.url.trim().is_empty() {
            return Err(FetchError::InvalidUrl("Missing url parameter".into()));
        }
        let _guard = PathGuard::acquire(&request.destination)?;

        // A prior failed or incomplete run may have left output behind.
        match fs::remove_file(&request.destination).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut response = self.fetcher.open(&request.url, &self.options).await?;
        let total = response.content_length;
        debug!(url = %request.url, ?total, "streaming to {}", request.destination.display());

        let file = fs::File::create(&request.destination).await?;
        let mut writer = BufWriter::with_capacity(CHUNK_SIZE, file);
        let mut downloaded = 0u64;
        let mut gate = ProgressGate::new();

        while let Some(chunk) = response.body.next().await {
            // A body read failure is a stream failure, not a connection
            // open failure.
            let chunk = chunk.map_err(|e| FetchError::Io(io::Error::other(e)))?;
            writer.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
            if let Some(pct) = gate.update(downloaded, total) {
                self.emit(ProgressEvent {
                    percent: Some(pct),
                    downloaded,
                    total,
                });
            }
        }

        writer.flush().await?;
        drop(writer);
        drop(response);

        let len = match fs::metadata(&request.destination).await {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => 0,
            Err(e) => return Err(e.into()),
        };
        if !artifact_large_enough(len) {
            warn!(len, "rejecting undersized artifact");
            let _ = fs::remove_file(&request.destination).await;
            return Err(FetchError::Integrity { len });
        }

        info!(
            bytes = downloaded,
            "download complete: {}",
            request.destination.display()
        );
        Ok(request.destination.clone())
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(callback) = &self.options.on_progress {
            callback(&event);
        }
    }
}

impl<C: HttpClient + 'static> TransferSession<C> {
    /// Run the transfer on a dedicated worker task.
    ///
    /// The caller is never blocked: progress arrives on the handle's watch
    /// channel and the terminal result through [`TransferHandle::wait`].
    /// Every progress update is published before the result resolves.
    /// Dropping the handle detaches the transfer, it does not cancel it.
    pub fn spawn(mut self, request: TransferRequest) -> TransferHandle {
        let (tx, rx) = watch::channel(ProgressEvent::default());

        // Chain the channel behind any caller-installed callback.
        let user_callback = self.options.on_progress.take();
        self.options.on_progress = Some(Arc::new(move |event: &ProgressEvent| {
            let _ = tx.send(*event);
            if let Some(callback) = &user_callback {
                callback(event);
            }
        }));

        let join = tokio::spawn(async move { self.run(&request).await });
        TransferHandle {
            progress_rx: rx,
            join,
        }
    }
}

#[cfg(feature = "reqwest")]
impl TransferSession<crate::effects::http::ReqwestClient> {
    /// Session over the production transport, honoring the option timeouts.
    pub fn with_defaults(options: TransferOptions) -> Result<Self, FetchError> {
        let client = crate::effects::http::ReqwestClient::new(options.timeouts)?;
        Ok(Self::new(client, options))
    }
}

/// Handle to a background transfer started with [`TransferSession::spawn`].
pub struct TransferHandle {
    progress_rx: watch::Receiver<ProgressEvent>,
    join: JoinHandle<Result<PathBuf, FetchError>>,
}

impl TransferHandle {
    /// Latest progress observed; all-zero until the first event.
    pub fn progress(&self) -> ProgressEvent {
        *self.progress_rx.borrow()
    }

    /// A receiver for asynchronous progress consumption.
    ///
    /// The channel closes once the transfer reaches a terminal state.
    pub fn subscribe(&self) -> watch::Receiver<ProgressEvent> {
        self.progress_rx.clone()
    }

    /// Wait for the terminal result.
    pub async fn wait(self) -> Result<PathBuf, FetchError> {
        match self.join.await {
            Ok(result) => result,
            Err(e) => Err(FetchError::Io(io::Error::other(e))),
        }
    }
}
