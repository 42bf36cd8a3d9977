//! Cancellable background CSV load with progress reporting.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::data::io_csv::open_csv;
use crate::data::{scan_document, Dataset};
use crate::error::CsvnoteError;

/// Shared advisory cancellation flag.
///
/// Cloning gives another handle to the same flag. The scanner polls it once
/// per input line, so a cancelled load stops at the next line boundary.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not yet cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn flag(&self) -> &AtomicBool {
        &self.0
    }
}

/// What a finished load hands back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedDataset {
    /// Everything read before the scan ended. Partial when `cancelled`.
    pub dataset: Dataset,

    /// True if the scan stopped early because of a cancel request.
    pub cancelled: bool,

    /// Bytes consumed from the file.
    pub bytes_read: u64,

    /// File size when the load started.
    pub total_bytes: u64,
}

/// Entry point for starting background loads.
pub struct LoadJob;

impl LoadJob {
    /// Starts loading `path` on Tokio's blocking pool.
    ///
    /// Progress arrives on the returned handle as integer percentages: one
    /// snapshot of bytes consumed over file size when the scan ends, then a
    /// final `100`, even when the load was cancelled. If the file cannot be
    /// opened no progress is sent and the completion resolves to
    /// [`CsvnoteError::CsvOpen`].
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn start(path: impl Into<PathBuf>) -> LoadHandle {
        let path = path.into();
        let cancel = CancelToken::new();
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();

        let token = cancel.clone();
        let completion =
            tokio::task::spawn_blocking(move || run_load(&path, &token, &progress_tx));

        LoadHandle {
            cancel,
            progress: progress_rx,
            completion,
        }
    }
}

/// A running load: its cancel capability, progress stream and completion.
pub struct LoadHandle {
    cancel: CancelToken,
    progress: mpsc::UnboundedReceiver<u8>,
    completion: JoinHandle<Result<LoadedDataset, CsvnoteError>>,
}

impl LoadHandle {
    /// Returns a token that cancels this load.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Requests cancellation of this load.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Waits for the next progress value.
    ///
    /// Returns `None` once the worker has finished and every value has been
    /// received.
    pub async fn next_progress(&mut self) -> Option<u8> {
        self.progress.recv().await
    }

    /// Waits for the load to finish, ignoring any unread progress.
    ///
    /// # Errors
    /// Returns the load's IO error, or [`CsvnoteError::LoadTask`] if the
    /// worker panicked.
    pub async fn finish(self) -> Result<LoadedDataset, CsvnoteError> {
        self.completion
            .await
            .map_err(|e| CsvnoteError::LoadTask(e.to_string()))?
    }

    /// Drains progress into `on_progress`, then waits for the result.
    ///
    /// The callback sees every value in order, and the result is returned
    /// only after the last one.
    pub async fn finish_with_progress<F>(
        mut self,
        mut on_progress: F,
    ) -> Result<LoadedDataset, CsvnoteError>
    where
        F: FnMut(u8),
    {
        while let Some(percent) = self.progress.recv().await {
            on_progress(percent);
        }
        self.finish().await
    }
}

/// Integer percentage of `done` over `total`, clamped to `0..=100`.
pub fn percent_of(done: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    (done.saturating_mul(100) / total).min(100) as u8
}

fn run_load(
    path: &Path,
    cancel: &CancelToken,
    progress: &mpsc::UnboundedSender<u8>,
) -> Result<LoadedDataset, CsvnoteError> {
    debug!(path = %path.display(), "starting CSV load");

    let (reader, total_bytes) = open_csv(path)?;
    let outcome = scan_document(reader, cancel.flag())?;

    // A closed receiver only means nobody is watching.
    if total_bytes > 0 {
        let _ = progress.send(percent_of(outcome.bytes_read, total_bytes));
    }
    let _ = progress.send(100);

    if outcome.cancelled {
        info!(
            path = %path.display(),
            rows = outcome.dataset.row_count(),
            "CSV load cancelled; keeping partial dataset"
        );
    } else {
        debug!(
            path = %path.display(),
            rows = outcome.dataset.row_count(),
            columns = outcome.dataset.column_count(),
            bytes = outcome.bytes_read,
            "CSV load finished"
        );
    }

    Ok(LoadedDataset {
        dataset: outcome.dataset,
        cancelled: outcome.cancelled,
        bytes_read: outcome.bytes_read,
        total_bytes,
    })
}
