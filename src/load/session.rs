//! Last-request-wins coordination of background loads.
//!
//! Starting a load through a [`LoadSession`] cancels whatever load the
//! session started before and bumps a generation counter. A superseded
//! load may still run to completion, but its result is discarded when it
//! arrives.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use super::job::{CancelToken, LoadHandle, LoadJob, LoadedDataset};
use crate::error::CsvnoteError;

/// Owns the "current load" of one logical session.
#[derive(Debug, Default)]
pub struct LoadSession {
    latest: Arc<AtomicU64>,
    current: Option<CancelToken>,
}

impl LoadSession {
    /// Creates a session with no load outstanding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any outstanding load and starts a new one for `path`.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn start(&mut self, path: impl Into<PathBuf>) -> SessionLoad {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }

        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let handle = LoadJob::start(path);
        self.current = Some(handle.cancel_token());
        debug!(generation, "started session load");

        SessionLoad {
            generation,
            latest: Arc::clone(&self.latest),
            handle,
        }
    }

    /// Cancels the outstanding load, if any.
    pub fn cancel_current(&self) {
        if let Some(token) = &self.current {
            token.cancel();
        }
    }

    /// Generation of the most recently started load (0 if none).
    pub fn generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// A load started by a [`LoadSession`].
pub struct SessionLoad {
    generation: u64,
    latest: Arc<AtomicU64>,
    handle: LoadHandle,
}

impl SessionLoad {
    /// Generation number assigned when this load started.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while no newer load has been started in the same session.
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }

    /// Requests cancellation of this load only.
    pub fn cancel(&self) {
        self.handle.cancel();
    }

    /// Returns a token that cancels this load.
    pub fn cancel_token(&self) -> CancelToken {
        self.handle.cancel_token()
    }

    /// Waits for the next progress value of this load.
    pub async fn next_progress(&mut self) -> Option<u8> {
        self.handle.next_progress().await
    }

    /// Waits for the load and returns its result, or `None` if a newer load
    /// was started in the meantime.
    pub async fn finish(self) -> Option<Result<LoadedDataset, CsvnoteError>> {
        let Self {
            generation,
            latest,
            handle,
        } = self;
        let result = handle.finish().await;
        keep_if_current(generation, &latest, result)
    }

    /// Like [`finish`](Self::finish), forwarding progress to `on_progress`
    /// first.
    pub async fn finish_with_progress<F>(
        self,
        on_progress: F,
    ) -> Option<Result<LoadedDataset, CsvnoteError>>
    where
        F: FnMut(u8),
    {
        let Self {
            generation,
            latest,
            handle,
        } = self;
        let result = handle.finish_with_progress(on_progress).await;
        keep_if_current(generation, &latest, result)
    }
}

fn keep_if_current(
    generation: u64,
    latest: &AtomicU64,
    result: Result<LoadedDataset, CsvnoteError>,
) -> Option<Result<LoadedDataset, CsvnoteError>> {
    let latest = latest.load(Ordering::SeqCst);
    if latest == generation {
        Some(result)
    } else {
        debug!(generation, latest, "discarding superseded load result");
        None
    }
}
