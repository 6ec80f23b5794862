//! Cache refresh pipeline: download the pages archive, install it, report progress.
//!
//! A refresh runs on the tokio runtime and talks back through two channels: a stream of
//! [`RefreshProgress`] events and a single [`RefreshOutcome`]. The progress stream is
//! closed before the outcome is sent, so nothing arrives after "finished".

use std::fs::{File, OpenOptions, TryLockError};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::index::CommandIndex;
use crate::settings::Settings;

mod error;
mod fetch;
mod install;
mod progress;

pub use error::RefreshError;
pub use fetch::{CONNECT_TIMEOUT, READ_TIMEOUT, build_client, fetch_archive};
pub use install::{Installer, StagedGeneration};
pub use progress::{Phase, ProgressReporter, RefreshProgress};

/// Message delivered when a refresh succeeds.
pub const SUCCESS_MESSAGE: &str = "Cache updated successfully";
/// Notice shown when a refresh is requested while another one runs.
pub const ALREADY_RUNNING_MESSAGE: &str = "An update process is already going on";
/// File name of the in-progress download inside the cache directory.
const DOWNLOAD_FILE_NAME: &str = "tldr.zip.part";
/// Lock file that keeps refreshes exclusive across processes sharing a cache directory.
const LOCK_FILE_NAME: &str = "refresh.lock";

/// What: Inputs of a refresh run.
#[derive(Clone, Debug)]
pub struct RefreshConfig {
    /// Remote zip archive.
    pub archive_url: String,
    /// Writable directory for downloads and staging.
    pub cache_dir: PathBuf,
    /// Live user generation root.
    pub user_root: PathBuf,
    /// Connect timeout for the download.
    pub connect_timeout: Duration,
    /// Read timeout between body chunks.
    pub read_timeout: Duration,
}

impl RefreshConfig {
    /// What: Build a config for `archive_url` with default timeouts.
    ///
    /// Details:
    /// - The user generation lives at `<cache_dir>/tldr`.
    #[must_use]
    pub fn new(archive_url: impl Into<String>, cache_dir: PathBuf) -> Self {
        let user_root = crate::paths::user_generation_dir(&cache_dir);
        Self {
            archive_url: archive_url.into(),
            cache_dir,
            user_root,
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
        }
    }

    /// Config derived from settings and the default cache directory.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.archive_url.clone(), crate::paths::cache_dir())
    }

    /// Temporary download location.
    #[must_use]
    pub fn download_path(&self) -> PathBuf {
        self.cache_dir.join(DOWNLOAD_FILE_NAME)
    }

    /// Cross-process refresh lock.
    #[must_use]
    pub fn lock_path(&self) -> PathBuf {
        self.cache_dir.join(LOCK_FILE_NAME)
    }
}

/// Final result of a refresh attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Whether the new generation is live.
    pub success: bool,
    /// Message for the user.
    pub message: String,
}

impl RefreshOutcome {
    /// Outcome for a pipeline result.
    fn from_result(result: &Result<CommandIndex, RefreshError>) -> Self {
        match result {
            Ok(_) => Self {
                success: true,
                message: SUCCESS_MESSAGE.to_string(),
            },
            Err(e) => Self {
                success: false,
                message: e.user_message(),
            },
        }
    }
}

/// Receiving side of a running refresh.
#[derive(Debug)]
pub struct RefreshHandle {
    /// Progress events, closed before the outcome is sent.
    pub progress: mpsc::UnboundedReceiver<RefreshProgress>,
    /// Resolves exactly once with the outcome.
    pub finished: oneshot::Receiver<RefreshOutcome>,
}

impl RefreshHandle {
    /// What: Deliver the callback contract on the caller's task.
    ///
    /// Inputs:
    /// - `on_progress`: Called for every progress event, in order.
    /// - `on_finished`: Called exactly once, after the last progress event.
    ///
    /// Output:
    /// - The outcome passed to `on_finished`.
    pub async fn drive<P, F>(mut self, mut on_progress: P, on_finished: F) -> RefreshOutcome
    where
        P: FnMut(&RefreshProgress),
        F: FnOnce(&RefreshOutcome),
    {
        while let Some(event) = self.progress.recv().await {
            on_progress(&event);
        }
        let outcome = self.finished.await.unwrap_or_else(|_| RefreshOutcome {
            success: false,
            message: "Update failed: worker stopped unexpectedly".to_string(),
        });
        on_finished(&outcome);
        outcome
    }

    /// Ignore progress and wait for the outcome.
    pub async fn wait(self) -> RefreshOutcome {
        self.drive(|_| {}, |_| {}).await
    }
}

/// Result of asking for a refresh.
#[derive(Debug)]
pub enum StartRefresh {
    /// A new run started.
    Started(RefreshHandle),
    /// Another run is in flight; nothing was started.
    AlreadyRunning,
}

/// Clears the in-flight flag and releases the cache lock when the run ends, including on
/// panic.
struct FlightGuard {
    /// Flag shared by clones of one `Refresher`.
    flag: Arc<AtomicBool>,
    /// Locked `refresh.lock`; `None` when the lock file could not be opened.
    lock: Option<File>,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        // Unlock before clearing the flag so a restart never sees a stale lock.
        drop(self.lock.take());
        self.flag.store(false, Ordering::Release);
    }
}

/// Outcome of trying to take the cache lock.
enum CacheLock {
    /// Lock held until the file is dropped.
    Held(File),
    /// Another refresh (possibly in another process) holds it.
    Busy,
    /// Lock file unusable; the run proceeds without cross-process exclusion.
    Unavailable,
}

/// What: Take the exclusive lock on `<cache_dir>/refresh.lock` without blocking.
///
/// Details:
/// - OS advisory lock: released when the file is closed or the process exits, so a crash
///   never leaves a stale lock behind.
fn try_lock_cache(config: &RefreshConfig) -> CacheLock {
    let path = config.lock_path();
    let file = std::fs::create_dir_all(&config.cache_dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&path)
    });
    let file = match file {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot open refresh lock");
            return CacheLock::Unavailable;
        }
    };
    match file.try_lock() {
        Ok(()) => CacheLock::Held(file),
        Err(TryLockError::WouldBlock) => CacheLock::Busy,
        Err(TryLockError::Error(e)) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot lock refresh lock");
            CacheLock::Unavailable
        }
    }
}

/// What: Single-flight launcher for refresh runs.
///
/// Details:
/// - Cloning shares the in-flight flag, so every clone sees the same running run.
/// - `start` must be called from within a tokio runtime.
#[derive(Clone, Debug)]
pub struct Refresher {
    /// Shared run configuration.
    config: Arc<RefreshConfig>,
    /// Set while a run is active.
    in_flight: Arc<AtomicBool>,
}

impl Refresher {
    /// Create a refresher for `config`.
    #[must_use]
    pub fn new(config: RefreshConfig) -> Self {
        Self {
            config: Arc::new(config),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Configuration used by every run.
    #[must_use]
    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Whether a run is active.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// What: Start a refresh unless one is already running.
    ///
    /// Output:
    /// - `StartRefresh::Started` with the run's channels, or `StartRefresh::AlreadyRunning`
    ///   immediately when another run holds the flag or the cache directory's lock. The
    ///   running run is unaffected.
    #[must_use]
    pub fn start(&self) -> StartRefresh {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::info!("refresh requested while another is running");
            return StartRefresh::AlreadyRunning;
        }
        let lock = match try_lock_cache(&self.config) {
            CacheLock::Held(file) => Some(file),
            CacheLock::Unavailable => None,
            CacheLock::Busy => {
                self.in_flight.store(false, Ordering::Release);
                tracing::info!(
                    cache = %self.config.cache_dir.display(),
                    "refresh lock held by another run"
                );
                return StartRefresh::AlreadyRunning;
            }
        };
        let guard = FlightGuard {
            flag: Arc::clone(&self.in_flight),
            lock,
        };
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (finished_tx, finished_rx) = oneshot::channel();
        let config = Arc::clone(&self.config);
        tokio::spawn(async move {
            let result = run_pipeline(&config, ProgressReporter::new(progress_tx)).await;
            match &result {
                Ok(index) => tracing::info!(
                    languages = index.map.len(),
                    commands = index.command_count(),
                    "refresh finished"
                ),
                Err(e) => tracing::warn!(error = %e, "refresh failed"),
            }
            let outcome = RefreshOutcome::from_result(&result);
            drop(guard);
            let _ = finished_tx.send(outcome);
        });
        StartRefresh::Started(RefreshHandle {
            progress: progress_rx,
            finished: finished_rx,
        })
    }
}

/// What: Download and install one archive.
///
/// Details:
/// - Consumes the reporter so the progress channel closes when this returns.
/// - The download file is removed on every failure path.
async fn run_pipeline(
    config: &RefreshConfig,
    mut reporter: ProgressReporter,
) -> Result<CommandIndex, RefreshError> {
    let client = build_client(config.connect_timeout, config.read_timeout)?;
    let download = config.download_path();
    fetch_archive(&client, &config.archive_url, &download, |received, total| {
        reporter.download(received, total);
    })
    .await?;

    let installer = Installer::new(config.cache_dir.clone(), config.user_root.clone());
    let archive = download.clone();
    let result = tokio::task::spawn_blocking(move || {
        installer.install(&archive, |phase| reporter.phase(phase))
    })
    .await
    .map_err(|e| RefreshError::Worker(e.to_string()))
    .and_then(|r| r);
    if result.is_err() && download.exists() {
        let _ = std::fs::remove_file(&download);
    }
    result
}
