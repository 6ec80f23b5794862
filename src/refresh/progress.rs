//! Progress events of a refresh run and the reporter that keeps them ordered.

use tokio::sync::mpsc;

/// Stage of a refresh run. Stages only move forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    /// Streaming the archive.
    Downloading,
    /// Unpacking and normalising the archive.
    Extracting,
    /// Building the command index.
    Indexing,
}

/// What: One progress notification.
#[derive(Clone, Debug, PartialEq)]
pub struct RefreshProgress {
    /// Current stage.
    pub phase: Phase,
    /// Completion in `0.0..=1.0`, or `None` when the total is unknown (pulse).
    pub fraction: Option<f64>,
    /// Human-readable status line.
    pub label: String,
}

/// What: Sender side of the progress stream with ordering guarantees.
///
/// Details:
/// - Determinate fractions never decrease within a run.
/// - Requests to go back to an earlier phase are dropped.
/// - A closed receiver is not an error; the refresh keeps running.
#[derive(Debug)]
pub struct ProgressReporter {
    /// Progress channel to the caller.
    tx: mpsc::UnboundedSender<RefreshProgress>,
    /// Phase of the last event.
    phase: Phase,
    /// Highest determinate fraction sent so far.
    last_fraction: f64,
}

impl ProgressReporter {
    /// Wrap a progress channel.
    #[must_use]
    pub const fn new(tx: mpsc::UnboundedSender<RefreshProgress>) -> Self {
        Self {
            tx,
            phase: Phase::Downloading,
            last_fraction: 0.0,
        }
    }

    /// Send an event after enforcing monotonic fractions.
    fn emit(&mut self, phase: Phase, fraction: Option<f64>, label: String) {
        if phase < self.phase {
            tracing::debug!(?phase, current = ?self.phase, "dropping out-of-order progress");
            return;
        }
        self.phase = phase;
        let fraction = fraction.map(|f| {
            let f = f.clamp(0.0, 1.0).max(self.last_fraction);
            self.last_fraction = f;
            f
        });
        let _ = self.tx.send(RefreshProgress {
            phase,
            fraction,
            label,
        });
    }

    /// What: Report downloaded bytes.
    ///
    /// Inputs:
    /// - `received`: Bytes written so far.
    /// - `total`: Content length when the server sent one.
    ///
    /// Details:
    /// - Without a total the event is indeterminate and only shows the byte count.
    #[allow(clippy::cast_precision_loss)]
    pub fn download(&mut self, received: u64, total: Option<u64>) {
        let mb = received as f64 / 1024.0 / 1024.0;
        match total {
            Some(total) if total > 0 => {
                let fraction = (received as f64 / total as f64).min(1.0);
                let pct = (fraction.max(self.last_fraction) * 100.0).round();
                self.emit(
                    Phase::Downloading,
                    Some(fraction),
                    format!("Downloading... {pct:.0}% ({mb:.2} MB)"),
                );
            }
            _ => self.emit(
                Phase::Downloading,
                None,
                format!("Downloading... ({mb:.2} MB)"),
            ),
        }
    }

    /// Announce a later phase; extraction and indexing report a full bar.
    pub fn phase(&mut self, phase: Phase) {
        let label = match phase {
            Phase::Downloading => "Downloading...",
            Phase::Extracting => "Extracting...",
            Phase::Indexing => "Indexing...",
        };
        self.emit(phase, Some(1.0), label.to_string());
    }
}
