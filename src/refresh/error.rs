//! Failure classes of a refresh run and their user-facing messages.

use std::fmt;

use crate::index::IndexError;

/// What: Everything that can stop a cache refresh.
///
/// Details:
/// - Network failures are split into "no connection" and "timed out" so the UI can show
///   a specific, actionable message; everything else is reported generically.
/// - Never crosses the worker boundary: the pipeline turns it into a `RefreshOutcome`.
#[derive(Debug)]
pub enum RefreshError {
    /// Connection refused, DNS failure or unreachable host.
    NoNetwork(reqwest::Error),
    /// Connect or read timeout.
    TimedOut(reqwest::Error),
    /// Server answered with a non-success status.
    Http(reqwest::StatusCode),
    /// Any other transport error.
    Network(reqwest::Error),
    /// Body ended before the advertised content length.
    Incomplete {
        /// Bytes received.
        received: u64,
        /// Bytes announced by the server.
        expected: u64,
    },
    /// Filesystem error while writing, extracting, moving or deleting.
    Io(std::io::Error),
    /// Archive is corrupt or not a zip file.
    Archive(zip::result::ZipError),
    /// Archive contained no `pages` directories.
    NoPages,
    /// Index document could not be written.
    Index(IndexError),
    /// Background worker failed to run to completion.
    Worker(String),
}

impl RefreshError {
    /// What: Short message suitable for a toast.
    ///
    /// Output:
    /// - `No network connection`, `Connection timed out`, or `Update failed: <detail>`.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NoNetwork(_) => "No network connection".to_string(),
            Self::TimedOut(_) => "Connection timed out".to_string(),
            other => format!("Update failed: {other}"),
        }
    }

    /// Whether the failure happened before anything was written to disk.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::NoNetwork(_) | Self::TimedOut(_) | Self::Http(_) | Self::Network(_)
        )
    }
}

impl fmt::Display for RefreshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNetwork(err) => write!(f, "no network connection: {err}"),
            Self::TimedOut(err) => write!(f, "connection timed out: {err}"),
            Self::Http(status) => write!(f, "server returned {status}"),
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Incomplete { received, expected } => {
                write!(f, "download incomplete ({received} of {expected} bytes)")
            }
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Archive(err) => write!(f, "invalid archive: {err}"),
            Self::NoPages => write!(f, "archive contains no pages"),
            Self::Index(err) => write!(f, "{err}"),
            Self::Worker(msg) => write!(f, "worker failed: {msg}"),
        }
    }
}

impl std::error::Error for RefreshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NoNetwork(err) | Self::TimedOut(err) | Self::Network(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Archive(err) => Some(err),
            Self::Index(err) => Some(err),
            Self::Http(_) | Self::Incomplete { .. } | Self::NoPages | Self::Worker(_) => None,
        }
    }
}

impl From<reqwest::Error> for RefreshError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimedOut(err)
        } else if err.is_connect() {
            Self::NoNetwork(err)
        } else {
            Self::Network(err)
        }
    }
}

impl From<std::io::Error> for RefreshError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<zip::result::ZipError> for RefreshError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Archive(err)
    }
}

impl From<IndexError> for RefreshError {
    fn from(err: IndexError) -> Self {
        Self::Index(err)
    }
}
