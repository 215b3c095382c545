//! Errors that end the daemon.
//!
//! Every variant is fatal: setup errors abort startup, and any error raised
//! inside the event loop stops it.  There is no retry.

use std::path::PathBuf;

use thiserror::Error;

/// Error type shared by the backlight store, the event source and the
/// dispatcher.
#[derive(Debug, Error)]
pub enum DaemonError {
    /// Opening, reading or writing a file or socket failed.
    #[error("{context} {}: {source}", .path.display())]
    Io {
        /// What was being attempted, e.g. `"failed to write brightness to"`.
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The maximum-brightness attribute does not hold a usable integer.
    #[error("{} does not contain a valid maximum brightness: {content:?}", .path.display())]
    Parse { path: PathBuf, content: String },

    /// A caller-supplied value cannot be used, e.g. a socket path that does
    /// not fit in `sockaddr_un`.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// acpid closed the event socket.
    #[error("event socket {} was closed by acpid", .path.display())]
    Disconnected { path: PathBuf },
}

impl DaemonError {
    /// Builds a [`DaemonError::Io`] for `path`; meant for `map_err`.
    pub fn io(
        context: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io {
            context,
            path,
            source,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
