//! Connection to the acpid event socket.
//!
//! acpid accepts any number of clients on a Unix stream socket and writes
//! every ACPI event to each of them as a line of text.  The daemon only
//! reads; nothing is ever sent back.
//!
//! The socket is non-blocking and close-on-exec (`tokio::net::UnixStream`
//! creates it that way), and waiting for the next record is a plain
//! readiness wait with no timeout.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::net::UnixStream;
use tracing::info;

use crate::application::EventSource;
use crate::domain::DaemonError;

pub mod mock;

/// Size of `sockaddr_un.sun_path` on Linux, including the trailing NUL.
pub const SUN_PATH_MAX: usize = 108;

/// Bytes requested per read; one acpid record fits comfortably.
pub const EVENT_BUFFER_SIZE: usize = 128;

/// An open connection to acpid.
#[derive(Debug)]
pub struct AcpiEventConnection {
    stream: UnixStream,
    path: PathBuf,
    buf: [u8; EVENT_BUFFER_SIZE],
}

impl AcpiEventConnection {
    /// Connects to the acpid socket at `socket_path`.
    ///
    /// # Errors
    ///
    /// - [`DaemonError::InvalidArgument`] if the path does not fit in
    ///   `sockaddr_un` (at most 107 bytes plus the terminating NUL).
    /// - [`DaemonError::Io`] if the socket cannot be created or connected,
    ///   e.g. acpid is not running.
    pub async fn connect(socket_path: &Path) -> Result<Self, DaemonError> {
        let len = socket_path.as_os_str().len();
        if len > SUN_PATH_MAX - 1 {
            return Err(DaemonError::InvalidArgument(format!(
                "socket path {} is {len} bytes; the limit is {}",
                socket_path.display(),
                SUN_PATH_MAX - 1
            )));
        }

        let stream = UnixStream::connect(socket_path)
            .await
            .map_err(DaemonError::io("failed to connect to", socket_path))?;

        info!(socket = %socket_path.display(), "connected to acpid");

        Ok(Self {
            stream,
            path: socket_path.to_path_buf(),
            buf: [0u8; EVENT_BUFFER_SIZE],
        })
    }

    /// Path this connection was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventSource for AcpiEventConnection {
    /// Waits for the socket to become readable and performs one read of up
    /// to [`EVENT_BUFFER_SIZE`] bytes.  A zero-length read means acpid hung
    /// up.
    async fn wait_for_event(&mut self) -> Result<Vec<u8>, DaemonError> {
        let n = self
            .stream
            .read(&mut self.buf)
            .await
            .map_err(DaemonError::io("failed to read event from", &self.path))?;

        if n == 0 {
            return Err(DaemonError::Disconnected {
                path: self.path.clone(),
            });
        }
        Ok(self.buf[..n].to_vec())
    }

    fn close(self) {
        drop(self.stream);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::UnixListener;

    fn socket_path() -> PathBuf {
        std::env::temp_dir().join(format!("acpid_{}.sock", uuid::Uuid::new_v4().simple()))
    }

    #[tokio::test]
    async fn test_connect_rejects_overlong_path() {
        // Arrange: 108 bytes cannot fit alongside the NUL terminator
        let path = PathBuf::from(format!("/{}", "a".repeat(SUN_PATH_MAX - 1)));

        // Act
        let result = AcpiEventConnection::connect(&path).await;

        // Assert
        assert!(matches!(result, Err(DaemonError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_connect_without_listener_is_io_error() {
        let result = AcpiEventConnection::connect(&socket_path()).await;
        assert!(matches!(result, Err(DaemonError::Io { .. })));
    }

    #[tokio::test]
    async fn test_reads_record_then_reports_disconnect() {
        // Arrange
        let path = socket_path();
        let listener = UnixListener::bind(&path).unwrap();
        let mut conn = AcpiEventConnection::connect(&path).await.unwrap();
        let (mut peer, _) = listener.accept().await.unwrap();

        // Act
        peer.write_all(b"video/brightnessup BRTUP 00000086 00000000\n")
            .await
            .unwrap();
        let record = conn.wait_for_event().await.unwrap();
        drop(peer);
        let after_hangup = conn.wait_for_event().await;

        // Assert
        assert_eq!(record, b"video/brightnessup BRTUP 00000086 00000000\n");
        assert!(matches!(after_hangup, Err(DaemonError::Disconnected { .. })));
        assert_eq!(conn.path(), path.as_path());

        conn.close();
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_long_record_is_split_at_buffer_size() {
        let path = socket_path();
        let listener = UnixListener::bind(&path).unwrap();
        let mut conn = AcpiEventConnection::connect(&path).await.unwrap();
        let (mut peer, _) = listener.accept().await.unwrap();

        peer.write_all(&[b'x'; EVENT_BUFFER_SIZE + 10]).await.unwrap();
        let first = conn.wait_for_event().await.unwrap();

        assert!(first.len() <= EVENT_BUFFER_SIZE);
        std::fs::remove_file(&path).ok();
    }
}
