//! Domain layer for acpi-backlightd.
//!
//! Plain types shared by the other layers: the resolved runtime
//! configuration and the error taxonomy.  Nothing here opens a file or a
//! socket.

pub mod config;
pub mod error;

pub use config::DaemonConfig;
pub use error::DaemonError;
