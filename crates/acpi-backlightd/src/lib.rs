//! acpi-backlightd library crate.
//!
//! Bridges acpid events to the sysfs backlight: brightness hotkeys move the
//! backlight by a fixed step, AC adapter changes scale it.
//!
//! ```text
//! acpid socket ──▶ [acpi-backlightd] ──▶ /sys/class/backlight/<dev>/brightness
//!   ├── domain/           DaemonConfig, DaemonError
//!   ├── application/      EventDispatcher + BacklightStore/EventSource traits
//!   └── infrastructure/
//!         ├── acpi/       tokio UnixStream to acpid
//!         ├── backlight/  sysfs attribute files
//!         └── storage/    TOML configuration file
//! ```
//!
//! The binary wires these together on a single-threaded runtime.

/// Domain layer: configuration and error types (no I/O).
pub mod domain;

/// Application layer: the event dispatcher.
pub mod application;

/// Infrastructure layer: sysfs, the acpid socket and the config file.
pub mod infrastructure;
