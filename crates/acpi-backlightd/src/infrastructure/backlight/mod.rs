//! Sysfs backlight store.
//!
//! The kernel exposes each backlight device as a directory of plain-text
//! attributes under `/sys/class/backlight/<device>/`.  Two matter here:
//!
//! - `max_brightness` – read once at startup; never changes while the
//!   daemon runs.
//! - `brightness` – read and rewritten on every event.
//!
//! Both hold an ASCII decimal integer.  The `brightness` file stays open for
//! the daemon's lifetime and is always accessed at offset 0 (`pread` /
//! `pwrite`), so no seek state is involved.

use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};

use backlight_core::{parse_leading_int, step_for};
use tracing::info;

use crate::application::BacklightStore;
use crate::domain::config::DEFAULT_STEP_PERCENT;
use crate::domain::DaemonError;

pub mod mock;

/// Read size for the brightness attributes; sysfs integers are far shorter.
pub const BACKLIGHT_BUFFER_SIZE: usize = 16;

/// An open backlight device.
#[derive(Debug)]
pub struct SysfsBacklight {
    current: File,
    current_path: PathBuf,
    max_brightness: i64,
    step: i64,
}

impl SysfsBacklight {
    /// Opens a device with the default 1% step.
    ///
    /// # Errors
    ///
    /// See [`SysfsBacklight::open_with_step`].
    pub fn open(current_path: &Path, max_path: &Path) -> Result<Self, DaemonError> {
        Self::open_with_step(current_path, max_path, DEFAULT_STEP_PERCENT)
    }

    /// Reads the maximum brightness from `max_path`, opens `current_path`
    /// for reading and writing, and derives the hotkey step as
    /// `step_percent` of the maximum.
    ///
    /// # Errors
    ///
    /// - [`DaemonError::Io`] if either file cannot be opened or read.
    /// - [`DaemonError::Parse`] if `max_path` does not start with a
    ///   non-negative integer.
    pub fn open_with_step(
        current_path: &Path,
        max_path: &Path,
        step_percent: u32,
    ) -> Result<Self, DaemonError> {
        let max_brightness = read_max_brightness(max_path)?;

        let current = OpenOptions::new()
            .read(true)
            .write(true)
            .open(current_path)
            .map_err(DaemonError::io("failed to open", current_path))?;

        let step = step_for(max_brightness, step_percent);
        info!(
            brightness = %current_path.display(),
            max_brightness,
            step,
            "backlight device opened"
        );

        Ok(Self {
            current,
            current_path: current_path.to_path_buf(),
            max_brightness,
            step,
        })
    }
}

/// Reads and validates the `max_brightness` attribute.  The file is closed
/// before returning.
fn read_max_brightness(max_path: &Path) -> Result<i64, DaemonError> {
    let file = File::open(max_path).map_err(DaemonError::io("failed to open", max_path))?;

    let mut buf = [0u8; BACKLIGHT_BUFFER_SIZE];
    let n = file
        .read_at(&mut buf, 0)
        .map_err(DaemonError::io("failed to read", max_path))?;

    match parse_leading_int(&buf[..n]) {
        Some(max) if max >= 0 => Ok(max),
        _ => Err(DaemonError::Parse {
            path: max_path.to_path_buf(),
            content: String::from_utf8_lossy(&buf[..n]).into_owned(),
        }),
    }
}

impl BacklightStore for SysfsBacklight {
    fn max_brightness(&self) -> i64 {
        self.max_brightness
    }

    fn step(&self) -> i64 {
        self.step
    }

    /// Reads the attribute from offset 0.  Content without a leading integer
    /// reads as 0.
    fn read_current(&mut self) -> Result<i64, DaemonError> {
        let mut buf = [0u8; BACKLIGHT_BUFFER_SIZE];
        let n = self
            .current
            .read_at(&mut buf, 0)
            .map_err(DaemonError::io("failed to read brightness from", &self.current_path))?;
        Ok(parse_leading_int(&buf[..n]).unwrap_or(0))
    }

    /// Writes `value` as decimal ASCII plus a newline at offset 0.  Exactly
    /// the formatted bytes are written.
    fn write_current(&mut self, value: i64) -> Result<(), DaemonError> {
        let text = format!("{value}\n");
        self.current
            .write_all_at(text.as_bytes(), 0)
            .map_err(DaemonError::io("failed to write brightness to", &self.current_path))
    }

    fn close(self) {
        drop(self.current);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// A throwaway directory holding fake `brightness` / `max_brightness`
    /// attributes.
    struct FakeDevice {
        dir: PathBuf,
    }

    impl FakeDevice {
        fn new(current: &str, max: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("backlightd_test_{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join("brightness"), current).unwrap();
            std::fs::write(dir.join("max_brightness"), max).unwrap();
            Self { dir }
        }

        fn current(&self) -> PathBuf {
            self.dir.join("brightness")
        }

        fn max(&self) -> PathBuf {
            self.dir.join("max_brightness")
        }
    }

    impl Drop for FakeDevice {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.dir).ok();
        }
    }

    #[test]
    fn test_open_reads_max_and_step() {
        // Arrange
        let dev = FakeDevice::new("500\n", "1000\n");

        // Act
        let store = SysfsBacklight::open(&dev.current(), &dev.max()).unwrap();

        // Assert
        assert_eq!(store.max_brightness(), 1000);
        assert_eq!(store.step(), 10);
    }

    #[test]
    fn test_open_with_step_percent() {
        let dev = FakeDevice::new("0\n", "255\n");
        let store = SysfsBacklight::open_with_step(&dev.current(), &dev.max(), 5).unwrap();
        assert_eq!(store.step(), 12);
    }

    #[test]
    fn test_open_missing_max_is_io_error() {
        let dev = FakeDevice::new("500\n", "1000\n");
        let result = SysfsBacklight::open(&dev.current(), &dev.dir.join("nope"));
        assert!(matches!(result, Err(DaemonError::Io { .. })));
    }

    #[test]
    fn test_open_missing_current_is_io_error() {
        let dev = FakeDevice::new("500\n", "1000\n");
        let result = SysfsBacklight::open(&dev.dir.join("nope"), &dev.max());
        assert!(matches!(result, Err(DaemonError::Io { .. })));
    }

    #[test]
    fn test_open_garbage_max_is_parse_error() {
        let dev = FakeDevice::new("500\n", "unknown\n");
        let result = SysfsBacklight::open(&dev.current(), &dev.max());
        assert!(matches!(result, Err(DaemonError::Parse { .. })));
    }

    #[test]
    fn test_open_negative_max_is_parse_error() {
        let dev = FakeDevice::new("500\n", "-1\n");
        let result = SysfsBacklight::open(&dev.current(), &dev.max());
        assert!(matches!(result, Err(DaemonError::Parse { .. })));
    }

    #[test]
    fn test_read_current_parses_leading_integer() {
        let dev = FakeDevice::new("  733 trailing\n", "1000\n");
        let mut store = SysfsBacklight::open(&dev.current(), &dev.max()).unwrap();
        assert_eq!(store.read_current().unwrap(), 733);
    }

    #[test]
    fn test_read_current_without_digits_is_zero() {
        let dev = FakeDevice::new("\n", "1000\n");
        let mut store = SysfsBacklight::open(&dev.current(), &dev.max()).unwrap();
        assert_eq!(store.read_current().unwrap(), 0);
    }

    #[test]
    fn test_write_then_read_round_trips_over_longer_value() {
        // Arrange: a regular file keeps stale bytes past a shorter write
        let dev = FakeDevice::new("1000\n", "1000\n");
        let mut store = SysfsBacklight::open(&dev.current(), &dev.max()).unwrap();

        // Act
        store.write_current(5).unwrap();

        // Assert: exactly "5\n" was written at offset 0
        let raw = std::fs::read(dev.current()).unwrap();
        assert_eq!(&raw[..2], b"5\n");
        assert_eq!(store.read_current().unwrap(), 5);
    }

    #[test]
    fn test_write_large_value_is_not_truncated() {
        let dev = FakeDevice::new("0\n", "1000\n");
        let mut store = SysfsBacklight::open(&dev.current(), &dev.max()).unwrap();

        store.write_current(123_456_789_012_345_678).unwrap();

        let raw = std::fs::read_to_string(dev.current()).unwrap();
        assert_eq!(raw, "123456789012345678\n");
    }
}
