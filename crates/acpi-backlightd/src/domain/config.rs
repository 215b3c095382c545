//! Daemon configuration types.
//!
//! [`DaemonConfig`] is the fully resolved set of runtime settings.  `main.rs`
//! builds it by layering CLI flags over the TOML file over these defaults;
//! the rest of the daemon only ever sees the finished struct.

use std::path::{Path, PathBuf};

/// Directory under which the kernel exposes backlight devices.
pub const BACKLIGHT_CLASS_DIR: &str = "/sys/class/backlight";

/// Backlight device used when none is configured.
pub const DEFAULT_DEVICE: &str = "intel_backlight";

/// acpid's well-known event socket.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/acpid.socket";

/// Percentage of the maximum brightness applied per hotkey press.
pub const DEFAULT_STEP_PERCENT: u32 = 1;

/// Brightness multiplier when the AC adapter goes offline.
pub const DEFAULT_UNPLUGGED_FACTOR: f64 = 0.5;

/// Brightness multiplier when the AC adapter comes back online.
pub const DEFAULT_PLUGGED_FACTOR: f64 = 2.0;

/// All runtime configuration for the daemon.
///
/// # Example
///
/// ```rust
/// use acpi_backlightd::domain::DaemonConfig;
///
/// let cfg = DaemonConfig::default();
/// assert!(cfg.brightness_path.ends_with("intel_backlight/brightness"));
/// assert_eq!(cfg.step_percent, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DaemonConfig {
    /// acpid event socket to connect to.
    pub socket_path: PathBuf,
    /// Read-write attribute holding the current brightness.
    pub brightness_path: PathBuf,
    /// Read-only attribute holding the maximum brightness.
    pub max_brightness_path: PathBuf,
    /// Hotkey step as a percentage of the maximum, `1..=100`.
    pub step_percent: u32,
    /// Multiplier applied when the adapter is unplugged.
    pub unplugged_factor: f64,
    /// Multiplier applied when the adapter is plugged in.
    pub plugged_factor: f64,
}

impl DaemonConfig {
    /// Points both brightness attributes at the sysfs device `name`.
    pub fn with_device(mut self, name: &str) -> Self {
        let (brightness, max) = device_attribute_paths(Path::new(BACKLIGHT_CLASS_DIR), name);
        self.brightness_path = brightness;
        self.max_brightness_path = max;
        self
    }
}

impl Default for DaemonConfig {
    /// | Field               | Default                                          |
    /// |---------------------|--------------------------------------------------|
    /// | socket_path         | `/var/run/acpid.socket`                          |
    /// | brightness_path     | `/sys/class/backlight/intel_backlight/brightness` |
    /// | max_brightness_path | `.../intel_backlight/max_brightness`             |
    /// | step_percent        | 1                                                |
    /// | unplugged_factor    | 0.5                                              |
    /// | plugged_factor      | 2.0                                              |
    fn default() -> Self {
        let (brightness_path, max_brightness_path) =
            device_attribute_paths(Path::new(BACKLIGHT_CLASS_DIR), DEFAULT_DEVICE);
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            brightness_path,
            max_brightness_path,
            step_percent: DEFAULT_STEP_PERCENT,
            unplugged_factor: DEFAULT_UNPLUGGED_FACTOR,
            plugged_factor: DEFAULT_PLUGGED_FACTOR,
        }
    }
}

/// Returns the `brightness` and `max_brightness` attribute paths of device
/// `name` under `class_dir`.
pub fn device_attribute_paths(class_dir: &Path, name: &str) -> (PathBuf, PathBuf) {
    let device = class_dir.join(name);
    (device.join("brightness"), device.join("max_brightness"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_is_acpid() {
        let cfg = DaemonConfig::default();
        assert_eq!(cfg.socket_path, PathBuf::from("/var/run/acpid.socket"));
    }

    #[test]
    fn test_default_attributes_are_intel_backlight() {
        let cfg = DaemonConfig::default();
        assert_eq!(
            cfg.brightness_path,
            PathBuf::from("/sys/class/backlight/intel_backlight/brightness")
        );
        assert_eq!(
            cfg.max_brightness_path,
            PathBuf::from("/sys/class/backlight/intel_backlight/max_brightness")
        );
    }

    #[test]
    fn test_default_adjustments() {
        let cfg = DaemonConfig::default();
        assert_eq!(cfg.step_percent, 1);
        assert_eq!(cfg.unplugged_factor, 0.5);
        assert_eq!(cfg.plugged_factor, 2.0);
    }

    #[test]
    fn test_with_device_rewrites_both_attributes() {
        // Arrange / Act
        let cfg = DaemonConfig::default().with_device("amdgpu_bl0");

        // Assert
        assert_eq!(
            cfg.brightness_path,
            PathBuf::from("/sys/class/backlight/amdgpu_bl0/brightness")
        );
        assert_eq!(
            cfg.max_brightness_path,
            PathBuf::from("/sys/class/backlight/amdgpu_bl0/max_brightness")
        );
        // Socket untouched
        assert_eq!(cfg.socket_path, PathBuf::from(DEFAULT_SOCKET_PATH));
    }

    #[test]
    fn test_device_attribute_paths_under_custom_root() {
        let (cur, max) = device_attribute_paths(Path::new("/tmp/fake"), "acpi_video0");
        assert_eq!(cur, PathBuf::from("/tmp/fake/acpi_video0/brightness"));
        assert_eq!(max, PathBuf::from("/tmp/fake/acpi_video0/max_brightness"));
    }
}
