//! acpi-backlightd — entry point.
//!
//! Connects to acpid and adjusts the display backlight on brightness hotkeys
//! and AC adapter changes.
//!
//! # Usage
//!
//! ```text
//! acpi-backlightd [OPTIONS]
//!
//! Options:
//!   --config <PATH>               TOML config file [default: /etc/acpi-backlightd/config.toml]
//!   --socket <PATH>               acpid event socket [default: /var/run/acpid.socket]
//!   --device <NAME>               Backlight device under /sys/class/backlight
//!   --brightness-file <PATH>      Current brightness attribute (overrides --device)
//!   --max-brightness-file <PATH>  Maximum brightness attribute (overrides --device)
//!   --step-percent <N>            Hotkey step in percent of the maximum [1..=100]
//! ```
//!
//! Flags override the config file, which overrides the built-in defaults.
//!
//! | Variable                        | Flag                    |
//! |---------------------------------|-------------------------|
//! | `ACPI_BACKLIGHTD_CONFIG`        | `--config`              |
//! | `ACPI_BACKLIGHTD_SOCKET`        | `--socket`              |
//! | `ACPI_BACKLIGHTD_DEVICE`        | `--device`              |
//! | `ACPI_BACKLIGHTD_BRIGHTNESS`    | `--brightness-file`     |
//! | `ACPI_BACKLIGHTD_MAX_BRIGHTNESS`| `--max-brightness-file` |
//! | `ACPI_BACKLIGHTD_STEP_PERCENT`  | `--step-percent`        |
//!
//! The process exits 0 after SIGINT/SIGTERM and non-zero on any error.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::signal::unix::{signal, SignalKind};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use acpi_backlightd::application::{AdapterFactors, EventDispatcher};
use acpi_backlightd::domain::DaemonConfig;
use acpi_backlightd::infrastructure::storage::config::{load_config, ConfigFile};
use acpi_backlightd::infrastructure::{AcpiEventConnection, SysfsBacklight};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Backlight control driven by acpid events.
#[derive(Debug, Parser)]
#[command(
    name = "acpi-backlightd",
    about = "Adjusts the backlight on acpid brightness-hotkey and AC-adapter events",
    version
)]
struct Cli {
    /// TOML configuration file.
    ///
    /// Without this flag `/etc/acpi-backlightd/config.toml` is read if it
    /// exists.
    #[arg(long, env = "ACPI_BACKLIGHTD_CONFIG")]
    config: Option<PathBuf>,

    /// acpid event socket.
    #[arg(long, env = "ACPI_BACKLIGHTD_SOCKET")]
    socket: Option<PathBuf>,

    /// Backlight device name under /sys/class/backlight.
    #[arg(long, env = "ACPI_BACKLIGHTD_DEVICE")]
    device: Option<String>,

    /// Current brightness attribute file.
    #[arg(long, env = "ACPI_BACKLIGHTD_BRIGHTNESS")]
    brightness_file: Option<PathBuf>,

    /// Maximum brightness attribute file.
    #[arg(long, env = "ACPI_BACKLIGHTD_MAX_BRIGHTNESS")]
    max_brightness_file: Option<PathBuf>,

    /// Hotkey step as a percentage of the maximum brightness.
    #[arg(long, env = "ACPI_BACKLIGHTD_STEP_PERCENT",
          value_parser = clap::value_parser!(u32).range(1..=100))]
    step_percent: Option<u32>,
}

impl Cli {
    /// Layers the CLI flags over the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's values fail validation.
    fn into_daemon_config(self, file: &ConfigFile) -> anyhow::Result<DaemonConfig> {
        let mut cfg = file
            .to_daemon_config()
            .context("invalid configuration file")?;

        if let Some(socket) = self.socket {
            cfg.socket_path = socket;
        }
        if let Some(device) = &self.device {
            cfg = cfg.with_device(device);
        }
        if let Some(path) = self.brightness_file {
            cfg.brightness_path = path;
        }
        if let Some(path) = self.max_brightness_file {
            cfg.max_brightness_path = path;
        }
        if let Some(step) = self.step_percent {
            cfg.step_percent = step;
        }
        Ok(cfg)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Resolves on the first SIGINT or SIGTERM.
async fn shutdown_signal() -> anyhow::Result<()> {
    let mut term = signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    let mut int = signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    tokio::select! {
        _ = term.recv() => info!("received SIGTERM"),
        _ = int.recv() => info!("received SIGINT"),
    }
    Ok(())
}

/// Program entry point.
///
/// A current-thread runtime keeps the whole daemon on one thread; the only
/// suspension point is the wait for the next acpid record.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file = load_config(cli.config.as_deref()).context("failed to load configuration")?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    //
    // `RUST_LOG` wins; otherwise the config file's `log_level`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&file.daemon.log_level)),
        )
        .init();

    let config = cli.into_daemon_config(&file)?;
    info!(
        socket = %config.socket_path.display(),
        brightness = %config.brightness_path.display(),
        "acpi-backlightd starting"
    );

    let factors = AdapterFactors::new(config.unplugged_factor, config.plugged_factor)
        .context("invalid adapter factors")?;

    let store = SysfsBacklight::open_with_step(
        &config.brightness_path,
        &config.max_brightness_path,
        config.step_percent,
    )
    .context("failed to open backlight device")?;

    let source = AcpiEventConnection::connect(&config.socket_path)
        .await
        .context("failed to connect to acpid")?;

    let dispatcher = EventDispatcher::new(store, source, factors);
    dispatcher
        .run(async {
            if let Err(e) = shutdown_signal().await {
                // Without handlers only an external kill can stop us.
                warn!("{e:#}");
                std::future::pending::<()>().await;
            }
        })
        .await?;

    info!("acpi-backlightd stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_leave_file_config_untouched() {
        // Arrange: no flags
        let cli = Cli::parse_from(["acpi-backlightd"]);

        // Act
        let cfg = cli.into_daemon_config(&ConfigFile::default()).unwrap();

        // Assert
        assert_eq!(cfg, DaemonConfig::default());
    }

    #[test]
    fn test_cli_socket_override() {
        let cli = Cli::parse_from(["acpi-backlightd", "--socket", "/run/acpid.socket"]);
        let cfg = cli.into_daemon_config(&ConfigFile::default()).unwrap();
        assert_eq!(cfg.socket_path, PathBuf::from("/run/acpid.socket"));
    }

    #[test]
    fn test_cli_device_override() {
        let cli = Cli::parse_from(["acpi-backlightd", "--device", "amdgpu_bl0"]);
        let cfg = cli.into_daemon_config(&ConfigFile::default()).unwrap();
        assert_eq!(
            cfg.brightness_path,
            PathBuf::from("/sys/class/backlight/amdgpu_bl0/brightness")
        );
    }

    #[test]
    fn test_cli_explicit_files_beat_device() {
        let cli = Cli::parse_from([
            "acpi-backlightd",
            "--device",
            "amdgpu_bl0",
            "--brightness-file",
            "/tmp/b",
            "--max-brightness-file",
            "/tmp/m",
        ]);
        let cfg = cli.into_daemon_config(&ConfigFile::default()).unwrap();
        assert_eq!(cfg.brightness_path, PathBuf::from("/tmp/b"));
        assert_eq!(cfg.max_brightness_path, PathBuf::from("/tmp/m"));
    }

    #[test]
    fn test_cli_device_overrides_file_attribute_paths() {
        // Arrange: the file pins explicit paths, the CLI names a device
        let mut file = ConfigFile::default();
        file.paths.brightness = Some(PathBuf::from("/etc/b"));
        let cli = Cli::parse_from(["acpi-backlightd", "--device", "acpi_video0"]);

        // Act
        let cfg = cli.into_daemon_config(&file).unwrap();

        // Assert
        assert_eq!(
            cfg.brightness_path,
            PathBuf::from("/sys/class/backlight/acpi_video0/brightness")
        );
    }

    #[test]
    fn test_cli_step_percent_override() {
        let cli = Cli::parse_from(["acpi-backlightd", "--step-percent", "5"]);
        let cfg = cli.into_daemon_config(&ConfigFile::default()).unwrap();
        assert_eq!(cfg.step_percent, 5);
    }

    #[test]
    fn test_cli_step_percent_out_of_range_is_rejected() {
        assert!(Cli::try_parse_from(["acpi-backlightd", "--step-percent", "0"]).is_err());
        assert!(Cli::try_parse_from(["acpi-backlightd", "--step-percent", "101"]).is_err());
    }

    #[test]
    fn test_invalid_file_values_are_reported() {
        let mut file = ConfigFile::default();
        file.adjustment.unplugged_factor = -1.0;
        let cli = Cli::parse_from(["acpi-backlightd"]);
        assert!(cli.into_daemon_config(&file).is_err());
    }
}
