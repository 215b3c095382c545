//! Infrastructure layer for acpi-backlightd.
//!
//! OS-facing adapters: the sysfs backlight attributes, the acpid socket and
//! the configuration file.
//!
//! **Dependency rule**: this layer implements the traits declared in
//! `application`; `application` never imports from here outside its tests.

pub mod acpi;
pub mod backlight;
pub mod storage;

pub use acpi::AcpiEventConnection;
pub use backlight::SysfsBacklight;
