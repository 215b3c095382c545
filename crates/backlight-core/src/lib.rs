//! # backlight-core
//!
//! Pure logic shared by the `acpi-backlightd` daemon: classifying raw acpid
//! event records and computing the next backlight value.
//!
//! This crate performs no I/O.  It knows nothing about sockets or sysfs; the
//! daemon crate wires these functions to the real resources.
//!
//! - **`event`** – Turns the bytes of one acpid event record into a
//!   [`BrightnessEvent`] by matching the known ACPI event prefixes.
//!
//! - **`domain`** – Brightness arithmetic.  [`apply_delta`] handles hotkey
//!   steps (floor 0), [`apply_factor`] handles AC-adapter transitions (floor 1),
//!   and [`parse_leading_int`] reads the ASCII integers the kernel exposes.

pub mod domain;
pub mod event;

pub use domain::brightness::{
    apply_delta, apply_factor, step_for, Adjustment, AdjustmentError, MIN_FACTOR_BRIGHTNESS,
};
pub use domain::parse::parse_leading_int;
pub use event::{classify, BrightnessEvent};
