//! acpid event classification.
//!
//! acpid writes one space-delimited ASCII record per event to every client of
//! its socket, for example:
//!
//! ```text
//! video/brightnessup BRTUP 00000086 00000000
//! ac_adapter ACPI0003:00 00000080 00000001
//! ```
//!
//! Only the prefixes listed in [`classify`] matter to the daemon; everything
//! else is [`BrightnessEvent::Unrecognized`].

pub mod classify;

pub use classify::{
    classify, BrightnessEvent, AC_PLUGGED, AC_UNPLUGGED, BRIGHTNESS_DOWN, BRIGHTNESS_UP,
};
