//! Domain layer: brightness arithmetic and attribute parsing.
//!
//! Everything here operates on already-read integers and bytes, so it can be
//! tested without a backlight device.

pub mod brightness;
pub mod parse;
