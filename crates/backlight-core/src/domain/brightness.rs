//! Brightness controller: the clamped arithmetic behind every event.
//!
//! Two adjustment modes exist:
//!
//! | Mode           | Used for             | Result range        |
//! |----------------|----------------------|---------------------|
//! | [`apply_delta`]  | brightness hotkeys   | `0..=max`           |
//! | [`apply_factor`] | AC adapter changes   | `1..=max`           |
//!
//! The factor mode never turns the panel fully off: it runs on adapter
//! transitions, where the user expects to keep seeing the screen.

use thiserror::Error;
use tracing::trace;

/// Lowest value [`apply_factor`] will produce (unless `max` is lower still).
pub const MIN_FACTOR_BRIGHTNESS: i64 = 1;

/// Error returned when an [`Adjustment`] cannot be constructed.
#[derive(Debug, Error, PartialEq)]
pub enum AdjustmentError {
    /// The multiplicative factor is NaN, infinite, zero or negative.
    #[error("brightness factor must be finite and greater than zero, got {0}")]
    InvalidFactor(f64),

    /// The step percentage is outside `1..=100`.
    #[error("step percent must be between 1 and 100, got {0}")]
    InvalidStepPercent(u32),
}

/// Adds `delta` to `current` and clamps the result to `0..=max`.
///
/// # Examples
///
/// ```rust
/// use backlight_core::apply_delta;
///
/// assert_eq!(apply_delta(500, 10, 1000), 510);
/// assert_eq!(apply_delta(995, 10, 1000), 1000);
/// assert_eq!(apply_delta(4, -10, 1000), 0);
/// ```
pub fn apply_delta(current: i64, delta: i64, max: i64) -> i64 {
    let value = current.saturating_add(delta);
    if value > max {
        max
    } else if value < 0 {
        0
    } else {
        value
    }
}

/// Multiplies `current` by `factor`, rounds, and clamps to `1..=max`.
///
/// A result below [`MIN_FACTOR_BRIGHTNESS`] is raised to it, so doubling a
/// dark panel (`0 * 2.0`) yields 1 rather than 0.  The upper clamp wins when
/// the device maximum is itself below 1.
///
/// # Examples
///
/// ```rust
/// use backlight_core::apply_factor;
///
/// assert_eq!(apply_factor(800, 0.5, 1000), 400);
/// assert_eq!(apply_factor(0, 2.0, 1000), 1);
/// assert_eq!(apply_factor(700, 2.0, 1000), 1000);
/// ```
pub fn apply_factor(current: i64, factor: f64, max: i64) -> i64 {
    let value = (current as f64 * factor).round();
    if value > max as f64 {
        max
    } else if value < MIN_FACTOR_BRIGHTNESS as f64 {
        MIN_FACTOR_BRIGHTNESS.min(max)
    } else {
        // In range, so the cast cannot truncate.
        value as i64
    }
}

/// Computes the per-hotkey step as `percent` of `max`, truncating.
///
/// With `percent = 1` this is the classic 1% step.
pub fn step_for(max: i64, percent: u32) -> i64 {
    max.saturating_mul(i64::from(percent)) / 100
}

/// A brightness change requested by an event, independent of the device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    /// Relative change, floor 0.
    Delta(i64),
    /// Multiplicative change, floor [`MIN_FACTOR_BRIGHTNESS`].
    Factor(f64),
}

impl Adjustment {
    /// Builds a [`Adjustment::Factor`], rejecting factors that cannot describe
    /// a brightness change.
    ///
    /// # Errors
    ///
    /// Returns [`AdjustmentError::InvalidFactor`] when `factor` is not finite
    /// or not strictly positive.
    pub fn factor(factor: f64) -> Result<Self, AdjustmentError> {
        if factor.is_finite() && factor > 0.0 {
            Ok(Self::Factor(factor))
        } else {
            Err(AdjustmentError::InvalidFactor(factor))
        }
    }

    /// Applies this adjustment to `current` for a device whose maximum is `max`.
    pub fn apply(self, current: i64, max: i64) -> i64 {
        let next = match self {
            Self::Delta(delta) => apply_delta(current, delta, max),
            Self::Factor(factor) => apply_factor(current, factor, max),
        };
        trace!(adjustment = ?self, current, next, max, "adjustment applied");
        next
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
