//! Prefix matching of raw event records.

/// Hotkey: brightness down.
pub const BRIGHTNESS_DOWN: &[u8] = b"video/brightnessdown BRTDN";
/// Hotkey: brightness up.
pub const BRIGHTNESS_UP: &[u8] = b"video/brightnessup BRTUP";
/// AC adapter status change, now offline.
pub const AC_UNPLUGGED: &[u8] = b"ac_adapter ACPI0003:00 00000080 00000000";
/// AC adapter status change, now online.
pub const AC_PLUGGED: &[u8] = b"ac_adapter ACPI0003:00 00000080 00000001";

/// What a single acpid record asks the daemon to do.
///
/// Produced per read and consumed immediately; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrightnessEvent {
    /// Brightness-up hotkey.
    StepUp,
    /// Brightness-down hotkey.
    StepDown,
    /// The AC adapter went offline.
    AcUnplugged,
    /// The AC adapter came online.
    AcPlugged,
    /// Any other record; ignored.
    Unrecognized,
}

/// Signatures in match order.
const SIGNATURES: [(&[u8], BrightnessEvent); 4] = [
    (BRIGHTNESS_DOWN, BrightnessEvent::StepDown),
    (BRIGHTNESS_UP, BrightnessEvent::StepUp),
    (AC_UNPLUGGED, BrightnessEvent::AcUnplugged),
    (AC_PLUGGED, BrightnessEvent::AcPlugged),
];

/// Classifies the bytes of one event read by exact prefix match.
///
/// Whatever follows a known prefix is ignored, but the prefix itself must
/// match byte for byte (including its single space).
///
/// # Examples
///
/// ```rust
/// use backlight_core::{classify, BrightnessEvent};
///
/// assert_eq!(
///     classify(b"video/brightnessup BRTUP 00000086 00000000\n"),
///     BrightnessEvent::StepUp,
/// );
/// assert_eq!(classify(b"button/lid LID close"), BrightnessEvent::Unrecognized);
/// ```
pub fn classify(raw: &[u8]) -> BrightnessEvent {
    SIGNATURES
        .iter()
        .find(|(prefix, _)| raw.starts_with(prefix))
        .map_or(BrightnessEvent::Unrecognized, |&(_, event)| event)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
