//! ASCII integer parsing for sysfs attribute contents.

/// Parses the leading decimal integer of `bytes` the way C `atoi` does.
///
/// Leading ASCII whitespace is skipped, one optional `+`/`-` sign is accepted,
/// and digits are consumed up to the first non-digit.  Anything after that
/// (a trailing newline, a fractional part, NUL padding) is ignored.  Values
/// outside the `i64` range saturate.
///
/// Returns `None` when no digit follows the optional sign, so callers can
/// decide whether "no number" means 0 or an error.
///
/// # Examples
///
/// ```rust
/// use backlight_core::parse_leading_int;
///
/// assert_eq!(parse_leading_int(b"  937\n"), Some(937));
/// assert_eq!(parse_leading_int(b"-12abc"), Some(-12));
/// assert_eq!(parse_leading_int(b"12.75"), Some(12));
/// assert_eq!(parse_leading_int(b"max"), None);
/// ```
pub fn parse_leading_int(bytes: &[u8]) -> Option<i64> {
    let mut rest = bytes.trim_ascii_start();

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let magnitude = rest[..digits].iter().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
