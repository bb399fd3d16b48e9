//! # Color Normalization
//!
//! Pass colors are written as CSS-style `rgb(r,g,b)` triples. Callers may
//! also hand in `#`-prefixed hex strings, which are converted here.
//!
//! ## Conversion Rules
//!
//! - `#` followed by exactly 3 characters: each character is one hex digit
//!   and becomes one channel in `0..=15`. The digit is **not** doubled the
//!   way CSS shorthand would, so `#fff` becomes `rgb(15,15,15)`.
//! - `#` followed by 6 or more characters: the first 6 characters are three
//!   two-digit channels in `0..=255`. Anything after them is ignored.
//! - Any other `#` payload length is rejected.
//! - Strings without a leading `#` pass through unchanged.

use std::borrow::Cow;

use crate::error::PassError;

/// Normalize a color string to its wire form.
///
/// # Errors
///
/// Returns `PassError::InvalidColorFormat` if the string starts with `#` and
/// the payload is not a 3-digit or 6+-digit hex value.
pub fn normalize_color(color: &str) -> Result<Cow<'_, str>, PassError> {
    let Some(payload) = color.strip_prefix('#') else {
        return Ok(Cow::Borrowed(color));
    };

    let (r, g, b) = match payload.len() {
        3 => (
            channel(color, payload.get(0..1))?,
            channel(color, payload.get(1..2))?,
            channel(color, payload.get(2..3))?,
        ),
        n if n >= 6 => (
            channel(color, payload.get(0..2))?,
            channel(color, payload.get(2..4))?,
            channel(color, payload.get(4..6))?,
        ),
        n => {
            return Err(PassError::InvalidColorFormat {
                color: color.to_string(),
                reason: format!("use #rgb or #rrggbb, got {n} hex characters"),
            })
        }
    };

    Ok(Cow::Owned(format!("rgb({r},{g},{b})")))
}

fn channel(color: &str, digits: Option<&str>) -> Result<u8, PassError> {
    let invalid = |reason: String| PassError::InvalidColorFormat {
        color: color.to_string(),
        reason,
    };
    let digits = digits.ok_or_else(|| invalid("payload is not ASCII".to_string()))?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(format!("{digits:?} is not hexadecimal")));
    }
    u8::from_str_radix(digits, 16).map_err(|_| invalid(format!("{digits:?} is not hexadecimal")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn three_digit_payload_is_not_expanded() {
        assert_eq!(normalize_color("#fff").unwrap(), "rgb(15,15,15)");
        assert_eq!(normalize_color("#1a0").unwrap(), "rgb(1,10,0)");
    }

    #[test]
    fn six_digit_payload() {
        assert_eq!(normalize_color("#17BB52").unwrap(), "rgb(23,187,82)");
        assert_eq!(normalize_color("#000000").unwrap(), "rgb(0,0,0)");
    }

    #[test]
    fn longer_payload_uses_first_six_digits() {
        assert_eq!(normalize_color("#17BB52FF").unwrap(), "rgb(23,187,82)");
    }

    #[test]
    fn non_hash_strings_pass_through() {
        assert!(matches!(normalize_color("rgb(1,2,3)").unwrap(), Cow::Borrowed("rgb(1,2,3)")));
        assert_eq!(normalize_color("red").unwrap(), "red");
        assert_eq!(normalize_color("").unwrap(), "");
    }

    #[test]
    fn short_payloads_rejected() {
        for bad in ["#", "#1", "#12", "#1234", "#12345"] {
            assert!(
                matches!(normalize_color(bad), Err(PassError::InvalidColorFormat { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn non_hex_digits_rejected() {
        assert!(normalize_color("#ggg").is_err());
        assert!(normalize_color("#12345z").is_err());
        assert!(normalize_color("#+f+").is_err());
    }

    #[test]
    fn non_ascii_payload_rejected_without_panicking() {
        assert!(normalize_color("#é1").is_err());
        assert!(normalize_color("#ééé").is_err());
    }

    proptest! {
        #[test]
        fn six_digit_channels_round_trip(r in 0u8..=255, g in 0u8..=255, b in 0u8..=255) {
            let hex = format!("#{r:02x}{g:02X}{b:02x}");
            prop_assert_eq!(normalize_color(&hex).unwrap(), format!("rgb({r},{g},{b})"));
        }

        #[test]
        fn three_digit_channels_stay_single(r in 0u8..16, g in 0u8..16, b in 0u8..16) {
            let hex = format!("#{r:x}{g:X}{b:x}");
            prop_assert_eq!(normalize_color(&hex).unwrap(), format!("rgb({r},{g},{b})"));
        }

        #[test]
        fn strings_without_hash_are_untouched(s in "[a-z0-9(), ]{0,24}") {
            prop_assert_eq!(normalize_color(&s).unwrap(), s.as_str());
        }
    }
}
