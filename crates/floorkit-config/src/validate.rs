//! Parsing helpers applied when the stored layout crosses into typed settings.

use std::str::FromStr;

/// Whether `value` is one or more ASCII digits and nothing else.
#[must_use]
pub fn is_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// Parse a trimmed, digits-only value.
///
/// Returns `None` for empty input, any non-digit character (signs, decimal
/// points, inner whitespace) and values that overflow `T`.
#[must_use]
pub fn parse_digits<T: FromStr>(value: &str) -> Option<T> {
    let trimmed = value.trim();
    if !is_digits(trimmed) {
        return None;
    }
    trimmed.parse::<T>().ok()
}

/// Parse a digits-only value, falling back to `default` when it does not parse.
#[must_use]
pub fn parse_or_default<T: FromStr>(value: &str, default: T) -> T {
    parse_digits(value).unwrap_or(default)
}

/// Render an optional number the way the stored layout expects (`""` when unset).
#[must_use]
pub fn render_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|inner| inner.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{is_digits, parse_digits, parse_or_default, render_optional};

    #[test]
    fn digits_only_values_parse() {
        assert_eq!(parse_digits::<u64>("42"), Some(42));
        assert_eq!(parse_digits::<u64>("  7 "), Some(7));
        assert_eq!(parse_digits::<u64>("007"), Some(7));
    }

    #[test]
    fn signs_fractions_and_junk_are_rejected() {
        for raw in ["", " ", "-5", "+5", "3.5", "12a", "1 2", "0x10"] {
            assert_eq!(parse_digits::<u64>(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn digit_check_is_untrimmed() {
        assert!(is_digits("0042"));
        assert!(!is_digits(""));
        assert!(!is_digits(" 4"));
    }

    #[test]
    fn overflow_falls_back_to_default() {
        assert_eq!(parse_or_default::<u32>("99999999999", 10), 10);
        assert_eq!(parse_or_default::<u32>("0", 10), 0);
    }

    #[test]
    fn unset_values_render_empty() {
        assert_eq!(render_optional::<u64>(None), "");
        assert_eq!(render_optional(Some(12_u64)), "12");
    }
}
