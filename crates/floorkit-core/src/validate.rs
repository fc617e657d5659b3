//! Floor and floor-range validation.
//!
//! Every check is pure: the caller reads the latest floor count from the live
//! chat and passes it in. Rules short-circuit in a fixed order (numeric,
//! non-negative, ordered, bounded) and the first failure is returned.

use floorkit_config::RangeFields;
use floorkit_config::validate::{is_digits, parse_digits};

use crate::error::FloorError;

/// Inclusive range of floors that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRange {
    start: usize,
    end: usize,
}

impl FloorRange {
    /// First floor in the range.
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// Last floor in the range (inclusive).
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Iterate every floor index in the range.
    pub fn floors(self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }
}

impl From<FloorRange> for RangeFields {
    fn from(range: FloorRange) -> Self {
        Self::new(range.start as u64, range.end as u64)
    }
}

/// Whether `input` is acceptable numeric text.
///
/// Only the empty string passes as unset; deciding whether an unset field is
/// allowed is left to [`require_field`]. Whitespace alone is not a number.
#[must_use]
pub fn is_valid_number(input: &str) -> bool {
    input.is_empty() || is_digits(input.trim())
}

/// Reject blank input, returning the trimmed value otherwise.
///
/// # Errors
///
/// Returns [`FloorError::Missing`] when `input` is empty after trimming.
pub fn require_field(input: &str) -> Result<&str, FloorError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(FloorError::Missing)
    } else {
        Ok(trimmed)
    }
}

/// Validate a numeric range against the latest floor count.
///
/// # Errors
///
/// Returns the first failing rule: [`FloorError::Negative`],
/// [`FloorError::StartAfterEnd`] or [`FloorError::EndBeyondLatest`].
pub fn check_range(start: i64, end: i64, latest: usize) -> Result<FloorRange, FloorError> {
    let (Ok(start), Ok(end)) = (u64::try_from(start), u64::try_from(end)) else {
        return Err(FloorError::Negative);
    };
    bounded_range(start, end, latest)
}

/// Validate a textual range against the latest floor count.
///
/// # Errors
///
/// Returns [`FloorError::NotNumeric`] when either side is not digits-only
/// (blank included), otherwise the first failing rule of [`check_range`].
pub fn validate_floor_range(start: &str, end: &str, latest: usize) -> Result<FloorRange, FloorError> {
    let (Some(start), Some(end)) = (parse_floor(start), parse_floor(end)) else {
        return Err(FloorError::NotNumeric);
    };
    bounded_range(start, end, latest)
}

/// Validate a single numeric floor against the latest floor count.
///
/// # Errors
///
/// Returns [`FloorError::Negative`] or [`FloorError::FloorBeyondLatest`].
pub fn check_floor(floor: i64, latest: usize) -> Result<usize, FloorError> {
    let Ok(floor) = u64::try_from(floor) else {
        return Err(FloorError::Negative);
    };
    bounded_floor(floor, latest)
}

/// Validate a single textual floor against the latest floor count.
///
/// # Errors
///
/// Returns [`FloorError::NotNumeric`] or the failure of [`check_floor`].
pub fn validate_single_floor(floor: &str, latest: usize) -> Result<usize, FloorError> {
    let Some(floor) = parse_floor(floor) else {
        return Err(FloorError::NotNumeric);
    };
    bounded_floor(floor, latest)
}

fn bounded_range(start: u64, end: u64, latest: usize) -> Result<FloorRange, FloorError> {
    if start > end {
        return Err(FloorError::StartAfterEnd { start, end });
    }
    let beyond = || FloorError::EndBeyondLatest { end, latest };
    if end > latest as u64 {
        return Err(beyond());
    }
    Ok(FloorRange {
        start: usize::try_from(start).map_err(|_| beyond())?,
        end: usize::try_from(end).map_err(|_| beyond())?,
    })
}

fn bounded_floor(floor: u64, latest: usize) -> Result<usize, FloorError> {
    let beyond = || FloorError::FloorBeyondLatest { floor, latest };
    if floor > latest as u64 {
        return Err(beyond());
    }
    usize::try_from(floor).map_err(|_| beyond())
}

// Digit strings too long for u64 still denote a floor, just an unreachable one.
fn parse_floor(value: &str) -> Option<u64> {
    is_digits(value.trim()).then(|| parse_digits(value).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_ranges_within_bound_are_valid() {
        for latest in 0..6_usize {
            for end in 0..=latest {
                for start in 0..=end {
                    let range = validate_floor_range(&start.to_string(), &end.to_string(), latest);
                    assert_eq!(range, Ok(FloorRange { start, end }), "{start}..={end} of {latest}");
                }
            }
        }
    }

    #[test]
    fn inverted_ranges_fail_regardless_of_bound() {
        for latest in [0_usize, 3, 100] {
            assert_eq!(
                validate_floor_range("5", "2", latest),
                Err(FloorError::StartAfterEnd { start: 5, end: 2 })
            );
        }
    }

    #[test]
    fn end_past_latest_embeds_both_numbers() {
        let err = validate_floor_range("1", "9", 4).unwrap_err();
        assert_eq!(err, FloorError::EndBeyondLatest { end: 9, latest: 4 });
        let message = err.to_string();
        assert!(message.contains('9') && message.contains('4'), "{message}");
    }

    #[test]
    fn non_digit_input_is_not_a_number() {
        for raw in ["12a", "-5", "3.5", "+1", "1 2", "x"] {
            assert!(!is_valid_number(raw), "{raw:?}");
            assert_eq!(
                validate_floor_range(raw, "1", 10),
                Err(FloorError::NotNumeric),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn only_the_empty_string_counts_as_unset() {
        assert!(is_valid_number(""));
        assert!(is_valid_number(" 7 "));
        assert!(!is_valid_number(" "));
        assert!(!is_valid_number("   "));
        assert_eq!(validate_floor_range(" ", "1", 10), Err(FloorError::NotNumeric));
        assert_eq!(require_field("  "), Err(FloorError::Missing));
        assert_eq!(require_field(" 7 "), Ok("7"));
    }

    #[test]
    fn numeric_input_rejects_negatives_first() {
        assert_eq!(check_range(-1, 5, 10), Err(FloorError::Negative));
        assert_eq!(check_range(3, -1, 10), Err(FloorError::Negative));
        assert_eq!(check_floor(-4, 10), Err(FloorError::Negative));
    }

    #[test]
    fn rules_short_circuit_in_order() {
        assert_eq!(
            check_range(9, 2, 1),
            Err(FloorError::StartAfterEnd { start: 9, end: 2 })
        );
        assert_eq!(validate_floor_range("a", "-1", 0), Err(FloorError::NotNumeric));
    }

    #[test]
    fn single_floor_uses_the_same_bound() {
        assert_eq!(validate_single_floor("3", 3), Ok(3));
        assert_eq!(
            validate_single_floor("4", 3),
            Err(FloorError::FloorBeyondLatest { floor: 4, latest: 3 })
        );
        assert_eq!(validate_single_floor("", 3), Err(FloorError::NotNumeric));
    }

    #[test]
    fn oversized_digit_strings_exceed_the_bound() {
        assert_eq!(
            validate_floor_range("0", "99999999999999999999999", 5),
            Err(FloorError::EndBeyondLatest {
                end: u64::MAX,
                latest: 5
            })
        );
    }

    #[test]
    fn range_converts_to_remembered_fields() {
        let range = check_range(2, 4, 10).unwrap_or(FloorRange { start: 0, end: 0 });
        assert_eq!(RangeFields::from(range), RangeFields::new(2, 4));
        assert_eq!(range.floors().collect::<Vec<_>>(), vec![2, 3, 4]);
    }
}
