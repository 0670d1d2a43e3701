//! Range checks applied to every numeric command parameter before any
//! output is produced.
//!
//! A parameter is accepted when it falls inside at least one of a set of
//! inclusive ranges. Most fields have a single range; the multi-range form
//! exists because some firmware revisions accept disjoint values for the
//! same field.

use std::ops::RangeInclusive;

/// A parameter value fell outside every range accepted for it.
///
/// Always a caller error: the message names the operation, the parameter,
/// the offending value and the accepted range(s), and is identical for
/// identical inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{parameter} given to {operation} must be in range {}, but {value} was given.", describe_ranges(.ranges))]
pub struct InvalidParameter {
    /// Encoder operation that rejected the value (e.g. `set_size`).
    pub operation: &'static str,
    /// Name of the rejected parameter (e.g. `width`).
    pub parameter: &'static str,
    /// The value that was given.
    pub value: i64,
    /// Inclusive ranges the value must fall within.
    pub ranges: Vec<RangeInclusive<i64>>,
}

/// Check `value` against one or more inclusive ranges.
///
/// # Errors
///
/// Returns [`InvalidParameter`] when `value` is outside every range.
pub fn check(
    value: impl Into<i64>,
    ranges: &[RangeInclusive<i64>],
    operation: &'static str,
    parameter: &'static str,
) -> Result<(), InvalidParameter> {
    let value = value.into();
    if ranges.iter().any(|r| r.contains(&value)) {
        return Ok(());
    }
    Err(InvalidParameter {
        operation,
        parameter,
        value,
        ranges: ranges.to_vec(),
    })
}

/// Single-range shorthand for [`check`].
///
/// # Errors
///
/// Returns [`InvalidParameter`] when `value` is outside `min..=max`.
pub fn check_range(
    value: impl Into<i64>,
    min: i64,
    max: i64,
    operation: &'static str,
    parameter: &'static str,
) -> Result<(), InvalidParameter> {
    check(value, &[min..=max], operation, parameter)
}

/// Render ranges as `1-2`, `1-2 or 4-6`, `1-2, 4-6 or 8-9`.
pub fn describe_ranges(ranges: &[RangeInclusive<i64>]) -> String {
    let mut out = String::new();
    let last = ranges.len().saturating_sub(1);
    for (i, r) in ranges.iter().enumerate() {
        out.push_str(&format!("{}-{}", r.start(), r.end()));
        if i == last {
            continue;
        }
        out.push_str(if i + 1 == last { " or " } else { ", " });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_inside_single_range() {
        assert!(check_range(1, 1, 100, "set_size", "width").is_ok());
        assert!(check_range(100, 1, 100, "set_size", "width").is_ok());
        assert!(check_range(50u8, 1, 100, "set_size", "width").is_ok());
    }

    #[test]
    fn value_outside_single_range() {
        let err = check_range(0, 1, 100, "set_size", "width").unwrap_err();
        assert_eq!(err.operation, "set_size");
        assert_eq!(err.parameter, "width");
        assert_eq!(err.value, 0);
        assert_eq!(
            err.to_string(),
            "width given to set_size must be in range 1-100, but 0 was given."
        );
    }

    #[test]
    fn value_in_any_of_disjoint_ranges() {
        let ranges = [0..=0, 90..=90, 180..=180, 270..=270];
        for v in [0, 90, 180, 270] {
            assert!(check(v, &ranges, "set_text", "rotation").is_ok());
        }
        assert!(check(45, &ranges, "set_text", "rotation").is_err());
    }

    #[test]
    fn describes_ranges() {
        assert_eq!(describe_ranges(&[1..=2]), "1-2");
        assert_eq!(describe_ranges(&[1..=2, 4..=6]), "1-2 or 4-6");
        assert_eq!(describe_ranges(&[1..=2, 4..=6, 8..=9]), "1-2, 4-6 or 8-9");
        assert_eq!(describe_ranges(&[]), "");
    }

    #[test]
    fn multi_range_message() {
        let err = check(3, &[1..=2, 4..=6], "set_barcode", "rotation").unwrap_err();
        assert_eq!(
            err.to_string(),
            "rotation given to set_barcode must be in range 1-2 or 4-6, but 3 was given."
        );
    }

    #[test]
    fn repeated_checks_agree() {
        assert!(check_range(7, 1, 10, "set_print", "sets").is_ok());
        assert!(check_range(7, 1, 10, "set_print", "sets").is_ok());

        let first = check_range(11, 1, 10, "set_print", "sets").unwrap_err();
        let second = check_range(11, 1, 10, "set_print", "sets").unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }

    #[test]
    fn negative_values_rejected() {
        let err = check_range(-1, 0, 255, "set_gap", "gap_x").unwrap_err();
        assert_eq!(err.value, -1);
    }
}
