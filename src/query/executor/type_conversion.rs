// Type Conversion Utilities for the Execution Engine
//
// Every comparator, sort, join and aggregate in the engine goes through the
// coercion rules in this module:
//
// - `Null` equals only `Null` and orders below every other value.
// - Two numeric-looking values compare numerically. Finite numbers, booleans
//   (true = 1, false = 0) and text holding a decimal number are numeric-looking.
// - Condition operators compare anything else by its text form, byte-wise.
// - Sorting, MIN and MAX need a total order, so `compare_values` ranks the
//   kinds instead: `Null`, then numeric-looking values, then other text.
//
// Both orderings agree on equality, which is what `loose_eq` and `ValueKey`
// are built on.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::query::executor::result::DataValue;

/// Parse text as a decimal number: optional sign, digits with an optional
/// fraction, optional exponent. Surrounding whitespace is ignored.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let bytes = trimmed.as_bytes();
    let len = bytes.len();
    let mut i = 0;

    if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < len && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        digits += i - frac_start;
    }

    if digits == 0 {
        return None;
    }

    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < len && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return None;
        }
    }

    if i != len {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Numeric view of a value, if it is numeric-looking
pub fn as_number(value: &DataValue) -> Option<f64> {
    match value {
        DataValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
        DataValue::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
        DataValue::Text(s) => parse_numeric(s),
        DataValue::Null => None,
    }
}

/// Render a number without a trailing `.0` when it is integral
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Text form used when a comparison falls back to lexical ordering
pub fn comparison_text(value: &DataValue) -> Cow<'_, str> {
    match value {
        DataValue::Null => Cow::Borrowed(""),
        DataValue::Number(n) => Cow::Owned(format_number(*n)),
        DataValue::Text(s) => Cow::Borrowed(s),
        DataValue::Boolean(b) => Cow::Borrowed(if *b { "1" } else { "0" }),
    }
}

// -0.0 and 0.0 must be the same number for ordering and hashing.
fn normalize_zero(n: f64) -> f64 {
    if n == 0.0 { 0.0 } else { n }
}

/// Total order over values: `Null` first, then numeric-looking values by
/// number, then the remaining values by their text form
pub fn compare_values(a: &DataValue, b: &DataValue) -> Ordering {
    match (a, b) {
        (DataValue::Null, DataValue::Null) => Ordering::Equal,
        (DataValue::Null, _) => Ordering::Less,
        (_, DataValue::Null) => Ordering::Greater,
        _ => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => normalize_zero(x).total_cmp(&normalize_zero(y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => comparison_text(a).cmp(&comparison_text(b)),
        },
    }
}

/// Ordering used by condition operators: numeric when both sides look
/// numeric, byte-wise on the text form otherwise. Not transitive across
/// kinds (`"2" < 10 < "1x" < "2"`), so it must never drive a sort.
pub fn condition_cmp(a: &DataValue, b: &DataValue) -> Ordering {
    match (a, b) {
        (DataValue::Null, DataValue::Null) => Ordering::Equal,
        (DataValue::Null, _) => Ordering::Less,
        (_, DataValue::Null) => Ordering::Greater,
        _ => match (as_number(a), as_number(b)) {
            (Some(x), Some(y)) => normalize_zero(x).total_cmp(&normalize_zero(y)),
            _ => comparison_text(a).cmp(&comparison_text(b)),
        },
    }
}

/// Loose equality: numeric when both sides look numeric, text otherwise
pub fn loose_eq(a: &DataValue, b: &DataValue) -> bool {
    compare_values(a, b) == Ordering::Equal
}

/// Hashable normal form of a value.
///
/// Two values produce the same key exactly when [`loose_eq`] holds for them,
/// so a key lookup finds the same rows a `=` comparison would.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Number(u64),
    Text(String),
}

impl From<&DataValue> for ValueKey {
    fn from(value: &DataValue) -> Self {
        match value {
            DataValue::Null => ValueKey::Null,
            other => match as_number(other) {
                Some(n) => ValueKey::Number(normalize_zero(n).to_bits()),
                None => ValueKey::Text(comparison_text(other).into_owned()),
            },
        }
    }
}
