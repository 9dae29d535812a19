//! Scalar parsers over captured token bytes.
//!
//! These run on the bytes the lexer captured for a single token, so they
//! accept exactly one value with no surrounding whitespace or quotes.

fn magnitude(bytes: &[u8]) -> Option<u64> {
    if bytes.is_empty() {
        return None;
    }

    bytes.iter().try_fold(0_u64, |acc, &byte| {
        let digit = byte.checked_sub(b'0').filter(|digit| *digit < 10)?;

        acc.checked_mul(10)?.checked_add(u64::from(digit))
    })
}

/// Parse a decimal unsigned integer that fits in 64 bits.
///
/// Used for snowflake identifiers, which Discord sends as JSON strings to
/// avoid precision loss but which are accepted as bare integers too. A
/// negative zero is zero.
pub fn parse_u64(bytes: &[u8]) -> Option<u64> {
    match bytes.split_first() {
        Some((b'-', rest)) => magnitude(rest).filter(|value| *value == 0),
        _ => magnitude(bytes),
    }
}

/// Parse a decimal signed integer that fits in 64 bits.
pub fn parse_i64(bytes: &[u8]) -> Option<i64> {
    match bytes.split_first() {
        Some((b'-', digits)) => {
            let abs = magnitude(digits)?;

            match i64::try_from(abs) {
                Ok(value) => Some(-value),
                Err(_) if abs == i64::MIN.unsigned_abs() => Some(i64::MIN),
                Err(_) => None,
            }
        }
        _ => magnitude(bytes).and_then(|value| i64::try_from(value).ok()),
    }
}

/// Parse a boolean literal.
pub fn parse_bool(bytes: &[u8]) -> Option<bool> {
    match bytes {
        b"true" => Some(true),
        b"false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_i64, parse_u64};
    use crate::codec::from_slice;

    #[test]
    fn unsigned() {
        assert_eq!(parse_u64(b"41771983429993937"), Some(41_771_983_429_993_937));
        assert_eq!(parse_u64(b"0"), Some(0));
        assert_eq!(parse_u64(b"18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_u64(b"18446744073709551616"), None);
        assert_eq!(parse_u64(b""), None);
        assert_eq!(parse_u64(b"-1"), None);
        assert_eq!(parse_u64(b"12a"), None);
        assert_eq!(parse_u64(b" 1"), None);
    }

    #[test]
    fn negative_zero_is_unsigned() {
        assert_eq!(parse_u64(b"-0"), Some(0));
        assert_eq!(parse_u64(b"-000"), Some(0));
        assert_eq!(parse_u64(b"-"), None);
        assert_eq!(parse_u64(b"--0"), None);
        assert_eq!(parse_i64(b"-0"), Some(0));
        assert_eq!(parse_i64(b"--0"), None);
        assert_eq!(from_slice::<u32>(b"-0").unwrap(), 0);
        assert!(from_slice::<u32>(b"-1").is_err());
    }

    #[test]
    fn signed() {
        assert_eq!(parse_i64(b"-42"), Some(-42));
        assert_eq!(parse_i64(b"42"), Some(42));
        assert_eq!(parse_i64(b"-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_i64(b"9223372036854775808"), None);
        assert_eq!(parse_i64(b"-"), None);
    }

    #[test]
    fn booleans() {
        assert_eq!(parse_bool(b"true"), Some(true));
        assert_eq!(parse_bool(b"false"), Some(false));
        assert_eq!(parse_bool(b"tru"), None);
        assert_eq!(parse_bool(b"TRUE"), None);
    }
}
