//! Error returned when a value can't become a [`Timestamp`].
//!
//! [`Timestamp`]: super::Timestamp

use chrono::ParseError;
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Reason that a value couldn't be turned into a [`Timestamp`].
///
/// [`Timestamp`]: super::Timestamp
#[derive(Debug)]
pub struct TimestampParseError {
    kind: TimestampParseErrorType,
    /// RFC 3339 parser error, for [`TimestampParseErrorType::Parsing`].
    source: Option<ParseError>,
}

impl TimestampParseError {
    /// Input is shorter than the shortest datetime Discord sends.
    pub(crate) const FORMAT: Self = Self {
        kind: TimestampParseErrorType::Format,
        source: None,
    };

    /// Datetime falls outside the years an ISO 8601 string can carry.
    pub(crate) const RANGE: Self = Self {
        kind: TimestampParseErrorType::Range,
        source: None,
    };

    pub(crate) const fn parsing(source: ParseError) -> Self {
        Self {
            kind: TimestampParseErrorType::Parsing,
            source: Some(source),
        }
    }

    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &TimestampParseErrorType {
        &self.kind
    }

    /// The `chrono` error that rejected the input, if parsing got that far.
    ///
    /// Its [`kind`](ParseError::kind) tells apart a malformed field
    /// (`Invalid`), an out-of-range one (`OutOfRange`) and trailing input
    /// (`TooLong`).
    pub const fn parse_error(&self) -> Option<&ParseError> {
        self.source.as_ref()
    }

    /// Consume the error, returning the owned error type and the parser's
    /// error.
    #[must_use = "consuming the error into its parts has no effect if left unused"]
    pub fn into_parts(self) -> (TimestampParseErrorType, Option<ParseError>) {
        (self.kind, self.source)
    }
}

impl Display for TimestampParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.kind {
            TimestampParseErrorType::Format => f.write_str("value is too short to be a datetime"),
            TimestampParseErrorType::Parsing => {
                f.write_str("value is not an RFC 3339 datetime")?;

                match &self.source {
                    Some(source) => write!(f, ": {source}"),
                    None => Ok(()),
                }
            }
            TimestampParseErrorType::Range => {
                f.write_str("datetime is outside the years 0000 to 9999")
            }
        }
    }
}

impl Error for TimestampParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

/// Type of [`TimestampParseError`] that occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum TimestampParseErrorType {
    /// Input is too short to hold a date, a time and an offset.
    Format,
    /// `chrono`'s RFC 3339 parser rejected the input.
    Parsing,
    /// Datetime can't be written as a four digit year.
    Range,
}

#[cfg(test)]
mod tests {
    use super::{TimestampParseError, TimestampParseErrorType};
    use chrono::{format::ParseErrorKind, DateTime};
    use static_assertions::assert_impl_all;
    use std::{error::Error, fmt::Debug};

    assert_impl_all!(TimestampParseError: Debug, Error, Send, Sync);

    #[test]
    fn short_input() {
        let err = TimestampParseError::FORMAT;

        assert_eq!(err.to_string(), "value is too short to be a datetime");
        assert!(err.source().is_none());
        assert!(err.parse_error().is_none());
    }

    #[test]
    fn parser_error_is_kept() {
        let source =
            DateTime::parse_from_rfc3339("2021-01-01T01:01:01+00:00 and more").unwrap_err();
        let err = TimestampParseError::parsing(source);

        assert_eq!(
            err.parse_error().map(|source| source.kind()),
            Some(ParseErrorKind::TooLong)
        );
        assert!(err.source().is_some());
        assert!(err
            .to_string()
            .starts_with("value is not an RFC 3339 datetime: "));

        let (kind, source) = err.into_parts();
        assert_eq!(kind, TimestampParseErrorType::Parsing);
        assert!(source.is_some());
    }

    #[test]
    fn range() {
        assert_eq!(
            TimestampParseError::RANGE.to_string(),
            "datetime is outside the years 0000 to 9999"
        );
    }
}
