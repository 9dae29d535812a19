//! Utilities for parsing and formatting ISO 8601 timestamps.

mod error;

pub use self::error::{TimestampParseError, TimestampParseErrorType};

use crate::codec::{Buffer, Decode, DecodeError, Encode, EncodeError, Lexer, Token};
use chrono::{DateTime, Datelike, SubsecRound, Utc};
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Visitor},
    ser::{Serialize, Serializer},
};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

/// Minimum length of an ISO 8601 datetime without microseconds.
///
/// Example: `2021-01-01T01:01:01+00:00` (25 characters).
const MIN_TIMESTAMP_LENGTH: usize = 25;

/// Representation of a UTC timestamp.
///
/// Timestamps hold whole microseconds within the years 0000 to 9999, which
/// is exactly what the ISO 8601 form below can carry.
///
/// # Display
///
/// The [`Display`] implementation writes the ISO 8601 form Discord uses,
/// with microseconds only when they are non-zero. Use [`iso_8601`] to
/// control the microseconds.
///
/// [`iso_8601`]: Self::iso_8601
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse a timestamp from an ISO 8601 datetime string emitted by Discord.
    ///
    /// Discord emits two ISO 8601 formats: with microseconds
    /// (`2021-01-01T01:01:01.010000+00:00`) and without
    /// (`2021-01-01T01:01:01+00:00`). Both are accepted, as is any other UTC
    /// offset.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseErrorType::Format`] if the string is too short
    /// to be a datetime.
    ///
    /// Returns [`TimestampParseErrorType::Parsing`] if the parser rejects it.
    ///
    /// Returns [`TimestampParseErrorType::Range`] if the offset moves the
    /// datetime outside the years 0000 to 9999.
    pub fn parse(datetime: &str) -> Result<Self, TimestampParseError> {
        if datetime.len() < MIN_TIMESTAMP_LENGTH {
            return Err(TimestampParseError::FORMAT);
        }

        let parsed =
            DateTime::parse_from_rfc3339(datetime).map_err(TimestampParseError::parsing)?;

        Self::from_datetime(parsed.with_timezone(&Utc))
    }

    /// Wrap a datetime, dropping anything finer than a microsecond.
    ///
    /// Only four digit years can be written back out.
    fn from_datetime(datetime: DateTime<Utc>) -> Result<Self, TimestampParseError> {
        if !(0..=9999).contains(&datetime.year()) {
            return Err(TimestampParseError::RANGE);
        }

        Ok(Self(datetime.trunc_subsecs(6)))
    }

    /// Create a timestamp from a Unix timestamp with seconds precision.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseErrorType::Range`] if the value is outside
    /// the years 0000 to 9999.
    pub fn from_secs(unix_seconds: i64) -> Result<Self, TimestampParseError> {
        DateTime::from_timestamp(unix_seconds, 0)
            .ok_or(TimestampParseError::RANGE)
            .and_then(Self::from_datetime)
    }

    /// Create a timestamp from a Unix timestamp with microseconds precision.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseErrorType::Range`] if the value is outside
    /// the years 0000 to 9999.
    pub fn from_micros(unix_microseconds: i64) -> Result<Self, TimestampParseError> {
        DateTime::from_timestamp_micros(unix_microseconds)
            .ok_or(TimestampParseError::RANGE)
            .and_then(Self::from_datetime)
    }

    /// Total number of seconds within the timestamp.
    pub fn as_secs(self) -> i64 {
        self.0.timestamp()
    }

    /// Total number of microseconds within the timestamp.
    pub fn as_micros(self) -> i64 {
        self.0.timestamp_micros()
    }

    /// The timestamp as a [`chrono`] datetime.
    pub const fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }

    /// Create an ISO 8601 display formatter.
    pub const fn iso_8601(self) -> TimestampIso8601Display {
        TimestampIso8601Display {
            timestamp: self,
            with_microseconds: true,
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.iso_8601(), f)
    }
}

impl TryFrom<DateTime<Utc>> for Timestamp {
    type Error = TimestampParseError;

    fn try_from(datetime: DateTime<Utc>) -> Result<Self, Self::Error> {
        Self::from_datetime(datetime)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(timestamp: Timestamp) -> Self {
        timestamp.0
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&'_ str> for Timestamp {
    type Error = TimestampParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("an ISO 8601 datetime string")
            }

            fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
                Timestamp::parse(v).map_err(DeError::custom)
            }
        }

        deserializer.deserialize_any(TimestampVisitor)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.iso_8601())
    }
}

impl Decode for Timestamp {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        match token {
            Token::Null => Ok(()),
            Token::String => {
                let value = lexer.output_str()?;
                *self = Self::parse(value)
                    .map_err(|source| lexer.nested("timestamp", token, source))?;

                Ok(())
            }
            other => Err(lexer.type_mismatch("timestamp", other)),
        }
    }
}

impl Encode for Timestamp {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        buf.write_byte(b'"');
        buf.write_str(&self.iso_8601().to_string());
        buf.write_byte(b'"');

        Ok(())
    }
}

/// Display formatter returned by [`Timestamp::iso_8601`].
#[derive(Clone, Copy, Debug)]
pub struct TimestampIso8601Display {
    timestamp: Timestamp,
    with_microseconds: bool,
}

impl TimestampIso8601Display {
    /// Get the inner timestamp.
    pub const fn get(self) -> Timestamp {
        self.timestamp
    }

    /// Whether to write non-zero microseconds. Defaults to `true`.
    #[must_use]
    pub const fn with_microseconds(mut self, with_microseconds: bool) -> Self {
        self.with_microseconds = with_microseconds;

        self
    }
}

impl Display for TimestampIso8601Display {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let datetime = self.timestamp.0;
        Display::fmt(&datetime.format("%Y-%m-%dT%H:%M:%S"), f)?;

        let micros = datetime.timestamp_subsec_micros();

        if self.with_microseconds && micros != 0 {
            write!(f, ".{micros:06}")?;
        }

        f.write_str("+00:00")
    }
}

impl Serialize for TimestampIso8601Display {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
