//! Snowflake IDs typed by the kind of resource they identify.
//!
//! Discord sends IDs as JSON strings so that clients with 53-bit numbers
//! don't lose precision. Both the quoted and the bare integer forms are
//! accepted. An ID of `0` is the unset value: it is encoded as `null` and is
//! treated as empty by omission policies.

pub mod marker;

use crate::codec::{parse_u64, Buffer, Decode, DecodeError, Encode, EncodeError, Lexer, Token};
use chrono::{DateTime, Utc};
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Unexpected, Visitor},
    ser::{Serialize, Serializer},
};
use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// Milliseconds between the Unix epoch and the first second of 2015.
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// ID of a resource, such as the ID of a [channel] or [user].
///
/// [channel]: marker::ChannelMarker
/// [user]: marker::UserMarker
pub struct Id<T> {
    phantom: PhantomData<fn(T) -> T>,
    value: u64,
}

impl<T> Id<T> {
    /// The unset ID.
    pub const UNSET: Self = Self::new(0);

    /// Create an ID from a raw snowflake.
    pub const fn new(value: u64) -> Self {
        Self {
            phantom: PhantomData,
            value,
        }
    }

    /// Raw snowflake.
    pub const fn get(self) -> u64 {
        self.value
    }

    /// Whether the ID holds a snowflake.
    pub const fn is_set(self) -> bool {
        self.value != 0
    }

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(crate) const fn is_unset(&self) -> bool {
        self.value == 0
    }

    /// Cast an ID from one type to another.
    pub const fn cast<New>(self) -> Id<New> {
        Id::new(self.value)
    }

    /// Milliseconds since the Unix epoch at which the resource was created,
    /// or `None` for the unset ID.
    pub const fn timestamp_ms(self) -> Option<u64> {
        if self.value == 0 {
            return None;
        }

        Some((self.value >> 22) + DISCORD_EPOCH_MS)
    }

    /// When the resource was created, or `None` for the unset ID.
    pub fn created_at(self) -> Option<DateTime<Utc>> {
        let ms = i64::try_from(self.timestamp_ms()?).ok()?;

        DateTime::from_timestamp_millis(ms)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("Id")?;
        let type_name = std::any::type_name::<T>();

        if let Some(position) = type_name.rfind("::") {
            if let Some(slice) = type_name.get(position + 2..) {
                f.write_str("<")?;
                f.write_str(slice)?;
                f.write_str(">")?;
            }
        }

        f.write_str("(")?;
        Debug::fmt(&self.value, f)?;

        f.write_str(")")
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::UNSET
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.value, f)
    }
}

impl<T> Eq for Id<T> {}

impl<T> From<u64> for Id<T> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<T> From<Id<T>> for u64 {
    fn from(id: Id<T>) -> Self {
        id.get()
    }
}

impl<T> Hash for Id<T> {
    fn hash<U: Hasher>(&self, state: &mut U) {
        state.write_u64(self.value);
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> PartialEq<u64> for Id<T> {
    fn eq(&self, other: &u64) -> bool {
        self.value == *other
    }
}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

impl<T> Decode for Id<T> {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        match token {
            Token::Null => Ok(()),
            Token::String | Token::Integer => {
                self.value = parse_u64(lexer.output())
                    .ok_or_else(|| lexer.malformed("snowflake", token))?;

                Ok(())
            }
            other => Err(lexer.type_mismatch("snowflake", other)),
        }
    }
}

impl<T> Encode for Id<T> {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        if self.value == 0 {
            buf.write_str("null");
        } else {
            buf.write_byte(b'"');
            buf.write_u64(self.value);
            buf.write_byte(b'"');
        }

        Ok(())
    }

    fn is_empty_value(&self) -> bool {
        self.value == 0
    }
}

// ---------------------------------------------------------------------------
// serde
// ---------------------------------------------------------------------------

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor<T> {
            phantom: PhantomData<T>,
        }

        impl<'de, T> Visitor<'de> for IdVisitor<T> {
            type Value = Id<T>;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("a discord snowflake")
            }

            fn visit_u64<E: DeError>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Id::new(value))
            }

            fn visit_i64<E: DeError>(self, value: i64) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map(Id::new)
                    .map_err(|_| DeError::invalid_value(Unexpected::Signed(value), &self))
            }

            fn visit_str<E: DeError>(self, value: &str) -> Result<Self::Value, E> {
                parse_u64(value.as_bytes())
                    .map(Id::new)
                    .ok_or_else(|| DeError::invalid_value(Unexpected::Str(value), &self))
            }

            fn visit_none<E: DeError>(self) -> Result<Self::Value, E> {
                Ok(Id::UNSET)
            }

            fn visit_unit<E: DeError>(self) -> Result<Self::Value, E> {
                Ok(Id::UNSET)
            }

            fn visit_some<D: Deserializer<'de>>(
                self,
                deserializer: D,
            ) -> Result<Self::Value, D::Error> {
                deserializer.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(IdVisitor {
            phantom: PhantomData,
        })
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.value == 0 {
            serializer.serialize_none()
        } else {
            serializer.collect_str(&self.value)
        }
    }
}
