//! Streaming JSON codec for API entities.
//!
//! Decoding drives a [`Lexer`] over the payload and writes every scalar
//! straight into its destination field; no intermediate value tree is built.
//! Each entity declares a `'static` table of [`WireKey`]s in field order and
//! a decode handler and encode policy per field, usually through
//! [`entity_codec!`](crate::entity_codec).
//!
//! ```
//! use discord_codec::{codec::Entity, Emoji};
//!
//! let emoji = Emoji::from_json(r#"{"name":"🔥","managed":false}"#.as_bytes())?;
//! assert_eq!(emoji.name, "🔥");
//! assert_eq!(
//!     emoji.to_json()?,
//!     r#"{"id":null,"name":"🔥","user":null}"#.as_bytes()
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod buffer;
mod config;
mod error;
mod impls;
mod keys;
mod lexer;
mod scalar;
mod state;
mod token;

pub use self::{
    buffer::{Buffer, ObjectWriter},
    config::{CodecConfig, KeyMatching, KeyMatchingParseError, KEY_MATCHING_ENV},
    error::{DecodeError, DecodeErrorType, EncodeError, EncodeErrorType, LexerFault},
    keys::{resolve, WireKey},
    lexer::Lexer,
    scalar::{parse_bool, parse_i64, parse_u64},
    state::{decode_entity, decode_nested, encode_entity, ParseState},
    token::Token,
};

use tracing::debug;

/// A value that can be decoded from the token stream in place.
pub trait Decode {
    /// Decode the value that begins with the already scanned `token` into
    /// `self`.
    ///
    /// A `null` token leaves `self` unchanged unless the type gives `null` a
    /// meaning of its own, as [`Option`] does.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the token or its captured bytes cannot
    /// be decoded as this type.
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError>;
}

/// A value that can be written as JSON.
pub trait Encode {
    /// Append the JSON representation of `self` to `buf`.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if a delegated codec fails.
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError>;

    /// Whether the value is its type's zero or empty value, which
    /// [`ObjectWriter::omit_empty`] leaves out of the output.
    fn is_empty_value(&self) -> bool {
        false
    }
}

/// A JSON object with a fixed set of known keys.
pub trait Entity: Decode + Encode + Default {
    /// Name used in errors and logs.
    const NAME: &'static str;

    /// Wire keys of the entity's fields, in declaration order.
    const KEYS: &'static [WireKey];

    /// Decode the value of the field at `index` into `KEYS`.
    ///
    /// # Errors
    ///
    /// Returns the field handler's error.
    fn decode_field(
        &mut self,
        index: usize,
        lexer: &mut Lexer<'_>,
        token: Token,
    ) -> Result<(), DecodeError>;

    /// Write every field according to its omission policy.
    ///
    /// # Errors
    ///
    /// Returns the first field encoder's error.
    fn encode_fields(&self, object: &mut ObjectWriter<'_>) -> Result<(), EncodeError>;

    /// Decode a payload whose top-level value is one object.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the payload is not exactly one valid
    /// object of this entity. No partially decoded entity is returned.
    fn from_json(input: &[u8]) -> Result<Self, DecodeError> {
        Self::from_json_with(input, CodecConfig::default())
    }

    /// Decode a payload with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`from_json`](Self::from_json).
    fn from_json_with(input: &[u8], config: CodecConfig) -> Result<Self, DecodeError> {
        let mut lexer = Lexer::with_config(input, config);
        let mut entity = Self::default();

        decode_entity(&mut entity, &mut lexer, ParseState::MapStart)
            .and_then(|()| lexer.finish())
            .inspect_err(|source| {
                debug!(entity = Self::NAME, error = %source, "failed to decode payload");
            })?;

        Ok(entity)
    }

    /// Encode the entity as a single JSON object.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if a delegated field codec fails.
    fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        to_vec(self)
    }
}

/// Decode any [`Decode`] value from a complete payload.
///
/// Unlike [`Entity::from_json`] this accepts any top-level value the type
/// accepts, including `null`.
///
/// # Errors
///
/// Returns a [`DecodeError`] if the payload does not decode as `T` or has
/// trailing data.
pub fn from_slice<T: Decode + Default>(input: &[u8]) -> Result<T, DecodeError> {
    from_slice_with(input, CodecConfig::default())
}

/// Decode any [`Decode`] value with the given configuration.
///
/// # Errors
///
/// Returns the same errors as [`from_slice`].
pub fn from_slice_with<T: Decode + Default>(
    input: &[u8],
    config: CodecConfig,
) -> Result<T, DecodeError> {
    let mut lexer = Lexer::with_config(input, config);
    let token = lexer.scan();

    if token == Token::Error {
        return Err(lexer.fault_error());
    }

    if !token.is_value() {
        return Err(lexer.wrong_token("value", token));
    }

    let mut value = T::default();
    value.decode_into(&mut lexer, token)?;
    lexer.finish()?;

    Ok(value)
}

/// Encode any [`Encode`] value.
///
/// # Errors
///
/// Returns an [`EncodeError`] if a delegated codec fails.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut buf = Buffer::new();
    value.encode(&mut buf)?;

    Ok(buf.into_vec())
}

/// Implement [`Entity`], [`Decode`] and [`Encode`] for a struct from a list
/// of `field: "wire_key" => policy` entries in declaration order.
///
/// `policy` is either `always` or `omit_empty`, naming the
/// [`ObjectWriter`] method used to write the field.
///
/// ```
/// use discord_codec::{codec::Entity, entity_codec};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Ping {
///     nonce: String,
///     late: bool,
/// }
///
/// entity_codec!(Ping {
///     nonce: "nonce" => always,
///     late: "late" => omit_empty,
/// });
///
/// let ping = Ping::from_json(br#"{"Nonce":"a"}"#)?;
/// assert_eq!(ping.nonce, "a");
/// assert_eq!(ping.to_json()?, br#"{"nonce":"a"}"#);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[macro_export]
macro_rules! entity_codec {
    ($entity:ident { $($field:ident: $key:literal => $policy:ident),+ $(,)? }) => {
        impl $crate::codec::Entity for $entity {
            const NAME: &'static str = stringify!($entity);

            const KEYS: &'static [$crate::codec::WireKey] =
                &[$($crate::codec::WireKey::new($key)),+];

            #[allow(unused_assignments)]
            fn decode_field(
                &mut self,
                index: usize,
                lexer: &mut $crate::codec::Lexer<'_>,
                token: $crate::codec::Token,
            ) -> ::std::result::Result<(), $crate::codec::DecodeError> {
                let mut field = 0_usize;

                $(
                    if index == field {
                        return $crate::codec::Decode::decode_into(&mut self.$field, lexer, token);
                    }

                    field += 1;
                )+

                lexer.skip_value(token)
            }

            fn encode_fields(
                &self,
                object: &mut $crate::codec::ObjectWriter<'_>,
            ) -> ::std::result::Result<(), $crate::codec::EncodeError> {
                $(object.$policy($key, &self.$field)?;)+

                Ok(())
            }
        }

        impl $crate::codec::Decode for $entity {
            fn decode_into(
                &mut self,
                lexer: &mut $crate::codec::Lexer<'_>,
                token: $crate::codec::Token,
            ) -> ::std::result::Result<(), $crate::codec::DecodeError> {
                $crate::codec::decode_nested(self, lexer, token)
            }
        }

        impl $crate::codec::Encode for $entity {
            fn encode(
                &self,
                buf: &mut $crate::codec::Buffer,
            ) -> ::std::result::Result<(), $crate::codec::EncodeError> {
                $crate::codec::encode_entity(self, buf)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::{from_slice, from_slice_with, to_vec, CodecConfig, DecodeErrorType, KeyMatching};
    use crate::codec::{Entity, Token};

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        label: String,
    }

    crate::entity_codec!(Inner {
        label: "label" => always,
    });

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        count: u32,
        inner: Option<Inner>,
        tags: Vec<String>,
        pinned: bool,
    }

    crate::entity_codec!(Outer {
        count: "count" => always,
        inner: "inner" => omit_empty,
        tags: "tags" => omit_empty,
        pinned: "pinned" => omit_empty,
    });

    #[test]
    fn decodes_nested_entities() {
        let outer = Outer::from_json(
            br#"{"count": 3, "inner": {"label": "x", "extra": [1, {"a": null}]}, "tags": ["a", "b"]}"#,
        )
        .unwrap();

        assert_eq!(
            outer,
            Outer {
                count: 3,
                inner: Some(Inner {
                    label: "x".to_owned()
                }),
                tags: vec!["a".to_owned(), "b".to_owned()],
                pinned: false,
            }
        );
    }

    #[test]
    fn encodes_in_declaration_order() {
        let outer = Outer {
            count: 0,
            inner: Some(Inner::default()),
            tags: Vec::new(),
            pinned: true,
        };

        assert_eq!(
            outer.to_json().unwrap(),
            br#"{"count":0,"inner":{"label":""},"pinned":true}"#
        );
    }

    #[test]
    fn empty_object_and_trailing_comma() {
        assert_eq!(Outer::from_json(b"{}").unwrap(), Outer::default());
        assert_eq!(Outer::from_json(br#"{"count":1,}"#).unwrap().count, 1);
    }

    #[test]
    fn top_level_must_be_object() {
        for input in [&b"null"[..], b"[]", b"1", b""] {
            let err = Outer::from_json(input).unwrap_err();
            assert!(
                matches!(err.kind(), DecodeErrorType::StructuralToken { expected: "'{'", .. }),
                "{err}"
            );
        }
    }

    #[test]
    fn trailing_data_is_rejected() {
        let err = Outer::from_json(b"{} {}").unwrap_err();

        assert_eq!(
            err.kind(),
            &DecodeErrorType::StructuralToken {
                expected: "end of input",
                found: Token::ObjectStart,
            }
        );
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn nested_type_mismatch() {
        let err = Outer::from_json(br#"{"inner": "x"}"#).unwrap_err();

        assert_eq!(
            err.kind(),
            &DecodeErrorType::TypeMismatch {
                expected: "Inner",
                found: Token::String,
            }
        );
    }

    #[test]
    fn exact_key_matching() {
        let config = CodecConfig {
            key_matching: KeyMatching::Exact,
        };
        let outer = Outer::from_json_with(br#"{"COUNT": 4, "count": 2}"#, config).unwrap();

        assert_eq!(outer.count, 2);
    }

    #[test]
    fn generic_entry_points() {
        let tags: Vec<String> = from_slice(br#"["x"]"#).unwrap();
        assert_eq!(tags, ["x"]);

        let inner: Option<Inner> = from_slice(b" null ").unwrap();
        assert!(inner.is_none());

        let count: u32 = from_slice_with(b"7", CodecConfig::default()).unwrap();
        assert_eq!(count, 7);

        assert_eq!(to_vec(&tags).unwrap(), br#"["x"]"#);
        assert!(from_slice::<u32>(b"]").is_err());
    }
}
