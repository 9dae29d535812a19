//! Utilities shared by the entity types.

pub mod datetime;

pub use self::datetime::Timestamp;

/// Base URL of Discord's CDN.
pub const CDN_URL: &str = "https://cdn.discordapp.com";

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_false(value: &bool) -> bool {
    !value
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_zero_u32(value: &u32) -> bool {
    *value == 0
}

#[allow(clippy::trivially_copy_pass_by_ref)]
pub(crate) fn is_zero_u64(value: &u64) -> bool {
    *value == 0
}

/// Implement the codec for enums that travel as a JSON integer in `0..=255`.
///
/// The enum must implement `TryFrom<u8>` and `u8: From<Self>`. Open enums
/// with an `Unknown(u8)` variant implement `From<u8>` and therefore never
/// fail; closed enums reject unknown values as a malformed scalar.
macro_rules! value_codec {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(
            impl $crate::codec::Decode for $ty {
                fn decode_into(
                    &mut self,
                    lexer: &mut $crate::codec::Lexer<'_>,
                    token: $crate::codec::Token,
                ) -> Result<(), $crate::codec::DecodeError> {
                    match token {
                        $crate::codec::Token::Null => Ok(()),
                        $crate::codec::Token::Integer => {
                            *self = $crate::codec::parse_u64(lexer.output())
                                .and_then(|value| u8::try_from(value).ok())
                                .and_then(|value| <$ty>::try_from(value).ok())
                                .ok_or_else(|| lexer.malformed($name, token))?;

                            Ok(())
                        }
                        other => Err(lexer.type_mismatch($name, other)),
                    }
                }
            }

            impl $crate::codec::Encode for $ty {
                fn encode(
                    &self,
                    buf: &mut $crate::codec::Buffer,
                ) -> Result<(), $crate::codec::EncodeError> {
                    buf.write_u64(u64::from(u8::from(*self)));

                    Ok(())
                }

                fn is_empty_value(&self) -> bool {
                    u8::from(*self) == 0
                }
            }
        )+
    };
}

pub(crate) use value_codec;
