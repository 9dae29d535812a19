//! Codec implementations for scalars, containers and raw JSON values.

use super::{
    scalar, Buffer, Decode, DecodeError, DecodeErrorType, Encode, EncodeError, Lexer, Token,
};
use serde_json::Value;

impl Decode for bool {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        match token {
            Token::Null => Ok(()),
            Token::Bool => {
                *self = scalar::parse_bool(lexer.output())
                    .ok_or_else(|| lexer.malformed("bool", token))?;

                Ok(())
            }
            other => Err(lexer.type_mismatch("bool", other)),
        }
    }
}

impl Encode for bool {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        buf.write_str(if *self { "true" } else { "false" });

        Ok(())
    }

    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl Decode for String {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        match token {
            Token::Null => Ok(()),
            Token::String => {
                let value = lexer.output_str()?;
                self.clear();
                self.push_str(value);

                Ok(())
            }
            other => Err(lexer.type_mismatch("string", other)),
        }
    }
}

impl Encode for str {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        buf.write_json_string(self);

        Ok(())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for String {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        self.as_str().encode(buf)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! integer_codec {
    ($($ty:ty => $parse:ident, $write:ident, $wide:ty;)+) => {
        $(
            impl Decode for $ty {
                fn decode_into(
                    &mut self,
                    lexer: &mut Lexer<'_>,
                    token: Token,
                ) -> Result<(), DecodeError> {
                    match token {
                        Token::Null => Ok(()),
                        Token::Integer => {
                            *self = scalar::$parse(lexer.output())
                                .and_then(|value| <$ty>::try_from(value).ok())
                                .ok_or_else(|| lexer.malformed(stringify!($ty), token))?;

                            Ok(())
                        }
                        other => Err(lexer.type_mismatch(stringify!($ty), other)),
                    }
                }
            }

            impl Encode for $ty {
                fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
                    buf.$write(<$wide>::from(*self));

                    Ok(())
                }

                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )+
    };
}

integer_codec! {
    u8 => parse_u64, write_u64, u64;
    u16 => parse_u64, write_u64, u64;
    u32 => parse_u64, write_u64, u64;
    u64 => parse_u64, write_u64, u64;
    i32 => parse_i64, write_i64, i64;
    i64 => parse_i64, write_i64, i64;
}

/// Where the array loop is between elements.
#[derive(Clone, Copy)]
enum ArrayState {
    /// After `[`: an element or `]`.
    First,
    /// After an element: `,` or `]`.
    AfterElement,
    /// After `,`: an element or `]`.
    WantElement,
}

impl<T: Decode + Default> Decode for Vec<T> {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        match token {
            Token::Null => {
                self.clear();

                return Ok(());
            }
            Token::ArrayStart => self.clear(),
            other => return Err(lexer.type_mismatch("array", other)),
        }

        let mut state = ArrayState::First;

        loop {
            let token = lexer.scan();

            match (state, token) {
                (_, Token::Error) => return Err(lexer.fault_error()),
                (_, Token::ArrayEnd) => return Ok(()),
                (ArrayState::AfterElement, Token::Comma) => {
                    state = ArrayState::WantElement;
                }
                (ArrayState::AfterElement, other) => {
                    return Err(lexer.wrong_token(Token::Comma.name(), other));
                }
                (_, value) if value.is_value() => {
                    let mut element = T::default();
                    element.decode_into(lexer, value)?;
                    self.push(element);
                    state = ArrayState::AfterElement;
                }
                (_, other) => return Err(lexer.wrong_token("value", other)),
            }
        }
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        buf.write_byte(b'[');

        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                buf.write_byte(b',');
            }

            element.encode(buf)?;
        }

        buf.write_byte(b']');

        Ok(())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        self.as_slice().encode(buf)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Decode + Default> Decode for Option<T> {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        if token == Token::Null {
            *self = None;

            return Ok(());
        }

        let mut value = T::default();
        value.decode_into(lexer, token)?;
        *self = Some(value);

        Ok(())
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        match self {
            Some(value) => value.encode(buf),
            None => {
                buf.write_str("null");

                Ok(())
            }
        }
    }

    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T: Decode + ?Sized> Decode for Box<T> {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        (**self).decode_into(lexer, token)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        (**self).encode(buf)
    }

    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

/// Raw JSON is captured verbatim and handed to `serde_json`.
impl Decode for Value {
    fn decode_into(&mut self, lexer: &mut Lexer<'_>, token: Token) -> Result<(), DecodeError> {
        let offset = lexer.token_start();
        let raw = lexer.capture_value(token)?;

        *self = serde_json::from_slice(raw).map_err(|source| {
            DecodeError::new(DecodeErrorType::NestedDecode { codec: "serde_json" }, offset)
                .with_token(token)
                .with_output(raw)
                .with_source(source)
        })?;

        Ok(())
    }
}

impl Encode for Value {
    fn encode(&self, buf: &mut Buffer) -> Result<(), EncodeError> {
        serde_json::to_writer(buf, self)
            .map_err(|source| EncodeError::delegate("serde_json", source))
    }

    fn is_empty_value(&self) -> bool {
        self.is_null()
    }
}

#[cfg(test)]
mod tests {
    use crate::codec::{from_slice, to_vec, DecodeErrorType, LexerFault, Token};
    use serde_json::{json, Value};

    #[test]
    fn booleans() {
        assert!(from_slice::<bool>(b"true").unwrap());
        assert!(!from_slice::<bool>(b"null").unwrap());

        let err = from_slice::<bool>(b"1").unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::TypeMismatch {
                expected: "bool",
                found: Token::Integer,
            }
        );
    }

    #[test]
    fn strings() {
        assert_eq!(from_slice::<String>(br#""a\"b""#).unwrap(), "a\"b");
        assert_eq!(from_slice::<String>(b"null").unwrap(), "");

        let err = from_slice::<String>(b"false").unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorType::TypeMismatch { expected: "string", .. }));
    }

    #[test]
    fn invalid_utf8_string() {
        let err = from_slice::<String>(b"\"\xff\"").unwrap_err();

        assert_eq!(err.kind(), &DecodeErrorType::Lexer(LexerFault::InvalidUtf8));
    }

    #[test]
    fn integers_are_range_checked() {
        assert_eq!(from_slice::<u8>(b"255").unwrap(), 255);
        assert_eq!(from_slice::<i32>(b"-5").unwrap(), -5);

        let err = from_slice::<u8>(b"256").unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorType::MalformedScalar { expected: "u8" });
        assert_eq!(err.output(), Some("256"));

        let err = from_slice::<u32>(b"-1").unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorType::MalformedScalar { expected: "u32" });

        let err = from_slice::<u64>(b"1.5").unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::TypeMismatch {
                expected: "u64",
                found: Token::Double,
            }
        );
    }

    #[test]
    fn arrays() {
        assert_eq!(from_slice::<Vec<u32>>(b"[1, 2,3]").unwrap(), [1, 2, 3]);
        assert!(from_slice::<Vec<u32>>(b"[]").unwrap().is_empty());
        assert!(from_slice::<Vec<u32>>(b"null").unwrap().is_empty());
        assert_eq!(from_slice::<Vec<u32>>(b"[1,]").unwrap(), [1]);
    }

    #[test]
    fn array_separators() {
        for input in [&b"[,1]"[..], b"[1,,2]"] {
            let err = from_slice::<Vec<u32>>(input).unwrap_err();
            assert_eq!(
                err.kind(),
                &DecodeErrorType::StructuralToken {
                    expected: "value",
                    found: Token::Comma,
                }
            );
        }

        let err = from_slice::<Vec<u32>>(b"[1 2]").unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorType::StructuralToken {
                expected: "','",
                found: Token::Integer,
            }
        );

        let err = from_slice::<Vec<u32>>(b"[1").unwrap_err();
        assert!(matches!(err.kind(), DecodeErrorType::StructuralToken { found: Token::Eof, .. }));
    }

    #[test]
    fn options() {
        assert_eq!(from_slice::<Option<u32>>(b"null").unwrap(), None);
        assert_eq!(from_slice::<Option<u32>>(b"9").unwrap(), Some(9));
        assert_eq!(to_vec(&None::<u32>).unwrap(), b"null");
    }

    #[test]
    fn encode_scalars() {
        assert_eq!(to_vec(&vec![1_u8, 2]).unwrap(), b"[1,2]");
        assert_eq!(to_vec("x").unwrap(), br#""x""#);
        assert_eq!(to_vec(&-3_i64).unwrap(), b"-3");
        assert_eq!(to_vec(&Box::new(false)).unwrap(), b"false");
    }

    #[test]
    fn raw_values() {
        let value: Value = from_slice(br#"[{"type": 1, "components": []}]"#).unwrap();
        assert_eq!(value, json!([{"type": 1, "components": []}]));
        assert_eq!(to_vec(&value).unwrap(), br#"[{"components":[],"type":1}]"#);
    }
}
