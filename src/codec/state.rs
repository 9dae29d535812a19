//! The per-entity decode state machine and the generic encode driver.

use super::{keys, Buffer, DecodeError, EncodeError, Entity, Lexer, Token};
use tracing::trace;

/// Position of the decoder within one JSON object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseState {
    /// Before the opening `{`.
    MapStart,
    /// After `{` or `,`: a key or `}`.
    WantKey,
    /// After a key.
    WantColon,
    /// After a colon.
    WantValue,
    /// After a value: `,` or `}`.
    AfterValue,
}

/// Run the state machine for `entity` starting in `state`.
///
/// Known keys dispatch to [`Entity::decode_field`]; unknown keys have their
/// value skipped. Returns once the object's closing `}` has been consumed.
///
/// # Errors
///
/// Returns the first structural, type, scalar or lexer error encountered.
/// The entity may be partially populated when an error is returned and must
/// be discarded.
pub fn decode_entity<E: Entity>(
    entity: &mut E,
    lexer: &mut Lexer<'_>,
    mut state: ParseState,
) -> Result<(), DecodeError> {
    let mut current = None;

    loop {
        let token = lexer.scan();

        if token == Token::Error {
            return Err(lexer.fault_error());
        }

        state = match state {
            ParseState::MapStart => {
                if token != Token::ObjectStart {
                    return Err(lexer.wrong_token(Token::ObjectStart.name(), token));
                }

                ParseState::WantKey
            }
            ParseState::WantKey => match token {
                Token::ObjectEnd => return Ok(()),
                Token::String => {
                    let key = lexer.output();
                    current = keys::resolve(E::KEYS, key, lexer.config().key_matching);

                    if current.is_none() {
                        trace!(
                            entity = E::NAME,
                            key = %String::from_utf8_lossy(key),
                            "skipping unknown field",
                        );
                    }

                    ParseState::WantColon
                }
                other => return Err(lexer.wrong_token(Token::String.name(), other)),
            },
            ParseState::WantColon => {
                if token != Token::Colon {
                    return Err(lexer.wrong_token(Token::Colon.name(), token));
                }

                ParseState::WantValue
            }
            ParseState::WantValue => {
                if !token.is_value() {
                    return Err(lexer.wrong_token("value", token));
                }

                match current {
                    Some(index) => entity.decode_field(index, lexer, token)?,
                    None => lexer.skip_value(token)?,
                }

                ParseState::AfterValue
            }
            ParseState::AfterValue => match token {
                Token::Comma => ParseState::WantKey,
                Token::ObjectEnd => return Ok(()),
                other => return Err(lexer.wrong_token(Token::Comma.name(), other)),
            },
        };
    }
}

/// Decode a nested entity whose first token has already been scanned.
///
/// `null` leaves the entity untouched; an object runs the state machine from
/// [`ParseState::WantKey`].
///
/// # Errors
///
/// Returns a type mismatch for any other token, or the nested decoder's own
/// error unchanged.
pub fn decode_nested<E: Entity>(
    entity: &mut E,
    lexer: &mut Lexer<'_>,
    token: Token,
) -> Result<(), DecodeError> {
    match token {
        Token::Null => Ok(()),
        Token::ObjectStart => decode_entity(entity, lexer, ParseState::WantKey),
        other => Err(lexer.type_mismatch(E::NAME, other)),
    }
}

/// Encode an entity as one JSON object in field declaration order.
///
/// # Errors
///
/// Propagates any field encoder's error unchanged.
pub fn encode_entity<E: Entity>(entity: &E, buf: &mut Buffer) -> Result<(), EncodeError> {
    let mut object = buf.begin_object();
    entity.encode_fields(&mut object)?;
    object.finish();

    Ok(())
}
