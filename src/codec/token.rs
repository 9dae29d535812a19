//! Lexical units produced by the [`Lexer`](super::Lexer).

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A primitive JSON token.
///
/// Scalar tokens (`String`, `Integer`, `Double`, `Bool`, `Null`) carry no
/// data themselves; their bytes are available from
/// [`Lexer::output`](super::Lexer::output) until the next scan.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Token {
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// A string; the output holds the unescaped contents.
    String,
    /// A number without fraction or exponent.
    Integer,
    /// A number with a fraction or exponent.
    Double,
    /// `true` or `false`.
    Bool,
    /// `null`
    Null,
    /// End of input.
    Eof,
    /// The lexer could not continue; see [`Lexer::fault`](super::Lexer::fault).
    Error,
}

impl Token {
    /// Whether the token can begin a value.
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::ObjectStart
                | Self::ArrayStart
                | Self::String
                | Self::Integer
                | Self::Double
                | Self::Bool
                | Self::Null
        )
    }

    /// Whether the token is a complete value on its own.
    pub const fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::String | Self::Integer | Self::Double | Self::Bool | Self::Null
        )
    }

    /// Name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ObjectStart => "'{'",
            Self::ObjectEnd => "'}'",
            Self::ArrayStart => "'['",
            Self::ArrayEnd => "']'",
            Self::Colon => "':'",
            Self::Comma => "','",
            Self::String => "string",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Bool => "bool",
            Self::Null => "null",
            Self::Eof => "end of input",
            Self::Error => "error",
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::Token;

    #[test]
    fn value_tokens() {
        assert!(Token::ObjectStart.is_value());
        assert!(Token::Null.is_value());
        assert!(!Token::Comma.is_value());
        assert!(!Token::ObjectEnd.is_value());
        assert!(!Token::Eof.is_value());
    }

    #[test]
    fn scalars_exclude_containers() {
        assert!(Token::Bool.is_scalar());
        assert!(!Token::ArrayStart.is_scalar());
    }

    #[test]
    fn display() {
        assert_eq!(Token::ObjectStart.to_string(), "'{'");
        assert_eq!(Token::Eof.to_string(), "end of input");
    }
}
