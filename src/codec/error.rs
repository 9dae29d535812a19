//! Error types for decoding and encoding entities.

use super::Token;
use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

/// Longest captured output kept on an error, in bytes.
const MAX_OUTPUT_LENGTH: usize = 64;

/// Reason that a payload couldn't be decoded into an entity.
///
/// Carries the byte offset where decoding stopped and, where available, the
/// offending token and the literal bytes the lexer captured for it.
#[derive(Debug)]
pub struct DecodeError {
    /// Type of error that occurred.
    kind: DecodeErrorType,
    /// Byte offset into the input where the offending token starts.
    offset: usize,
    /// Token that triggered the error, if there is one.
    token: Option<Token>,
    /// Captured bytes of the offending token, lossily decoded.
    output: Option<String>,
    /// Source of the error, if there is any.
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl DecodeError {
    pub(crate) const fn new(kind: DecodeErrorType, offset: usize) -> Self {
        Self {
            kind,
            offset,
            token: None,
            output: None,
            source: None,
        }
    }

    pub(crate) const fn with_token(mut self, token: Token) -> Self {
        self.token = Some(token);
        self
    }

    pub(crate) fn with_output(mut self, output: &[u8]) -> Self {
        let end = output.len().min(MAX_OUTPUT_LENGTH);
        self.output = Some(String::from_utf8_lossy(&output[..end]).into_owned());
        self
    }

    pub(crate) fn with_source(mut self, source: impl Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &DecodeErrorType {
        &self.kind
    }

    /// Byte offset into the input where the offending token starts.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Token that triggered the error, if there is one.
    pub const fn token(&self) -> Option<Token> {
        self.token
    }

    /// Captured bytes of the offending token, if any were scanned.
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Consume the error, returning the source error if there is any.
    #[must_use = "consuming the error and retrieving the source has no effect if left unused"]
    pub fn into_source(self) -> Option<Box<dyn Error + Send + Sync>> {
        self.source
    }

    /// Consume the error, returning the owned error type and the source error.
    #[must_use = "consuming the error into its parts has no effect if left unused"]
    pub fn into_parts(self) -> (DecodeErrorType, Option<Box<dyn Error + Send + Sync>>) {
        (self.kind, self.source)
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            DecodeErrorType::StructuralToken { expected, found } => {
                write!(f, "wanted token {expected}, but got token {found}")?;
            }
            DecodeErrorType::TypeMismatch { expected, found } => {
                write!(f, "cannot decode {found} into a value of type {expected}")?;
            }
            DecodeErrorType::MalformedScalar { expected } => {
                write!(f, "captured bytes are not a valid {expected}")?;
            }
            DecodeErrorType::NestedDecode { codec } => {
                write!(f, "{codec} codec rejected the value")?;
            }
            DecodeErrorType::Lexer(fault) => Display::fmt(fault, f)?,
        }

        write!(f, " at byte {}", self.offset)?;

        if let Some(output) = &self.output {
            write!(f, " (output: `{output}`)")?;
        }

        Ok(())
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn Error + 'static))
    }
}

/// Type of [`DecodeError`] that occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum DecodeErrorType {
    /// A token did not match the grammar position, such as a missing colon
    /// or bracket, or trailing data after the top-level value.
    StructuralToken {
        /// What the grammar wanted at this position.
        expected: &'static str,
        /// Token that was scanned instead.
        found: Token,
    },
    /// Token kind is incompatible with the field's declared type.
    TypeMismatch {
        /// Declared type of the field.
        expected: &'static str,
        /// Token that was scanned.
        found: Token,
    },
    /// The captured bytes failed a scalar parse.
    MalformedScalar {
        /// Scalar type the bytes were parsed as.
        expected: &'static str,
    },
    /// An external primitive codec rejected the captured value; the
    /// rejection is the error's source.
    NestedDecode {
        /// Name of the delegated codec.
        codec: &'static str,
    },
    /// The tokenizer could not continue.
    Lexer(LexerFault),
}

/// Reason the [`Lexer`](super::Lexer) stopped producing tokens.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum LexerFault {
    /// A byte that cannot start a token.
    UnexpectedByte(u8),
    /// Input ended in the middle of a token.
    UnexpectedEof,
    /// A string was not closed before the end of input.
    UnterminatedString,
    /// A backslash escape or `\u` sequence was invalid.
    InvalidEscape,
    /// An unescaped control character inside a string.
    ControlCharacter,
    /// String contents were not valid UTF-8.
    InvalidUtf8,
    /// A bareword that is not `true`, `false` or `null`.
    InvalidLiteral,
    /// A number that does not follow the JSON number grammar.
    InvalidNumber,
}

impl LexerFault {
    /// Whether the fault concerns the bytes of a scalar rather than the
    /// byte stream itself.
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::InvalidLiteral | Self::InvalidNumber)
    }
}

impl Display for LexerFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::UnexpectedByte(byte) => {
                write!(f, "unexpected byte {:?}", char::from(*byte))
            }
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
            Self::UnterminatedString => f.write_str("unterminated string"),
            Self::InvalidEscape => f.write_str("invalid escape sequence"),
            Self::ControlCharacter => f.write_str("control character in string"),
            Self::InvalidUtf8 => f.write_str("invalid utf-8 in string"),
            Self::InvalidLiteral => f.write_str("invalid literal"),
            Self::InvalidNumber => f.write_str("invalid number"),
        }
    }
}

impl Error for LexerFault {}

/// Reason that an entity couldn't be encoded.
///
/// Built-in encoders never fail; this is raised only by values delegated to
/// an external codec.
#[derive(Debug)]
pub struct EncodeError {
    /// Type of error that occurred.
    kind: EncodeErrorType,
    /// Source of the error, if there is any.
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl EncodeError {
    pub(crate) fn delegate(
        codec: &'static str,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind: EncodeErrorType::Delegate { codec },
            source: Some(Box::new(source)),
        }
    }

    /// Immutable reference to the type of error that occurred.
    #[must_use = "retrieving the type has no effect if left unused"]
    pub const fn kind(&self) -> &EncodeErrorType {
        &self.kind
    }

    /// Consume the error, returning the source error if there is any.
    #[must_use = "consuming the error and retrieving the source has no effect if left unused"]
    pub fn into_source(self) -> Option<Box<dyn Error + Send + Sync>> {
        self.source
    }
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.kind {
            EncodeErrorType::Delegate { codec } => {
                write!(f, "{codec} codec failed to encode the value")
            }
        }
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| &**source as &(dyn Error + 'static))
    }
}

/// Type of [`EncodeError`] that occurred.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum EncodeErrorType {
    /// A value delegated to an external codec failed to serialize.
    Delegate {
        /// Name of the delegated codec.
        codec: &'static str,
    },
}
