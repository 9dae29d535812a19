//! Byte-level JSON tokenizer.
//!
//! The lexer never builds a value tree. Each [`scan`](Lexer::scan) yields one
//! [`Token`]; for scalars, [`output`](Lexer::output) exposes the captured
//! bytes so typed handlers can decode them straight into their destination.
//! String contents without escapes are borrowed from the input; escaped
//! strings are unescaped into a scratch buffer owned by the lexer, which is
//! dropped with it at the end of the decode call.

use super::{
    error::{DecodeError, DecodeErrorType, LexerFault},
    CodecConfig, Token,
};

/// Where the captured bytes of the current token live.
#[derive(Clone, Copy, Debug)]
enum Capture {
    /// Structural token, end of input.
    None,
    /// A range of the input.
    Input { start: usize, end: usize },
    /// The scratch buffer.
    Scratch,
}

/// Grammar position inside one container being skipped.
#[derive(Clone, Copy, Debug)]
enum Skip {
    /// After `{` or `,` in an object.
    Key,
    /// After a member's key.
    Colon,
    /// After a member's colon.
    Member,
    /// After a member's value.
    AfterMember,
    /// After `[` or `,` in an array.
    Element,
    /// After an array element.
    AfterElement,
}

impl Skip {
    const fn after_value(self) -> Self {
        match self {
            Self::Element | Self::AfterElement => Self::AfterElement,
            _ => Self::AfterMember,
        }
    }

    const fn expected(self) -> &'static str {
        match self {
            Self::Key => Token::String.name(),
            Self::Colon => Token::Colon.name(),
            Self::Member | Self::Element => "value",
            Self::AfterMember | Self::AfterElement => Token::Comma.name(),
        }
    }
}

/// Streaming tokenizer over an in-memory JSON payload.
#[derive(Debug)]
pub struct Lexer<'a> {
    input: &'a [u8],
    /// Offset of the next unread byte.
    pos: usize,
    /// Offset where the most recently scanned token starts.
    start: usize,
    capture: Capture,
    scratch: Vec<u8>,
    fault: Option<LexerFault>,
    config: CodecConfig,
}

impl<'a> Lexer<'a> {
    /// Create a lexer with the default configuration.
    pub fn new(input: &'a [u8]) -> Self {
        Self::with_config(input, CodecConfig::default())
    }

    /// Create a lexer with the given configuration.
    pub fn with_config(input: &'a [u8], config: CodecConfig) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            capture: Capture::None,
            scratch: Vec::new(),
            fault: None,
            config,
        }
    }

    /// Configuration the lexer was created with.
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Offset where the most recently scanned token starts.
    pub const fn token_start(&self) -> usize {
        self.start
    }

    /// Offset of the next unread byte.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Fault recorded by the last scan that returned [`Token::Error`].
    pub const fn fault(&self) -> Option<LexerFault> {
        self.fault
    }

    /// Captured bytes of the most recently scanned token.
    ///
    /// Strings yield their unescaped contents without quotes; numbers and
    /// literals yield their bytes verbatim; structural tokens yield nothing.
    pub fn output(&self) -> &[u8] {
        match self.capture {
            Capture::None => &[],
            Capture::Input { start, end } => &self.input[start..end],
            Capture::Scratch => &self.scratch,
        }
    }

    /// Captured bytes of the current token as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns a [`LexerFault::InvalidUtf8`] error if the bytes are not
    /// valid UTF-8.
    pub fn output_str(&self) -> Result<&str, DecodeError> {
        std::str::from_utf8(self.output()).map_err(|_| {
            DecodeError::new(DecodeErrorType::Lexer(LexerFault::InvalidUtf8), self.start)
                .with_token(Token::String)
        })
    }

    /// Scan the next token.
    ///
    /// Once a fault has been recorded every further scan returns
    /// [`Token::Error`].
    pub fn scan(&mut self) -> Token {
        if self.fault.is_some() {
            return Token::Error;
        }

        self.skip_whitespace();
        self.start = self.pos;
        self.capture = Capture::None;

        let Some(&byte) = self.input.get(self.pos) else {
            return Token::Eof;
        };

        match byte {
            b'{' => self.punctuation(Token::ObjectStart),
            b'}' => self.punctuation(Token::ObjectEnd),
            b'[' => self.punctuation(Token::ArrayStart),
            b']' => self.punctuation(Token::ArrayEnd),
            b':' => self.punctuation(Token::Colon),
            b',' => self.punctuation(Token::Comma),
            b'"' => self.lex_string(),
            b'-' | b'0'..=b'9' => self.lex_number(),
            b'a'..=b'z' | b'A'..=b'Z' => self.lex_literal(),
            other => self.fail(LexerFault::UnexpectedByte(other), self.pos + 1),
        }
    }

    /// Consume and discard the value that begins with `token`, including any
    /// nested objects and arrays.
    ///
    /// Nothing is decoded, but the skipped bytes must still follow the JSON
    /// grammar. Trailing commas are tolerated as they are everywhere else.
    ///
    /// # Errors
    ///
    /// Returns an error if `token` cannot begin a value, if a token is out of
    /// place inside a container, or if the lexer faults.
    pub fn skip_value(&mut self, token: Token) -> Result<(), DecodeError> {
        let mut open = match token {
            Token::ObjectStart => vec![Skip::Key],
            Token::ArrayStart => vec![Skip::Element],
            Token::Error => return Err(self.fault_error()),
            scalar if scalar.is_scalar() => return Ok(()),
            other => return Err(self.wrong_token("value", other)),
        };

        while let Some(state) = open.last_mut() {
            let token = self.scan();

            match (*state, token) {
                (_, Token::Error) => return Err(self.fault_error()),
                (Skip::Key | Skip::AfterMember, Token::ObjectEnd)
                | (Skip::Element | Skip::AfterElement, Token::ArrayEnd) => {
                    open.pop();
                }
                (Skip::Key, Token::String) => *state = Skip::Colon,
                (Skip::Colon, Token::Colon) => *state = Skip::Member,
                (Skip::AfterMember, Token::Comma) => *state = Skip::Key,
                (Skip::AfterElement, Token::Comma) => *state = Skip::Element,
                (Skip::Member | Skip::Element, value) if value.is_value() => {
                    *state = state.after_value();

                    match value {
                        Token::ObjectStart => open.push(Skip::Key),
                        Token::ArrayStart => open.push(Skip::Element),
                        _ => {}
                    }
                }
                (current, found) => return Err(self.wrong_token(current.expected(), found)),
            }
        }

        Ok(())
    }

    /// Consume the value that begins with `token` and return its raw bytes.
    ///
    /// Must be called directly after `token` was scanned.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`skip_value`](Self::skip_value).
    pub fn capture_value(&mut self, token: Token) -> Result<&'a [u8], DecodeError> {
        let start = self.start;
        self.skip_value(token)?;

        Ok(&self.input[start..self.pos])
    }

    /// Require that nothing but whitespace remains.
    ///
    /// # Errors
    ///
    /// Returns a structural error naming the first trailing token.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        match self.scan() {
            Token::Eof => Ok(()),
            Token::Error => Err(self.fault_error()),
            other => Err(self.wrong_token(Token::Eof.name(), other)),
        }
    }

    /// Error for the fault recorded by the last scan.
    pub(crate) fn fault_error(&self) -> DecodeError {
        let fault = self.fault.unwrap_or(LexerFault::UnexpectedEof);
        let kind = match fault {
            LexerFault::InvalidLiteral => DecodeErrorType::MalformedScalar { expected: "literal" },
            LexerFault::InvalidNumber => DecodeErrorType::MalformedScalar { expected: "number" },
            other => DecodeErrorType::Lexer(other),
        };

        let error = DecodeError::new(kind, self.start)
            .with_token(Token::Error)
            .with_output(self.output());

        if fault.is_scalar() {
            error.with_source(fault)
        } else {
            error
        }
    }

    /// Error for a token that does not fit the grammar position.
    pub(crate) fn wrong_token(&self, expected: &'static str, found: Token) -> DecodeError {
        self.error(DecodeErrorType::StructuralToken { expected, found }, found)
    }

    /// Error for a token kind the field's type cannot accept.
    pub(crate) fn type_mismatch(&self, expected: &'static str, found: Token) -> DecodeError {
        self.error(DecodeErrorType::TypeMismatch { expected, found }, found)
    }

    /// Error for captured bytes that failed a scalar parse.
    pub(crate) fn malformed(&self, expected: &'static str, found: Token) -> DecodeError {
        self.error(DecodeErrorType::MalformedScalar { expected }, found)
    }

    /// Error for a scalar an external codec rejected.
    pub(crate) fn nested(
        &self,
        codec: &'static str,
        found: Token,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> DecodeError {
        self.error(DecodeErrorType::NestedDecode { codec }, found)
            .with_source(source)
    }

    fn error(&self, kind: DecodeErrorType, found: Token) -> DecodeError {
        let error = DecodeError::new(kind, self.start).with_token(found);

        if found.is_scalar() {
            error.with_output(self.output())
        } else {
            error
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.input.get(self.pos) {
            self.pos += 1;
        }
    }

    fn punctuation(&mut self, token: Token) -> Token {
        self.pos += 1;

        token
    }

    /// Record a fault whose offending bytes run from the token start to `end`.
    fn fail(&mut self, fault: LexerFault, end: usize) -> Token {
        let end = end.min(self.input.len()).max(self.start);
        self.pos = end;
        self.capture = Capture::Input {
            start: self.start,
            end,
        };
        self.fault = Some(fault);

        Token::Error
    }

    fn lex_string(&mut self) -> Token {
        let contents = self.pos + 1;
        let mut i = contents;

        loop {
            match self.input.get(i) {
                None => return self.fail(LexerFault::UnterminatedString, i),
                Some(b'"') => {
                    self.capture = Capture::Input {
                        start: contents,
                        end: i,
                    };
                    self.pos = i + 1;

                    return Token::String;
                }
                Some(b'\\') => return self.lex_escaped_string(contents, i),
                Some(&byte) if byte < 0x20 => {
                    return self.fail(LexerFault::ControlCharacter, i + 1);
                }
                Some(_) => i += 1,
            }
        }
    }

    /// Continue a string at the first backslash, unescaping into scratch.
    fn lex_escaped_string(&mut self, contents: usize, mut i: usize) -> Token {
        self.scratch.clear();
        self.scratch.extend_from_slice(&self.input[contents..i]);

        loop {
            match self.input.get(i).copied() {
                None => return self.fail(LexerFault::UnterminatedString, i),
                Some(b'"') => {
                    self.capture = Capture::Scratch;
                    self.pos = i + 1;

                    return Token::String;
                }
                Some(b'\\') => {
                    let Some(escape) = self.input.get(i + 1).copied() else {
                        return self.fail(LexerFault::UnterminatedString, i + 1);
                    };
                    i += 2;

                    let unescaped = match escape {
                        b'"' => b'"',
                        b'\\' => b'\\',
                        b'/' => b'/',
                        b'b' => 0x08,
                        b'f' => 0x0c,
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        b'u' => match self.unicode_escape(i) {
                            Some((ch, consumed)) => {
                                i += consumed;
                                let mut encoded = [0; 4];
                                self.scratch
                                    .extend_from_slice(ch.encode_utf8(&mut encoded).as_bytes());

                                continue;
                            }
                            None => return self.fail(LexerFault::InvalidEscape, i),
                        },
                        _ => return self.fail(LexerFault::InvalidEscape, i),
                    };

                    self.scratch.push(unescaped);
                }
                Some(byte) if byte < 0x20 => {
                    return self.fail(LexerFault::ControlCharacter, i + 1);
                }
                Some(byte) => {
                    self.scratch.push(byte);
                    i += 1;
                }
            }
        }
    }

    /// Decode the hex digits of a `\u` escape starting at `at`, joining
    /// surrogate pairs. Lone surrogates become U+FFFD.
    ///
    /// Returns the character and the number of bytes consumed after `\u`.
    fn unicode_escape(&self, at: usize) -> Option<(char, usize)> {
        let unit = self.hex4(at)?;

        if !(0xD800..0xE000).contains(&unit) {
            return char::from_u32(unit).map(|ch| (ch, 4));
        }

        let low = match self.input.get(at + 4..at + 6) {
            Some(b"\\u") => self.hex4(at + 6),
            _ => None,
        };

        match low {
            Some(low) if unit < 0xDC00 && (0xDC00..0xE000).contains(&low) => {
                let scalar = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);

                char::from_u32(scalar).map(|ch| (ch, 10))
            }
            _ => Some((char::REPLACEMENT_CHARACTER, 4)),
        }
    }

    fn hex4(&self, at: usize) -> Option<u32> {
        let digits = self.input.get(at..at + 4)?;

        digits.iter().try_fold(0, |acc, &digit| {
            char::from(digit).to_digit(16).map(|value| (acc << 4) | value)
        })
    }

    fn lex_number(&mut self) -> Token {
        let mut i = self.pos;
        let mut double = false;

        if self.input.get(i) == Some(&b'-') {
            i += 1;
        }

        match self.input.get(i) {
            Some(b'0') => i += 1,
            Some(b'1'..=b'9') => i = self.digits(i),
            _ => return self.invalid_number(i),
        }

        if self.input.get(i) == Some(&b'.') {
            double = true;
            let fraction = i + 1;
            i = self.digits(fraction);

            if i == fraction {
                return self.invalid_number(i);
            }
        }

        if let Some(b'e' | b'E') = self.input.get(i) {
            double = true;
            i += 1;

            if let Some(b'+' | b'-') = self.input.get(i) {
                i += 1;
            }

            let exponent = i;
            i = self.digits(exponent);

            if i == exponent {
                return self.invalid_number(i);
            }
        }

        if let Some(&byte) = self.input.get(i) {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'+' | b'-') {
                return self.invalid_number(i);
            }
        }

        self.capture = Capture::Input {
            start: self.start,
            end: i,
        };
        self.pos = i;

        if double {
            Token::Double
        } else {
            Token::Integer
        }
    }

    fn digits(&self, mut i: usize) -> usize {
        while let Some(b'0'..=b'9') = self.input.get(i) {
            i += 1;
        }

        i
    }

    /// Fail on a malformed number, capturing the rest of its bareword.
    fn invalid_number(&mut self, mut i: usize) -> Token {
        while let Some(&byte) = self.input.get(i) {
            if !(byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'+' | b'-')) {
                break;
            }

            i += 1;
        }

        self.fail(LexerFault::InvalidNumber, i)
    }

    fn lex_literal(&mut self) -> Token {
        let mut i = self.pos;

        while let Some(&byte) = self.input.get(i) {
            if !(byte.is_ascii_alphanumeric() || byte == b'_') {
                break;
            }

            i += 1;
        }

        let token = match &self.input[self.start..i] {
            b"true" | b"false" => Token::Bool,
            b"null" => Token::Null,
            _ => return self.fail(LexerFault::InvalidLiteral, i),
        };

        self.capture = Capture::Input {
            start: self.start,
            end: i,
        };
        self.pos = i;

        token
    }
}
