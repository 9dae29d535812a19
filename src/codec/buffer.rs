//! Output buffer for encoders.

use super::{Encode, EncodeError};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Growable byte buffer that encoders write JSON into.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    bytes: Vec<u8>,
}

impl Buffer {
    /// Create an empty buffer.
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer, returning the written bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    pub fn write_byte(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_bytes(s.as_bytes());
    }

    /// Drop the last `count` bytes written.
    pub fn rewind(&mut self, count: usize) {
        let len = self.bytes.len().saturating_sub(count);
        self.bytes.truncate(len);
    }

    /// Write an unsigned integer in decimal.
    pub fn write_u64(&mut self, mut value: u64) {
        let mut digits = [0; 20];
        let mut start = digits.len();

        loop {
            start -= 1;
            // `value % 10` is always below 10.
            digits[start] = b'0' + (value % 10) as u8;
            value /= 10;

            if value == 0 {
                break;
            }
        }

        self.write_bytes(&digits[start..]);
    }

    /// Write a signed integer in decimal.
    pub fn write_i64(&mut self, value: i64) {
        if value < 0 {
            self.write_byte(b'-');
        }

        self.write_u64(value.unsigned_abs());
    }

    /// Write `s` as a quoted JSON string, escaping quotes, backslashes and
    /// control characters.
    pub fn write_json_string(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let mut run = 0;

        self.write_byte(b'"');

        for (i, &byte) in bytes.iter().enumerate() {
            let escape: &[u8] = match byte {
                b'"' => b"\\\"",
                b'\\' => b"\\\\",
                b'\n' => b"\\n",
                b'\r' => b"\\r",
                b'\t' => b"\\t",
                0x08 => b"\\b",
                0x0c => b"\\f",
                0x00..=0x1f => &[],
                _ => continue,
            };

            self.write_bytes(&bytes[run..i]);
            run = i + 1;

            if escape.is_empty() {
                self.write_bytes(b"\\u00");
                self.write_byte(HEX_DIGITS[usize::from(byte >> 4)]);
                self.write_byte(HEX_DIGITS[usize::from(byte & 0xf)]);
            } else {
                self.write_bytes(escape);
            }
        }

        self.write_bytes(&bytes[run..]);
        self.write_byte(b'"');
    }

    /// Open a JSON object and return a writer for its fields.
    pub fn begin_object(&mut self) -> ObjectWriter<'_> {
        self.write_byte(b'{');
        let start = self.len();

        ObjectWriter { buf: self, start }
    }
}

impl std::io::Write for Buffer {
    fn write(&mut self, bytes: &[u8]) -> std::io::Result<usize> {
        self.write_bytes(bytes);

        Ok(bytes.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Writes the fields of one JSON object in declaration order.
///
/// Every field is followed by a `,`. [`finish`](Self::finish) rewinds the
/// final separator by one byte before closing the object.
#[derive(Debug)]
pub struct ObjectWriter<'a> {
    buf: &'a mut Buffer,
    /// Buffer length right after the opening brace.
    start: usize,
}

impl ObjectWriter<'_> {
    /// Write a field regardless of its value.
    ///
    /// # Errors
    ///
    /// Propagates the value's own [`EncodeError`].
    pub fn always<T: Encode + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), EncodeError> {
        self.buf.write_byte(b'"');
        self.buf.write_str(key);
        self.buf.write_bytes(b"\":");
        value.encode(self.buf)?;
        self.buf.write_byte(b',');

        Ok(())
    }

    /// Write a field unless its value is the zero or empty value.
    ///
    /// # Errors
    ///
    /// Propagates the value's own [`EncodeError`].
    pub fn omit_empty<T: Encode + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), EncodeError> {
        if value.is_empty_value() {
            return Ok(());
        }

        self.always(key, value)
    }

    /// Close the object.
    pub fn finish(self) {
        if self.buf.len() > self.start {
            self.buf.rewind(1);
        }

        self.buf.write_byte(b'}');
    }
}

#[cfg(test)]
mod tests {
    use super::Buffer;

    #[test]
    fn integers() {
        let mut buf = Buffer::new();
        buf.write_u64(0);
        buf.write_byte(b' ');
        buf.write_u64(u64::MAX);
        buf.write_byte(b' ');
        buf.write_i64(i64::MIN);
        buf.write_byte(b' ');
        buf.write_i64(-7);

        assert_eq!(
            buf.as_bytes(),
            b"0 18446744073709551615 -9223372036854775808 -7"
        );
    }

    #[test]
    fn escapes_strings() {
        let mut buf = Buffer::new();
        buf.write_json_string("a\"b\\c\nd\u{1}é");

        assert_eq!(buf.as_bytes(), "\"a\\\"b\\\\c\\nd\\u0001é\"".as_bytes());
    }

    #[test]
    fn rewind_saturates() {
        let mut buf = Buffer::new();
        buf.write_str("ab");
        buf.rewind(1);
        assert_eq!(buf.as_bytes(), b"a");
        buf.rewind(5);
        assert!(buf.is_empty());
    }

    #[test]
    fn object_rewinds_final_separator() {
        let mut buf = Buffer::new();
        let mut object = buf.begin_object();
        object.always("name", "test").unwrap();
        object.omit_empty("managed", &false).unwrap();
        object.always("animated", &true).unwrap();
        object.finish();

        assert_eq!(buf.as_bytes(), br#"{"name":"test","animated":true}"#);
    }

    #[test]
    fn empty_object() {
        let mut buf = Buffer::new();
        let mut object = buf.begin_object();
        object.omit_empty("roles", &Vec::<u64>::new()).unwrap();
        object.finish();

        assert_eq!(buf.as_bytes(), b"{}");
    }
}
