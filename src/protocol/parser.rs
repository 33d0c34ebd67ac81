//! Incremental Line Framer
//!
//! Requests arrive as newline-terminated text over a TCP stream, and TCP is
//! a byte stream: one read can deliver half a line or several lines at once.
//! The framer works against an accumulating buffer and returns either:
//!
//! - `Ok(Some((line, consumed)))` — a complete line, `consumed` bytes used
//! - `Ok(None)` — no newline yet, read more
//! - `Err(ParseError)` — the data cannot become a valid request line
//!
//! The caller appends incoming bytes, calls [`LineParser::parse`], and
//! advances the buffer by `consumed` on success. A trailing `\r` is stripped
//! so both `\n` and `\r\n` clients work.

use crate::protocol::types::LF;
use thiserror::Error;

/// Maximum length of a single request line, terminator included.
///
/// Commands are a handful of tokens; anything approaching this limit is a
/// client that will never send a newline.
pub const MAX_LINE_SIZE: usize = 8 * 1024;

/// Errors that can occur while framing request lines.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The line contains bytes that are not valid UTF-8.
    #[error("invalid UTF-8 in request line: {0}")]
    InvalidUtf8(String),

    /// No newline within [`MAX_LINE_SIZE`] bytes.
    #[error("request line too long: {size} bytes buffered (max: {max})")]
    LineTooLong { size: usize, max: usize },
}

/// Result type for framing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An incremental newline framer over a byte buffer.
///
/// # Example
///
/// ```
/// use treeline::protocol::LineParser;
///
/// let mut parser = LineParser::new();
/// let buf = b"INSERT Integer 5\nSEAR";
///
/// let (line, consumed) = parser.parse(buf).unwrap().unwrap();
/// assert_eq!(line, "INSERT Integer 5");
/// assert_eq!(consumed, 17);
///
/// // The rest is an incomplete line.
/// assert_eq!(parser.parse(&buf[consumed..]).unwrap(), None);
/// ```
#[derive(Debug, Default)]
pub struct LineParser;

impl LineParser {
    /// Creates a new framer.
    pub fn new() -> Self {
        Self
    }

    /// Attempts to extract one request line from the buffer.
    pub fn parse(&mut self, buf: &[u8]) -> ParseResult<Option<(String, usize)>> {
        let Some(pos) = buf.iter().position(|&b| b == LF) else {
            if buf.len() >= MAX_LINE_SIZE {
                return Err(ParseError::LineTooLong {
                    size: buf.len(),
                    max: MAX_LINE_SIZE,
                });
            }
            return Ok(None);
        };

        let mut raw = &buf[..pos];
        if raw.last() == Some(&b'\r') {
            raw = &raw[..raw.len() - 1];
        }

        let line = std::str::from_utf8(raw)
            .map_err(|e| ParseError::InvalidUtf8(e.to_string()))?
            .to_string();

        Ok(Some((line, pos + 1)))
    }
}

/// Extracts a single line from bytes. Convenience for simple use cases.
pub fn parse_line(buf: &[u8]) -> ParseResult<Option<(String, usize)>> {
    LineParser::new().parse(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_line() {
        let result = parse_line(b"SEARCH Integer 5\n").unwrap().unwrap();
        assert_eq!(result.0, "SEARCH Integer 5");
        assert_eq!(result.1, 17);
    }

    #[test]
    fn test_parse_strips_carriage_return() {
        let result = parse_line(b"DRAW String\r\n").unwrap().unwrap();
        assert_eq!(result.0, "DRAW String");
        assert_eq!(result.1, 13);
    }

    #[test]
    fn test_parse_incomplete_line() {
        assert_eq!(parse_line(b"SEARCH Inte").unwrap(), None);
        assert_eq!(parse_line(b"").unwrap(), None);
    }

    #[test]
    fn test_parse_empty_line() {
        let result = parse_line(b"\n").unwrap().unwrap();
        assert_eq!(result.0, "");
        assert_eq!(result.1, 1);
    }

    #[test]
    fn test_parse_consumes_one_line_at_a_time() {
        let buf = b"INSERT Integer 1\nINSERT Integer 2\n";

        let (first, consumed) = parse_line(buf).unwrap().unwrap();
        assert_eq!(first, "INSERT Integer 1");

        let (second, _) = parse_line(&buf[consumed..]).unwrap().unwrap();
        assert_eq!(second, "INSERT Integer 2");
    }

    #[test]
    fn test_parse_rejects_invalid_utf8() {
        let result = parse_line(b"INSERT String \xff\xfe\n");
        assert!(matches!(result, Err(ParseError::InvalidUtf8(_))));
    }

    #[test]
    fn test_parse_rejects_endless_line() {
        let buf = vec![b'a'; MAX_LINE_SIZE];
        let result = parse_line(&buf);
        assert!(matches!(result, Err(ParseError::LineTooLong { .. })));
    }

    #[test]
    fn test_parse_interior_cr_is_kept() {
        // Only a trailing \r is protocol framing; anything else is data.
        let result = parse_line(b"a\rb\n").unwrap().unwrap();
        assert_eq!(result.0, "a\rb");
    }
}
