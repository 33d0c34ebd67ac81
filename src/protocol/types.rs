//! Wire Protocol Reply Types
//!
//! The protocol is plain text: one newline-terminated request line in, one
//! reply sequence out. A reply is usually a single fixed line; `DRAW` is the
//! exception and sends the rendered tree followed by a closing line.
//!
//! ## Reply lines
//!
//! - `Element found` / `Element not found`
//! - `Element inserted`
//! - `Element deleted`
//! - `<tree dump...>` then `Draw completed`
//! - `Invalid value` — value token does not parse for the tree type
//! - `Invalid tree type` — unknown tree-type keyword
//! - `Invalid operation` — unknown operation keyword
//! - `Invalid request` — too few tokens to dispatch at all

use std::fmt;

/// Line terminator on the wire.
pub const LF: u8 = b'\n';

/// The fixed response strings of the protocol.
pub mod text {
    pub const FOUND: &str = "Element found";
    pub const NOT_FOUND: &str = "Element not found";
    pub const INSERTED: &str = "Element inserted";
    pub const DELETED: &str = "Element deleted";
    pub const DRAW_COMPLETED: &str = "Draw completed";
    pub const INVALID_VALUE: &str = "Invalid value";
    pub const INVALID_TREE_TYPE: &str = "Invalid tree type";
    pub const INVALID_OPERATION: &str = "Invalid operation";
    pub const INVALID_REQUEST: &str = "Invalid request";
}

/// The four operation keywords of the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Search,
    Insert,
    Delete,
    Draw,
}

impl Operation {
    /// Resolves an operation keyword, or `None` for an unknown one.
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "SEARCH" => Some(Operation::Search),
            "INSERT" => Some(Operation::Insert),
            "DELETE" => Some(Operation::Delete),
            "DRAW" => Some(Operation::Draw),
            _ => None,
        }
    }
}

/// One reply sequence, sent before the next request line is read.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// SEARCH hit.
    Found,
    /// SEARCH miss.
    NotFound,
    /// INSERT succeeded.
    Inserted,
    /// DELETE processed (the protocol does not distinguish a miss).
    Deleted,
    /// DRAW body: either the rendered tree or an `Invalid tree type` line,
    /// already newline-terminated. Serialization appends `Draw completed`.
    Draw(String),
    /// Value token failed to parse for the tree type.
    InvalidValue,
    /// Unknown tree-type keyword.
    InvalidTreeType,
    /// Unknown operation keyword.
    InvalidOperation,
    /// Too few tokens to dispatch.
    InvalidRequest,
}

impl Reply {
    /// Serializes the reply as newline-terminated text.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the reply into an existing buffer.
    pub fn serialize_into(&self, buf: &mut Vec<u8>) {
        match self {
            Reply::Draw(body) => {
                buf.extend_from_slice(body.as_bytes());
                buf.extend_from_slice(text::DRAW_COMPLETED.as_bytes());
                buf.push(LF);
            }
            other => {
                buf.extend_from_slice(other.line().as_bytes());
                buf.push(LF);
            }
        }
    }

    /// The single fixed line for every variant except [`Reply::Draw`].
    fn line(&self) -> &'static str {
        match self {
            Reply::Found => text::FOUND,
            Reply::NotFound => text::NOT_FOUND,
            Reply::Inserted => text::INSERTED,
            Reply::Deleted => text::DELETED,
            Reply::InvalidValue => text::INVALID_VALUE,
            Reply::InvalidTreeType => text::INVALID_TREE_TYPE,
            Reply::InvalidOperation => text::INVALID_OPERATION,
            Reply::InvalidRequest => text::INVALID_REQUEST,
            Reply::Draw(_) => unreachable!("Draw serializes its body"),
        }
    }

    /// Returns true if this reply reports a client error.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Reply::InvalidValue
                | Reply::InvalidTreeType
                | Reply::InvalidOperation
                | Reply::InvalidRequest
        )
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Draw(body) => write!(f, "{}{}", body, text::DRAW_COMPLETED),
            other => f.write_str(other.line()),
        }
    }
}
