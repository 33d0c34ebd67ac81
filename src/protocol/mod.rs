//! Line Protocol Implementation
//!
//! The wire format is single-line ASCII commands, newline-delimited, with
//! fixed human-readable reply strings. No escaping, no binary framing, no
//! version negotiation.
//!
//! ## Request grammar
//!
//! ```text
//! OPERATION TREETYPE [VALUE]
//! ```
//!
//! where `OPERATION ∈ {SEARCH, INSERT, DELETE, DRAW}` and
//! `TREETYPE ∈ {Integer, Double, String}`. `VALUE` is present for everything
//! but `DRAW` and is a single whitespace-delimited token.
//!
//! ## Modules
//!
//! - `types`: operation keywords and the `Reply` type with serialization
//! - `parser`: incremental newline framing over a byte buffer

pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use parser::{parse_line, LineParser, ParseError, ParseResult};
pub use types::{Operation, Reply};
