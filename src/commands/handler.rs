//! Command Handler Module
//!
//! This module turns a raw request line into exactly one [`Reply`]. It
//! tokenizes on whitespace, dispatches by the operation keyword, resolves
//! the tree-type keyword, parses the value token for that type, and invokes
//! the shared registry.
//!
//! ```text
//! request line
//!       │
//!       ▼
//! ┌─────────────────┐
//! │ CommandHandler  │   tokenize → dispatch → parse value → execute
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  TreeRegistry   │   (tree module)
//! └─────────────────┘
//! ```
//!
//! Every malformed input is reported back as data, never as a connection
//! failure: unknown operation → `Invalid operation`, unknown tree type →
//! `Invalid tree type`, unparsable value → `Invalid value`, and a line with
//! too few tokens → `Invalid request`. Extra trailing tokens are ignored,
//! as in the original protocol.

use crate::protocol::types::{text, Operation, Reply};
use crate::tree::{TreeKind, TreeRegistry, TreeValue};
use std::sync::Arc;

/// Executes request lines against the shared tree registry.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    registry: Arc<TreeRegistry>,
}

impl CommandHandler {
    /// Creates a handler over the given registry.
    pub fn new(registry: Arc<TreeRegistry>) -> Self {
        Self { registry }
    }

    /// Executes one request line and returns the reply to send.
    pub fn execute(&self, line: &str) -> Reply {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, args)) = tokens.split_first() else {
            return Reply::InvalidRequest;
        };

        match Operation::from_keyword(keyword) {
            Some(Operation::Search) => self.cmd_search(args),
            Some(Operation::Insert) => self.cmd_insert(args),
            Some(Operation::Delete) => self.cmd_delete(args),
            Some(Operation::Draw) => self.cmd_draw(args),
            None => Reply::InvalidOperation,
        }
    }

    /// Resolves the `TREETYPE VALUE` argument pair shared by SEARCH, INSERT
    /// and DELETE. The error reply encodes which check failed.
    fn typed_value(&self, args: &[&str]) -> Result<TreeValue, Reply> {
        let (kind_token, value_token) = match args {
            [kind, value, ..] => (*kind, *value),
            _ => return Err(Reply::InvalidRequest),
        };

        let Some(kind) = TreeKind::from_keyword(kind_token) else {
            return Err(Reply::InvalidTreeType);
        };

        TreeValue::parse(kind, value_token).map_err(|_| Reply::InvalidValue)
    }

    /// SEARCH TREETYPE VALUE
    fn cmd_search(&self, args: &[&str]) -> Reply {
        match self.typed_value(args) {
            Ok(value) => {
                if self.registry.contains(&value) {
                    Reply::Found
                } else {
                    Reply::NotFound
                }
            }
            Err(reply) => reply,
        }
    }

    /// INSERT TREETYPE VALUE
    fn cmd_insert(&self, args: &[&str]) -> Reply {
        match self.typed_value(args) {
            Ok(value) => {
                self.registry.insert(value);
                Reply::Inserted
            }
            Err(reply) => reply,
        }
    }

    /// DELETE TREETYPE VALUE
    fn cmd_delete(&self, args: &[&str]) -> Reply {
        match self.typed_value(args) {
            Ok(value) => {
                self.registry.remove(&value);
                Reply::Deleted
            }
            Err(reply) => reply,
        }
    }

    /// DRAW TREETYPE
    ///
    /// An unknown tree type still closes with `Draw completed`, so the body
    /// of the reply becomes the error line.
    fn cmd_draw(&self, args: &[&str]) -> Reply {
        let Some(&kind_token) = args.first() else {
            return Reply::InvalidRequest;
        };

        match TreeKind::from_keyword(kind_token) {
            Some(kind) => Reply::Draw(self.registry.render(kind)),
            None => Reply::Draw(format!("{}\n", text::INVALID_TREE_TYPE)),
        }
    }
}
