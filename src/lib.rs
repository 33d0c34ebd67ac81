//! # Treeline - A Line-Oriented Binary Tree Server
//!
//! Treeline is a small TCP service that exposes three shared binary trees —
//! one for strings, one for 64-bit integers, one for 64-bit floats — through
//! a plain-text, newline-delimited command protocol.
//!
//! The trees are intentionally not search trees: insertion is level-order
//! (breadth-first into the first empty child slot), so a value's position is
//! decided by arrival order, and search has to visit every node. That makes
//! this a teaching-sized system with one genuinely interesting data
//! structure and a very small wire protocol around it.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                           Treeline                           │
//! │                                                              │
//! │  ┌────────────┐   ┌─────────────┐   ┌─────────────┐          │
//! │  │ TCP        │──>│ Connection  │──>│  Command    │          │
//! │  │ Listener   │   │  Handler    │   │  Handler    │          │
//! │  └────────────┘   └─────────────┘   └──────┬──────┘          │
//! │                                            │                 │
//! │                                            ▼                 │
//! │  ┌────────────┐   ┌──────────────────────────────────────┐   │
//! │  │ LineParser │   │             TreeRegistry             │   │
//! │  │ (framing)  │   │  ┌────────┐  ┌────────┐  ┌────────┐  │   │
//! │  └────────────┘   │  │ i64    │  │ f64    │  │ String │  │   │
//! │                   │  │ RwLock │  │ RwLock │  │ RwLock │  │   │
//! │                   │  └────────┘  └────────┘  └────────┘  │   │
//! │                   └──────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Protocol
//!
//! Requests are single lines: `OPERATION TREETYPE [VALUE]`.
//!
//! | Request                | Reply                              |
//! |------------------------|------------------------------------|
//! | `INSERT Integer 5`     | `Element inserted`                 |
//! | `SEARCH Integer 5`     | `Element found` / `Element not found` |
//! | `DELETE Integer 5`     | `Element deleted`                  |
//! | `DRAW Integer`         | tree dump, then `Draw completed`   |
//!
//! Bad input is answered in-band (`Invalid operation`, `Invalid tree type`,
//! `Invalid value`, `Invalid request`) and never closes the session.
//!
//! ## Quick Start
//!
//! ```ignore
//! use treeline::commands::CommandHandler;
//! use treeline::connection::{handle_connection, ConnectionStats};
//! use treeline::tree::TreeRegistry;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = Arc::new(TreeRegistry::new());
//!     let stats = Arc::new(ConnectionStats::new());
//!     let listener = TcpListener::bind("127.0.0.1:4444").await.unwrap();
//!
//!     loop {
//!         let (stream, addr) = listener.accept().await.unwrap();
//!         let commands = CommandHandler::new(Arc::clone(&registry));
//!         let stats = Arc::clone(&stats);
//!
//!         tokio::spawn(handle_connection(stream, addr, commands, stats));
//!     }
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`tree`]: the level-order binary tree engine and the typed registry
//! - [`protocol`]: line framing and the fixed reply strings
//! - [`commands`]: request tokenization and dispatch
//! - [`connection`]: per-client session loop
//!
//! ## Concurrency
//!
//! Each tree sits behind its own `RwLock`, so concurrent sessions never
//! corrupt a tree or lose an insert; sequences of commands remain
//! non-transactional, exactly like the original design. State is memory
//! resident only and vanishes when the process exits.

pub mod commands;
pub mod connection;
pub mod protocol;
pub mod tree;

// Re-export commonly used types for convenience
pub use commands::CommandHandler;
pub use connection::{handle_connection, ConnectionError, ConnectionStats};
pub use protocol::{LineParser, ParseError, Reply};
pub use tree::{BinaryTree, TreeKind, TreeRegistry, TreeValue};

/// The default port treeline listens on
pub const DEFAULT_PORT: u16 = 4444;

/// The default host treeline binds to
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Version of treeline
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
