//! Command Processing Layer
//!
//! Sits between the connection handler and the tree registry: each request
//! line read off a connection is handed to [`CommandHandler::execute`],
//! which produces the one reply the protocol owes per request.
//!
//! ## Supported commands
//!
//! - `SEARCH TREETYPE VALUE` — membership test
//! - `INSERT TREETYPE VALUE` — level-order insertion
//! - `DELETE TREETYPE VALUE` — removal by equality
//! - `DRAW TREETYPE` — textual dump of the tree

pub mod handler;

// Re-export the main command handler
pub use handler::CommandHandler;
