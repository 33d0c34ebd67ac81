//! Connection Handling
//!
//! One async task per accepted client, all sharing the same registry:
//!
//! ```text
//! ┌──────────────┐  accept   ┌─────────────────────┐
//! │  TcpListener │──────────>│  ConnectionHandler  │  (one task each)
//! │  (main.rs)   │           │  read line          │
//! └──────────────┘           │  execute command    │
//!                            │  write reply        │
//!                            └─────────────────────┘
//! ```
//!
//! Blocking reads park only the owning task; there are no per-connection
//! timeouts, so an idle client simply keeps its task suspended.

pub mod handler;

// Re-export commonly used types
pub use handler::{handle_connection, ConnectionError, ConnectionHandler, ConnectionStats};
