//! Tree Engine and Registry
//!
//! The heart of the server: a generic, unbalanced binary tree filled in
//! level order, and the registry that instantiates it three times (integer,
//! double, string) as long-lived shared state.
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                 TreeRegistry                  │
//! │  ┌───────────┐  ┌───────────┐  ┌───────────┐  │
//! │  │ RwLock    │  │ RwLock    │  │ RwLock    │  │
//! │  │ Tree<i64> │  │ Tree<f64> │  │ Tree<Str> │  │
//! │  └───────────┘  └───────────┘  └───────────┘  │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The engine itself carries no locking; the registry synchronizes each
//! tree with its own reader-writer lock.

pub mod engine;
pub mod registry;

// Re-export commonly used types
pub use engine::{BinaryTree, EMPTY_TREE};
pub use registry::{Double, InvalidValue, RegistryStats, TreeKind, TreeRegistry, TreeValue};
