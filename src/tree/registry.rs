//! Typed Tree Registry
//!
//! The registry owns the three long-lived trees the server exposes, one per
//! supported value type. It is created once at startup, wrapped in an `Arc`,
//! and handed to every connection — explicit shared state instead of
//! globals.
//!
//! ## Concurrency
//!
//! The original design mutated the trees from concurrent connections with no
//! synchronization at all. Here each tree sits behind its own `RwLock`:
//! searches and draws take read locks, inserts and deletes take write locks.
//! The three trees never contend with each other. Lock scope is a single
//! operation, so a sequence of commands is still not transactional.

use crate::tree::BinaryTree;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use thiserror::Error;

/// Selects which typed tree a command targets.
///
/// The wire keywords are exactly `Integer`, `Double` and `String`, case
/// sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    /// 64-bit signed integers, keyword `Integer`.
    Integer,
    /// 64-bit floats, keyword `Double`.
    Double,
    /// UTF-8 strings, keyword `String`.
    Text,
}

impl TreeKind {
    /// Resolves a tree-type keyword, or `None` for an unknown one.
    pub fn from_keyword(token: &str) -> Option<Self> {
        match token {
            "Integer" => Some(TreeKind::Integer),
            "Double" => Some(TreeKind::Double),
            "String" => Some(TreeKind::Text),
            _ => None,
        }
    }

    /// The wire keyword for this kind.
    pub fn keyword(&self) -> &'static str {
        match self {
            TreeKind::Integer => "Integer",
            TreeKind::Double => "Double",
            TreeKind::Text => "String",
        }
    }
}

impl fmt::Display for TreeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// `f64` stored with bit-pattern identity, the way Java's `Double` behaves:
/// `NaN` equals `NaN` and `0.0` differs from `-0.0`. Plain `f64` equality
/// would make a stored `NaN` unfindable and undeletable, breaking the
/// insert-then-search round trip for a value the parser accepts.
#[derive(Debug, Clone, Copy)]
pub struct Double(pub f64);

impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Double {}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The Debug form keeps the decimal point (`5.0`, not `5`), matching
        // how doubles are rendered on the wire.
        write!(f, "{:?}", self.0)
    }
}

/// A value parsed for a specific tree, carrying its type with it.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeValue {
    Integer(i64),
    Double(f64),
    Text(String),
}

impl TreeValue {
    /// Parses a raw value token for the given tree kind.
    ///
    /// `String` values pass through untouched; numeric kinds go through the
    /// standard parsers and report [`InvalidValue`] on failure.
    pub fn parse(kind: TreeKind, token: &str) -> Result<Self, InvalidValue> {
        let invalid = || InvalidValue {
            kind,
            token: token.to_string(),
        };

        match kind {
            TreeKind::Integer => token
                .parse::<i64>()
                .map(TreeValue::Integer)
                .map_err(|_| invalid()),
            TreeKind::Double => token
                .parse::<f64>()
                .map(TreeValue::Double)
                .map_err(|_| invalid()),
            TreeKind::Text => Ok(TreeValue::Text(token.to_string())),
        }
    }
}

/// A value token that does not parse for its tree kind.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid {kind} value: {token:?}")]
pub struct InvalidValue {
    pub kind: TreeKind,
    pub token: String,
}

/// The three shared trees plus operation counters.
///
/// # Example
///
/// ```
/// use treeline::tree::{TreeKind, TreeRegistry, TreeValue};
///
/// let registry = TreeRegistry::new();
/// registry.insert(TreeValue::Integer(5));
///
/// assert!(registry.contains(&TreeValue::Integer(5)));
/// assert!(!registry.contains(&TreeValue::Double(5.0)));
/// assert_eq!(registry.len(TreeKind::Integer), 1);
/// ```
#[derive(Default)]
pub struct TreeRegistry {
    integers: RwLock<BinaryTree<i64>>,
    doubles: RwLock<BinaryTree<Double>>,
    strings: RwLock<BinaryTree<String>>,

    /// Statistics: total INSERT operations
    insert_count: AtomicU64,
    /// Statistics: total SEARCH operations
    search_count: AtomicU64,
    /// Statistics: total DELETE operations
    delete_count: AtomicU64,
    /// Statistics: total DRAW operations
    draw_count: AtomicU64,
}

impl fmt::Debug for TreeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeRegistry")
            .field("integers", &self.len(TreeKind::Integer))
            .field("doubles", &self.len(TreeKind::Double))
            .field("strings", &self.len(TreeKind::Text))
            .finish()
    }
}

impl TreeRegistry {
    /// Creates a registry with three empty trees.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value into the tree matching its type.
    pub fn insert(&self, value: TreeValue) {
        self.insert_count.fetch_add(1, Ordering::Relaxed);

        match value {
            TreeValue::Integer(n) => self.integers.write().unwrap().insert(n),
            TreeValue::Double(x) => self.doubles.write().unwrap().insert(Double(x)),
            TreeValue::Text(s) => self.strings.write().unwrap().insert(s),
        }
    }

    /// Returns true if an equal value exists in the matching tree.
    pub fn contains(&self, value: &TreeValue) -> bool {
        self.search_count.fetch_add(1, Ordering::Relaxed);

        match value {
            TreeValue::Integer(n) => self.integers.read().unwrap().contains(n),
            TreeValue::Double(x) => self.doubles.read().unwrap().contains(&Double(*x)),
            TreeValue::Text(s) => self.strings.read().unwrap().contains(s),
        }
    }

    /// Removes an equal value from the matching tree, if present.
    pub fn remove(&self, value: &TreeValue) {
        self.delete_count.fetch_add(1, Ordering::Relaxed);

        match value {
            TreeValue::Integer(n) => self.integers.write().unwrap().remove(n),
            TreeValue::Double(x) => self.doubles.write().unwrap().remove(&Double(*x)),
            TreeValue::Text(s) => self.strings.write().unwrap().remove(s),
        }
    }

    /// Renders the chosen tree as newline-terminated text.
    pub fn render(&self, kind: TreeKind) -> String {
        self.draw_count.fetch_add(1, Ordering::Relaxed);

        match kind {
            TreeKind::Integer => self.integers.read().unwrap().render(),
            TreeKind::Double => self.doubles.read().unwrap().render(),
            TreeKind::Text => self.strings.read().unwrap().render(),
        }
    }

    /// Node count of the chosen tree.
    pub fn len(&self, kind: TreeKind) -> usize {
        match kind {
            TreeKind::Integer => self.integers.read().unwrap().len(),
            TreeKind::Double => self.doubles.read().unwrap().len(),
            TreeKind::Text => self.strings.read().unwrap().len(),
        }
    }

    /// Snapshot of the operation counters.
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            insert_ops: self.insert_count.load(Ordering::Relaxed),
            search_ops: self.search_count.load(Ordering::Relaxed),
            delete_ops: self.delete_count.load(Ordering::Relaxed),
            draw_ops: self.draw_count.load(Ordering::Relaxed),
        }
    }
}

/// Registry operation statistics.
#[derive(Debug, Clone, Copy)]
pub struct RegistryStats {
    pub insert_ops: u64,
    pub search_ops: u64,
    pub delete_ops: u64,
    pub draw_ops: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_keywords() {
        assert_eq!(TreeKind::from_keyword("Integer"), Some(TreeKind::Integer));
        assert_eq!(TreeKind::from_keyword("Double"), Some(TreeKind::Double));
        assert_eq!(TreeKind::from_keyword("String"), Some(TreeKind::Text));

        // Case sensitive, like the original protocol.
        assert_eq!(TreeKind::from_keyword("integer"), None);
        assert_eq!(TreeKind::from_keyword("Boolean"), None);
    }

    #[test]
    fn test_value_parsing() {
        assert_eq!(
            TreeValue::parse(TreeKind::Integer, "42"),
            Ok(TreeValue::Integer(42))
        );
        assert_eq!(
            TreeValue::parse(TreeKind::Double, "-2.5"),
            Ok(TreeValue::Double(-2.5))
        );
        assert_eq!(
            TreeValue::parse(TreeKind::Text, "hello"),
            Ok(TreeValue::Text("hello".to_string()))
        );

        assert!(TreeValue::parse(TreeKind::Integer, "4.2").is_err());
        assert!(TreeValue::parse(TreeKind::Double, "notanumber").is_err());
    }

    #[test]
    fn test_trees_are_independent() {
        let registry = TreeRegistry::new();
        registry.insert(TreeValue::Integer(5));

        assert!(registry.contains(&TreeValue::Integer(5)));
        assert!(!registry.contains(&TreeValue::Double(5.0)));
        assert!(!registry.contains(&TreeValue::Text("5".to_string())));

        assert_eq!(registry.len(TreeKind::Integer), 1);
        assert_eq!(registry.len(TreeKind::Double), 0);
        assert_eq!(registry.len(TreeKind::Text), 0);
    }

    #[test]
    fn test_insert_remove_round_trip() {
        let registry = TreeRegistry::new();
        let value = TreeValue::Text("hello".to_string());

        registry.insert(value.clone());
        assert!(registry.contains(&value));

        registry.remove(&value);
        assert!(!registry.contains(&value));
    }

    #[test]
    fn test_double_nan_round_trip() {
        let registry = TreeRegistry::new();
        // "NaN" parses as a double, so it must be storable, findable and
        // removable like any other value.
        let nan = TreeValue::parse(TreeKind::Double, "NaN").unwrap();

        registry.insert(nan.clone());
        assert!(registry.contains(&nan));

        registry.remove(&nan);
        assert!(!registry.contains(&nan));
        assert_eq!(registry.len(TreeKind::Double), 0);
    }

    #[test]
    fn test_double_signed_zeros_are_distinct() {
        let registry = TreeRegistry::new();
        registry.insert(TreeValue::Double(0.0));

        assert!(registry.contains(&TreeValue::Double(0.0)));
        assert!(!registry.contains(&TreeValue::Double(-0.0)));
    }

    #[test]
    fn test_double_render_keeps_decimal_point() {
        let registry = TreeRegistry::new();
        registry.insert(TreeValue::Double(5.0));

        assert_eq!(registry.render(TreeKind::Double), "5.0\n");
    }

    #[test]
    fn test_render_per_kind() {
        let registry = TreeRegistry::new();
        registry.insert(TreeValue::Integer(1));

        assert_eq!(registry.render(TreeKind::Integer), "1\n");
        assert_eq!(registry.render(TreeKind::Double), "Empty Tree\n");
    }

    #[test]
    fn test_stats_count_operations() {
        let registry = TreeRegistry::new();
        registry.insert(TreeValue::Integer(1));
        registry.contains(&TreeValue::Integer(1));
        registry.contains(&TreeValue::Integer(2));
        registry.remove(&TreeValue::Integer(1));
        registry.render(TreeKind::Integer);

        let stats = registry.stats();
        assert_eq!(stats.insert_ops, 1);
        assert_eq!(stats.search_ops, 2);
        assert_eq!(stats.delete_ops, 1);
        assert_eq!(stats.draw_ops, 1);
    }

    #[test]
    fn test_concurrent_inserts_are_not_lost() {
        use std::sync::Arc;
        use std::thread;

        let registry = Arc::new(TreeRegistry::new());
        let mut handles = vec![];

        for i in 0..10 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    registry.insert(TreeValue::Integer(i * 100 + j));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(TreeKind::Integer), 1000);
    }
}
