//! Unbalanced Binary Tree Engine
//!
//! This module implements the generic tree container behind every typed tree
//! the server exposes. It is deliberately not a search tree:
//!
//! - **Insertion is level-order**: a breadth-first scan attaches the new
//!   value at the first empty child slot (left before right), so position is
//!   determined by arrival order, never by comparison. Each level fills
//!   left-to-right before the next one starts, and duplicates are accepted.
//! - **Search is exhaustive**: because values are not ordered, lookup must
//!   visit every node in the worst case.
//! - **Deletion is by equality**: the first node holding an equal value is
//!   unlinked, with the classic leaf / one-child / two-children relinking.
//!
//! Traversals use explicit stacks and queues rather than recursion, so tree
//! depth never translates into call-stack depth.
//!
//! The tree has no internal locking. Callers that share it across tasks
//! synchronize access themselves (see [`crate::tree::TreeRegistry`]).

use std::collections::VecDeque;
use std::fmt;
use std::fmt::Write as _;

/// Sentinel line rendered for a tree without a root.
pub const EMPTY_TREE: &str = "Empty Tree";

/// Indentation unit per depth level in [`BinaryTree::render`].
const INDENT: &str = "  ";

/// A single tree node, exclusively owned by its parent (or by the tree for
/// the root). `Option<Box<_>>` ownership rules out cycles and sharing.
#[derive(Debug)]
struct Node<T> {
    value: T,
    left: Option<Box<Node<T>>>,
    right: Option<Box<Node<T>>>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// An unbalanced binary tree filled in level order.
///
/// One generic container is instantiated per value type the server supports
/// (`String`, `i64`, `f64`).
///
/// # Example
///
/// ```
/// use treeline::tree::BinaryTree;
///
/// let mut tree = BinaryTree::new();
/// tree.insert(7);
/// tree.insert(3);
/// tree.insert(9);
///
/// assert!(tree.contains(&3));
/// tree.remove(&3);
/// assert!(!tree.contains(&3));
/// assert_eq!(tree.len(), 2);
/// ```
#[derive(Debug)]
pub struct BinaryTree<T> {
    root: Option<Box<Node<T>>>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Returns true if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the nodes with a breadth-first scan.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut pending = VecDeque::new();
        pending.extend(self.root.as_deref());

        while let Some(node) = pending.pop_front() {
            count += 1;
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }

        count
    }

    /// Inserts a value at the first empty child slot found in level order.
    ///
    /// An empty tree gains the value as its root. Otherwise a FIFO queue
    /// drives a breadth-first scan; the first visited node missing a left
    /// child receives the value there, else a missing right child is filled.
    /// Duplicates are placed wherever the scan lands. No rebalancing.
    pub fn insert(&mut self, value: T) {
        let Some(root) = self.root.as_deref_mut() else {
            self.root = Some(Box::new(Node::new(value)));
            return;
        };

        let mut pending = VecDeque::new();
        pending.push_back(root);

        while let Some(node) = pending.pop_front() {
            if node.left.is_none() {
                node.left = Some(Box::new(Node::new(value)));
                return;
            }
            if node.right.is_none() {
                node.right = Some(Box::new(Node::new(value)));
                return;
            }

            // Both slots taken: split the borrow and queue the children.
            let Node { left, right, .. } = node;
            pending.extend(left.as_deref_mut());
            pending.extend(right.as_deref_mut());
        }
    }

    /// Returns true if an equal value exists anywhere in the tree.
    ///
    /// Pre-order traversal with an explicit stack. The tree is not ordered,
    /// so there is nothing to prune: O(n) worst case.
    pub fn contains(&self, target: &T) -> bool
    where
        T: PartialEq,
    {
        let mut stack = Vec::new();
        stack.extend(self.root.as_deref());

        while let Some(node) = stack.pop() {
            if node.value == *target {
                return true;
            }
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        false
    }

    /// Removes nodes holding an equal value, by equality rather than
    /// position.
    ///
    /// A matching leaf disappears; a match with one child is replaced by
    /// that child; a match with two children takes the leftmost value of its
    /// right subtree and that value is then removed from the right subtree.
    /// The leftmost value is the in-order successor only when the subtree
    /// happens to be value-ordered; level-order insertion does not guarantee
    /// that, and the original relinking is reproduced as-is.
    ///
    /// On a miss the removal descends into both subtrees, since level-order
    /// placement can land equal values on either side.
    pub fn remove(&mut self, target: &T)
    where
        T: PartialEq + Clone,
    {
        let root = self.root.take();
        self.root = Self::remove_from(root, target);
    }

    fn remove_from(node: Option<Box<Node<T>>>, target: &T) -> Option<Box<Node<T>>>
    where
        T: PartialEq + Clone,
    {
        let mut node = node?;

        if node.value == *target {
            return match (node.left.take(), node.right.take()) {
                (None, None) => None,
                (None, Some(right)) => Some(right),
                (Some(left), None) => Some(left),
                (Some(left), Some(right)) => {
                    let replacement = Self::leftmost(&right).clone();
                    node.left = Some(left);
                    node.right = Self::remove_from(Some(right), &replacement);
                    node.value = replacement;
                    Some(node)
                }
            };
        }

        let left = node.left.take();
        node.left = Self::remove_from(left, target);
        let right = node.right.take();
        node.right = Self::remove_from(right, target);
        Some(node)
    }

    /// Follows left children as far as possible and returns that value.
    fn leftmost(node: &Node<T>) -> &T {
        let mut current = node;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        &current.value
    }

    /// Renders the tree as one line per node, in-order, each line indented
    /// two spaces per depth level (root at depth 0). An empty tree renders
    /// the single [`EMPTY_TREE`] sentinel line.
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        let Some(root) = self.root.as_deref() else {
            return format!("{EMPTY_TREE}\n");
        };

        let mut out = String::new();
        let mut stack: Vec<(&Node<T>, usize)> = Vec::new();
        let mut next = Some((root, 0));

        while next.is_some() || !stack.is_empty() {
            while let Some(entry) = next {
                next = entry.0.left.as_deref().map(|left| (left, entry.1 + 1));
                stack.push(entry);
            }
            if let Some((node, depth)) = stack.pop() {
                for _ in 0..depth {
                    out.push_str(INDENT);
                }
                let _ = writeln!(out, "{}", node.value);
                next = node.right.as_deref().map(|right| (right, depth + 1));
            }
        }

        out
    }

    /// Snapshots the values in breadth-first order.
    ///
    /// With level-order insertion and no deletions this is exactly the
    /// insertion sequence, which makes it the natural way to assert
    /// placement in tests.
    pub fn values_level_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut values = Vec::new();
        let mut pending = VecDeque::new();
        pending.extend(self.root.as_deref());

        while let Some(node) = pending.pop_front() {
            values.push(node.value.clone());
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }

        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_fills_levels_left_to_right() {
        let mut tree = BinaryTree::new();
        for v in [10, 20, 30, 40, 50, 60, 70] {
            tree.insert(v);
        }

        // Position is insertion order, not value order.
        assert_eq!(tree.values_level_order(), vec![10, 20, 30, 40, 50, 60, 70]);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn test_insert_refills_vacated_slot() {
        let mut tree = BinaryTree::new();
        for v in [1, 2, 3] {
            tree.insert(v);
        }

        // Removing the left leaf frees its slot; the breadth-first scan
        // walks past the full root and lands the next insert there.
        tree.remove(&2);
        tree.insert(4);
        assert_eq!(tree.values_level_order(), vec![1, 4, 3]);

        // Root and both children are full again; the scan descends a level.
        tree.insert(5);
        assert_eq!(tree.values_level_order(), vec![1, 4, 3, 5]);
    }

    #[test]
    fn test_insert_accepts_duplicates() {
        let mut tree = BinaryTree::new();
        tree.insert(5);
        tree.insert(5);
        tree.insert(5);

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.values_level_order(), vec![5, 5, 5]);
    }

    #[test]
    fn test_contains_on_empty_tree() {
        let tree: BinaryTree<i64> = BinaryTree::new();
        assert!(!tree.contains(&42));
    }

    #[test]
    fn test_contains_is_exhaustive() {
        let mut tree = BinaryTree::new();
        // 1 lands at the bottom of the left spine-ish layout; an ordered
        // lookup starting from 9 would never find it.
        for v in [9, 8, 1, 2, 3] {
            tree.insert(v);
        }

        assert!(tree.contains(&1));
        assert!(tree.contains(&3));
        assert!(!tree.contains(&4));
    }

    #[test]
    fn test_contains_is_idempotent() {
        let mut tree = BinaryTree::new();
        tree.insert("hello".to_string());

        for _ in 0..3 {
            assert!(tree.contains(&"hello".to_string()));
            assert!(!tree.contains(&"world".to_string()));
        }
    }

    #[test]
    fn test_remove_on_empty_tree_is_noop() {
        let mut tree: BinaryTree<i64> = BinaryTree::new();
        tree.remove(&1);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_leaf() {
        let mut tree = BinaryTree::new();
        tree.insert(1);
        tree.insert(2);

        tree.remove(&2);
        assert!(!tree.contains(&2));
        assert_eq!(tree.values_level_order(), vec![1]);
    }

    #[test]
    fn test_remove_root_of_single_node_tree() {
        let mut tree = BinaryTree::new();
        tree.insert(1);
        tree.remove(&1);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_remove_node_with_one_child() {
        let mut tree = BinaryTree::new();
        // Level order: 1 at root, 2 left, 3 right, 4 under 2.
        for v in [1, 2, 3, 4] {
            tree.insert(v);
        }

        tree.remove(&2);
        // 2 had only a left child (4), which takes its place.
        assert_eq!(tree.values_level_order(), vec![1, 4, 3]);
    }

    #[test]
    fn test_remove_node_with_two_children_ordered_layout() {
        let mut tree = BinaryTree::new();
        // This insertion order happens to produce a value-ordered tree, the
        // one case where the successor step behaves like textbook BST
        // deletion.
        for v in [4, 2, 6, 1, 3, 5, 7] {
            tree.insert(v);
        }

        tree.remove(&4);
        assert!(!tree.contains(&4));
        // Root takes 5, the leftmost value of its right subtree.
        assert_eq!(tree.values_level_order(), vec![5, 2, 6, 1, 3, 7]);
    }

    #[test]
    fn test_remove_node_with_two_children_unordered_layout() {
        let mut tree = BinaryTree::new();
        // Not value-ordered: 1 at root, children 2 and 3. The replacement is
        // the leftmost value of the right subtree (3), regardless of whether
        // it is a true in-order successor.
        for v in [1, 2, 3] {
            tree.insert(v);
        }

        tree.remove(&1);
        assert!(!tree.contains(&1));
        assert_eq!(tree.values_level_order(), vec![3, 2]);
    }

    #[test]
    fn test_remove_descends_into_both_subtrees() {
        let mut tree = BinaryTree::new();
        // A miss at the root removes matches on both sides.
        for v in ["root", "x", "x"] {
            tree.insert(v.to_string());
        }

        tree.remove(&"x".to_string());
        assert_eq!(tree.values_level_order(), vec!["root".to_string()]);
    }

    #[test]
    fn test_remove_duplicate_at_root_keeps_one() {
        let mut tree = BinaryTree::new();
        for v in ["x", "x", "x"] {
            tree.insert(v.to_string());
        }

        // Root matches with two children; its value is replaced from the
        // right subtree and that occurrence is removed.
        tree.remove(&"x".to_string());
        assert_eq!(tree.len(), 2);
        assert!(tree.contains(&"x".to_string()));
    }

    #[test]
    fn test_insert_search_round_trip() {
        let mut tree = BinaryTree::new();
        for v in [3.5, -0.25, 100.0] {
            tree.insert(v);
            assert!(tree.contains(&v));
        }
    }

    #[test]
    fn test_render_empty_tree() {
        let tree: BinaryTree<i64> = BinaryTree::new();
        assert_eq!(tree.render(), "Empty Tree\n");
    }

    #[test]
    fn test_render_single_node() {
        let mut tree = BinaryTree::new();
        tree.insert(5);
        assert_eq!(tree.render(), "5\n");
    }

    #[test]
    fn test_render_in_order_with_depth_indent() {
        let mut tree = BinaryTree::new();
        // 1 at root, 2 left, 3 right.
        for v in [1, 2, 3] {
            tree.insert(v);
        }

        assert_eq!(tree.render(), "  2\n1\n  3\n");
    }

    #[test]
    fn test_render_two_levels_deep() {
        let mut tree = BinaryTree::new();
        for v in [1, 2, 3, 4, 5] {
            tree.insert(v);
        }

        // In-order: 4 (depth 2), 2 (depth 1), 5 (depth 2), 1 (root), 3.
        assert_eq!(tree.render(), "    4\n  2\n    5\n1\n  3\n");
    }

    #[test]
    fn test_len_tracks_structure() {
        let mut tree = BinaryTree::new();
        assert_eq!(tree.len(), 0);

        for v in 0..32 {
            tree.insert(v);
        }
        assert_eq!(tree.len(), 32);

        tree.remove(&31);
        assert_eq!(tree.len(), 31);
    }

    #[test]
    fn test_deep_tree_does_not_recurse_on_traversal() {
        // Level-order insertion keeps depth logarithmic, so go wide instead
        // of deep and make sure the iterative traversals hold up.
        let mut tree = BinaryTree::new();
        for v in 0..10_000 {
            tree.insert(v);
        }

        assert_eq!(tree.len(), 10_000);
        assert!(tree.contains(&9_999));
        assert!(!tree.contains(&10_000));
    }
}
