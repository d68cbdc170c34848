//! A generic prefix tree keyed by path segments.
//!
//! `PathTree<T>` provides O(k) operations where k is the path depth. Each node
//! can optionally hold a value, and has children indexed by path segment.

use crate::Path;
use std::collections::BTreeMap;

/// A prefix tree keyed by path segments.
///
/// Each node owns an optional value of type T plus children indexed by
/// segment string, so paths sharing a prefix share the prefix's nodes.
/// `BTreeMap` keeps enumeration order deterministic.
///
/// The tree is append-only: walking to a path creates any missing
/// intermediate nodes, and nothing ever removes one.
///
/// # Example
///
/// ```rust
/// use pelorus_store::{PathTree, path};
///
/// let mut tree: PathTree<i32> = PathTree::new();
/// tree.insert(&path!("a.b"), 1);
/// tree.insert(&path!("a.b.c"), 2);
///
/// assert_eq!(tree.get(&path!("a.b")), Some(&1));
/// assert_eq!(tree.get(&path!("a")), None);
/// ```
#[derive(Debug, Clone)]
pub struct PathTree<T> {
    value: Option<T>,
    children: BTreeMap<String, PathTree<T>>,
}

impl<T> Default for PathTree<T> {
    fn default() -> Self {
        Self {
            value: None,
            children: BTreeMap::new(),
        }
    }
}

impl<T> PathTree<T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigate to a node, creating intermediate nodes as needed.
    fn node_mut_or_create(&mut self, path: &Path) -> &mut PathTree<T> {
        let mut current = self;
        for segment in &path.segments {
            current = current.children.entry(segment.clone()).or_default();
        }
        current
    }

    /// Navigate to a node if it exists.
    fn node(&self, path: &Path) -> Option<&PathTree<T>> {
        let mut current = self;
        for segment in &path.segments {
            current = current.children.get(segment)?;
        }
        Some(current)
    }

    /// Set the value at a path, creating nodes along the way.
    /// Returns the previous value if any.
    pub fn insert(&mut self, path: &Path, value: T) -> Option<T> {
        self.node_mut_or_create(path).value.replace(value)
    }

    /// Mutable access to the value slot at a path, creating nodes along the
    /// way. The slot is `None` until something is stored there.
    pub fn slot_mut(&mut self, path: &Path) -> &mut Option<T> {
        &mut self.node_mut_or_create(path).value
    }

    /// Reference to the value at the exact path, if set.
    pub fn get(&self, path: &Path) -> Option<&T> {
        self.node(path)?.value.as_ref()
    }

    /// Reference to the subtree rooted at path, if the node exists.
    pub fn subtree(&self, path: &Path) -> Option<&PathTree<T>> {
        self.node(path)
    }

    /// This node's own value, if set.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Iterate this node's direct children as `(segment, subtree)` pairs.
    pub fn children(&self) -> impl Iterator<Item = (&str, &PathTree<T>)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Count of values in the tree (not nodes).
    pub fn len(&self) -> usize {
        let own = usize::from(self.value.is_some());
        own + self.children.values().map(|child| child.len()).sum::<usize>()
    }

    /// True if no values anywhere in the tree.
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.values().all(|c| c.is_empty())
    }
}
