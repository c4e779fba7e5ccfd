//! Binary search tree symbol table
//!
//! Unbalanced BST with exclusively owned children. Every node caches the
//! size of its subtree so `size`, `rank` and `select` never walk the whole
//! tree.
//!
//! Ascending or descending inserts degrade the tree into a chain as deep as
//! the table is large, so every walk below is a loop over links rather than
//! a recursion, and dropping the tree unlinks nodes onto a heap stack.

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use tracing::{debug, trace};

use crate::error::Result;

use super::SymbolTable;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// A tree node
///
/// ## Invariants
/// - every key in `left` < `key` < every key in `right`
/// - `size == size(left) + size(right) + 1`
pub struct Node<K, V> {
    key: K,
    value: V,
    size: usize,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Box<Self> {
        Box::new(Self {
            key,
            value,
            size: 1,
            left: None,
            right: None,
        })
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// Cached number of nodes in this subtree, including this one
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn left(&self) -> Option<&Node<K, V>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<K, V>> {
        self.right.as_deref()
    }

    /// Recompute the cached size from the children
    fn update_size(&mut self) {
        self.size = size_of(&self.left) + size_of(&self.right) + 1;
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

fn size_of<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

/// Symbol table backed by a binary search tree
pub struct BinarySearchTree<K, V> {
    root: Link<K, V>,
}

impl<K: Ord, V> BinarySearchTree<K, V> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Root node, for inspection
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// All entries in key order
    fn entries(&self) -> Vec<(&K, &V)> {
        let mut out = Vec::with_capacity(self.size());
        let mut stack = Vec::new();
        let mut link = self.root.as_deref();

        loop {
            while let Some(node) = link {
                stack.push(node);
                link = node.left.as_deref();
            }
            let Some(node) = stack.pop() else {
                break;
            };
            out.push((&node.key, &node.value));
            link = node.right.as_deref();
        }

        out
    }
}

impl<K: Ord, V> Default for BinarySearchTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for BinarySearchTree<K, V> {
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

// =============================================================================
// Link Walks
// =============================================================================

/// Node holding `key`, if any
fn find<'a, K: Ord, V>(root: &'a Link<K, V>, key: &K) -> Option<&'a Node<K, V>> {
    let mut link = root.as_deref();

    while let Some(node) = link {
        match key.cmp(&node.key) {
            Ordering::Less => link = node.left.as_deref(),
            Ordering::Greater => link = node.right.as_deref(),
            Ordering::Equal => return Some(node),
        }
        trace!(size = node.size, "get: descend");
    }

    None
}

/// Walk toward `key`, calling `on_path` for every node stepped over
///
/// Returns the link holding `key`, or the empty link where it belongs.
fn seek<'a, K: Ord, V>(
    mut link: &'a mut Link<K, V>,
    key: &K,
    mut on_path: impl FnMut(&mut Node<K, V>),
) -> &'a mut Link<K, V> {
    loop {
        let ordering = link.as_deref().map(|node| key.cmp(&node.key));
        let Some(ordering) = ordering else {
            return link;
        };
        if ordering == Ordering::Equal {
            return link;
        }

        match link {
            Some(node) => {
                on_path(node);
                trace!(size = node.size, ?ordering, "descend");
                link = if ordering == Ordering::Less {
                    &mut node.left
                } else {
                    &mut node.right
                };
            }
            None => return link,
        }
    }
}

/// Detach the minimum node below `link`
///
/// The detached node comes back with no children and size 1; its right
/// child takes its place and sizes along the left spine drop by one.
fn pop_min<K, V>(mut link: &mut Link<K, V>) -> Option<Box<Node<K, V>>> {
    loop {
        if link.as_deref()?.left.is_none() {
            break;
        }
        match link {
            Some(node) => {
                node.size -= 1;
                link = &mut node.left;
            }
            None => return None,
        }
    }

    let mut min = link.take()?;
    *link = min.right.take();
    min.size = 1;
    Some(min)
}

/// Replacement subtree for a node being deleted
fn unlink<K, V>(node: Box<Node<K, V>>) -> Link<K, V> {
    let Node { left, right, .. } = *node;

    let Some(left) = left else {
        return right;
    };
    let Some(right) = right else {
        return Some(left);
    };

    // Two children: the successor takes this node's place.
    let mut rest = Some(right);
    match pop_min(&mut rest) {
        Some(mut successor) => {
            successor.left = Some(left);
            successor.right = rest;
            successor.update_size();
            Some(successor)
        }
        None => Some(left),
    }
}

// =============================================================================
// SymbolTable Implementation
// =============================================================================

impl<K: Ord, V> SymbolTable<K, V> for BinarySearchTree<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        find(&self.root, key).map(|node| &node.value)
    }

    fn put(&mut self, key: K, value: V) -> Result<()> {
        let grows = find(&self.root, &key).is_none();

        let slot = seek(&mut self.root, &key, |node| {
            if grows {
                node.size += 1;
            }
        });

        match slot {
            Some(node) => node.value = value,
            None => *slot = Some(Node::new(key, value)),
        }
        Ok(())
    }

    fn delete(&mut self, key: &K) {
        if find(&self.root, key).is_none() {
            return;
        }

        let slot = seek(&mut self.root, key, |node| node.size -= 1);
        if let Some(node) = slot.take() {
            debug!(
                has_left = node.left.is_some(),
                has_right = node.right.is_some(),
                "deleting node"
            );
            *slot = unlink(node);
        }
    }

    fn size(&self) -> usize {
        size_of(&self.root)
    }

    fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    fn rank(&self, key: &K) -> usize {
        let mut rank = 0;
        let mut link = self.root.as_deref();

        while let Some(node) = link {
            match key.cmp(&node.key) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Equal => return rank + size_of(&node.left),
                Ordering::Greater => {
                    rank += size_of(&node.left) + 1;
                    link = node.right.as_deref();
                }
            }
        }

        rank
    }

    fn select(&self, mut k: usize) -> Option<&K> {
        let mut link = self.root.as_deref();

        while let Some(node) = link {
            let left = size_of(&node.left);
            match k.cmp(&left) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Equal => return Some(&node.key),
                Ordering::Greater => {
                    k -= left + 1;
                    link = node.right.as_deref();
                }
            }
        }

        None
    }

    fn delete_min(&mut self) {
        if pop_min(&mut self.root).is_some() {
            debug!("deleted minimum node");
        }
    }

    fn keys(&self) -> Vec<&K> {
        self.entries().into_iter().map(|(key, _)| key).collect()
    }

    fn dump(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.to_string()
    }
}

/// Renders nodes breadth-first as `key[value]`, left child before right
impl<K: fmt::Display, V: fmt::Display> fmt::Display for BinarySearchTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut queue = VecDeque::new();
        queue.extend(self.root.as_deref());

        while let Some(node) = queue.pop_front() {
            write!(f, "{}[{}]", node.key, node.value)?;
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }

        Ok(())
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for BinarySearchTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}
