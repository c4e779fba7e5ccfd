//! Symbol Table Module
//!
//! Ordered key-value tables behind one shared contract.
//!
//! ## Responsibilities
//! - Lookup, insert-or-overwrite, and delete by key
//! - Constant-time size queries
//! - Ordered queries (min, max, rank, select, sorted keys)
//! - A diagnostic dump of the internal layout
//!
//! ## Implementations
//! - [`SortedArrayTable`]: parallel sorted arrays, binary search by rank.
//!   O(log n) lookup, O(n) insert/delete of a new key.
//! - [`BinarySearchTree`]: unbalanced BST whose nodes cache subtree sizes.
//!   O(height) for every operation.
//!
//! Both are drop-in substitutes: code written against [`SymbolTable`] works
//! with either, statically or as `Box<dyn SymbolTable<K, V>>`.

mod array;
mod bst;

use std::fmt::Display;

use crate::config::{Backend, Config};
use crate::error::Result;

pub use array::SortedArrayTable;
pub use bst::{BinarySearchTree, Node};

/// An ordered symbol table
///
/// Keys are unique and totally ordered. Putting an existing key replaces its
/// value and leaves `size` unchanged. Looking up or deleting an absent key is
/// not an error.
pub trait SymbolTable<K: Ord, V> {
    /// Value stored under `key`, if any
    fn get(&self, key: &K) -> Option<&V>;

    /// Insert `key` or overwrite its value
    fn put(&mut self, key: K, value: V) -> Result<()>;

    /// Remove `key` and its value; no-op when absent
    fn delete(&mut self, key: &K);

    /// Number of entries
    fn size(&self) -> usize;

    /// Smallest key
    fn min(&self) -> Option<&K>;

    /// Largest key
    fn max(&self) -> Option<&K>;

    /// Number of keys strictly less than `key`
    fn rank(&self, key: &K) -> usize;

    /// Key with exactly `k` smaller keys
    fn select(&self, k: usize) -> Option<&K>;

    /// Remove the smallest key; no-op when empty
    fn delete_min(&mut self);

    /// All keys in ascending order
    fn keys(&self) -> Vec<&K>;

    /// Diagnostic listing of the internal layout (not a stable format)
    fn dump(&self) -> String
    where
        K: Display,
        V: Display;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

/// Build the table selected by `config`
pub fn open<K, V>(config: &Config) -> Result<Box<dyn SymbolTable<K, V> + Send + Sync>>
where
    K: Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    config.validate()?;

    let table: Box<dyn SymbolTable<K, V> + Send + Sync> = match config.backend {
        Backend::Bst => Box::new(BinarySearchTree::new()),
        Backend::SortedArray => {
            let table = SortedArrayTable::with_growth(config.capacity, config.growth)?;
            Box::new(table)
        }
    };

    tracing::debug!(
        backend = %config.backend,
        capacity = config.capacity,
        "opened symbol table"
    );
    Ok(table)
}
