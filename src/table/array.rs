//! Sorted array symbol table
//!
//! Keys and values live in two parallel vectors kept in key order. Lookups
//! binary-search the key vector; inserts and deletes shift the tail.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::config::GrowthPolicy;
use crate::error::{Result, TableError};

use super::SymbolTable;

/// Symbol table backed by parallel sorted arrays
///
/// ## Invariants
/// - `keys` is strictly increasing
/// - `values[i]` belongs to `keys[i]`
/// - `keys.len() == values.len() <= capacity`
#[derive(Debug, Clone)]
pub struct SortedArrayTable<K, V> {
    keys: Vec<K>,
    values: Vec<V>,

    /// Logical capacity; entries beyond it need a grow or are rejected
    capacity: usize,

    growth: GrowthPolicy,
}

impl<K: Ord, V> SortedArrayTable<K, V> {
    /// Create a fixed-capacity table
    ///
    /// Fails with `InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_growth(capacity, GrowthPolicy::Fixed)
    }

    /// Create a table with the given growth policy
    pub fn with_growth(capacity: usize, growth: GrowthPolicy) -> Result<Self> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity(capacity));
        }

        Ok(Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            capacity,
            growth,
        })
    }

    /// Current logical capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Growth policy applied when full
    pub fn growth(&self) -> GrowthPolicy {
        self.growth
    }

    /// Valid keys and values, in key order
    pub fn as_slices(&self) -> (&[K], &[V]) {
        (&self.keys, &self.values)
    }

    /// Binary search for `key`
    ///
    /// Returns its index when present, otherwise the number of keys less
    /// than it (the slot that keeps the arrays sorted).
    fn search(&self, key: &K) -> usize {
        let mut low = 0;
        let mut high = self.keys.len();

        while low < high {
            let mid = low + (high - low) / 2;
            trace!(low, mid, high, "search step");
            match self.keys[mid].cmp(key) {
                Ordering::Less => low = mid + 1,
                Ordering::Greater => high = mid,
                Ordering::Equal => return mid,
            }
        }

        low
    }

    /// Index of `key` if it is stored
    fn position(&self, key: &K) -> Option<usize> {
        let i = self.search(key);
        match self.keys.get(i) {
            Some(k) if k == key => Some(i),
            _ => None,
        }
    }

    /// Make room for one more entry, or fail under a fixed policy
    fn reserve_slot(&mut self) -> Result<()> {
        match self.growth {
            GrowthPolicy::Fixed => Err(TableError::CapacityExceeded {
                capacity: self.capacity,
            }),
            GrowthPolicy::Double => {
                let new_capacity = self
                    .capacity
                    .checked_mul(2)
                    .ok_or(TableError::CapacityExceeded {
                        capacity: self.capacity,
                    })?;

                debug!(
                    from = self.capacity,
                    to = new_capacity,
                    "growing sorted array"
                );

                let extra = new_capacity - self.keys.len();
                self.keys.reserve_exact(extra);
                self.values.reserve_exact(extra);
                self.capacity = new_capacity;
                Ok(())
            }
        }
    }
}

impl<K: Ord, V> SymbolTable<K, V> for SortedArrayTable<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        if self.is_empty() {
            return None;
        }
        self.position(key).map(|i| &self.values[i])
    }

    fn put(&mut self, key: K, value: V) -> Result<()> {
        let i = self.search(&key);

        if i < self.keys.len() && self.keys[i] == key {
            self.values[i] = value;
            return Ok(());
        }

        if self.keys.len() == self.capacity {
            self.reserve_slot()?;
        }

        trace!(
            rank = i,
            shifted = self.keys.len() - i,
            "inserting into sorted array"
        );
        self.keys.insert(i, key);
        self.values.insert(i, value);
        Ok(())
    }

    fn delete(&mut self, key: &K) {
        if let Some(i) = self.position(key) {
            debug!(
                rank = i,
                shifted = self.keys.len() - i - 1,
                "removing from sorted array"
            );
            self.keys.remove(i);
            self.values.remove(i);
        }
    }

    fn size(&self) -> usize {
        self.keys.len()
    }

    fn min(&self) -> Option<&K> {
        self.keys.first()
    }

    fn max(&self) -> Option<&K> {
        self.keys.last()
    }

    fn rank(&self, key: &K) -> usize {
        self.search(key)
    }

    fn select(&self, k: usize) -> Option<&K> {
        self.keys.get(k)
    }

    fn delete_min(&mut self) {
        if !self.keys.is_empty() {
            debug!(
                shifted = self.keys.len() - 1,
                "removing minimum from sorted array"
            );
            self.keys.remove(0);
            self.values.remove(0);
        }
    }

    fn keys(&self) -> Vec<&K> {
        self.keys.iter().collect()
    }

    fn dump(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.to_string()
    }
}

/// Renders as `{[k,v][k,v]...}`
impl<K: fmt::Display, V: fmt::Display> fmt::Display for SortedArrayTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (key, value) in self.keys.iter().zip(&self.values) {
            write!(f, "[{},{}]", key, value)?;
        }
        f.write_str("}")
    }
}
