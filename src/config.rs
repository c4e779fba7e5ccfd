//! Configuration for ordtable
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TableError};

/// Main configuration for a table session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Backend Configuration
    // -------------------------------------------------------------------------
    /// Which symbol table implementation backs the session
    pub backend: Backend,

    // -------------------------------------------------------------------------
    // Sorted Array Configuration
    // -------------------------------------------------------------------------
    /// Initial capacity of the sorted array (ignored by the tree)
    pub capacity: usize,

    /// What a full sorted array does on insert of a new key
    pub growth: GrowthPolicy,
}

/// Symbol table implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Binary search tree with cached subtree sizes
    Bst,

    /// Parallel sorted arrays searched by rank
    SortedArray,
}

/// Behavior of a sorted array table when a new key arrives and it is full
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// Reject the insert with `TableError::CapacityExceeded`
    Fixed,

    /// Double the capacity and insert
    Double,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::Bst,
            capacity: 16,
            growth: GrowthPolicy::Fixed,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config for values no table can be built from
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(TableError::Config(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the table backend
    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set the initial sorted array capacity
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the sorted array growth policy
    pub fn growth(mut self, growth: GrowthPolicy) -> Self {
        self.config.growth = growth;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Bst => f.write_str("bst"),
            Backend::SortedArray => f.write_str("array"),
        }
    }
}

impl FromStr for Backend {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "bst" | "tree" => Ok(Backend::Bst),
            "array" | "sorted-array" => Ok(Backend::SortedArray),
            other => Err(TableError::Config(format!("unknown backend: {}", other))),
        }
    }
}
