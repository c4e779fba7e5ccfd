//! # ordtable
//!
//! Ordered symbol tables with two interchangeable implementations:
//! - A sorted-array table searched by binary search ("rank")
//! - A binary search tree whose nodes cache their subtree size
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CLI / Line Scripts                           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ protocol (text commands)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Session                                 │
//! │            (Single Writer / Multi Reader)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ dyn SymbolTable
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────────┐      ┌──────────────────┐
//!   │ SortedArrayTable│      │ BinarySearchTree │
//!   │  (rank search)  │      │  (sized nodes)   │
//!   └─────────────────┘      └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod table;
pub mod protocol;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TableError, Result};
pub use config::{Backend, Config, GrowthPolicy};
pub use engine::Session;
pub use table::{BinarySearchTree, SortedArrayTable, SymbolTable};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of ordtable
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
