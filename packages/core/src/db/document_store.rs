//! DocumentStore Trait - Persistence Abstraction Layer
//!
//! This module defines the `DocumentStore` trait that abstracts the flat
//! document store underneath the tree service. The core issues filters and
//! field-set updates through this trait and never assumes anything about
//! how the backend executes them, so any store with find-by-filter and
//! update-by-id primitives can sit below the hierarchy logic.
//!
//! # Design Decisions
//!
//! 1. **Async-First**: all methods are async to support both embedded and
//!    network backends
//! 2. **Ownership Semantics**: insert takes the node by value; the caller
//!    clones first if it needs to retain the original
//! 3. **Error Handling**: `anyhow::Result` for flexible error context; the
//!    service layer converts failures into its typed errors and never
//!    retries on the caller's behalf
//! 4. **Missing is not an error**: lookups return `Option`/`bool` rather
//!    than failing, so callers decide what absence means
//!
//! # Examples
//!
//! ```rust,no_run
//! use pathtree_core::db::{DocumentStore, MemoryStore};
//! use pathtree_core::models::Node;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new("#"));
//!
//!     let node = Node::new("My note".to_string(), None, json!({}));
//!     let created = store.insert_node(node).await?;
//!     println!("Created node: {}", created.id);
//!     Ok(())
//! }
//! ```

use crate::models::{FindOptions, Node, NodeFilter, NodeUpdate};
use anyhow::Result;
use async_trait::async_trait;

/// Abstraction layer for flat node persistence.
///
/// Implementations must be `Send + Sync` so futures holding a store
/// reference can move between threads.
///
/// # Timestamp maintenance
///
/// `update_node` refreshes the record's `modified_at` alongside the applied
/// field set, the way a database trigger would, so cascade rewrites leave an
/// audit trail without the service threading timestamps through every plan.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new node record.
    ///
    /// # Errors
    ///
    /// Fails if a record with the same id already exists.
    async fn insert_node(&self, node: Node) -> Result<Node>;

    /// Find the first node matching `filter`.
    ///
    /// Returns `Ok(None)` when nothing matches (not an error). When the
    /// filter can match several records, the one with the lexicographically
    /// smallest path is returned, keeping lookups deterministic.
    async fn find_one(&self, filter: NodeFilter) -> Result<Option<Node>>;

    /// Find every node matching `filter`, shaped by `options`.
    ///
    /// Projection in `options.fields` restricts `content` and `properties`
    /// keys; `id`, `parent_id`, and `path` are always populated.
    async fn find(&self, filter: NodeFilter, options: FindOptions) -> Result<Vec<Node>>;

    /// Apply a field-set update to the node with the given id.
    ///
    /// This is the per-record bulk-update primitive the cascade rewrites
    /// are built on. Returns `false` when no record carries the id (a
    /// descendant can vanish between snapshot and rewrite; that is not a
    /// failure).
    async fn update_node(&self, id: &str, update: NodeUpdate) -> Result<bool>;

    /// Delete the node with the given id. Returns whether it existed.
    async fn delete_node(&self, id: &str) -> Result<bool>;

    /// Delete every node matching `filter` in one operation, returning the
    /// number of records removed.
    async fn delete_many(&self, filter: NodeFilter) -> Result<u64>;
}
