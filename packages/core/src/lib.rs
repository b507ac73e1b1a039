//! PathTree Core - Materialized-Path Hierarchy Layer
//!
//! This crate maintains a tree relationship among records in a flat
//! document store using the materialized-path pattern: every record stores
//! a direct parent reference and a precomputed `path` string encoding its
//! ancestor id chain. The crate keeps `path` consistent with `parent_id`
//! under insert, move, and delete (including the cascading descendant
//! rewrites a move entails) and derives ancestor/descendant/subtree
//! queries from separator-anchored prefix matching, so reads never need
//! recursive traversal.
//!
//! # Architecture
//!
//! - **Abstract store**: the underlying document store is an external
//!   collaborator behind the [`db::DocumentStore`] trait; the core only
//!   issues filters and field-set updates
//! - **Explicit plans**: path maintenance classifies each write and
//!   expands it into a plan of self-update plus descendant rewrites before
//!   anything is persisted
//! - **Best-effort cascades**: descendant rewrites run through a bounded
//!   worker pool without a spanning transaction; retrying a failed
//!   operation converges because correct paths rewrite as no-ops
//!
//! # Modules
//!
//! - [`models`] - data structures (Node, filters, nested tree output)
//! - [`path`] - the pure path string codec
//! - [`db`] - store abstraction and the in-memory reference backend
//! - [`services`] - tree service, path maintenance, tree assembly

pub mod db;
pub mod models;
pub mod path;
pub mod services;

// Re-export commonly used types
pub use db::{DocumentStore, MemoryStore, StoreError};
pub use models::*;
pub use path::PathCodec;
pub use services::*;
