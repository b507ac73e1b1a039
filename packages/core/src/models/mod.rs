//! Data Models
//!
//! Core data structures used throughout the crate:
//!
//! - `Node` - flat hierarchy record with its materialized path
//! - `NodeUpdate` / `DeleteResult` - write-side companions
//! - `NodeFilter` / `FindOptions` - typed query vocabulary for the store
//! - `TreeNode` - nested output of tree assembly

mod filter;
mod node;
mod tree;

pub use filter::{
    compare_by_keys, FindOptions, NodeFilter, PathMatch, PropertyFilter, SortDirection, SortKey,
};
pub use node::{DeleteResult, Node, NodeUpdate, ValidationError};
pub use tree::TreeNode;
