//! Service Layer Error Types
//!
//! Error types for hierarchy operations. Every failure is reported to the
//! immediate caller of the triggering operation; nothing is suppressed or
//! silently retried, and no error here is fatal to the process.

use crate::models::ValidationError;
use thiserror::Error;

/// Tree operation errors
///
/// # Cascade failures and partial state
///
/// A cascade (reparent rewrite or reparent-on-delete) is best-effort: there
/// is no transactional boundary spanning the whole set of descendant
/// updates, so a [`TreeError::CascadeFailed`] means the tree may be in a
/// partially-rewritten state. Retrying the same operation is safe:
/// recomputing an already-correct descendant path is a no-op rewrite.
#[derive(Error, Debug)]
pub enum TreeError {
    /// Node not found by ID
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// The referenced parent id does not resolve to an existing node.
    /// Fatal to the triggering write; no mutation is applied.
    #[error("Parent node not found: {parent_id}")]
    ParentNotFound { parent_id: String },

    /// Reparenting a node under itself or one of its own descendants
    #[error("Cycle detected: cannot move {node_id} under {parent_id}")]
    CycleDetected { node_id: String, parent_id: String },

    /// One or more cascade updates failed; applied rewrites are not rolled
    /// back
    #[error("Cascade failed for {failed} node(s): {context}")]
    CascadeFailed { context: String, failed: usize },

    /// Validation failed for node
    #[error("Node validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Malformed arguments, rejected before any store interaction
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Store operation failed; propagated unchanged, never retried here
    #[error("Query failed: {0}")]
    QueryFailed(String),
}

impl TreeError {
    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a parent not found error
    pub fn parent_not_found(parent_id: impl Into<String>) -> Self {
        Self::ParentNotFound {
            parent_id: parent_id.into(),
        }
    }

    /// Create a cycle detected error
    pub fn cycle_detected(node_id: impl Into<String>, parent_id: impl Into<String>) -> Self {
        Self::CycleDetected {
            node_id: node_id.into(),
            parent_id: parent_id.into(),
        }
    }

    /// Create a cascade failed error
    pub fn cascade_failed(context: impl Into<String>, failed: usize) -> Self {
        Self::CascadeFailed {
            context: context.into(),
            failed,
        }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a query failed error
    pub fn query_failed(msg: impl Into<String>) -> Self {
        Self::QueryFailed(msg.into())
    }
}
