//! Node Data Structures
//!
//! This module defines the core `Node` struct for the materialized-path
//! hierarchy, plus the update and delete-result types that accompany it.
//!
//! # Architecture
//!
//! - **Universal Node**: a single struct represents every hierarchy member
//! - **Materialized path**: `path` stores the full ancestor id chain, joined
//!   by the configured separator; it is maintained exclusively by
//!   [`crate::services::TreeService`], never by callers
//! - **Pure JSON properties**: all caller-specific fields live in the
//!   `properties` JSON object, so no schema migration is ever required
//!
//! # Examples
//!
//! ```rust
//! use pathtree_core::models::Node;
//! use serde_json::json;
//!
//! // A root candidate (path is assigned by the service on create)
//! let continent = Node::new("Europe".to_string(), None, json!({}));
//!
//! // A child candidate referencing its parent
//! let country = Node::new(
//!     "Sweden".to_string(),
//!     Some(continent.id.clone()),
//!     json!({ "population": 10_500_000 }),
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for Node operations
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid node ID: {0}")]
    InvalidId(String),

    #[error("Invalid parent reference: {0}")]
    InvalidParent(String),
}

/// A single hierarchy member backed by one record in the document store.
///
/// # Fields
///
/// - `id`: unique identifier (UUID by default, any separator-free string
///   accepted)
/// - `parent_id`: reference to the parent node; `None` denotes a root
/// - `path`: ancestor id chain in root-to-self order, separator-joined.
///   A root's path is its own id. Empty only for records whose path was
///   intentionally cleared, which opts them out of cascade handling.
/// - `content`: primary text payload
/// - `properties`: JSON object holding all caller-specific fields
///
/// The node's level (depth) is derived from `path` via
/// [`crate::path::PathCodec::level`], not stored. Children are never stored
/// on the record; the nested shape exists only as
/// [`crate::models::TreeNode`] output of tree assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier (UUID or caller-provided separator-free string)
    pub id: String,

    /// Parent node ID; `None` means this node is a root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,

    /// Materialized ancestor chain, maintained by the tree service
    #[serde(default)]
    pub path: String,

    /// Primary content/text of the node
    pub content: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,

    /// All caller-specific fields (pure JSON)
    pub properties: serde_json::Value,
}

impl Node {
    /// Create a new Node with an auto-generated UUID.
    ///
    /// The `path` field starts empty; it is computed and persisted by the
    /// tree service when the node is created through it.
    pub fn new(content: String, parent_id: Option<String>, properties: serde_json::Value) -> Self {
        Self::new_with_id(Uuid::new_v4().to_string(), content, parent_id, properties)
    }

    /// Create a new Node with a caller-provided id.
    ///
    /// Caller-provided ids let external systems keep their own identifiers;
    /// the id is validated against the configured separator when the node
    /// enters the tree service.
    pub fn new_with_id(
        id: String,
        content: String,
        parent_id: Option<String>,
        properties: serde_json::Value,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            parent_id,
            path: String::new(),
            content,
            created_at: now,
            modified_at: now,
            properties,
        }
    }

    /// Whether this node is a root (no parent reference).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Accepts either `T` or `null` for a field, wrapping in the outer Option.
/// A missing field stays `None` via `#[serde(default)]` on the struct field.
fn deserialize_optional_field<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::<T>::deserialize(deserializer)?))
}

/// Partial node update for PATCH-style writes.
///
/// All fields are optional; only provided fields are applied. `parent_id`
/// uses the double-`Option` pattern:
///
/// - `None`: don't change the parent
/// - `Some(None)`: clear the parent (the node becomes a root)
/// - `Some(Some(id))`: set the parent to the given id
///
/// The `path` slot is written by the tree service when it recomputes a
/// path; callers should not set it directly, since a hand-written path
/// bypasses the invariant maintenance that keeps `path` consistent with
/// `parent_id`.
///
/// # Examples
///
/// ```rust
/// use pathtree_core::models::NodeUpdate;
///
/// // Move a node under a new parent
/// let update = NodeUpdate::new().with_parent(Some("new-parent-id".to_string()));
///
/// // Promote a node to root
/// let update = NodeUpdate::new().with_parent(None);
///
/// // Content-only update: no parent change, no path recomputation
/// let update = NodeUpdate::new().with_content("Renamed".to_string());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeUpdate {
    /// Update primary content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Update parent reference (double-Option, see struct docs)
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_field"
    )]
    pub parent_id: Option<Option<String>>,

    /// Replace the stored path (written by the tree service during path
    /// recomputation and cascade rewrites)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Replace properties
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Value>,
}

impl NodeUpdate {
    /// Create a new empty NodeUpdate
    pub fn new() -> Self {
        Self::default()
    }

    /// Set content update
    pub fn with_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the parent reference; `None` promotes the node to root
    pub fn with_parent(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the stored path
    pub fn with_path(mut self, path: String) -> Self {
        self.path = Some(path);
        self
    }

    /// Set properties update
    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Check if update contains any changes
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.parent_id.is_none()
            && self.path.is_none()
            && self.properties.is_none()
    }
}

/// Result of a delete operation.
///
/// Deletes are idempotent: removing a node that does not exist succeeds,
/// with `existed = false` providing visibility for callers that care.
/// `removed` counts the records actually deleted, which under cascade
/// deletion includes the whole subtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResult {
    /// Whether the node existed before deletion
    pub existed: bool,

    /// Number of records removed (self plus subtree in cascade mode)
    pub removed: u64,
}

impl DeleteResult {
    /// The node existed; `removed` records were deleted
    pub fn existed(removed: u64) -> Self {
        Self {
            existed: true,
            removed,
        }
    }

    /// The node didn't exist (idempotent no-op)
    pub fn not_found() -> Self {
        Self {
            existed: false,
            removed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_node_has_empty_path() {
        let node = Node::new("hello".to_string(), None, json!({}));
        assert!(node.path.is_empty());
        assert!(node.is_root());
        assert_eq!(node.created_at, node.modified_at);
    }

    #[test]
    fn update_double_option_roundtrip() {
        // absent field: no change
        let update: NodeUpdate = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        assert_eq!(update.parent_id, None);

        // explicit null: clear parent
        let update: NodeUpdate = serde_json::from_str(r#"{"parentId":null}"#).unwrap();
        assert_eq!(update.parent_id, Some(None));

        // explicit value: set parent
        let update: NodeUpdate = serde_json::from_str(r#"{"parentId":"p1"}"#).unwrap();
        assert_eq!(update.parent_id, Some(Some("p1".to_string())));
    }

    #[test]
    fn empty_update_is_empty() {
        assert!(NodeUpdate::new().is_empty());
        assert!(!NodeUpdate::new().with_parent(None).is_empty());
    }

    #[test]
    fn delete_result_constructors() {
        assert!(DeleteResult::existed(3).existed);
        assert_eq!(DeleteResult::existed(3).removed, 3);
        assert!(!DeleteResult::not_found().existed);
    }
}
