//! Query Filter Types
//!
//! The typed query vocabulary the core hands to the document store:
//! structural keys derived from the hierarchy (id, parent, anchored path
//! match) plus caller-supplied extras (content search, property equality),
//! and the find options controlling projection, sort, and pagination.
//!
//! Structural keys are written by the query-derivation layer and override
//! any caller-set value for the same key; everything else a caller puts on
//! a filter passes through to the store unchanged.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::Node;

/// Sort direction for a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One (field, direction) pair of a multi-key sort specification.
///
/// `field` addresses the built-in node fields (`id`, `content`, `path`,
/// `createdAt`, `modifiedAt`) or, for any other name, a key inside the
/// node's `properties` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    /// Ascending sort on `field`
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    /// Descending sort on `field`
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Separator-anchored path predicate.
///
/// Encoding the anchor in a type (rather than a raw prefix string) means no
/// call site can accidentally build a filter that matches `"ab"` as a
/// descendant of `"a"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PathMatch {
    /// Strict descendants: path begins with `prefix + separator`.
    Descendants(String),

    /// The node itself or any descendant. Used by cascade deletion to
    /// remove a whole subtree in one store operation.
    Subtree(String),
}

impl PathMatch {
    /// Evaluate the predicate against a stored path.
    pub fn matches(&self, path: &str, separator: &str) -> bool {
        match self {
            PathMatch::Descendants(prefix) => {
                path.starts_with(prefix) && path[prefix.len()..].starts_with(separator)
            }
            PathMatch::Subtree(prefix) => {
                path == prefix
                    || (path.starts_with(prefix) && path[prefix.len()..].starts_with(separator))
            }
        }
    }
}

/// Exact-match predicate on one key of the `properties` object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    pub key: String,
    pub value: serde_json::Value,
}

/// Node filter for store queries.
///
/// All keys are optional and combine with AND semantics. `parent_id` uses
/// the double-`Option` pattern: `Some(None)` selects roots, `Some(Some(id))`
/// selects the immediate children of `id`, `None` leaves parentage
/// unconstrained.
///
/// # Examples
///
/// ```rust
/// use pathtree_core::models::{NodeFilter, PathMatch};
/// use serde_json::json;
///
/// // Immediate children of a node, restricted by a property
/// let filter = NodeFilter::new()
///     .with_parent(Some("eu".to_string()))
///     .with_property("kind", json!("country"));
///
/// // Every descendant of a subtree
/// let filter = NodeFilter::new().with_path(PathMatch::Descendants("eu".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFilter {
    /// Filter by specific node ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Filter by a set of IDs (`id IN (...)`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,

    /// Filter by parent: `Some(None)` = roots, `Some(Some(id))` = children of id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<String>>,

    /// Separator-anchored path predicate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathMatch>,

    /// Filter by content substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_contains: Option<String>,

    /// Exact-match filters on properties keys (all must hold)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_filters: Vec<PropertyFilter>,
}

impl NodeFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by node ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Filter by a set of IDs
    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = Some(ids);
        self
    }

    /// Filter by parent; `None` selects root nodes
    pub fn with_parent(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Filter by an anchored path predicate
    pub fn with_path(mut self, path: PathMatch) -> Self {
        self.path = Some(path);
        self
    }

    /// Filter by content substring
    pub fn with_content_contains(mut self, content: impl Into<String>) -> Self {
        self.content_contains = Some(content.into());
        self
    }

    /// Add an exact-match property filter (can be called multiple times)
    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.property_filters.push(PropertyFilter {
            key: key.into(),
            value,
        });
        self
    }
}

/// Options for `find`-style store queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FindOptions {
    /// Projection: `properties` keys (and `content`) to retain. The
    /// structural fields `id`, `parentId`, and `path` are always returned,
    /// since hierarchy maintenance and tree assembly depend on them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,

    /// Multi-key sort specification, applied in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortKey>,

    /// Limit number of results
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Offset for pagination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
}

impl FindOptions {
    /// Create empty options (no projection, store order)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the projection field list
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Append a sort key
    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort.push(key);
        self
    }

    /// Set result limit
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set result offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Compare two nodes under a multi-key sort specification.
///
/// Built-in fields compare natively (timestamps as timestamps, not
/// strings); any other field name addresses a `properties` key and
/// compares as JSON: numbers numerically, strings lexicographically,
/// booleans false-before-true, missing values last.
pub fn compare_by_keys(a: &Node, b: &Node, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ord = match key.field.as_str() {
            "id" => a.id.cmp(&b.id),
            "content" => a.content.cmp(&b.content),
            "path" => a.path.cmp(&b.path),
            "createdAt" | "created_at" => a.created_at.cmp(&b.created_at),
            "modifiedAt" | "modified_at" => a.modified_at.cmp(&b.modified_at),
            field => json_cmp(a.properties.get(field), b.properties.get(field)),
        };
        let ord = match key.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Total order over optional JSON values: missing/null sorts last; numbers,
/// strings, and booleans compare natively; mixed types fall back to their
/// serialized form.
fn json_cmp(a: Option<&serde_json::Value>, b: Option<&serde_json::Value>) -> Ordering {
    use serde_json::Value;

    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
