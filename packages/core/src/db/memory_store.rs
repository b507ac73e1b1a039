//! In-Memory Reference Backend
//!
//! A complete [`DocumentStore`] implementation over a `HashMap` guarded by
//! an async `RwLock`. It exists so the hierarchy logic can be exercised
//! end-to-end without a database process, and doubles as the executable
//! specification of how a real backend must interpret [`NodeFilter`] and
//! [`FindOptions`], in particular the separator-anchored path matching.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::db::{DocumentStore, StoreError};
use crate::models::{compare_by_keys, FindOptions, Node, NodeFilter, NodeUpdate};

/// Reference store: a flat id-keyed map of node records.
pub struct MemoryStore {
    nodes: RwLock<HashMap<String, Node>>,
    separator: String,
}

impl MemoryStore {
    /// Create an empty store that anchors path predicates on `separator`.
    ///
    /// The separator must match the one configured on the tree service
    /// using this store, or prefix matching would anchor on the wrong
    /// token.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
            separator: separator.into(),
        }
    }

    /// Number of records currently stored
    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }

    fn matches(&self, node: &Node, filter: &NodeFilter) -> bool {
        if let Some(id) = &filter.id {
            if &node.id != id {
                return false;
            }
        }
        if let Some(ids) = &filter.ids {
            if !ids.iter().any(|id| id == &node.id) {
                return false;
            }
        }
        if let Some(parent) = &filter.parent_id {
            if &node.parent_id != parent {
                return false;
            }
        }
        if let Some(path) = &filter.path {
            if !path.matches(&node.path, &self.separator) {
                return false;
            }
        }
        if let Some(needle) = &filter.content_contains {
            if !node.content.contains(needle.as_str()) {
                return false;
            }
        }
        for prop in &filter.property_filters {
            if node.properties.get(&prop.key) != Some(&prop.value) {
                return false;
            }
        }
        true
    }

    /// Apply the projection rule: structural fields survive unconditionally,
    /// `content` and `properties` keys only when listed.
    fn project(node: &Node, fields: &Option<Vec<String>>) -> Node {
        let mut projected = node.clone();
        if let Some(fields) = fields {
            if !fields.iter().any(|f| f == "content") {
                projected.content = String::new();
            }
            if let serde_json::Value::Object(props) = &mut projected.properties {
                props.retain(|key, _| fields.iter().any(|f| f == key));
            }
        }
        projected
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_node(&self, node: Node) -> Result<Node> {
        let mut nodes = self.nodes.write().await;
        if nodes.contains_key(&node.id) {
            return Err(StoreError::duplicate_id(&node.id).into());
        }
        nodes.insert(node.id.clone(), node.clone());
        Ok(node)
    }

    async fn find_one(&self, filter: NodeFilter) -> Result<Option<Node>> {
        let nodes = self.nodes.read().await;
        let found = nodes
            .values()
            .filter(|n| self.matches(n, &filter))
            .min_by(|a, b| a.path.cmp(&b.path));
        Ok(found.cloned())
    }

    async fn find(&self, filter: NodeFilter, options: FindOptions) -> Result<Vec<Node>> {
        let nodes = self.nodes.read().await;
        let mut matched: Vec<&Node> = nodes.values().filter(|n| self.matches(n, &filter)).collect();
        if options.sort.is_empty() {
            // stable fallback so results are deterministic across runs
            matched.sort_by(|a, b| a.path.cmp(&b.path));
        } else {
            matched.sort_by(|a, b| compare_by_keys(a, b, &options.sort));
        }

        let offset = options.offset.unwrap_or(0);
        let limit = options.limit.unwrap_or(usize::MAX);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|n| Self::project(n, &options.fields))
            .collect())
    }

    async fn update_node(&self, id: &str, update: NodeUpdate) -> Result<bool> {
        let mut nodes = self.nodes.write().await;
        let Some(node) = nodes.get_mut(id) else {
            return Ok(false);
        };
        if let Some(content) = update.content {
            node.content = content;
        }
        if let Some(parent_id) = update.parent_id {
            node.parent_id = parent_id;
        }
        if let Some(path) = update.path {
            node.path = path;
        }
        if let Some(properties) = update.properties {
            node.properties = properties;
        }
        node.modified_at = Utc::now();
        Ok(true)
    }

    async fn delete_node(&self, id: &str) -> Result<bool> {
        let mut nodes = self.nodes.write().await;
        Ok(nodes.remove(id).is_some())
    }

    async fn delete_many(&self, filter: NodeFilter) -> Result<u64> {
        let mut nodes = self.nodes.write().await;
        let before = nodes.len();
        let matching: Vec<String> = nodes
            .values()
            .filter(|n| self.matches(n, &filter))
            .map(|n| n.id.clone())
            .collect();
        for id in matching {
            nodes.remove(&id);
        }
        Ok((before - nodes.len()) as u64)
    }
}
