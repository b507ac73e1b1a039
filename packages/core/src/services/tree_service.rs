//! Tree Service - Hierarchy Maintenance and Queries
//!
//! The main business logic layer for hierarchy operations:
//!
//! - Write operations (create, update, move, delete) that keep every
//!   node's materialized path consistent with its parent reference
//! - Cascading descendant rewrites on reparent, with a bounded worker pool
//! - The configured deletion policy: cascade-delete or reparent-on-delete
//! - Read queries derived from the path encoding (children, descendants,
//!   ancestors) and nested tree reads
//!
//! # Consistency model
//!
//! Within one reparent, the node's own path update is persisted before any
//! descendant rewrite is issued; descendant matching uses the old path
//! captured before mutation. The cascade itself is best-effort: there is no
//! transaction spanning it, so a partial failure surfaces as
//! [`TreeError::CascadeFailed`] and already-applied rewrites stay in place.
//! Retrying the same operation converges, since rewriting an
//! already-correct path is a no-op. Two concurrent reparents over
//! overlapping subtrees can race; serializing them is the store's (or the
//! caller's) concern.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::db::DocumentStore;
use crate::models::{
    DeleteResult, FindOptions, Node, NodeFilter, NodeUpdate, PathMatch, SortKey, TreeNode,
    ValidationError,
};
use crate::path::{PathCodec, DEFAULT_SEPARATOR};
use crate::services::error::TreeError;
use crate::services::path_maintainer::{build_plan, PathAction, PathRewrite, WriteIntent};
use crate::services::tree_assembler::{assemble, AssembleArgs};

/// What happens to a node's subtree when the node is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteBehavior {
    /// Re-point every immediate child at the deleted node's own parent,
    /// cascading path rewrites through each child's subtree. Descendants
    /// survive with corrected ancestry.
    #[default]
    Reparent,

    /// Remove the node and its entire subtree in one store operation.
    Delete,
}

/// Tree-setup configuration, fixed per service instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Token joining ancestor ids inside a path. Must not appear in any
    /// node id.
    pub separator: String,

    /// Deletion policy for nodes with children
    pub on_delete: DeleteBehavior,

    /// Maximum in-flight cascade updates (descendant rewrites and
    /// per-child reparents on delete)
    pub num_workers: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            on_delete: DeleteBehavior::default(),
            num_workers: 5,
        }
    }
}

impl TreeConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the path separator token
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the deletion policy
    pub fn with_on_delete(mut self, on_delete: DeleteBehavior) -> Self {
        self.on_delete = on_delete;
        self
    }

    /// Set the cascade worker bound
    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    fn validate(&self) -> Result<(), TreeError> {
        if self.separator.is_empty() {
            return Err(TreeError::invalid_arguments("separator must be non-empty"));
        }
        if self.num_workers == 0 {
            return Err(TreeError::invalid_arguments("num_workers must be at least 1"));
        }
        Ok(())
    }
}

/// Arguments for children/descendants queries.
///
/// `filter` carries caller conditions merged into the derived query; the
/// structural key (parent or path prefix) always wins over a caller-set
/// value. `recursive` switches from immediate children to the whole
/// descendant set.
#[derive(Debug, Clone, Default)]
pub struct ChildrenQueryArgs {
    pub filter: NodeFilter,
    pub fields: Option<Vec<String>>,
    pub sort: Vec<SortKey>,
    pub recursive: bool,
}

/// Arguments for nested tree reads.
///
/// `root_id` scopes the tree to one document's subtree (its children
/// become the top-level entries); `None` reads the whole forest.
/// `sort` is applied per sibling group after assembly; the store-level
/// sort is always path-ascending, which assembly correctness depends on.
/// `min_level`/`max_level` are inclusive bounds on each node's own level.
#[derive(Debug, Clone, Default)]
pub struct TreeQueryArgs {
    pub root_id: Option<String>,
    pub filter: NodeFilter,
    pub fields: Option<Vec<String>>,
    pub sort: Vec<SortKey>,
    pub min_level: Option<u32>,
    pub max_level: Option<u32>,
}

/// Hierarchy service over an abstract document store.
///
/// Holds no mutable state of its own (the store is the only shared
/// resource), so the service is cheap to clone and safe to use from many
/// tasks concurrently.
///
/// # Examples
///
/// ```rust,no_run
/// use pathtree_core::db::MemoryStore;
/// use pathtree_core::models::Node;
/// use pathtree_core::services::{TreeConfig, TreeService};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = TreeConfig::new().with_separator(".");
///     let store = Arc::new(MemoryStore::new(config.separator.clone()));
///     let tree = TreeService::new(store, config)?;
///
///     let root = tree.create_node(Node::new("Europe".into(), None, json!({}))).await?;
///     let child = tree
///         .create_node(Node::new("Sweden".into(), Some(root.id.clone()), json!({})))
///         .await?;
///     assert_eq!(child.path, format!("{}.{}", root.id, child.id));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct TreeService {
    store: Arc<dyn DocumentStore>,
    codec: PathCodec,
    config: TreeConfig,
}

impl TreeService {
    /// Create a service over `store` with the given configuration.
    ///
    /// # Errors
    ///
    /// `InvalidArguments` for an empty separator or a zero worker bound.
    pub fn new(store: Arc<dyn DocumentStore>, config: TreeConfig) -> Result<Self, TreeError> {
        config.validate()?;
        let codec = PathCodec::new(config.separator.clone());
        Ok(Self {
            store,
            codec,
            config,
        })
    }

    /// The path codec this service derives queries with
    pub fn codec(&self) -> &PathCodec {
        &self.codec
    }

    /// The service configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    //
    // WRITE OPERATIONS
    //

    /// Create a node, computing its path before persistence.
    ///
    /// An empty `node.id` is replaced with a fresh UUID. A parentless node
    /// becomes a root (`path = id`); a parented node extends its parent's
    /// stored path. A brand-new node has no descendants, so creation never
    /// cascades.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the id contains the separator
    /// - `ParentNotFound` if `parent_id` does not resolve; nothing is
    ///   persisted in that case
    pub async fn create_node(&self, mut node: Node) -> Result<Node, TreeError> {
        if node.id.is_empty() {
            node.id = Uuid::new_v4().to_string();
        }
        if !self.codec.is_valid_id(&node.id) {
            return Err(ValidationError::InvalidId(node.id).into());
        }

        let intent = WriteIntent::create(node.id.clone(), node.parent_id.clone());
        let parent_path = match intent.classify() {
            PathAction::CreateChild => Some(self.resolve_parent_path(&intent).await?),
            _ => None,
        };
        let plan = build_plan(&self.codec, &intent, parent_path.as_deref(), &[]);
        node.path = plan.self_path.unwrap_or_default();

        let created = self
            .store
            .insert_node(node)
            .await
            .map_err(|e| TreeError::query_failed(format!("Failed to insert node: {}", e)))?;
        tracing::debug!("Created node {} at path {}", created.id, created.path);
        Ok(created)
    }

    /// Apply a partial update to an existing node.
    ///
    /// Only a reassigned parent triggers path maintenance: the new path is
    /// computed, persisted together with the other updated fields, and
    /// every existing descendant (matched by the pre-mutation path prefix)
    /// is rewritten through the bounded cascade. A write that leaves the
    /// parent untouched performs no parent lookup and no path mutation.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` if `id` does not resolve
    /// - `ParentNotFound` if the new parent does not resolve; the write is
    ///   aborted with no mutation applied
    /// - `CycleDetected` if the new parent is the node itself or one of
    ///   its own descendants; rejected before any mutation
    /// - `CascadeFailed` if descendant rewrites partially failed; the
    ///   node's own update and the successful rewrites stay applied
    pub async fn update_node(&self, id: &str, update: NodeUpdate) -> Result<Node, TreeError> {
        let persisted = self.require_node(id).await?;
        let intent = match &update.parent_id {
            Some(new_parent) => WriteIntent::update(&persisted, new_parent.clone()),
            None => WriteIntent::update(&persisted, persisted.parent_id.clone()),
        };

        if intent.classify() != PathAction::Reparent {
            self.apply_update(id, update).await?;
            return self.require_node(id).await;
        }

        let parent_path = match &intent.new_parent_id {
            Some(parent_id) => {
                let parent = self.resolve_parent(parent_id).await?;
                self.check_cycle(&persisted, &parent)?;
                Some(parent.path)
            }
            None => None,
        };

        // Snapshot the subtree under the old prefix before anything moves.
        let descendants = if intent.old_path.is_empty() {
            Vec::new()
        } else {
            self.find_mapped(
                NodeFilter::new().with_path(PathMatch::Descendants(intent.old_path.clone())),
                FindOptions::new().with_sort(SortKey::asc("path")),
            )
            .await?
        };

        let plan = build_plan(&self.codec, &intent, parent_path.as_deref(), &descendants);
        tracing::debug!(
            "Reparenting {} to {:?}: {} descendant rewrite(s)",
            id,
            intent.new_parent_id,
            plan.cascade.len()
        );

        let mut update = update;
        if let Some(path) = plan.self_path {
            update.path = Some(path);
        }
        // The node's own record must be visible with its new path before
        // the descendant rewrites are issued.
        self.apply_update(id, update).await?;
        self.run_cascade(plan.cascade).await?;

        self.require_node(id).await
    }

    /// Move a node under a new parent (`None` promotes it to root).
    ///
    /// Convenience wrapper over [`TreeService::update_node`] carrying only
    /// the parent change.
    pub async fn move_node(&self, id: &str, new_parent: Option<&str>) -> Result<Node, TreeError> {
        self.update_node(id, NodeUpdate::new().with_parent(new_parent.map(String::from)))
            .await
    }

    /// Delete a node under the configured [`DeleteBehavior`].
    ///
    /// A record with an empty path (intentionally cleared) is removed with
    /// no cascade or reparent side effects at all. Deleting a missing id
    /// is an idempotent no-op.
    ///
    /// Under `Reparent`, every immediate child is re-pointed at the
    /// deleted node's own parent through the normal reparent write path
    /// (triggering each child's full descendant cascade). Children are
    /// independent: one failing does not stop the others, but any failure
    /// surfaces as `CascadeFailed` and the node's own record is left in
    /// place so the operation can be retried.
    pub async fn delete_node(&self, id: &str) -> Result<DeleteResult, TreeError> {
        let Some(node) = self.get_node(id).await? else {
            return Ok(DeleteResult::not_found());
        };

        if node.path.is_empty() {
            self.delete_mapped(id).await?;
            return Ok(DeleteResult::existed(1));
        }

        match self.config.on_delete {
            DeleteBehavior::Delete => {
                let removed = self
                    .store
                    .delete_many(NodeFilter::new().with_path(PathMatch::Subtree(node.path.clone())))
                    .await
                    .map_err(|e| {
                        TreeError::query_failed(format!("Failed to delete subtree: {}", e))
                    })?;
                tracing::debug!("Deleted subtree of {} ({} record(s))", id, removed);
                Ok(DeleteResult::existed(removed))
            }
            DeleteBehavior::Reparent => {
                self.reparent_children(&node).await?;
                self.delete_mapped(id).await?;
                Ok(DeleteResult::existed(1))
            }
        }
    }

    /// Re-point every immediate child of `node` at `node.parent_id`,
    /// fanning out across the bounded worker pool.
    async fn reparent_children(&self, node: &Node) -> Result<(), TreeError> {
        let children = self
            .find_mapped(
                NodeFilter::new().with_parent(Some(node.id.clone())),
                FindOptions::new().with_sort(SortKey::asc("path")),
            )
            .await?;
        if children.is_empty() {
            return Ok(());
        }
        tracing::debug!(
            "Reparenting {} child(ren) of {} to {:?}",
            children.len(),
            node.id,
            node.parent_id
        );

        let semaphore = Arc::new(Semaphore::new(self.config.num_workers));
        let mut tasks: JoinSet<(String, Result<Node, TreeError>)> = JoinSet::new();
        for child in children {
            let service = self.clone();
            let new_parent = node.parent_id.clone();
            let permit = acquire_worker(&semaphore).await?;
            tasks.spawn(async move {
                let _permit = permit;
                let update = NodeUpdate::new().with_parent(new_parent);
                let result = service.update_node(&child.id, update).await;
                (child.id, result)
            });
        }

        let failures = collect_failures(&mut tasks).await;
        if failures.is_empty() {
            Ok(())
        } else {
            Err(TreeError::cascade_failed(
                format!("reparenting children of {}: {}", node.id, failures.join(", ")),
                failures.len(),
            ))
        }
    }

    /// Persist a cascade of descendant path rewrites with bounded
    /// parallelism. Rewrites are mutually independent, so ordering among
    /// them is irrelevant; failures are collected rather than short-
    /// circuiting, and already-applied rewrites are never rolled back.
    async fn run_cascade(&self, rewrites: Vec<PathRewrite>) -> Result<(), TreeError> {
        if rewrites.is_empty() {
            return Ok(());
        }

        let semaphore = Arc::new(Semaphore::new(self.config.num_workers));
        let mut tasks: JoinSet<(String, Result<bool, TreeError>)> = JoinSet::new();
        for rewrite in rewrites {
            let store = Arc::clone(&self.store);
            let permit = acquire_worker(&semaphore).await?;
            tasks.spawn(async move {
                let _permit = permit;
                let result = store
                    .update_node(&rewrite.id, NodeUpdate::new().with_path(rewrite.new_path))
                    .await
                    .map_err(|e| TreeError::query_failed(format!("Failed to rewrite path: {}", e)));
                (rewrite.id, result)
            });
        }

        let failures = collect_failures(&mut tasks).await;
        if failures.is_empty() {
            Ok(())
        } else {
            Err(TreeError::cascade_failed(failures.join(", "), failures.len()))
        }
    }

    //
    // READ OPERATIONS
    //

    /// Get a node by id, `None` when absent
    pub async fn get_node(&self, id: &str) -> Result<Option<Node>, TreeError> {
        self.store
            .find_one(NodeFilter::new().with_id(id))
            .await
            .map_err(|e| TreeError::query_failed(format!("Failed to fetch node: {}", e)))
    }

    /// Get a node's parent, `None` for roots
    pub async fn get_parent(&self, id: &str) -> Result<Option<Node>, TreeError> {
        let node = self.require_node(id).await?;
        match node.parent_id {
            Some(parent_id) => self.get_node(&parent_id).await,
            None => Ok(None),
        }
    }

    /// Get a node's ancestors in root-to-immediate-parent order, decoded
    /// from its path. A cleared path yields an empty list.
    pub async fn get_ancestors(&self, id: &str) -> Result<Vec<Node>, TreeError> {
        let node = self.require_node(id).await?;
        let ancestor_ids: Vec<String> = self
            .codec
            .ancestor_ids(&node.path)
            .into_iter()
            .map(String::from)
            .collect();
        if ancestor_ids.is_empty() {
            return Ok(Vec::new());
        }
        // ancestor paths are prefixes of each other, so path order is
        // root-first
        self.find_mapped(
            NodeFilter::new().with_ids(ancestor_ids),
            FindOptions::new().with_sort(SortKey::asc("path")),
        )
        .await
    }

    /// Get children of a node: immediate children by default, the whole
    /// descendant set with `recursive`. Caller filter/fields/sort merge
    /// into the derived query; without a caller sort, results come back
    /// path-ascending.
    pub async fn get_children(
        &self,
        id: &str,
        args: ChildrenQueryArgs,
    ) -> Result<Vec<Node>, TreeError> {
        let mut filter = args.filter;
        if args.recursive {
            let node = self.require_node(id).await?;
            if node.path.is_empty() {
                return Ok(Vec::new());
            }
            filter.parent_id = None;
            filter.path = Some(PathMatch::Descendants(node.path));
        } else {
            filter.path = None;
            filter.parent_id = Some(Some(id.to_string()));
        }

        let sort = if args.sort.is_empty() {
            vec![SortKey::asc("path")]
        } else {
            args.sort
        };
        self.find_mapped(
            filter,
            FindOptions {
                fields: args.fields,
                sort,
                limit: None,
                offset: None,
            },
        )
        .await
    }

    /// All descendants of a node, path-ascending
    pub async fn get_descendants(&self, id: &str) -> Result<Vec<Node>, TreeError> {
        self.get_children(
            id,
            ChildrenQueryArgs {
                recursive: true,
                ..Default::default()
            },
        )
        .await
    }

    /// The root of the tree containing this node (itself, for roots)
    pub async fn get_root(&self, id: &str) -> Result<Node, TreeError> {
        let node = self.require_node(id).await?;
        let root_id = self
            .codec
            .ancestor_ids(&node.path)
            .first()
            .map(|s| s.to_string());
        match root_id {
            Some(root_id) => self.require_node(&root_id).await,
            None => Ok(node),
        }
    }

    /// Whether the node has no parent
    pub async fn is_root(&self, id: &str) -> Result<bool, TreeError> {
        Ok(self.require_node(id).await?.parent_id.is_none())
    }

    /// Whether the node has no children
    pub async fn is_leaf(&self, id: &str) -> Result<bool, TreeError> {
        Ok(self.count_children(id).await? == 0)
    }

    /// Number of immediate children
    pub async fn count_children(&self, id: &str) -> Result<usize, TreeError> {
        let children = self
            .find_mapped(
                NodeFilter::new().with_parent(Some(id.to_string())),
                FindOptions::new(),
            )
            .await?;
        Ok(children.len())
    }

    /// Number of descendants across the whole subtree
    pub async fn count_descendants(&self, id: &str) -> Result<usize, TreeError> {
        Ok(self.get_descendants(id).await?.len())
    }

    /// Read a nested tree: the whole forest, or one document's subtree
    /// when `root_id` is set (the root's children become top-level
    /// entries).
    ///
    /// The store query always sorts path-ascending, which assembly
    /// correctness depends on, and always returns `path` and `parent_id`
    /// whatever projection the caller asked for. The caller's `sort` is applied per
    /// sibling group after assembly instead.
    pub async fn get_children_tree(&self, args: TreeQueryArgs) -> Result<Vec<TreeNode>, TreeError> {
        if let (Some(min), Some(max)) = (args.min_level, args.max_level) {
            if min > max {
                return Err(TreeError::invalid_arguments(format!(
                    "minLevel {} exceeds maxLevel {}",
                    min, max
                )));
            }
        }

        let mut filter = args.filter;
        let root_path = match &args.root_id {
            Some(root_id) => {
                let root = self.require_node(root_id).await?;
                filter.path = Some(PathMatch::Descendants(root.path.clone()));
                Some(root.path)
            }
            None => {
                filter.path = None;
                None
            }
        };

        let nodes = self
            .find_mapped(
                filter,
                FindOptions {
                    fields: args.fields,
                    sort: vec![SortKey::asc("path")],
                    limit: None,
                    offset: None,
                },
            )
            .await?;

        Ok(assemble(
            &self.codec,
            nodes,
            &AssembleArgs {
                root_path,
                min_level: args.min_level,
                max_level: args.max_level,
                sort: args.sort,
            },
        ))
    }

    //
    // INTERNAL HELPERS
    //

    async fn require_node(&self, id: &str) -> Result<Node, TreeError> {
        self.get_node(id)
            .await?
            .ok_or_else(|| TreeError::node_not_found(id))
    }

    async fn resolve_parent(&self, parent_id: &str) -> Result<Node, TreeError> {
        if parent_id.is_empty() {
            return Err(ValidationError::InvalidParent("empty parent id".to_string()).into());
        }
        self.store
            .find_one(NodeFilter::new().with_id(parent_id))
            .await
            .map_err(|e| TreeError::query_failed(format!("Failed to fetch parent: {}", e)))?
            .ok_or_else(|| TreeError::parent_not_found(parent_id))
    }

    async fn resolve_parent_path(&self, intent: &WriteIntent) -> Result<String, TreeError> {
        match &intent.new_parent_id {
            Some(parent_id) => Ok(self.resolve_parent(parent_id).await?.path),
            None => Err(TreeError::invalid_arguments("missing parent id")),
        }
    }

    /// Reject a reparent that would make a node its own ancestor, before
    /// any mutation happens.
    fn check_cycle(&self, node: &Node, new_parent: &Node) -> Result<(), TreeError> {
        if new_parent.id == node.id {
            return Err(TreeError::cycle_detected(&node.id, &new_parent.id));
        }
        if !node.path.is_empty()
            && PathMatch::Descendants(node.path.clone())
                .matches(&new_parent.path, self.codec.separator())
        {
            return Err(TreeError::cycle_detected(&node.id, &new_parent.id));
        }
        Ok(())
    }

    async fn apply_update(&self, id: &str, update: NodeUpdate) -> Result<(), TreeError> {
        let applied = self
            .store
            .update_node(id, update)
            .await
            .map_err(|e| TreeError::query_failed(format!("Failed to update node: {}", e)))?;
        if applied {
            Ok(())
        } else {
            Err(TreeError::node_not_found(id))
        }
    }

    async fn find_mapped(
        &self,
        filter: NodeFilter,
        options: FindOptions,
    ) -> Result<Vec<Node>, TreeError> {
        self.store
            .find(filter, options)
            .await
            .map_err(|e| TreeError::query_failed(format!("Failed to query nodes: {}", e)))
    }

    async fn delete_mapped(&self, id: &str) -> Result<bool, TreeError> {
        self.store
            .delete_node(id)
            .await
            .map_err(|e| TreeError::query_failed(format!("Failed to delete node: {}", e)))
    }
}

/// Acquire a cascade worker permit. Acquisition only fails on a closed
/// semaphore, and these pools are never closed while tasks hold permits.
async fn acquire_worker(
    semaphore: &Arc<Semaphore>,
) -> Result<tokio::sync::OwnedSemaphorePermit, TreeError> {
    semaphore
        .clone()
        .acquire_owned()
        .await
        .map_err(|e| TreeError::query_failed(format!("Cascade worker pool closed: {}", e)))
}

/// Drain a fan-out task set, logging and collecting the ids that failed.
async fn collect_failures<T: 'static>(
    tasks: &mut JoinSet<(String, Result<T, TreeError>)>,
) -> Vec<String> {
    let mut failures = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(_))) => {}
            Ok((id, Err(e))) => {
                tracing::warn!("Cascade update failed for node {}: {}", id, e);
                failures.push(id);
            }
            Err(e) => {
                tracing::warn!("Cascade task aborted: {}", e);
                failures.push(format!("<aborted: {}>", e));
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use serde_json::json;

    fn service(config: TreeConfig) -> TreeService {
        let store = Arc::new(MemoryStore::new(config.separator.clone()));
        TreeService::new(store, config).unwrap()
    }

    #[test]
    fn config_validation() {
        let store = Arc::new(MemoryStore::new("#"));
        assert!(TreeService::new(store.clone(), TreeConfig::new().with_separator("")).is_err());
        assert!(TreeService::new(store.clone(), TreeConfig::new().with_num_workers(0)).is_err());
        assert!(TreeService::new(store, TreeConfig::new()).is_ok());
    }

    #[tokio::test]
    async fn create_generates_id_when_empty() {
        let tree = service(TreeConfig::new());
        let node = Node::new_with_id(String::new(), "x".to_string(), None, json!({}));
        let created = tree.create_node(node).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.path, created.id);
    }

    #[tokio::test]
    async fn create_rejects_separator_in_id() {
        let tree = service(TreeConfig::new());
        let node = Node::new_with_id("a#b".to_string(), "x".to_string(), None, json!({}));
        let err = tree.create_node(node).await.unwrap_err();
        assert!(matches!(err, TreeError::ValidationFailed(_)));
    }

    #[tokio::test]
    async fn create_child_of_missing_parent_fails() {
        let tree = service(TreeConfig::new());
        let node = Node::new("x".to_string(), Some("ghost".to_string()), json!({}));
        let err = tree.create_node(node).await.unwrap_err();
        assert!(matches!(err, TreeError::ParentNotFound { .. }));
        assert!(tree.get_node("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn min_level_above_max_level_is_rejected() {
        let tree = service(TreeConfig::new());
        let err = tree
            .get_children_tree(TreeQueryArgs {
                min_level: Some(3),
                max_level: Some(2),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TreeError::InvalidArguments(_)));
    }
}
