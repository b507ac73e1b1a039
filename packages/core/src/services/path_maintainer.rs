//! Path Maintenance Planning
//!
//! The pre-write state machine that keeps `path` consistent with
//! `parent_id`. Instead of mutating records in place, a write is first
//! classified into one of four actions and then expanded into an explicit
//! [`PathPlan`]: the node's own new path plus the list of descendant
//! rewrites the change entails. The plan is pure data: building one
//! touches no store, which keeps the cascade logic testable on its own and
//! leaves execution order (self first, then descendants) to the service.

use crate::models::Node;
use crate::path::PathCodec;

/// The candidate write, captured before anything is persisted.
///
/// `old_parent_id`/`old_path` reflect the last persisted state; for a new
/// node they are empty. Descendant matching during a reparent must use
/// `old_path`, the pre-mutation prefix, which is why it is captured here
/// rather than read back after the self-update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteIntent {
    pub id: String,
    pub is_new: bool,
    pub old_parent_id: Option<String>,
    pub old_path: String,
    pub new_parent_id: Option<String>,
}

impl WriteIntent {
    /// Intent for a brand-new node
    pub fn create(id: impl Into<String>, parent_id: Option<String>) -> Self {
        Self {
            id: id.into(),
            is_new: true,
            old_parent_id: None,
            old_path: String::new(),
            new_parent_id: parent_id,
        }
    }

    /// Intent for a write against an existing record
    pub fn update(persisted: &Node, new_parent_id: Option<String>) -> Self {
        Self {
            id: persisted.id.clone(),
            is_new: false,
            old_parent_id: persisted.parent_id.clone(),
            old_path: persisted.path.clone(),
            new_parent_id,
        }
    }

    /// Classify the write. Fires only for new nodes or a reassigned
    /// parent; any other write passes through untouched.
    pub fn classify(&self) -> PathAction {
        if self.is_new {
            match self.new_parent_id {
                None => PathAction::CreateRoot,
                Some(_) => PathAction::CreateChild,
            }
        } else if self.new_parent_id != self.old_parent_id {
            PathAction::Reparent
        } else {
            PathAction::Noop
        }
    }
}

/// The four states of the pre-write state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    /// Parent unchanged on an existing node: no lookup, no path mutation
    Noop,
    /// New node without a parent: path is its own id
    CreateRoot,
    /// New node with a parent: path extends the parent's path
    CreateChild,
    /// Existing node with a reassigned parent: recompute and cascade
    Reparent,
}

/// One descendant rewrite of a cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRewrite {
    pub id: String,
    pub new_path: String,
}

/// Everything a write must persist to keep the path invariants.
///
/// `self_path` is `None` for no-op writes. `cascade` is non-empty only for
/// reparents of nodes that already have descendants; each entry depends
/// only on that descendant's own old path and the single old/new prefix
/// pair, so entries can be applied in any order and with any parallelism.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPlan {
    pub self_path: Option<String>,
    pub cascade: Vec<PathRewrite>,
}

impl PathPlan {
    /// Plan for a write that needs no path work
    pub fn noop() -> Self {
        Self {
            self_path: None,
            cascade: Vec::new(),
        }
    }
}

/// Expand a classified write into its plan.
///
/// `new_parent_path` is the resolved path of the new parent (`None` when
/// the node is becoming a root); the caller resolves it and fails the
/// write with `ParentNotFound` before ever calling this. `descendants` is
/// the snapshot of records matched by the old path's subtree prefix,
/// captured before any mutation; it is ignored except for reparents.
///
/// Descendants whose path already carries the new prefix (a retry after a
/// partial cascade) still appear in the plan; their rewrite recomputes the
/// same value and persists as a no-op.
pub fn build_plan(
    codec: &PathCodec,
    intent: &WriteIntent,
    new_parent_path: Option<&str>,
    descendants: &[Node],
) -> PathPlan {
    match intent.classify() {
        PathAction::Noop => PathPlan::noop(),
        PathAction::CreateRoot => PathPlan {
            self_path: Some(codec.root_path(&intent.id)),
            cascade: Vec::new(),
        },
        PathAction::CreateChild => {
            let parent_path = new_parent_path.unwrap_or_default();
            PathPlan {
                self_path: Some(codec.child_path(parent_path, &intent.id)),
                cascade: Vec::new(),
            }
        }
        PathAction::Reparent => {
            let new_path = match new_parent_path {
                Some(parent_path) => codec.child_path(parent_path, &intent.id),
                None => codec.root_path(&intent.id),
            };
            let cascade = descendants
                .iter()
                .map(|d| PathRewrite {
                    id: d.id.clone(),
                    new_path: codec.rewritten_path(&d.path, &new_path, &intent.old_path),
                })
                .collect();
            PathPlan {
                self_path: Some(new_path),
                cascade,
            }
        }
    }
}
