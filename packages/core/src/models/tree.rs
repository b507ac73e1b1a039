//! Nested tree representation
//!
//! The output shape of tree assembly: each entry wraps a flat [`Node`]
//! record and the recursively nested children placed under it. This shape
//! is transient: hierarchy truth lives in the stored `parent_id`/`path`
//! fields, and `TreeNode` values are rebuilt from a flat query result on
//! every tree read.

use serde::{Deserialize, Serialize};

use crate::models::Node;

/// A node with its children nested beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// The flat record
    #[serde(flatten)]
    pub node: Node,

    /// Children in sibling order
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Wrap a flat record with no children yet
    pub fn new(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    /// Count nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(|c| c.node_count()).sum::<usize>()
    }

    /// Depth-first search for a node by id within this subtree
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        if self.node.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn leaf(id: &str) -> TreeNode {
        TreeNode::new(Node::new_with_id(
            id.to_string(),
            id.to_string(),
            None,
            json!({}),
        ))
    }

    #[test]
    fn counts_nested_nodes() {
        let mut root = leaf("r");
        let mut mid = leaf("m");
        mid.children.push(leaf("l"));
        root.children.push(mid);
        assert_eq!(root.node_count(), 3);
    }

    #[test]
    fn finds_by_id_depth_first() {
        let mut root = leaf("r");
        let mut mid = leaf("m");
        mid.children.push(leaf("l"));
        root.children.push(mid);
        assert_eq!(root.find("l").unwrap().node.id, "l");
        assert!(root.find("missing").is_none());
    }
}
