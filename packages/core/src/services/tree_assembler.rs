//! Flat-List to Nested-Tree Assembly
//!
//! Converts a path-ascending flat query result into the nested
//! parent→children shape in a single linear pass. Because a parent's path
//! is always a strict prefix of its children's paths, sorting by path
//! guarantees every parent precedes its descendants, so each node can be
//! placed by walking down the "last element" chain of the partial
//! result, with no id lookups and no second pass.
//!
//! Assembly is pure: it operates on a self-contained input slice and holds
//! no state across calls, which separates data fetching from tree
//! construction and keeps this logic testable without a store.

use crate::models::{compare_by_keys, Node, SortKey, TreeNode};
use crate::path::PathCodec;

/// Parameters shaping one assembly pass.
///
/// `root_path` scopes the result to the subtree below that path: placement
/// levels shift so the root's immediate children become top-level entries.
/// `min_level`/`max_level` are inclusive bounds on each node's own level;
/// `sort` is applied per sibling group after structural assembly.
#[derive(Debug, Clone, Default)]
pub struct AssembleArgs {
    pub root_path: Option<String>,
    pub min_level: Option<u32>,
    pub max_level: Option<u32>,
    pub sort: Vec<SortKey>,
}

/// Build the nested forest from `nodes`, which must be sorted ascending by
/// path (the query layer forces this sort).
///
/// Nodes outside the level bounds are excluded up front, judged on their
/// own level only. A surviving node whose ancestor chain was cut off
/// below `min_level` becomes a top-level entry; one whose intermediate
/// ancestor is missing deeper in the walk cannot be placed and is
/// discarded.
pub fn assemble(codec: &PathCodec, nodes: Vec<Node>, args: &AssembleArgs) -> Vec<TreeNode> {
    // When scoped to a root, the first placeable level is just below it,
    // and min_level may never reach above that boundary.
    let base_level = match &args.root_path {
        Some(path) => codec.level(path) + 1,
        None => 1,
    };
    let min_level = args.min_level.unwrap_or(1).max(base_level);
    let max_level = args.max_level.unwrap_or(u32::MAX);

    let mut forest: Vec<TreeNode> = Vec::new();
    for node in nodes {
        let level = codec.level(&node.path);
        if level < min_level || level > max_level {
            continue;
        }
        attach(&mut forest, TreeNode::new(node), level - min_level);
    }

    if !args.sort.is_empty() {
        sort_groups(&mut forest, &args.sort);
    }
    forest
}

/// Walk `depth` steps down the last-element chain and append the node to
/// the sibling group there. An empty group before reaching the target
/// depth means the node's ancestor fell outside the queried set; the node
/// is dropped.
fn attach(siblings: &mut Vec<TreeNode>, node: TreeNode, depth: u32) {
    if depth == 0 {
        siblings.push(node);
        return;
    }
    if let Some(last) = siblings.last_mut() {
        attach(&mut last.children, node, depth - 1);
    }
}

/// Recursively re-sort every sibling group in place with the multi-key
/// spec. Without a spec, sibling order stays the insertion order produced
/// by the path-ascending input.
fn sort_groups(siblings: &mut Vec<TreeNode>, keys: &[SortKey]) {
    siblings.sort_by(|a, b| compare_by_keys(&a.node, &b.node, keys));
    for entry in siblings.iter_mut() {
        sort_groups(&mut entry.children, keys);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, parent: Option<&str>, path: &str, props: serde_json::Value) -> Node {
        let mut node =
            Node::new_with_id(id.to_string(), id.to_string(), parent.map(String::from), props);
        node.path = path.to_string();
        node
    }

    /// The forest {af, eu -> {no, se -> {sthlm -> {globe}}}} in
    /// path-ascending order, as the query layer would deliver it.
    fn forest() -> Vec<Node> {
        vec![
            record("af", None, "af", json!({})),
            record("eu", None, "eu", json!({})),
            record("no", Some("eu"), "eu.no", json!({})),
            record("se", Some("eu"), "eu.se", json!({})),
            record("sthlm", Some("se"), "eu.se.sthlm", json!({})),
            record("globe", Some("sthlm"), "eu.se.sthlm.globe", json!({})),
        ]
    }

    #[test]
    fn assembles_whole_forest() {
        let codec = PathCodec::new(".");
        let tree = assemble(&codec, forest(), &AssembleArgs::default());

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].node.id, "af");
        let eu = &tree[1];
        assert_eq!(eu.node.id, "eu");
        assert_eq!(eu.children.len(), 2);
        assert_eq!(eu.children[1].children[0].children[0].node.id, "globe");
    }

    #[test]
    fn min_level_promotes_cut_subtrees() {
        let codec = PathCodec::new(".");
        let args = AssembleArgs {
            min_level: Some(3),
            ..Default::default()
        };
        let tree = assemble(&codec, forest(), &args);

        // "sthlm" (level 3) surfaces as a top-level entry, "globe" under it
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].node.id, "sthlm");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].node.id, "globe");
    }

    #[test]
    fn max_level_prunes_depth() {
        let codec = PathCodec::new(".");
        let args = AssembleArgs {
            max_level: Some(2),
            ..Default::default()
        };
        let tree = assemble(&codec, forest(), &args);
        assert_eq!(tree[1].children.len(), 2);
        assert!(tree[1].children[1].children.is_empty());
    }

    #[test]
    fn orphan_below_cut_is_discarded() {
        let codec = PathCodec::new(".");
        // "globe" arrives without its "sthlm" ancestor: with min_level 3 it
        // would need a level-3 entry to hang under, and there is none yet
        let nodes = vec![record(
            "globe",
            Some("sthlm"),
            "eu.se.sthlm.globe",
            json!({}),
        )];
        let args = AssembleArgs {
            min_level: Some(3),
            ..Default::default()
        };
        assert!(assemble(&codec, nodes, &args).is_empty());
    }

    #[test]
    fn scoping_root_shifts_placement() {
        let codec = PathCodec::new(".");
        let nodes: Vec<Node> = forest()
            .into_iter()
            .filter(|n| n.path.starts_with("eu."))
            .collect();
        let args = AssembleArgs {
            root_path: Some("eu".to_string()),
            ..Default::default()
        };
        let tree = assemble(&codec, nodes, &args);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].node.id, "no");
        assert_eq!(tree[1].node.id, "se");
        assert_eq!(tree[1].children[0].node.id, "sthlm");
    }

    #[test]
    fn min_level_clamps_up_to_scoping_root() {
        let codec = PathCodec::new(".");
        let nodes: Vec<Node> = forest()
            .into_iter()
            .filter(|n| n.path.starts_with("eu."))
            .collect();
        // min_level 1 would sit above the scoped root; it clamps to 2
        let args = AssembleArgs {
            root_path: Some("eu".to_string()),
            min_level: Some(1),
            ..Default::default()
        };
        let tree = assemble(&codec, nodes, &args);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].node.id, "no");
    }

    #[test]
    fn sorts_every_sibling_group() {
        let codec = PathCodec::new(".");
        let nodes = vec![
            record("r", None, "r", json!({})),
            record("a", Some("r"), "r.a", json!({ "rank": 2 })),
            record("b", Some("r"), "r.b", json!({ "rank": 3 })),
            record("c", Some("r"), "r.c", json!({ "rank": 1 })),
        ];
        let args = AssembleArgs {
            sort: vec![SortKey::desc("rank")],
            ..Default::default()
        };
        let tree = assemble(&codec, nodes, &args);
        let order: Vec<&str> = tree[0].children.iter().map(|c| c.node.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
    }

    #[test]
    fn unsorted_keeps_path_order() {
        let codec = PathCodec::new(".");
        let tree = assemble(&codec, forest(), &AssembleArgs::default());
        let order: Vec<&str> = tree[1].children.iter().map(|c| c.node.id.as_str()).collect();
        assert_eq!(order, vec!["no", "se"]);
    }
}
