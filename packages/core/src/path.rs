//! Materialized Path Codec
//!
//! This module encodes and decodes the `path` string stored on every node.
//! A path is the chain of ancestor identifiers (including the node's own id)
//! joined by a configured separator token, in root-to-self order:
//!
//! ```text
//! "eu"            root node "eu", level 1
//! "eu#se"         child "se" of "eu", level 2
//! "eu#se#sthlm"   grandchild "sthlm", level 3
//! ```
//!
//! All operations here are pure string manipulation with no I/O. Subtree
//! matching is always anchored on the separator so that sibling ids sharing
//! a string prefix (`"a"` vs `"ab"`) can never be confused for an
//! ancestor/descendant pair.

/// Default separator token used when none is configured.
pub const DEFAULT_SEPARATOR: &str = "#";

/// Encoder/decoder for materialized path strings.
///
/// Holds the separator token (a single character or short string) that joins
/// ancestor identifiers. Identifiers must never contain the separator; use
/// [`PathCodec::is_valid_id`] to validate ids before they enter a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathCodec {
    separator: String,
}

impl Default for PathCodec {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl PathCodec {
    /// Create a codec with the given separator token.
    ///
    /// The separator must be non-empty; [`crate::services::TreeConfig`]
    /// validates this before a codec is ever constructed.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// The configured separator token.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Whether `id` is usable inside a path: non-empty and free of the
    /// separator token.
    pub fn is_valid_id(&self, id: &str) -> bool {
        !id.is_empty() && !id.contains(&self.separator)
    }

    /// Path of a root node: the string form of its own id.
    pub fn root_path(&self, id: &str) -> String {
        id.to_string()
    }

    /// Path of a child node: `parent_path + separator + id`.
    ///
    /// `parent_path` must be non-empty; an empty parent path means the
    /// parent record is not a valid hierarchy member.
    pub fn child_path(&self, parent_path: &str, id: &str) -> String {
        debug_assert!(!parent_path.is_empty(), "parent path must be non-empty");
        format!("{}{}{}", parent_path, self.separator, id)
    }

    /// Depth of the node carrying `path`; roots are level 1.
    ///
    /// An empty path (a record whose path was intentionally cleared) is
    /// level 1 by convention.
    pub fn level(&self, path: &str) -> u32 {
        if path.is_empty() {
            return 1;
        }
        path.matches(&self.separator).count() as u32 + 1
    }

    /// Ordered ancestor ids encoded in `path`, root first, immediate parent
    /// last. The node's own id (the final segment) is not included. An
    /// empty path yields an empty list.
    pub fn ancestor_ids<'a>(&self, path: &'a str) -> Vec<&'a str> {
        if path.is_empty() {
            return Vec::new();
        }
        let mut segments: Vec<&str> = path.split(self.separator.as_str()).collect();
        segments.pop();
        segments
    }

    /// The separator-anchored prefix matching every descendant of the node
    /// carrying `path`: a candidate path is in the subtree iff it starts
    /// with `path + separator`.
    pub fn subtree_prefix(&self, path: &str) -> String {
        format!("{}{}", path, self.separator)
    }

    /// Rewrite a descendant path after one of its ancestors moved from
    /// `old_prefix` to `new_prefix`: the suffix after `old_prefix` is kept
    /// and re-rooted under `new_prefix`.
    ///
    /// A path that does not carry `old_prefix` passes through unchanged, so
    /// re-applying a rewrite to an already-corrected descendant is a no-op.
    pub fn rewritten_path(&self, path: &str, new_prefix: &str, old_prefix: &str) -> String {
        match path.strip_prefix(old_prefix) {
            Some(suffix) => format!("{}{}", new_prefix, suffix),
            None => path.to_string(),
        }
    }
}
