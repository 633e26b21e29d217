//! Serialized syntax tree types
//!
//! `SyntaxNode` is the durable output of the serializer: a fully owned copy
//! of the concrete tree with no references back to the engine or the source
//! buffer. Its JSON form is
//!
//! ```text
//! {"type": "...", "start_point": [row, col], "end_point": [row, col],
//!  "children": [...], "text": "..."}
//! ```
//!
//! where `text` is present exactly on nodes without children.

use serde::{Deserialize, Serialize};

/// Node kind tree-sitter assigns to error-recovery nodes
pub const ERROR_KIND: &str = "ERROR";

// ============================================================================
// Positions
// ============================================================================

/// A zero-based (row, column) position; the column counts bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Point {
    pub row: usize,
    pub column: usize,
}

impl Point {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl From<[usize; 2]> for Point {
    fn from([row, column]: [usize; 2]) -> Self {
        Self { row, column }
    }
}

impl From<Point> for [usize; 2] {
    fn from(point: Point) -> Self {
        [point.row, point.column]
    }
}

impl From<tree_sitter::Point> for Point {
    fn from(point: tree_sitter::Point) -> Self {
        Self {
            row: point.row,
            column: point.column,
        }
    }
}

// ============================================================================
// Nodes
// ============================================================================

/// One node of a serialized syntax tree
///
/// Leaves carry the exact source text of their byte range; internal nodes
/// carry their children. A node never has both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxNode {
    /// Grammar rule or token kind, as named by the engine
    #[serde(rename = "type")]
    pub kind: String,

    pub start_point: Point,

    pub end_point: Point,

    #[serde(default)]
    pub children: Vec<SyntaxNode>,

    /// Source text, present on leaves only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SyntaxNode {
    /// Create a leaf node
    pub fn leaf(
        kind: impl Into<String>,
        start_point: Point,
        end_point: Point,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            start_point,
            end_point,
            children: Vec::new(),
            text: Some(text.into()),
        }
    }

    /// Create an internal node
    pub fn branch(
        kind: impl Into<String>,
        start_point: Point,
        end_point: Point,
        children: Vec<SyntaxNode>,
    ) -> Self {
        Self {
            kind: kind.into(),
            start_point,
            end_point,
            children,
            text: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order iterator over this node and all its descendants
    pub fn iter(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    /// Leaves in source order
    pub fn leaves(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.iter().filter(|node| node.is_leaf())
    }

    /// Total number of nodes, including this one
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Length of the longest root-to-leaf path, counting nodes
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// First node (pre-order) of the given kind
    pub fn find_kind(&self, kind: &str) -> Option<&SyntaxNode> {
        self.iter().find(|node| node.kind == kind)
    }

    /// Whether the engine had to recover from a syntax error anywhere below
    pub fn has_errors(&self) -> bool {
        self.iter().any(|node| node.kind == ERROR_KIND)
    }

    /// Leaf text concatenated in order, without the gaps between leaves
    pub fn leaf_text(&self) -> String {
        self.leaves().filter_map(|leaf| leaf.text.as_deref()).collect()
    }

    /// Check the leaf/text invariant over the whole tree
    pub fn is_well_formed(&self) -> bool {
        self.iter().all(|node| node.text.is_some() == node.children.is_empty())
    }
}

/// Pre-order traversal without recursion
pub struct Preorder<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
