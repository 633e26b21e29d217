//! Tree-sitter adapters for javast-tree
//!
//! Tree-sitter nodes and trees are exposed to the serializer through the
//! `ConcreteNode` and `SyntaxTree` traits. Grammar-specific engines live in
//! submodules.

pub mod java_adapter;

pub use java_adapter::JavaEngine;

use crate::ir::Point;
use crate::provider::{ConcreteNode, SyntaxTree};
use std::ops::Range;

impl<'tree> ConcreteNode for tree_sitter::Node<'tree> {
    fn type_tag(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn start_point(&self) -> Point {
        self.start_position().into()
    }

    fn end_point(&self) -> Point {
        self.end_position().into()
    }

    fn byte_range(&self) -> Range<usize> {
        self.start_byte()..self.end_byte()
    }

    fn child_nodes(&self) -> Vec<Self> {
        let mut cursor = self.walk();
        tree_sitter::Node::children(self, &mut cursor).collect()
    }
}

impl SyntaxTree for tree_sitter::Tree {
    type Node<'a> = tree_sitter::Node<'a>
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_> {
        self.root_node()
    }
}
