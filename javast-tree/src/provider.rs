//! Grammar engine boundary
//!
//! The serializer never talks to tree-sitter directly. It sees the parse
//! result through three small traits:
//!
//! - `ConcreteNode`: a read-only view of one engine node
//! - `SyntaxTree`: a parse result with a root node
//! - `SyntaxEngine`: the `parse(bytes) -> tree` capability
//!
//! The tree-sitter implementations live in `adapters`; `stub` provides a
//! grammar-free engine for tests.

use crate::error::Result;
use crate::ir::Point;
use std::ops::Range;

/// Read-only view of a node in an engine's concrete syntax tree
///
/// Implementors are cheap handles (tree-sitter nodes are `Copy`), so
/// `child_nodes` returns them by value.
pub trait ConcreteNode: Sized {
    /// Grammar rule or token kind, including error-recovery kinds
    fn type_tag(&self) -> &str;

    fn start_point(&self) -> Point;

    fn end_point(&self) -> Point;

    /// Half-open byte range `[start_byte, end_byte)` into the parsed buffer
    fn byte_range(&self) -> Range<usize>;

    /// Children in source order; empty for leaves
    fn child_nodes(&self) -> Vec<Self>;
}

/// The result of one parse call
pub trait SyntaxTree {
    type Node<'a>: ConcreteNode
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;
}

/// A parser that turns raw bytes into a concrete syntax tree
///
/// Engines must tolerate syntactically invalid input and return a
/// best-effort tree containing error nodes. An `Err` means no tree could be
/// produced at all. Parse calls are independent of each other; `&mut self`
/// only reflects that the underlying parser keeps scratch state.
pub trait SyntaxEngine {
    type Tree: SyntaxTree;

    /// Short name of the grammar, used in logs
    fn grammar(&self) -> &str;

    fn parse(&mut self, source: &[u8]) -> Result<Self::Tree>;
}
