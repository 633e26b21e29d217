//! javast-tree: owned syntax trees from tree-sitter parses
//!
//! This crate turns an engine's concrete syntax tree into a `SyntaxNode`
//! tree that owns all of its data and serializes to JSON:
//!
//! - every node keeps its kind and start/end `(row, column)` positions
//! - children keep their source order
//! - childless nodes carry the exact UTF-8 text of their byte range
//!
//! The engine is injected through the `SyntaxEngine` trait. `JavaEngine`
//! wraps tree-sitter-java; `stub::WordEngine` needs no grammar at all.
//!
//! # Example
//!
//! ```rust,ignore
//! use javast_tree::{serialize_iterative, JavaEngine, SyntaxEngine, SyntaxTree};
//!
//! let source = b"class A { void run() {} }";
//! let mut engine = JavaEngine::new()?;
//! let tree = engine.parse(source)?;
//! let ast = serialize_iterative(&tree.root(), source)?;
//! println!("{}", serde_json::to_string_pretty(&ast)?);
//! ```

pub mod adapters;
pub mod error;
pub mod ir;
pub mod provider;
pub mod serializer;
pub mod stub;

pub use adapters::JavaEngine;
pub use error::{AstError, Result};
pub use ir::{Point, Preorder, SyntaxNode, ERROR_KIND};
pub use provider::{ConcreteNode, SyntaxEngine, SyntaxTree};
pub use serializer::{serialize, serialize_iterative};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
