//! javast - dump the syntax trees of a Java source tree as JSON
//!
//! The library walks a directory for files with a given suffix, parses each
//! one with tree-sitter-java and writes an owned, position-annotated tree
//! for it. It is consumed by the `javast` binary (src/bin/javast.rs) and can
//! be embedded with any `SyntaxEngine`.
//!
//! # Example
//!
//! ```rust,ignore
//! use javast::{DumpConfig, Pipeline};
//! use javast_tree::JavaEngine;
//! use std::path::Path;
//!
//! let pipeline = Pipeline::new(DumpConfig::default());
//! let mut engine = JavaEngine::new()?;
//! let summary = pipeline.run(&mut engine, Path::new("src/main/java"), |path, tree| {
//!     println!("{}: {} nodes", path.display(), tree.node_count());
//!     Ok(())
//! })?;
//! assert!(summary.is_clean());
//! ```

pub mod core;

pub use crate::core::{
    display_path, matches_suffix, process_file, ConfigFile, DumpConfig, DumpError, FileFailure,
    FileWalker, OutputFormat, Pipeline, Result, RunSummary, SuffixWalker, TreeWriter,
};
pub use javast_tree;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
