//! Core module for javast
//!
//! # Architecture
//!
//! - `models`: Runtime configuration (DumpConfig, ConfigFile, OutputFormat)
//! - `error`: Error types using thiserror
//! - `walker`: Source file discovery with the FileWalker trait
//! - `engine`: Pipeline orchestration (read, parse, serialize, emit)
//! - `serialization`: Output writers

pub mod engine;
pub mod error;
pub mod models;
pub mod serialization;
pub mod walker;

// Re-export commonly used types
pub use engine::{process_file, FileFailure, Pipeline, RunSummary};
pub use error::{DumpError, Result, ResultExt};
pub use models::{ConfigFile, DumpConfig, OutputFormat, DEFAULT_SUFFIX};
pub use serialization::{display_path, TreeWriter};
pub use walker::{matches_suffix, FileWalker, SuffixWalker};
