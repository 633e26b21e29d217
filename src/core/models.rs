//! Core data models for javast
//!
//! Runtime configuration (`DumpConfig`) and the optional JSON config file it
//! can be loaded from.

use crate::core::error::{DumpError, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Suffix scanned for when nothing else is configured
pub const DEFAULT_SUFFIX: &str = ".java";

/// Output format for dumped trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `AST for <path>:` header followed by indented JSON (default)
    #[default]
    Pretty,
    /// Header followed by single-line JSON
    Compact,
    /// One `{"path", "ast"}` object per line, no banner or headers
    JsonLines,
}

impl OutputFormat {
    /// Parse format from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(OutputFormat::Pretty),
            "compact" => Some(OutputFormat::Compact),
            "json-lines" | "jsonl" | "ndjson" => Some(OutputFormat::JsonLines),
            _ => None,
        }
    }

    /// Whether human-readable banner and headers are written
    pub fn has_headers(&self) -> bool {
        !matches!(self, OutputFormat::JsonLines)
    }
}

/// Configuration loaded from .javast.json
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ConfigFile {
    /// File name suffix to match (e.g. ".java")
    #[serde(default)]
    pub suffix: Option<String>,
    /// Output format name
    #[serde(default)]
    pub format: Option<String>,
    /// Worker threads (0 = one per core)
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Directory names skipped during discovery
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl ConfigFile {
    /// Default config file name, looked up in the scan root
    pub const FILE_NAME: &'static str = ".javast.json";

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| DumpError::Io {
                path: path.to_path_buf(),
                source,
            })
            .context(format!("loading config {}", path.display()))?;
        serde_json::from_str(&content)
            .map_err(DumpError::from)
            .context(format!("parsing config {}", path.display()))
    }

    /// Load `<root>/.javast.json` if it exists
    pub fn find(root: &Path) -> Result<Option<Self>> {
        let path = root.join(Self::FILE_NAME);
        if path.is_file() {
            Self::load(&path).map(Some)
        } else {
            Ok(None)
        }
    }
}

/// Runtime configuration for a dump run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    /// Literal, case-sensitive file name suffix
    pub suffix: String,
    pub format: OutputFormat,
    /// 1 = sequential, 0 = one worker per core
    pub jobs: usize,
    /// Directory names pruned from discovery
    pub ignore_dirs: Vec<String>,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_string(),
            format: OutputFormat::default(),
            jobs: 1,
            ignore_dirs: Vec::new(),
        }
    }
}

impl DumpConfig {
    /// Build a config from file values on top of the defaults
    pub fn from_file(file: &ConfigFile) -> Result<Self> {
        let mut config = Self::default();
        if let Some(suffix) = &file.suffix {
            config.suffix = suffix.clone();
        }
        if let Some(format) = &file.format {
            config.format = OutputFormat::parse(format)
                .ok_or_else(|| DumpError::invalid_config(format!("unknown format '{}'", format)))?;
        }
        if let Some(jobs) = file.jobs {
            config.jobs = jobs;
        }
        config.ignore_dirs = file.ignore.clone();
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that the rest of the pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if self.suffix.is_empty() {
            return Err(DumpError::invalid_config("suffix must not be empty"));
        }
        if self.ignore_dirs.iter().any(|d| d.is_empty() || d.contains('/')) {
            return Err(DumpError::invalid_config(
                "ignore entries must be plain directory names",
            ));
        }
        Ok(())
    }

    pub fn is_parallel(&self) -> bool {
        self.jobs != 1
    }
}
