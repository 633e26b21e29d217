//! Output writers for javast
//!
//! Trees are written as JSON in one of three layouts:
//! - Pretty (default): `AST for <path>:` header, then indented JSON
//! - Compact: the same header, then single-line JSON
//! - JSON Lines: one `{"path": ..., "ast": ...}` object per line

use crate::core::error::{DumpError, Result};
use crate::core::models::OutputFormat;
use javast_tree::SyntaxNode;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Render a path with forward slashes on every platform
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Writer failures surfaced by serde_json are output errors, not JSON errors
fn json_error(err: serde_json::Error) -> DumpError {
    if err.is_io() {
        DumpError::Output(err.into())
    } else {
        DumpError::Json(err)
    }
}

#[derive(Serialize)]
struct Record<'a> {
    path: String,
    ast: &'a SyntaxNode,
}

/// Streams dumped trees to any `Write` sink
pub struct TreeWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> TreeWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write the discovered-file count ahead of any tree
    pub fn write_banner(&mut self, count: usize, suffix: &str) -> Result<()> {
        if !self.format.has_headers() {
            return Ok(());
        }
        writeln!(self.out, "Found {} files matching '{}'.", count, suffix).map_err(DumpError::Output)
    }

    /// Write one file's tree
    pub fn write_tree(&mut self, path: &Path, tree: &SyntaxNode) -> Result<()> {
        match self.format {
            OutputFormat::Pretty => {
                writeln!(self.out, "AST for {}:", display_path(path)).map_err(DumpError::Output)?;
                serde_json::to_writer_pretty(&mut self.out, tree).map_err(json_error)?;
            }
            OutputFormat::Compact => {
                writeln!(self.out, "AST for {}:", display_path(path)).map_err(DumpError::Output)?;
                serde_json::to_writer(&mut self.out, tree).map_err(json_error)?;
            }
            OutputFormat::JsonLines => {
                let record = Record {
                    path: display_path(path),
                    ast: tree,
                };
                serde_json::to_writer(&mut self.out, &record).map_err(json_error)?;
            }
        }
        writeln!(self.out).map_err(DumpError::Output)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush().map_err(DumpError::Output)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javast_tree::Point;
    use std::path::PathBuf;

    fn tree() -> SyntaxNode {
        SyntaxNode::branch(
            "program",
            Point::new(0, 0),
            Point::new(0, 1),
            vec![SyntaxNode::leaf("identifier", Point::new(0, 0), Point::new(0, 1), "A")],
        )
    }

    fn render(format: OutputFormat) -> String {
        let mut writer = TreeWriter::new(Vec::new(), format);
        writer.write_banner(1, ".java").unwrap();
        writer.write_tree(&PathBuf::from("src/A.java"), &tree()).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_pretty_output() {
        let output = render(OutputFormat::Pretty);
        let mut lines = output.lines();
        assert_eq!(lines.next(), Some("Found 1 files matching '.java'."));
        assert_eq!(lines.next(), Some("AST for src/A.java:"));

        let json: String = lines.collect::<Vec<_>>().join("\n");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "program");
        assert_eq!(value["children"][0]["text"], "A");
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_compact_output() {
        let output = render(OutputFormat::Compact);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "AST for src/A.java:");
        let back: SyntaxNode = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(back, tree());
    }

    #[test]
    fn test_json_lines_output() {
        let output = render(OutputFormat::JsonLines);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1, "no banner or header in JSON Lines");

        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["path"], "src/A.java");
        assert_eq!(value["ast"]["start_point"], serde_json::json!([0, 0]));
        assert_eq!(value["ast"]["children"][0]["end_point"], serde_json::json!([0, 1]));
    }

    #[test]
    fn test_display_path_uses_forward_slashes() {
        assert_eq!(display_path(Path::new(r"src\main\A.java")), "src/main/A.java");
        assert_eq!(display_path(Path::new("src/A.java")), "src/A.java");
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_is_output_error() {
        let mut writer = TreeWriter::new(Broken, OutputFormat::Pretty);
        let err = writer.write_banner(0, ".java").unwrap_err();
        assert!(matches!(err, DumpError::Output(_)));
    }

    #[test]
    fn test_json_write_failure_is_output_error() {
        let mut writer = TreeWriter::new(Broken, OutputFormat::JsonLines);
        let err = writer.write_tree(Path::new("A.java"), &tree()).unwrap_err();
        match err {
            DumpError::Output(io) => assert_eq!(io.kind(), std::io::ErrorKind::BrokenPipe),
            other => panic!("expected an output error, got {:?}", other),
        }
    }
}
