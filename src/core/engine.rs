//! Pipeline - Main orchestration for javast
//!
//! The Pipeline coordinates discovery, reading, parsing and serialization.
//! Each file is read once, parsed once and converted into an owned
//! `SyntaxNode`; nothing is carried from one file to the next except the
//! engine, which is built once and reused.
//!
//! Failure policy:
//! - an unusable scan root aborts before any file is touched
//! - a read failure or invalid UTF-8 in a leaf skips that file only
//! - a failing sink aborts the run

use crate::core::error::{DumpError, Result};
use crate::core::models::DumpConfig;
use crate::core::walker::{FileWalker, SuffixWalker};
use javast_tree::{serialize_iterative, SyntaxEngine, SyntaxNode, SyntaxTree};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A file that was discovered but produced no tree
#[derive(Debug)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: DumpError,
}

/// Outcome of a run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Files found by discovery
    pub discovered: usize,
    /// Files whose tree reached the sink
    pub succeeded: usize,
    /// Files skipped, in discovery order
    pub failures: Vec<FileFailure>,
}

impl RunSummary {
    /// True when every discovered file reached the sink
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Keep a file's tree, or note why it was skipped
    ///
    /// Errors that are not confined to one file are passed back to abort
    /// the run.
    fn record(&mut self, path: &Path, outcome: Result<SyntaxNode>) -> Result<Option<SyntaxNode>> {
        match outcome {
            Ok(tree) => Ok(Some(tree)),
            Err(error) if error.is_per_file() => {
                warn!(path = %path.display(), %error, "skipping file");
                self.failures.push(FileFailure {
                    path: path.to_path_buf(),
                    error,
                });
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

/// Read, parse and serialize one file
pub fn process_file<E: SyntaxEngine>(engine: &mut E, path: &Path) -> Result<SyntaxNode> {
    let source = std::fs::read(path).map_err(|source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let ast_error = |source| DumpError::Ast {
        path: path.to_path_buf(),
        source,
    };
    let tree = engine.parse(&source).map_err(ast_error)?;
    let ast = serialize_iterative(&tree.root(), &source).map_err(ast_error)?;

    debug!(
        path = %path.display(),
        grammar = engine.grammar(),
        bytes = source.len(),
        nodes = ast.node_count(),
        syntax_errors = ast.has_errors(),
        "serialized"
    );
    Ok(ast)
}

/// Discovery plus per-file processing, driven by a `DumpConfig`
pub struct Pipeline<W: FileWalker = SuffixWalker> {
    walker: W,
    config: DumpConfig,
}

impl Pipeline<SuffixWalker> {
    /// Create a pipeline with the default walker
    pub fn new(config: DumpConfig) -> Self {
        let walker = SuffixWalker::new().with_ignore_dirs(config.ignore_dirs.clone());
        Self { walker, config }
    }
}

impl<W: FileWalker> Pipeline<W> {
    /// Create a pipeline with a custom walker
    pub fn with_walker(walker: W, config: DumpConfig) -> Self {
        Self { walker, config }
    }

    pub fn config(&self) -> &DumpConfig {
        &self.config
    }

    /// Find the files to process, in processing order
    pub fn discover(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let files = self.walker.discover(root, &self.config.suffix)?;
        info!(
            root = %root.display(),
            suffix = %self.config.suffix,
            "Found {} files.",
            files.len()
        );
        Ok(files)
    }

    /// Discover and process sequentially with one engine
    pub fn run<E, F>(&self, engine: &mut E, root: &Path, sink: F) -> Result<RunSummary>
    where
        E: SyntaxEngine,
        F: FnMut(&Path, &SyntaxNode) -> Result<()>,
    {
        let paths = self.discover(root)?;
        self.process(engine, &paths, sink)
    }

    /// Process already-discovered files one after another
    pub fn process<E, F>(&self, engine: &mut E, paths: &[PathBuf], mut sink: F) -> Result<RunSummary>
    where
        E: SyntaxEngine,
        F: FnMut(&Path, &SyntaxNode) -> Result<()>,
    {
        let mut summary = RunSummary {
            discovered: paths.len(),
            ..Default::default()
        };

        for path in paths {
            if let Some(tree) = summary.record(path, process_file(engine, path))? {
                sink(path.as_path(), &tree)?;
                summary.succeeded += 1;
            }
        }

        self.finish(&summary);
        Ok(summary)
    }

    /// Process files on a rayon pool
    ///
    /// `make_engine` runs once per rayon work split, and each engine is reused
    /// for every file in its split; engines are never shared. Trees are
    /// collected into per-file slots and handed to the sink in discovery order
    /// once every file is done, so output matches `process`.
    pub fn process_parallel<E, M, F>(
        &self,
        make_engine: M,
        paths: &[PathBuf],
        mut sink: F,
    ) -> Result<RunSummary>
    where
        E: SyntaxEngine,
        M: Fn() -> javast_tree::Result<E> + Send + Sync,
        F: FnMut(&Path, &SyntaxNode) -> Result<()>,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.jobs)
            .build()
            .map_err(|e| DumpError::invalid_config(format!("cannot start worker pool: {}", e)))?;
        debug!(threads = pool.current_num_threads(), "worker pool ready");

        let outcomes: Vec<Result<SyntaxNode>> = pool.install(|| {
            paths
                .par_iter()
                .map_init(&make_engine, |engine, path| match engine {
                    Ok(engine) => process_file(engine, path),
                    Err(err) => Err(DumpError::Ast {
                        path: path.clone(),
                        source: err.clone(),
                    }),
                })
                .collect()
        });

        let mut summary = RunSummary {
            discovered: paths.len(),
            ..Default::default()
        };
        for (path, outcome) in paths.iter().zip(outcomes) {
            if let Some(tree) = summary.record(path, outcome)? {
                sink(path.as_path(), &tree)?;
                summary.succeeded += 1;
            }
        }

        self.finish(&summary);
        Ok(summary)
    }

    fn finish(&self, summary: &RunSummary) {
        info!(
            discovered = summary.discovered,
            succeeded = summary.succeeded,
            skipped = summary.failures.len(),
            "run finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::walker::MockFileWalker;
    use javast_tree::stub::WordEngine;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &[u8]) -> PathBuf {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn collect(
        pipeline: &Pipeline<impl FileWalker>,
        engine: &mut WordEngine,
        root: &Path,
    ) -> (RunSummary, Vec<(PathBuf, SyntaxNode)>) {
        let mut out = Vec::new();
        let summary = pipeline
            .run(engine, root, |path, tree| {
                out.push((path.to_path_buf(), tree.clone()));
                Ok(())
            })
            .unwrap();
        (summary, out)
    }

    #[test]
    fn test_run_emits_trees_in_discovery_order() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "b/B.java", b"class B {}");
        write(root, "A.java", b"class A {}");
        write(root, "notes.txt", b"not java");

        let pipeline = Pipeline::new(DumpConfig::default());
        let mut engine = WordEngine::new();
        let (summary, out) = collect(&pipeline, &mut engine, root);

        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.succeeded, 2);
        assert!(summary.is_clean());
        assert_eq!(engine.calls(), 2);

        let names: Vec<String> = out.iter().map(|(_, t)| t.leaf_text()).collect();
        assert_eq!(names, vec!["classA{}", "classB{}"]);
        assert!(out[0].0.ends_with("A.java"));
    }

    #[test]
    fn test_zero_files_means_zero_parses() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "README.md", b"# readme");

        let pipeline = Pipeline::new(DumpConfig::default());
        let mut engine = WordEngine::new();
        let (summary, out) = collect(&pipeline, &mut engine, temp_dir.path());

        assert_eq!(summary.discovered, 0);
        assert!(out.is_empty());
        assert_eq!(engine.calls(), 0);
    }

    #[test]
    fn test_missing_root_aborts() {
        let temp_dir = TempDir::new().unwrap();
        let pipeline = Pipeline::new(DumpConfig::default());
        let mut engine = WordEngine::new();

        let err = pipeline
            .run(&mut engine, &temp_dir.path().join("nope"), |_, _| Ok(()))
            .unwrap_err();
        assert!(err.is_path_error());
        assert_eq!(engine.calls(), 0);
    }

    #[test]
    fn test_file_deleted_after_discovery_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        let present = write(&root, "Present.java", b"class Present {}");
        let gone = root.join("Gone.java");

        let mut walker = MockFileWalker::new();
        let listed = vec![gone.clone(), present.clone()];
        walker
            .expect_discover()
            .times(1)
            .returning(move |_, _| Ok(listed.clone()));

        let pipeline = Pipeline::with_walker(walker, DumpConfig::default());
        let mut engine = WordEngine::new();
        let (summary, out) = collect(&pipeline, &mut engine, &root);

        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.succeeded, 1);
        assert!(!summary.is_clean());
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].path, gone);
        assert!(matches!(summary.failures[0].error, DumpError::Io { .. }));

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].0, present);
    }

    #[test]
    fn test_invalid_utf8_skips_only_that_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write(root, "A.java", b"class A {}");
        write(root, "Bad.java", b"class \xff\xfe {}");
        write(root, "C.java", b"class C {}");

        let pipeline = Pipeline::new(DumpConfig::default());
        let mut engine = WordEngine::new();
        let (summary, out) = collect(&pipeline, &mut engine, root);

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].path.ends_with("Bad.java"));
        assert!(summary.failures[0].error.is_encoding_error());

        let names: Vec<String> = out.iter().map(|(_, t)| t.leaf_text()).collect();
        assert_eq!(names, vec!["classA{}", "classC{}"]);
    }

    #[test]
    fn test_engine_failure_is_per_file() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "A.java", b"class A {}");

        let pipeline = Pipeline::new(DumpConfig::default());
        let mut engine = WordEngine::failing();
        let (summary, out) = collect(&pipeline, &mut engine, temp_dir.path());

        assert!(out.is_empty());
        assert!(matches!(summary.failures[0].error, DumpError::Ast { .. }));
    }

    #[test]
    fn test_record_skips_file_errors_and_passes_others_through() {
        let mut summary = RunSummary::default();

        let skipped = summary
            .record(
                Path::new("Gone.java"),
                Err(DumpError::Io {
                    path: PathBuf::from("Gone.java"),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
                }),
            )
            .unwrap();
        assert!(skipped.is_none());
        assert_eq!(summary.failures.len(), 1);

        let err = summary
            .record(Path::new("A.java"), Err(DumpError::invalid_config("bad pool")))
            .unwrap_err();
        assert!(matches!(err, DumpError::InvalidConfig { .. }));
        assert_eq!(summary.failures.len(), 1);
    }

    #[test]
    fn test_sink_error_aborts_run() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "A.java", b"class A {}");
        write(temp_dir.path(), "B.java", b"class B {}");

        let pipeline = Pipeline::new(DumpConfig::default());
        let mut engine = WordEngine::new();
        let err = pipeline
            .run(&mut engine, temp_dir.path(), |_, _| {
                Err(DumpError::Output(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "closed",
                )))
            })
            .unwrap_err();

        assert!(matches!(err, DumpError::Output(_)));
        assert_eq!(engine.calls(), 1);
    }

    #[test]
    fn test_custom_suffix() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "A.java", b"class A {}");
        write(temp_dir.path(), "B.jav", b"class B {}");

        let config = DumpConfig {
            suffix: ".jav".to_string(),
            ..Default::default()
        };
        let pipeline = Pipeline::new(config);
        let mut engine = WordEngine::new();
        let (_, out) = collect(&pipeline, &mut engine, temp_dir.path());

        assert_eq!(out.len(), 1);
        assert!(out[0].0.ends_with("B.jav"));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for i in 0..24 {
            write(root, &format!("pkg{}/F{:02}.java", i % 3, i), format!("class F{} {{}}", i).as_bytes());
        }
        write(root, "pkg1/Bad.java", b"\xff");

        let config = DumpConfig {
            jobs: 4,
            ..Default::default()
        };
        let pipeline = Pipeline::new(config);
        let paths = pipeline.discover(root).unwrap();

        let mut sequential = Vec::new();
        let seq_summary = pipeline
            .process(&mut WordEngine::new(), &paths, |path, tree| {
                sequential.push((path.to_path_buf(), tree.clone()));
                Ok(())
            })
            .unwrap();

        let mut parallel = Vec::new();
        let par_summary = pipeline
            .process_parallel(
                || Ok(WordEngine::new()),
                &paths,
                |path, tree| {
                    parallel.push((path.to_path_buf(), tree.clone()));
                    Ok(())
                },
            )
            .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(seq_summary.succeeded, par_summary.succeeded);
        assert_eq!(par_summary.failures.len(), 1);
        assert!(par_summary.failures[0].path.ends_with("Bad.java"));
    }

    #[test]
    fn test_parallel_engine_init_failure_is_per_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(temp_dir.path(), "A.java", b"class A {}");

        let config = DumpConfig {
            jobs: 2,
            ..Default::default()
        };
        let pipeline = Pipeline::new(config);
        let summary = pipeline
            .process_parallel(
                || -> javast_tree::Result<WordEngine> {
                    Err(javast_tree::AstError::TreeSitterError("incompatible grammar".to_string()))
                },
                &[path],
                |_, _| Ok(()),
            )
            .unwrap();

        assert_eq!(summary.succeeded, 0);
        assert_eq!(summary.failures.len(), 1);
    }
}
