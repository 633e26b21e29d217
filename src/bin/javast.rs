//! javast CLI
//!
//! Scans a directory for Java sources and prints the syntax tree of each
//! file as JSON.
//!
//! Exit status:
//! - 0: every discovered file was dumped
//! - 1: fatal error (bad root, bad config, grammar or output failure)
//! - 2: usage error (reported by clap)
//! - 3: partial success, at least one file was skipped

// Exclude from coverage - CLI binary tested via integration tests
#![cfg_attr(tarpaulin, ignore)]

use anyhow::Context;
use clap::{ArgAction, Parser, ValueEnum};
use javast::javast_tree::JavaEngine;
use javast::{ConfigFile, DumpConfig, OutputFormat, Pipeline, RunSummary, TreeWriter};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXIT_OK: i32 = 0;
const EXIT_FATAL: i32 = 1;
const EXIT_PARTIAL: i32 = 3;

/// Dump the tree-sitter syntax tree of every Java file under a directory.
#[derive(Parser, Debug)]
#[command(name = "javast")]
#[command(version = javast::VERSION)]
#[command(about = "Dump the tree-sitter syntax tree of every Java file under a directory as JSON")]
#[command(after_help = "EXAMPLES:
  # Pretty JSON for every .java file under src/
  javast src/

  # One JSON object per file, parsed on all cores
  javast . --format json-lines --jobs 0 -o trees.jsonl

CONFIG:
  A .javast.json file in ROOT (or --config FILE) may set
  \"suffix\", \"format\", \"jobs\" and \"ignore\". Flags win over the file.
")]
struct Cli {
    /// Root directory of the source tree to scan
    #[arg(value_name = "ROOT")]
    root: PathBuf,

    /// File name suffix to match, case-sensitive [default: .java]
    #[arg(long = "suffix", value_name = "SUFFIX")]
    suffix: Option<String>,

    /// Output format
    #[arg(long = "format", value_enum)]
    format: Option<OutputFormatArg>,

    /// Worker threads; 1 parses sequentially, 0 uses one per core
    #[arg(short = 'j', long = "jobs", value_name = "N")]
    jobs: Option<usize>,

    /// Config file path (default: ROOT/.javast.json if present)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    /// Header plus indented JSON
    Pretty,
    /// Header plus single-line JSON
    Compact,
    /// One {"path", "ast"} object per line
    JsonLines,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Pretty => OutputFormat::Pretty,
            OutputFormatArg::Compact => OutputFormat::Compact,
            OutputFormatArg::JsonLines => OutputFormat::JsonLines,
        }
    }
}

fn main() {
    // Fix broken pipe panic when piping to head/tail/etc.
    // Reset SIGPIPE to default behavior (terminate quietly)
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let code = match run(&cli) {
        Ok(summary) if summary.is_clean() => EXIT_OK,
        Ok(summary) => {
            eprintln!(
                "javast: skipped {} of {} files",
                summary.failures.len(),
                summary.discovered
            );
            EXIT_PARTIAL
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            EXIT_FATAL
        }
    };
    std::process::exit(code);
}

/// Log to stderr; `RUST_LOG` takes precedence over -v/-q
fn init_tracing(verbose: u8, quiet: bool) {
    let default = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config file values first, then flags on top
fn resolve_config(cli: &Cli) -> javast::Result<DumpConfig> {
    let file = match &cli.config {
        Some(path) => Some(ConfigFile::load(path)?),
        None => ConfigFile::find(&cli.root)?,
    };
    let mut config = match file {
        Some(file) => DumpConfig::from_file(&file)?,
        None => DumpConfig::default(),
    };

    if let Some(suffix) = &cli.suffix {
        config.suffix = suffix.clone();
    }
    if let Some(format) = cli.format {
        config.format = format.into();
    }
    if let Some(jobs) = cli.jobs {
        config.jobs = jobs;
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let pipeline = Pipeline::new(resolve_config(cli)?);
    let config = pipeline.config();

    let paths = pipeline.discover(&cli.root)?;

    let out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };
    let mut writer = TreeWriter::new(out, config.format);
    if writer.format().has_headers() {
        writer.write_banner(paths.len(), &config.suffix)?;
    } else if !cli.quiet {
        // stdout holds only records; the count goes next to the logs
        eprintln!("Found {} files matching '{}'.", paths.len(), config.suffix);
    }

    let summary = if config.is_parallel() {
        pipeline.process_parallel(JavaEngine::new, &paths, |path, tree| {
            writer.write_tree(path, tree)
        })?
    } else {
        let mut engine = JavaEngine::new().context("loading the Java grammar")?;
        pipeline.process(&mut engine, &paths, |path, tree| writer.write_tree(path, tree))?
    };

    writer.flush()?;
    Ok(summary)
}
