//! undefiner CLI - reports `#define`s that are never used anywhere in a tree.
//!
//! Output goes to stdout, one line per unused define:
//!
//! ```text
//! src/config.h:12: define 'HAVE_OLD_API' not used
//! ```
//!
//! Diagnostics go to stderr (filter with `RUST_LOG`).

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;

use undefiner_core::{init_logging, write_json, write_plain, AnalysisResult, Undefiner};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find preprocessor defines that are never used")]
pub struct Cli {
    /// Root directory to scan
    dir: PathBuf,

    /// Ignore definitions (but not uses) in files whose base name matches PATTERN
    #[arg(short = 'x', long = "exclude-defines", value_name = "PATTERN")]
    exclude_defines: Vec<String>,

    /// File extension to scan (repeatable; default: .c and .h)
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    extensions: Vec<String>,

    /// Maximum number of files scanned concurrently
    #[arg(short = 'j', long, value_name = "N", default_value_t = undefiner_core::DEFAULT_MAX_IN_FLIGHT)]
    jobs: usize,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when any unused define is reported
    #[arg(long)]
    deny_unused: bool,
}

/// Accepts `h` as well as `.h`.
fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}

fn build_analysis(cli: &Cli) -> Undefiner {
    let mut analysis = Undefiner::new(&cli.dir)
        .exclude_defines(cli.exclude_defines.iter().cloned())
        .max_in_flight(cli.jobs);

    if !cli.extensions.is_empty() {
        analysis = analysis.extensions(cli.extensions.iter().map(|e| normalize_extension(e)));
    }
    analysis
}

fn print_result<W: Write>(cli: &Cli, result: &AnalysisResult, out: &mut W) -> Result<()> {
    if cli.json {
        write_json(out, &result.unused, &result.stats)?;
    } else {
        write_plain(out, &result.unused)?;
    }
    out.flush()?;
    Ok(())
}

/// Runs the scan and prints the report. Returns whether anything was reported.
fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<bool> {
    run_analysis(cli, &build_analysis(cli), out)
}

/// Nothing reaches `out` unless the whole scan succeeded.
fn run_analysis<W: Write>(cli: &Cli, analysis: &Undefiner, out: &mut W) -> Result<bool> {
    let result = analysis
        .analyze()
        .with_context(|| format!("Failed to scan {}", cli.dir.display()))?;

    print_result(cli, &result, out)?;
    Ok(!result.unused.is_empty())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.json);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let has_unused = run(&cli, &mut out)?;

    if cli.deny_unused && has_unused {
        std::process::exit(1);
    }
    Ok(())
}
