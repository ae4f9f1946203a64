//! Per-file extraction of define and use facts.
//!
//! A scan owns no shared state: it reads one file and returns its facts by
//! value for the aggregator to merge.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classify::LineClassifier;
use crate::error::{IoResultExt, UndefinerResult};

/// Where a symbol was defined: file path and 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: Arc<Path>,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// Symbol → location of its last recorded definition.
pub type DefineTable = HashMap<String, Location>;

/// Symbols referenced somewhere, without position.
pub type UseSet = HashSet<String>;

/// Everything one file contributes to a scan.
#[derive(Debug, Clone, Default)]
pub struct FileFacts {
    pub defines: DefineTable,
    pub uses: UseSet,
}

/// Scan the file at `path`.
///
/// Open and read failures are returned with the path attached; there is no
/// per-file recovery.
pub fn scan_file(path: &Path, classifier: &dyn LineClassifier) -> UndefinerResult<FileFacts> {
    let file = File::open(path).with_path(path)?;
    scan_reader(path, BufReader::new(file), classifier)
}

/// Scan any buffered source, attributing definitions to `path`.
pub fn scan_reader<R: BufRead>(
    path: impl Into<PathBuf>,
    mut reader: R,
    classifier: &dyn LineClassifier,
) -> UndefinerResult<FileFacts> {
    let path: Arc<Path> = Arc::from(path.into());
    let mut facts = FileFacts::default();
    let mut buf = Vec::with_capacity(256);
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf).with_path(&*path)?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = trim_eol(&buf);
        let define = classifier.match_define(line);
        if let Some(def) = &define {
            facts.defines.insert(
                def.symbol.clone(),
                Location {
                    path: Arc::clone(&path),
                    line: line_no,
                },
            );
        }
        facts.uses.extend(classifier.match_uses(line, define.as_ref()));
    }

    Ok(facts)
}

fn trim_eol(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
