//! Unused-define computation and output formatting - plaintext and JSON.

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::json;

use crate::aggregate::{Aggregator, ScanStats};

/// A defined symbol that nothing in the tree references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedDefine {
    pub symbol: String,
    #[serde(serialize_with = "serialize_path_lossy")]
    pub path: Arc<Path>,
    pub line: usize,
}

/// JSON strings must be UTF-8; invalid sequences become U+FFFD.
fn serialize_path_lossy<S: Serializer>(
    path: &Arc<Path>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

/// Symbols defined but never used, sorted by name (byte order).
///
/// The location is whichever definition was on record when the scan settled.
pub fn find_unused(state: &Aggregator) -> Vec<UnusedDefine> {
    let mut unused: Vec<UnusedDefine> = state
        .defines()
        .iter()
        .filter(|(symbol, _)| !state.is_used(symbol))
        .map(|(symbol, loc)| UnusedDefine {
            symbol: symbol.clone(),
            path: Arc::clone(&loc.path),
            line: loc.line,
        })
        .collect();

    unused.sort_by(|a, b| a.symbol.cmp(&b.symbol));
    unused
}

/// `PATH:LINE: define 'SYMBOL' not used`, with the path rendered lossily.
pub fn format_line(unused: &UnusedDefine) -> String {
    format!(
        "{}:{}: define '{}' not used",
        unused.path.display(),
        unused.line,
        unused.symbol
    )
}

/// Writes one line per unused define. Paths are written as their raw bytes.
pub fn write_plain<W: Write>(out: &mut W, unused: &[UnusedDefine]) -> io::Result<()> {
    for u in unused {
        out.write_all(u.path.as_os_str().as_encoded_bytes())?;
        writeln!(out, ":{}: define '{}' not used", u.line, u.symbol)?;
    }
    Ok(())
}

/// Writes the report and run counters as a single JSON document.
pub fn write_json<W: Write>(
    out: &mut W,
    unused: &[UnusedDefine],
    stats: &ScanStats,
) -> io::Result<()> {
    let doc = json!({
        "unused": unused,
        "stats": stats,
    });
    serde_json::to_writer_pretty(&mut *out, &doc)?;
    writeln!(out)
}
