//! Line classification: which symbol a line defines, which symbols it uses.
//!
//! Matching is purely lexical. Comments, string literals and `#if 0` blocks
//! are not recognized, so a mention anywhere counts as a use.
//!
//! Lines are byte slices; source files with invalid UTF-8 classify fine since
//! symbols are ASCII by construction.

use std::collections::HashSet;
use std::ops::Range;

use regex::bytes::Regex;

use crate::error::{UndefinerError, UndefinerResult};

/// `#`, optional whitespace, `define`, whitespace, then the symbol.
const DEFINE_PATTERN: &str = r"#\s*define\s+([A-Za-z_][A-Za-z0-9_]*)";

/// A maximal identifier run starting at an ASCII word boundary.
const USE_PATTERN: &str = r"(?-u:\b)[A-Za-z_][A-Za-z0-9_]*";

/// The symbol named by a define directive, with its byte span in the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineMatch {
    pub symbol: String,
    pub span: Range<usize>,
}

/// Pluggable line matcher used by the file scanner.
pub trait LineClassifier: Send + Sync {
    /// The first symbol defined on `line`, if any.
    fn match_define(&self, line: &[u8]) -> Option<DefineMatch>;

    /// Every symbol referenced on `line`.
    ///
    /// The token at `excluded`'s exact span is skipped; other occurrences of
    /// the same name still count.
    fn match_uses(&self, line: &[u8], excluded: Option<&DefineMatch>) -> HashSet<String>;
}

/// Regex-backed classifier for `#define` directives.
#[derive(Debug, Clone)]
pub struct DirectiveClassifier {
    define_re: Regex,
    use_re: Regex,
}

impl DirectiveClassifier {
    pub fn new() -> UndefinerResult<Self> {
        Ok(Self {
            define_re: compile(DEFINE_PATTERN)?,
            use_re: compile(USE_PATTERN)?,
        })
    }
}

fn compile(pattern: &str) -> UndefinerResult<Regex> {
    Regex::new(pattern).map_err(|e| UndefinerError::pattern(pattern, e))
}

/// Identifiers produced by the patterns above are ASCII.
fn symbol_from(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

impl LineClassifier for DirectiveClassifier {
    fn match_define(&self, line: &[u8]) -> Option<DefineMatch> {
        let caps = self.define_re.captures(line)?;
        let name = caps.get(1)?;
        Some(DefineMatch {
            symbol: symbol_from(name.as_bytes()),
            span: name.range(),
        })
    }

    fn match_uses(&self, line: &[u8], excluded: Option<&DefineMatch>) -> HashSet<String> {
        self.use_re
            .find_iter(line)
            .filter(|m| excluded.map_or(true, |def| def.span != m.range()))
            .map(|m| symbol_from(m.as_bytes()))
            .collect()
    }
}
