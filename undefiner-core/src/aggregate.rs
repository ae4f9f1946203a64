//! Single-writer merge of per-file facts into the global view.
//!
//! The aggregator is owned by the coordinating thread and is the only thing
//! that mutates global define/use state, so it needs no locks.
//!
//! Duplicate definitions are last-write-wins in arrival order. Arrival order
//! follows task completion, so which location survives for a symbol defined
//! in several files can differ between runs. The *set* of symbols does not.

use serde::Serialize;

use crate::file_scan::{DefineTable, FileFacts, Location, UseSet};

/// Counters for one scan run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_defines_excluded: usize,
    pub entries_skipped: usize,
    pub symbols_defined: usize,
    pub symbols_used: usize,
    pub unused_count: usize,
}

/// Global define table and use set for a run.
#[derive(Debug, Default)]
pub struct Aggregator {
    defines: DefineTable,
    uses: UseSet,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one file's facts. Later definitions overwrite earlier ones.
    pub fn merge(&mut self, facts: FileFacts) {
        self.defines.extend(facts.defines);
        if self.uses.is_empty() {
            self.uses = facts.uses;
        } else {
            self.uses.extend(facts.uses);
        }
    }

    pub fn defines(&self) -> &DefineTable {
        &self.defines
    }

    pub fn uses(&self) -> &UseSet {
        &self.uses
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.defines.contains_key(symbol)
    }

    pub fn is_used(&self, symbol: &str) -> bool {
        self.uses.contains(symbol)
    }

    pub fn location(&self, symbol: &str) -> Option<&Location> {
        self.defines.get(symbol)
    }
}
