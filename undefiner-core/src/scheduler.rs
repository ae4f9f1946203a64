//! Bounded parallel scanning with a single aggregation point.
//!
//! ```text
//!  walker thread            rayon pool (max_in_flight)        coordinator
//! ┌───────────────┐  par   ┌──────────────────────────┐ chan ┌────────────┐
//! │ walk_candidates├──────►│ scan_file per candidate  ├─────►│ Aggregator │
//! └───────────────┘ bridge └──────────────────────────┘      └────────────┘
//! ```
//!
//! - The walker is lazy; `par_bridge` only pulls a candidate when a pool
//!   thread is free, so at most `max_in_flight` scans run at once
//! - Results travel by value over a bounded channel and arrive in completion
//!   order
//! - The run is complete when the producer has exhausted the walk and every
//!   sender is dropped; an empty tree just disconnects immediately
//! - The first scan error aborts the run: the receiver is dropped, pending
//!   sends fail and the producer stops pulling candidates

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_channel::{bounded, Sender};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregate::{Aggregator, ScanStats};
use crate::classify::LineClassifier;
use crate::config::{ExclusionPolicy, ScanConfig};
use crate::error::{UndefinerError, UndefinerResult};
use crate::file_scan::{scan_file, FileFacts};
use crate::walk::{walk_candidates, Candidate};

/// One finished file scan as delivered to the coordinator.
#[derive(Debug)]
struct Scanned {
    facts: FileFacts,
    defines_excluded: bool,
}

/// Reads and classifies one candidate file.
pub type FileScanner =
    dyn Fn(&Path, &dyn LineClassifier) -> UndefinerResult<FileFacts> + Send + Sync;

/// Settled global state plus counters, available once every scan finished.
#[derive(Debug)]
pub struct ScanOutput {
    pub state: Aggregator,
    pub stats: ScanStats,
}

fn scan_candidate(
    candidate: Candidate,
    classifier: &dyn LineClassifier,
    scanner: &FileScanner,
) -> UndefinerResult<Scanned> {
    let mut facts = scanner(&candidate.path, classifier)?;
    let defines_excluded = !candidate.include_defines;
    if defines_excluded {
        facts.defines.clear();
    }
    debug!(
        path = %candidate.path.display(),
        defines = facts.defines.len(),
        uses = facts.uses.len(),
        defines_excluded,
        "scanned"
    );
    Ok(Scanned {
        facts,
        defines_excluded,
    })
}

/// Scan every candidate under `config.root` and aggregate the results.
pub fn run_scan(
    config: &ScanConfig,
    classifier: &dyn LineClassifier,
) -> UndefinerResult<ScanOutput> {
    run_scan_with(config, classifier, &scan_file)
}

/// [`run_scan`] with a custom per-file scanner in place of [`scan_file`].
pub fn run_scan_with(
    config: &ScanConfig,
    classifier: &dyn LineClassifier,
    scanner: &FileScanner,
) -> UndefinerResult<ScanOutput> {
    config.validate()?;
    let policy = ExclusionPolicy::new(&config.exclude_defines)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_in_flight)
        .thread_name(|i| format!("undefiner-scan-{i}"))
        .build()
        .map_err(|e| UndefinerError::internal(format!("failed to build scan pool: {e}")))?;

    info!(
        root = %config.root.display(),
        max_in_flight = config.max_in_flight,
        exclude_patterns = policy.len(),
        "scan started"
    );

    let skipped = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = bounded::<UndefinerResult<Scanned>>(config.max_in_flight);

    let mut state = Aggregator::new();
    let mut stats = ScanStats::default();

    std::thread::scope(|scope| -> UndefinerResult<()> {
        let producer = {
            let skipped = Arc::clone(&skipped);
            let policy = &policy;
            let pool = &pool;
            std::thread::Builder::new()
                .name("undefiner-walk".to_string())
                .spawn_scoped(scope, move || {
                    let candidates = walk_candidates(config, policy, skipped);
                    pool.install(|| {
                        candidates.par_bridge().try_for_each_with(
                            tx,
                            |tx: &mut Sender<UndefinerResult<Scanned>>, candidate| {
                                tx.send(scan_candidate(candidate, classifier, scanner))
                            },
                        )
                    })
                })
                .map_err(|e| UndefinerError::internal(format!("failed to spawn walker: {e}")))?
        };

        let mut failure = None;
        for result in rx.iter() {
            match result {
                Ok(scanned) => {
                    stats.files_scanned += 1;
                    if scanned.defines_excluded {
                        stats.files_defines_excluded += 1;
                    }
                    state.merge(scanned.facts);
                }
                Err(err) => {
                    failure = Some(err);
                    break;
                }
            }
        }
        drop(rx);

        // A send error only means the coordinator stopped early; `failure` holds why.
        if producer.join().is_err() {
            return Err(UndefinerError::internal("walker thread panicked"));
        }
        failure.map_or(Ok(()), Err)
    })?;

    stats.entries_skipped = skipped.load(Ordering::Relaxed);
    stats.symbols_defined = state.defines().len();
    stats.symbols_used = state.uses().len();
    stats.unused_count = state
        .defines()
        .keys()
        .filter(|symbol| !state.is_used(symbol))
        .count();

    info!(
        files = stats.files_scanned,
        excluded = stats.files_defines_excluded,
        skipped = stats.entries_skipped,
        defined = stats.symbols_defined,
        used = stats.symbols_used,
        unused = stats.unused_count,
        "scan finished"
    );

    Ok(ScanOutput { state, stats })
}
