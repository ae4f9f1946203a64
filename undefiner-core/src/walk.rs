//! Lazy, deterministic discovery of candidate source files.
//!
//! - Hidden directories are pruned via `WalkDir::filter_entry` (O(1) subtree skip)
//! - Hidden *files* are still visited when their extension matches
//! - Symlinks are not followed; only regular files become candidates
//! - Unreadable entries are logged and skipped

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{trace, warn};
use walkdir::WalkDir;

use crate::config::{ExclusionPolicy, ScanConfig};

/// A file to scan, plus whether its definitions count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub include_defines: bool,
}

/// Checks if a directory entry should be pruned (hidden directory below the root).
#[inline]
fn is_hidden_dir(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().as_encoded_bytes().starts_with(b".")
}

/// Walk `config.root` depth-first and yield candidates lazily.
///
/// `skipped` counts entries dropped because of traversal errors.
pub fn walk_candidates<'a>(
    config: &'a ScanConfig,
    policy: &'a ExclusionPolicy,
    skipped: Arc<AtomicUsize>,
) -> impl Iterator<Item = Candidate> + 'a {
    WalkDir::new(&config.root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden_dir(e))
        .filter_map(move |entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(path = ?err.path(), error = %err, "skipping unreadable entry");
                skipped.fetch_add(1, Ordering::Relaxed);
                None
            }
        })
        .filter(move |e| e.file_type().is_file() && config.has_candidate_extension(e.file_name()))
        .map(move |e| {
            let path = e.into_path();
            let include_defines = !policy.excludes(&path);
            trace!(path = %path.display(), include_defines, "candidate");
            Candidate {
                path,
                include_defines,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::atomic::AtomicU64;

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn create_temp_tree(name: &str) -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir()
            .join("undefiner_walk_test")
            .join(format!("{}_{}_{}", name, std::process::id(), id));
        if dir.exists() {
            fs::remove_dir_all(&dir).ok();
        }
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_file(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn collect(config: &ScanConfig, policy: &ExclusionPolicy) -> Vec<Candidate> {
        walk_candidates(config, policy, Arc::new(AtomicUsize::new(0))).collect()
    }

    fn names(candidates: &[Candidate], root: &Path) -> Vec<String> {
        candidates
            .iter()
            .map(|c| {
                c.path
                    .strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_extension_filter_and_order() {
        let root = create_temp_tree("ext");
        write_file(&root.join("b.c"), "");
        write_file(&root.join("a.h"), "");
        write_file(&root.join("notes.txt"), "");
        write_file(&root.join("sub/z.c"), "");
        write_file(&root.join("sub/main.cpp"), "");

        let config = ScanConfig::new(&root);
        let found = collect(&config, &ExclusionPolicy::empty());
        assert_eq!(names(&found, &root), vec!["a.h", "b.c", "sub/z.c"]);
        assert!(found.iter().all(|c| c.include_defines));

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_hidden_dirs_pruned_hidden_files_kept() {
        let root = create_temp_tree("hidden");
        write_file(&root.join(".git/x.h"), "#define HIDDEN 1");
        write_file(&root.join("src/.cache/y.c"), "");
        write_file(&root.join("src/.local.h"), "");
        write_file(&root.join("src/visible.c"), "");

        let config = ScanConfig::new(&root);
        let found = collect(&config, &ExclusionPolicy::empty());
        assert_eq!(names(&found, &root), vec!["src/.local.h", "src/visible.c"]);

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_hidden_root_is_walked() {
        let parent = create_temp_tree("root");
        let root = parent.join(".project");
        write_file(&root.join("a.c"), "");

        let config = ScanConfig::new(&root);
        let found = collect(&config, &ExclusionPolicy::empty());
        assert_eq!(found.len(), 1);

        fs::remove_dir_all(&parent).ok();
    }

    #[test]
    fn test_exclusion_flag() {
        let root = create_temp_tree("exclude");
        write_file(&root.join("gen_table.h"), "");
        write_file(&root.join("table.h"), "");

        let config = ScanConfig::new(&root);
        let policy = ExclusionPolicy::new(&["gen_*.h".to_string()]).unwrap();
        let found = collect(&config, &policy);

        assert_eq!(found.len(), 2);
        for c in &found {
            let excluded = c.path.file_name().unwrap() == "gen_table.h";
            assert_eq!(c.include_defines, !excluded);
        }

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_empty_tree() {
        let root = create_temp_tree("empty");
        let config = ScanConfig::new(&root);
        assert!(collect(&config, &ExclusionPolicy::empty()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_not_followed() {
        let root = create_temp_tree("symlink");
        write_file(&root.join("real/a.h"), "");
        std::os::unix::fs::symlink(root.join("real/a.h"), root.join("link.h")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("linkdir")).unwrap();

        let config = ScanConfig::new(&root);
        let found = collect(&config, &ExclusionPolicy::empty());
        assert_eq!(names(&found, &root), vec!["real/a.h"]);

        fs::remove_dir_all(&root).ok();
    }
}
