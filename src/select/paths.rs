//! Candidate path discovery on the local filesystem.
//!
//! Results are always sorted and de-duplicated so prompts are stable across
//! runs regardless of directory iteration order.
use super::error::{SelectResult, StageContext};
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};

const DOCKERFILE_TOKEN: &str = "dockerfile";
const DOCKERIGNORE_SUFFIX: &str = ".dockerignore";

/// True for names that look like a Dockerfile but not its ignore file.
pub fn is_dockerfile(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.contains(DOCKERFILE_TOKEN) && !lower.ends_with(DOCKERIGNORE_SUFFIX)
}

/// Find Dockerfiles in `root` and one directory level below it.
///
/// Files directly in `root` are reported as `./<name>`, nested ones as
/// `<dir>/<name>`. Sub-directories that cannot be read are skipped.
pub fn discover_dockerfiles(fs: &dyn FileSystem, root: &Path) -> SelectResult<Vec<String>> {
    let entries = fs
        .read_dir(root)
        .map_err(anyhow::Error::from)
        .stage(|| format!("read directory {}", root.display()))?;

    let mut found = Vec::new();
    for entry in entries {
        if !entry.is_dir {
            if is_dockerfile(&entry.name) {
                found.push(format!("./{}", entry.name));
            }
            continue;
        }
        let sub_entries = match fs.read_dir(&root.join(&entry.name)) {
            Ok(sub_entries) => sub_entries,
            Err(err) => {
                tracing::debug!(dir = %entry.name, error = %err, "skipping unreadable directory");
                continue;
            }
        };
        for sub in sub_entries {
            if !sub.is_dir && is_dockerfile(&sub.name) {
                found.push(format!("{}/{}", entry.name, sub.name));
            }
        }
    }
    found.sort();
    found.dedup();
    tracing::debug!(count = found.len(), "discovered Dockerfiles");
    Ok(found)
}

/// Walk settings for static source discovery.
#[derive(Debug, Clone)]
pub struct StaticSourceWalk {
    /// Directory the returned paths are relative to.
    pub root: PathBuf,
    /// Absolute path pruned from the walk, the tool's own config directory.
    pub reserved_dir: PathBuf,
    /// Deepest level reported, counting `root`'s children as 1. `None` walks
    /// the whole tree.
    pub max_depth: Option<usize>,
}

impl StaticSourceWalk {
    pub fn new(root: impl Into<PathBuf>, reserved_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            reserved_dir: reserved_dir.into(),
            max_depth: None,
        }
    }
}

/// List files and directories under the walk root that could be uploaded as
/// static assets. Hidden entries and the reserved directory are pruned.
pub fn discover_static_sources(
    fs: &dyn FileSystem,
    walk: &StaticSourceWalk,
) -> SelectResult<Vec<String>> {
    let mut found = Vec::new();
    walk_dir(fs, walk, &walk.root, "", 1, &mut found)?;
    found.sort();
    found.dedup();
    tracing::debug!(count = found.len(), "discovered static sources");
    Ok(found)
}

fn walk_dir(
    fs: &dyn FileSystem,
    walk: &StaticSourceWalk,
    dir: &Path,
    rel_prefix: &str,
    depth: usize,
    found: &mut Vec<String>,
) -> SelectResult<()> {
    if walk.max_depth.is_some_and(|max| depth > max) {
        return Ok(());
    }
    let entries = fs
        .read_dir(dir)
        .map_err(anyhow::Error::from)
        .stage(|| format!("read directory {}", dir.display()))?;
    for entry in entries {
        if entry.name.starts_with('.') {
            continue;
        }
        let abs = dir.join(&entry.name);
        if abs == walk.reserved_dir {
            continue;
        }
        let rel = if rel_prefix.is_empty() {
            entry.name.clone()
        } else {
            format!("{rel_prefix}/{}", entry.name)
        };
        if entry.is_dir {
            walk_dir(fs, walk, &abs, &rel, depth + 1, found)?;
        }
        found.push(rel);
    }
    Ok(())
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
