//! Module discovery: recursive directory scanning with exclusion rules.
//!
//! A directory counts as a module when it directly contains at least one
//! Terraform source file (`*.tf` or `*.tf.json`). Vendored and cached copies
//! under `.terraform/` or `.git/` are never visited.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::errors::{Error, Result};

/// Directory names never descended into or yielded. These hold cached or
/// vendored module copies that would surface as duplicate name matches.
const EXCLUDED_DIRS: &[&str] = &[".terraform", ".git"];

/// File suffixes that mark a directory as a module.
const SOURCE_SUFFIXES: &[&str] = &[".tf", ".tf.json"];

/// Check if a file name is a Terraform source file.
fn is_source_file(file_name: &str) -> bool {
    SOURCE_SUFFIXES
        .iter()
        .any(|suffix| file_name.ends_with(suffix))
}

/// Exclusion is decided on the entry's own name, one path segment at a time,
/// so a directory like `mygitstuff` is not caught by the `.git` rule.
fn is_excluded(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Check whether `dir` directly contains at least one Terraform source file.
///
/// Files in subdirectories do not count. Missing or unreadable directories
/// are simply not modules.
pub fn has_source_files(dir: &Path) -> bool {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return false;
    };

    entries.flatten().any(|entry| {
        entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            && entry
                .file_name()
                .to_str()
                .map(is_source_file)
                .unwrap_or(false)
    })
}

/// Recursively walk `root` and return every directory below it that passes
/// the source-file marker test.
///
/// The walk descends unconditionally except into excluded segments; the
/// marker test runs independently at every directory, so a directory without
/// sources still has its children scanned. Output order follows the walk and
/// is not sorted.
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(Error::NotFound(format!(
            "search path does not exist: {}",
            root.display()
        )));
    }

    let mut candidates = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry));

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            Error::io(path, err.into())
        })?;

        if entry.depth() == 0 || !entry.file_type().is_dir() {
            continue;
        }
        if has_source_files(entry.path()) {
            candidates.push(entry.path().to_path_buf());
        }
    }

    log::debug!(
        "scan of {} found {} module candidate(s)",
        root.display(),
        candidates.len()
    );
    Ok(candidates)
}

/// Find every module directory under `root` whose final path segment equals
/// `name` exactly. No wildcard semantics here; listing filters are the
/// caller's concern. An empty result is not an error.
pub fn find_by_name(root: &Path, name: &str) -> Result<Vec<PathBuf>> {
    let matches = scan(root)?
        .into_iter()
        .filter(|path| path.file_name().and_then(|n| n.to_str()) == Some(name))
        .collect();
    Ok(matches)
}

/// Enumerate all modules under `root` as a name-to-path map.
///
/// Duplicate leaf names within a single root overwrite each other; clashes
/// across roots are the resolver's concern.
pub fn list_all(root: &Path) -> Result<HashMap<String, PathBuf>> {
    let mut modules = HashMap::new();
    for path in scan(root)? {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            modules.insert(name.to_string(), path);
        }
    }
    Ok(modules)
}
