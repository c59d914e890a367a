//! Mapping changed files back to the modules that own them.
//!
//! Powers `list --changed`: the paths reported by `git diff` are walked
//! upward until the containing module directory is found.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::errors::{Error, Result};
use crate::finder;

/// Walk upward from `start` looking for the module directory that owns it.
///
/// The first ancestor (including `start` itself) that directly contains
/// Terraform sources wins. The walk stops, without a result, once it would
/// reach `stop`.
pub fn find_parent_module(start: &Path, stop: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        if current == stop {
            return None;
        }
        if finder::has_source_files(current) {
            return Some(current.to_path_buf());
        }
        dir = current.parent();
    }
    None
}

/// Map changed repo-relative paths to the module directories that own them.
///
/// Duplicates collapse to one entry; the result is sorted by module name so
/// the output is stable regardless of diff order.
pub fn resolve_changed_modules(repo_root: &Path, changed_paths: &[String]) -> Vec<PathBuf> {
    let mut modules: Vec<PathBuf> = Vec::new();

    for changed in changed_paths {
        let full = repo_root.join(changed);
        // git reports files; deleted ones no longer exist on disk, so fall
        // back to the parent directory either way.
        let start = if full.is_dir() {
            full
        } else {
            match full.parent() {
                Some(parent) => parent.to_path_buf(),
                None => continue,
            }
        };

        if let Some(module) = find_parent_module(&start, repo_root) {
            if !modules.contains(&module) {
                modules.push(module);
            }
        }
    }

    modules.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    modules
}

/// Paths changed against `git_ref`, as reported by
/// `git diff --name-only <ref>` run in the repository root.
pub fn git_changed_paths(repo_root: &Path, git_ref: &str) -> Result<Vec<String>> {
    let output = Command::new("git")
        .args(["diff", "--name-only", git_ref])
        .current_dir(repo_root)
        .output()
        .map_err(|err| Error::Subprocess(format!("failed to run git diff: {err}")))?;

    if !output.status.success() {
        return Err(Error::Subprocess(format!(
            "git diff --name-only {} failed: {}",
            git_ref,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn module_with_tests(root: &Path) -> (PathBuf, PathBuf) {
        let module = root.join("components").join("storage-account");
        let tests = module.join("tests");
        fs::create_dir_all(&tests).unwrap();
        fs::write(module.join("main.tf"), "# terraform").unwrap();
        fs::write(tests.join("main_test.go"), "package test").unwrap();
        (module, tests)
    }

    #[test]
    fn finds_parent_module_from_tests_dir() {
        let tmp = TempDir::new().unwrap();
        let (module, tests) = module_with_tests(tmp.path());

        assert_eq!(find_parent_module(&tests, tmp.path()), Some(module));
    }

    #[test]
    fn module_dir_is_its_own_parent() {
        let tmp = TempDir::new().unwrap();
        let (module, _) = module_with_tests(tmp.path());

        assert_eq!(
            find_parent_module(&module, tmp.path()),
            Some(module.clone())
        );
    }

    #[test]
    fn stops_at_repo_root_without_match() {
        let tmp = TempDir::new().unwrap();
        module_with_tests(tmp.path());

        let components = tmp.path().join("components");
        assert_eq!(find_parent_module(&components, tmp.path()), None);
    }

    #[test]
    fn resolves_and_dedupes_changed_paths() {
        let tmp = TempDir::new().unwrap();
        let storage = tmp.path().join("components").join("azurerm").join("storage-account");
        let key_vault = tmp.path().join("components").join("azurerm").join("key-vault");
        for dir in [&storage, &key_vault] {
            fs::create_dir_all(dir).unwrap();
            fs::write(dir.join("main.tf"), "# terraform").unwrap();
        }

        let changed = vec![
            "components/azurerm/storage-account/main.tf".to_string(),
            "components/azurerm/key-vault/variables.tf".to_string(),
            "components/azurerm/storage-account/outputs.tf".to_string(),
        ];

        let modules = resolve_changed_modules(tmp.path(), &changed);
        // Sorted by name: key-vault before storage-account, one entry each.
        assert_eq!(modules, vec![key_vault, storage]);
    }

    #[test]
    fn changed_path_outside_any_module_is_skipped() {
        let tmp = TempDir::new().unwrap();
        module_with_tests(tmp.path());
        fs::write(tmp.path().join("README.md"), "# docs").unwrap();

        let changed = vec!["README.md".to_string()];
        assert!(resolve_changed_modules(tmp.path(), &changed).is_empty());
    }
}
