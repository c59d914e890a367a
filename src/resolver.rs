//! Target resolution: turning a module name or explicit path into a single
//! unambiguous directory.
//!
//! A name is searched across the three module trees in fixed order. A module
//! name is expected to be globally unique; more than one match is an error
//! carrying every conflicting path, never a guess.

use std::path::{Component, Path, PathBuf};

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::finder;

/// Module tree directory names, in search order.
pub const MODULE_DIRS: &[&str] = &["components", "bases", "projects"];

/// Subdirectory holding per-module example configurations.
pub const EXAMPLES_DIR: &str = "examples";

/// Which module tree a directory sits under. The ordering is the display
/// order for listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ModuleType {
    Component,
    Base,
    Project,
}

impl ModuleType {
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleType::Component => "component",
            ModuleType::Base => "base",
            ModuleType::Project => "project",
        }
    }

    fn tree_dir(self) -> &'static str {
        match self {
            ModuleType::Component => "components",
            ModuleType::Base => "bases",
            ModuleType::Project => "projects",
        }
    }
}

/// Classify a path by the module tree appearing among its ancestors.
///
/// Comparison is per path segment, not substring, so `my-components-dir`
/// never classifies. Paths outside the three trees yield `None`.
pub fn module_type(path: &Path) -> Option<ModuleType> {
    let has_segment = |dir: &str| {
        path.components()
            .any(|c| matches!(c, Component::Normal(seg) if seg.to_str() == Some(dir)))
    };

    [ModuleType::Component, ModuleType::Base, ModuleType::Project]
        .into_iter()
        .find(|ty| has_segment(ty.tree_dir()))
}

/// Resolve the command target from an optional module name and an optional
/// explicit path. Exactly one of the two must be supplied.
pub fn resolve_target(
    config: &Config,
    cwd: &Path,
    name: Option<&str>,
    explicit_path: Option<&Path>,
) -> Result<PathBuf> {
    match (name, explicit_path) {
        (Some(_), Some(_)) => Err(Error::Usage(
            "--path is mutually exclusive with a module name argument".to_string(),
        )),
        (None, None) => Err(Error::Usage(
            "specify either a module name or --path".to_string(),
        )),
        (None, Some(path)) => resolve_explicit_path(cwd, path),
        (Some(name), None) => find_in_module_dirs(&config.base_path(cwd), name),
    }
}

/// An explicit path is taken as-is: made absolute and checked for existence.
/// No tree search and no uniqueness check apply.
fn resolve_explicit_path(cwd: &Path, path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    if !absolute.exists() {
        return Err(Error::NotFound(format!(
            "path does not exist: {}",
            path.display()
        )));
    }

    Ok(absolute)
}

/// Search all module trees under `base` for `name` and reduce the combined
/// matches to a single path.
fn find_in_module_dirs(base: &Path, name: &str) -> Result<PathBuf> {
    let mut all_matches = Vec::new();

    for module_dir in MODULE_DIRS {
        let search_root = base.join(module_dir);
        // A missing tree is skipped, not an error.
        if !search_root.is_dir() {
            continue;
        }
        all_matches.extend(finder::find_by_name(&search_root, name)?);
    }

    select_unique(name, all_matches)
}

/// Reduce accumulated matches to one result. Pure merge step, independent of
/// how each tree was scanned: zero matches and multiple matches both fail,
/// and the ambiguity error preserves discovery order.
pub fn select_unique(name: &str, mut matches: Vec<PathBuf>) -> Result<PathBuf> {
    match matches.len() {
        0 => Err(Error::NotFound(format!(
            "module '{name}' not found in components, bases, or projects"
        ))),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::AmbiguousName {
            name: name.to_string(),
            matches,
        }),
    }
}

/// Retarget a resolved module to one of its example configurations.
///
/// The example directory must exist and itself contain Terraform sources.
pub fn resolve_example(module_path: &Path, example: &str) -> Result<PathBuf> {
    let example_path = module_path.join(EXAMPLES_DIR).join(example);

    if !example_path.is_dir() {
        return Err(Error::NotFound(format!(
            "example '{}' not found in {}",
            example,
            module_path.join(EXAMPLES_DIR).display()
        )));
    }

    if !finder::has_source_files(&example_path) {
        return Err(Error::NotFound(format!(
            "example '{}' is not a valid module (no Terraform files in {})",
            example,
            example_path.display()
        )));
    }

    Ok(example_path)
}
