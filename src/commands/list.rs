//! The `list` subcommand: enumerate modules across all three trees, with
//! optional wildcard filtering, changed-only mode, and JSON output.

use std::path::Path;

use comfy_table::{presets, Table};
use serde::Serialize;

use crate::changed;
use crate::config::Config;
use crate::errors::Result;
use crate::finder;
use crate::pattern;
use crate::resolver::{self, MODULE_DIRS};
use crate::version;

/// One row of listing output.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub module_type: String,
    /// Path relative to the repository base.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub json: bool,
    pub names: bool,
    pub changed: bool,
    pub git_ref: String,
}

pub fn run(config: &Config, cwd: &Path, opts: &ListOptions) -> Result<()> {
    let base = config.base_path(cwd);

    let mut modules = if opts.changed {
        collect_changed(&base, &opts.git_ref, opts.search.as_deref())?
    } else {
        collect_modules(&base, opts.search.as_deref())?
    };
    sort_modules(&mut modules);

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&modules)?);
        return Ok(());
    }

    if opts.names {
        for module in &modules {
            println!("{}", module.name);
        }
        return Ok(());
    }

    if modules.is_empty() {
        match opts.search.as_deref() {
            Some(filter) => println!("No modules found matching '{filter}'"),
            None => println!("No modules found"),
        }
        return Ok(());
    }

    print_table(&modules);
    Ok(())
}

/// Discover all modules under the three trees, applying the wildcard filter.
fn collect_modules(base: &Path, search: Option<&str>) -> Result<Vec<ModuleInfo>> {
    let mut all = Vec::new();

    for module_dir in MODULE_DIRS {
        let search_root = base.join(module_dir);
        if !search_root.is_dir() {
            continue;
        }
        for (name, path) in finder::list_all(&search_root)? {
            if matches_filter(&name, search) {
                all.push(describe_module(base, name, &path));
            }
        }
    }

    Ok(all)
}

/// Only the modules owning paths changed against `git_ref`.
fn collect_changed(base: &Path, git_ref: &str, search: Option<&str>) -> Result<Vec<ModuleInfo>> {
    let changed_paths = changed::git_changed_paths(base, git_ref)?;
    let modules = changed::resolve_changed_modules(base, &changed_paths);

    Ok(modules
        .into_iter()
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            matches_filter(&name, search).then(|| describe_module(base, name, &path))
        })
        .collect())
}

fn matches_filter(name: &str, search: Option<&str>) -> bool {
    search.map(|filter| pattern::matches(name, filter)).unwrap_or(true)
}

fn describe_module(base: &Path, name: String, path: &Path) -> ModuleInfo {
    let display_path =
        pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf());

    ModuleInfo {
        name,
        module_type: resolver::module_type(path)
            .map(|ty| ty.as_str().to_string())
            .unwrap_or_default(),
        path: display_path.display().to_string(),
        version: version::read_module_version(path),
    }
}

fn type_order(module_type: &str) -> u8 {
    match module_type {
        "component" => 1,
        "base" => 2,
        "project" => 3,
        _ => 0,
    }
}

/// Sort by type (components, bases, projects) then alphabetically by name.
fn sort_modules(modules: &mut [ModuleInfo]) {
    modules.sort_by(|a, b| {
        type_order(&a.module_type)
            .cmp(&type_order(&b.module_type))
            .then_with(|| a.name.cmp(&b.name))
    });
}

fn print_table(modules: &[ModuleInfo]) {
    println!("Found modules:");

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_header(vec!["NAME", "TYPE", "PATH", "VERSION"]);
    for module in modules {
        table.add_row(vec![
            module.name.clone(),
            module.module_type.clone(),
            module.path.clone(),
            module
                .version
                .as_deref()
                .map(|v| format!("v{v}"))
                .unwrap_or_default(),
        ]);
    }
    println!("{table}");
}
