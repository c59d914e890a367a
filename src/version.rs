//! Module version lookup from Spacelift registry metadata.
//!
//! Version display is cosmetic: a missing file, missing key, or parse
//! failure yields no version, never an error.

use std::path::Path;

use serde::Deserialize;

const SPACELIFT_DIR: &str = ".spacelift";
const SPACELIFT_CONFIG: &str = "config.yml";

/// Shape of `.spacelift/config.yml`, reduced to the one key we read.
#[derive(Debug, Deserialize)]
struct SpaceliftConfig {
    #[serde(default)]
    module_version: Option<String>,
}

/// Read the module version from `<module>/.spacelift/config.yml`, if any.
pub fn read_module_version(module_path: &Path) -> Option<String> {
    let config_path = module_path.join(SPACELIFT_DIR).join(SPACELIFT_CONFIG);
    let contents = std::fs::read_to_string(config_path).ok()?;
    let config: SpaceliftConfig = serde_yaml::from_str(&contents).ok()?;
    config.module_version.filter(|v| !v.is_empty())
}
