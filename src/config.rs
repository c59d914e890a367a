//! Repository configuration loaded from `.tfpoly.yml`.
//!
//! The file is discovered by walking upward from the working directory; the
//! first hit wins. Absence of the file is a valid, common case and yields
//! defaults.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{Error, Result};

/// Name of the repository configuration file.
pub const CONFIG_FILE: &str = ".tfpoly.yml";

/// The tool binary used for init/fmt/validate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolBinary {
    #[default]
    Terraform,
    Tofu,
}

impl ToolBinary {
    pub fn as_str(self) -> &'static str {
        match self {
            ToolBinary::Terraform => "terraform",
            ToolBinary::Tofu => "tofu",
        }
    }
}

impl fmt::Display for ToolBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// On-disk shape of `.tfpoly.yml`. Unknown keys are tolerated; the binary is
/// kept as a raw string here so an invalid value fails validation, not
/// deserialization.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    root: Option<String>,
    #[serde(default)]
    binary: Option<String>,
}

/// Loaded repository configuration, immutable for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Repository root override, relative to the working directory unless
    /// absolute.
    pub root: Option<String>,
    pub binary: ToolBinary,
    /// Location of the config file actually loaded, `None` when defaults
    /// applied.
    pub path: Option<PathBuf>,
}

impl Config {
    /// Find and load `.tfpoly.yml` starting from `start_dir` and walking up.
    ///
    /// Returns defaults without error when no config file exists anywhere up
    /// to the filesystem root. A file that exists but cannot be parsed or
    /// validated is an error.
    pub fn load(start_dir: &Path) -> Result<Config> {
        for dir in start_dir.ancestors() {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Config::from_file(&candidate);
            }
        }

        log::debug!(
            "no {} found above {}, using defaults",
            CONFIG_FILE,
            start_dir.display()
        );
        Ok(Config::default())
    }

    fn from_file(path: &Path) -> Result<Config> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| Error::io(path, source))?;

        // An empty or all-comments file parses as null and means defaults.
        let raw: RawConfig = serde_yaml::from_str::<Option<RawConfig>>(&contents)
            .map_err(|err| {
                Error::Config(format!("failed to parse {}: {}", path.display(), err))
            })?
            .unwrap_or_default();

        let binary = match raw.binary.as_deref() {
            None | Some("terraform") => ToolBinary::Terraform,
            Some("tofu") => ToolBinary::Tofu,
            Some(other) => {
                return Err(Error::Config(format!(
                    "invalid binary '{other}': must be 'terraform' or 'tofu'"
                )))
            }
        };

        log::debug!("loaded config from {}", path.display());
        Ok(Config {
            root: raw.root.filter(|r| !r.is_empty()),
            binary,
            path: Some(path.to_path_buf()),
        })
    }

    /// Repository base for module discovery: the working directory, unless a
    /// root override redirects it.
    pub fn base_path(&self, cwd: &Path) -> PathBuf {
        match self.root.as_deref() {
            None => cwd.to_path_buf(),
            Some(root) if Path::new(root).is_absolute() => PathBuf::from(root),
            Some(root) => cwd.join(root),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_anywhere() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = Config::load(&nested).unwrap();
        assert_eq!(config.binary, ToolBinary::Terraform);
        assert_eq!(config.root, None);
        assert_eq!(config.path, None);
    }

    #[test]
    fn loads_first_config_walking_upward() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("iac").join("components");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            indoc! {"
                root: iac
                binary: tofu
            "},
        )
        .unwrap();

        let config = Config::load(&nested).unwrap();
        assert_eq!(config.binary, ToolBinary::Tofu);
        assert_eq!(config.root.as_deref(), Some("iac"));
        assert_eq!(config.path, Some(tmp.path().join(CONFIG_FILE)));
    }

    #[test]
    fn nearest_config_wins() {
        let tmp = TempDir::new().unwrap();
        let inner = tmp.path().join("inner");
        fs::create_dir(&inner).unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "binary: terraform\n").unwrap();
        fs::write(inner.join(CONFIG_FILE), "binary: tofu\n").unwrap();

        let config = Config::load(&inner).unwrap();
        assert_eq!(config.binary, ToolBinary::Tofu);
    }

    #[test]
    fn invalid_binary_is_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "binary: pulumi\n").unwrap();

        let err = Config::load(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("pulumi"));
    }

    #[test]
    fn malformed_yaml_is_surfaced() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "root: [unclosed\n").unwrap();

        let err = Config::load(tmp.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn empty_config_file_means_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.binary, ToolBinary::Terraform);
        assert_eq!(config.path, Some(tmp.path().join(CONFIG_FILE)));
    }

    #[test]
    fn empty_root_is_treated_as_unset() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "root: \"\"\n").unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.root, None);
    }

    #[test]
    fn base_path_honors_override() {
        let cwd = Path::new("/work/repo");

        let defaults = Config::default();
        assert_eq!(defaults.base_path(cwd), PathBuf::from("/work/repo"));

        let relative = Config {
            root: Some("iac".to_string()),
            ..Config::default()
        };
        assert_eq!(relative.base_path(cwd), PathBuf::from("/work/repo/iac"));

        let absolute = Config {
            root: Some("/srv/iac".to_string()),
            ..Config::default()
        };
        assert_eq!(absolute.base_path(cwd), PathBuf::from("/srv/iac"));
    }
}
