//! Subprocess execution for the configured tool binary.
//!
//! The runner is constructed once at startup from the loaded configuration
//! and passed down to the commands; it keeps no process-wide state. Child
//! processes inherit the parent's standard streams and environment, plus a
//! small set of `TFPOLY_*` variables identifying the resolved target.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::config::Config;
use crate::errors::{Error, Result};

pub const ENV_REPO_ROOT: &str = "TFPOLY_REPO_ROOT";
pub const ENV_MODULE_PATH: &str = "TFPOLY_MODULE_PATH";
pub const ENV_MODULE_NAME: &str = "TFPOLY_MODULE_NAME";
pub const ENV_CONFIG_PATH: &str = "TFPOLY_CONFIG_PATH";
pub const ENV_BINARY: &str = "TFPOLY_BINARY";

/// Executes terraform/tofu operations and module tests in a resolved module
/// directory.
pub struct Runner {
    config: Config,
    repo_root: PathBuf,
}

impl Runner {
    pub fn new(config: Config, repo_root: PathBuf) -> Self {
        Self { config, repo_root }
    }

    /// The configured binary name.
    pub fn binary(&self) -> &'static str {
        self.config.binary.as_str()
    }

    /// Run `<binary> init` in `dir`.
    pub fn run_init(&self, dir: &Path, extra_args: &[String]) -> Result<()> {
        self.run_tool("init", dir, extra_args)
    }

    /// Run `<binary> fmt` in `dir`.
    pub fn run_fmt(&self, dir: &Path, extra_args: &[String]) -> Result<()> {
        self.run_tool("fmt", dir, extra_args)
    }

    /// Run `<binary> validate` in `dir`.
    pub fn run_validate(&self, dir: &Path, extra_args: &[String]) -> Result<()> {
        self.run_tool("validate", dir, extra_args)
    }

    /// Run module tests in `dir` via the terratest convention,
    /// `go test ./...`.
    pub fn run_test(&self, dir: &Path, extra_args: &[String]) -> Result<()> {
        let mut cmd = Command::new("go");
        cmd.arg("test").arg("./...").args(extra_args).current_dir(dir);
        self.inject_env(&mut cmd, dir);

        println!("Running go test ./... in {}", dir.display());
        run_to_completion(cmd, "go test")
    }

    fn run_tool(&self, operation: &str, dir: &Path, extra_args: &[String]) -> Result<()> {
        let mut cmd = Command::new(self.binary());
        cmd.arg(operation).args(extra_args).current_dir(dir);
        self.inject_env(&mut cmd, dir);

        println!("Running {} {} in {}", self.binary(), operation, dir.display());
        run_to_completion(cmd, &format!("{} {}", self.binary(), operation))
    }

    fn inject_env(&self, cmd: &mut Command, module_path: &Path) {
        cmd.env(ENV_REPO_ROOT, &self.repo_root);
        cmd.env(ENV_MODULE_PATH, module_path);
        if let Some(name) = module_path.file_name() {
            cmd.env(ENV_MODULE_NAME, name);
        }
        if let Some(config_path) = &self.config.path {
            cmd.env(ENV_CONFIG_PATH, config_path);
        }
        cmd.env(ENV_BINARY, self.binary());
    }
}

/// Spawn with inherited stdio and map a non-zero exit to an error, so the
/// CLI terminates non-zero when the child does.
fn run_to_completion(mut cmd: Command, what: &str) -> Result<()> {
    let status = cmd
        .status()
        .map_err(|err| Error::Subprocess(format!("failed to run {what}: {err}")))?;

    if !status.success() {
        return Err(Error::Subprocess(format!("{what} exited with {status}")));
    }
    Ok(())
}
