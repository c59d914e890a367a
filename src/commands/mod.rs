//! One module per subcommand; each resolves its target and hands the
//! resulting directory to the runner or to the listing output.

pub mod fmt;
pub mod init;
pub mod list;
pub mod validate;

use std::path::{Path, PathBuf};

use crate::cli::TargetArgs;
use crate::config::Config;
use crate::errors::Result;
use crate::resolver;

/// Resolve the target directory selected by the shared name/path arguments.
pub(crate) fn resolve(config: &Config, cwd: &Path, target: &TargetArgs) -> Result<PathBuf> {
    resolver::resolve_target(
        config,
        cwd,
        target.name.as_deref(),
        target.path.as_deref(),
    )
}
