use std::path::Path;

use crate::cli::TargetArgs;
use crate::config::Config;
use crate::errors::Result;
use crate::runner::Runner;

pub fn run(
    config: &Config,
    runner: &Runner,
    cwd: &Path,
    target: &TargetArgs,
    init_first: bool,
) -> Result<()> {
    let module_path = super::resolve(config, cwd, target)?;

    if init_first {
        runner.run_init(&module_path, &[])?;
    }

    runner.run_fmt(&module_path, &target.args)
}
