use anyhow::Result;
use clap::Parser;

use tfpoly::cli::{Cli, Commands};
use tfpoly::commands;
use tfpoly::commands::list::ListOptions;
use tfpoly::config::Config;
use tfpoly::runner::Runner;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let cwd = std::env::current_dir()?;
    let config = Config::load(&cwd)?;
    let repo_root = config.base_path(&cwd);
    let runner = Runner::new(config.clone(), repo_root);

    match cli.command {
        Commands::Init { target } => commands::init::run(&config, &runner, &cwd, &target)?,
        Commands::Fmt { target, init_first } => {
            commands::fmt::run(&config, &runner, &cwd, &target, init_first)?
        }
        Commands::Val { target, init_first } => {
            commands::validate::run(&config, &runner, &cwd, &target, init_first)?
        }
        Commands::Test { target, example } => {
            commands::test::run(&config, &runner, &cwd, &target, example.as_deref())?
        }
        Commands::List {
            search,
            json,
            names,
            changed,
            git_ref,
        } => {
            let opts = ListOptions {
                search,
                json,
                names,
                changed,
                git_ref,
            };
            commands::list::run(&config, &cwd, &opts)?
        }
    }

    Ok(())
}
