use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tfpoly")]
#[command(about = "CLI for polylith-style Terraform/OpenTofu repositories", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Target selection shared by the tool-running subcommands: one module name
/// or one explicit path, plus pass-through arguments.
#[derive(Args, Debug, Default)]
pub struct TargetArgs {
    /// Module name, searched across components, bases, and projects
    pub name: Option<String>,

    /// Explicit module path (mutually exclusive with the module name)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Extra arguments passed through to the tool (repeatable)
    #[arg(short = 'a', long = "args", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run terraform/tofu init on a component, base, or project
    Init {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Run terraform/tofu fmt on a component, base, or project
    Fmt {
        #[command(flatten)]
        target: TargetArgs,

        /// Run init before the command
        #[arg(short = 'i', long = "init")]
        init_first: bool,
    },

    /// Run terraform/tofu validate on a component, base, or project
    #[command(visible_alias = "validate")]
    Val {
        #[command(flatten)]
        target: TargetArgs,

        /// Run init before the command
        #[arg(short = 'i', long = "init")]
        init_first: bool,
    },

    /// Run module tests (go test ./...) on a component, base, or project
    Test {
        #[command(flatten)]
        target: TargetArgs,

        /// Run against <module>/examples/<name> instead of the module root
        #[arg(short = 'e', long)]
        example: Option<String>,
    },

    /// List all modules (components, bases, and projects)
    List {
        /// Filter modules using wildcards (e.g. "storage-*")
        #[arg(short = 's', long)]
        search: Option<String>,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Print module names only, one per line
        #[arg(long)]
        names: bool,

        /// Only list modules with changes against a git ref
        #[arg(long)]
        changed: bool,

        /// Git ref to diff against (used with --changed)
        #[arg(long = "ref", default_value = "HEAD")]
        git_ref: String,
    },
}
