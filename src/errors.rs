//! Shared error types for the application

use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tfpoly operations
#[derive(Debug, Error)]
pub enum Error {
    /// Contradictory or missing target selection on the command line
    #[error("{0}")]
    Usage(String),

    /// A module, path, or example that was asked for does not exist
    #[error("{0}")]
    NotFound(String),

    /// A module name resolved to more than one directory
    #[error("{}", render_name_clash(.name, .matches))]
    AmbiguousName {
        name: String,
        /// Every conflicting path, in discovery order
        matches: Vec<PathBuf>,
    },

    /// Configuration file present but invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// A spawned subprocess could not be run or reported failure
    #[error("{0}")]
    Subprocess(String),

    /// Structured output could not be rendered
    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// File system errors, wrapped with the path being operated on
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

fn render_name_clash(name: &str, matches: &[PathBuf]) -> String {
    let mut msg = format!("multiple modules named '{name}' found - name clash detected:\n");
    for (i, path) in matches.iter().enumerate() {
        let _ = writeln!(msg, "  {}. {}", i + 1, path.display());
    }
    msg.push_str("\nuse --path to specify the exact module");
    msg
}
