//! CLI error types.

use std::path::PathBuf;

use deptabs_config::ConfigError;
use deptabs_dom::DomError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{}: {source}", path.display())]
    Page {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Dom(#[from] DomError),

    #[error("Invalid include pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("{0}")]
    Glob(#[from] glob::GlobError),
}

impl CliError {
    /// Wrap an I/O error with the page it concerns.
    pub(crate) fn page(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Page {
            path: path.into(),
            source,
        }
    }
}
