use std::path::PathBuf;

use thiserror::Error;

use hq_dat::DatError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog loading, lookup or import failed
    #[error("{0}")]
    Dat(#[from] DatError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// No dat given on the command line or in the settings
    #[error(
        "No dat file given: pass --dat or set catalog.default_dat in {}",
        .0.display()
    )]
    NoDat(PathBuf),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
