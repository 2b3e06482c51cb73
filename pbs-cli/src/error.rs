use thiserror::Error;

use pbs_codec::PbsError;
use pbs_compiler::CompileError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Decoding or writing a PBS file failed
    #[error("{0}")]
    Pbs(#[from] PbsError),

    /// Schema loading or compilation failed
    #[error("{0}")]
    Compile(#[from] CompileError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logger could not be installed
    #[error("Logging error: {0}")]
    Logging(String),

    /// One or more files had errors
    #[error("{0}")]
    Check(String),
}

impl CliError {
    pub(crate) fn logging(msg: impl Into<String>) -> Self {
        Self::Logging(msg.into())
    }

    pub(crate) fn check(msg: impl Into<String>) -> Self {
        Self::Check(msg.into())
    }
}
