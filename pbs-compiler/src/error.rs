use pbs_codec::PbsError;
use pbs_core::SchemaError;

/// Errors that can occur while loading schemas or compiling PBS files.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Pbs(#[from] PbsError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },

    #[error("Invalid schema in {path}: {message}")]
    InvalidSchema { path: String, message: String },

    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    #[error("Directory not found: {0}")]
    DirNotFound(String),

    #[error("{file}: {message}")]
    Validation { file: String, message: String },

    #[error("Compilation was cancelled")]
    Cancelled,
}

impl CompileError {
    pub fn invalid_schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSchema {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn validation(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            file: file.into(),
            message: message.into(),
        }
    }
}
