//! Error types for configuration and tool invocation.

use std::path::PathBuf;

use thiserror::Error;

use spmf_model::InputKind;
use spmf_transform::TranscodeError;

/// Errors that can occur while loading a runner configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

/// Errors that can occur during one encode, invoke, decode run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The launcher could not be spawned at all.
    #[error("failed to launch '{launcher}': {source}")]
    Launch {
        launcher: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool exited with a non-zero status.
    #[error("tool exited with {}: {output}", .code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    ToolFailed { code: Option<i32>, output: String },

    /// The tool exited cleanly but reported an error marker.
    #[error("tool reported '{marker}': {output}")]
    ToolRejected { marker: String, output: String },

    /// The tool finished without writing its result file.
    #[error("tool produced no output file at {path}")]
    MissingOutput { path: PathBuf },

    #[error("input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Algorithm reads a different input grammar than the records supplied.
    #[error("algorithm {algorithm} expects {expected} input, got {actual}")]
    InputMismatch {
        algorithm: String,
        expected: InputKind,
        actual: &'static str,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Transcode(#[from] TranscodeError),
}

impl RunError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RunError>;
