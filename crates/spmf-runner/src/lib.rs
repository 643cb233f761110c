//! Invocation of the external SPMF executable.
//!
//! [`MiningRunner`] drives one run end to end: code the labels, write the
//! input grammar to a scratch directory, launch the tool with the argument
//! template from [`RunnerConfig`], check its exit, decode the result file and
//! project it to a table. Scratch files are removed once the run finishes.

pub mod command;
pub mod config;
pub mod error;
pub mod process;
pub mod runner;
pub mod workspace;

pub use command::{CommandLine, build_arguments};
pub use config::{
    CONFIG_FILENAME, DEFAULT_ERROR_MARKER, DEFAULT_EXECUTABLE_PATH, DEFAULT_LAUNCHER,
    DEFAULT_MEMORY_MB, RunnerConfig,
};
pub use error::{ConfigError, Result, RunError};
pub use process::{ToolOutput, execute};
pub use runner::MiningRunner;
pub use workspace::RunWorkspace;
