//! Runner configuration.
//!
//! Values come from a TOML file when one is given or found in the working
//! directory; anything the file leaves out keeps its default.
//!
//! ```toml
//! launcher = "java"
//! memory_mb = 2048
//! executable_path = "/opt/spmf/spmf.jar"
//! error_markers = ["java.lang.IllegalArgumentException"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_LAUNCHER: &str = "java";
pub const DEFAULT_MEMORY_MB: u32 = 1024;
pub const DEFAULT_EXECUTABLE_PATH: &str = "./binaries/spmf.jar";
pub const DEFAULT_ERROR_MARKER: &str = "java.lang.IllegalArgumentException";

/// File name looked up in the working directory.
pub const CONFIG_FILENAME: &str = "spmf.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Program that starts the executable.
    pub launcher: String,
    /// Heap ceiling passed as `-Xmx<MB>m`.
    pub memory_mb: u32,
    /// Path to the jar.
    pub executable_path: PathBuf,
    /// Substrings of the tool's output that mark a failed run.
    pub error_markers: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            launcher: DEFAULT_LAUNCHER.to_string(),
            memory_mb: DEFAULT_MEMORY_MB,
            executable_path: PathBuf::from(DEFAULT_EXECUTABLE_PATH),
            error_markers: vec![DEFAULT_ERROR_MARKER.to_string()],
        }
    }
}

impl RunnerConfig {
    /// Load a config file; missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::info!(path = %path.display(), "loaded runner config");
        Ok(config)
    }

    /// Resolve the config: the explicit path, then `spmf.toml` under `dir`,
    /// then defaults.
    pub fn discover(dir: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Self::load(&candidate);
        }
        tracing::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.launcher.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "launcher",
                message: "must not be empty".to_string(),
            });
        }
        if self.memory_mb == 0 {
            return Err(ConfigError::Invalid {
                field: "memory_mb",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into();
        self
    }

    #[must_use]
    pub fn with_memory_mb(mut self, memory_mb: u32) -> Self {
        self.memory_mb = memory_mb;
        self
    }

    #[must_use]
    pub fn with_executable_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable_path = path.into();
        self
    }
}
