//! Per-invocation scratch directory holding the tool's input and output.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::{Result, RunError};

const INPUT_FILENAME: &str = "input.txt";
const OUTPUT_FILENAME: &str = "output.txt";

/// Scratch files for one run. Removed on drop, or by [`RunWorkspace::close`].
#[derive(Debug)]
pub struct RunWorkspace {
    dir: TempDir,
}

impl RunWorkspace {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("spmf-run-")
            .tempdir()
            .map_err(|e| RunError::io("failed to create temporary directory", e))?;
        tracing::debug!(dir = %dir.path().display(), "created run workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.path().join(INPUT_FILENAME)
    }

    pub fn output_path(&self) -> PathBuf {
        self.dir.path().join(OUTPUT_FILENAME)
    }

    pub fn write_input(&self, text: &str) -> Result<PathBuf> {
        let path = self.input_path();
        fs::write(&path, text)
            .map_err(|e| RunError::io(format!("failed to write {}", path.display()), e))?;
        Ok(path)
    }

    /// Lines of the result file; `MissingOutput` if the tool wrote none.
    pub fn read_output(&self) -> Result<Vec<String>> {
        let path = self.output_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RunError::MissingOutput { path });
            }
            Err(e) => {
                return Err(RunError::io(format!("failed to read {}", path.display()), e));
            }
        };
        Ok(text.lines().map(str::to_string).collect())
    }

    pub fn close(self) -> Result<()> {
        self.dir
            .close()
            .map_err(|e| RunError::io("failed to remove temporary directory", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_are_removed_on_close() {
        let workspace = RunWorkspace::new().unwrap();
        let input = workspace.write_input("1 -1 -2").unwrap();
        assert!(input.is_file());
        let dir = workspace.path().to_path_buf();
        workspace.close().unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn absent_output_is_reported() {
        let workspace = RunWorkspace::new().unwrap();
        assert!(matches!(
            workspace.read_output(),
            Err(RunError::MissingOutput { .. })
        ));
        fs::write(workspace.output_path(), "").unwrap();
        assert!(workspace.read_output().unwrap().is_empty());
    }
}
