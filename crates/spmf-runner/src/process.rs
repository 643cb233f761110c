//! Spawning the tool and classifying its exit.

use std::process::Command;
use std::time::Instant;

use crate::command::CommandLine;
use crate::error::{Result, RunError};

/// Captured streams of a finished tool run.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        let mut text = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&self.stderr);
        }
        text.trim().to_string()
    }
}

/// Run the command to completion.
///
/// Fails on a non-zero exit status, or when any of `markers` appears in the
/// captured output of an otherwise successful run.
pub fn execute(command: &CommandLine, markers: &[String]) -> Result<ToolOutput> {
    tracing::debug!(command = %command, "launching tool");
    let started = Instant::now();
    let output = Command::new(&command.program)
        .args(&command.args)
        .output()
        .map_err(|source| RunError::Launch {
            launcher: command.program.clone(),
            source,
        })?;
    let captured = ToolOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    tracing::info!(
        status = ?output.status.code(),
        duration_ms = started.elapsed().as_millis(),
        "tool finished"
    );

    if !output.status.success() {
        return Err(RunError::ToolFailed {
            code: output.status.code(),
            output: captured.combined(),
        });
    }
    let combined = captured.combined();
    if let Some(marker) = markers.iter().find(|m| combined.contains(m.as_str())) {
        tracing::warn!(marker = %marker, "tool output contains an error marker");
        return Err(RunError::ToolRejected {
            marker: marker.clone(),
            output: combined,
        });
    }
    Ok(captured)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_streams() {
        let output = ToolOutput {
            stdout: "done".to_string(),
            stderr: "warn\n".to_string(),
        };
        assert_eq!(output.combined(), "done\nwarn");
        assert_eq!(ToolOutput::default().combined(), "");
    }

    #[test]
    fn missing_launcher_is_a_launch_error() {
        let command = CommandLine {
            program: "spmf-runner-no-such-program".to_string(),
            args: Vec::new(),
        };
        let err = execute(&command, &[]).unwrap_err();
        assert!(matches!(err, RunError::Launch { .. }));
    }
}
