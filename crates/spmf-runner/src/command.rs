//! Command line for one tool invocation.

use std::fmt;
use std::path::Path;

use spmf_model::AlgorithmSpec;

use crate::config::RunnerConfig;

/// Program and arguments, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(token: &str) -> String {
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        format!("\"{token}\"")
    } else {
        token.to_string()
    }
}

/// Build the argument list:
/// `<launcher> -Xmx<MB>m -jar <jar> run <algorithm> <input> <output> <params...>`.
pub fn build_arguments(
    config: &RunnerConfig,
    spec: &AlgorithmSpec,
    input: &Path,
    output: &Path,
) -> CommandLine {
    let mut args = vec![
        format!("-Xmx{}m", config.memory_mb),
        "-jar".to_string(),
        config.executable_path.display().to_string(),
        "run".to_string(),
        spec.name.clone(),
        input.display().to_string(),
        output.display().to_string(),
    ];
    args.extend(spec.arguments());
    CommandLine {
        program: config.launcher.clone(),
        args,
    }
}
