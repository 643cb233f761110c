//! The encode, invoke, decode pipeline.

use std::path::Path;

use spmf_model::{AlgorithmSpec, EpisodeEvent, EventRow, InputKind, MiningResults};
use spmf_transform::{
    CodeLookup, DecodeMode, IdentityLookup, MiningFrame, MiningFrameMeta, SymbolCodec,
    decode_lines, encode_episodes, encode_sequences, project_results,
};

use crate::command::{CommandLine, build_arguments};
use crate::config::RunnerConfig;
use crate::error::{Result, RunError};
use crate::process::execute;
use crate::workspace::RunWorkspace;

/// Runs catalog algorithms through the external executable.
#[derive(Debug, Clone, Default)]
pub struct MiningRunner {
    config: RunnerConfig,
}

impl MiningRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn command_for(&self, spec: &AlgorithmSpec, input: &Path, output: &Path) -> CommandLine {
        build_arguments(&self.config, spec, input, output)
    }

    /// Mine sequential patterns from long-form event rows.
    pub fn run_events(&self, spec: &AlgorithmSpec, rows: &[EventRow]) -> Result<MiningFrame> {
        if spec.input != InputKind::Sequences {
            return Err(mismatch(spec, "sequence rows"));
        }
        let span = tracing::info_span!("mine", algorithm = %spec.name, rows = rows.len());
        let _guard = span.enter();

        let codec = SymbolCodec::for_events(rows)?;
        let text = encode_sequences(rows, &codec)?;
        let meta = MiningFrameMeta {
            source_file: None,
            input_records: rows.len(),
            symbols: codec.len(),
        };
        self.run_encoded(spec, &text, &codec, meta)
    }

    /// Mine episodes or episode rules from an event stream.
    pub fn run_episodes(
        &self,
        spec: &AlgorithmSpec,
        events: &[EpisodeEvent],
    ) -> Result<MiningFrame> {
        let InputKind::Episodes { timestamps } = spec.input else {
            return Err(mismatch(spec, "episode events"));
        };
        let span = tracing::info_span!("mine", algorithm = %spec.name, events = events.len());
        let _guard = span.enter();

        let codec = SymbolCodec::for_episodes(events)?;
        let text = encode_episodes(events, &codec, timestamps)?;
        let meta = MiningFrameMeta {
            source_file: None,
            input_records: events.len(),
            symbols: codec.len(),
        };
        self.run_encoded(spec, &text, &codec, meta)
    }

    /// Run on an already encoded input file; codes are reported as-is.
    pub fn run_file(&self, spec: &AlgorithmSpec, input: &Path) -> Result<MiningResults> {
        if !input.is_file() {
            return Err(RunError::InputNotFound {
                path: input.to_path_buf(),
            });
        }
        let span = tracing::info_span!("mine", algorithm = %spec.name, input = %input.display());
        let _guard = span.enter();

        let workspace = RunWorkspace::new()?;
        let results = self.invoke(spec, input, &workspace, &IdentityLookup)?;
        workspace.close()?;
        Ok(results)
    }

    fn run_encoded(
        &self,
        spec: &AlgorithmSpec,
        text: &str,
        codec: &SymbolCodec,
        meta: MiningFrameMeta,
    ) -> Result<MiningFrame> {
        let workspace = RunWorkspace::new()?;
        let input = workspace.write_input(text)?;
        let results = self.invoke(spec, &input, &workspace, codec)?;
        workspace.close()?;

        let data = project_results(spec.output, &results)?;
        Ok(MiningFrame::new(spec.name.clone(), spec.output, data).with_meta(meta))
    }

    fn invoke<L: CodeLookup>(
        &self,
        spec: &AlgorithmSpec,
        input: &Path,
        workspace: &RunWorkspace,
        lookup: &L,
    ) -> Result<MiningResults> {
        let command = self.command_for(spec, input, &workspace.output_path());
        execute(&command, &self.config.error_markers)?;
        let lines = workspace.read_output()?;
        let results = decode_lines(&lines, DecodeMode::from(spec.output), lookup)?;
        tracing::info!(results = results.len(), "decoded tool output");
        Ok(results)
    }
}

fn mismatch(spec: &AlgorithmSpec, actual: &'static str) -> RunError {
    RunError::InputMismatch {
        algorithm: spec.name.clone(),
        expected: spec.input,
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_input() {
        let runner = MiningRunner::default();
        let spec = AlgorithmSpec::tke(3, 2, false).unwrap();
        let err = runner
            .run_events(&spec, &[EventRow::new("s", 0, "a")])
            .unwrap_err();
        assert!(matches!(err, RunError::InputMismatch { .. }));

        let spec = AlgorithmSpec::spade(0.5).unwrap();
        let err = runner
            .run_episodes(&spec, &[EpisodeEvent::new(["a"])])
            .unwrap_err();
        assert!(matches!(err, RunError::InputMismatch { .. }));
    }

    #[test]
    fn empty_input_fails_before_launch() {
        // The launcher does not exist, so reaching it would be a Launch error.
        let runner = MiningRunner::new(RunnerConfig::default().with_launcher("no-such-launcher"));
        let spec = AlgorithmSpec::prefix_span(0.5, None).unwrap();
        let err = runner.run_events(&spec, &[]).unwrap_err();
        assert!(matches!(err, RunError::Transcode(_)));
    }
}
