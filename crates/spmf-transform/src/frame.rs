//! Result frame types.
//!
//! A [`MiningFrame`] wraps the projected polars `DataFrame` together with the
//! algorithm that produced it, so callers can label and persist results
//! without re-deriving the output shape.

use std::path::PathBuf;

use polars::prelude::DataFrame;

use spmf_model::OutputShape;

/// Provenance of a mining run.
#[derive(Debug, Clone, Default)]
pub struct MiningFrameMeta {
    /// File the input was read from, when it came from disk.
    pub source_file: Option<PathBuf>,
    /// Number of input records that went into the encoding.
    pub input_records: usize,
    /// Distinct item labels in the input.
    pub symbols: usize,
}

/// Projected results of one algorithm invocation.
#[derive(Debug, Clone)]
pub struct MiningFrame {
    /// Algorithm name as passed to the executable.
    pub algorithm: String,
    pub shape: OutputShape,
    pub data: DataFrame,
    pub meta: Option<MiningFrameMeta>,
}

impl MiningFrame {
    pub fn new(algorithm: impl Into<String>, shape: OutputShape, data: DataFrame) -> Self {
        Self {
            algorithm: algorithm.into(),
            shape,
            data,
            meta: None,
        }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: MiningFrameMeta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Number of mined patterns or rules.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn source_file(&self) -> Option<&PathBuf> {
        self.meta.as_ref().and_then(|m| m.source_file.as_ref())
    }

    pub fn set_source_file(&mut self, path: PathBuf) {
        let meta = self.meta.get_or_insert_with(MiningFrameMeta::default);
        meta.source_file = Some(path);
    }
}
