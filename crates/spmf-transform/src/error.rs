//! Error types for transcoding.

use polars::prelude::PolarsError;
use thiserror::Error;

use spmf_model::OutputShape;

use crate::codec::ItemCode;

/// Errors raised while encoding input or decoding tool output.
///
/// None of these are recoverable within an invocation: a wrong mapping
/// between codes and labels is worse than a failed run.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Nothing to encode.
    #[error("no {what} to encode")]
    EmptyInput { what: &'static str },

    /// Label was not part of the codec's build set.
    #[error("unknown item label: {label}")]
    UnknownLabel { label: String },

    /// Code was never assigned by the codec.
    #[error("unknown item code {code}: output does not match the encoded input")]
    UnknownCode { code: ItemCode },

    /// A stored symbol table lists the same label twice.
    #[error("duplicate item label in symbol table: {label}")]
    DuplicateLabel { label: String },

    /// More distinct labels than item codes.
    #[error("cannot code more than {assigned} distinct item labels")]
    CodeSpaceExhausted { assigned: usize },

    /// Timestamped episode encoding met an event without a timestamp.
    #[error("episode event {index} has no timestamp")]
    MissingTimestamp { index: usize },

    /// An event carried no items.
    #[error("event {index} has no items")]
    EmptyItemset { index: usize },

    /// A result line does not follow the output grammar.
    #[error("malformed output at line {line}: {reason} ({content:?})")]
    MalformedOutput {
        line: usize,
        content: String,
        reason: String,
    },

    /// Parallel result columns disagree in length.
    #[error(
        "shape mismatch for {shape}: {patterns} patterns, {supports} supports, {confidences:?} confidences"
    )]
    ShapeMismatch {
        shape: OutputShape,
        patterns: usize,
        supports: usize,
        confidences: Option<usize>,
    },

    #[error("failed to build result frame: {0}")]
    Frame(#[from] PolarsError),

    #[error("invalid symbol table: {0}")]
    SymbolTable(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TranscodeError>;
