//! Transcoding between tabular sequence data and the SPMF text grammar.
//!
//! This crate holds the logic on both sides of the external executable:
//!
//! - **codec**: item labels to dense integer codes and back
//! - **encoder**: event rows to sequence-mode or episode-mode input text
//! - **decoder**: result lines to patterns, supports and confidences
//! - **projection**: decoded results to a polars `DataFrame`
//! - **frame**: the projected table with its provenance

pub mod codec;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod projection;

pub use codec::{CodeLookup, IdentityLookup, ItemCode, SymbolCodec};
pub use decoder::{DecodeMode, decode_lines, decode_pattern_line, decode_rule_line};
pub use encoder::{
    CodedEpisode, CodedItemset, CodedSequence, ITEMSET_TERMINATOR, SEQUENCE_TERMINATOR,
    TIMESTAMP_DELIMITER, encode_episodes, encode_sequences, group_episodes, group_sequences,
};
pub use error::{Result, TranscodeError};
pub use frame::{MiningFrame, MiningFrameMeta};
pub use projection::{project, project_results};
