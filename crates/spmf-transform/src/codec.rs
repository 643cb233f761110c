//! Symbol codec: item labels to dense integer codes and back.
//!
//! The executable only understands positive integer items, and its grammar
//! reserves `-1`, `-2`, `|` and whitespace. Every label is therefore mapped to
//! a code starting at 1, assigned in first-appearance order of the scan that
//! built the codec. A codec belongs to exactly one dataset; codes mean
//! nothing outside it.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use spmf_model::{EpisodeEvent, EventRow};

use crate::error::{Result, TranscodeError};

pub type ItemCode = u32;

/// Bijection between item labels and dense codes `1..=len`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolCodec {
    /// `labels[code - 1]` is the label for `code`.
    labels: Vec<String>,
    codes: BTreeMap<String, ItemCode>,
}

#[derive(Serialize, Deserialize)]
struct SymbolTable {
    labels: Vec<String>,
}

impl SymbolCodec {
    /// Assign codes to the distinct labels, in first-appearance order.
    pub fn build<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codec = Self {
            labels: Vec::new(),
            codes: BTreeMap::new(),
        };
        for label in labels {
            let label = label.as_ref();
            if !codec.codes.contains_key(label) {
                codec.push(label.to_string())?;
            }
        }
        if codec.labels.is_empty() {
            return Err(TranscodeError::EmptyInput { what: "item labels" });
        }
        tracing::debug!(symbols = codec.labels.len(), "built symbol codec");
        Ok(codec)
    }

    /// Codec over the items of long-form rows, scanned in row order.
    pub fn for_events(rows: &[EventRow]) -> Result<Self> {
        Self::build(rows.iter().map(|row| row.item.as_str()))
    }

    /// Codec over episode items, scanned event by event.
    pub fn for_episodes(events: &[EpisodeEvent]) -> Result<Self> {
        Self::build(
            events
                .iter()
                .flat_map(|event| event.items.iter().map(String::as_str)),
        )
    }

    fn push(&mut self, label: String) -> Result<()> {
        let code = next_code(self.labels.len())?;
        self.codes.insert(label.clone(), code);
        self.labels.push(label);
        Ok(())
    }

    pub fn encode(&self, label: &str) -> Result<ItemCode> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| TranscodeError::UnknownLabel {
                label: label.to_string(),
            })
    }

    pub fn decode(&self, code: ItemCode) -> Result<&str> {
        let index = (code as usize).checked_sub(1);
        index
            .and_then(|idx| self.labels.get(idx))
            .map(String::as_str)
            .ok_or(TranscodeError::UnknownCode { code })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// `(code, label)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemCode, &str)> {
        self.labels
            .iter()
            .zip(1..)
            .map(|(label, code)| (code, label.as_str()))
    }

    pub fn to_json(&self) -> Result<String> {
        let table = SymbolTable {
            labels: self.labels.clone(),
        };
        Ok(serde_json::to_string_pretty(&table)?)
    }

    /// Restore a codec written by [`SymbolCodec::to_json`].
    ///
    /// Unlike [`SymbolCodec::build`], duplicates are rejected: a stored table
    /// with a repeated label cannot be a bijection.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: SymbolTable = serde_json::from_str(json)?;
        let mut codec = Self {
            labels: Vec::with_capacity(table.labels.len()),
            codes: BTreeMap::new(),
        };
        for label in table.labels {
            if codec.codes.contains_key(&label) {
                return Err(TranscodeError::DuplicateLabel { label });
            }
            codec.push(label)?;
        }
        if codec.labels.is_empty() {
            return Err(TranscodeError::EmptyInput { what: "item labels" });
        }
        Ok(codec)
    }
}

/// Code for the label after `assigned` others.
fn next_code(assigned: usize) -> Result<ItemCode> {
    assigned
        .checked_add(1)
        .and_then(|code| ItemCode::try_from(code).ok())
        .ok_or(TranscodeError::CodeSpaceExhausted { assigned })
}

/// Reverse lookup used by the decoder.
pub trait CodeLookup {
    fn label(&self, code: ItemCode) -> Result<Cow<'_, str>>;
}

impl CodeLookup for SymbolCodec {
    fn label(&self, code: ItemCode) -> Result<Cow<'_, str>> {
        self.decode(code).map(Cow::Borrowed)
    }
}

/// Renders codes as themselves, for output of files encoded elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityLookup;

impl CodeLookup for IdentityLookup {
    fn label(&self, code: ItemCode) -> Result<Cow<'_, str>> {
        Ok(Cow::Owned(code.to_string()))
    }
}
