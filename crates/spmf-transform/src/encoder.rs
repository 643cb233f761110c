//! Serialization of events into the executable's input grammar.
//!
//! Sequence mode groups rows twice: by (sequence id, timestamp) into
//! itemsets, then by sequence id into sequences.
//!
//! ```text
//! 1 -1 1 2 -1 1 -1 -2
//! ```
//!
//! Episode mode writes one event group per line, optionally followed by
//! `|<timestamp>`.
//!
//! ```text
//! 1 2|1
//! 1|2
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};

use spmf_model::{EpisodeEvent, EventRow};

use crate::codec::{ItemCode, SymbolCodec};
use crate::error::{Result, TranscodeError};

pub const ITEMSET_TERMINATOR: &str = "-1";
pub const SEQUENCE_TERMINATOR: &str = "-2";
pub const TIMESTAMP_DELIMITER: char = '|';

/// Items sharing one timestamp, as ascending distinct codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedItemset {
    pub timestamp: i64,
    pub codes: Vec<ItemCode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedSequence {
    pub sequence_id: String,
    /// Ordered by strictly increasing timestamp.
    pub itemsets: Vec<CodedItemset>,
}

impl CodedSequence {
    pub fn to_line(&self) -> String {
        let mut tokens: Vec<String> = Vec::new();
        for itemset in &self.itemsets {
            tokens.extend(itemset.codes.iter().map(ToString::to_string));
            tokens.push(ITEMSET_TERMINATOR.to_string());
        }
        tokens.push(SEQUENCE_TERMINATOR.to_string());
        tokens.join(" ")
    }
}

/// Group rows into sequences of itemsets.
///
/// Sequences keep the first-appearance order of their identifiers; itemsets
/// are sorted by timestamp and rows sharing a timestamp are merged.
pub fn group_sequences(rows: &[EventRow], codec: &SymbolCodec) -> Result<Vec<CodedSequence>> {
    if rows.is_empty() {
        return Err(TranscodeError::EmptyInput { what: "event rows" });
    }
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut grouped: Vec<(&str, BTreeMap<i64, BTreeSet<ItemCode>>)> = Vec::new();
    for row in rows {
        let code = codec.encode(&row.item)?;
        let slot = *index.entry(row.sequence_id.as_str()).or_insert_with(|| {
            grouped.push((row.sequence_id.as_str(), BTreeMap::new()));
            grouped.len() - 1
        });
        grouped[slot]
            .1
            .entry(row.timestamp)
            .or_default()
            .insert(code);
    }
    let sequences = grouped
        .into_iter()
        .map(|(sequence_id, itemsets)| CodedSequence {
            sequence_id: sequence_id.to_string(),
            itemsets: itemsets
                .into_iter()
                .map(|(timestamp, codes)| CodedItemset {
                    timestamp,
                    codes: codes.into_iter().collect(),
                })
                .collect(),
        })
        .collect();
    Ok(sequences)
}

/// Encode long-form rows as sequence-mode text, one line per sequence.
pub fn encode_sequences(rows: &[EventRow], codec: &SymbolCodec) -> Result<String> {
    let sequences = group_sequences(rows, codec)?;
    tracing::debug!(
        rows = rows.len(),
        sequences = sequences.len(),
        "encoded sequence input"
    );
    Ok(sequences
        .iter()
        .map(CodedSequence::to_line)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// One output line of episode-mode text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedEpisode {
    pub timestamp: Option<i64>,
    pub codes: Vec<ItemCode>,
}

impl CodedEpisode {
    pub fn to_line(&self) -> String {
        let body = self
            .codes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        match self.timestamp {
            Some(timestamp) => format!("{body}{TIMESTAMP_DELIMITER}{timestamp}"),
            None => body,
        }
    }
}

/// Code the events for episode mode.
///
/// With `timestamps`, every event must carry one; events sharing a timestamp
/// merge and lines come out in ascending timestamp order. Without, each event
/// is its own line in input order and any timestamps are ignored.
pub fn group_episodes(
    events: &[EpisodeEvent],
    codec: &SymbolCodec,
    timestamps: bool,
) -> Result<Vec<CodedEpisode>> {
    if events.is_empty() {
        return Err(TranscodeError::EmptyInput {
            what: "episode events",
        });
    }
    if timestamps {
        let mut by_time: BTreeMap<i64, BTreeSet<ItemCode>> = BTreeMap::new();
        for (index, event) in events.iter().enumerate() {
            let timestamp = event
                .timestamp
                .ok_or(TranscodeError::MissingTimestamp { index })?;
            let codes = event_codes(event, index, codec)?;
            by_time.entry(timestamp).or_default().extend(codes);
        }
        Ok(by_time
            .into_iter()
            .map(|(timestamp, codes)| CodedEpisode {
                timestamp: Some(timestamp),
                codes: codes.into_iter().collect(),
            })
            .collect())
    } else {
        events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                Ok(CodedEpisode {
                    timestamp: None,
                    codes: event_codes(event, index, codec)?.into_iter().collect(),
                })
            })
            .collect()
    }
}

pub fn encode_episodes(
    events: &[EpisodeEvent],
    codec: &SymbolCodec,
    timestamps: bool,
) -> Result<String> {
    let episodes = group_episodes(events, codec, timestamps)?;
    tracing::debug!(
        events = events.len(),
        lines = episodes.len(),
        timestamps,
        "encoded episode input"
    );
    Ok(episodes
        .iter()
        .map(CodedEpisode::to_line)
        .collect::<Vec<_>>()
        .join("\n"))
}

fn event_codes(
    event: &EpisodeEvent,
    index: usize,
    codec: &SymbolCodec,
) -> Result<BTreeSet<ItemCode>> {
    if event.items.is_empty() {
        return Err(TranscodeError::EmptyItemset { index });
    }
    event
        .items
        .iter()
        .map(|item| codec.encode(item))
        .collect()
}
