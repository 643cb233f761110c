//! Input records handed to the encoder.

use serde::{Deserialize, Serialize};

/// One observation in long-form sequence data.
///
/// Several rows may share a `sequence_id` and `timestamp`; those items
/// co-occur and end up in the same itemset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRow {
    /// Identifier of the sequence the observation belongs to.
    pub sequence_id: String,
    /// Position of the observation within its sequence.
    pub timestamp: i64,
    /// Item label as it appears in the source data.
    pub item: String,
}

impl EventRow {
    pub fn new(sequence_id: impl Into<String>, timestamp: i64, item: impl Into<String>) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            timestamp,
            item: item.into(),
        }
    }
}

/// A group of items observed together in an event stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeEvent {
    pub items: Vec<String>,
    pub timestamp: Option<i64>,
}

impl EpisodeEvent {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
