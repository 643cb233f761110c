//! Event-stream tables: one row per itemset, optionally timestamped.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use spmf_model::EpisodeEvent;

use crate::csv_table::CsvTable;
use crate::error::{IngestError, Result};
use crate::events::{frame_column, required};
use crate::polars_utils::{any_to_i64, any_to_string};

/// Column names of an event-stream table.
///
/// Items inside the itemset column are separated by whitespace. Without a
/// timestamp column every row becomes its own time point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeColumns {
    pub itemset: String,
    pub timestamp: Option<String>,
}

impl Default for EpisodeColumns {
    fn default() -> Self {
        Self {
            itemset: "Itemset".to_string(),
            timestamp: Some("Time points".to_string()),
        }
    }
}

impl EpisodeColumns {
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamp = None;
        self
    }
}

fn split_items(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Build episode events from a CSV table.
pub fn episodes_from_table(
    table: &CsvTable,
    columns: &EpisodeColumns,
) -> Result<Vec<EpisodeEvent>> {
    let itemset_idx = table.column_index(&columns.itemset)?;
    let time_idx = columns
        .timestamp
        .as_deref()
        .map(|name| table.column_index(name).map(|idx| (name, idx)))
        .transpose()?;

    let mut events = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        let raw_items = required(table.cell(row, itemset_idx), row, &columns.itemset)?;
        let mut event = EpisodeEvent::new(split_items(raw_items));
        if let Some((name, idx)) = time_idx {
            let raw_time = required(table.cell(row, idx), row, name)?;
            let timestamp =
                raw_time
                    .parse::<i64>()
                    .map_err(|_| IngestError::InvalidTimestamp {
                        row: row + 1,
                        column: name.to_string(),
                        value: raw_time.to_string(),
                    })?;
            event = event.with_timestamp(timestamp);
        }
        events.push(event);
    }
    tracing::debug!(
        events = events.len(),
        timestamps = time_idx.is_some(),
        "loaded episode events"
    );
    Ok(events)
}

/// Build episode events from a polars DataFrame.
pub fn episodes_from_dataframe(
    df: &DataFrame,
    columns: &EpisodeColumns,
) -> Result<Vec<EpisodeEvent>> {
    let itemset_col = frame_column(df, &columns.itemset)?;
    let time_col = columns
        .timestamp
        .as_deref()
        .map(|name| frame_column(df, name).map(|col| (name, col)))
        .transpose()?;

    let mut events = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let raw_items = any_to_string(itemset_col.get(row)?);
        let raw_items = required(&raw_items, row, &columns.itemset)?;
        let mut event = EpisodeEvent::new(split_items(raw_items));
        if let Some((name, col)) = time_col {
            let raw_time = col.get(row)?;
            let timestamp = match any_to_i64(raw_time.clone()) {
                Some(value) => value,
                None if raw_time.is_null() => {
                    return Err(IngestError::EmptyValue {
                        row: row + 1,
                        column: name.to_string(),
                    });
                }
                None => {
                    return Err(IngestError::InvalidTimestamp {
                        row: row + 1,
                        column: name.to_string(),
                        value: any_to_string(raw_time),
                    });
                }
            };
            event = event.with_timestamp(timestamp);
        }
        events.push(event);
    }
    tracing::debug!(events = events.len(), "loaded episode events from frame");
    Ok(events)
}
