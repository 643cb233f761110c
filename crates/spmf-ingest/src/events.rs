//! Long-form sequence tables: one row per observed item.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use spmf_model::EventRow;

use crate::csv_table::CsvTable;
use crate::error::{IngestError, Result};
use crate::polars_utils::{any_to_i64, any_to_string};

/// Column names of a sequence table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventColumns {
    pub id: String,
    pub time: String,
    pub item: String,
}

impl Default for EventColumns {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            time: "Time Points".to_string(),
            item: "Items".to_string(),
        }
    }
}

/// Build event rows from a CSV table.
///
/// Row numbers in errors are 1-based and count data rows only.
pub fn events_from_table(table: &CsvTable, columns: &EventColumns) -> Result<Vec<EventRow>> {
    let id_idx = table.column_index(&columns.id)?;
    let time_idx = table.column_index(&columns.time)?;
    let item_idx = table.column_index(&columns.item)?;

    let mut rows = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        let id = required(table.cell(row, id_idx), row, &columns.id)?;
        let item = required(table.cell(row, item_idx), row, &columns.item)?;
        let raw_time = required(table.cell(row, time_idx), row, &columns.time)?;
        let timestamp = raw_time
            .parse::<i64>()
            .map_err(|_| IngestError::InvalidTimestamp {
                row: row + 1,
                column: columns.time.clone(),
                value: raw_time.to_string(),
            })?;
        rows.push(EventRow::new(id, timestamp, item));
    }
    tracing::debug!(rows = rows.len(), "loaded sequence events");
    Ok(rows)
}

/// Build event rows from a polars DataFrame.
pub fn events_from_dataframe(df: &DataFrame, columns: &EventColumns) -> Result<Vec<EventRow>> {
    let id_col = frame_column(df, &columns.id)?;
    let time_col = frame_column(df, &columns.time)?;
    let item_col = frame_column(df, &columns.item)?;

    let mut rows = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let id = any_to_string(id_col.get(row)?);
        let item = any_to_string(item_col.get(row)?);
        let id = required(&id, row, &columns.id)?;
        let item = required(&item, row, &columns.item)?;
        let raw_time = time_col.get(row)?;
        let timestamp = match any_to_i64(raw_time.clone()) {
            Some(value) => value,
            None if raw_time.is_null() => {
                return Err(IngestError::EmptyValue {
                    row: row + 1,
                    column: columns.time.clone(),
                });
            }
            None => {
                return Err(IngestError::InvalidTimestamp {
                    row: row + 1,
                    column: columns.time.clone(),
                    value: any_to_string(raw_time),
                });
            }
        };
        rows.push(EventRow::new(id, timestamp, item));
    }
    tracing::debug!(rows = rows.len(), "loaded sequence events from frame");
    Ok(rows)
}

pub(crate) fn required<'a>(value: &'a str, row: usize, column: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(IngestError::EmptyValue {
            row: row + 1,
            column: column.to_string(),
        });
    }
    Ok(value)
}

pub(crate) fn frame_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name).map_err(|_| IngestError::ColumnNotFound {
        column: name.to_string(),
        available: df
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    })
}
