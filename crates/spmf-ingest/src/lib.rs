//! Loading of sequence and event-stream tables.
//!
//! Tables come either from CSV files or from polars DataFrames already in
//! memory. Both paths produce the same records: [`EventRow`] for sequence
//! mining and [`EpisodeEvent`] for episode mining.
//!
//! [`EventRow`]: spmf_model::EventRow
//! [`EpisodeEvent`]: spmf_model::EpisodeEvent

pub mod csv_table;
pub mod episodes;
pub mod error;
pub mod events;
pub mod polars_utils;

use std::path::Path;

use spmf_model::{EpisodeEvent, EventRow};

pub use csv_table::{CsvTable, read_csv_table};
pub use episodes::{EpisodeColumns, episodes_from_dataframe, episodes_from_table};
pub use error::{IngestError, Result};
pub use events::{EventColumns, events_from_dataframe, events_from_table};
pub use polars_utils::{any_to_i64, any_to_string, format_numeric, parse_i64};

/// Read a sequence table from a CSV file.
pub fn load_events_csv(path: &Path, columns: &EventColumns) -> Result<Vec<EventRow>> {
    let table = read_csv_table(path)?;
    events_from_table(&table, columns)
}

/// Read an event-stream table from a CSV file.
pub fn load_episodes_csv(path: &Path, columns: &EpisodeColumns) -> Result<Vec<EpisodeEvent>> {
    let table = read_csv_table(path)?;
    episodes_from_table(&table, columns)
}
