use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// A CSV file loaded as trimmed text cells.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Index of a column, matched case-insensitively on the normalized header.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        let wanted = normalize_header(name);
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| IngestError::ColumnNotFound {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map_or("", String::as_str)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file whose first non-blank row is the header.
///
/// Blank rows are dropped and short rows are padded with empty cells.
pub fn read_csv_table(path: &Path) -> Result<CsvTable> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let csv_error = |source| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(csv_error)?;
    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        raw_rows.push(row);
    }
    let mut raw_rows = raw_rows.into_iter();
    let Some(header_row) = raw_rows.next() else {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
    let rows = raw_rows
        .map(|mut record| {
            record.resize(headers.len(), String::new());
            record
        })
        .collect::<Vec<_>>();
    tracing::debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "read csv table"
    );
    Ok(CsvTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_headers() {
        assert_eq!(normalize_header("\u{feff} Time   Points "), "Time Points");
        assert_eq!(normalize_header(""), "");
    }

    #[test]
    fn column_lookup_is_case_insensitive() {
        let table = CsvTable {
            headers: vec!["ID".to_string(), "Time Points".to_string()],
            rows: vec![vec!["S1".to_string(), "0".to_string()]],
        };
        assert_eq!(table.column_index("time  points").unwrap(), 1);
        assert_eq!(table.cell(0, 0), "S1");
        assert_eq!(table.cell(3, 0), "");
        assert!(matches!(
            table.column_index("Items"),
            Err(IngestError::ColumnNotFound { .. })
        ));
    }
}
