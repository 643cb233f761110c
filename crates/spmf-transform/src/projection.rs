//! Projection of decoded results into a row-per-pattern table.

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};

use spmf_model::{MiningResults, OutputShape};

use crate::error::{Result, TranscodeError};

/// Zip parallel result columns into a [`DataFrame`].
///
/// Rule shapes need confidences and pattern shapes must not have them; every
/// column must be as long as `patterns`.
pub fn project(
    shape: OutputShape,
    patterns: &[String],
    supports: &[u64],
    confidences: Option<&[f64]>,
) -> Result<DataFrame> {
    let confidence_len = confidences.map(<[f64]>::len);
    let aligned = supports.len() == patterns.len()
        && match confidence_len {
            Some(len) => shape.is_rule() && len == patterns.len(),
            None => !shape.is_rule(),
        };
    if !aligned {
        return Err(TranscodeError::ShapeMismatch {
            shape,
            patterns: patterns.len(),
            supports: supports.len(),
            confidences: confidence_len,
        });
    }

    let names = shape.column_names();
    let mut columns: Vec<Column> = vec![
        Series::new(names[0].into(), patterns.to_vec()).into_column(),
        Series::new(names[1].into(), supports.to_vec()).into_column(),
    ];
    if let Some(confidences) = confidences {
        columns.push(Series::new(names[2].into(), confidences.to_vec()).into_column());
    }
    Ok(DataFrame::new(columns)?)
}

/// Project decoded results, checking they match the expected shape.
pub fn project_results(shape: OutputShape, results: &MiningResults) -> Result<DataFrame> {
    let patterns = results.rendered();
    let supports = results.supports();
    let confidences = results.confidences();
    project(shape, &patterns, &supports, confidences.as_deref())
}
