//! Files written by the CLI.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};

/// Write a result table as CSV with a header row.
pub fn write_csv(path: &Path, df: &mut DataFrame) -> Result<()> {
    ensure_parent(path)?;
    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = df.height(), "wrote csv");
    Ok(())
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

/// Symbol-table path next to an encoded file: `<name>.codec.json`.
pub fn codec_path_for(encoded: &Path) -> PathBuf {
    let mut name = encoded
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".codec.json");
    encoded.with_file_name(name)
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display())),
        _ => Ok(()),
    }
}
