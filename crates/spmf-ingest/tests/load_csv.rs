use std::fs;
use std::path::PathBuf;

use spmf_ingest::{
    EpisodeColumns, EventColumns, IngestError, load_episodes_csv, load_events_csv,
    read_csv_table,
};
use spmf_model::{EpisodeEvent, EventRow};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn loads_sequence_table() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(
        &dir,
        "events.csv",
        "\u{feff}ID,Time Points,Items\nS1,0,a\n\nS1,1,b\nS2,0, c \n",
    );
    let rows = load_events_csv(&path, &EventColumns::default()).expect("load");
    assert_eq!(
        rows,
        vec![
            EventRow::new("S1", 0, "a"),
            EventRow::new("S1", 1, "b"),
            EventRow::new("S2", 0, "c"),
        ]
    );
}

#[test]
fn custom_column_names() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "events.csv", "patient,day,code\np1,3,x\n");
    let columns = EventColumns {
        id: "patient".into(),
        time: "day".into(),
        item: "code".into(),
    };
    let rows = load_events_csv(&path, &columns).expect("load");
    assert_eq!(rows, vec![EventRow::new("p1", 3, "x")]);
}

#[test]
fn loads_episode_table() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "stream.csv", "Itemset,Time points\na,1\na b,3\n");
    let events = load_episodes_csv(&path, &EpisodeColumns::default()).expect("load");
    assert_eq!(
        events,
        vec![
            EpisodeEvent::new(["a"]).with_timestamp(1),
            EpisodeEvent::new(["a", "b"]).with_timestamp(3),
        ]
    );
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_csv_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}

#[test]
fn blank_file_is_empty() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "blank.csv", "\n\n");
    let err = read_csv_table(&path).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }));
}

#[test]
fn header_only_file_has_no_events() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(&dir, "header.csv", "ID,Time Points,Items\n");
    let rows = load_events_csv(&path, &EventColumns::default()).expect("load");
    assert!(rows.is_empty());
}
