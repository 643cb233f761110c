use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use spmf_ingest::any_to_string;
use spmf_model::CATALOG;
use spmf_transform::MiningFrame;

pub fn print_frame(frame: &MiningFrame) {
    println!("Algorithm: {} ({})", frame.algorithm, frame.shape);
    if let Some(path) = frame.source_file() {
        println!("Input: {}", path.display());
    }
    if let Some(meta) = &frame.meta {
        println!(
            "Records: {}  Distinct items: {}",
            meta.input_records, meta.symbols
        );
    }
    println!("Results: {}", frame.record_count());
    println!("{}", frame_table(&frame.data));
}

/// Render a result table; columns after the first are right-aligned.
pub fn frame_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for index in 1..df.width() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in 0..df.height() {
        let cells = df
            .get_columns()
            .iter()
            .map(|column| column.get(row).map(any_to_string).unwrap_or_default())
            .map(Cell::new)
            .collect::<Vec<_>>();
        table.add_row(cells);
    }
    if df.height() == 0 {
        table.add_row(vec![dim_cell("(no results)")]);
    }
    table
}

pub fn catalog_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Algorithm"),
        header_cell("Output"),
        header_cell("Parameters"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for entry in CATALOG {
        table.add_row(vec![
            Cell::new(entry.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entry.output.label()),
            Cell::new(entry.parameters.join(", ")),
            Cell::new(entry.description),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
