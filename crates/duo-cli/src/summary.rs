//! Table and JSON rendering.

use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

use duo_cli::kpi::{KpiReport, Section};
use duo_common::format_numeric;
use duo_ingest::{ColumnKind, DatasetProfile};
use duo_map::{LabelStatus, MappingSummary};
use duo_model::{GroupKey, RateTable, SemanticLabel, ShareTable, TotalsTable};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_labels() {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Label"), header_cell("Description")]);
    apply_table_style(&mut table);
    for label in SemanticLabel::ALL {
        table.add_row(vec![label_cell(label), Cell::new(label.description())]);
    }
    println!("{table}");
}

pub fn print_inspect(
    profile: &DatasetProfile,
    mapping: &[(SemanticLabel, Option<String>, LabelStatus)],
    summary: &MappingSummary,
) {
    println!(
        "Rows: {}  Columns: {}  Numeric: {}  Categorical: {}",
        profile.rows,
        profile.columns.len(),
        profile.numeric_columns().len(),
        profile.categorical_columns().len()
    );

    let mut columns = Table::new();
    columns.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Kind"),
        header_cell("Missing"),
        header_cell("Distinct"),
    ]);
    apply_table_style(&mut columns);
    align_column(&mut columns, 3, CellAlignment::Right);
    align_column(&mut columns, 4, CellAlignment::Right);
    for column in &profile.columns {
        let kind = match column.kind {
            ColumnKind::Numeric => Cell::new("numeric").fg(Color::Blue),
            ColumnKind::Categorical => Cell::new("categorical").fg(Color::Green),
            ColumnKind::Other => dim_cell("other"),
        };
        columns.add_row(vec![
            Cell::new(&column.name),
            dim_cell(&column.dtype),
            kind,
            count_cell(column.null_count, Color::Yellow),
            Cell::new(column.distinct_count),
        ]);
    }
    println!("{columns}");

    let mut labels = Table::new();
    labels.set_header(vec![
        header_cell("Label"),
        header_cell("Column"),
        header_cell("Source"),
    ]);
    apply_table_style(&mut labels);
    align_column(&mut labels, 2, CellAlignment::Center);
    for (label, column, status) in mapping {
        labels.add_row(vec![
            label_cell(*label),
            column.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
            status_cell(*status),
        ]);
    }
    println!();
    println!("Mapping:");
    println!("{labels}");
    println!(
        "{} of {} labels mapped ({} chosen, {} suggested)",
        summary.chosen + summary.suggested,
        summary.total_labels,
        summary.chosen,
        summary.suggested
    );
    if summary.stale > 0 {
        eprintln!(
            "warning: {} mapped column(s) not in this dataset; those labels are unmapped",
            summary.stale
        );
    }
}

pub fn print_rate(table: Option<&RateTable>) {
    match table {
        Some(table) => println!("{}", rate_table(table)),
        None => guidance(&format!(
            "no transition rate: map '{}' and '{}' (and a column for each --by label)",
            SemanticLabel::DoorstroomIndicator,
            SemanticLabel::AantalStudenten
        )),
    }
}

pub fn print_share(label: SemanticLabel, table: Option<&ShareTable>) {
    match table {
        Some(table) => println!("{}", share_table(table)),
        None => guidance(&format!(
            "no shares: map '{label}' and '{}', and make sure the total is not zero",
            SemanticLabel::AantalStudenten
        )),
    }
}

pub fn print_totals(table: Option<&TotalsTable>) {
    let Some(totals) = table else {
        guidance(&format!(
            "no totals: map '{}' (and a column for each --by label)",
            SemanticLabel::AantalStudenten
        ));
        return;
    };
    let mut table = Table::new();
    let mut header = key_headers(&totals.dimensions);
    header.push(header_cell("Students"));
    table.set_header(header);
    apply_table_style(&mut table);
    let count_index = key_width(&totals.dimensions);
    align_column(&mut table, count_index, CellAlignment::Right);
    for row in &totals.rows {
        let mut cells = key_cells(&row.key);
        cells.push(Cell::new(format_numeric(row.count)));
        table.add_row(cells);
    }
    if !totals.dimensions.is_empty() {
        let mut cells = vec![total_cell()];
        cells.extend((1..count_index).map(|_| dim_cell("")));
        cells.push(Cell::new(format_numeric(totals.total())).add_attribute(Attribute::Bold));
        table.add_row(cells);
    }
    println!("{table}");
}

pub fn print_kpi(report: &KpiReport) {
    print_section(1, &report.overall_rate, rate_table);
    print_section(2, &report.rate_by_sector, rate_table);
    print_section(3, &report.rate_by_regio, rate_table);
    print_section(4, &report.share_by_sector, share_table);
    print_section(5, &report.share_by_regio, share_table);
}

fn print_section<T>(number: usize, section: &Section<T>, render: fn(&T) -> Table) {
    println!("{number}. {}", section.title);
    match (&section.table, &section.guidance) {
        (Some(table), _) => println!("{}", render(table)),
        (None, Some(message)) => guidance(message),
        (None, None) => {}
    }
    println!();
}

fn rate_table(rates: &RateTable) -> Table {
    let mut table = Table::new();
    let mut header = key_headers(&rates.dimensions);
    header.push(header_cell("Students"));
    header.push(header_cell("Transition"));
    table.set_header(header);
    apply_table_style(&mut table);
    let width = key_width(&rates.dimensions);
    align_column(&mut table, width, CellAlignment::Right);
    align_column(&mut table, width + 1, CellAlignment::Right);
    for row in &rates.rows {
        let mut cells = key_cells(&row.key);
        cells.push(Cell::new(format_numeric(row.weight)));
        cells.push(percentage_cell(row.percentage));
        table.add_row(cells);
    }
    table
}

fn share_table(shares: &ShareTable) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(shares.dimension.key()),
        header_cell("Students"),
        header_cell("Share"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &shares.rows {
        let mut cells = key_cells(&row.key);
        cells.push(Cell::new(format_numeric(row.count)));
        cells.push(percentage_cell(Some(row.percentage)));
        table.add_row(cells);
    }
    table.add_row(vec![
        total_cell(),
        Cell::new(format_numeric(shares.total)).add_attribute(Attribute::Bold),
        dim_cell("100.0%"),
    ]);
    table
}

/// `12.3%`, or a dimmed dash when the group has no weight.
pub fn format_percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |pct| format!("{pct:.1}%"))
}

fn percentage_cell(value: Option<f64>) -> Cell {
    match value {
        Some(_) => Cell::new(format_percentage(value)),
        None => dim_cell(format_percentage(value)),
    }
}

fn key_headers(dimensions: &[SemanticLabel]) -> Vec<Cell> {
    if dimensions.is_empty() {
        return vec![header_cell("Group")];
    }
    dimensions.iter().map(|label| header_cell(label.key())).collect()
}

fn key_width(dimensions: &[SemanticLabel]) -> usize {
    dimensions.len().max(1)
}

fn key_cells(key: &GroupKey) -> Vec<Cell> {
    key.values()
        .iter()
        .map(|value| {
            if value.is_missing() {
                dim_cell(value)
            } else {
                Cell::new(value)
            }
        })
        .collect()
}

fn guidance(message: &str) {
    println!("{message}");
}

fn apply_table_style(table: &mut Table) {
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

fn label_cell(label: SemanticLabel) -> Cell {
    Cell::new(label.key())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: LabelStatus) -> Cell {
    let cell = Cell::new(status.as_str());
    match status {
        LabelStatus::Chosen => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        LabelStatus::Suggested => cell.fg(Color::Green),
        LabelStatus::Stale => cell.fg(Color::Red),
        LabelStatus::Unset | LabelStatus::Unmapped => cell.fg(Color::DarkGrey),
    }
}

fn total_cell() -> Cell {
    Cell::new("TOTAL")
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
