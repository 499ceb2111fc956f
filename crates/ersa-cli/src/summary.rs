use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ersa_cli::pipeline::MappingSource;
use ersa_model::LogicalParameter;

use crate::types::{ColumnsResult, GenerateResult};

pub fn print_generate_summary(result: &GenerateResult) {
    let outcome = &result.outcome;
    println!("Template: {}", result.template.display());
    if result.dry_run {
        println!("Output: (dry run, nothing written)");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    println!(
        "Mapping: {}",
        match result.mapping_source {
            MappingSource::Saved => "saved mapping file",
            MappingSource::Detected => "auto-detected from headers",
        }
    );
    if let Some(path) = &result.skip_report {
        println!("Skip report: {}", path.display());
    }
    if let Some(path) = &result.summary_json {
        println!("Summary: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Generated"),
        header_cell("Skipped"),
        header_cell("Errors"),
        header_cell("Total"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        count_cell(outcome.success_count, Color::Green),
        count_cell(outcome.skipped_count(), Color::Yellow),
        count_cell(outcome.error_count(), Color::Red),
        Cell::new(outcome.total_count).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !outcome.skipped.is_empty() {
        let mut table = Table::new();
        table.set_header(vec![header_cell("Skipped program"), header_cell("Reason")]);
        apply_table_style(&mut table);
        for skip in &outcome.skipped {
            table.add_row(vec![
                Cell::new(&skip.program_name).fg(Color::Yellow),
                Cell::new(&skip.reason),
            ]);
        }
        println!("{table}");
    }

    if !outcome.errors.is_empty() {
        eprintln!("Errors:");
        for error in &outcome.errors {
            eprintln!("- record {} ({}): {}", error.position, error.program_name, error.reason);
        }
    }
}

pub fn print_columns(result: &ColumnsResult) {
    println!("Data: {}", result.data.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("Column")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, column) in result.columns.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(column)]);
    }
    println!("{table}");

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Parameter"),
        header_cell("Key"),
        header_cell("Detected column"),
    ]);
    apply_table_style(&mut table);
    for param in LogicalParameter::ALL {
        let column = match result.mapping.column(param) {
            Some(column) => Cell::new(column).fg(Color::Green),
            None => dim_cell("(None)"),
        };
        table.add_row(vec![Cell::new(param.label()), dim_cell(param.key()), column]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
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
