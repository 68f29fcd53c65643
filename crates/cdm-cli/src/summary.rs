use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cdm_minimise::RoundStats;
use cdm_model::{ConstraintList, FieldName};
use cdm_cli::pipeline::MinimiseReport;

use crate::types::{AddDaysResult, ExpandResult};

/// Longest rendered value list before it is shortened.
const MAX_VALUES_SHOWN: usize = 6;

pub fn print_minimise_summary(report: &MinimiseReport) {
    println!("Input: {}", report.input.display());
    println!(
        "Rows read: {}  zero-count rows dropped: {}  records: {}",
        report.rows_read, report.zero_count_rows, report.records
    );
    println!("{}", rounds_table(&report.refinement.rounds));
    println!("{}", constraints_table(&report.refinement.constraints));
    println!("Constraints: {}", report.refinement.constraints.len());
    println!("Record count from file: {}", report.records);
    println!("Record count from minimisation: {}", report.covered_records());
    if let Some(completeness) = &report.completeness {
        println!(
            "Required {} values for {}: all {} present",
            completeness.field, completeness.partition, completeness.required
        );
        if !completeness.unexpected.is_empty() {
            eprintln!(
                "Values outside the reference set: {}",
                completeness.unexpected.join(", ")
            );
        }
    }
    println!("Written constraints: {}", report.output.len());
}

pub fn print_add_days_summary(result: &AddDaysResult) {
    println!(
        "Wrote {} rows from {} to {}",
        result.rows,
        result.input.display(),
        result.output.display()
    );
}

pub fn print_expand_summary(result: &ExpandResult) {
    println!(
        "Expanded {} constraints from {} into {} in {}",
        result.constraints_in,
        result.input.display(),
        result.constraints_out,
        result.output.display()
    );
}

pub fn rounds_table(rounds: &[RoundStats]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Round"),
        header_cell("Input"),
        header_cell("Output"),
        header_cell("Orders"),
        header_cell("Best order"),
        header_cell("Adopted"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 5, CellAlignment::Center);
    for round in rounds {
        table.add_row(vec![
            Cell::new(round.round),
            Cell::new(round.input_len),
            Cell::new(round.output_len),
            Cell::new(round.orders_evaluated),
            order_cell(round.best_order.as_deref()),
            adopted_cell(round.adopted),
        ]);
    }
    table
}

pub fn constraints_table(constraints: &ConstraintList) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#"), header_cell("Records")];
    header.extend(constraints.fields().iter().map(|f| header_cell(f.as_str())));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Right);
    for (index, constraint) in constraints.iter().enumerate() {
        let mut row = vec![Cell::new(index + 1), Cell::new(constraint.cardinality())];
        row.extend(constraint.values().iter().map(|values| values_cell(values)));
        table.add_row(row);
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

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
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

fn order_cell(order: Option<&[FieldName]>) -> Cell {
    match order {
        Some(order) => Cell::new(
            order
                .iter()
                .map(FieldName::as_str)
                .collect::<Vec<_>>()
                .join(" > "),
        ),
        None => dim_cell("-"),
    }
}

fn adopted_cell(adopted: bool) -> Cell {
    if adopted {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn values_cell(values: &[String]) -> Cell {
    Cell::new(shorten_values(values))
}

fn shorten_values(values: &[String]) -> String {
    if values.len() <= MAX_VALUES_SHOWN {
        return values.join(", ");
    }
    let shown = values[..MAX_VALUES_SHOWN - 1].join(", ");
    format!("{shown}, ... ({} total)", values.len())
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use cdm_model::{Constraint, field_names};

    use super::*;

    fn s(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn long_value_lists_are_shortened() {
        assert_eq!(shorten_values(&s(&["1", "2"])), "1, 2");
        let many: Vec<String> = (1..=10).map(|n| format!("{n:02}")).collect();
        assert_eq!(shorten_values(&many), "01, 02, 03, 04, 05, ... (10 total)");
    }

    #[test]
    fn constraints_table_has_a_column_per_field() {
        let list = ConstraintList::new(
            field_names(["variable", "month"]).unwrap(),
            vec![Constraint::from_values(vec![s(&["44"]), s(&["01", "02"])])],
        )
        .unwrap();
        let mut table = constraints_table(&list);
        assert_eq!(table.column_count(), 4);
        let rendered = table.to_string();
        assert!(rendered.contains("01, 02"));
        assert!(rendered.contains("variable"));
    }

    #[test]
    fn rounds_table_lists_every_round() {
        let rounds = vec![
            RoundStats {
                round: 0,
                input_len: 4,
                output_len: 2,
                orders_evaluated: 6,
                best_order: Some(field_names(["variable", "month"]).unwrap()),
                adopted: true,
            },
            RoundStats {
                round: 1,
                input_len: 2,
                output_len: 2,
                orders_evaluated: 2,
                best_order: None,
                adopted: false,
            },
        ];
        let rendered = rounds_table(&rounds).to_string();
        assert!(rendered.contains("variable > month"));
        assert!(rendered.contains("no"));
    }
}
