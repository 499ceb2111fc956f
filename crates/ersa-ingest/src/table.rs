use ersa_model::{RawValue, Record, RecordSet};

use crate::header::unique_headers;

fn is_blank_row(row: &[RawValue]) -> bool {
    row.iter().all(RawValue::is_blank)
}

/// Builds a record set from raw rows. Returns `None` when no row has content.
pub(crate) fn assemble(rows: Vec<Vec<RawValue>>) -> Option<RecordSet> {
    let mut rows = rows.into_iter().filter(|row| !is_blank_row(row));
    let header = rows.next()?;
    let columns = unique_headers(header.iter().map(ToString::to_string));

    let records = rows
        .enumerate()
        .map(|(index, mut cells)| {
            if cells.len() > columns.len() {
                tracing::debug!(
                    row = index + 1,
                    extra = cells.len() - columns.len(),
                    "ignoring cells beyond the header row"
                );
            }
            cells.resize(columns.len(), RawValue::Empty);
            let mut record = Record::new();
            for (column, value) in columns.iter().zip(cells) {
                record.push(column.as_str(), value);
            }
            record
        })
        .collect();

    Some(RecordSet::new(columns, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<RawValue> {
        cells.iter().copied().map(RawValue::from_text).collect()
    }

    #[test]
    fn header_is_first_non_empty_row() {
        let set = assemble(vec![
            row(&["", ""]),
            row(&["Stencil", "Length"]),
            row(&["A", "100"]),
        ])
        .unwrap();
        assert_eq!(set.columns, vec!["Stencil", "Length"]);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn drops_blank_rows_and_pads_short_ones() {
        let set = assemble(vec![
            row(&["Stencil", "Length", "Width"]),
            row(&["A"]),
            row(&["", "  ", ""]),
            row(&["B", "1", "2", "extra"]),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records[0].get("Width"), Some(&RawValue::Empty));
        assert_eq!(set.records[1].len(), 3);
        assert_eq!(set.records[1].get("Width"), Some(&RawValue::from("2")));
    }

    #[test]
    fn empty_input_has_no_record_set() {
        assert!(assemble(Vec::new()).is_none());
        assert!(assemble(vec![row(&["", " "])]).is_none());
    }

    #[test]
    fn numeric_header_cells_use_display_form() {
        let set = assemble(vec![vec![RawValue::Number(2024.0), RawValue::from("Name")]]).unwrap();
        assert_eq!(set.columns, vec!["2024", "Name"]);
        assert!(set.is_empty());
    }
}
