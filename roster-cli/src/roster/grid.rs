//! Raw cell grids as handed over by the spreadsheet layer

/// One sheet row; may be shorter than its neighbours
pub type Row = Vec<String>;

/// A sheet as ordered rows of ordered string cells
pub type Grid = Vec<Row>;

/// Positional cell read that never fails.
///
/// Out-of-range columns read as an empty string. Values are trimmed.
pub fn cell(row: &[String], index: usize) -> String {
    row.get(index)
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
