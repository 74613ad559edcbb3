//! CSV export of V2 rows that matched nobody on the roster

use anyhow::{Context, Result};
use csv::Writer;

use crate::roster::UnmatchedRow;

/// Unmatched rows as `Row,Driver Name,Supervisor Name` CSV bytes (1-based rows)
pub fn build_unmatched_csv(rows: &[UnmatchedRow]) -> Result<Vec<u8>> {
    let mut wtr = Writer::from_writer(Vec::new());

    wtr.write_record(["Row", "Driver Name", "Supervisor Name"])
        .context("Failed to write CSV header")?;

    for row in rows {
        let row_number = (row.row + 1).to_string();
        wtr.write_record([
            row_number.as_str(),
            row.driver_name.as_str(),
            row.supervisor_name.as_str(),
        ])
        .with_context(|| format!("Failed to write unmatched row {}", row_number))?;
    }

    wtr.into_inner().context("Failed to flush CSV writer")
}
