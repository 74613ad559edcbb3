// Reconciliation core
//
// Pure transformations over in-memory grids: header detection, name
// matching, roster indexing and the reconciliation fold. Spreadsheet I/O
// lives in `crate::excel`.

pub mod error;
pub mod grid;
pub mod header;
pub mod index;
pub mod names;
pub mod normalize;
pub mod reconcile;

pub use error::RosterError;
pub use grid::{Grid, Row};
pub use header::{find_header_row, labels};
pub use index::{KeyCollision, RosterColumns, RosterIndex};
pub use reconcile::{
    Correction, MasterRow, Reconciliation, SecondaryColumns, UnmatchedRow, reconcile,
};

/// A loaded sheet handed to the core
#[derive(Debug, Clone)]
pub struct NamedGrid<'a> {
    pub sheet: &'a str,
    pub grid: &'a [Row],
}

/// Everything a run produces, plus where the headers were found
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub allops_header_row: usize,
    pub v2_header_row: usize,
    pub v2_columns: SecondaryColumns,
    pub index: RosterIndex,
    pub reconciliation: Reconciliation,
}

/// Full pipeline: locate both headers, index ALLOPS, reconcile V2.
/// Fails on the first fatal error; nothing partial is returned.
pub fn run(allops: NamedGrid<'_>, v2: NamedGrid<'_>) -> Result<RunOutcome, RosterError> {
    let allops_header = find_header_row(allops.grid, allops.sheet, &labels::ALLOPS)?;
    let roster_columns = RosterColumns::resolve(&allops_header.headers)?;
    log::debug!(
        "ALLOPS manager column {} precedes business area column {}",
        roster_columns.manager_name + 1,
        roster_columns.business_area + 1
    );

    let v2_header = find_header_row(v2.grid, v2.sheet, &labels::V2)?;
    let v2_columns = SecondaryColumns::resolve(&v2_header.headers)?;

    let index = RosterIndex::build(allops.grid, &roster_columns, allops_header.row_index);
    log::info!(
        "Indexed {} roster records ({} rows skipped)",
        index.len(),
        index.skipped_rows()
    );
    if index.is_empty() {
        log::warn!("No usable rows below the {:?} header", allops.sheet);
    }
    if !index.collisions().is_empty() {
        log::warn!(
            "{} roster rows share a normalized name with an earlier row; later rows win",
            index.collisions().len()
        );
    }

    let reconciliation = reconcile(v2.grid, &v2_columns, v2_header.row_index, &index);
    log::info!(
        "Reconciled {:?}: {} master rows, {} corrections, {} unmatched, {} skipped",
        v2.sheet,
        reconciliation.master_list.len(),
        reconciliation.corrections.len(),
        reconciliation.unmatched.len(),
        reconciliation.skipped_rows
    );

    Ok(RunOutcome {
        allops_header_row: allops_header.row_index,
        v2_header_row: v2_header.row_index,
        v2_columns,
        index,
        reconciliation,
    })
}
