//! Matching V2 rows against the roster: master list and supervisor corrections

use std::collections::HashSet;

use serde::Serialize;

use super::error::RosterError;
use super::grid::{Row, cell};
use super::header::{HeaderMap, labels};
use super::index::RosterIndex;
use super::names::split_name;
use super::normalize::normalize;

/// Resolved V2 column positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryColumns {
    pub driver_name: usize,
    pub supervisor_name: usize,
}

impl SecondaryColumns {
    pub fn resolve(headers: &HeaderMap) -> Result<Self, RosterError> {
        Ok(Self {
            driver_name: headers.require(labels::DRIVER_NAME)?,
            supervisor_name: headers.require(labels::SUPERVISOR_NAME)?,
        })
    }
}

/// One deduplicated master-list entry (raw roster values)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MasterRow {
    pub colleague_id: String,
    pub first_name: String,
    pub last_name: String,
    pub manager_name: String,
}

/// Supervisor overwrite at a zero-based grid coordinate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub row: usize,
    pub column: usize,
    pub previous: String,
    pub value: String,
}

/// A V2 row whose name parsed but matched nobody on the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnmatchedRow {
    pub row: usize,
    pub driver_name: String,
    pub supervisor_name: String,
}

/// The fields of one V2 row the reconciler cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryRow {
    pub row_index: usize,
    pub driver_name: String,
    pub supervisor_name: String,
}

impl SecondaryRow {
    pub fn read(row: &[String], row_index: usize, columns: &SecondaryColumns) -> Self {
        Self {
            row_index,
            driver_name: cell(row, columns.driver_name),
            supervisor_name: cell(row, columns.supervisor_name),
        }
    }
}

/// Accumulator threaded through the V2 rows
#[derive(Debug, Clone, Default)]
pub struct ReconcileState {
    pub master_list: Vec<MasterRow>,
    pub corrections: Vec<Correction>,
    pub unmatched: Vec<UnmatchedRow>,
    /// Rows whose driver name could not be split into first and last
    pub skipped_rows: usize,
    emitted: HashSet<String>,
}

impl ReconcileState {
    /// Fold one V2 row into the state.
    ///
    /// A colleague id enters the master list only at its first matched row.
    /// Every matched row is checked for a stale supervisor independently.
    pub fn step(
        mut self,
        columns: &SecondaryColumns,
        index: &RosterIndex,
        row: SecondaryRow,
    ) -> Self {
        let (first, last) = split_name(&row.driver_name);
        if first.is_empty() || last.is_empty() {
            self.skipped_rows += 1;
            return self;
        }

        let Some(record) = index.lookup(&first, &last) else {
            self.unmatched.push(UnmatchedRow {
                row: row.row_index,
                driver_name: row.driver_name,
                supervisor_name: row.supervisor_name,
            });
            return self;
        };

        if self.emitted.insert(record.colleague_id.clone()) {
            self.master_list.push(MasterRow {
                colleague_id: record.colleague_id.clone(),
                first_name: record.first_name.clone(),
                last_name: record.last_name.clone(),
                manager_name: record.manager_name.clone(),
            });
        }

        if normalize(&row.supervisor_name) != normalize(&record.manager_name) {
            self.corrections.push(Correction {
                row: row.row_index,
                column: columns.supervisor_name,
                previous: row.supervisor_name,
                value: record.manager_name.clone(),
            });
        }

        self
    }
}

/// Final output of a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub master_list: Vec<MasterRow>,
    pub corrections: Vec<Correction>,
    pub unmatched: Vec<UnmatchedRow>,
    pub skipped_rows: usize,
}

impl From<ReconcileState> for Reconciliation {
    fn from(state: ReconcileState) -> Self {
        Self {
            master_list: state.master_list,
            corrections: state.corrections,
            unmatched: state.unmatched,
            skipped_rows: state.skipped_rows,
        }
    }
}

/// Walk every V2 row below the header in order
pub fn reconcile(
    grid: &[Row],
    columns: &SecondaryColumns,
    header_row: usize,
    index: &RosterIndex,
) -> Reconciliation {
    grid.iter()
        .enumerate()
        .skip(header_row + 1)
        .map(|(row_index, row)| SecondaryRow::read(row, row_index, columns))
        .fold(ReconcileState::default(), |state, row| {
            state.step(columns, index, row)
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::index::RosterColumns;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn roster() -> RosterIndex {
        let grid = vec![
            row(&["first", "last", "id", "manager", "area"]),
            row(&["Jane", "Doe", "C123", "Bob Smith", "East"]),
            row(&["John", "Roe", "C456", "Alice Brown", "West"]),
        ];
        let columns = RosterColumns {
            first_name: 0,
            last_name: 1,
            colleague_id: 2,
            manager_name: 3,
            business_area: 4,
        };
        RosterIndex::build(&grid, &columns, 0)
    }

    const COLUMNS: SecondaryColumns = SecondaryColumns {
        driver_name: 0,
        supervisor_name: 1,
    };

    fn secondary(row_index: usize, driver: &str, supervisor: &str) -> SecondaryRow {
        SecondaryRow {
            row_index,
            driver_name: driver.to_string(),
            supervisor_name: supervisor.to_string(),
        }
    }

    #[test]
    fn test_step_matching_supervisor_needs_no_correction() {
        let index = roster();

        let state = ReconcileState::default().step(
            &COLUMNS,
            &index,
            secondary(4, "Jane Doe", "  BOB   smith "),
        );

        assert_eq!(state.master_list.len(), 1);
        assert!(state.corrections.is_empty());
    }

    #[test]
    fn test_step_stale_supervisor_is_corrected() {
        let index = roster();

        let state = ReconcileState::default().step(
            &COLUMNS,
            &index,
            secondary(7, "Doe, Jane", "Bob Jones"),
        );

        assert_eq!(
            state.corrections,
            vec![Correction {
                row: 7,
                column: 1,
                previous: "Bob Jones".to_string(),
                value: "Bob Smith".to_string(),
            }]
        );
    }

    #[test]
    fn test_step_unparsable_name_is_skipped() {
        let index = roster();

        let state = ReconcileState::default()
            .step(&COLUMNS, &index, secondary(1, "Madonna", "X"))
            .step(&COLUMNS, &index, secondary(2, "", "X"));

        assert_eq!(state.skipped_rows, 2);
        assert!(state.master_list.is_empty());
        assert!(state.corrections.is_empty());
        assert!(state.unmatched.is_empty());
    }

    #[test]
    fn test_step_unknown_person_is_unmatched() {
        let index = roster();

        let state =
            ReconcileState::default().step(&COLUMNS, &index, secondary(3, "Unknown Person", "X"));

        assert!(state.master_list.is_empty());
        assert!(state.corrections.is_empty());
        assert_eq!(
            state.unmatched,
            vec![UnmatchedRow {
                row: 3,
                driver_name: "Unknown Person".to_string(),
                supervisor_name: "X".to_string(),
            }]
        );
    }

    #[test]
    fn test_reconcile_dedups_by_colleague_id() {
        let index = roster();
        let grid = vec![
            row(&["Driver Name", "Supervisor Name"]),
            row(&["Roe, John", "Alice Brown"]),
            row(&["Jane Doe", "Bob Smith"]),
            row(&["john roe", "Somebody Else"]),
            row(&["DOE, JANE"]),
        ];

        let result = reconcile(&grid, &COLUMNS, 0, &index);

        let ids: Vec<_> = result
            .master_list
            .iter()
            .map(|r| r.colleague_id.as_str())
            .collect();
        assert_eq!(ids, vec!["C456", "C123"]);
        assert_eq!(result.master_list[0].first_name, "John");
        assert_eq!(result.master_list[0].manager_name, "Alice Brown");

        // rows 3 and 4 are stale; the short row 4 reads its supervisor as blank
        let corrected: Vec<_> = result
            .corrections
            .iter()
            .map(|c| (c.row, c.value.as_str()))
            .collect();
        assert_eq!(corrected, vec![(3, "Alice Brown"), (4, "Bob Smith")]);
    }

    #[test]
    fn test_reconcile_starts_below_header() {
        let index = roster();
        let grid = vec![
            row(&["Jane Doe", "Wrong"]),
            row(&["Driver Name", "Supervisor Name"]),
        ];

        let result = reconcile(&grid, &COLUMNS, 1, &index);

        assert_eq!(result, Reconciliation::default());
    }
}
