//! Header row detection for sheets whose header position is not fixed

use std::collections::HashMap;

use super::error::RosterError;
use super::grid::Row;
use super::normalize::normalize;

/// Required labels, stored in normalized form
pub mod labels {
    pub const PREFERRED_FIRST_NAME: &str = "preferred first name";
    pub const LEGAL_LAST_NAME: &str = "legal last name";
    pub const COLLEAGUE_ID: &str = "colleague id";
    pub const MANAGER_NAME: &str = "manager - name";
    pub const BUSINESS_AREA: &str = "business area";

    pub const DRIVER_NAME: &str = "driver name";
    pub const SUPERVISOR_NAME: &str = "supervisor name";

    /// Labels that identify the ALLOPS roster header
    pub const ALLOPS: [&str; 5] = [
        PREFERRED_FIRST_NAME,
        LEGAL_LAST_NAME,
        COLLEAGUE_ID,
        MANAGER_NAME,
        BUSINESS_AREA,
    ];

    /// Labels that identify the V2 "Data" sheet header
    pub const V2: [&str; 2] = [DRIVER_NAME, SUPERVISOR_NAME];
}

/// Normalized column label -> zero-based column index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    /// Build a candidate map from one row.
    /// Blank cells are ignored; a repeated label keeps its last column.
    pub fn from_row(row: &[String]) -> Self {
        let mut columns = HashMap::new();
        for (index, value) in row.iter().enumerate() {
            let label = normalize(value);
            if !label.is_empty() {
                columns.insert(label, index);
            }
        }
        Self { columns }
    }

    /// Column for a label, compared in normalized form
    pub fn get(&self, label: &str) -> Option<usize> {
        self.columns.get(&normalize(label)).copied()
    }

    /// Column for a label, or `MissingColumn`
    pub fn require(&self, label: &str) -> Result<usize, RosterError> {
        self.get(label).ok_or_else(|| RosterError::MissingColumn {
            label: normalize(label),
        })
    }

    pub fn contains_all(&self, labels: &[&str]) -> bool {
        labels.iter().all(|label| self.get(label).is_some())
    }

    /// Labels sorted by column
    pub fn columns(&self) -> Vec<(&str, usize)> {
        let mut columns: Vec<_> = self
            .columns
            .iter()
            .map(|(label, index)| (label.as_str(), *index))
            .collect();
        columns.sort_by_key(|(_, index)| *index);
        columns
    }

}

/// A detected header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    pub headers: HeaderMap,
    /// Zero-based row index within the grid
    pub row_index: usize,
}

/// Find the first row (top to bottom) that carries every required label.
///
/// Leading banner rows and any column order are tolerated. Scanning stops at
/// the first qualifying row.
pub fn find_header_row(
    grid: &[Row],
    sheet: &str,
    required: &[&str],
) -> Result<HeaderMatch, RosterError> {
    for (row_index, row) in grid.iter().enumerate() {
        let headers = HeaderMap::from_row(row);
        if headers.contains_all(required) {
            log::debug!("Header row for {:?} found at row {}", sheet, row_index + 1);
            return Ok(HeaderMatch { headers, row_index });
        }
    }

    Err(RosterError::HeaderNotFound {
        sheet: sheet.to_string(),
        required: required.iter().map(|label| normalize(label)).collect(),
    })
}

/// The ALLOPS layout always has the manager-name column left of business area.
/// Anything else means the header was matched on a different report format.
pub fn assert_allops_layout(headers: &HeaderMap) -> Result<(), RosterError> {
    let manager_column = headers.require(labels::MANAGER_NAME)?;
    let business_area_column = headers.require(labels::BUSINESS_AREA)?;

    if manager_column >= business_area_column {
        return Err(RosterError::StructuralAssertion {
            manager_column,
            business_area_column,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_header_after_banner_rows() {
        let grid = vec![
            row(&["Workforce Report"]),
            row(&[]),
            row(&["", "Driver Name", "", "Supervisor Name"]),
            row(&["", "Doe, Jane", "", "Bob Jones"]),
        ];

        let found = find_header_row(&grid, "Data", &labels::V2).unwrap();

        assert_eq!(found.row_index, 2);
        assert_eq!(found.headers.get(labels::DRIVER_NAME), Some(1));
        assert_eq!(found.headers.get(labels::SUPERVISOR_NAME), Some(3));
    }

    #[test]
    fn test_labels_matched_in_any_order_and_case() {
        let grid = vec![row(&["SUPERVISOR\nNAME", " driver\u{a0}name "])];

        let found = find_header_row(&grid, "Data", &labels::V2).unwrap();

        assert_eq!(found.row_index, 0);
        assert_eq!(found.headers.get("Supervisor Name"), Some(0));
        assert_eq!(found.headers.get("Driver Name"), Some(1));
    }

    #[test]
    fn test_first_qualifying_row_wins() {
        let grid = vec![
            row(&["Driver Name", "Supervisor Name"]),
            row(&["Supervisor Name", "Driver Name"]),
        ];

        let found = find_header_row(&grid, "Data", &labels::V2).unwrap();

        assert_eq!(found.row_index, 0);
        assert_eq!(found.headers.get(labels::DRIVER_NAME), Some(0));
    }

    #[test]
    fn test_duplicate_label_keeps_last_column() {
        let headers = HeaderMap::from_row(&row(&["Driver Name", "Driver Name", "Supervisor Name"]));
        assert_eq!(headers.get(labels::DRIVER_NAME), Some(1));
    }

    #[test]
    fn test_header_not_found() {
        let grid = vec![row(&["Driver Name"]), row(&["Supervisor"])];

        let err = find_header_row(&grid, "Data", &labels::V2).unwrap_err();

        assert_eq!(
            err,
            RosterError::HeaderNotFound {
                sheet: "Data".to_string(),
                required: vec!["driver name".to_string(), "supervisor name".to_string()],
            }
        );
    }

    #[test]
    fn test_allops_layout_ok() {
        let headers = HeaderMap::from_row(&row(&[
            "Preferred First Name",
            "Legal Last Name",
            "Colleague ID",
            "Manager - Name",
            "Business Area",
        ]));
        assert!(assert_allops_layout(&headers).is_ok());
    }

    #[test]
    fn test_allops_layout_violation() {
        let headers = HeaderMap::from_row(&row(&[
            "Business Area",
            "Preferred First Name",
            "Legal Last Name",
            "Colleague ID",
            "Manager - Name",
        ]));

        let err = assert_allops_layout(&headers).unwrap_err();

        assert_eq!(
            err,
            RosterError::StructuralAssertion {
                manager_column: 4,
                business_area_column: 0,
            }
        );
    }

    #[test]
    fn test_columns_sorted_by_index() {
        let headers = HeaderMap::from_row(&row(&["B", "", "a"]));
        assert_eq!(headers.columns(), vec![("b", 0), ("a", 2)]);
    }
}
