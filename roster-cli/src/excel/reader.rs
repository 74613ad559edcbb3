//! Read workbook sheets into string grids

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, Xlsx, open_workbook};

use crate::roster::{Grid, RosterError};

/// An opened `.xlsx` file
pub struct WorkbookFile {
    path: PathBuf,
    workbook: Xlsx<BufReader<File>>,
}

/// A sheet's used range, kept with its name
#[derive(Debug, Clone)]
pub struct SheetData {
    pub name: String,
    pub range: Range<Data>,
}

impl SheetData {
    /// Origin of the used range as zero-based (row, column)
    pub fn origin(&self) -> (usize, usize) {
        self.range
            .start()
            .map(|(row, col)| (row as usize, col as usize))
            .unwrap_or((0, 0))
    }

    /// Non-empty cells with absolute zero-based coordinates
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Data)> {
        let (row_offset, col_offset) = self.origin();
        self.range.rows().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| !matches!(value, Data::Empty))
                .map(move |(c, value)| (row_offset + r, col_offset + c, value))
        })
    }

    /// Grid whose indices are absolute sheet coordinates.
    ///
    /// Rows and columns before the used range are padded with blanks.
    pub fn to_grid(&self) -> Grid {
        let (row_offset, col_offset) = self.origin();
        let mut grid: Grid = vec![Vec::new(); row_offset];

        for row in self.range.rows() {
            let mut cells = vec![String::new(); col_offset];
            cells.extend(row.iter().map(cell_to_string));
            grid.push(cells);
        }
        grid
    }
}

/// Open an `.xlsx` workbook
pub fn open_xlsx(path: &Path) -> Result<WorkbookFile> {
    let workbook: Xlsx<_> = open_workbook(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    Ok(WorkbookFile {
        path: path.to_path_buf(),
        workbook,
    })
}

impl WorkbookFile {
    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    /// Name of the first sheet in workbook order
    pub fn first_sheet_name(&self) -> Result<String, RosterError> {
        self.workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| RosterError::SheetNotFound {
                sheet: "<first sheet>".to_string(),
            })
    }

    /// Actual name of a sheet, matched case-insensitively as Excel does
    pub fn find_sheet(&self, name: &str) -> Result<String, RosterError> {
        self.workbook
            .sheet_names()
            .into_iter()
            .find(|sheet| sheet.eq_ignore_ascii_case(name))
            .ok_or_else(|| RosterError::SheetNotFound {
                sheet: name.to_string(),
            })
    }
}

/// Read one sheet's used range
pub fn read_sheet(workbook: &mut WorkbookFile, sheet: &str) -> Result<SheetData> {
    let range = workbook.workbook.worksheet_range(sheet).with_context(|| {
        format!(
            "Failed to read sheet {:?} from {}",
            sheet,
            workbook.path.display()
        )
    })?;

    Ok(SheetData {
        name: sheet.to_string(),
        range,
    })
}

/// Read every sheet in workbook order
pub fn read_all_sheets(workbook: &mut WorkbookFile) -> Result<Vec<SheetData>> {
    let names = workbook.sheet_names();
    names.iter().map(|name| read_sheet(workbook, name)).collect()
}

/// Cell text as a user would see it in a plain cell
pub fn cell_to_string(value: &Data) -> String {
    match value {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Check if it's a whole number
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::Error(_) | Data::Empty => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn write_fixture(path: &Path) {
        let mut workbook = Workbook::new();

        let summary = workbook.add_worksheet();
        summary.set_name("Summary").unwrap();
        summary.write_string(0, 0, "overview").unwrap();

        let data = workbook.add_worksheet();
        data.set_name("Data").unwrap();
        // Used range starts at C3
        data.write_string(2, 2, "Driver Name").unwrap();
        data.write_string(2, 3, "Supervisor Name").unwrap();
        data.write_string(3, 2, "Doe, Jane").unwrap();
        data.write_number(3, 3, 42.0).unwrap();
        data.write_number(4, 3, 1.5).unwrap();
        data.write_boolean(4, 2, true).unwrap();

        workbook.save(path).unwrap();
    }

    #[test]
    fn test_grid_is_padded_to_absolute_coordinates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.xlsx");
        write_fixture(&path);

        let mut workbook = open_xlsx(&path).unwrap();
        let sheet = read_sheet(&mut workbook, "Data").unwrap();
        let grid = sheet.to_grid();

        assert_eq!(sheet.origin(), (2, 2));
        assert_eq!(grid.len(), 5);
        assert!(grid[0].is_empty());
        assert_eq!(grid[2][2], "Driver Name");
        assert_eq!(grid[3][2], "Doe, Jane");
        assert_eq!(grid[3][3], "42");
        assert_eq!(grid[4][2], "true");
        assert_eq!(grid[4][3], "1.5");
    }

    #[test]
    fn test_sheet_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.xlsx");
        write_fixture(&path);

        let workbook = open_xlsx(&path).unwrap();

        assert_eq!(workbook.first_sheet_name().unwrap(), "Summary");
        assert_eq!(workbook.find_sheet("data").unwrap(), "Data");
        assert_eq!(
            workbook.find_sheet("Missing").unwrap_err(),
            RosterError::SheetNotFound {
                sheet: "Missing".to_string()
            }
        );
    }

    #[test]
    fn test_cells_report_absolute_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixture.xlsx");
        write_fixture(&path);

        let mut workbook = open_xlsx(&path).unwrap();
        let sheet = read_sheet(&mut workbook, "Data").unwrap();
        let positions: Vec<_> = sheet.cells().map(|(r, c, _)| (r, c)).collect();

        assert_eq!(positions, vec![(2, 2), (2, 3), (3, 2), (3, 3), (4, 2), (4, 3)]);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_xlsx(&dir.path().join("nope.xlsx")).err().unwrap();
        assert!(err.to_string().contains("Failed to open Excel file"));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Float(7.0)), "7");
        assert_eq!(cell_to_string(&Data::Int(-3)), "-3");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
