//! Write the validated workbook: copied sheets, corrections, master list

use anyhow::{Context, Result};
use calamine::{Data, ExcelDateTime};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use super::reader::SheetData;
use crate::roster::{Correction, MasterRow, UnmatchedRow};

/// Master list header, row 1 of the generated sheet
const MASTER_HEADERS: [&str; 4] = ["Colleague ID", "First Name", "Last Name", "Supervisor Name"];

const UNMATCHED_HEADERS: [&str; 3] = ["Row", "Driver Name", "Supervisor Name"];

/// Everything that goes into the output file
#[derive(Debug, Clone)]
pub struct OutputWorkbook<'a> {
    /// Sheets of the V2 workbook, in order
    pub sheets: &'a [SheetData],
    /// Sheet the corrections apply to
    pub corrected_sheet: &'a str,
    pub corrections: &'a [Correction],
    pub master_sheet: &'a str,
    pub master_list: &'a [MasterRow],
    /// Optional unmatched-row report sheet
    pub unmatched: Option<(&'a str, &'a [UnmatchedRow])>,
}

impl OutputWorkbook<'_> {
    /// Generated sheets replace any existing sheet of the same name
    fn is_generated(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.master_sheet)
            || self
                .unmatched
                .is_some_and(|(sheet, _)| name.eq_ignore_ascii_case(sheet))
    }
}

/// Number formats for copied date and duration cells
struct DateFormats {
    date: Format,
    datetime: Format,
    duration: Format,
}

impl DateFormats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format("yyyy-mm-dd"),
            datetime: Format::new().set_num_format("yyyy-mm-dd hh:mm:ss"),
            duration: Format::new().set_num_format("[h]:mm:ss"),
        }
    }

    fn for_value(&self, dt: &ExcelDateTime) -> &Format {
        if dt.is_duration() {
            &self.duration
        } else if dt.as_f64().fract() == 0.0 {
            &self.date
        } else {
            &self.datetime
        }
    }
}

/// Build the output workbook in memory as `.xlsx` bytes
pub fn build_output_workbook(output: &OutputWorkbook<'_>) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let date_formats = DateFormats::new();

    for sheet in output.sheets {
        if output.is_generated(&sheet.name) {
            log::debug!("Replacing existing sheet {:?}", sheet.name);
            continue;
        }

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        for (row, col, value) in sheet.cells() {
            write_value(worksheet, to_row(row)?, to_col(col)?, value, &date_formats)?;
        }

        if sheet.name == output.corrected_sheet {
            for correction in output.corrections {
                worksheet.write_string(
                    to_row(correction.row)?,
                    to_col(correction.column)?,
                    &correction.value,
                )?;
            }
        }
    }

    create_master_sheet(&mut workbook, output.master_sheet, output.master_list)?;

    if let Some((name, rows)) = output.unmatched {
        create_unmatched_sheet(&mut workbook, name, rows)?;
    }

    workbook
        .save_to_buffer()
        .context("Failed to build output workbook")
}

fn create_master_sheet(workbook: &mut Workbook, name: &str, rows: &[MasterRow]) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;
    write_header(sheet, &MASTER_HEADERS)?;

    for (idx, record) in rows.iter().enumerate() {
        let row = to_row(idx + 1)?;
        sheet.write_string(row, 0, &record.colleague_id)?;
        sheet.write_string(row, 1, &record.first_name)?;
        sheet.write_string(row, 2, &record.last_name)?;
        sheet.write_string(row, 3, &record.manager_name)?;
    }

    sheet.autofit();
    Ok(())
}

fn create_unmatched_sheet(
    workbook: &mut Workbook,
    name: &str,
    rows: &[UnmatchedRow],
) -> Result<()> {
    let sheet = workbook.add_worksheet();
    sheet.set_name(name)?;
    write_header(sheet, &UNMATCHED_HEADERS)?;

    for (idx, unmatched) in rows.iter().enumerate() {
        let row = to_row(idx + 1)?;
        // 1-based sheet row, as shown in Excel
        sheet.write_number(row, 0, (unmatched.row + 1) as f64)?;
        sheet.write_string(row, 1, &unmatched.driver_name)?;
        sheet.write_string(row, 2, &unmatched.supervisor_name)?;
    }

    sheet.autofit();
    Ok(())
}

fn write_header(sheet: &mut Worksheet, headers: &[&str]) -> Result<()> {
    let bold = Format::new().set_bold();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, to_col(col)?, *header, &bold)?;
    }
    Ok(())
}

fn write_value(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Data,
    date_formats: &DateFormats,
) -> Result<()> {
    match value {
        Data::Empty => { /* Leave cell empty */ }
        Data::String(s) => { ws.write_string(row, col, s)?; }
        Data::Int(i) => { ws.write_number(row, col, *i as f64)?; }
        Data::Float(f) => { ws.write_number(row, col, *f)?; }
        Data::Bool(b) => { ws.write_boolean(row, col, *b)?; }
        Data::DateTime(dt) => {
            ws.write_number_with_format(row, col, dt.as_f64(), date_formats.for_value(dt))?;
        }
        other => { ws.write_string(row, col, other.to_string())?; }
    }
    Ok(())
}

fn to_row(row: usize) -> Result<u32> {
    u32::try_from(row).with_context(|| format!("Row {} is out of range", row))
}

fn to_col(col: usize) -> Result<u16> {
    u16::try_from(col).with_context(|| format!("Column {} is out of range", col))
}
