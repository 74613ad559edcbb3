//! Headers command handler

use anyhow::{Context, Result};
use colored::*;
use rust_xlsxwriter::utility::column_number_to_name;

use super::HeadersCommands;
use crate::excel::{open_xlsx, read_sheet};
use crate::roster::find_header_row;

/// Print the detected header row and its label -> column mapping
pub fn handle_headers_command(args: HeadersCommands) -> Result<()> {
    let mut workbook = open_xlsx(&args.file)?;
    let sheet = match &args.sheet {
        Some(name) => workbook.find_sheet(name),
        None => workbook.first_sheet_name(),
    }
    .with_context(|| format!("Workbook {}", args.file.display()))?;

    let grid = read_sheet(&mut workbook, &sheet)?.to_grid();
    let required: Vec<&str> = args.labels.iter().map(String::as_str).collect();

    let found = find_header_row(&grid, &sheet, &required)?;

    println!(
        "Header row for {}: {}",
        sheet.cyan(),
        (found.row_index + 1).to_string().bold()
    );
    for (label, index) in found.headers.columns() {
        let column = u16::try_from(index)
            .map(column_number_to_name)
            .unwrap_or_else(|_| format!("#{}", index + 1));
        println!("  {:>4}  {}", column, label);
    }

    Ok(())
}
