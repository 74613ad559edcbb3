//! Excel I/O around the reconciliation core

mod reader;
mod writer;

pub use reader::{SheetData, open_xlsx, read_all_sheets, read_sheet};
pub use writer::{OutputWorkbook, build_output_workbook};
