//! Reconcile command handler

use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;

use super::{OutputFormat, ReconcileCommands};
use crate::config::Config;
use crate::excel::{
    OutputWorkbook, SheetData, build_output_workbook, open_xlsx, read_all_sheets, read_sheet,
};
use crate::output::{PendingFile, persist_all};
use crate::report::build_unmatched_csv;
use crate::roster::{self, Correction, KeyCollision, MasterRow, NamedGrid, RunOutcome};

/// Run the full ALLOPS -> V2 reconciliation
pub fn handle_reconcile_command(args: ReconcileCommands) -> Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let output_path = args.output.clone().unwrap_or_else(|| config.output.path.clone());

    // ALLOPS roster
    let mut allops = open_xlsx(&args.allops).context("Failed to open ALLOPS workbook")?;
    let allops_sheet = match &config.allops.sheet {
        Some(name) => allops.find_sheet(name),
        None => allops.first_sheet_name(),
    }
    .with_context(|| format!("ALLOPS workbook {}", args.allops.display()))?;
    let allops_grid = read_sheet(&mut allops, &allops_sheet)?.to_grid();

    // V2 sheets; all of them are carried into the output
    let mut v2 = open_xlsx(&args.v2).context("Failed to open V2 workbook")?;
    let v2_sheet = v2
        .find_sheet(&config.v2.sheet)
        .with_context(|| format!("V2 workbook {}", args.v2.display()))?;
    let v2_sheets = read_all_sheets(&mut v2)?;
    let v2_grid = v2_sheets
        .iter()
        .find(|sheet| sheet.name == v2_sheet)
        .map(SheetData::to_grid)
        .with_context(|| format!("Sheet {:?} disappeared while reading", v2_sheet))?;

    let outcome = roster::run(
        NamedGrid {
            sheet: &allops_sheet,
            grid: &allops_grid,
        },
        NamedGrid {
            sheet: &v2_sheet,
            grid: &v2_grid,
        },
    )
    .context("Failed to reconcile ALLOPS and V2")?;

    for collision in outcome.index.collisions() {
        log::debug!(
            "Name collision {:?}: row {} ({}) replaced {}",
            collision.key,
            collision.row_index + 1,
            collision.winning_id,
            collision.replaced_id
        );
    }

    let result = &outcome.reconciliation;

    if !args.dry_run {
        let unmatched_sheet = args
            .report_unmatched
            .then(|| (config.output.unmatched_sheet.as_str(), result.unmatched.as_slice()));

        // Build everything before touching the filesystem
        let workbook = build_output_workbook(&OutputWorkbook {
            sheets: &v2_sheets,
            corrected_sheet: &v2_sheet,
            corrections: &result.corrections,
            master_sheet: &config.output.master_sheet,
            master_list: &result.master_list,
            unmatched: unmatched_sheet,
        })?;

        let mut files = vec![PendingFile {
            kind: "Excel file",
            path: &output_path,
            bytes: workbook,
        }];
        if let Some(csv_path) = &args.unmatched_csv {
            files.push(PendingFile {
                kind: "CSV file",
                path: csv_path,
                bytes: build_unmatched_csv(&result.unmatched)?,
            });
        }

        persist_all(files).context("Failed to write output")?;
    }

    let summary = Summary {
        allops_sheet: &allops_sheet,
        v2_sheet: &v2_sheet,
        allops_header_row: outcome.allops_header_row + 1,
        v2_header_row: outcome.v2_header_row + 1,
        roster_records: outcome.index.len(),
        collisions: outcome.index.collisions(),
        master_list: &result.master_list,
        corrections: &result.corrections,
        unmatched: result.unmatched.len(),
        skipped_rows: result.skipped_rows,
        output: (!args.dry_run).then_some(output_path.as_path()),
    };

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => print_summary(&summary, &outcome),
    }

    Ok(())
}

/// Run summary; header rows are 1-based
#[derive(Debug, Serialize)]
struct Summary<'a> {
    allops_sheet: &'a str,
    v2_sheet: &'a str,
    allops_header_row: usize,
    v2_header_row: usize,
    roster_records: usize,
    collisions: &'a [KeyCollision],
    master_list: &'a [MasterRow],
    corrections: &'a [Correction],
    unmatched: usize,
    skipped_rows: usize,
    output: Option<&'a Path>,
}

fn print_summary(summary: &Summary<'_>, outcome: &RunOutcome) {
    let check = "✔".green().bold();

    println!(
        "{} Data validated ({} roster records, ALLOPS header row {}, {} header row {})",
        check,
        summary.roster_records,
        summary.allops_header_row,
        summary.v2_sheet,
        summary.v2_header_row
    );
    println!(
        "{} Supervisor names corrected ({})",
        check,
        summary.corrections.len()
    );
    println!(
        "{} Master list deduplicated ({} colleagues)",
        check,
        summary.master_list.len()
    );

    if summary.unmatched > 0 {
        println!(
            "{} {} V2 rows matched no roster entry",
            "!".yellow().bold(),
            summary.unmatched
        );
    }
    if !summary.collisions.is_empty() {
        println!(
            "{} {} roster rows share a name with an earlier row (later row kept)",
            "!".yellow().bold(),
            summary.collisions.len()
        );
    }

    match summary.output {
        Some(path) => println!("{} Output: {}", check, path.display().to_string().cyan()),
        None => {
            for correction in summary.corrections {
                println!(
                    "  Row {}: {} -> {}",
                    correction.row + 1,
                    display_value(&correction.previous).dimmed(),
                    correction.value
                );
            }
            println!(
                "{} Dry run: no files written (supervisor column {})",
                "-".dimmed(),
                outcome.v2_columns.supervisor_name + 1
            );
        }
    }
}

fn display_value(value: &str) -> String {
    if value.is_empty() {
        "(blank)".to_string()
    } else {
        format!("{:?}", value)
    }
}
