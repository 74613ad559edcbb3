//! `reconcile` command arguments

mod handler;

use std::path::PathBuf;

use clap::{Args, ValueEnum};

pub use handler::handle_reconcile_command;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct ReconcileCommands {
    /// ALLOPS workforce file
    #[arg(long, value_name = "PATH")]
    pub allops: PathBuf,

    /// V2 Overlooked & Returned file
    #[arg(long, value_name = "PATH")]
    pub v2: PathBuf,

    /// Output workbook (overrides the config file)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Config file (default: ~/.config/roster-cli/config.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Compute and print the results without writing the workbook
    #[arg(long)]
    pub dry_run: bool,

    /// Add a sheet listing V2 rows with no roster match
    #[arg(long)]
    pub report_unmatched: bool,

    /// Also write V2 rows with no roster match to a CSV file
    #[arg(long, value_name = "PATH")]
    pub unmatched_csv: Option<PathBuf>,

    /// Summary format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
