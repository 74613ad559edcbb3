//! `headers` command arguments

mod handler;

use std::path::PathBuf;

use clap::Args;

pub use handler::handle_headers_command;

#[derive(Args, Debug)]
pub struct HeadersCommands {
    /// Workbook to inspect
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,

    /// Sheet name (default: first sheet)
    #[arg(long)]
    pub sheet: Option<String>,

    /// Required header label (repeatable)
    #[arg(long = "label", value_name = "LABEL", required = true)]
    pub labels: Vec<String>,
}
