//! Command-line interface

pub mod commands;

use clap::{Parser, Subcommand};

use commands::headers::HeadersCommands;
use commands::reconcile::ReconcileCommands;

#[derive(Parser)]
#[command(
    name = "roster-cli",
    version,
    about = "Reconcile V2 driver sheets against the ALLOPS roster"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Correct supervisor names and build the deduplicated master list
    Reconcile(ReconcileCommands),
    /// Show where the header row of a sheet is detected
    Headers(HeadersCommands),
}
