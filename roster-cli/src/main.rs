mod cli;
mod config;
mod excel;
mod output;
mod report;
mod roster;

use anyhow::Result;
use clap::Parser;
use colored::*;
use env_logger::Env;

use cli::{Cli, Commands};
use cli::commands::headers::handle_headers_command;
use cli::commands::reconcile::handle_reconcile_command;

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Reconcile(args) => handle_reconcile_command(args),
        Commands::Headers(args) => handle_headers_command(args),
    }
}
