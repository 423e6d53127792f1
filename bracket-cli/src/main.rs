//! Bracket CLI - Command-line interface
//!
//! Commands:
//! - rounds: Print the round structure of a format
//! - counterpicks: Print which rounds use counterpick selection
//! - generate: Create a blank elimination bracket as tournament JSON
//! - report: Record a match result in a tournament JSON
//! - layout: Render a stage as a bracket
//! - placements: Resolve final standings

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod common;
mod generate_cmd;
mod layout_cmd;
mod placements_cmd;
mod report_cmd;
mod rounds_cmd;

use generate_cmd::GenerateArgs;
use layout_cmd::LayoutArgs;
use placements_cmd::PlacementsArgs;
use report_cmd::ReportArgs;
use rounds_cmd::{CounterpickArgs, RoundsArgs};

#[derive(Parser)]
#[command(name = "bracket")]
#[command(about = "Tournament bracket topology and standings engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the round structure of a format
    Rounds(RoundsArgs),
    /// Print the counterpick round indices of a format
    Counterpicks(CounterpickArgs),
    /// Create a blank elimination bracket
    Generate(GenerateArgs),
    /// Record a match result and advance the players
    Report(ReportArgs),
    /// Render a stage as a bracket
    Layout(LayoutArgs),
    /// Resolve final placements
    Placements(PlacementsArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rounds(args) => rounds_cmd::run_rounds(args),
        Commands::Counterpicks(args) => rounds_cmd::run_counterpicks(args),
        Commands::Generate(args) => generate_cmd::run(args),
        Commands::Report(args) => report_cmd::run(args),
        Commands::Layout(args) => layout_cmd::run(args),
        Commands::Placements(args) => placements_cmd::run(args),
    }
}
