//! Generate command - create a blank elimination bracket
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_players(), build_tournament()
//! - Level 4: option mapping

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};

use bracket_core::generate::{double_elimination, single_elimination};
use bracket_core::{
    Format, GenerateOptions, GrandFinal, InMemoryTournament, Player, PlayerId, TournamentStatus,
};

use crate::common::{print_json, read_file, save_tournament, FormatArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

/// Grand final shape on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GrandFinalChoice {
    None,
    Simple,
    Double,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub format: FormatArgs,

    /// Number of players (named "Player 1".."Player N")
    #[arg(long, default_value = "8")]
    pub players: usize,

    /// Player names, one per line, in seed order (overrides --players)
    #[arg(long, value_name = "FILE")]
    pub names: Option<PathBuf>,

    /// Single elimination: play a match for third place
    #[arg(long)]
    pub consolation_final: bool,

    /// Double elimination grand final
    #[arg(long, value_enum, default_value = "simple")]
    pub grand_final: GrandFinalChoice,

    /// Write the tournament JSON here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run generate command
///
/// 1. Resolve the format and the players
/// 2. Build the bracket for the elimination stage
/// 3. Save or print the tournament
pub fn run(args: GenerateArgs) -> Result<()> {
    let format = args.format.resolve()?;
    let players = load_players(&args)?;

    let tournament = build_tournament(format, players, &args)?;

    tracing::info!(
        "Generated {:?} bracket: {} players, {} matches",
        tournament.format.kind(),
        tournament.players.len(),
        tournament.matches.len()
    );

    match &args.output {
        Some(path) => {
            save_tournament(&tournament, path)?;
            tracing::info!("Saved to {}", path.display());
            Ok(())
        }
        None => print_json(&tournament),
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_players(args: &GenerateArgs) -> Result<Vec<Player>> {
    let players: Vec<Player> = match &args.names {
        Some(path) => read_file(path, "player names")?
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, name)| Player::new(format!("p{}", i + 1), name))
            .collect(),
        None => (1..=args.players)
            .map(|i| Player::new(format!("p{}", i), format!("Player {}", i)))
            .collect(),
    };

    if players.is_empty() {
        bail!("At least one player is needed");
    }
    Ok(players)
}

fn build_tournament(
    format: Format,
    players: Vec<Player>,
    args: &GenerateArgs,
) -> Result<InMemoryTournament> {
    let seeds: Vec<PlayerId> = players.iter().map(|p| p.id.clone()).collect();

    let matches = match format {
        Format::Swiss(_) => {
            bail!("Swiss pairings are made by the host round by round; generate supports elimination formats only")
        }
        Format::SingleElimination(settings) => {
            let mut options = GenerateOptions::default().with_child_count(settings.best_of);
            if args.consolation_final {
                options = options.with_consolation_final();
            }
            single_elimination(&seeds, &options)?
        }
        Format::DoubleElimination(settings) => {
            let options = GenerateOptions::default()
                .with_child_count(settings.best_of)
                .with_grand_final(grand_final(args.grand_final));
            double_elimination(&seeds, &options)?
        }
    };

    Ok(InMemoryTournament::new(format, players).with_matches(matches, TournamentStatus::StageOne))
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn grand_final(choice: GrandFinalChoice) -> GrandFinal {
    match choice {
        GrandFinalChoice::None => GrandFinal::None,
        GrandFinalChoice::Simple => GrandFinal::Simple,
        GrandFinalChoice::Double => GrandFinal::Double,
    }
}
