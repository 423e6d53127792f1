//! Rounds commands - inspect the round structure of a format
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run_rounds(), run_counterpicks() - orchestration
//! - Level 2: report_rounds(), report_counterpicks()
//! - Level 4: game type formatting

use anyhow::{bail, Result};
use clap::Args;

use bracket_core::{
    compute_counterpick_round_indices, create_rounds, create_rounds_with_counterpicks, GameType,
    Round,
};

use crate::common::{print_json, FormatArgs};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RoundsArgs {
    #[command(flatten)]
    pub format: FormatArgs,

    /// Number of players
    #[arg(long, default_value = "8")]
    pub players: u32,

    /// Rounds (counted back from the finals) that use counterpick selection
    #[arg(long, default_value = "0")]
    pub counterpicks: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CounterpickArgs {
    #[command(flatten)]
    pub format: FormatArgs,

    /// Number of players
    #[arg(long, default_value = "8")]
    pub players: u32,

    /// Number of counterpick rounds wanted
    #[arg(long, default_value = "1")]
    pub rounds: u32,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Print the rounds a format needs for the given player count
pub fn run_rounds(args: RoundsArgs) -> Result<()> {
    let format = args.format.resolve()?;
    if args.players == 0 {
        bail!("--players must be at least 1");
    }

    let rounds = if args.counterpicks > 0 {
        create_rounds_with_counterpicks(args.players, &format, args.counterpicks)
    } else {
        create_rounds(args.players, &format)
    };

    tracing::info!(
        "{:?} for {} players: {} rounds",
        format.kind(),
        args.players,
        rounds.len()
    );

    if args.json {
        print_json(&rounds)
    } else {
        report_rounds(&rounds);
        Ok(())
    }
}

/// Print the counterpick round indices
pub fn run_counterpicks(args: CounterpickArgs) -> Result<()> {
    let format = args.format.resolve()?;
    if args.players == 0 {
        bail!("--players must be at least 1");
    }

    let indices = compute_counterpick_round_indices(args.rounds, args.players, &format);
    let rounds = create_rounds(args.players, &format);

    if args.json {
        print_json(&indices)
    } else {
        report_counterpicks(&indices, &rounds);
        Ok(())
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn report_rounds(rounds: &[Round]) {
    println!("\n=== Rounds ===");
    for (index, round) in rounds.iter().enumerate() {
        println!(
            "{:>3}  {:<24} Bo{:<3} {}",
            index,
            round.name,
            round.best_of_count(),
            game_types(&round.games)
        );
    }
}

fn report_counterpicks(indices: &[usize], rounds: &[Round]) {
    println!("\n=== Counterpick Rounds ===");
    if indices.is_empty() {
        println!("(none)");
    }
    for &index in indices {
        let name = rounds.get(index).map_or("?", |r| r.name.as_str());
        println!("{:>3}  {}", index, name);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// One letter per game: P for pool, C for counterpick
fn game_types(games: &[GameType]) -> String {
    games
        .iter()
        .map(|g| match g {
            GameType::Pool => 'P',
            GameType::Counterpick => 'C',
        })
        .collect()
}
