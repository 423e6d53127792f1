//! Placements command - resolve final standings
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_swiss_standings(), report_placements()
//! - Level 4: player name lookup

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use bracket_core::{Format, InMemoryTournament, Match, TournamentStatus, TournamentView};
use bracket_standings::{
    augment_standings, compute_final_standings, BaseStanding, PlacementMap, StandingsValues,
};

use crate::common::{load_tournament, print_json, read_file};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlacementsArgs {
    /// Tournament JSON file
    #[arg(long, value_name = "FILE")]
    pub tournament: PathBuf,

    /// Swiss standings JSON file (list of base standings, host order)
    #[arg(long, value_name = "FILE")]
    pub standings: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run placements command
///
/// 1. Load the tournament and, for Swiss, its standings
/// 2. Resolve placements
/// 3. Report them
pub fn run(args: PlacementsArgs) -> Result<()> {
    let tournament = load_tournament(&args.tournament)?;
    let standings = load_swiss_standings(&args, &tournament)?;

    let placements = compute_final_standings(&tournament, &standings);

    let placed: usize = placements.values().map(Vec::len).sum();
    tracing::info!(
        "Resolved {} of {} players into {} ranks",
        placed,
        tournament.players().len(),
        placements.len()
    );

    if args.json {
        print_json(&placements)
    } else {
        report_placements(&placements, &tournament);
        Ok(())
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Swiss standings with the history tiebreakers added. Only the Swiss
/// rounds' matches feed the tiebreakers.
fn load_swiss_standings(
    args: &PlacementsArgs,
    tournament: &InMemoryTournament,
) -> Result<Vec<StandingsValues>> {
    let Some(path) = &args.standings else {
        if matches!(tournament.format(), Format::Swiss(_))
            && matches!(
                tournament.status(),
                TournamentStatus::StageTwo | TournamentStatus::Complete
            )
        {
            tracing::warn!("No --standings given; players outside the top cut will be unranked");
        }
        return Ok(Vec::new());
    };

    let content = read_file(path, "standings")?;
    let base: Vec<BaseStanding> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse standings: {}", path.display()))?;

    let swiss_rounds = tournament.swiss_round_count();
    let swiss_matches: Vec<Match> = tournament
        .matches()
        .iter()
        .filter(|m| m.round_id <= swiss_rounds)
        .cloned()
        .collect();

    Ok(augment_standings(&base, &swiss_matches))
}

fn report_placements(placements: &PlacementMap, tournament: &InMemoryTournament) {
    println!("\n=== Final Placements ===");
    if placements.is_empty() {
        println!("(no placements yet)");
    }
    for (rank, players) in placements {
        let names: Vec<&str> = players
            .iter()
            .map(|id| player_name(tournament, id))
            .collect();
        println!("{:>3}. {}", rank, names.join(", "));
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn player_name<'a>(tournament: &'a InMemoryTournament, id: &'a str) -> &'a str {
    tournament.player(id).map_or(id, |p| p.name.as_str())
}
