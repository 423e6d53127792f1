//! Report command - record a match result in a tournament file

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use bracket_core::{Side, TournamentStatus};

use crate::common::{load_tournament, save_tournament};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum WinnerChoice {
    /// The first slot of the match
    One,
    /// The second slot of the match
    Two,
}

#[derive(Args)]
pub struct ReportArgs {
    /// Tournament JSON file, updated in place
    #[arg(long, value_name = "FILE")]
    pub tournament: PathBuf,

    /// Match id, e.g. R1.2 or GF1.1
    #[arg(long = "match", value_name = "ID")]
    pub match_id: String,

    /// Which slot won
    #[arg(long, value_enum)]
    pub winner: WinnerChoice,

    /// Games won by the winner
    #[arg(long, default_value = "2")]
    pub winner_score: u32,

    /// Games won by the loser
    #[arg(long, default_value = "0")]
    pub loser_score: u32,

    /// Mark the tournament complete after recording
    #[arg(long)]
    pub complete: bool,
}

/// Record one result, then write the tournament back
pub fn run(args: ReportArgs) -> Result<()> {
    if args.loser_score > args.winner_score {
        bail!(
            "Loser score {} is higher than winner score {}",
            args.loser_score,
            args.winner_score
        );
    }

    let mut tournament = load_tournament(&args.tournament)?;
    let side = match args.winner {
        WinnerChoice::One => Side::Opponent1,
        WinnerChoice::Two => Side::Opponent2,
    };

    tournament
        .record_result(&args.match_id, side, (args.winner_score, args.loser_score))
        .with_context(|| format!("Failed to record result for {}", args.match_id))?;

    if args.complete {
        tournament.status = TournamentStatus::Complete;
    }

    tracing::info!(
        "Recorded {} ({}-{})",
        args.match_id,
        args.winner_score,
        args.loser_score
    );

    save_tournament(&tournament, &args.tournament)
}
