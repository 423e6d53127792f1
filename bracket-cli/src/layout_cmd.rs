//! Layout command - render the elimination stage of a tournament
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_config(), select_stage(), print_layout()
//! - Level 3: print_rounds(), print_match()
//! - Level 4: translator selection

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};

use bracket_core::{
    Format, InMemoryTournament, Match, Player, Side, StageType, TournamentStatus, TournamentView,
};
use bracket_layout::lang::match_status_label;
use bracket_layout::{
    match_caption, slot_display, EnglishTranslator, KeyTranslator, LaidOutMatch, OriginPlacement,
    RoundLayout, StageLayout, Translate, Viewer, ViewerConfig,
};

use crate::common::{load_tournament, print_json, read_file};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlacementChoice {
    Before,
    After,
    None,
}

#[derive(Args)]
pub struct LayoutArgs {
    /// Tournament JSON file
    #[arg(long, value_name = "FILE")]
    pub tournament: PathBuf,

    /// Viewer config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where to show a participant's origin (overrides the config file)
    #[arg(long, value_enum)]
    pub origin_placement: Option<PlacementChoice>,

    /// Hide origin hints in undetermined slots
    #[arg(long)]
    pub hide_origins: bool,

    /// Show the best-of count on its own line
    #[arg(long)]
    pub separate_best_of: bool,

    /// The first round only holds byes and is not drawn
    #[arg(long)]
    pub skip_first_round: bool,

    /// Print translation keys instead of English text
    #[arg(long)]
    pub keys: bool,

    /// Output the layout as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run layout command
///
/// 1. Load the tournament and the viewer config
/// 2. Pick the stage to draw
/// 3. Lay it out and print it
pub fn run(args: LayoutArgs) -> Result<()> {
    let tournament = load_tournament(&args.tournament)?;
    let config = load_config(&args)?;
    let (stage_type, matches) = select_stage(&tournament)?;

    let translator = translator(args.keys);
    let viewer = Viewer::new(config, translator).skipping_first_round(args.skip_first_round);

    let layout = viewer
        .layout_stage(stage_type, &matches, tournament.players())
        .with_context(|| format!("Failed to lay out {}", args.tournament.display()))?;

    tracing::info!(
        "Laid out {:?} stage: {} brackets, {} matches",
        layout.stage_type,
        layout.brackets.len(),
        layout.matches().count()
    );

    if args.json {
        print_json(&layout)
    } else {
        print_layout(&layout, &viewer, tournament.players());
        Ok(())
    }
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_config(args: &LayoutArgs) -> Result<ViewerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let content = read_file(path, "viewer config")?;
            serde_json::from_str::<ViewerConfig>(&content)
                .with_context(|| format!("Failed to parse viewer config: {}", path.display()))?
        }
        None => ViewerConfig::default(),
    };

    if let Some(choice) = args.origin_placement {
        config = config.with_origin_placement(match choice {
            PlacementChoice::Before => OriginPlacement::Before,
            PlacementChoice::After => OriginPlacement::After,
            PlacementChoice::None => OriginPlacement::None,
        });
    }
    if args.hide_origins {
        config = config.with_slots_origin(false);
    }
    if args.separate_best_of {
        config = config.with_separated_child_count_label(true);
    }
    Ok(config)
}

/// The stage to draw and its matches. A Swiss tournament is drawn from its
/// elimination stage, the rounds after the Swiss rounds.
fn select_stage(tournament: &InMemoryTournament) -> Result<(StageType, Vec<Match>)> {
    match tournament.format() {
        Format::SingleElimination(_) => {
            Ok((StageType::SingleElimination, tournament.matches().to_vec()))
        }
        Format::DoubleElimination(_) => {
            Ok((StageType::DoubleElimination, tournament.matches().to_vec()))
        }
        Format::Swiss(_) => {
            if matches!(
                tournament.status(),
                TournamentStatus::Setup | TournamentStatus::StageOne
            ) {
                bail!("The Swiss stage has no bracket; run layout once the elimination stage starts");
            }
            let swiss_rounds = tournament.swiss_round_count();
            let playoffs: Vec<Match> = tournament
                .matches()
                .iter()
                .filter(|m| m.round_id > swiss_rounds)
                .cloned()
                .collect();
            Ok((StageType::SingleElimination, playoffs))
        }
    }
}

fn print_layout(layout: &StageLayout, viewer: &Viewer, players: &[Player]) {
    let t = viewer.translator();

    for bracket in &layout.brackets {
        let name = bracket
            .name
            .clone()
            .unwrap_or_else(|| format!("Group {}", bracket.group_id + 1));
        println!("\n=== {} ===", name);
        print_rounds(&bracket.rounds, viewer, players);
    }

    if !layout.finals.is_empty() {
        println!("\n=== Finals ===");
        for group in &layout.finals {
            print_rounds(&group.rounds, viewer, players);
        }
    }

    if !layout.consolation.is_empty() {
        println!("\n=== {} ===", t.translate("common.consolation", &[]));
        for m in &layout.consolation {
            print_match(m, viewer, players);
        }
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn print_rounds(rounds: &[RoundLayout], viewer: &Viewer, players: &[Player]) {
    for round in rounds {
        println!("-- {} --", round.name);
        for m in &round.matches {
            print_match(m, viewer, players);
        }
    }
}

fn print_match(m: &LaidOutMatch, viewer: &Viewer, players: &[Player]) {
    let t = viewer.translator();
    let caption = match_caption(m, viewer.config(), t);

    let mut header = caption
        .label
        .or_else(|| m.label.clone())
        .unwrap_or_else(|| m.raw.id.clone());
    if let Some(best_of) = caption.child_count_label {
        header = format!("{} ({})", header, best_of);
    }
    println!("  {} [{}]", header, match_status_label(m.raw.status, t));

    for side in [Side::Opponent1, Side::Opponent2] {
        let slot = slot_display(m, side, players, viewer.config(), t);
        let score = m
            .raw
            .opponent(side)
            .and_then(|p| p.score)
            .map(|s| format!("  {}", s))
            .unwrap_or_default();
        println!("    {}{}", slot.render(), score);
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn translator(keys: bool) -> &'static dyn Translate {
    if keys {
        &KeyTranslator
    } else {
        &EnglishTranslator
    }
}
