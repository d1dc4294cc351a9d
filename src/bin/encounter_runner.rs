//! Headless Encounter Runner
//!
//! Plays many seeded encounters with random legal choices and prints an
//! outcome summary. Any turn-cap fault is reported with its diagnostics.

use wild_encounter::combat::{AnimalProfile, CombatOutcome, Loadout, SimpleBody};
use wild_encounter::core::config::CombatConfig;
use wild_encounter::core::error::{EncounterError, Result};
use wild_encounter::encounter::{Encounter, NoHooks, Participants, RandomPresenter};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Headless Encounter Runner - random-play batches for balance checks
#[derive(Parser, Debug)]
#[command(name = "encounter_runner")]
#[command(about = "Run seeded random-play encounters and summarize outcomes")]
struct Args {
    /// Animal preset: wolf, bear, boar or cougar
    #[arg(long, default_value = "wolf")]
    animal: String,

    /// Number of encounters to run
    #[arg(long, default_value_t = 1000)]
    runs: u64,

    /// First seed; run i uses seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Starting distance in meters
    #[arg(long, default_value_t = 18.0)]
    distance: f32,

    /// Combat config TOML
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start without a spear
    #[arg(long)]
    unarmed: bool,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// Result of a single run
#[derive(Serialize, Debug, Clone)]
struct RunResult {
    seed: u64,
    outcome: Option<CombatOutcome>,
    turns: u32,
    player_vitality: f32,
    animal_vitality: f32,
    fault: Option<String>,
}

/// JSON output structure
#[derive(Serialize, Debug)]
struct Summary {
    animal: String,
    runs: u64,
    outcomes: BTreeMap<String, u64>,
    mean_turns: f32,
    max_turns: u32,
    faults: Vec<RunResult>,
}

fn run_one(animal: &AnimalProfile, args: &Args, config: &CombatConfig, seed: u64) -> RunResult {
    let mut animal_body = animal.body();
    let mut player_body = SimpleBody::human(100.0, 70.0);
    let mut loadout = if args.unarmed {
        Loadout::new().with_stones(3)
    } else {
        Loadout::hunter()
    };

    let participants = Participants::new(animal, &mut animal_body, &mut player_body, &mut loadout);
    let encounter = Encounter::new(
        participants,
        config.clone(),
        ChaCha8Rng::seed_from_u64(seed),
        args.distance,
    );
    let mut presenter = RandomPresenter::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));

    match encounter.run(&mut presenter, &mut NoHooks) {
        Ok(report) => RunResult {
            seed,
            outcome: Some(report.outcome),
            turns: report.turns,
            player_vitality: report.final_snapshot.player_vitality,
            animal_vitality: report.final_snapshot.animal_vitality,
            fault: None,
        },
        Err(EncounterError::TurnCapExceeded(diagnostics)) => RunResult {
            seed,
            outcome: None,
            turns: diagnostics.turn_count,
            player_vitality: if diagnostics.player_alive { 1.0 } else { 0.0 },
            animal_vitality: if diagnostics.animal_alive { 1.0 } else { 0.0 },
            fault: Some(diagnostics.to_string()),
        },
        Err(e) => RunResult {
            seed,
            outcome: None,
            turns: 0,
            player_vitality: 0.0,
            animal_vitality: 0.0,
            fault: Some(e.to_string()),
        },
    }
}

fn summarize(animal: &str, results: &[RunResult]) -> Summary {
    let mut outcomes = BTreeMap::new();
    for outcome in CombatOutcome::all() {
        outcomes.insert(format!("{:?}", outcome), 0);
    }
    for result in results {
        if let Some(outcome) = result.outcome {
            *outcomes.entry(format!("{:?}", outcome)).or_insert(0) += 1;
        }
    }

    let total_turns: u64 = results.iter().map(|r| r.turns as u64).sum();
    Summary {
        animal: animal.to_string(),
        runs: results.len() as u64,
        outcomes,
        mean_turns: if results.is_empty() {
            0.0
        } else {
            total_turns as f32 / results.len() as f32
        },
        max_turns: results.iter().map(|r| r.turns).max().unwrap_or(0),
        faults: results.iter().filter(|r| r.fault.is_some()).cloned().collect(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("wild_encounter=warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => CombatConfig::load(path)?,
        None => CombatConfig::default(),
    };

    let Some(animal) = AnimalProfile::from_name(&args.animal) else {
        eprintln!(
            "Unknown animal '{}'. Choose one of: {}",
            args.animal,
            AnimalProfile::preset_names().join(", ")
        );
        std::process::exit(2);
    };

    let results: Vec<RunResult> = (0..args.runs)
        .into_par_iter()
        .map(|i| run_one(&animal, &args, &config, args.seed.wrapping_add(i)))
        .collect();
    let summary = summarize(&animal.name, &results);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("=== {} x{} ===", summary.animal, summary.runs);
        for (outcome, count) in &summary.outcomes {
            println!("  {:<20} {:>6}", outcome, count);
        }
        println!("  mean turns {:.1}, longest {}", summary.mean_turns, summary.max_turns);
        for fault in &summary.faults {
            println!("  FAULT seed {}: {}", fault.seed, fault.fault.as_deref().unwrap_or(""));
        }
    }

    if !summary.faults.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
