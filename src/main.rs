//! Wild Encounter - Entry Point
//!
//! Plays one encounter against an animal on the terminal. Actions are
//! picked by number or by id.

use wild_encounter::combat::{AnimalProfile, AttackTarget, Loadout, SimpleBody};
use wild_encounter::core::config::CombatConfig;
use wild_encounter::core::error::Result;
use wild_encounter::encounter::{
    CombatPhase, CombatPresenter, CombatSnapshot, Encounter, EncounterHooks, Participants,
    PlayerAction,
};

use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Face a wild animal on the terminal
#[derive(Parser, Debug)]
#[command(name = "wild-encounter")]
#[command(about = "Play a single combat encounter against a wild animal")]
struct Args {
    /// Animal to face: wolf, bear, boar or cougar
    #[arg(long, default_value = "wolf")]
    animal: String,

    /// Starting distance in meters
    #[arg(long, default_value_t = 18.0)]
    distance: f32,

    /// Random seed for a repeatable fight
    #[arg(long)]
    seed: Option<u64>,

    /// Combat config TOML (defaults to data/combat.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Carry meat into the fight (kg)
    #[arg(long, default_value_t = 0.0)]
    meat: f32,

    /// Start without a spear
    #[arg(long)]
    unarmed: bool,
}

/// Reads choices from stdin and prints everything to stdout
struct TerminalPresenter<R: BufRead> {
    input: R,
}

impl<R: BufRead> TerminalPresenter<R> {
    fn read_line(&mut self) -> String {
        let mut line = String::new();
        if let Err(e) = self.input.read_line(&mut line) {
            tracing::warn!("failed to read input: {}", e);
        }
        line.trim().to_string()
    }

    fn prompt(&mut self) -> String {
        print!("> ");
        if let Err(e) = io::stdout().flush() {
            tracing::warn!("failed to flush stdout: {}", e);
        }
        self.read_line()
    }
}

impl<R: BufRead> CombatPresenter for TerminalPresenter<R> {
    fn render(&mut self, _snapshot: &CombatSnapshot) {}

    fn choose_action(&mut self, snapshot: &CombatSnapshot, legal: &[PlayerAction]) -> String {
        println!();
        println!("{}", snapshot.status_line());
        for (i, action) in legal.iter().enumerate() {
            println!("  {:>2}. {:<24} [{}]", i + 1, action.label(), action.id());
        }
        let input = self.prompt();
        match input.parse::<usize>() {
            Ok(n) if (1..=legal.len()).contains(&n) => legal[n - 1].id().to_string(),
            _ => input,
        }
    }

    fn choose_target(&mut self, legal: &[AttackTarget]) -> String {
        println!("Aim for:");
        for (i, target) in legal.iter().enumerate() {
            println!("  {}. {}", i + 1, target.id());
        }
        let input = self.prompt();
        match input.parse::<usize>() {
            Ok(n) if (1..=legal.len()).contains(&n) => legal[n - 1].id().to_string(),
            _ => input,
        }
    }

    fn show_narrative(&mut self, phase: CombatPhase, text: &str) {
        match phase {
            CombatPhase::Outcome => println!("\n=== {} ===", text),
            _ => println!("{}", text),
        }
    }
}

/// Announces the carcass; the world that would own it lives elsewhere
struct CarcassNotice;

impl EncounterHooks for CarcassNotice {
    fn create_carcass(&mut self, animal: &AnimalProfile) {
        println!("The {} carcass ({:.0}kg) is yours to butcher.", animal.name, animal.weight_kg);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<CombatConfig> {
    match path {
        Some(path) => CombatConfig::load(path),
        None => {
            let default_path = PathBuf::from("data/combat.toml");
            if default_path.exists() {
                CombatConfig::load(default_path)
            } else {
                Ok(CombatConfig::default())
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("wild_encounter=warn")
        .init();

    let args = Args::parse();
    let config = load_config(args.config)?;

    let Some(animal) = AnimalProfile::from_name(&args.animal) else {
        eprintln!(
            "Unknown animal '{}'. Choose one of: {}",
            args.animal,
            AnimalProfile::preset_names().join(", ")
        );
        std::process::exit(2);
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, animal = %animal.name, "starting encounter");

    let mut animal_body = animal.body();
    let mut player_body = SimpleBody::human(100.0, 70.0);
    let mut loadout = if args.unarmed {
        Loadout::new().with_stones(3)
    } else {
        Loadout::hunter()
    }
    .with_meat(args.meat);

    println!("\n=== WILD ENCOUNTER ===");
    println!("(seed {})", seed);

    let participants = Participants::new(&animal, &mut animal_body, &mut player_body, &mut loadout);
    let encounter = Encounter::new(
        participants,
        config,
        ChaCha8Rng::seed_from_u64(seed),
        args.distance,
    );

    let stdin = io::stdin();
    let mut presenter = TerminalPresenter {
        input: stdin.lock(),
    };
    let report = encounter.run(&mut presenter, &mut CarcassNotice)?;

    println!("Fight lasted {} turns.", report.turns);
    Ok(())
}
