//! Read-only view of an encounter for the presentation layer

use crate::combat::{AnimalBehavior, CombatOutcome, CombatState, Zone};
use crate::core::types::{EncounterId, Meters, Turn};
use crate::encounter::Participants;
use serde::{Deserialize, Serialize};

/// Presentation phases of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatPhase {
    Intro,
    PlayerChoice,
    PlayerAction,
    AnimalAction,
    BehaviorChange,
    Outcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatSnapshot {
    pub encounter: EncounterId,
    pub phase: CombatPhase,
    pub turn: Turn,
    pub animal: String,
    pub distance_meters: Meters,
    pub zone: Zone,
    pub behavior: AnimalBehavior,
    pub boldness: f32,
    pub player_vitality: f32,
    pub animal_vitality: f32,
    pub player_braced: bool,
    pub weapon: Option<String>,
    pub stones: u32,
    pub meat_kg: f32,
    /// Distance to a thrown weapon still on the ground
    pub thrown_weapon_meters: Option<Meters>,
    pub outcome: Option<CombatOutcome>,
}

impl CombatSnapshot {
    pub fn capture(state: &CombatState, participants: &Participants<'_>, phase: CombatPhase) -> Self {
        Self {
            encounter: state.id,
            phase,
            turn: state.turn_count(),
            animal: participants.animal.name.clone(),
            distance_meters: state.distance(),
            zone: state.zone(),
            behavior: state.behavior.current(),
            boldness: state.behavior.boldness(),
            player_vitality: participants.player_body.vitality(),
            animal_vitality: participants.animal_body.vitality(),
            player_braced: state.is_braced(),
            weapon: participants.inventory.weapon().map(|w| w.name.clone()),
            stones: participants.inventory.stone_count(),
            meat_kg: participants.inventory.meat_kg(),
            thrown_weapon_meters: state.thrown_weapon().map(|t| t.landing_distance),
            outcome: None,
        }
    }

    pub fn with_outcome(mut self, outcome: CombatOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// One-line status for text front ends
    pub fn status_line(&self) -> String {
        format!(
            "Turn {} | {} {:.1}m away ({}) and {} | you {:.0}% | {} {:.0}%",
            self.turn,
            self.animal,
            self.distance_meters,
            self.zone.label(),
            self.behavior.describe(),
            self.player_vitality * 100.0,
            self.animal,
            self.animal_vitality * 100.0
        )
    }
}
