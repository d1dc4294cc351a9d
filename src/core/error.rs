use crate::combat::{AnimalBehavior, Zone};
use crate::core::types::{EncounterId, Meters, Turn};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Full combat state captured when the turn cap is hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnCapDiagnostics {
    pub encounter: EncounterId,
    pub turn_count: Turn,
    pub max_turns: Turn,
    pub distance_meters: Meters,
    pub zone: Zone,
    pub behavior: AnimalBehavior,
    pub turns_in_behavior: u32,
    pub boldness: f32,
    pub player_alive: bool,
    pub animal_alive: bool,
}

impl fmt::Display for TurnCapDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "encounter {} reached turn {}/{} at {:.1}m ({:?}), behavior {:?} for {} turns, \
             boldness {:.2}, player alive: {}, animal alive: {}",
            self.encounter,
            self.turn_count,
            self.max_turns,
            self.distance_meters,
            self.zone,
            self.behavior,
            self.turns_in_behavior,
            self.boldness,
            self.player_alive,
            self.animal_alive,
        )
    }
}

#[derive(Error, Debug)]
pub enum EncounterError {
    /// The loop ran out of turns without a terminal condition. This is a
    /// defect in the end-of-combat checks, never a normal exit.
    #[error("Turn cap exceeded: {0}")]
    TurnCapExceeded(Box<TurnCapDiagnostics>),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl EncounterError {
    /// Is this an internal invariant violation rather than bad input?
    pub fn is_fatal(&self) -> bool {
        matches!(self, EncounterError::TurnCapExceeded(_))
    }
}

pub type Result<T> = std::result::Result<T, EncounterError>;
