//! Turn-by-turn record of an encounter

use crate::combat::{AnimalBehavior, CombatOutcome};
use crate::core::types::Turn;
use crate::encounter::actions::PlayerAction;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub turn: Turn,
    pub kind: CombatEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEventKind {
    EncounterStarted,
    /// `None` for an unrecognized action id
    PlayerActed { action: Option<PlayerAction> },
    AnimalActed { behavior: AnimalBehavior },
    BehaviorChanged { from: AnimalBehavior, to: AnimalBehavior },
    Ended { outcome: CombatOutcome },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CombatLog {
    pub events: Vec<CombatEvent>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: CombatEventKind, description: impl Into<String>, turn: Turn) {
        self.events.push(CombatEvent {
            turn,
            kind,
            description: description.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn behavior_changes(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, CombatEventKind::BehaviorChanged { .. }))
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.events.iter().rev().find_map(|e| match e.kind {
            CombatEventKind::Ended { outcome } => Some(outcome),
            _ => None,
        })
    }
}
