//! Encounter system - one player against one animal, turn by turn
//!
//! Architecture: rules + boundary traits
//! - The combat module holds the rules and per-encounter state
//! - `CombatPresenter` is whatever shows snapshots and returns choices
//! - `Body` and `Inventory` are owned by the host and borrowed for the fight
//! - `Encounter` drives the phases and is the only termination authority

pub mod actions;
pub mod animal_turn;
pub mod autoplay;
pub mod boundary;
pub mod context;
pub mod log;
pub mod runner;
pub mod snapshot;

pub use actions::{available_actions, process_action, ActionResult, PlayerAction};
pub use autoplay::RandomPresenter;
pub use boundary::{CombatPresenter, EncounterHooks, NoHooks};
pub use context::EncounterContext;
pub use log::{CombatEvent, CombatEventKind, CombatLog};
pub use runner::{Encounter, EncounterReport};
pub use snapshot::{CombatPhase, CombatSnapshot};

use crate::combat::{AnimalProfile, Body, Inventory};

/// Everything the host lends to a single encounter
pub struct Participants<'a> {
    pub animal: &'a AnimalProfile,
    pub animal_body: &'a mut dyn Body,
    pub player_body: &'a mut dyn Body,
    pub inventory: &'a mut dyn Inventory,
}

impl<'a> Participants<'a> {
    pub fn new(
        animal: &'a AnimalProfile,
        animal_body: &'a mut dyn Body,
        player_body: &'a mut dyn Body,
        inventory: &'a mut dyn Inventory,
    ) -> Self {
        Self {
            animal,
            animal_body,
            player_body,
            inventory,
        }
    }

    pub fn player_alive(&self) -> bool {
        self.player_body.is_alive()
    }

    pub fn animal_alive(&self) -> bool {
        self.animal_body.is_alive()
    }

    pub fn both_alive(&self) -> bool {
        self.player_alive() && self.animal_alive()
    }
}
