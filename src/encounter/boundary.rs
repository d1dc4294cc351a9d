//! Boundaries the host implements
//!
//! The encounter computes a snapshot and a legal action list, then yields
//! to the presenter. Every call here is a blocking wait from the loop's
//! point of view: nothing else happens until it returns.

use crate::combat::{AnimalProfile, AttackTarget};
use crate::encounter::actions::PlayerAction;
use crate::encounter::snapshot::{CombatPhase, CombatSnapshot};

/// Shows the fight and returns the player's choices
pub trait CombatPresenter {
    /// One-way state notification
    fn render(&mut self, snapshot: &CombatSnapshot);

    /// Return an action id; ids outside `legal` make the player hesitate
    fn choose_action(&mut self, snapshot: &CombatSnapshot, legal: &[PlayerAction]) -> String;

    /// Return a target id, asked only while resolving a thrust
    fn choose_target(&mut self, legal: &[AttackTarget]) -> String;

    /// Display one narrated beat
    fn show_narrative(&mut self, phase: CombatPhase, text: &str);

    /// Block until the player acknowledges the last beat
    fn wait_for_continue(&mut self) {}
}

/// Side effects on the surrounding world
pub trait EncounterHooks {
    /// Called exactly once when the animal is killed
    fn create_carcass(&mut self, animal: &AnimalProfile);
}

/// Hooks that do nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl EncounterHooks for NoHooks {
    fn create_carcass(&mut self, _animal: &AnimalProfile) {}
}
