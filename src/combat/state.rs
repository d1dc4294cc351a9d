//! Per-encounter combat state
//!
//! Distance is private so the zone can never go stale: every mutation
//! goes through `set_distance`, which re-derives the zone in the same call.

use crate::combat::behavior::{AnimalBehavior, BehaviorState};
use crate::combat::constants::RETRIEVE_MARGIN_METERS;
use crate::combat::equipment::Weapon;
use crate::combat::outcome::CombatOutcome;
use crate::combat::zone::Zone;
use crate::core::config::CombatConfig;
use crate::core::error::{EncounterError, Result, TurnCapDiagnostics};
use crate::core::types::{EncounterId, Meters, Turn};
use serde::{Deserialize, Serialize};

/// A thrown weapon lying on the ground
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrownWeapon {
    pub weapon: Weapon,
    /// Distance from the player to where it landed
    pub landing_distance: Meters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub id: EncounterId,
    distance: Meters,
    zone: Zone,
    turn_count: Turn,
    player_braced: bool,
    thrown_weapon: Option<ThrownWeapon>,
    pub behavior: BehaviorState,
}

impl CombatState {
    pub fn new(distance: Meters, behavior: BehaviorState) -> Self {
        let mut state = Self {
            id: EncounterId::new(),
            distance: 0.0,
            zone: Zone::Melee,
            turn_count: 0,
            player_braced: false,
            thrown_weapon: None,
            behavior,
        };
        state.set_distance(distance);
        state
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn turn_count(&self) -> Turn {
        self.turn_count
    }

    pub fn is_braced(&self) -> bool {
        self.player_braced
    }

    pub fn thrown_weapon(&self) -> Option<&ThrownWeapon> {
        self.thrown_weapon.as_ref()
    }

    /// Set distance (clamped at 0) and re-derive the zone
    pub fn set_distance(&mut self, distance: Meters) {
        self.distance = if distance.is_finite() {
            distance.max(0.0)
        } else {
            self.distance
        };
        self.zone = Zone::from_distance(self.distance);
    }

    /// Player moves toward the animal; returns meters actually covered
    pub fn player_advance(&mut self, meters: Meters) -> Meters {
        let before = self.distance;
        self.set_distance(before - meters.max(0.0));
        let moved = before - self.distance;
        self.shift_landing(-moved);
        moved
    }

    /// Player moves away from the animal; returns meters covered
    pub fn player_withdraw(&mut self, meters: Meters) -> Meters {
        let before = self.distance;
        self.set_distance(before + meters.max(0.0));
        let moved = self.distance - before;
        self.shift_landing(moved);
        moved
    }

    /// The animal moves; positive delta opens distance. The weapon stays put
    /// relative to the player.
    pub fn animal_move(&mut self, delta: Meters) {
        self.set_distance(self.distance + delta);
    }

    /// An attacking animal closes to contact range
    pub fn close_for_attack(&mut self, contact: Meters) {
        if self.distance > contact {
            self.set_distance(contact);
        }
    }

    fn shift_landing(&mut self, delta: Meters) {
        if let Some(thrown) = self.thrown_weapon.as_mut() {
            thrown.landing_distance = (thrown.landing_distance + delta).max(0.0);
        }
    }

    pub fn brace(&mut self) {
        self.player_braced = true;
    }

    /// Consume the brace flag; a brace is good for exactly one charge
    pub fn take_brace(&mut self) -> bool {
        std::mem::take(&mut self.player_braced)
    }

    pub fn record_throw(&mut self, weapon: Weapon, landing_distance: Meters) {
        self.thrown_weapon = Some(ThrownWeapon {
            weapon,
            landing_distance: landing_distance.max(0.0),
        });
    }

    /// Is the thrown weapon no more than a couple of meters past the animal?
    pub fn can_retrieve_weapon(&self) -> bool {
        self.thrown_weapon
            .as_ref()
            .is_some_and(|t| t.landing_distance <= self.distance + RETRIEVE_MARGIN_METERS)
    }

    pub fn take_thrown_weapon(&mut self) -> Option<ThrownWeapon> {
        self.thrown_weapon.take()
    }

    pub fn advance_turn(&mut self) {
        self.turn_count += 1;
    }

    /// Can the player walk away from here?
    pub fn can_disengage(&self) -> bool {
        match self.zone {
            Zone::Far => true,
            Zone::Mid => !matches!(
                self.behavior.current(),
                AnimalBehavior::Attacking | AnimalBehavior::Approaching
            ),
            _ => false,
        }
    }

    /// The authoritative end-of-turn termination gate
    ///
    /// Returns the outcome if the encounter is over, `None` to keep going,
    /// and the fatal turn-cap error if the cap is reached with nothing else
    /// ending the fight.
    pub fn check_for_end(
        &self,
        player_alive: bool,
        animal_alive: bool,
        config: &CombatConfig,
    ) -> Result<Option<CombatOutcome>> {
        if !player_alive {
            return Ok(Some(CombatOutcome::PlayerDied));
        }
        if !animal_alive {
            return Ok(Some(CombatOutcome::Victory));
        }
        match self.behavior.current() {
            AnimalBehavior::Disengaging => return Ok(Some(CombatOutcome::AnimalDisengaged)),
            AnimalBehavior::Retreating if self.distance >= config.engagement_limit_meters => {
                return Ok(Some(CombatOutcome::AnimalFled));
            }
            _ => {}
        }

        if self.turn_count >= config.max_turns {
            let diagnostics = self.diagnostics(player_alive, animal_alive, config);
            tracing::error!(%diagnostics, "combat turn cap reached");
            return Err(EncounterError::TurnCapExceeded(Box::new(diagnostics)));
        }

        Ok(None)
    }

    pub fn diagnostics(
        &self,
        player_alive: bool,
        animal_alive: bool,
        config: &CombatConfig,
    ) -> TurnCapDiagnostics {
        TurnCapDiagnostics {
            encounter: self.id,
            turn_count: self.turn_count,
            max_turns: config.max_turns,
            distance_meters: self.distance,
            zone: self.zone,
            behavior: self.behavior.current(),
            turns_in_behavior: self.behavior.turns_in_state(),
            boldness: self.behavior.boldness(),
            player_alive,
            animal_alive,
        }
    }
}
