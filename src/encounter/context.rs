//! Starting conditions of an encounter
//!
//! Initial boldness is a weighted sum of what makes the animal braver
//! (its temperament, a hurt player, the smell of meat) and what holds it
//! back (a weapon, fire, its own wounds).

use crate::combat::constants::{MAX_INITIAL_BOLDNESS, MIN_INITIAL_BOLDNESS};
use crate::combat::{AnimalBehavior, AnimalProfile, BehaviorState, CombatState};
use crate::core::config::CombatConfig;
use crate::core::types::Meters;
use crate::encounter::Participants;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterContext {
    pub animal_aggression: f32,
    pub player_vitality: f32,
    pub animal_vitality: f32,
    pub meat_carried: bool,
    pub player_armed: bool,
    pub fire_present: bool,
    pub distance: Meters,
}

impl EncounterContext {
    /// Both sides healthy, player unarmed, nothing special around
    pub fn new(animal: &AnimalProfile, distance: Meters) -> Self {
        Self {
            animal_aggression: animal.aggression,
            player_vitality: 1.0,
            animal_vitality: 1.0,
            meat_carried: false,
            player_armed: false,
            fire_present: false,
            distance,
        }
    }

    /// Read the starting conditions off the participants
    pub fn from_participants(participants: &Participants<'_>, distance: Meters) -> Self {
        Self {
            animal_aggression: participants.animal.aggression,
            player_vitality: participants.player_body.vitality(),
            animal_vitality: participants.animal_body.vitality(),
            meat_carried: participants.inventory.has_meat(),
            player_armed: participants.inventory.weapon().is_some(),
            fire_present: false,
            distance,
        }
    }

    pub fn with_fire(mut self, fire_present: bool) -> Self {
        self.fire_present = fire_present;
        self
    }

    pub fn initial_boldness(&self) -> f32 {
        let mut boldness = 0.2 + 0.5 * self.animal_aggression.clamp(0.0, 1.0);
        boldness += 0.2 * (1.0 - self.player_vitality.clamp(0.0, 1.0));
        if self.meat_carried {
            boldness += 0.15;
        }
        if self.player_armed {
            boldness -= 0.1;
        }
        if self.fire_present {
            boldness -= 0.2;
        }
        boldness -= 0.25 * (1.0 - self.animal_vitality.clamp(0.0, 1.0));

        if boldness.is_finite() {
            boldness.clamp(MIN_INITIAL_BOLDNESS, MAX_INITIAL_BOLDNESS)
        } else {
            MIN_INITIAL_BOLDNESS
        }
    }

    /// A bold animal comes straight in; anything else circles first
    pub fn initial_behavior(&self, config: &CombatConfig) -> AnimalBehavior {
        if self.initial_boldness() >= config.aggressive_threshold {
            AnimalBehavior::Approaching
        } else {
            AnimalBehavior::Circling
        }
    }

    pub fn initial_state(&self, config: &CombatConfig) -> CombatState {
        let behavior = BehaviorState::new(self.initial_behavior(config), self.initial_boldness());
        CombatState::new(self.distance, behavior)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_armed_player_deters() {
        let wolf = AnimalProfile::wolf();
        let unarmed = EncounterContext::new(&wolf, 20.0);
        let armed = EncounterContext {
            player_armed: true,
            ..unarmed.clone()
        };
        assert!(armed.initial_boldness() < unarmed.initial_boldness());
    }

    #[test]
    fn test_meat_and_hurt_player_embolden() {
        let wolf = AnimalProfile::wolf();
        let base = EncounterContext::new(&wolf, 20.0);
        let meat = EncounterContext {
            meat_carried: true,
            ..base.clone()
        };
        let hurt = EncounterContext {
            player_vitality: 0.3,
            ..base.clone()
        };
        assert!(meat.initial_boldness() > base.initial_boldness());
        assert!(hurt.initial_boldness() > base.initial_boldness());
    }

    #[test]
    fn test_fire_deters() {
        let base = EncounterContext::new(&AnimalProfile::boar(), 20.0);
        let fire = base.clone().with_fire(true);
        assert!(fire.initial_boldness() < base.initial_boldness());
    }

    #[test]
    fn test_boldness_clamped() {
        let reckless = EncounterContext {
            animal_aggression: 1.0,
            player_vitality: 0.0,
            animal_vitality: 1.0,
            meat_carried: true,
            player_armed: false,
            fire_present: false,
            distance: 10.0,
        };
        assert_eq!(reckless.initial_boldness(), MAX_INITIAL_BOLDNESS);

        let cowed = EncounterContext {
            animal_aggression: 0.0,
            player_vitality: 1.0,
            animal_vitality: 0.0,
            meat_carried: false,
            player_armed: true,
            fire_present: true,
            distance: 10.0,
        };
        assert_eq!(cowed.initial_boldness(), MIN_INITIAL_BOLDNESS);
    }

    #[test]
    fn test_initial_behavior_follows_boldness() {
        let config = CombatConfig::default();
        let mut context = EncounterContext::new(&AnimalProfile::wolf(), 20.0);
        assert_eq!(context.initial_behavior(&config), AnimalBehavior::Circling);

        context.meat_carried = true;
        context.player_vitality = 0.2;
        assert!(context.initial_boldness() >= config.aggressive_threshold);
        assert_eq!(context.initial_behavior(&config), AnimalBehavior::Approaching);
    }

    #[test]
    fn test_initial_state_uses_distance() {
        let config = CombatConfig::default();
        let state = EncounterContext::new(&AnimalProfile::wolf(), 12.0).initial_state(&config);
        assert_eq!(state.distance(), 12.0);
        assert_eq!(state.turn_count(), 0);
        assert!(!state.is_braced());
    }
}
