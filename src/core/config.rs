//! Combat configuration with documented tuning values
//!
//! Everything the encounter loop treats as a tuning surface lives here.
//! Fixed design constants (zone boundaries, the targeting table) are in
//! `combat::constants` and are deliberately not configurable.

use crate::core::error::{EncounterError, Result};
use crate::core::types::{Meters, Turn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tuning values for a combat encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    // === LOOP SAFETY ===
    /// Hard turn limit for a single encounter
    ///
    /// Reaching it with both combatants alive is a fatal error, not an exit.
    pub max_turns: Turn,

    // === BEHAVIOR THRESHOLDS ===
    /// Below this boldness the animal gives up and retreats
    pub retreat_threshold: f32,

    /// A retreating animal at or above this boldness comes back to circle.
    /// Also decides whether a circling animal that ran out of patience
    /// approaches or backs off.
    pub regroup_threshold: f32,

    /// At or above this boldness the animal escalates immediately
    pub aggressive_threshold: f32,

    /// Turns spent circling before the animal starts rolling to approach
    pub circling_patience: u32,

    /// Turns of circling after which the animal must commit one way or another
    pub circling_max_turns: u32,

    /// Turns of approaching after which the animal starts threatening anyway
    pub approach_max_turns: u32,

    /// Turns of threatening after which an attack is forced
    pub threaten_max_turns: u32,

    /// Turns of retreating after which the animal disengages for good
    pub retreat_max_turns: u32,

    // === ENGAGEMENT FATIGUE ===
    /// Turn after which the animal starts losing interest in the fight
    pub engagement_fatigue_turn: Turn,

    /// Boldness lost per turn once engagement fatigue sets in
    ///
    /// Must outpace the largest per-turn boldness gain a player can cause
    /// (0.05) so the fight drains toward a retreat well before `max_turns`.
    /// Zero disables the drain.
    pub fatigue_boldness_decay: f32,

    // === MOVEMENT ===
    /// Meters a healthy player covers in one movement action
    pub player_step_meters: Meters,

    /// Fraction of a full step covered by a careful retreat
    pub careful_retreat_speed: f32,

    /// Meters an approaching animal closes per turn
    pub approach_step_meters: Meters,

    /// Base meters a retreating animal opens per turn (scaled up by timidity)
    pub retreat_step_meters: Meters,

    /// Distance at which a retreating animal has left the encounter
    pub engagement_limit_meters: Meters,

    /// Distance an attacking animal closes to when it charges
    pub charge_contact_meters: Meters,

    // === DEFENSE ===
    /// Dodge success chance for a fully mobile player
    pub dodge_base_chance: f32,

    /// Meters gained by a successful dodge
    pub dodge_shift_meters: Meters,

    /// Meters conceded when giving ground
    pub give_ground_meters: Meters,

    /// Fraction of incoming damage removed by giving ground
    pub give_ground_reduction: f32,

    /// Fraction of incoming damage still taken when braced
    pub brace_damage_taken: f32,

    /// Fraction of the charge turned back into the animal when braced
    pub brace_counter_fraction: f32,

    // === DAMAGE & MORALE ===
    /// Relative spread applied to animal attack damage (0.2 = ±20%)
    pub attack_variance: f32,

    /// Boldness the animal gains each time it wounds the player
    pub wound_boldness_gain: f32,

    /// Boldness the animal loses per unit of its own vitality lost
    pub injury_boldness_loss: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_turns: 100,

            // Thresholds (retreat < regroup < aggressive)
            retreat_threshold: 0.3,
            regroup_threshold: 0.5,
            aggressive_threshold: 0.7,
            circling_patience: 2,
            circling_max_turns: 4,
            approach_max_turns: 3,
            threaten_max_turns: 3,
            retreat_max_turns: 3,

            // Fatigue
            engagement_fatigue_turn: 30,
            fatigue_boldness_decay: 0.1,

            // Movement
            player_step_meters: 5.0,
            careful_retreat_speed: 0.8,
            approach_step_meters: 3.0,
            retreat_step_meters: 4.0,
            engagement_limit_meters: 25.0,
            charge_contact_meters: 1.5,

            // Defense
            dodge_base_chance: 0.55,
            dodge_shift_meters: 2.0,
            give_ground_meters: 3.0,
            give_ground_reduction: 0.3,
            brace_damage_taken: 0.5,
            brace_counter_fraction: 0.75,

            // Damage & morale
            attack_variance: 0.2,
            wound_boldness_gain: 0.05,
            injury_boldness_loss: 0.5,
        }
    }
}

impl CombatConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CombatConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_turns == 0 {
            return Err(EncounterError::InvalidConfig(
                "max_turns must be positive".into(),
            ));
        }

        let ordered = 0.0 < self.retreat_threshold
            && self.retreat_threshold < self.regroup_threshold
            && self.regroup_threshold < self.aggressive_threshold
            && self.aggressive_threshold < 1.0;
        if !ordered {
            return Err(EncounterError::InvalidConfig(format!(
                "thresholds must satisfy 0 < retreat ({}) < regroup ({}) < aggressive ({}) < 1",
                self.retreat_threshold, self.regroup_threshold, self.aggressive_threshold
            )));
        }

        if self.circling_patience > self.circling_max_turns {
            return Err(EncounterError::InvalidConfig(format!(
                "circling_patience ({}) should be <= circling_max_turns ({})",
                self.circling_patience, self.circling_max_turns
            )));
        }

        let fractions = [
            ("careful_retreat_speed", self.careful_retreat_speed),
            ("dodge_base_chance", self.dodge_base_chance),
            ("give_ground_reduction", self.give_ground_reduction),
            ("brace_damage_taken", self.brace_damage_taken),
            ("brace_counter_fraction", self.brace_counter_fraction),
            ("attack_variance", self.attack_variance),
            ("fatigue_boldness_decay", self.fatigue_boldness_decay),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(EncounterError::InvalidConfig(format!(
                    "{} ({}) must be within [0, 1]",
                    name, value
                )));
            }
        }

        let distances = [
            ("player_step_meters", self.player_step_meters),
            ("approach_step_meters", self.approach_step_meters),
            ("retreat_step_meters", self.retreat_step_meters),
            ("engagement_limit_meters", self.engagement_limit_meters),
        ];
        for (name, value) in distances {
            if value <= 0.0 {
                return Err(EncounterError::InvalidConfig(format!(
                    "{} ({}) must be positive",
                    name, value
                )));
            }
        }

        if self.charge_contact_meters < 0.0
            || self.charge_contact_meters >= crate::combat::constants::CLOSE_MAX_METERS
        {
            return Err(EncounterError::InvalidConfig(format!(
                "charge_contact_meters ({}) must put the animal Close or nearer",
                self.charge_contact_meters
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CombatConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_turn_cap() {
        assert_eq!(CombatConfig::new().max_turns, 100);
    }

    #[test]
    fn test_fatigue_outpaces_player_boldness_gain() {
        let config = CombatConfig::default();
        assert!(config.fatigue_boldness_decay > 0.05);
        assert!(config.engagement_fatigue_turn < config.max_turns / 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CombatConfig::from_toml_str("max_turns = 60\nretreat_threshold = 0.25")
            .expect("partial config should parse");
        assert_eq!(config.max_turns, 60);
        assert_eq!(config.retreat_threshold, 0.25);
        assert_eq!(config.aggressive_threshold, 0.7);
    }

    #[test]
    fn test_unordered_thresholds_rejected() {
        let result = CombatConfig::from_toml_str("retreat_threshold = 0.8");
        assert!(matches!(result, Err(EncounterError::InvalidConfig(_))));
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = CombatConfig::from_toml_str("max_turns = \"lots\"");
        assert!(matches!(result, Err(EncounterError::ConfigParse(_))));
    }

    #[test]
    fn test_out_of_range_fraction_rejected() {
        let mut config = CombatConfig::default();
        config.brace_damage_taken = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_turn_cap_rejected() {
        let mut config = CombatConfig::default();
        config.max_turns = 0;
        assert!(config.validate().is_err());
    }
}
