//! Animal profiles
//!
//! The surrounding world spawns animals; combat only needs these numbers.

use crate::combat::body::SimpleBody;
use crate::combat::damage::{ArmorMitigation, DamageType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalProfile {
    pub name: String,
    /// Damage of a full charge before variance and defense
    pub attack_damage: f32,
    pub attack_type: DamageType,
    /// Narration verb: "bites", "mauls"
    pub attack_verb: String,
    pub weight_kg: f32,
    /// Total health for the reference body model
    pub health: f32,
    /// 0.0 = skittish, 1.0 = always wants the fight
    pub aggression: f32,
    /// How readily it gives up on prey that stops moving
    pub disengage_propensity: f32,
    /// Natural armor (hide, fur, fat)
    pub armor: Option<ArmorMitigation>,
}

impl AnimalProfile {
    pub fn wolf() -> Self {
        Self {
            name: "wolf".into(),
            attack_damage: 8.0,
            attack_type: DamageType::Pierce,
            attack_verb: "bites".into(),
            weight_kg: 40.0,
            health: 60.0,
            aggression: 0.5,
            disengage_propensity: 0.4,
            armor: None,
        }
    }

    pub fn bear() -> Self {
        Self {
            name: "bear".into(),
            attack_damage: 18.0,
            attack_type: DamageType::Sharp,
            attack_verb: "mauls".into(),
            weight_kg: 250.0,
            health: 160.0,
            aggression: 0.6,
            disengage_propensity: 0.6,
            armor: Some(ArmorMitigation::thick_hide()),
        }
    }

    pub fn boar() -> Self {
        Self {
            name: "boar".into(),
            attack_damage: 12.0,
            attack_type: DamageType::Sharp,
            attack_verb: "gores".into(),
            weight_kg: 90.0,
            health: 90.0,
            aggression: 0.7,
            disengage_propensity: 0.2,
            armor: Some(ArmorMitigation::thick_hide()),
        }
    }

    pub fn cougar() -> Self {
        Self {
            name: "cougar".into(),
            attack_damage: 11.0,
            attack_type: DamageType::Sharp,
            attack_verb: "rakes".into(),
            weight_kg: 65.0,
            health: 70.0,
            aggression: 0.55,
            disengage_propensity: 0.3,
            armor: None,
        }
    }

    /// Look up a preset by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "wolf" => Some(Self::wolf()),
            "bear" => Some(Self::bear()),
            "boar" => Some(Self::boar()),
            "cougar" => Some(Self::cougar()),
            _ => None,
        }
    }

    pub fn preset_names() -> [&'static str; 4] {
        ["wolf", "bear", "boar", "cougar"]
    }

    /// Fresh reference body for this animal
    pub fn body(&self) -> SimpleBody {
        SimpleBody::quadruped(self.health, self.weight_kg)
    }
}
