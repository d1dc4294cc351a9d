//! Defensive resolution against a charge
//!
//! A defense never applies damage itself. It returns how much of the
//! incoming damage gets through, how far the player moved, and any
//! counter-damage; the caller makes the single damage application.

use crate::combat::equipment::WeaponClass;
use crate::combat::roll;
use crate::core::config::CombatConfig;
use crate::core::types::Meters;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Defense prepared by the player's action, consulted by the next charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DefenseChoice {
    #[default]
    None,
    Dodge,
    Block,
    Brace,
    GiveGround,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseResult {
    /// Fraction of incoming damage the player still takes
    pub damage_multiplier: f32,
    /// Damage turned back into the animal
    pub counter_damage: f32,
    /// Meters the player moved away from the animal
    pub distance_shift: Meters,
    pub avoided: bool,
    pub narrative: String,
}

impl DefenseResult {
    /// No defense: full damage, no movement
    pub fn undefended() -> Self {
        Self {
            damage_multiplier: 1.0,
            counter_damage: 0.0,
            distance_shift: 0.0,
            avoided: false,
            narrative: String::new(),
        }
    }
}

/// Side-step the charge. Success chance falls with lost mobility.
pub fn attempt_dodge<R: Rng + ?Sized>(rng: &mut R, moving: f32, config: &CombatConfig) -> DefenseResult {
    let chance = config.dodge_base_chance * (0.5 + 0.5 * moving.clamp(0.0, 1.0));
    if roll(rng, chance) {
        DefenseResult {
            damage_multiplier: 0.0,
            counter_damage: 0.0,
            distance_shift: config.dodge_shift_meters,
            avoided: true,
            narrative: "You throw yourself aside and the charge goes past.".into(),
        }
    } else {
        DefenseResult {
            narrative: "You try to dodge but you're too slow.".into(),
            ..DefenseResult::undefended()
        }
    }
}

/// Take the hit on the weapon. Always reduces, never avoids.
pub fn attempt_block(class: WeaponClass) -> DefenseResult {
    let reduction = class.block_reduction();
    let narrative = match class {
        WeaponClass::Unarmed => "You get your arms up against the impact.",
        WeaponClass::Spear => "You catch the charge across the spear shaft.",
        _ => "You take the brunt of it on your weapon.",
    };
    DefenseResult {
        damage_multiplier: 1.0 - reduction,
        narrative: narrative.into(),
        ..DefenseResult::undefended()
    }
}

/// Roll with the charge, conceding distance
pub fn attempt_give_ground(config: &CombatConfig) -> DefenseResult {
    DefenseResult {
        damage_multiplier: 1.0 - config.give_ground_reduction,
        distance_shift: config.give_ground_meters,
        narrative: "You give ground, letting the charge spend itself.".into(),
        ..DefenseResult::undefended()
    }
}

/// Set spear against the charge: take part of the hit, return most of it
pub fn resolve_brace(incoming_damage: f32, animal: &str, config: &CombatConfig) -> DefenseResult {
    DefenseResult {
        damage_multiplier: config.brace_damage_taken,
        counter_damage: incoming_damage.max(0.0) * config.brace_counter_fraction,
        narrative: format!("The {} runs onto your braced spear!", animal),
        ..DefenseResult::undefended()
    }
}

/// Resolve a prepared (non-brace) defense choice
///
/// Brace is a state flag consumed by the charge itself; a `Brace` choice
/// without the flag set counts as no defense.
pub fn resolve_choice<R: Rng + ?Sized>(
    choice: DefenseChoice,
    weapon_class: WeaponClass,
    moving: f32,
    config: &CombatConfig,
    rng: &mut R,
) -> DefenseResult {
    match choice {
        DefenseChoice::Dodge => attempt_dodge(rng, moving, config),
        DefenseChoice::Block => attempt_block(weapon_class),
        DefenseChoice::GiveGround => attempt_give_ground(config),
        DefenseChoice::None | DefenseChoice::Brace => DefenseResult::undefended(),
    }
}
