//! The animal's half of a turn
//!
//! An attacking animal closes to contact and charges. Everything else is
//! movement and posturing driven by its current behavior.

use crate::combat::constants::{CIRCLING_SHIFT_CHANCE, MELEE_MAX_METERS, THREATEN_CLOSE_CHANCE};
use crate::combat::damage::{apply_damage, describe_effects, DamageInfo, DamageType};
use crate::combat::defense::{self, DefenseChoice, DefenseResult};
use crate::combat::{roll, AnimalBehavior, CombatState};
use crate::core::config::CombatConfig;
use crate::encounter::actions::wound_animal;
use crate::encounter::Participants;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What a single animal attack did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackReport {
    pub damage_taken: f32,
    pub counter_damage: f32,
    pub avoided: bool,
    pub narrative: String,
}

/// Run the animal's phase for this turn, returning its narration
pub fn animal_phase<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    defense: DefenseChoice,
    config: &CombatConfig,
    rng: &mut R,
) -> String {
    let name = participants.animal.name.clone();
    let behavior = state.behavior.current();

    if state.behavior.will_attack_this_turn() {
        state.close_for_attack(config.charge_contact_meters);
        let report = resolve_charge(state, participants, defense, config, rng);
        tracing::debug!(
            taken = report.damage_taken,
            counter = report.counter_damage,
            avoided = report.avoided,
            "charge resolved"
        );
        return report.narrative;
    }

    match behavior {
        AnimalBehavior::Circling => {
            if roll(rng, CIRCLING_SHIFT_CHANCE) {
                let shift: f32 = rng.gen_range(1.0..=2.0);
                if roll(rng, 0.5) {
                    state.animal_move(-shift);
                    format!("The {} circles, drifting {:.0}m closer.", name, shift)
                } else {
                    state.animal_move(shift);
                    format!("The {} circles wide, {:.0}m further out.", name, shift)
                }
            } else {
                format!("The {} paces around you, watching.", name)
            }
        }
        AnimalBehavior::Approaching => {
            let target = (state.distance() - config.approach_step_meters).max(MELEE_MAX_METERS);
            if target < state.distance() {
                let closed = state.distance() - target;
                state.set_distance(target);
                format!("The {} closes {:.0}m, head low.", name, closed)
            } else {
                format!("The {} edges in, already close.", name)
            }
        }
        AnimalBehavior::Threatening => {
            if roll(rng, THREATEN_CLOSE_CHANCE) {
                let step: f32 = rng.gen_range(1.0..=2.0);
                state.animal_move(-step);
                format!("The {} snarls and lunges a step closer.", name)
            } else {
                format!("The {} bares its teeth, hackles raised.", name)
            }
        }
        AnimalBehavior::Recovering => {
            format!("The {} scrambles to regain its footing.", name)
        }
        AnimalBehavior::Retreating => {
            let step = config.retreat_step_meters * (2.0 - state.behavior.boldness());
            state.animal_move(step);
            format!("The {} backs off {:.0}m.", name, step)
        }
        AnimalBehavior::Disengaging => {
            state.animal_move(config.retreat_step_meters * 2.0);
            format!("The {} turns its back on you.", name)
        }
        // Handled above
        AnimalBehavior::Attacking => String::new(),
    }
}

/// Resolve a charge against the player's prepared defense
///
/// A set brace takes precedence over any other choice and is consumed here.
pub fn resolve_charge<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    choice: DefenseChoice,
    config: &CombatConfig,
    rng: &mut R,
) -> AttackReport {
    let incoming = roll_attack_damage(participants.animal.attack_damage, config, rng);
    // The flag is spent either way; without a spear in hand it does nothing
    let braced = state.take_brace();
    let defense = if braced && participants.inventory.weapon_class().has_reach() {
        defense::resolve_brace(incoming, &participants.animal.name, config)
    } else {
        let class = participants.inventory.weapon_class();
        let moving = participants.player_body.capacities().moving;
        defense::resolve_choice(choice, class, moving, config, rng)
    };
    land_attack(state, participants, incoming, defense, config)
}

/// An opening the player gave away: no defense, scaled damage
pub fn free_attack<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    scale: f32,
    config: &CombatConfig,
    rng: &mut R,
) -> AttackReport {
    let incoming = roll_attack_damage(participants.animal.attack_damage * scale, config, rng);
    land_attack(state, participants, incoming, DefenseResult::undefended(), config)
}

fn roll_attack_damage<R: Rng + ?Sized>(base: f32, config: &CombatConfig, rng: &mut R) -> f32 {
    let variance = config.attack_variance;
    let spread = if variance > 0.0 {
        rng.gen_range(-variance..=variance)
    } else {
        0.0
    };
    (base * (1.0 + spread)).max(0.0)
}

/// Apply one attack: exactly one damage call on the player, then any
/// counter-damage, movement, and boldness changes
fn land_attack(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    incoming: f32,
    defense: DefenseResult,
    config: &CombatConfig,
) -> AttackReport {
    let animal = participants.animal;
    let mut request = DamageInfo::new(incoming * defense.damage_multiplier, animal.attack_type);
    if let Some(armor) = participants.inventory.armor() {
        request = request.with_armor(armor);
    }
    let result = apply_damage(participants.player_body, request);

    let mut narrative = defense.narrative.clone();
    if !narrative.is_empty() {
        narrative.push(' ');
    }
    if defense.avoided {
        narrative.push_str(&format!("The {} finds only air.", animal.name));
    } else if result.applied > 0.0 {
        narrative.push_str(&format!(
            "The {} {} your {} for {:.0} damage.",
            animal.name,
            animal.attack_verb,
            result.hit_region.to_lowercase(),
            result.applied
        ));
        if !result.effects.is_empty() {
            narrative.push_str(&format!(" You are {}.", describe_effects(&result.effects)));
        }
        state.behavior.modify_boldness(config.wound_boldness_gain);
    } else {
        narrative.push_str(&format!("The {} {} but does no harm.", animal.name, animal.attack_verb));
    }

    if defense.distance_shift > 0.0 {
        state.player_withdraw(defense.distance_shift);
    }

    if defense.counter_damage > 0.0 {
        let counter = DamageInfo::new(defense.counter_damage, DamageType::Pierce).with_region("Chest");
        let counter_result = wound_animal(state, participants, counter, config);
        narrative.push_str(&format!(
            " It impales itself for {:.0} damage!",
            counter_result.applied
        ));
    }

    AttackReport {
        damage_taken: result.applied,
        counter_damage: defense.counter_damage,
        avoided: defense.avoided,
        narrative,
    }
}
