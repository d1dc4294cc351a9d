//! Targeting and accuracy
//!
//! Reading the animal is the skill: each behavior exposes some body
//! regions and covers others. The table below is a fixed design surface.

use crate::combat::behavior::AnimalBehavior;
use crate::combat::constants::{
    ARMED_STRIKE_CHANCE, BASE_HIT_HEAD, BASE_HIT_LEGS, BASE_HIT_TORSO, BEHAVIOR_MODIFIER_WEIGHT,
    CRITICAL_MULTIPLIER, HEAD_CRITICAL_CHANCE_FACTOR, HEAD_CRITICAL_MULTIPLIER, MAX_HIT_CHANCE,
    MIN_HIT_CHANCE, UNARMED_STRIKE_CHANCE,
};
use crate::combat::roll;
use crate::core::types::Meters;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Body region a player can aim for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    Legs,
    Torso,
    Head,
}

impl AttackTarget {
    pub fn all() -> [AttackTarget; 3] {
        [AttackTarget::Legs, AttackTarget::Torso, AttackTarget::Head]
    }

    /// Identifier exchanged with the presentation layer
    pub fn id(&self) -> &'static str {
        match self {
            AttackTarget::Legs => "legs",
            AttackTarget::Torso => "torso",
            AttackTarget::Head => "head",
        }
    }

    pub fn from_id(id: &str) -> Option<AttackTarget> {
        match id.trim().to_ascii_lowercase().as_str() {
            "legs" => Some(AttackTarget::Legs),
            "torso" => Some(AttackTarget::Torso),
            "head" => Some(AttackTarget::Head),
            _ => None,
        }
    }

    pub fn base_hit_chance(&self) -> f32 {
        match self {
            AttackTarget::Legs => BASE_HIT_LEGS,
            AttackTarget::Torso => BASE_HIT_TORSO,
            AttackTarget::Head => BASE_HIT_HEAD,
        }
    }

    /// Region name handed to the body model
    pub fn body_region(&self) -> &'static str {
        match self {
            AttackTarget::Legs => "Left Hind Leg",
            AttackTarget::Torso => "Chest",
            AttackTarget::Head => "Head",
        }
    }
}

/// Additive hit bonus for aiming at `target` while the animal is `behavior`
pub fn state_modifier(behavior: AnimalBehavior, target: AttackTarget) -> f32 {
    use AnimalBehavior::*;
    use AttackTarget::*;

    match (behavior, target) {
        // Side-on and moving laterally: legs exposed, head turned toward you
        (Circling, Legs) => 0.10,
        (Circling, Torso) => 0.0,
        (Circling, Head) => -0.10,

        (Approaching, Legs) => -0.05,
        (Approaching, Torso) => 0.05,
        (Approaching, Head) => 0.0,

        // Low and square: head forward, legs planted behind
        (Threatening, Legs) => -0.10,
        (Threatening, Torso) => 0.0,
        (Threatening, Head) => 0.05,

        // Mid-lunge the head comes straight at you
        (Attacking, Legs) => -0.15,
        (Attacking, Torso) => 0.05,
        (Attacking, Head) => 0.15,

        (Recovering, _) => 0.15,

        (Retreating, Legs) => 0.05,
        (Retreating, Torso) => -0.10,
        (Retreating, Head) => -0.20,

        (Disengaging, Legs) => 0.0,
        (Disengaging, Torso) => -0.05,
        (Disengaging, Head) => -0.15,
    }
}

/// Final chance to land a targeted attack
pub fn target_hit_chance(behavior: AnimalBehavior, target: AttackTarget) -> f32 {
    let exposure = (behavior.hit_chance_modifier() - 1.0) * BEHAVIOR_MODIFIER_WEIGHT;
    (target.base_hit_chance() + state_modifier(behavior, target) + exposure)
        .clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Critical chance for a targeted attack; head shots double it
pub fn target_critical_chance(behavior: AnimalBehavior, target: AttackTarget) -> f32 {
    let base = behavior.critical_chance();
    match target {
        AttackTarget::Head => (base * HEAD_CRITICAL_CHANCE_FACTOR).min(1.0),
        _ => base,
    }
}

/// Damage multiplier for a critical hit
pub fn critical_multiplier(target: Option<AttackTarget>) -> f32 {
    match target {
        Some(AttackTarget::Head) => HEAD_CRITICAL_MULTIPLIER,
        _ => CRITICAL_MULTIPLIER,
    }
}

/// Chance for an untargeted strike, weighted by behavior
pub fn strike_hit_chance(behavior: AnimalBehavior, armed: bool) -> f32 {
    let base = if armed {
        ARMED_STRIKE_CHANCE
    } else {
        UNARMED_STRIKE_CHANCE
    };
    (base * behavior.hit_chance_modifier()).clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// Chance for a thrown missile: accuracy decays linearly to zero at max range
pub fn throw_hit_chance(
    base_accuracy: f32,
    distance: Meters,
    max_range: Meters,
    behavior: AnimalBehavior,
) -> f32 {
    if max_range <= 0.0 {
        return 0.0;
    }
    let falloff = (1.0 - distance.max(0.0) / max_range).max(0.0);
    (base_accuracy * falloff * behavior.hit_chance_modifier()).clamp(0.0, MAX_HIT_CHANCE)
}

/// Result of rolling an attack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackRoll {
    pub hit: bool,
    pub critical: bool,
    /// Damage multiplier (1.0 unless critical)
    pub multiplier: f32,
}

impl AttackRoll {
    pub fn miss() -> Self {
        Self {
            hit: false,
            critical: false,
            multiplier: 0.0,
        }
    }
}

/// Roll hit, then critical
pub fn roll_attack<R: Rng + ?Sized>(
    rng: &mut R,
    hit_chance: f32,
    critical_chance: f32,
    target: Option<AttackTarget>,
) -> AttackRoll {
    if !roll(rng, hit_chance) {
        return AttackRoll::miss();
    }
    let critical = roll(rng, critical_chance);
    AttackRoll {
        hit: true,
        critical,
        multiplier: if critical {
            critical_multiplier(target)
        } else {
            1.0
        },
    }
}
