//! Damage requests and the body boundary
//!
//! Combat never touches anatomy directly. It builds a `DamageInfo`,
//! hands it to a `Body`, and reads back what actually happened.

use serde::{Deserialize, Serialize};

/// How the damage is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    /// Clubs, stones, shoulders, hooves
    Blunt,
    /// Claws, knives, tusks
    Sharp,
    /// Spears, teeth
    Pierce,
}

/// Fraction of each damage type stopped by armor or hide (0.0 to 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ArmorMitigation {
    pub blunt: f32,
    pub sharp: f32,
    pub pierce: f32,
}

impl ArmorMitigation {
    pub fn none() -> Self {
        Self::default()
    }

    /// Cured hide clothing
    pub fn leather() -> Self {
        Self {
            blunt: 0.10,
            sharp: 0.20,
            pierce: 0.10,
        }
    }

    /// Thick fur and fat of large animals
    pub fn thick_hide() -> Self {
        Self {
            blunt: 0.20,
            sharp: 0.15,
            pierce: 0.05,
        }
    }

    pub fn for_type(&self, damage_type: DamageType) -> f32 {
        let value = match damage_type {
            DamageType::Blunt => self.blunt,
            DamageType::Sharp => self.sharp,
            DamageType::Pierce => self.pierce,
        };
        value.clamp(0.0, 1.0)
    }
}

/// A damage request sent to the body model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageInfo {
    pub amount: f32,
    pub damage_type: DamageType,
    /// Named region; `None` lets the body pick
    pub target_region: Option<String>,
    pub armor: Option<ArmorMitigation>,
}

impl DamageInfo {
    pub fn new(amount: f32, damage_type: DamageType) -> Self {
        Self {
            amount,
            damage_type,
            target_region: None,
            armor: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.target_region = Some(region.into());
        self
    }

    pub fn with_armor(mut self, armor: ArmorMitigation) -> Self {
        self.armor = Some(armor);
        self
    }
}

/// Side effects reported by the body model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffect {
    Bleeding,
    Limping,
    Dazed,
    Winded,
}

impl StatusEffect {
    pub fn describe(&self) -> &'static str {
        match self {
            StatusEffect::Bleeding => "bleeding",
            StatusEffect::Limping => "limping",
            StatusEffect::Dazed => "dazed",
            StatusEffect::Winded => "winded",
        }
    }
}

/// What the body model actually did with a request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub applied: f32,
    pub hit_region: String,
    pub effects: Vec<StatusEffect>,
}

impl DamageResult {
    pub fn nothing(region: impl Into<String>) -> Self {
        Self {
            applied: 0.0,
            hit_region: region.into(),
            effects: Vec::new(),
        }
    }
}

/// Physical capacities derived from injuries (0.0 to 1.0 each)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Capacities {
    pub moving: f32,
    pub manipulation: f32,
    pub strength: f32,
}

impl Default for Capacities {
    fn default() -> Self {
        Self {
            moving: 1.0,
            manipulation: 1.0,
            strength: 1.0,
        }
    }
}

impl Capacities {
    pub fn clamped(self) -> Self {
        Self {
            moving: clamp_unit(self.moving),
            manipulation: clamp_unit(self.manipulation),
            strength: clamp_unit(self.strength),
        }
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Anatomical model owned by the surrounding game
pub trait Body {
    /// Turn a damage request into injury
    fn apply_damage(&mut self, damage: &DamageInfo) -> DamageResult;

    /// Overall condition, 0.0 = dead, 1.0 = unhurt
    fn vitality(&self) -> f32;

    fn is_alive(&self) -> bool {
        self.vitality() > 0.0
    }

    fn capacities(&self) -> Capacities {
        Capacities::default()
    }

    fn weight_kg(&self) -> f32;
}

/// Send one damage request to a body
///
/// Negative or non-finite amounts are sent as zero; the call is still made
/// so every resolved attack produces exactly one damage application.
pub fn apply_damage(body: &mut dyn Body, mut damage: DamageInfo) -> DamageResult {
    if !damage.amount.is_finite() || damage.amount < 0.0 {
        damage.amount = 0.0;
    }
    let result = body.apply_damage(&damage);
    tracing::debug!(
        amount = damage.amount,
        applied = result.applied,
        region = %result.hit_region,
        "damage applied"
    );
    result
}

/// Comma-separated list of effects for narration
pub fn describe_effects(effects: &[StatusEffect]) -> String {
    effects
        .iter()
        .map(|e| e.describe())
        .collect::<Vec<_>>()
        .join(", ")
}
