//! Region-based reference body model
//!
//! Hosts with their own anatomy implement `Body` themselves; this model
//! backs the binaries and tests. Untargeted hits are spread across regions
//! by hit weight using a deterministic low-discrepancy sequence, so the
//! body never needs its own random source.

use crate::combat::damage::{Body, Capacities, DamageInfo, DamageResult, DamageType, StatusEffect};
use serde::{Deserialize, Serialize};

/// Severity of a single hit relative to the region it landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WoundSeverity {
    /// No wound
    None,
    /// Cosmetic only
    Scratch,
    /// Painful but functional
    Minor,
    /// Impaired function
    Serious,
    /// Disabled
    Critical,
    /// Region gone
    Destroyed,
}

impl WoundSeverity {
    /// Bucket the share of a region's maximum health removed by one hit
    pub fn from_fraction(fraction: f32) -> Self {
        if !(fraction > 0.0) {
            WoundSeverity::None
        } else if fraction < 0.10 {
            WoundSeverity::Scratch
        } else if fraction < 0.25 {
            WoundSeverity::Minor
        } else if fraction < 0.50 {
            WoundSeverity::Serious
        } else if fraction < 1.0 {
            WoundSeverity::Critical
        } else {
            WoundSeverity::Destroyed
        }
    }
}

/// Functional category of a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionKind {
    /// Fatal when destroyed
    Head,
    /// Fatal when destroyed
    Neck,
    /// Center mass, fatal when destroyed
    Torso,
    Arm,
    Leg,
}

impl RegionKind {
    /// Does losing this region kill?
    pub fn is_vital(&self) -> bool {
        matches!(self, RegionKind::Head | RegionKind::Neck | RegionKind::Torso)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyRegion {
    pub name: String,
    pub kind: RegionKind,
    pub max_hp: f32,
    pub hp: f32,
    /// Relative chance of an untargeted hit landing here
    pub hit_weight: f32,
}

impl BodyRegion {
    /// Remaining health fraction
    pub fn condition(&self) -> f32 {
        if self.max_hp <= 0.0 {
            0.0
        } else {
            (self.hp / self.max_hp).clamp(0.0, 1.0)
        }
    }
}

/// (name, kind, share of total health, hit weight)
type RegionLayout = (&'static str, RegionKind, f32, f32);

const HUMAN_LAYOUT: [RegionLayout; 7] = [
    ("Head", RegionKind::Head, 0.10, 0.08),
    ("Chest", RegionKind::Torso, 0.30, 0.35),
    ("Abdomen", RegionKind::Torso, 0.20, 0.17),
    ("Left Arm", RegionKind::Arm, 0.08, 0.10),
    ("Right Arm", RegionKind::Arm, 0.08, 0.10),
    ("Left Leg", RegionKind::Leg, 0.12, 0.10),
    ("Right Leg", RegionKind::Leg, 0.12, 0.10),
];

const QUADRUPED_LAYOUT: [RegionLayout; 8] = [
    ("Head", RegionKind::Head, 0.12, 0.10),
    ("Neck", RegionKind::Neck, 0.08, 0.08),
    ("Chest", RegionKind::Torso, 0.28, 0.30),
    ("Belly", RegionKind::Torso, 0.16, 0.14),
    ("Left Foreleg", RegionKind::Leg, 0.09, 0.095),
    ("Right Foreleg", RegionKind::Leg, 0.09, 0.095),
    ("Left Hind Leg", RegionKind::Leg, 0.09, 0.095),
    ("Right Hind Leg", RegionKind::Leg, 0.09, 0.095),
];

/// Fractional part of the golden ratio, spreads successive hits evenly
const HIT_SEQUENCE_STEP: f32 = 0.618_034;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleBody {
    regions: Vec<BodyRegion>,
    weight_kg: f32,
    untargeted_hits: u32,
}

impl SimpleBody {
    /// Two arms, two legs
    pub fn human(total_hp: f32, weight_kg: f32) -> Self {
        Self::from_layout(&HUMAN_LAYOUT, total_hp, weight_kg)
    }

    /// Four legs, head and neck forward
    pub fn quadruped(total_hp: f32, weight_kg: f32) -> Self {
        Self::from_layout(&QUADRUPED_LAYOUT, total_hp, weight_kg)
    }

    fn from_layout(layout: &[RegionLayout], total_hp: f32, weight_kg: f32) -> Self {
        let total_hp = total_hp.max(0.0);
        let regions = layout
            .iter()
            .map(|&(name, kind, share, hit_weight)| BodyRegion {
                name: name.to_string(),
                kind,
                max_hp: total_hp * share,
                hp: total_hp * share,
                hit_weight,
            })
            .collect();
        Self {
            regions,
            weight_kg,
            untargeted_hits: 0,
        }
    }

    pub fn regions(&self) -> &[BodyRegion] {
        &self.regions
    }

    pub fn region(&self, name: &str) -> Option<&BodyRegion> {
        self.regions
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name))
    }

    fn region_index(&self, name: &str) -> Option<usize> {
        self.regions
            .iter()
            .position(|r| r.name.eq_ignore_ascii_case(name))
    }

    /// First torso region takes overflow from destroyed limbs
    fn core_index(&self) -> Option<usize> {
        self.regions.iter().position(|r| r.kind == RegionKind::Torso)
    }

    fn pick_region(&mut self, requested: Option<&str>) -> usize {
        if let Some(index) = requested.and_then(|name| self.region_index(name)) {
            return index;
        }

        let total: f32 = self.regions.iter().map(|r| r.hit_weight).sum();
        self.untargeted_hits = self.untargeted_hits.wrapping_add(1);
        let point = (self.untargeted_hits as f32 * HIT_SEQUENCE_STEP).fract() * total;

        let mut cumulative = 0.0;
        for (index, region) in self.regions.iter().enumerate() {
            cumulative += region.hit_weight;
            if point < cumulative {
                return index;
            }
        }
        self.regions.len().saturating_sub(1)
    }

    fn average_condition(&self, kind: RegionKind) -> Option<f32> {
        let conditions: Vec<f32> = self
            .regions
            .iter()
            .filter(|r| r.kind == kind)
            .map(|r| r.condition())
            .collect();
        if conditions.is_empty() {
            None
        } else {
            Some(conditions.iter().sum::<f32>() / conditions.len() as f32)
        }
    }
}

fn effects_for(kind: RegionKind, damage_type: DamageType, severity: WoundSeverity) -> Vec<StatusEffect> {
    let mut effects = Vec::new();
    if severity >= WoundSeverity::Minor
        && matches!(damage_type, DamageType::Sharp | DamageType::Pierce)
    {
        effects.push(StatusEffect::Bleeding);
    }
    if severity >= WoundSeverity::Minor && kind == RegionKind::Leg {
        effects.push(StatusEffect::Limping);
    }
    if severity >= WoundSeverity::Serious && kind == RegionKind::Head {
        effects.push(StatusEffect::Dazed);
    }
    if severity >= WoundSeverity::Minor
        && kind == RegionKind::Torso
        && damage_type == DamageType::Blunt
    {
        effects.push(StatusEffect::Winded);
    }
    effects
}

impl Body for SimpleBody {
    fn apply_damage(&mut self, damage: &DamageInfo) -> DamageResult {
        if self.regions.is_empty() {
            return DamageResult::nothing("body");
        }

        let index = self.pick_region(damage.target_region.as_deref());
        let mitigation = damage
            .armor
            .map(|a| a.for_type(damage.damage_type))
            .unwrap_or(0.0);
        let amount = (damage.amount * (1.0 - mitigation)).max(0.0);

        let region = &mut self.regions[index];
        let name = region.name.clone();
        let kind = region.kind;
        if amount <= 0.0 {
            return DamageResult::nothing(name);
        }

        let severity = WoundSeverity::from_fraction(amount / region.max_hp.max(f32::EPSILON));
        let dealt = amount.min(region.hp);
        region.hp -= dealt;
        let mut applied = dealt;

        let overflow = amount - dealt;
        if overflow > 0.0 {
            if let Some(core) = self.core_index().filter(|&c| c != index) {
                let core = &mut self.regions[core];
                let spill = overflow.min(core.hp);
                core.hp -= spill;
                applied += spill;
            }
        }

        DamageResult {
            applied,
            hit_region: name,
            effects: effects_for(kind, damage.damage_type, severity),
        }
    }

    fn vitality(&self) -> f32 {
        let vital_destroyed = self
            .regions
            .iter()
            .any(|r| r.kind.is_vital() && r.hp <= 0.0);
        if vital_destroyed {
            return 0.0;
        }
        let max: f32 = self.regions.iter().map(|r| r.max_hp).sum();
        if max <= 0.0 {
            return 0.0;
        }
        let hp: f32 = self.regions.iter().map(|r| r.hp.max(0.0)).sum();
        (hp / max).clamp(0.0, 1.0)
    }

    fn capacities(&self) -> Capacities {
        let vitality = self.vitality();
        if vitality <= 0.0 {
            return Capacities {
                moving: 0.0,
                manipulation: 0.0,
                strength: 0.0,
            };
        }

        let legs = self.average_condition(RegionKind::Leg).unwrap_or(1.0);
        // Quadrupeds manipulate with their jaws
        let hands = self
            .average_condition(RegionKind::Arm)
            .or_else(|| self.average_condition(RegionKind::Head))
            .unwrap_or(1.0);
        let core = self.average_condition(RegionKind::Torso).unwrap_or(1.0);

        Capacities {
            moving: legs * (0.5 + 0.5 * vitality),
            manipulation: hands,
            strength: 0.5 * core + 0.5 * vitality,
        }
        .clamped()
    }

    fn weight_kg(&self) -> f32 {
        self.weight_kg
    }
}
