//! Combat rules - distance, behavior, targeting and damage
//!
//! Pure rules with no knowledge of turns or presentation. The encounter
//! module drives these once per turn.
//!
//! Key ideas:
//! - Distance in meters is authoritative, zones are derived
//! - The animal's behavior decides when it attacks and how exposed it is
//! - Every attack is followed by a recovery window

pub mod animal;
pub mod behavior;
pub mod body;
pub mod constants;
pub mod damage;
pub mod defense;
pub mod equipment;
pub mod outcome;
pub mod state;
pub mod targeting;
pub mod zone;

// Re-exports for convenient access
pub use animal::AnimalProfile;
pub use behavior::{AnimalBehavior, BehaviorState, BehaviorTransition};
pub use body::{BodyRegion, RegionKind, SimpleBody, WoundSeverity};
pub use damage::{
    apply_damage, ArmorMitigation, Body, Capacities, DamageInfo, DamageResult, DamageType,
    StatusEffect,
};
pub use defense::{DefenseChoice, DefenseResult};
pub use equipment::{Inventory, Loadout, Weapon, WeaponClass};
pub use outcome::CombatOutcome;
pub use state::{CombatState, ThrownWeapon};
pub use targeting::{target_hit_chance, AttackRoll, AttackTarget};
pub use zone::Zone;

use rand::Rng;

/// Single probability check against the session RNG
pub(crate) fn roll<R: Rng + ?Sized>(rng: &mut R, chance: f32) -> bool {
    rng.gen::<f32>() < chance
}
