//! Combat design constants - fixed values in one place
//!
//! These are design constants, not tuning knobs. Tuning lives in
//! `core::config::CombatConfig`.

// Zone boundaries (meters, lower bound inclusive)
pub const MELEE_MAX_METERS: f32 = 3.0;
pub const CLOSE_MAX_METERS: f32 = 8.0;
pub const MID_MAX_METERS: f32 = 15.0;
/// Nominal outer edge of the Far zone (display only; Far is unbounded)
pub const FAR_MAX_METERS: f32 = 25.0;

// Targeted hit chances
pub const BASE_HIT_LEGS: f32 = 0.70;
pub const BASE_HIT_TORSO: f32 = 0.80;
pub const BASE_HIT_HEAD: f32 = 0.50;
pub const MIN_HIT_CHANCE: f32 = 0.10;
pub const MAX_HIT_CHANCE: f32 = 0.95;
/// Weight of the behavior hit modifier in the targeted formula
pub const BEHAVIOR_MODIFIER_WEIGHT: f32 = 0.2;

// Untargeted strikes
pub const ARMED_STRIKE_CHANCE: f32 = 0.70;
pub const UNARMED_STRIKE_CHANCE: f32 = 0.60;
pub const UNARMED_DAMAGE: f32 = 2.0;

// Critical hits
pub const CRITICAL_MULTIPLIER: f32 = 2.5;
pub const HEAD_CRITICAL_MULTIPLIER: f32 = 3.0;
pub const HEAD_CRITICAL_CHANCE_FACTOR: f32 = 2.0;

// Thrown weapons
pub const SPEAR_THROW_ACCURACY: f32 = 0.75;
pub const SPEAR_THROW_RANGE_METERS: f32 = 20.0;
pub const STONE_THROW_ACCURACY: f32 = 0.60;
pub const STONE_THROW_RANGE_METERS: f32 = 15.0;
pub const STONE_DAMAGE: f32 = 3.0;
/// How far past the animal a missed throw lands
pub const MISSED_THROW_OVERSHOOT_METERS: f32 = 2.0;
/// How far beyond the animal a thrown weapon can still be recovered
pub const RETRIEVE_MARGIN_METERS: f32 = 2.0;

// Boldness deltas from player actions (ADDITIVE)
pub const HOLD_GROUND_BOLDNESS: f32 = -0.05;
pub const BACK_AWAY_BOLDNESS: f32 = 0.05;
pub const CAREFUL_RETREAT_BOLDNESS: f32 = 0.03;
pub const INTIMIDATE_SUCCESS_BOLDNESS: f32 = -0.2;
pub const INTIMIDATE_FAILURE_BOLDNESS: f32 = -0.05;
pub const SHOVE_BOLDNESS: f32 = -0.05;
pub const STONE_HIT_BOLDNESS: f32 = -0.05;
pub const FAILED_ESCAPE_BOLDNESS: f32 = 0.05;

// Initial boldness bounds
pub const MIN_INITIAL_BOLDNESS: f32 = 0.1;
pub const MAX_INITIAL_BOLDNESS: f32 = 0.95;

// Free attacks granted by risky player actions (damage multipliers)
pub const RETRIEVE_ATTACK_SCALE: f32 = 0.5;
pub const FAILED_GRAPPLE_ATTACK_SCALE: f32 = 0.75;
pub const FAILED_PLAY_DEAD_ATTACK_SCALE: f32 = 1.5;

// Shove / grapple
pub const SHOVE_PUSH_METERS: f32 = 3.0;
pub const GRAPPLE_DAMAGE: f32 = 4.0;

// Animal non-attack behavior
pub const CIRCLING_SHIFT_CHANCE: f32 = 0.3;
pub const THREATEN_CLOSE_CHANCE: f32 = 0.4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_boundaries_ordered() {
        assert!(MELEE_MAX_METERS < CLOSE_MAX_METERS);
        assert!(CLOSE_MAX_METERS < MID_MAX_METERS);
        assert!(MID_MAX_METERS < FAR_MAX_METERS);
    }

    #[test]
    fn test_hit_chance_bounds_reasonable() {
        assert!(MIN_HIT_CHANCE > 0.0 && MIN_HIT_CHANCE < MAX_HIT_CHANCE);
        assert!(MAX_HIT_CHANCE < 1.0);
        assert!(BASE_HIT_HEAD < BASE_HIT_LEGS && BASE_HIT_LEGS < BASE_HIT_TORSO);
    }

    #[test]
    fn test_careful_retreat_emboldens_less() {
        assert!(CAREFUL_RETREAT_BOLDNESS < BACK_AWAY_BOLDNESS);
        assert!(HOLD_GROUND_BOLDNESS < 0.0);
    }

    #[test]
    fn test_head_crit_beats_body_crit() {
        assert!(HEAD_CRITICAL_MULTIPLIER > CRITICAL_MULTIPLIER);
    }
}
