//! Animal behavior state machine
//!
//! The animal is always in exactly one behavior. Boldness drives
//! escalation and retreat; time spent in a behavior forces commitment.
//! An attack always leaves the animal Recovering on the next turn.

use crate::combat::roll;
use crate::combat::zone::Zone;
use crate::core::config::CombatConfig;
use crate::core::types::Turn;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the animal is doing this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalBehavior {
    /// Sizing the player up at a distance
    Circling,
    /// Closing in
    Approaching,
    /// Posturing before a lunge
    Threatening,
    /// Committed to a charge this turn
    Attacking,
    /// Off balance after an attack, exposed
    Recovering,
    /// Backing off
    Retreating,
    /// Leaving the fight
    Disengaging,
}

impl AnimalBehavior {
    pub fn all() -> [AnimalBehavior; 7] {
        [
            AnimalBehavior::Circling,
            AnimalBehavior::Approaching,
            AnimalBehavior::Threatening,
            AnimalBehavior::Attacking,
            AnimalBehavior::Recovering,
            AnimalBehavior::Retreating,
            AnimalBehavior::Disengaging,
        ]
    }

    /// Multiplier on the player's chance to hit the animal
    pub fn hit_chance_modifier(&self) -> f32 {
        match self {
            AnimalBehavior::Circling => 0.9,
            AnimalBehavior::Approaching => 1.0,
            AnimalBehavior::Threatening => 0.95,
            AnimalBehavior::Attacking => 1.1,
            AnimalBehavior::Recovering => 1.5,
            AnimalBehavior::Retreating => 0.8,
            AnimalBehavior::Disengaging => 0.85,
        }
    }

    /// Chance that a player hit is critical
    pub fn critical_chance(&self) -> f32 {
        match self {
            AnimalBehavior::Circling => 0.05,
            AnimalBehavior::Approaching => 0.06,
            AnimalBehavior::Threatening => 0.05,
            AnimalBehavior::Attacking => 0.10,
            AnimalBehavior::Recovering => 0.25,
            AnimalBehavior::Retreating => 0.04,
            AnimalBehavior::Disengaging => 0.04,
        }
    }

    /// Present-tense description used in snapshots and narration
    pub fn describe(&self) -> &'static str {
        match self {
            AnimalBehavior::Circling => "circling you",
            AnimalBehavior::Approaching => "closing in",
            AnimalBehavior::Threatening => "threatening you",
            AnimalBehavior::Attacking => "about to attack",
            AnimalBehavior::Recovering => "off balance",
            AnimalBehavior::Retreating => "backing away",
            AnimalBehavior::Disengaging => "leaving",
        }
    }
}

/// A behavior change produced at the end of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorTransition {
    pub from: AnimalBehavior,
    pub to: AnimalBehavior,
}

/// Behavior and boldness of the animal for one encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorState {
    current: AnimalBehavior,
    /// 0.0 = terrified, 1.0 = reckless
    boldness: f32,
    turns_in_state: u32,
}

impl BehaviorState {
    pub fn new(initial: AnimalBehavior, boldness: f32) -> Self {
        let mut state = Self {
            current: initial,
            boldness: 0.5,
            turns_in_state: 0,
        };
        state.set_boldness(boldness);
        state
    }

    pub fn current(&self) -> AnimalBehavior {
        self.current
    }

    pub fn boldness(&self) -> f32 {
        self.boldness
    }

    pub fn turns_in_state(&self) -> u32 {
        self.turns_in_state
    }

    /// The attack phase runs only while Attacking
    pub fn will_attack_this_turn(&self) -> bool {
        self.current == AnimalBehavior::Attacking
    }

    /// Apply a boldness change (additive, clamped to [0, 1])
    pub fn modify_boldness(&mut self, delta: f32) {
        if delta.is_finite() {
            self.set_boldness(self.boldness + delta);
        }
    }

    fn set_boldness(&mut self, value: f32) {
        self.boldness = if value.is_finite() {
            value.clamp(0.0, 1.0)
        } else {
            0.5
        };
    }

    pub fn hit_chance_modifier(&self) -> f32 {
        self.current.hit_chance_modifier()
    }

    pub fn critical_chance(&self) -> f32 {
        self.current.critical_chance()
    }

    /// Jump straight to a behavior (e.g. a pinned animal is forced to recover)
    pub fn force(&mut self, next: AnimalBehavior) -> Option<BehaviorTransition> {
        self.transition_to(next)
    }

    fn transition_to(&mut self, next: AnimalBehavior) -> Option<BehaviorTransition> {
        if next == self.current {
            return None;
        }
        let transition = BehaviorTransition {
            from: self.current,
            to: next,
        };
        self.current = next;
        self.turns_in_state = 0;
        Some(transition)
    }

    /// Advance the machine at the end of a turn
    ///
    /// `turn` is the number of completed turns, used for engagement fatigue.
    pub fn end_turn<R: Rng + ?Sized>(
        &mut self,
        zone: Zone,
        turn: Turn,
        config: &CombatConfig,
        rng: &mut R,
    ) -> Option<BehaviorTransition> {
        if turn >= config.engagement_fatigue_turn {
            self.modify_boldness(-config.fatigue_boldness_decay);
        }
        self.turns_in_state += 1;

        let next = self.next_behavior(zone, config, rng)?;
        self.transition_to(next)
    }

    fn next_behavior<R: Rng + ?Sized>(
        &self,
        zone: Zone,
        config: &CombatConfig,
        rng: &mut R,
    ) -> Option<AnimalBehavior> {
        use AnimalBehavior::*;

        let bold = self.boldness;
        let timid = bold < config.retreat_threshold;
        let t = self.turns_in_state;

        match self.current {
            // Every attack opens a window
            Attacking => Some(Recovering),

            Recovering => Some(if timid { Retreating } else { Circling }),

            Circling => {
                if timid {
                    Some(Retreating)
                } else if bold >= config.aggressive_threshold {
                    Some(if zone.is_close_or_nearer() {
                        Threatening
                    } else {
                        Approaching
                    })
                } else if t >= config.circling_max_turns {
                    Some(if bold >= config.regroup_threshold {
                        Approaching
                    } else {
                        Retreating
                    })
                } else if t >= config.circling_patience && roll(rng, bold) {
                    Some(Approaching)
                } else {
                    None
                }
            }

            Approaching => {
                if timid {
                    Some(Retreating)
                } else if zone.is_close_or_nearer() || t >= config.approach_max_turns {
                    Some(Threatening)
                } else {
                    None
                }
            }

            Threatening => {
                if timid {
                    Some(Retreating)
                } else if t >= config.threaten_max_turns || roll(rng, bold) {
                    Some(Attacking)
                } else {
                    None
                }
            }

            Retreating => {
                if bold >= config.regroup_threshold {
                    Some(Circling)
                } else if t >= config.retreat_max_turns {
                    Some(Disengaging)
                } else {
                    None
                }
            }

            Disengaging => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Every roll fails
    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    /// Every roll succeeds
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    #[test]
    fn test_only_attacking_attacks() {
        for behavior in AnimalBehavior::all() {
            let state = BehaviorState::new(behavior, 0.5);
            assert_eq!(
                state.will_attack_this_turn(),
                behavior == AnimalBehavior::Attacking
            );
        }
    }

    #[test]
    fn test_boldness_clamped() {
        let mut state = BehaviorState::new(AnimalBehavior::Circling, 0.5);
        state.modify_boldness(2.0);
        assert_eq!(state.boldness(), 1.0);
        state.modify_boldness(-5.0);
        assert_eq!(state.boldness(), 0.0);
        state.modify_boldness(f32::NAN);
        assert_eq!(state.boldness(), 0.0);
    }

    #[test]
    fn test_initial_boldness_clamped() {
        assert_eq!(BehaviorState::new(AnimalBehavior::Circling, 3.0).boldness(), 1.0);
        assert_eq!(BehaviorState::new(AnimalBehavior::Circling, -1.0).boldness(), 0.0);
    }

    #[test]
    fn test_attack_always_followed_by_recovery() {
        let config = CombatConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for boldness in [0.0, 0.3, 0.69, 1.0] {
            let mut state = BehaviorState::new(AnimalBehavior::Attacking, boldness);
            let transition = state.end_turn(Zone::Melee, 1, &config, &mut rng);
            assert_eq!(transition.map(|t| t.to), Some(AnimalBehavior::Recovering));
        }
    }

    #[test]
    fn test_recovering_lasts_one_turn() {
        let config = CombatConfig::default();
        let mut state = BehaviorState::new(AnimalBehavior::Recovering, 0.6);
        let transition = state.end_turn(Zone::Melee, 1, &config, &mut never());
        assert_eq!(transition.map(|t| t.to), Some(AnimalBehavior::Circling));

        let mut timid = BehaviorState::new(AnimalBehavior::Recovering, 0.1);
        let transition = timid.end_turn(Zone::Melee, 1, &config, &mut never());
        assert_eq!(transition.map(|t| t.to), Some(AnimalBehavior::Retreating));
    }

    #[test]
    fn test_bold_circler_escalates_by_zone() {
        let config = CombatConfig::default();
        let mut near = BehaviorState::new(AnimalBehavior::Circling, 0.8);
        let t = near.end_turn(Zone::Close, 1, &config, &mut never());
        assert_eq!(t.map(|t| t.to), Some(AnimalBehavior::Threatening));

        let mut far = BehaviorState::new(AnimalBehavior::Circling, 0.8);
        let t = far.end_turn(Zone::Far, 1, &config, &mut never());
        assert_eq!(t.map(|t| t.to), Some(AnimalBehavior::Approaching));
    }

    #[test]
    fn test_circling_commits_after_max_turns() {
        let config = CombatConfig::default();
        let mut state = BehaviorState::new(AnimalBehavior::Circling, 0.55);
        let mut last = None;
        for turn in 1..=config.circling_max_turns {
            last = state.end_turn(Zone::Mid, turn, &config, &mut never());
        }
        assert_eq!(last.map(|t| t.to), Some(AnimalBehavior::Approaching));

        let mut wary = BehaviorState::new(AnimalBehavior::Circling, 0.4);
        for turn in 1..=config.circling_max_turns {
            last = wary.end_turn(Zone::Mid, turn, &config, &mut never());
        }
        assert_eq!(last.map(|t| t.to), Some(AnimalBehavior::Retreating));
    }

    #[test]
    fn test_circling_roll_respects_patience() {
        let config = CombatConfig::default();
        let mut state = BehaviorState::new(AnimalBehavior::Circling, 0.5);
        // First turn is below patience even with a winning roll
        assert!(state.end_turn(Zone::Mid, 1, &config, &mut always()).is_none());
        let t = state.end_turn(Zone::Mid, 2, &config, &mut always());
        assert_eq!(t.map(|t| t.to), Some(AnimalBehavior::Approaching));
    }

    #[test]
    fn test_threatening_forced_to_attack() {
        let config = CombatConfig::default();
        let mut state = BehaviorState::new(AnimalBehavior::Threatening, 0.5);
        let mut last = None;
        for turn in 1..=config.threaten_max_turns {
            last = state.end_turn(Zone::Close, turn, &config, &mut never());
        }
        assert_eq!(last.map(|t| t.to), Some(AnimalBehavior::Attacking));
    }

    #[test]
    fn test_timid_animal_retreats_then_disengages() {
        let config = CombatConfig::default();
        let mut state = BehaviorState::new(AnimalBehavior::Threatening, 0.1);
        let t = state.end_turn(Zone::Close, 1, &config, &mut never());
        assert_eq!(t.map(|t| t.to), Some(AnimalBehavior::Retreating));

        let mut last = None;
        for turn in 2..=(1 + config.retreat_max_turns) {
            last = state.end_turn(Zone::Mid, turn, &config, &mut never());
        }
        assert_eq!(last.map(|t| t.to), Some(AnimalBehavior::Disengaging));
        assert!(state
            .end_turn(Zone::Far, 10, &config, &mut never())
            .is_none());
    }

    #[test]
    fn test_engagement_fatigue_drains_boldness() {
        let config = CombatConfig::default();
        let mut state = BehaviorState::new(AnimalBehavior::Disengaging, 0.9);
        state.end_turn(Zone::Far, config.engagement_fatigue_turn - 1, &config, &mut never());
        assert_eq!(state.boldness(), 0.9);
        state.end_turn(Zone::Far, config.engagement_fatigue_turn, &config, &mut never());
        assert!((state.boldness() - (0.9 - config.fatigue_boldness_decay)).abs() < 1e-6);
    }

    #[test]
    fn test_recovering_is_the_vulnerability_window() {
        let recovering = AnimalBehavior::Recovering;
        for other in AnimalBehavior::all() {
            if other != recovering {
                assert!(recovering.hit_chance_modifier() > other.hit_chance_modifier());
                assert!(recovering.critical_chance() > other.critical_chance());
            }
        }
    }

    #[test]
    fn test_force_resets_dwell_time() {
        let mut state = BehaviorState::new(AnimalBehavior::Threatening, 0.5);
        let config = CombatConfig::default();
        state.end_turn(Zone::Close, 1, &config, &mut never());
        assert_eq!(state.turns_in_state(), 1);
        let t = state.force(AnimalBehavior::Recovering);
        assert!(t.is_some());
        assert_eq!(state.turns_in_state(), 0);
        assert!(state.force(AnimalBehavior::Recovering).is_none());
    }
}
