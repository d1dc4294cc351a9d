//! Property tests for the combat rules
//!
//! Zone bucketing, probability clamps and the boldness range hold for any
//! input; random encounters always reach an outcome.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wild_encounter::combat::constants::{MAX_HIT_CHANCE, MID_MAX_METERS, MIN_HIT_CHANCE};
use wild_encounter::combat::targeting::{strike_hit_chance, throw_hit_chance};
use wild_encounter::combat::{
    target_hit_chance, AnimalBehavior, AnimalProfile, AttackTarget, BehaviorState, CombatState,
    DefenseChoice, Loadout, SimpleBody, Zone,
};
use wild_encounter::core::config::CombatConfig;
use wild_encounter::encounter::animal_turn::resolve_charge;
use wild_encounter::encounter::{Encounter, NoHooks, Participants, RandomPresenter};

fn any_behavior() -> impl Strategy<Value = AnimalBehavior> {
    prop::sample::select(AnimalBehavior::all().to_vec())
}

fn any_target() -> impl Strategy<Value = AttackTarget> {
    prop::sample::select(AttackTarget::all().to_vec())
}

fn any_animal() -> impl Strategy<Value = &'static str> {
    prop::sample::select(AnimalProfile::preset_names().to_vec())
}

proptest! {
    #[test]
    fn test_zone_buckets_cover_every_distance(distance in 0.0f32..200.0) {
        let zone = Zone::from_distance(distance);
        if distance >= MID_MAX_METERS {
            prop_assert_eq!(zone, Zone::Far);
        } else {
            let (lo, hi) = zone.bounds();
            prop_assert!(lo <= distance && distance < hi);
        }
    }

    #[test]
    fn test_state_zone_follows_distance(start in 0.0f32..40.0, moves in prop::collection::vec(-10.0f32..10.0, 0..20)) {
        let mut state = CombatState::new(start, BehaviorState::new(AnimalBehavior::Circling, 0.5));
        for delta in moves {
            state.animal_move(delta);
            prop_assert!(state.distance() >= 0.0);
            prop_assert_eq!(state.zone(), Zone::from_distance(state.distance()));
        }
    }

    #[test]
    fn test_hit_chances_stay_clamped(behavior in any_behavior(), target in any_target(), armed: bool, distance in 0.0f32..30.0) {
        let targeted = target_hit_chance(behavior, target);
        prop_assert!((MIN_HIT_CHANCE..=MAX_HIT_CHANCE).contains(&targeted));

        let strike = strike_hit_chance(behavior, armed);
        prop_assert!((MIN_HIT_CHANCE..=MAX_HIT_CHANCE).contains(&strike));

        let thrown = throw_hit_chance(0.75, distance, 20.0, behavior);
        prop_assert!((0.0..=MAX_HIT_CHANCE).contains(&thrown));
    }

    #[test]
    fn test_boldness_stays_in_unit_range(initial in -2.0f32..3.0, deltas in prop::collection::vec(-5.0f32..5.0, 0..30)) {
        let mut behavior = BehaviorState::new(AnimalBehavior::Circling, initial);
        prop_assert!((0.0..=1.0).contains(&behavior.boldness()));
        for delta in deltas {
            behavior.modify_boldness(delta);
            prop_assert!((0.0..=1.0).contains(&behavior.boldness()));
        }
    }

    #[test]
    fn test_recovering_is_the_opening(target in any_target()) {
        use wild_encounter::combat::targeting::target_critical_chance;

        let recovering = target_hit_chance(AnimalBehavior::Recovering, target);
        let recovering_crit = target_critical_chance(AnimalBehavior::Recovering, target);
        for other in [AnimalBehavior::Threatening, AnimalBehavior::Circling] {
            prop_assert!(recovering > target_hit_chance(other, target));
            prop_assert!(recovering_crit > target_critical_chance(other, target));
        }
    }

    #[test]
    fn test_brace_covers_one_charge(distance in 0.0f32..15.0, boldness in 0.0f32..1.0, seed: u64, name in any_animal()) {
        let Some(animal) = AnimalProfile::from_name(name) else {
            return Err(TestCaseError::fail(format!("missing preset {}", name)));
        };
        let config = CombatConfig::default();
        let mut animal_body = animal.body();
        let mut player_body = SimpleBody::human(100.0, 70.0);
        let mut loadout = Loadout::hunter();
        let mut participants = Participants::new(&animal, &mut animal_body, &mut player_body, &mut loadout);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut state = CombatState::new(distance, BehaviorState::new(AnimalBehavior::Attacking, boldness));
        state.brace();
        let first = resolve_charge(&mut state, &mut participants, DefenseChoice::None, &config, &mut rng);
        prop_assert!(!state.is_braced());
        prop_assert!(first.counter_damage > 0.0);

        let second = resolve_charge(&mut state, &mut participants, DefenseChoice::None, &config, &mut rng);
        prop_assert_eq!(second.counter_damage, 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_random_encounters_always_end(seed: u64, name in any_animal(), distance in 0.0f32..30.0, meat in prop::bool::ANY) {
        let Some(animal) = AnimalProfile::from_name(name) else {
            return Err(TestCaseError::fail(format!("missing preset {}", name)));
        };
        let config = CombatConfig::default();
        let mut animal_body = animal.body();
        let mut player_body = SimpleBody::human(100.0, 70.0);
        let mut loadout = Loadout::hunter().with_meat(if meat { 2.0 } else { 0.0 });
        let participants = Participants::new(&animal, &mut animal_body, &mut player_body, &mut loadout);

        let encounter = Encounter::new(participants, config.clone(), ChaCha8Rng::seed_from_u64(seed), distance);
        let mut presenter = RandomPresenter::new(ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)));

        match encounter.run(&mut presenter, &mut NoHooks) {
            Ok(report) => {
                prop_assert!(report.turns < config.max_turns);
                prop_assert_eq!(report.log.outcome(), Some(report.outcome));
            }
            Err(e) => prop_assert!(false, "seed {} against {}: {}", seed, name, e),
        }
    }
}
