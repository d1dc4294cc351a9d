//! Player actions
//!
//! Action ids are an open string surface: the presenter may send anything.
//! Unknown ids make the player hesitate; known but illegal ids are refused
//! with a narrative and change nothing.

use crate::combat::constants::{
    BACK_AWAY_BOLDNESS, CAREFUL_RETREAT_BOLDNESS, FAILED_ESCAPE_BOLDNESS,
    FAILED_GRAPPLE_ATTACK_SCALE, FAILED_PLAY_DEAD_ATTACK_SCALE, GRAPPLE_DAMAGE,
    HOLD_GROUND_BOLDNESS, INTIMIDATE_FAILURE_BOLDNESS, INTIMIDATE_SUCCESS_BOLDNESS,
    MISSED_THROW_OVERSHOOT_METERS, RETRIEVE_ATTACK_SCALE, SHOVE_BOLDNESS, SHOVE_PUSH_METERS,
    SPEAR_THROW_ACCURACY, SPEAR_THROW_RANGE_METERS, STONE_DAMAGE, STONE_HIT_BOLDNESS,
    STONE_THROW_ACCURACY, STONE_THROW_RANGE_METERS, UNARMED_DAMAGE,
};
use crate::combat::damage::{apply_damage, describe_effects, DamageInfo, DamageResult, DamageType};
use crate::combat::targeting::{
    roll_attack, strike_hit_chance, target_critical_chance, target_hit_chance, throw_hit_chance,
};
use crate::combat::{
    roll, AnimalBehavior, AttackTarget, CombatOutcome, CombatState, DefenseChoice, Zone,
};
use crate::core::config::CombatConfig;
use crate::encounter::animal_turn::free_attack;
use crate::encounter::boundary::CombatPresenter;
use crate::encounter::Participants;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Every action the player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerAction {
    // Movement
    HoldGround,
    CloseDistance,
    BackAway,
    CarefulRetreat,
    // Offense
    Strike,
    Thrust,
    Throw,
    Shove,
    Grapple,
    GoDown,
    // Defense (resolved during the animal's charge)
    Dodge,
    Block,
    Brace,
    GiveGround,
    // Special
    Intimidate,
    Disengage,
    DropMeat,
    RetrieveWeapon,
}

impl PlayerAction {
    /// Presentation order
    pub fn all() -> [PlayerAction; 18] {
        use PlayerAction::*;
        [
            HoldGround,
            CloseDistance,
            BackAway,
            CarefulRetreat,
            Strike,
            Thrust,
            Throw,
            Shove,
            Grapple,
            GoDown,
            Dodge,
            Block,
            Brace,
            GiveGround,
            Intimidate,
            Disengage,
            DropMeat,
            RetrieveWeapon,
        ]
    }

    pub fn id(&self) -> &'static str {
        use PlayerAction::*;
        match self {
            HoldGround => "hold_ground",
            CloseDistance => "close_distance",
            BackAway => "back_away",
            CarefulRetreat => "careful_retreat",
            Strike => "strike",
            Thrust => "thrust",
            Throw => "throw",
            Shove => "shove",
            Grapple => "grapple",
            GoDown => "go_down",
            Dodge => "dodge",
            Block => "block",
            Brace => "brace",
            GiveGround => "give_ground",
            Intimidate => "intimidate",
            Disengage => "disengage",
            DropMeat => "drop_meat",
            RetrieveWeapon => "retrieve_weapon",
        }
    }

    pub fn from_id(id: &str) -> Option<PlayerAction> {
        let id = id.trim();
        Self::all().into_iter().find(|a| a.id().eq_ignore_ascii_case(id))
    }

    pub fn label(&self) -> &'static str {
        use PlayerAction::*;
        match self {
            HoldGround => "Hold your ground",
            CloseDistance => "Close the distance",
            BackAway => "Back away",
            CarefulRetreat => "Retreat carefully",
            Strike => "Strike",
            Thrust => "Thrust with the spear",
            Throw => "Throw",
            Shove => "Shove it off",
            Grapple => "Grapple",
            GoDown => "Go down and play dead",
            Dodge => "Ready a dodge",
            Block => "Ready a block",
            Brace => "Brace the spear",
            GiveGround => "Give ground",
            Intimidate => "Intimidate",
            Disengage => "Disengage",
            DropMeat => "Drop your meat",
            RetrieveWeapon => "Retrieve your weapon",
        }
    }

    /// Prepared defenses resolve during the animal's charge
    pub fn defense(&self) -> DefenseChoice {
        match self {
            PlayerAction::Dodge => DefenseChoice::Dodge,
            PlayerAction::Block => DefenseChoice::Block,
            PlayerAction::Brace => DefenseChoice::Brace,
            PlayerAction::GiveGround => DefenseChoice::GiveGround,
            _ => DefenseChoice::None,
        }
    }
}

/// What an action did this turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// `None` when the id was not recognized
    pub action: Option<PlayerAction>,
    pub narrative: String,
    /// Set when the action ends the encounter immediately
    pub outcome: Option<CombatOutcome>,
    pub defense: DefenseChoice,
}

impl ActionResult {
    fn narrate(action: PlayerAction, narrative: impl Into<String>) -> Self {
        Self {
            action: Some(action),
            narrative: narrative.into(),
            outcome: None,
            defense: DefenseChoice::None,
        }
    }

    fn ending(action: PlayerAction, narrative: impl Into<String>, outcome: CombatOutcome) -> Self {
        Self {
            outcome: Some(outcome),
            ..Self::narrate(action, narrative)
        }
    }

    fn hesitate() -> Self {
        Self {
            action: None,
            narrative: "You hesitate.".into(),
            outcome: None,
            defense: DefenseChoice::None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Legal actions right now, in presentation order
pub fn available_actions(state: &CombatState, participants: &Participants<'_>) -> Vec<PlayerAction> {
    PlayerAction::all()
        .into_iter()
        .filter(|&action| refusal(action, state, participants).is_none())
        .collect()
}

fn spear_in_hand(participants: &Participants<'_>) -> bool {
    participants.inventory.weapon_class().has_reach()
}

fn spear_throw_in_range(state: &CombatState, participants: &Participants<'_>) -> bool {
    participants
        .inventory
        .weapon()
        .is_some_and(|w| w.class.is_throwable())
        && state.distance() <= SPEAR_THROW_RANGE_METERS
}

fn stone_throw_in_range(state: &CombatState, participants: &Participants<'_>) -> bool {
    participants.inventory.stone_count() > 0 && state.distance() <= STONE_THROW_RANGE_METERS
}

/// Why `action` cannot be taken now, or `None` if it is legal
fn refusal(action: PlayerAction, state: &CombatState, participants: &Participants<'_>) -> Option<String> {
    use PlayerAction::*;
    let zone = state.zone();
    let name = &participants.animal.name;

    match action {
        HoldGround | BackAway | CarefulRetreat | Intimidate => None,
        CloseDistance if zone == Zone::Melee => Some(format!("You are already on top of the {}.", name)),
        Strike | Shove | Grapple if zone != Zone::Melee => {
            Some(format!("The {} is out of reach.", name))
        }
        Thrust if !spear_in_hand(participants) => Some("You have no spear to thrust with.".into()),
        Thrust if !zone.is_close_or_nearer() => Some(format!("The {} is beyond your spear.", name)),
        Throw if zone == Zone::Melee => Some("Too close to throw.".into()),
        Throw if !spear_throw_in_range(state, participants) && !stone_throw_in_range(state, participants) => {
            Some("You have nothing to throw that would reach.".into())
        }
        GoDown | Dodge | Block | GiveGround if !zone.is_close_or_nearer() => {
            Some(format!("The {} is too far away for that.", name))
        }
        Brace if !spear_in_hand(participants) => Some("You need a spear to brace.".into()),
        Brace if zone == Zone::Far => Some(format!("The {} is too far away to brace for.", name)),
        Brace if state.is_braced() => Some("Your spear is already set.".into()),
        Disengage if !state.can_disengage() => Some(format!("The {} won't let you slip away from here.", name)),
        DropMeat if !participants.inventory.has_meat() => Some("You have no meat to drop.".into()),
        RetrieveWeapon if !state.can_retrieve_weapon() => Some("Your weapon is out of reach.".into()),
        _ => None,
    }
}

/// Resolve one action id
///
/// `presenter` is consulted only when an action needs a second choice
/// (the thrust target).
pub fn process_action<R: Rng + ?Sized>(
    action_id: &str,
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    presenter: &mut dyn CombatPresenter,
    config: &CombatConfig,
    rng: &mut R,
) -> ActionResult {
    let Some(action) = PlayerAction::from_id(action_id) else {
        tracing::warn!(action_id, "unknown action id");
        return ActionResult::hesitate();
    };

    if let Some(reason) = refusal(action, state, participants) {
        tracing::warn!(action = action.id(), %reason, "action refused");
        return ActionResult::narrate(action, reason);
    }

    tracing::debug!(action = action.id(), distance = state.distance(), "player action");

    use PlayerAction::*;
    match action {
        HoldGround => {
            state.behavior.modify_boldness(HOLD_GROUND_BOLDNESS);
            ActionResult::narrate(action, "You plant your feet and stare it down.")
        }
        CloseDistance => {
            let step = config.player_step_meters * participants.player_body.capacities().moving;
            let moved = state.player_advance(step);
            ActionResult::narrate(action, format!("You close {:.0}m.", moved))
        }
        BackAway => {
            let step = config.player_step_meters * participants.player_body.capacities().moving;
            let moved = state.player_withdraw(step);
            state.behavior.modify_boldness(BACK_AWAY_BOLDNESS);
            ActionResult::narrate(action, format!("You back away {:.0}m.", moved))
        }
        CarefulRetreat => {
            let step = config.player_step_meters
                * config.careful_retreat_speed
                * participants.player_body.capacities().moving;
            let moved = state.player_withdraw(step);
            state.behavior.modify_boldness(CAREFUL_RETREAT_BOLDNESS);
            ActionResult::narrate(
                action,
                format!("You ease back {:.0}m without turning your back.", moved),
            )
        }
        Strike => strike(state, participants, config, rng),
        Thrust => thrust(state, participants, presenter, config, rng),
        Throw => throw(state, participants, config, rng),
        Shove => shove(state, participants, rng),
        Grapple => grapple(state, participants, config, rng),
        GoDown => go_down(state, participants, config, rng),
        Dodge | Block | GiveGround => {
            let narrative = match action {
                Dodge => "You shift your weight, ready to spring aside.",
                Block => "You raise your guard.",
                _ => "You get ready to give ground.",
            };
            ActionResult {
                defense: action.defense(),
                ..ActionResult::narrate(action, narrative)
            }
        }
        Brace => {
            state.brace();
            ActionResult {
                defense: DefenseChoice::Brace,
                ..ActionResult::narrate(action, "You drop the spear butt to the ground and set the point.")
            }
        }
        Intimidate => intimidate(state, participants, rng),
        Disengage => disengage(state, participants, rng),
        DropMeat => {
            let kg = participants.inventory.drop_all_meat();
            ActionResult::ending(
                action,
                format!("You throw down {:.1}kg of meat.", kg),
                CombatOutcome::DistractedWithMeat,
            )
        }
        RetrieveWeapon => retrieve_weapon(state, participants, config, rng),
    }
}

/// Damage the animal, costing it boldness in proportion to vitality lost
pub(crate) fn wound_animal(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    mut damage: DamageInfo,
    config: &CombatConfig,
) -> DamageResult {
    if damage.armor.is_none() {
        if let Some(hide) = participants.animal.armor {
            damage = damage.with_armor(hide);
        }
    }
    let before = participants.animal_body.vitality();
    let result = apply_damage(participants.animal_body, damage);
    let lost = (before - participants.animal_body.vitality()).max(0.0);
    state.behavior.modify_boldness(-config.injury_boldness_loss * lost);
    result
}

fn hit_narrative(what: &str, animal: &str, critical: bool, result: &DamageResult) -> String {
    let mut text = format!(
        "{}{} hits the {}'s {} for {:.0} damage.",
        if critical { "A brutal blow! " } else { "" },
        what,
        animal,
        result.hit_region.to_lowercase(),
        result.applied
    );
    if !result.effects.is_empty() {
        text.push_str(&format!(" It is {}.", describe_effects(&result.effects)));
    }
    text
}

/// Player's damage scaled by how much strength they have left
fn strength_scale(participants: &Participants<'_>) -> f32 {
    0.5 + 0.5 * participants.player_body.capacities().strength
}

fn strike<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    config: &CombatConfig,
    rng: &mut R,
) -> ActionResult {
    let behavior = state.behavior.current();
    let (what, damage, damage_type, armed) = match participants.inventory.weapon() {
        Some(w) => (format!("Your {}", w.name), w.damage, w.damage_type, true),
        None => ("Your fist".to_string(), UNARMED_DAMAGE, DamageType::Blunt, false),
    };

    let attack = roll_attack(
        rng,
        strike_hit_chance(behavior, armed),
        behavior.critical_chance(),
        None,
    );
    if !attack.hit {
        return ActionResult::narrate(PlayerAction::Strike, "You swing and miss.");
    }

    let amount = damage * attack.multiplier * strength_scale(participants);
    let result = wound_animal(state, participants, DamageInfo::new(amount, damage_type), config);
    let name = participants.animal.name.clone();
    ActionResult::narrate(
        PlayerAction::Strike,
        hit_narrative(&what, &name, attack.critical, &result),
    )
}

fn thrust<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    presenter: &mut dyn CombatPresenter,
    config: &CombatConfig,
    rng: &mut R,
) -> ActionResult {
    let Some(spear) = participants.inventory.weapon().cloned() else {
        return ActionResult::narrate(PlayerAction::Thrust, "You have no spear to thrust with.");
    };

    let targets = AttackTarget::all();
    let choice = presenter.choose_target(&targets);
    let target = AttackTarget::from_id(&choice).unwrap_or(AttackTarget::Torso);

    let behavior = state.behavior.current();
    let attack = roll_attack(
        rng,
        target_hit_chance(behavior, target),
        target_critical_chance(behavior, target),
        Some(target),
    );
    let name = participants.animal.name.clone();
    if !attack.hit {
        return ActionResult::narrate(
            PlayerAction::Thrust,
            format!("You thrust at the {}'s {} and miss.", name, target.id()),
        );
    }

    let amount = spear.damage * attack.multiplier * strength_scale(participants);
    let request = DamageInfo::new(amount, spear.damage_type).with_region(target.body_region());
    let result = wound_animal(state, participants, request, config);
    ActionResult::narrate(
        PlayerAction::Thrust,
        hit_narrative("Your spear", &name, attack.critical, &result),
    )
}

fn throw<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    config: &CombatConfig,
    rng: &mut R,
) -> ActionResult {
    let behavior = state.behavior.current();
    let distance = state.distance();
    let name = participants.animal.name.clone();

    if spear_throw_in_range(state, participants) {
        let Some(weapon) = participants.inventory.unequip_weapon() else {
            return ActionResult::narrate(PlayerAction::Throw, "Your hands are empty.");
        };
        // A set brace goes with the spear
        state.take_brace();
        let chance = throw_hit_chance(SPEAR_THROW_ACCURACY, distance, SPEAR_THROW_RANGE_METERS, behavior);
        let attack = roll_attack(rng, chance, behavior.critical_chance(), None);

        let narrative = if attack.hit {
            let request = DamageInfo::new(weapon.damage * attack.multiplier, weapon.damage_type);
            let result = wound_animal(state, participants, request, config);
            state.record_throw(weapon, distance);
            hit_narrative("Your thrown spear", &name, attack.critical, &result)
        } else {
            state.record_throw(weapon, distance + MISSED_THROW_OVERSHOOT_METERS);
            format!("Your spear sails past the {} and skids into the grass.", name)
        };
        return ActionResult::narrate(PlayerAction::Throw, narrative);
    }

    if !participants.inventory.remove_stone() {
        return ActionResult::narrate(PlayerAction::Throw, "You have nothing left to throw.");
    }
    let chance = throw_hit_chance(STONE_THROW_ACCURACY, distance, STONE_THROW_RANGE_METERS, behavior);
    let attack = roll_attack(rng, chance, behavior.critical_chance(), None);
    if !attack.hit {
        return ActionResult::narrate(
            PlayerAction::Throw,
            format!("Your stone bounces harmlessly past the {}.", name),
        );
    }
    let request = DamageInfo::new(STONE_DAMAGE * attack.multiplier, DamageType::Blunt);
    let result = wound_animal(state, participants, request, config);
    state.behavior.modify_boldness(STONE_HIT_BOLDNESS);
    ActionResult::narrate(
        PlayerAction::Throw,
        hit_narrative("Your stone", &name, attack.critical, &result),
    )
}

/// Player's share of the combined weight (0.5 when evenly matched)
fn weight_share(participants: &Participants<'_>) -> f32 {
    let player = participants.player_body.weight_kg().max(1.0);
    let animal = participants.animal.weight_kg.max(1.0);
    player / (player + animal)
}

fn shove_chance(participants: &Participants<'_>) -> f32 {
    let strength = participants.player_body.capacities().strength;
    (0.2 + 0.7 * strength * weight_share(participants)).clamp(0.05, 0.9)
}

fn grapple_chance(participants: &Participants<'_>) -> f32 {
    let caps = participants.player_body.capacities();
    (0.1 + 0.5 * caps.strength * caps.manipulation * weight_share(participants)).clamp(0.05, 0.8)
}

fn shove<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    rng: &mut R,
) -> ActionResult {
    let name = &participants.animal.name;
    if roll(rng, shove_chance(participants)) {
        state.animal_move(SHOVE_PUSH_METERS);
        state.behavior.modify_boldness(SHOVE_BOLDNESS);
        ActionResult::narrate(PlayerAction::Shove, format!("You shove the {} back.", name))
    } else {
        ActionResult::narrate(PlayerAction::Shove, format!("The {} doesn't budge.", name))
    }
}

fn grapple<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    config: &CombatConfig,
    rng: &mut R,
) -> ActionResult {
    let name = participants.animal.name.clone();
    if roll(rng, grapple_chance(participants)) {
        let request = DamageInfo::new(GRAPPLE_DAMAGE, DamageType::Blunt).with_region("Neck");
        let result = wound_animal(state, participants, request, config);
        state.behavior.force(AnimalBehavior::Recovering);
        return ActionResult::narrate(
            PlayerAction::Grapple,
            format!(
                "You get an arm around the {}'s neck and wrench it down ({:.0} damage).",
                name, result.applied
            ),
        );
    }

    let report = free_attack(state, participants, FAILED_GRAPPLE_ATTACK_SCALE, config, rng);
    ActionResult::narrate(
        PlayerAction::Grapple,
        format!("The {} twists free. {}", name, report.narrative),
    )
}

fn go_down<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    config: &CombatConfig,
    rng: &mut R,
) -> ActionResult {
    let name = participants.animal.name.clone();
    let chance = participants.animal.disengage_propensity * (1.0 - 0.5 * state.behavior.boldness());
    if roll(rng, chance) {
        return ActionResult::ending(
            PlayerAction::GoDown,
            format!("You curl up and lie still. After a while the {} wanders off.", name),
            CombatOutcome::AnimalDisengaged,
        );
    }

    let report = free_attack(state, participants, FAILED_PLAY_DEAD_ATTACK_SCALE, config, rng);
    ActionResult::narrate(
        PlayerAction::GoDown,
        format!("You go down and the {} is on you at once. {}", name, report.narrative),
    )
}

fn intimidate<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    rng: &mut R,
) -> ActionResult {
    let armed = if participants.inventory.weapon().is_some() { 0.15 } else { 0.0 };
    let chance = (0.2
        + 0.3 * participants.player_body.vitality()
        + armed
        + 0.3 * (1.0 - participants.animal_body.vitality()))
    .clamp(0.05, 0.9);
    let name = &participants.animal.name;

    if roll(rng, chance) {
        state.behavior.modify_boldness(INTIMIDATE_SUCCESS_BOLDNESS);
        ActionResult::narrate(
            PlayerAction::Intimidate,
            format!("You roar and make yourself big. The {} flinches.", name),
        )
    } else {
        state.behavior.modify_boldness(INTIMIDATE_FAILURE_BOLDNESS);
        ActionResult::narrate(
            PlayerAction::Intimidate,
            format!("You shout, but the {} barely reacts.", name),
        )
    }
}

fn disengage<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    rng: &mut R,
) -> ActionResult {
    let name = &participants.animal.name;
    let escaped = match state.zone() {
        Zone::Far => true,
        _ => {
            let chance = (1.0 - state.behavior.boldness())
                * participants.player_body.capacities().moving;
            roll(rng, chance)
        }
    };

    if escaped {
        ActionResult::ending(
            PlayerAction::Disengage,
            format!("You slip away from the {}.", name),
            CombatOutcome::PlayerDisengaged,
        )
    } else {
        state.behavior.modify_boldness(FAILED_ESCAPE_BOLDNESS);
        ActionResult::narrate(
            PlayerAction::Disengage,
            format!("You turn to go and the {} follows.", name),
        )
    }
}

fn retrieve_weapon<R: Rng + ?Sized>(
    state: &mut CombatState,
    participants: &mut Participants<'_>,
    config: &CombatConfig,
    rng: &mut R,
) -> ActionResult {
    let Some(thrown) = state.take_thrown_weapon() else {
        return ActionResult::narrate(PlayerAction::RetrieveWeapon, "There is nothing to retrieve.");
    };

    // Walk to the weapon; the animal stays where it is
    state.set_distance((state.distance() - thrown.landing_distance).abs());
    let mut narrative = format!("You snatch up your {}.", thrown.weapon.name);
    participants.inventory.equip_weapon(thrown.weapon);

    if state.zone().is_close_or_nearer() {
        let report = free_attack(state, participants, RETRIEVE_ATTACK_SCALE, config, rng);
        narrative.push(' ');
        narrative.push_str(&report.narrative);
    }
    ActionResult::narrate(PlayerAction::RetrieveWeapon, narrative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::{
        AnimalProfile, BehaviorState, Body, Inventory, Loadout, SimpleBody, Weapon, WeaponClass,
    };
    use crate::encounter::snapshot::{CombatPhase, CombatSnapshot};
    use rand::rngs::mock::StepRng;

    struct AimAt(&'static str);

    impl CombatPresenter for AimAt {
        fn render(&mut self, _snapshot: &CombatSnapshot) {}
        fn choose_action(&mut self, _snapshot: &CombatSnapshot, _legal: &[PlayerAction]) -> String {
            String::new()
        }
        fn choose_target(&mut self, _legal: &[AttackTarget]) -> String {
            self.0.to_string()
        }
        fn show_narrative(&mut self, _phase: CombatPhase, _text: &str) {}
    }

    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn state_at(distance: f32, behavior: AnimalBehavior) -> CombatState {
        CombatState::new(distance, BehaviorState::new(behavior, 0.5))
    }

    #[test]
    fn test_ids_round_trip() {
        assert_eq!(PlayerAction::all().len(), 18);
        for action in PlayerAction::all() {
            assert_eq!(PlayerAction::from_id(action.id()), Some(action));
        }
        assert_eq!(PlayerAction::from_id("fly"), None);
    }

    #[test]
    fn test_unknown_id_hesitates() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::new());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(10.0, AnimalBehavior::Circling);
        let before = state.clone();

        let result = process_action(
            "dance",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &CombatConfig::default(),
            &mut always(),
        );
        assert_eq!(result.narrative, "You hesitate.");
        assert!(result.action.is_none() && !result.is_terminal());
        assert_eq!(state, before);
    }

    #[test]
    fn test_legal_actions_by_zone() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::hunter());
        let participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);

        let melee = available_actions(&state_at(1.0, AnimalBehavior::Threatening), &participants);
        assert!(melee.contains(&PlayerAction::Strike));
        assert!(melee.contains(&PlayerAction::Thrust));
        assert!(!melee.contains(&PlayerAction::Throw));
        assert!(!melee.contains(&PlayerAction::CloseDistance));
        assert!(!melee.contains(&PlayerAction::Disengage));

        let far = available_actions(&state_at(18.0, AnimalBehavior::Circling), &participants);
        assert!(far.contains(&PlayerAction::Throw));
        assert!(far.contains(&PlayerAction::Disengage));
        assert!(!far.contains(&PlayerAction::Strike));
        assert!(!far.contains(&PlayerAction::Dodge));
        assert!(!far.contains(&PlayerAction::DropMeat));
        assert!(!far.contains(&PlayerAction::RetrieveWeapon));
    }

    #[test]
    fn test_drop_meat_without_meat_is_refused() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::hunter());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(5.0, AnimalBehavior::Threatening);

        let result = process_action(
            "drop_meat",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &CombatConfig::default(),
            &mut always(),
        );
        assert!(!result.is_terminal());
        assert!(result.narrative.contains("no meat to drop"));
        assert_eq!(participants.inventory.stone_count(), 3);
    }

    #[test]
    fn test_drop_meat_distracts() {
        let wolf = AnimalProfile::wolf();
        let mut loadout = Loadout::new().with_meat(1.5);
        let (mut a, mut p) = (wolf.body(), SimpleBody::human(100.0, 70.0));
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut loadout);
        let mut state = state_at(5.0, AnimalBehavior::Threatening);

        let result = process_action(
            "drop_meat",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &CombatConfig::default(),
            &mut never(),
        );
        assert_eq!(result.outcome, Some(CombatOutcome::DistractedWithMeat));
        assert!(!participants.inventory.has_meat());
    }

    #[test]
    fn test_missed_throw_overshoots() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::hunter());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(10.0, AnimalBehavior::Circling);

        process_action(
            "throw",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &CombatConfig::default(),
            &mut never(),
        );
        assert!(participants.inventory.weapon().is_none());
        assert_eq!(state.thrown_weapon().map(|t| t.landing_distance), Some(12.0));
        assert_eq!(participants.animal_body.vitality(), 1.0);
    }

    #[test]
    fn test_stone_throw_when_no_spear() {
        let wolf = AnimalProfile::wolf();
        let mut loadout = Loadout::new().with_weapon(Weapon::knife()).with_stones(2);
        let (mut a, mut p) = (wolf.body(), SimpleBody::human(100.0, 70.0));
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut loadout);
        let mut state = state_at(6.0, AnimalBehavior::Circling);

        process_action(
            "throw",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &CombatConfig::default(),
            &mut always(),
        );
        assert_eq!(participants.inventory.stone_count(), 1);
        assert!(participants.inventory.weapon().is_some());
        assert!(participants.animal_body.vitality() < 1.0);
        assert!(state.behavior.boldness() < 0.5);
        assert!(state.thrown_weapon().is_none());
    }

    #[test]
    fn test_retrieve_after_miss_costs_an_opening() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::hunter());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(5.0, AnimalBehavior::Circling);
        let config = CombatConfig::default();

        process_action("throw", &mut state, &mut participants, &mut AimAt("head"), &config, &mut never());
        assert!(state.can_retrieve_weapon());

        let result = process_action(
            "retrieve_weapon",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &config,
            &mut never(),
        );
        assert_eq!(result.action, Some(PlayerAction::RetrieveWeapon));
        assert_eq!(participants.inventory.weapon_class(), WeaponClass::Spear);
        assert_eq!(state.distance(), 2.0);
        assert!(state.thrown_weapon().is_none());
        assert!(participants.player_body.vitality() < 1.0);
    }

    #[test]
    fn test_disengage_at_far_always_succeeds() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::new());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = CombatState::new(20.0, BehaviorState::new(AnimalBehavior::Attacking, 1.0));

        let result = process_action(
            "disengage",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &CombatConfig::default(),
            &mut never(),
        );
        assert_eq!(result.outcome, Some(CombatOutcome::PlayerDisengaged));
    }

    #[test]
    fn test_disengage_refused_in_melee() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::new());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(2.0, AnimalBehavior::Circling);
        let before = state.clone();

        let result = process_action(
            "disengage",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &CombatConfig::default(),
            &mut always(),
        );
        assert!(!result.is_terminal());
        assert_eq!(state, before);
    }

    #[test]
    fn test_brace_sets_flag() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::hunter());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(5.0, AnimalBehavior::Threatening);

        let result = process_action(
            "brace",
            &mut state,
            &mut participants,
            &mut AimAt("head"),
            &CombatConfig::default(),
            &mut always(),
        );
        assert_eq!(result.defense, DefenseChoice::Brace);
        assert!(state.is_braced());
        assert!(!available_actions(&state, &participants).contains(&PlayerAction::Brace));
    }

    #[test]
    fn test_throwing_the_spear_drops_the_brace() {
        use crate::encounter::animal_turn::animal_phase;

        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::hunter());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(6.0, AnimalBehavior::Threatening);
        let config = CombatConfig::default();

        for id in ["brace", "throw"] {
            process_action(id, &mut state, &mut participants, &mut AimAt("torso"), &config, &mut never());
        }
        assert!(participants.inventory.weapon().is_none());
        assert!(!state.is_braced());

        state.behavior.force(AnimalBehavior::Attacking);
        let narrative = animal_phase(&mut state, &mut participants, DefenseChoice::None, &config, &mut never());
        assert!(!narrative.contains("braced spear"));
        assert_eq!(participants.animal_body.vitality(), 1.0);
    }

    #[test]
    fn test_thrust_uses_chosen_target() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::hunter());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(2.0, AnimalBehavior::Recovering);

        let result = process_action(
            "thrust",
            &mut state,
            &mut participants,
            &mut AimAt("legs"),
            &CombatConfig::default(),
            &mut always(),
        );
        assert!(result.narrative.contains("left hind leg"));
        assert!(participants.animal_body.capacities().moving < 1.0);
    }

    #[test]
    fn test_intimidate_moves_boldness() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::new());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let config = CombatConfig::default();

        let mut won = state_at(10.0, AnimalBehavior::Circling);
        process_action("intimidate", &mut won, &mut participants, &mut AimAt(""), &config, &mut always());
        assert!((won.behavior.boldness() - 0.3).abs() < 1e-6);

        let mut lost = state_at(10.0, AnimalBehavior::Circling);
        process_action("intimidate", &mut lost, &mut participants, &mut AimAt(""), &config, &mut never());
        assert!((lost.behavior.boldness() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_grapple_forces_recovery() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::new());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(1.0, AnimalBehavior::Threatening);

        process_action(
            "grapple",
            &mut state,
            &mut participants,
            &mut AimAt(""),
            &CombatConfig::default(),
            &mut always(),
        );
        assert_eq!(state.behavior.current(), AnimalBehavior::Recovering);
        assert!(participants.animal_body.vitality() < 1.0);
    }

    #[test]
    fn test_failed_play_dead_is_punished() {
        let wolf = AnimalProfile::wolf();
        let (mut a, mut p, mut inv) = (wolf.body(), SimpleBody::human(100.0, 70.0), Loadout::new());
        let mut participants = Participants::new(&wolf, &mut a, &mut p, &mut inv);
        let mut state = state_at(2.0, AnimalBehavior::Threatening);

        let result = process_action(
            "go_down",
            &mut state,
            &mut participants,
            &mut AimAt(""),
            &CombatConfig::default(),
            &mut never(),
        );
        assert!(!result.is_terminal());
        assert!(participants.player_body.vitality() < 1.0);
    }

    #[test]
    fn test_movement_scales_with_mobility() {
        let wolf = AnimalProfile::wolf();
        let mut player = SimpleBody::human(100.0, 70.0);
        player.apply_damage(&DamageInfo::new(10.0, DamageType::Sharp).with_region("Left Leg"));
        let (mut a, mut inv) = (wolf.body(), Loadout::new());
        let mut participants = Participants::new(&wolf, &mut a, &mut player, &mut inv);
        let mut state = state_at(10.0, AnimalBehavior::Circling);

        process_action(
            "back_away",
            &mut state,
            &mut participants,
            &mut AimAt(""),
            &CombatConfig::default(),
            &mut never(),
        );
        assert!(state.distance() > 10.0 && state.distance() < 15.0);
        assert!((state.behavior.boldness() - 0.55).abs() < 1e-6);
    }
}
