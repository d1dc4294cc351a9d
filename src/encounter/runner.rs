//! Encounter execution - the turn loop
//!
//! Phase order each turn:
//! 1. Player choice (blocks on the presenter)
//! 2. Player action (a terminal result ends the encounter here)
//! 3. Animal action (only while both are alive)
//! 4. Behavior change (end of turn for the behavior machine)
//! 5. End check (the only other way out of the loop)

use crate::combat::{CombatOutcome, CombatState, DefenseChoice};
use crate::core::config::CombatConfig;
use crate::core::error::Result;
use crate::core::types::{EncounterId, Meters, Turn};
use crate::encounter::actions::{available_actions, process_action};
use crate::encounter::animal_turn::animal_phase;
use crate::encounter::boundary::{CombatPresenter, EncounterHooks};
use crate::encounter::context::EncounterContext;
use crate::encounter::log::{CombatEventKind, CombatLog};
use crate::encounter::snapshot::{CombatPhase, CombatSnapshot};
use crate::encounter::Participants;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Everything a finished encounter reports back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterReport {
    pub id: EncounterId,
    pub animal: String,
    pub outcome: CombatOutcome,
    pub turns: Turn,
    pub final_snapshot: CombatSnapshot,
    pub log: CombatLog,
}

/// One player against one animal
pub struct Encounter<'a, R: Rng> {
    state: CombatState,
    participants: Participants<'a>,
    config: CombatConfig,
    rng: R,
    log: CombatLog,
}

impl<'a, R: Rng> Encounter<'a, R> {
    /// Start at `distance`, reading initial boldness off the participants
    pub fn new(participants: Participants<'a>, config: CombatConfig, rng: R, distance: Meters) -> Self {
        let context = EncounterContext::from_participants(&participants, distance);
        Self::from_context(participants, &context, config, rng)
    }

    pub fn from_context(
        participants: Participants<'a>,
        context: &EncounterContext,
        config: CombatConfig,
        rng: R,
    ) -> Self {
        let state = context.initial_state(&config);
        Self::from_state(participants, state, config, rng)
    }

    /// Start from a prepared state
    pub fn from_state(participants: Participants<'a>, state: CombatState, config: CombatConfig, rng: R) -> Self {
        Self {
            state,
            participants,
            config,
            rng,
            log: CombatLog::new(),
        }
    }

    pub fn state(&self) -> &CombatState {
        &self.state
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn snapshot(&self, phase: CombatPhase) -> CombatSnapshot {
        CombatSnapshot::capture(&self.state, &self.participants, phase)
    }

    /// Run to a terminal outcome
    ///
    /// The only error is the turn cap, which means the end checks are broken.
    pub fn run(
        mut self,
        presenter: &mut dyn CombatPresenter,
        hooks: &mut dyn EncounterHooks,
    ) -> Result<EncounterReport> {
        tracing::info!(
            encounter = %self.state.id,
            animal = %self.participants.animal.name,
            distance = self.state.distance(),
            behavior = ?self.state.behavior.current(),
            boldness = self.state.behavior.boldness(),
            "encounter started"
        );
        self.phase_intro(presenter);

        loop {
            if let Some(outcome) = self.play_turn(presenter)? {
                return Ok(self.finish(outcome, presenter, hooks));
            }
        }
    }

    fn narrate(&self, presenter: &mut dyn CombatPresenter, phase: CombatPhase, text: &str) {
        if text.is_empty() {
            return;
        }
        presenter.render(&self.snapshot(phase));
        presenter.show_narrative(phase, text);
        presenter.wait_for_continue();
    }

    fn phase_intro(&mut self, presenter: &mut dyn CombatPresenter) {
        let animal = self.participants.animal;
        let text = format!(
            "A {} stands {:.0}m away, {}.",
            animal.name,
            self.state.distance(),
            self.state.behavior.current().describe()
        );
        self.log
            .push(CombatEventKind::EncounterStarted, text.clone(), self.state.turn_count());
        self.narrate(presenter, CombatPhase::Intro, &text);
    }

    fn play_turn(&mut self, presenter: &mut dyn CombatPresenter) -> Result<Option<CombatOutcome>> {
        let turn = self.state.turn_count();

        // Player choice
        let legal = available_actions(&self.state, &self.participants);
        let snapshot = self.snapshot(CombatPhase::PlayerChoice);
        presenter.render(&snapshot);
        let choice = presenter.choose_action(&snapshot, &legal);

        // Player action
        let result = process_action(
            &choice,
            &mut self.state,
            &mut self.participants,
            presenter,
            &self.config,
            &mut self.rng,
        );
        self.log.push(
            CombatEventKind::PlayerActed {
                action: result.action,
            },
            result.narrative.clone(),
            turn,
        );
        self.narrate(presenter, CombatPhase::PlayerAction, &result.narrative);
        if let Some(outcome) = result.outcome {
            return Ok(Some(outcome));
        }

        // Animal action
        if self.participants.both_alive() {
            self.phase_animal_action(presenter, result.defense);
        }

        self.state.advance_turn();

        // Behavior change
        if self.participants.both_alive() {
            self.phase_behavior_change(presenter);
        }

        self.state.check_for_end(
            self.participants.player_alive(),
            self.participants.animal_alive(),
            &self.config,
        )
    }

    fn phase_animal_action(&mut self, presenter: &mut dyn CombatPresenter, defense: DefenseChoice) {
        let behavior = self.state.behavior.current();
        let text = animal_phase(
            &mut self.state,
            &mut self.participants,
            defense,
            &self.config,
            &mut self.rng,
        );
        tracing::debug!(
            turn = self.state.turn_count(),
            ?behavior,
            distance = self.state.distance(),
            "animal acted"
        );
        self.log
            .push(CombatEventKind::AnimalActed { behavior }, text.clone(), self.state.turn_count());
        self.narrate(presenter, CombatPhase::AnimalAction, &text);
    }

    fn phase_behavior_change(&mut self, presenter: &mut dyn CombatPresenter) {
        let zone = self.state.zone();
        let turn = self.state.turn_count();
        let transition = self
            .state
            .behavior
            .end_turn(zone, turn, &self.config, &mut self.rng);
        let Some(transition) = transition else {
            return;
        };

        tracing::debug!(from = ?transition.from, to = ?transition.to, "behavior changed");
        let text = format!(
            "The {} is {}.",
            self.participants.animal.name,
            transition.to.describe()
        );
        self.log.push(
            CombatEventKind::BehaviorChanged {
                from: transition.from,
                to: transition.to,
            },
            text.clone(),
            self.state.turn_count(),
        );
        self.narrate(presenter, CombatPhase::BehaviorChange, &text);
    }

    fn finish(
        mut self,
        outcome: CombatOutcome,
        presenter: &mut dyn CombatPresenter,
        hooks: &mut dyn EncounterHooks,
    ) -> EncounterReport {
        let animal = self.participants.animal;
        if outcome == CombatOutcome::Victory {
            hooks.create_carcass(animal);
        }

        let text = outcome.narrate(&animal.name);
        self.log
            .push(CombatEventKind::Ended { outcome }, text.clone(), self.state.turn_count());
        let final_snapshot = self.snapshot(CombatPhase::Outcome).with_outcome(outcome);
        presenter.render(&final_snapshot);
        presenter.show_narrative(CombatPhase::Outcome, &text);
        presenter.wait_for_continue();

        tracing::info!(
            encounter = %self.state.id,
            ?outcome,
            turns = self.state.turn_count(),
            "encounter ended"
        );

        EncounterReport {
            id: self.state.id,
            animal: animal.name.clone(),
            outcome,
            turns: self.state.turn_count(),
            final_snapshot,
            log: self.log,
        }
    }
}
