//! Headless presenter that picks uniformly among legal choices
//!
//! Drives the batch runner and the termination fuzz tests.

use crate::combat::AttackTarget;
use crate::encounter::actions::PlayerAction;
use crate::encounter::boundary::CombatPresenter;
use crate::encounter::snapshot::{CombatPhase, CombatSnapshot};
use rand::seq::SliceRandom;
use rand::Rng;

pub struct RandomPresenter<R: Rng> {
    rng: R,
    /// Every narrated beat, in order
    pub transcript: Vec<String>,
    record: bool,
}

impl<R: Rng> RandomPresenter<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            transcript: Vec::new(),
            record: false,
        }
    }

    /// Keep every narrated beat in `transcript`
    pub fn recording(mut self) -> Self {
        self.record = true;
        self
    }
}

impl<R: Rng> CombatPresenter for RandomPresenter<R> {
    fn render(&mut self, _snapshot: &CombatSnapshot) {}

    fn choose_action(&mut self, snapshot: &CombatSnapshot, legal: &[PlayerAction]) -> String {
        let choice = legal
            .choose(&mut self.rng)
            .map(|a| a.id())
            .unwrap_or("hold_ground");
        tracing::trace!(turn = snapshot.turn, choice, "autoplay choice");
        choice.to_string()
    }

    fn choose_target(&mut self, legal: &[AttackTarget]) -> String {
        legal
            .choose(&mut self.rng)
            .map(|t| t.id())
            .unwrap_or("torso")
            .to_string()
    }

    fn show_narrative(&mut self, phase: CombatPhase, text: &str) {
        tracing::trace!(?phase, text, "narrative");
        if self.record {
            self.transcript.push(text.to_string());
        }
    }
}
