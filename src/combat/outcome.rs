//! Terminal outcomes of an encounter

use serde::{Deserialize, Serialize};

/// The only values an encounter can end on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatOutcome {
    /// The animal is dead
    Victory,
    PlayerDied,
    /// The player got away
    PlayerDisengaged,
    /// A retreating animal left the engagement range
    AnimalFled,
    /// The animal lost interest (or the player's play-dead worked)
    AnimalDisengaged,
    /// The animal took the dropped meat instead of the fight
    DistractedWithMeat,
}

impl CombatOutcome {
    pub fn all() -> [CombatOutcome; 6] {
        [
            CombatOutcome::Victory,
            CombatOutcome::PlayerDied,
            CombatOutcome::PlayerDisengaged,
            CombatOutcome::AnimalFled,
            CombatOutcome::AnimalDisengaged,
            CombatOutcome::DistractedWithMeat,
        ]
    }

    /// Did the player come out of it alive?
    pub fn player_survived(&self) -> bool {
        !matches!(self, CombatOutcome::PlayerDied)
    }

    /// Closing line for the outcome phase
    pub fn narrate(&self, animal: &str) -> String {
        match self {
            CombatOutcome::Victory => format!("The {} collapses and lies still.", animal),
            CombatOutcome::PlayerDied => format!("The {} stands over you. Everything goes dark.", animal),
            CombatOutcome::PlayerDisengaged => {
                format!("You put enough ground between you and the {} to slip away.", animal)
            }
            CombatOutcome::AnimalFled => format!("The {} bolts and does not come back.", animal),
            CombatOutcome::AnimalDisengaged => {
                format!("The {} loses interest and melts back into the brush.", animal)
            }
            CombatOutcome::DistractedWithMeat => {
                format!("The {} falls on the meat. You back away while it feeds.", animal)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_death_is_fatal_to_player() {
        for outcome in CombatOutcome::all() {
            assert_eq!(outcome.player_survived(), outcome != CombatOutcome::PlayerDied);
        }
    }

    #[test]
    fn test_narration_names_animal() {
        for outcome in CombatOutcome::all() {
            assert!(outcome.narrate("wolf").contains("wolf"));
        }
    }
}
