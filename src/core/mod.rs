pub mod config;
pub mod error;
pub mod types;

pub use config::CombatConfig;
pub use error::{EncounterError, Result, TurnCapDiagnostics};
pub use types::{EncounterId, Meters, Turn};
