//! Wild Encounter - distance-based combat between a player and one animal

pub mod combat;
pub mod core;
pub mod encounter;
