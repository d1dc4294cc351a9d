//! Tactical distance zones
//!
//! Distance in meters is authoritative; the zone is always derived from it.

use crate::combat::constants::{CLOSE_MAX_METERS, FAR_MAX_METERS, MELEE_MAX_METERS, MID_MAX_METERS};
use crate::core::types::Meters;
use serde::{Deserialize, Serialize};

/// Discrete distance bucket, nearest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// 0-3m, within reach of claws and knives
    Melee,
    /// 3-8m, one lunge away
    Close,
    /// 8-15m, throwing range
    Mid,
    /// 15m and beyond
    Far,
}

impl Zone {
    pub fn all() -> [Zone; 4] {
        [Zone::Melee, Zone::Close, Zone::Mid, Zone::Far]
    }

    /// Bucket a distance. Negative distances count as Melee.
    pub fn from_distance(distance: Meters) -> Zone {
        if distance < MELEE_MAX_METERS {
            Zone::Melee
        } else if distance < CLOSE_MAX_METERS {
            Zone::Close
        } else if distance < MID_MAX_METERS {
            Zone::Mid
        } else {
            Zone::Far
        }
    }

    /// Lower (inclusive) and upper (exclusive) bounds in meters
    pub fn bounds(&self) -> (Meters, Meters) {
        match self {
            Zone::Melee => (0.0, MELEE_MAX_METERS),
            Zone::Close => (MELEE_MAX_METERS, CLOSE_MAX_METERS),
            Zone::Mid => (CLOSE_MAX_METERS, MID_MAX_METERS),
            Zone::Far => (MID_MAX_METERS, FAR_MAX_METERS),
        }
    }

    pub fn is_close_or_nearer(&self) -> bool {
        matches!(self, Zone::Melee | Zone::Close)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Zone::Melee => "melee",
            Zone::Close => "close",
            Zone::Mid => "mid",
            Zone::Far => "far",
        }
    }
}
