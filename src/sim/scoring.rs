//! Ring tiers and point values

use serde::{Deserialize, Serialize};

use crate::consts::{BULLSEYE_POINTS, MIDDLE_POINTS, OUTER_POINTS};

/// Which ring a crossing landed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    Bullseye,
    Middle,
    Outer,
    Miss,
}

impl Tier {
    pub fn points(&self) -> u32 {
        match self {
            Tier::Bullseye => BULLSEYE_POINTS,
            Tier::Middle => MIDDLE_POINTS,
            Tier::Outer => OUTER_POINTS,
            Tier::Miss => 0,
        }
    }
}

/// Classify a distance from the board centre. Boundaries go to the inner ring.
pub fn tier(distance: f32, bullseye_r: f32, middle_r: f32, outer_r: f32) -> Tier {
    if distance <= bullseye_r {
        Tier::Bullseye
    } else if distance <= middle_r {
        Tier::Middle
    } else if distance <= outer_r {
        Tier::Outer
    } else {
        Tier::Miss
    }
}

/// Points for a distance from the board centre (0 = miss)
pub fn score(distance: f32, bullseye_r: f32, middle_r: f32, outer_r: f32) -> u32 {
    tier(distance, bullseye_r, middle_r, outer_r).points()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_boundaries_go_inward() {
        assert_eq!(score(20.0, 20.0, 55.0, 100.0), 50);
        assert_eq!(score(55.0, 20.0, 55.0, 100.0), 30);
        assert_eq!(score(100.0, 20.0, 55.0, 100.0), 10);
        assert_eq!(tier(100.01, 20.0, 55.0, 100.0), Tier::Miss);
        assert_eq!(score(100.01, 20.0, 55.0, 100.0), 0);
    }

    #[test]
    fn test_ring_interiors() {
        assert_eq!(tier(0.0, 20.0, 55.0, 100.0), Tier::Bullseye);
        assert_eq!(tier(20.5, 20.0, 55.0, 100.0), Tier::Middle);
        assert_eq!(tier(70.0, 20.0, 55.0, 100.0), Tier::Outer);
        assert_eq!(tier(400.0, 20.0, 55.0, 100.0), Tier::Miss);
    }
}
