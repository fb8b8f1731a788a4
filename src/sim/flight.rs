//! Dart flight: one straight step per tick, resolved against the field
//!
//! `advance` is pure. It reports what the step did and leaves every mutation
//! (score, throws, history, dart reset) to the caller.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleField;
use super::scoring::{Tier, tier};
use super::state::Level;
use super::target::Dartboard;
use crate::heading_vector;

/// Result of advancing an in-flight dart by one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlightOutcome {
    /// Still flying; `pos` is the new position
    InFlight { pos: Vec2 },
    /// Step segment touched a level 3 obstacle
    ObstacleHit { pos: Vec2 },
    /// Left the right, top or bottom of the field
    OutOfBounds { pos: Vec2 },
    /// Crossed the board plane within the outer ring
    Scored {
        points: u32,
        tier: Tier,
        hit_point: Vec2,
    },
    /// Crossed the board plane outside the outer ring
    Miss { crossing: Vec2 },
}

#[cfg(test)]
impl FlightOutcome {
    fn is_terminal(&self) -> bool {
        !matches!(self, FlightOutcome::InFlight { .. })
    }
}

/// Everything a flight step reads besides the dart itself
#[derive(Debug, Clone, Copy)]
pub struct FlightContext<'a> {
    pub level: Level,
    /// Displacement for this tick
    pub step: f32,
    pub field_size: Vec2,
    pub board: &'a Dartboard,
    pub obstacles: &'a ObstacleField,
}

/// Advance a dart at `prev` heading `heading` degrees by one tick
pub fn advance(prev: Vec2, heading: f32, ctx: &FlightContext) -> FlightOutcome {
    let next = prev + heading_vector(heading) * ctx.step;

    if ctx.level.has_obstacles() && ctx.obstacles.blocks(prev, next) {
        return FlightOutcome::ObstacleHit { pos: next };
    }

    // Left edge included so an unaimed dart cannot fly forever
    if next.x > ctx.field_size.x || next.x < 0.0 || next.y < 0.0 || next.y > ctx.field_size.y {
        return FlightOutcome::OutOfBounds { pos: next };
    }

    let cx = ctx.board.center.x;
    let crossed = (prev.x < cx && next.x >= cx) || (prev.x > cx && next.x <= cx);
    if crossed {
        let intersect_y = if next.x != prev.x {
            let slope = (next.y - prev.y) / (next.x - prev.x);
            prev.y + slope * (cx - prev.x)
        } else {
            next.y
        };
        let hit_point = Vec2::new(cx, intersect_y);
        let distance = (intersect_y - ctx.board.center.y).abs();
        let board = ctx.board;
        return match tier(distance, board.bullseye_radius, board.middle_radius, board.outer_radius) {
            Tier::Miss => FlightOutcome::Miss {
                crossing: hit_point,
            },
            t => FlightOutcome::Scored {
                points: t.points(),
                tier: t,
                hit_point,
            },
        };
    }

    FlightOutcome::InFlight { pos: next }
}
