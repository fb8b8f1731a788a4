//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::flight::{self, FlightContext, FlightOutcome};
use super::state::{
    AimDirection, GameEvent, GameOverReason, GamePhase, GameState, MissKind, ThrowTrajectory,
};
use crate::consts::REFERENCE_TICK_RATE;

/// On-screen buttons a presentation layer may map clicks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiButton {
    Start,
    Throw,
    NextLevel,
    Restart,
    RestartAll,
    PreviousLevel,
    Quit,
}

/// Where a one-shot request came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Key,
    Button(UiButton),
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held: rotate heading toward negative y
    pub aim_up: bool,
    /// Held: rotate heading toward positive y
    pub aim_down: bool,
    /// Point at the board centre
    pub snap_aim: bool,
    pub throw: Option<Trigger>,
    pub start: Option<Trigger>,
    pub restart: Option<Trigger>,
    pub advance: Option<Trigger>,
    pub previous_level: Option<Trigger>,
    pub restart_all: Option<Trigger>,
    /// Handled by the session, ignored here
    pub quit: Option<Trigger>,
}

impl TickInput {
    /// Drop edge-triggered requests after they have been seen once
    pub fn clear_one_shots(&mut self) {
        self.snap_aim = false;
        self.throw = None;
        self.start = None;
        self.restart = None;
        self.advance = None;
        self.previous_level = None;
        self.restart_all = None;
        self.quit = None;
    }

    /// Carry over any one-shot requests from `other` not already pending
    pub fn merge_one_shots(&mut self, other: &TickInput) {
        self.snap_aim |= other.snap_aim;
        self.throw = self.throw.or(other.throw);
        self.start = self.start.or(other.start);
        self.restart = self.restart.or(other.restart);
        self.advance = self.advance.or(other.advance);
        self.previous_level = self.previous_level.or(other.previous_level);
        self.restart_all = self.restart_all.or(other.restart_all);
        self.quit = self.quit.or(other.quit);
    }
}

/// Advance the game state by one timestep and report what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    apply_transitions(state, input, &mut events);
    if !state.is_playing() {
        return events;
    }

    state.time_ticks += 1;

    if let Some(trigger) = input.throw {
        if state.throw_dart() {
            log::debug!("Throw requested via {:?}", trigger);
        }
    }

    state.board.update(dt);
    if state.level().has_time_limit() {
        state.session.elapsed_ms += dt * 1000.0;
    }

    if !state.dart.in_flight {
        if input.snap_aim {
            state.snap_aim();
        }
        if input.aim_up {
            state.aim(AimDirection::Up, dt);
        }
        if input.aim_down {
            state.aim(AimDirection::Down, dt);
        }
    }

    let mut resolved = false;
    if state.dart.in_flight {
        let outcome = {
            let settings = &state.settings;
            let ctx = FlightContext {
                level: state.session.level,
                step: settings.dart_speed * dt * REFERENCE_TICK_RATE,
                field_size: Vec2::new(settings.field_width, settings.field_height),
                board: &state.board,
                obstacles: &state.obstacles,
            };
            flight::advance(state.dart.pos, state.dart.heading, &ctx)
        };
        if let Some(event) = apply_outcome(state, outcome) {
            events.push(event);
            resolved = true;
        }
    }

    // Throws only run out when a throw resolves; the clock can run out any tick
    let finished = if resolved {
        state.end_condition()
    } else if state.remaining_ms().is_some_and(|r| r <= 0.0) {
        Some(GamePhase::GameOver {
            reason: GameOverReason::TimeExpired,
        })
    } else {
        None
    };
    if let Some(phase) = finished {
        finish_level(state, phase, &mut events);
    }

    events
}

fn apply_transitions(state: &mut GameState, input: &TickInput, events: &mut Vec<GameEvent>) {
    if input.start.is_some() && state.start() {
        events.push(GameEvent::Started {
            level: state.level(),
        });
    }
    if input.advance.is_some() && state.advance_level() {
        log::info!("Level up: {}", state.level().number());
        events.push(GameEvent::LevelUp {
            level: state.level(),
        });
        events.push(GameEvent::Started {
            level: state.level(),
        });
    }
    if input.restart.is_some() && state.restart() {
        events.push(GameEvent::Started {
            level: state.level(),
        });
    }
    if input.previous_level.is_some() && state.previous_level() {
        events.push(GameEvent::Started {
            level: state.level(),
        });
    }
    if input.restart_all.is_some() && state.restart_all() {
        events.push(GameEvent::Started {
            level: state.level(),
        });
    }
}

/// Commit one flight step; terminal outcomes score, record and reset the dart
fn apply_outcome(state: &mut GameState, outcome: FlightOutcome) -> Option<GameEvent> {
    let event = match outcome {
        FlightOutcome::InFlight { pos } => {
            state.dart.pos = pos;
            return None;
        }
        FlightOutcome::Scored {
            points,
            tier,
            hit_point,
        } => {
            state.session.score += points;
            state.session.trajectories.push(ThrowTrajectory {
                angle: state.dart.heading,
                crossing_x: hit_point.x,
                crossing_y: hit_point.y,
                target_center_y: state.board.center.y,
            });
            GameEvent::Hit {
                points,
                tier,
                position: hit_point,
            }
        }
        FlightOutcome::Miss { crossing } => GameEvent::Miss {
            position: crossing,
            kind: MissKind::Wide,
        },
        FlightOutcome::OutOfBounds { pos } => GameEvent::Miss {
            position: pos,
            kind: MissKind::OutOfBounds,
        },
        FlightOutcome::ObstacleHit { pos } => GameEvent::ObstacleHit { position: pos },
    };
    log::debug!("Throw resolved: {:?} (score {})", event, state.session.score);
    state.dart.reset();
    state.last_resolution = Some(event);
    Some(event)
}

fn finish_level(state: &mut GameState, phase: GamePhase, events: &mut Vec<GameEvent>) {
    state.dart.reset();
    state.session.phase = phase;
    let level = state.level();
    let score = state.session.score;
    match phase {
        GamePhase::Cleared => {
            log::info!("All levels complete! Final score {}", score);
            events.push(GameEvent::Cleared { score });
        }
        GamePhase::GameOver { reason } => {
            log::info!("Level {} over ({:?}), score {}", level.number(), reason, score);
            events.push(GameEvent::GameOver {
                level,
                score,
                reason,
            });
        }
        GamePhase::NotStarted | GamePhase::Playing => {}
    }
}
