//! Session controller
//!
//! Owns the single `GameState`, turns variable frame time into fixed ticks and
//! hands the presentation layer a read-only `Snapshot` plus discrete events.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::sim::{
    GameEvent, GamePhase, GameState, Level, Rect, ThrowTrajectory, TickInput, tick,
};

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub level: Level,
    pub phase: GamePhase,
    pub score: u32,
    pub throws_left: u8,
    /// Level 3 countdown
    pub remaining_ms: Option<f32>,

    pub dart_pos: Vec2,
    pub dart_heading: f32,
    pub dart_in_flight: bool,
    pub perfect_angle: f32,

    pub target_center: Vec2,
    pub outer_radius: f32,
    pub middle_radius: f32,
    pub bullseye_radius: f32,
    /// Units per reference tick, 0 for a fixed board
    pub target_velocity_y: f32,

    pub obstacles: Vec<Rect>,
    pub trajectories: Vec<ThrowTrajectory>,
    pub last_resolution: Option<GameEvent>,

    // Follow-up actions currently on offer
    pub can_advance: bool,
    pub can_go_back: bool,
    pub can_restart: bool,
    pub can_restart_all: bool,
}

impl Snapshot {
    pub fn of(state: &GameState) -> Self {
        Self {
            level: state.level(),
            phase: state.phase(),
            score: state.session.score,
            throws_left: state.session.throws_left,
            remaining_ms: state.remaining_ms(),

            dart_pos: state.dart.pos,
            dart_heading: state.dart.heading,
            dart_in_flight: state.dart.in_flight,
            perfect_angle: state.perfect_angle(),

            target_center: state.board.center,
            outer_radius: state.board.outer_radius,
            middle_radius: state.board.middle_radius,
            bullseye_radius: state.board.bullseye_radius,
            target_velocity_y: state.board.vertical_velocity(),

            obstacles: state.obstacles.rects.clone(),
            trajectories: state.session.trajectories.clone(),
            last_resolution: state.last_resolution,

            can_advance: state.can_advance(),
            can_go_back: state.can_go_back(),
            can_restart: state.can_restart(),
            can_restart_all: state.can_restart_all(),
        }
    }
}

/// Top-level driver
pub struct Session {
    state: GameState,
    accumulator: f32,
    /// One-shot requests that arrived on frames too short to run a tick
    pending: TickInput,
    running: bool,
}

impl Session {
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(settings)?,
            accumulator: 0.0,
            pending: TickInput::default(),
            running: true,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    /// Feed one frame worth of real time and input; returns events in order
    pub fn update(&mut self, frame_dt: f32, input: &TickInput) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }
        if let Some(trigger) = input.quit.or(self.pending.quit) {
            log::info!("Quit requested via {:?}", trigger);
            self.running = false;
            return Vec::new();
        }

        self.pending.merge_one_shots(input);
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let mut tick_input = self.pending.clone();
            tick_input.aim_up = input.aim_up;
            tick_input.aim_down = input.aim_down;
            events.extend(tick(&mut self.state, &tick_input, SIM_DT));
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.pending.clear_one_shots();
        }
        events
    }

    /// Run exactly one tick regardless of accumulated time
    pub fn step(&mut self, input: &TickInput) -> Vec<GameEvent> {
        if !self.running {
            return Vec::new();
        }
        if let Some(trigger) = input.quit {
            log::info!("Quit requested via {:?}", trigger);
            self.running = false;
            return Vec::new();
        }
        tick(&mut self.state, input, SIM_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Trigger, UiButton};

    fn session() -> Session {
        Session::new(Settings::default()).unwrap()
    }

    fn start() -> TickInput {
        TickInput {
            start: Some(Trigger::Button(UiButton::Start)),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_settings() {
        let settings = Settings {
            throws_per_level: 0,
            ..Default::default()
        };
        assert!(matches!(Session::new(settings), Err(ConfigError::NoThrows)));
    }

    #[test]
    fn test_snapshot_on_start_screen() {
        let snap = session().snapshot();
        assert_eq!(snap.phase, GamePhase::NotStarted);
        assert_eq!(snap.level, Level::One);
        assert_eq!(snap.throws_left, 3);
        assert_eq!(snap.dart_pos, Vec2::new(150.0, 300.0));
        assert_eq!(snap.target_center, Vec2::new(620.0, 300.0));
        assert!(snap.obstacles.is_empty());
        assert_eq!(snap.remaining_ms, None);
        assert!(!snap.can_restart);
    }

    #[test]
    fn test_update_runs_fixed_substeps() {
        let mut s = session();
        s.update(SIM_DT, &start());
        assert_eq!(s.state().time_ticks, 1);

        // Three ticks worth of time in one frame
        s.update(SIM_DT * 3.0 + 0.001, &TickInput::default());
        assert_eq!(s.state().time_ticks, 4);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut s = session();
        s.update(SIM_DT, &start());
        s.update(10.0, &TickInput::default());
        assert!(s.state().time_ticks <= 1 + MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_one_shot_survives_short_frame() {
        let mut s = session();
        // Too short for a tick; the start request must not be lost
        let events = s.update(SIM_DT * 0.25, &start());
        assert!(events.is_empty());
        assert_eq!(s.state().phase(), GamePhase::NotStarted);

        let events = s.update(SIM_DT, &TickInput::default());
        assert_eq!(events, vec![GameEvent::Started { level: Level::One }]);
    }

    #[test]
    fn test_one_shot_consumed_once() {
        let mut s = session();
        s.update(SIM_DT, &start());
        let throw = TickInput {
            throw: Some(Trigger::Key),
            ..Default::default()
        };
        // Many substeps in one frame spend only one throw
        s.update(SIM_DT * 4.0, &throw);
        assert_eq!(s.state().session.throws_left, 2);
    }

    #[test]
    fn test_quit_stops_session() {
        let mut s = session();
        s.update(SIM_DT, &start());
        let quit = TickInput {
            quit: Some(Trigger::Button(UiButton::Quit)),
            ..Default::default()
        };
        s.update(SIM_DT, &quit);
        assert!(!s.is_running());

        let ticks = s.state().time_ticks;
        s.update(1.0, &TickInput::default());
        assert_eq!(s.state().time_ticks, ticks);
    }

    #[test]
    fn test_step_scores_and_snapshot_reports_it() {
        let mut s = session();
        s.step(&start());
        s.step(&TickInput {
            snap_aim: true,
            ..Default::default()
        });
        s.step(&TickInput {
            throw: Some(Trigger::Key),
            ..Default::default()
        });
        let mut hit = None;
        for _ in 0..100 {
            if let Some(e) = s.step(&TickInput::default()).into_iter().find(|e| e.is_resolution()) {
                hit = Some(e);
                break;
            }
        }
        assert!(matches!(hit, Some(GameEvent::Hit { points: 50, .. })));

        let snap = s.snapshot();
        assert_eq!(snap.score, 50);
        assert_eq!(snap.throws_left, 2);
        assert_eq!(snap.trajectories.len(), 1);
        assert_eq!(snap.last_resolution, hit);
        assert!(!snap.dart_in_flight);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut s = session();
        s.step(&start());
        let json = serde_json::to_value(s.snapshot()).unwrap();
        assert_eq!(json["score"], 0);
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["level"], "One");
    }
}
