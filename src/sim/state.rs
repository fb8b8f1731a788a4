//! Game state and core simulation types
//!
//! All mutable game state lives in `GameState`. Level transitions are methods
//! that return `false` and change nothing when they are not currently valid.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleField;
use super::scoring::Tier;
use super::target::Dartboard;
use crate::error::ConfigError;
use crate::settings::Settings;
use crate::{angle_toward, normalize_degrees};

/// One of the three fixed levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    /// Static board
    One,
    /// Moving board
    Two,
    /// Moving board, obstacles and a countdown
    Three,
}

impl Level {
    pub fn number(&self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Level::One),
            2 => Some(Level::Two),
            3 => Some(Level::Three),
            _ => None,
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number().wrapping_sub(1))
    }

    pub fn has_moving_target(&self) -> bool {
        *self != Level::One
    }

    pub fn has_obstacles(&self) -> bool {
        *self == Level::Three
    }

    pub fn has_time_limit(&self) -> bool {
        *self == Level::Three
    }
}

/// Why a level ended without the celebration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    ThrowsExhausted,
    TimeExpired,
}

/// Current phase of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen
    NotStarted,
    /// Aiming and throwing
    Playing,
    /// Level ended; follow-up options depend on level and score
    GameOver { reason: GameOverReason },
    /// All three throws of level 3 resolved before the countdown ran out
    Cleared,
}

/// Aim adjustment direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimDirection {
    /// Toward negative y (decreasing angle)
    Up,
    /// Toward positive y (increasing angle)
    Down,
}

/// How a non-scoring throw went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissKind {
    /// Crossed the board plane outside the outer ring
    Wide,
    /// Left the field before reaching the board
    OutOfBounds,
}

/// Discrete events for effects/audio layers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { level: Level },
    Hit { points: u32, tier: Tier, position: Vec2 },
    Miss { position: Vec2, kind: MissKind },
    ObstacleHit { position: Vec2 },
    LevelUp { level: Level },
    GameOver { level: Level, score: u32, reason: GameOverReason },
    Cleared { score: u32 },
}

impl GameEvent {
    /// True for events that end a throw
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            GameEvent::Hit { .. } | GameEvent::Miss { .. } | GameEvent::ObstacleHit { .. }
        )
    }
}

/// The dart; reused across throws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dart {
    pub origin: Vec2,
    pub pos: Vec2,
    /// Degrees; 270 points up in screen space
    pub heading: f32,
    pub in_flight: bool,
}

impl Dart {
    pub fn new(origin: Vec2, heading: f32) -> Self {
        Self {
            origin,
            pos: origin,
            heading,
            in_flight: false,
        }
    }

    /// Back to the origin, not flying
    pub fn reset(&mut self) {
        self.pos = self.origin;
        self.in_flight = false;
    }

    /// Leave the origin with the current heading
    pub fn launch(&mut self) {
        self.pos = self.origin;
        self.in_flight = true;
    }
}

/// A scored throw, kept for replaying the path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowTrajectory {
    /// Heading at release
    pub angle: f32,
    pub crossing_x: f32,
    pub crossing_y: f32,
    /// Board centre y when the dart crossed
    pub target_center_y: f32,
}

/// Per-level bookkeeping, replaced wholesale on every level (re)start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSession {
    pub level: Level,
    pub phase: GamePhase,
    pub throws_left: u8,
    pub score: u32,
    /// Level 3 countdown progress
    pub elapsed_ms: f32,
    /// Append-only within a level
    pub trajectories: Vec<ThrowTrajectory>,
}

impl LevelSession {
    pub fn new(level: Level, phase: GamePhase, throws: u8) -> Self {
        Self {
            level,
            phase,
            throws_left: throws,
            score: 0,
            elapsed_ms: 0.0,
            trajectories: Vec::new(),
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    pub session: LevelSession,
    pub dart: Dart,
    pub board: Dartboard,
    pub obstacles: ObstacleField,
    /// Simulation ticks while Playing
    pub time_ticks: u64,
    /// Most recent throw resolution, for hit flashes and score popups
    pub last_resolution: Option<GameEvent>,
}

impl GameState {
    /// Start screen at level 1
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        Self::at_level(settings, Level::One)
    }

    /// Start screen at `level`
    pub fn at_level(settings: Settings, level: Level) -> Result<Self, ConfigError> {
        settings.validate()?;
        let dart = Dart::new(settings.dart_origin(), settings.initial_heading);
        let board = Dartboard::for_level(&settings, level);
        let obstacles = ObstacleField::for_level(&settings, level);
        let session = LevelSession::new(level, GamePhase::NotStarted, settings.throws_per_level);
        Ok(Self {
            settings,
            session,
            dart,
            board,
            obstacles,
            time_ticks: 0,
            last_resolution: None,
        })
    }

    pub fn level(&self) -> Level {
        self.session.level
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn is_playing(&self) -> bool {
        self.session.phase == GamePhase::Playing
    }

    /// Fresh Playing session at `level`
    fn begin_level(&mut self, level: Level) {
        self.session = LevelSession::new(level, GamePhase::Playing, self.settings.throws_per_level);
        self.dart = Dart::new(self.settings.dart_origin(), self.settings.initial_heading);
        self.board = Dartboard::for_level(&self.settings, level);
        self.obstacles = ObstacleField::for_level(&self.settings, level);
        self.last_resolution = None;
        log::info!("Level {} started", level.number());
    }

    /// Heading that points the dart at the board centre right now
    pub fn perfect_angle(&self) -> f32 {
        angle_toward(self.dart.origin, self.board.center)
    }

    /// Countdown left, for timed levels
    pub fn remaining_ms(&self) -> Option<f32> {
        self.session
            .level
            .has_time_limit()
            .then(|| (self.settings.time_limit_ms - self.session.elapsed_ms).max(0.0))
    }

    /// NotStarted -> Playing
    pub fn start(&mut self) -> bool {
        if self.session.phase != GamePhase::NotStarted {
            log::debug!("start ignored in {:?}", self.session.phase);
            return false;
        }
        self.begin_level(self.session.level);
        true
    }

    /// Rotate the heading, staying within the aim window around the perfect angle
    pub fn aim(&mut self, direction: AimDirection, dt: f32) -> bool {
        if !self.is_playing() || self.dart.in_flight {
            return false;
        }
        let perfect = self.perfect_angle();
        let window = self.settings.aim_window;
        let delta = self.settings.aim_speed * dt;
        let relative = normalize_degrees(self.dart.heading - perfect);
        let relative = if relative.abs() > window {
            // Outside the window, enter at the edge on the pressed side
            match direction {
                AimDirection::Up => -window,
                AimDirection::Down => window,
            }
        } else {
            match direction {
                AimDirection::Up => relative - delta,
                AimDirection::Down => relative + delta,
            }
            .clamp(-window, window)
        };
        self.dart.heading = perfect + relative;
        true
    }

    /// Point straight at the board centre
    pub fn snap_aim(&mut self) -> bool {
        if !self.is_playing() || self.dart.in_flight {
            return false;
        }
        self.dart.heading = self.perfect_angle();
        true
    }

    /// Release the dart, spending one throw
    pub fn throw_dart(&mut self) -> bool {
        if !self.is_playing() || self.dart.in_flight || self.session.throws_left == 0 {
            log::debug!("throw ignored in {:?}", self.session.phase);
            return false;
        }
        self.session.throws_left -= 1;
        self.dart.launch();
        log::debug!(
            "Dart thrown at {:.1} deg ({} left)",
            self.dart.heading,
            self.session.throws_left
        );
        true
    }

    fn is_game_over(&self) -> bool {
        matches!(self.session.phase, GamePhase::GameOver { .. })
    }

    /// Score gate for the current level has been met
    pub fn can_advance(&self) -> bool {
        self.is_game_over()
            && self.session.level.next().is_some()
            && self
                .settings
                .unlock_threshold(self.session.level)
                .is_some_and(|t| self.session.score >= t)
    }

    /// Level 2 failed its gate, so level 1 is offered again
    pub fn can_go_back(&self) -> bool {
        self.is_game_over()
            && self.session.level == Level::Two
            && self
                .settings
                .unlock_threshold(Level::Two)
                .is_some_and(|t| self.session.score < t)
    }

    pub fn can_restart(&self) -> bool {
        self.is_game_over() || self.session.phase == GamePhase::Cleared
    }

    /// Level 3 end screens offer a full restart
    pub fn can_restart_all(&self) -> bool {
        self.session.level == Level::Three && self.can_restart()
    }

    pub fn advance_level(&mut self) -> bool {
        if !self.can_advance() {
            log::debug!("advance_level ignored in {:?}", self.session.phase);
            return false;
        }
        let Some(next) = self.session.level.next() else {
            return false;
        };
        self.begin_level(next);
        true
    }

    /// Replay the current level from scratch
    pub fn restart(&mut self) -> bool {
        if !self.can_restart() {
            log::debug!("restart ignored in {:?}", self.session.phase);
            return false;
        }
        self.begin_level(self.session.level);
        true
    }

    pub fn previous_level(&mut self) -> bool {
        if !self.can_go_back() {
            log::debug!("previous_level ignored in {:?}", self.session.phase);
            return false;
        }
        let Some(prev) = self.session.level.previous() else {
            return false;
        };
        self.begin_level(prev);
        true
    }

    pub fn restart_all(&mut self) -> bool {
        if !self.can_restart_all() {
            log::debug!("restart_all ignored in {:?}", self.session.phase);
            return false;
        }
        self.begin_level(Level::One);
        true
    }

    /// Terminal phase once throws or time run out, if either has
    pub(crate) fn end_condition(&self) -> Option<GamePhase> {
        let session = &self.session;
        if session.throws_left == 0 {
            return Some(if session.level == Level::Three {
                GamePhase::Cleared
            } else {
                GamePhase::GameOver {
                    reason: GameOverReason::ThrowsExhausted,
                }
            });
        }
        if session.level.has_time_limit() && session.elapsed_ms >= self.settings.time_limit_ms {
            return Some(GamePhase::GameOver {
                reason: GameOverReason::TimeExpired,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn playing(level: Level) -> GameState {
        let mut state = GameState::at_level(Settings::default(), level).unwrap();
        assert!(state.start());
        state
    }

    fn game_over_with(level: Level, score: u32) -> GameState {
        let mut state = playing(level);
        state.session.score = score;
        state.session.throws_left = 0;
        state.session.phase = GamePhase::GameOver {
            reason: GameOverReason::ThrowsExhausted,
        };
        state
    }

    #[test]
    fn test_new_state_waits_on_start_screen() {
        let state = GameState::new(Settings::default()).unwrap();
        assert_eq!(state.phase(), GamePhase::NotStarted);
        assert_eq!(state.level(), Level::One);
        assert_eq!(state.dart.pos, state.dart.origin);
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let settings = Settings {
            bullseye_radius: 80.0,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(settings),
            Err(ConfigError::RadiiNotNested { .. })
        ));
    }

    #[test]
    fn test_new_rejects_nan_heading() {
        let settings = Settings {
            initial_heading: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            GameState::new(settings),
            Err(ConfigError::BadHeading(_))
        ));
    }

    #[test]
    fn test_start_only_from_start_screen() {
        let mut state = GameState::new(Settings::default()).unwrap();
        assert!(state.start());
        assert!(state.is_playing());
        assert_eq!(state.session.throws_left, 3);
        assert_eq!(state.session.score, 0);
        assert!(!state.start());
    }

    #[test]
    fn test_level_properties() {
        assert_eq!(Level::One.next(), Some(Level::Two));
        assert_eq!(Level::Three.next(), None);
        assert_eq!(Level::One.previous(), None);
        assert_eq!(Level::Two.previous(), Some(Level::One));
        assert!(!Level::One.has_moving_target());
        assert!(Level::Two.has_moving_target() && !Level::Two.has_obstacles());
        assert!(Level::Three.has_obstacles() && Level::Three.has_time_limit());
    }

    #[test]
    fn test_aim_clamps_to_window() {
        let mut state = playing(Level::One);
        // Initial heading is straight up, well outside the window
        assert!(state.aim(AimDirection::Up, SIM_DT));
        assert!((state.dart.heading - (-30.0)).abs() < 1e-3);

        for _ in 0..120 {
            state.aim(AimDirection::Down, SIM_DT);
        }
        assert!((state.dart.heading - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_aim_down_from_initial_heading_enters_lower_edge() {
        let mut state = playing(Level::One);
        assert_eq!(state.dart.heading, 270.0);
        assert!(state.aim(AimDirection::Down, SIM_DT));
        assert!((state.dart.heading - 30.0).abs() < 1e-3);

        state.aim(AimDirection::Up, SIM_DT);
        assert!((state.dart.heading - 29.0).abs() < 1e-3);
    }

    #[test]
    fn test_aim_moves_one_degree_per_reference_tick() {
        let mut state = playing(Level::One);
        state.snap_aim();
        state.aim(AimDirection::Down, SIM_DT);
        assert!((state.dart.heading - 1.0).abs() < 1e-3);
        state.aim(AimDirection::Up, SIM_DT * 3.0);
        assert!((state.dart.heading - (-2.0)).abs() < 1e-3);
    }

    #[test]
    fn test_aim_ignored_in_flight() {
        let mut state = playing(Level::One);
        state.snap_aim();
        state.throw_dart();
        assert!(!state.aim(AimDirection::Up, SIM_DT));
        assert!(!state.snap_aim());
        assert_eq!(state.dart.heading, 0.0);
    }

    #[test]
    fn test_throw_spends_a_throw() {
        let mut state = playing(Level::One);
        assert!(state.throw_dart());
        assert_eq!(state.session.throws_left, 2);
        assert!(state.dart.in_flight);
        assert_eq!(state.dart.pos, state.dart.origin);
        // Already in flight
        assert!(!state.throw_dart());
        assert_eq!(state.session.throws_left, 2);
    }

    #[test]
    fn test_throw_without_throws_is_noop() {
        let mut state = playing(Level::One);
        state.session.throws_left = 0;
        let before = state.session.clone();
        assert!(!state.throw_dart());
        assert_eq!(state.session, before);
        assert!(!state.dart.in_flight);
    }

    #[test]
    fn test_advance_gate_level_one() {
        let mut state = game_over_with(Level::One, 69);
        assert!(!state.advance_level());
        assert!(matches!(state.phase(), GamePhase::GameOver { .. }));
        assert_eq!(state.level(), Level::One);
        assert_eq!(state.session.score, 69);

        let mut state = game_over_with(Level::One, 70);
        assert!(state.advance_level());
        assert_eq!(state.level(), Level::Two);
        assert!(state.is_playing());
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_advance_gate_level_two() {
        let mut state = game_over_with(Level::Two, 59);
        assert!(!state.advance_level());
        assert_eq!(state.level(), Level::Two);

        let mut state = game_over_with(Level::Two, 60);
        assert!(state.advance_level());
        assert_eq!(state.level(), Level::Three);
        assert_eq!(state.obstacles.rects.len(), 2);
    }

    #[test]
    fn test_no_advance_past_level_three() {
        let mut state = game_over_with(Level::Three, 150);
        assert!(!state.advance_level());
    }

    #[test]
    fn test_no_advance_while_playing() {
        let mut state = playing(Level::One);
        state.session.score = 100;
        assert!(!state.advance_level());
        assert!(!state.restart());
    }

    #[test]
    fn test_previous_level_only_after_failed_level_two() {
        let mut state = game_over_with(Level::Two, 60);
        assert!(!state.previous_level());

        let mut state = game_over_with(Level::One, 10);
        assert!(!state.previous_level());

        let mut state = game_over_with(Level::Two, 30);
        assert!(state.previous_level());
        assert_eq!(state.level(), Level::One);
        assert!(state.board.motion.is_none());
    }

    #[test]
    fn test_restart_resets_level() {
        let mut state = game_over_with(Level::Three, 40);
        state.session.trajectories.push(ThrowTrajectory {
            angle: 0.0,
            crossing_x: 620.0,
            crossing_y: 300.0,
            target_center_y: 300.0,
        });
        state.session.elapsed_ms = 12_000.0;
        let obstacles = state.obstacles.clone();

        assert!(state.restart());
        assert_eq!(state.level(), Level::Three);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.throws_left, 3);
        assert!(state.session.trajectories.is_empty());
        assert_eq!(state.session.elapsed_ms, 0.0);
        assert_eq!(state.obstacles, obstacles);

        // Same result the second time
        state.session.phase = GamePhase::Cleared;
        assert!(state.restart());
        assert_eq!(state.obstacles, obstacles);
        assert_eq!(state.session.throws_left, 3);
    }

    #[test]
    fn test_restart_all_from_level_three() {
        let mut state = game_over_with(Level::Two, 10);
        assert!(!state.restart_all());

        let mut state = playing(Level::Three);
        state.session.phase = GamePhase::Cleared;
        assert!(state.restart_all());
        assert_eq!(state.level(), Level::One);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_end_condition() {
        let mut state = playing(Level::One);
        assert_eq!(state.end_condition(), None);
        state.session.throws_left = 0;
        assert_eq!(
            state.end_condition(),
            Some(GamePhase::GameOver {
                reason: GameOverReason::ThrowsExhausted
            })
        );

        let mut state = playing(Level::Three);
        state.session.elapsed_ms = 20_000.0;
        assert_eq!(
            state.end_condition(),
            Some(GamePhase::GameOver {
                reason: GameOverReason::TimeExpired
            })
        );
        state.session.throws_left = 0;
        assert_eq!(state.end_condition(), Some(GamePhase::Cleared));
    }

    #[test]
    fn test_remaining_time_only_on_level_three() {
        assert_eq!(playing(Level::One).remaining_ms(), None);
        let mut state = playing(Level::Three);
        assert_eq!(state.remaining_ms(), Some(20_000.0));
        state.session.elapsed_ms = 25_000.0;
        assert_eq!(state.remaining_ms(), Some(0.0));
    }

    proptest! {
        #[test]
        fn prop_throws_never_go_negative(calls in proptest::collection::vec(any::<bool>(), 0..20)) {
            let mut state = playing(Level::One);
            for land_first in calls {
                if land_first {
                    state.dart.reset();
                }
                let before = state.session.throws_left;
                let accepted = state.throw_dart();
                if accepted {
                    prop_assert_eq!(state.session.throws_left, before - 1);
                } else {
                    prop_assert_eq!(state.session.throws_left, before);
                }
            }
        }
    }
}
