//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `tick`
//! - No randomness; obstacle layout is fixed per settings
//! - No rendering or platform dependencies

pub mod collision;
pub mod flight;
pub mod obstacle;
pub mod scoring;
pub mod state;
pub mod target;
pub mod tick;

pub use collision::{Rect, segment_intersects_rect};
pub use flight::{FlightContext, FlightOutcome, advance};
pub use obstacle::ObstacleField;
pub use scoring::{Tier, score, tier};
pub use state::{
    AimDirection, Dart, GameEvent, GameOverReason, GamePhase, GameState, Level, LevelSession,
    MissKind, ThrowTrajectory,
};
pub use target::{Dartboard, TargetMotion};
pub use tick::{TickInput, Trigger, UiButton, tick};
