//! Dart Arcade - A three-level dart throwing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight, collisions, scoring, level state)
//! - `session`: Fixed-timestep driver that turns frame input into ticks and snapshots
//! - `settings`: Data-driven level constants and layout

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use session::{Session, Snapshot};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Rate the per-tick speeds in `Settings` are expressed against
    pub const REFERENCE_TICK_RATE: f32 = 60.0;
    /// Fixed simulation timestep (one reference tick)
    pub const SIM_DT: f32 = 1.0 / REFERENCE_TICK_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ring point values
    pub const BULLSEYE_POINTS: u32 = 50;
    pub const MIDDLE_POINTS: u32 = 30;
    pub const OUTER_POINTS: u32 = 10;
}

/// Normalize an angle in degrees to (-180, 180]
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 { wrapped - 360.0 } else { wrapped }
}

/// Unit vector for a heading in degrees (screen space, +y is down)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Bearing from `from` to `to` in degrees, via atan2(dy, dx)
#[inline]
pub fn angle_toward(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x).to_degrees()
}
