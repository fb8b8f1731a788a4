//! Dartboard and its vertical motion
//!
//! Levels 2 and 3 bounce the board between two horizontal bounds.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Level;
use crate::consts::REFERENCE_TICK_RATE;
use crate::settings::Settings;

/// Vertical bounce state for a moving board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetMotion {
    pub y_min: f32,
    pub y_max: f32,
    /// Units per reference tick
    pub speed: f32,
    /// +1.0 moves toward increasing y (down), -1.0 up
    pub direction: f32,
}

impl TargetMotion {
    /// Advance `y` by one step of `dt` seconds, reflecting at the bounds
    pub fn step(&mut self, y: f32, dt: f32) -> f32 {
        let y = y + self.speed * self.direction * dt * REFERENCE_TICK_RATE;
        if y <= self.y_min {
            self.direction = 1.0;
            self.y_min
        } else if y >= self.y_max {
            self.direction = -1.0;
            self.y_max
        } else {
            y
        }
    }
}

/// The dartboard: three concentric rings around `center`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dartboard {
    pub center: Vec2,
    pub outer_radius: f32,
    pub middle_radius: f32,
    pub bullseye_radius: f32,
    /// None for a fixed board (level 1)
    pub motion: Option<TargetMotion>,
}

impl Dartboard {
    pub fn for_level(settings: &Settings, level: Level) -> Self {
        let motion = level.has_moving_target().then(|| {
            let (y_min, y_max) = settings.target_y_bounds();
            TargetMotion {
                y_min,
                y_max,
                speed: settings.target_move_speed,
                direction: 1.0,
            }
        });
        Self {
            center: settings.target_home(),
            outer_radius: settings.outer_radius,
            middle_radius: settings.middle_radius,
            bullseye_radius: settings.bullseye_radius,
            motion,
        }
    }

    /// Move the board for one tick; horizontal position never changes
    pub fn update(&mut self, dt: f32) {
        if let Some(motion) = &mut self.motion {
            self.center.y = motion.step(self.center.y, dt);
        }
    }

    /// Vertical velocity in units per reference tick (0 when fixed)
    pub fn vertical_velocity(&self) -> f32 {
        self.motion.map_or(0.0, |m| m.speed * m.direction)
    }
}
