//! Level constants and play-field layout
//!
//! Read once at session start. Everything positional is expressed relative to
//! the field dimensions so a presentation layer can pick its own resolution.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::BULLSEYE_POINTS;
use crate::error::ConfigError;
use crate::sim::Level;

/// Vertical placement of an obstacle's top edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VerticalAnchor {
    /// Offset from the field's vertical centre
    Center(f32),
    /// Offset from the top of the field
    Top(f32),
}

/// Where one level-3 obstacle sits on the field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePlacement {
    /// Fraction of the horizontal distance from dart origin to target centre
    pub along: f32,
    pub anchor: VerticalAnchor,
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Dart ===
    /// Dart origin x (origin is vertically centred)
    pub dart_origin_x: f32,
    /// Displacement per reference tick
    pub dart_speed: f32,
    /// Heading at level start (degrees, 270 = straight up)
    pub initial_heading: f32,
    /// Aim rate in degrees per second
    pub aim_speed: f32,
    /// Half-width of the aim window around the perfect angle (degrees)
    pub aim_window: f32,
    pub throws_per_level: u8,

    // === Target ===
    /// Distance from the right edge of the field to the target centre
    pub target_inset: f32,
    pub outer_radius: f32,
    pub middle_radius: f32,
    pub bullseye_radius: f32,
    /// Vertical displacement per reference tick (levels 2 and 3)
    pub target_move_speed: f32,
    /// Closest the target centre gets to the top or bottom edge
    pub target_margin: f32,

    // === Level rules ===
    /// Level 3 countdown
    pub time_limit_ms: f32,
    pub level1_unlock: u32,
    pub level2_unlock: u32,

    // === Obstacles (level 3) ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacles: Vec<ObstaclePlacement>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,

            dart_origin_x: 150.0,
            dart_speed: 8.8,
            initial_heading: 270.0,
            aim_speed: 60.0,
            aim_window: 30.0,
            throws_per_level: 3,

            target_inset: 180.0,
            outer_radius: 100.0,
            middle_radius: 55.0,
            bullseye_radius: 20.0,
            target_move_speed: 3.0,
            target_margin: 150.0,

            time_limit_ms: 20_000.0,
            level1_unlock: 70,
            level2_unlock: 60,

            obstacle_width: 35.0,
            obstacle_height: 160.0,
            obstacles: vec![
                ObstaclePlacement {
                    along: 0.48,
                    anchor: VerticalAnchor::Center(-17.0),
                },
                ObstaclePlacement {
                    along: 0.65,
                    anchor: VerticalAnchor::Top(30.0),
                },
            ],
        }
    }
}

impl Settings {
    /// Parse settings from JSON (missing fields take defaults) and validate
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings ({}x{} field)", settings.field_width, settings.field_height);
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn dart_origin(&self) -> Vec2 {
        Vec2::new(self.dart_origin_x, self.field_height / 2.0)
    }

    /// Target centre at level start
    pub fn target_home(&self) -> Vec2 {
        Vec2::new(self.field_width - self.target_inset, self.field_height / 2.0)
    }

    /// (y_min, y_max) for the moving target
    pub fn target_y_bounds(&self) -> (f32, f32) {
        (self.target_margin, self.field_height - self.target_margin)
    }

    /// Score needed to leave `level`; level 3 has no gate
    pub fn unlock_threshold(&self, level: Level) -> Option<u32> {
        match level {
            Level::One => Some(self.level1_unlock),
            Level::Two => Some(self.level2_unlock),
            Level::Three => None,
        }
    }

    /// Best possible score for one level
    pub fn max_score(&self) -> u32 {
        u32::from(self.throws_per_level) * BULLSEYE_POINTS
    }

    /// Top-left corner of each obstacle
    pub fn obstacle_corners(&self) -> Vec<Vec2> {
        let origin = self.dart_origin();
        let span = self.target_home().x - origin.x;
        self.obstacles
            .iter()
            .map(|p| {
                let top = match p.anchor {
                    VerticalAnchor::Center(offset) => self.field_height / 2.0 + offset,
                    VerticalAnchor::Top(offset) => offset,
                };
                Vec2::new(origin.x + span * p.along, top)
            })
            .collect()
    }

    /// Reject layouts and rules the simulation cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("dart_speed", self.dart_speed),
            ("aim_speed", self.aim_speed),
            ("outer_radius", self.outer_radius),
            ("middle_radius", self.middle_radius),
            ("bullseye_radius", self.bullseye_radius),
            ("target_move_speed", self.target_move_speed),
            ("time_limit_ms", self.time_limit_ms),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if !(self.bullseye_radius < self.middle_radius && self.middle_radius < self.outer_radius) {
            return Err(ConfigError::RadiiNotNested {
                bullseye: self.bullseye_radius,
                middle: self.middle_radius,
                outer: self.outer_radius,
            });
        }

        let (y_min, y_max) = self.target_y_bounds();
        if !(y_min < y_max) {
            return Err(ConfigError::EmptyMotionBounds { y_min, y_max });
        }

        let origin = self.dart_origin();
        let target = self.target_home();
        if !(origin.x > 0.0 && origin.x < target.x && target.x < self.field_width) {
            return Err(ConfigError::BadDartOrigin {
                x: origin.x,
                y: origin.y,
            });
        }

        if !(self.initial_heading.is_finite() && self.initial_heading.abs() <= 360.0) {
            return Err(ConfigError::BadHeading(self.initial_heading));
        }

        if !(self.aim_window > 0.0 && self.aim_window < 180.0) {
            return Err(ConfigError::BadAimWindow(self.aim_window));
        }

        if self.throws_per_level == 0 {
            return Err(ConfigError::NoThrows);
        }

        let max_score = self.max_score();
        for (level, threshold) in [(1, self.level1_unlock), (2, self.level2_unlock)] {
            if threshold == 0 || threshold > max_score {
                return Err(ConfigError::UnreachableThreshold {
                    level,
                    threshold,
                    max_score,
                });
            }
        }

        for (index, (placement, corner)) in
            self.obstacles.iter().zip(self.obstacle_corners()).enumerate()
        {
            if !(placement.along > 0.0 && placement.along < 1.0) {
                return Err(ConfigError::BadObstacle {
                    index,
                    reason: "placement must lie strictly between dart and target",
                });
            }
            if corner.y < 0.0
                || corner.y + self.obstacle_height > self.field_height
                || corner.x + self.obstacle_width > self.field_width
            {
                return Err(ConfigError::BadObstacle {
                    index,
                    reason: "rectangle does not fit the field",
                });
            }
        }

        Ok(())
    }
}
