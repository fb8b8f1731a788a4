//! Level 3 blockers between the thrower and the board

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, segment_hits_any};
use super::state::Level;
use crate::settings::Settings;

/// Fixed set of rectangles; empty outside level 3
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    pub rects: Vec<Rect>,
}

impl ObstacleField {
    /// Deterministic layout: the same settings always give the same rectangles
    pub fn for_level(settings: &Settings, level: Level) -> Self {
        if !level.has_obstacles() {
            return Self::default();
        }
        let rects = settings
            .obstacle_corners()
            .into_iter()
            .map(|corner| Rect::new(corner, settings.obstacle_width, settings.obstacle_height))
            .collect();
        Self { rects }
    }

    pub fn from_rects(rects: Vec<Rect>) -> Self {
        Self { rects }
    }

    /// True if the segment touches any obstacle
    pub fn blocks(&self, p1: Vec2, p2: Vec2) -> bool {
        segment_hits_any(p1, p2, &self.rects)
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}
