//! Segment vs. rectangle collision
//!
//! The dart moves in straight steps, so an obstacle strike is a question of
//! whether the step segment touches an axis-aligned rectangle. Cohen-Sutherland
//! clipping answers it exactly without sampling.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space (+y is down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(pos: Vec2, width: f32, height: f32) -> Self {
        Self { pos, width, height }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height
    }

    /// Edges count as inside
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

// Region codes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn region_code(p: Vec2, rect: &Rect) -> u8 {
    let mut code = INSIDE;
    if p.x < rect.left() {
        code |= LEFT;
    } else if p.x > rect.right() {
        code |= RIGHT;
    }
    if p.y < rect.top() {
        code |= TOP;
    } else if p.y > rect.bottom() {
        code |= BOTTOM;
    }
    code
}

/// True if the segment from `p1` to `p2` passes through or touches `rect`
pub fn segment_intersects_rect(mut p1: Vec2, mut p2: Vec2, rect: &Rect) -> bool {
    if rect.contains(p1) || rect.contains(p2) {
        return true;
    }
    let mut code1 = region_code(p1, rect);
    let mut code2 = region_code(p2, rect);

    loop {
        if code1 == INSIDE || code2 == INSIDE {
            // One endpoint (possibly clipped) lies on or in the rectangle
            return true;
        }
        if code1 & code2 != 0 {
            // Both endpoints outside the same edge
            return false;
        }

        let code_out = code1;
        let d = p2 - p1;

        // Never divide by a zero delta
        let clipped = if code_out & TOP != 0 {
            if d.y == 0.0 {
                return false;
            }
            Vec2::new(p1.x + d.x * (rect.top() - p1.y) / d.y, rect.top())
        } else if code_out & BOTTOM != 0 {
            if d.y == 0.0 {
                return false;
            }
            Vec2::new(p1.x + d.x * (rect.bottom() - p1.y) / d.y, rect.bottom())
        } else if code_out & RIGHT != 0 {
            if d.x == 0.0 {
                return false;
            }
            Vec2::new(rect.right(), p1.y + d.y * (rect.right() - p1.x) / d.x)
        } else {
            if d.x == 0.0 {
                return false;
            }
            Vec2::new(rect.left(), p1.y + d.y * (rect.left() - p1.x) / d.x)
        };

        p1 = clipped;
        code1 = region_code(p1, rect);

        // Keep clipping from whichever endpoint is still outside
        if code1 == INSIDE {
            return true;
        }
        std::mem::swap(&mut p1, &mut p2);
        std::mem::swap(&mut code1, &mut code2);
    }
}

/// True if the segment touches any of `rects`
pub fn segment_hits_any(p1: Vec2, p2: Vec2, rects: &[Rect]) -> bool {
    rects.iter().any(|r| segment_intersects_rect(p1, p2, r))
}
