//! Line segment geometry
//!
//! Moving-point versus wall tests: every ship collision reduces to asking
//! whether a hotspot's displacement this frame crosses a segment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A wall segment in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub start: Vec2,
    pub end: Vec2,
}

impl LineSegment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    pub fn from_coords(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new(Vec2::new(x1, y1), Vec2::new(x2, y2))
    }

    pub fn direction(&self) -> Vec2 {
        self.end - self.start
    }
}

/// Parametric intersection of a moving point with a segment
///
/// Solves `point + t * displacement == seg.start + u * (seg.end - seg.start)`.
/// Returns `(t, u)`, or `None` when the two are parallel.
pub fn intersection_params(point: Vec2, displacement: Vec2, seg: &LineSegment) -> Option<(f32, f32)> {
    let wall = seg.direction();
    let rel = point - seg.start;

    let denom = wall.y * displacement.x - wall.x * displacement.y;
    if denom == 0.0 {
        return None;
    }

    let num_t = wall.x * rel.y - wall.y * rel.x;
    let num_u = displacement.x * rel.y - displacement.y * rel.x;
    Some((num_t / denom, num_u / denom))
}

/// True if the displacement crosses the segment strictly inside both spans
///
/// Touching at an end of either span (t or u equal to 0 or 1) is a miss.
pub fn crosses(point: Vec2, displacement: Vec2, seg: &LineSegment) -> bool {
    match intersection_params(point, displacement, seg) {
        Some((t, u)) => t > 0.0 && t < 1.0 && u > 0.0 && u < 1.0,
        None => false,
    }
}

/// Axis-aligned box in world pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Top, right, bottom and left edges
    pub fn edges(&self) -> [LineSegment; 4] {
        let (x1, y1) = (self.x, self.y);
        let (x2, y2) = (self.x + self.w, self.y + self.h);
        [
            LineSegment::from_coords(x1, y1, x2, y1),
            LineSegment::from_coords(x2, y1, x2, y2),
            LineSegment::from_coords(x2, y2, x1, y2),
            LineSegment::from_coords(x1, y2, x1, y1),
        ]
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}
