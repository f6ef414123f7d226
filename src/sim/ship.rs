//! The player's lander: motion model and hotspot collision
//!
//! The ship's outline is approximated by eight hotspot points rotated with
//! the hull. A collision means some hotspot's path this frame crosses a wall.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{LineSegment, Rect, crosses};
use super::viewport::Viewport;
use crate::consts::*;
use crate::normalize_degrees;

/// Hotspots in hull space (pixels from the sprite's top-left corner, nose up)
pub const HOTSPOT_TEMPLATE: [Vec2; 8] = [
    Vec2::new(1.0, 31.0),
    Vec2::new(1.0, 26.0),
    Vec2::new(3.0, 14.0),
    Vec2::new(15.0, 0.0),
    Vec2::new(28.0, 14.0),
    Vec2::new(30.0, 26.0),
    Vec2::new(30.0, 31.0),
    Vec2::new(16.0, 31.0),
];

/// Rotation pivot in hull space
const PIVOT: Vec2 = Vec2::new(SHIP_WIDTH as f32 / 2.0, SHIP_HEIGHT as f32 / 2.0);

/// Hotspot offsets from the ship's position for a heading in degrees
///
/// Angles turn clockwise on screen; 0 is nose up.
pub fn hotspot_offsets(angle: f32) -> [Vec2; 8] {
    let rot = Vec2::from_angle(angle.to_radians());
    HOTSPOT_TEMPLATE.map(|p| PIVOT + rot.rotate(p - PIVOT))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Top-left corner in world pixels
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    /// Heading in degrees, clockwise from vertical
    pub angle: f32,
    /// Engine fired this frame (for the flame sprite)
    pub thrusting: bool,
    offsets: [Vec2; 8],
}

impl Default for Ship {
    fn default() -> Self {
        Self::new()
    }
}

impl Ship {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            angle: 0.0,
            thrusting: false,
            offsets: hotspot_offsets(0.0),
        }
    }

    /// Park the ship at the top-centre of a level
    pub fn reset(&mut self, level_width: f32) {
        self.pos = Vec2::new(level_width / 2.0, SHIP_START_Y);
        self.vel = Vec2::ZERO;
        self.angle = 0.0;
        self.thrusting = false;
        self.refresh_hotspots();
    }

    pub fn refresh_hotspots(&mut self) {
        self.offsets = hotspot_offsets(self.angle);
    }

    /// Hotspots in world space
    pub fn hotspots(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.offsets.iter().map(move |&o| self.pos + o)
    }

    /// Largest world y of any hotspot
    pub fn lowest_point(&self) -> f32 {
        self.hotspots().map(|p| p.y).fold(f32::MIN, f32::max)
    }

    pub fn centre(&self) -> Vec2 {
        self.pos + PIVOT
    }

    /// Integrate one frame and bounce off the level edges
    ///
    /// Returns true when the ship was clamped against the bottom of the level.
    pub fn advance(&mut self, time_scale: f32, level_width: f32, level_height: f32) -> bool {
        self.refresh_hotspots();
        self.pos += self.vel * time_scale;

        let max_x = level_width - SHIP_WIDTH as f32;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
            self.vel.x *= -0.5;
        } else if self.pos.x > max_x {
            self.pos.x = max_x;
            self.vel.x *= -0.5;
        }

        let max_y = level_height - SHIP_HEIGHT as f32;
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.vel.y *= -0.5;
        } else if self.pos.y > max_y {
            self.pos.y = max_y;
            self.vel.y *= -0.5;
            return true;
        }
        false
    }

    /// Accelerate along the nose
    pub fn thrust(&mut self, power: f32, time_scale: f32) {
        let a = self.angle.to_radians();
        self.vel += Vec2::new(a.sin(), -a.cos()) * power * time_scale;
        self.thrusting = true;
    }

    pub fn turn(&mut self, delta: f32, time_scale: f32) {
        self.angle = normalize_degrees(self.angle + delta * time_scale);
    }

    pub fn apply_gravity(&mut self, gravity: f32, time_scale: f32) {
        self.vel.y += gravity * time_scale;
    }

    /// Reverse and halve the velocity
    pub fn bounce(&mut self) {
        self.vel = -self.vel / 2.0;
    }

    /// Does any hotspot cross `seg` on its way to next frame's position
    pub fn segment_collision(&self, seg: &LineSegment, time_scale: f32) -> bool {
        let displacement = self.vel * time_scale;
        self.hotspots().any(|p| crosses(p, displacement, seg))
    }

    /// Hotspot collision against the four edges of a box
    pub fn box_collision(&self, rect: &Rect, viewport: &Viewport, time_scale: f32) -> bool {
        if !viewport.rect_in_screen(rect.x, rect.y, rect.w, rect.h) {
            return false;
        }
        rect.edges()
            .iter()
            .any(|edge| self.segment_collision(edge, time_scale))
    }
}
