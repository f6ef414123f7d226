//! Keys: every key must be collected before a landing counts

use serde::{Deserialize, Serialize};

use crate::consts::KEY_FADE_SPEED;
use crate::grid_to_world;
use crate::sim::geometry::Rect;
use crate::sim::grid::{GridPos, ObjectGrid};
use crate::sim::ship::Ship;
use crate::sim::viewport::Viewport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyColour {
    Blue,
    Red,
    Yellow,
    Pink,
    Green,
}

impl KeyColour {
    pub const ALL: [KeyColour; 5] = [
        KeyColour::Blue,
        KeyColour::Red,
        KeyColour::Yellow,
        KeyColour::Pink,
        KeyColour::Green,
    ];

    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pub pos: GridPos,
    pub colour: KeyColour,
    pub active: bool,
    /// Sprite alpha; fades out after collection
    pub alpha: f32,
}

impl Key {
    pub fn new(pos: GridPos, colour: KeyColour) -> Self {
        Self {
            pos,
            colour,
            active: true,
            alpha: 1.0,
        }
    }

    /// Pickup box, inset from the cell
    pub fn bounds(&self) -> Rect {
        let p = grid_to_world(self.pos.x, self.pos.y);
        Rect::new(p.x + 3.0, p.y + 3.0, 26.0, 26.0)
    }

    pub fn collides(&self, ship: &Ship, viewport: &Viewport, time_scale: f32) -> bool {
        self.active && ship.box_collision(&self.bounds(), viewport, time_scale)
    }

    /// Take the key and free its cell
    pub fn collect(&mut self, grid: &mut ObjectGrid) {
        if !self.active {
            return;
        }
        self.active = false;
        grid.unlock(self.pos.x, self.pos.y);
    }

    pub fn advance(&mut self, time_scale: f32) {
        if !self.active {
            self.alpha = (self.alpha - KEY_FADE_SPEED * time_scale).max(0.0);
        }
    }
}
