//! Electric gateways: two posts with a beam that switches on periodically
//!
//! While the timer is above `GATEWAY_ACTIVE` only the posts are solid. Below
//! it the whole span between them is live.

use serde::{Deserialize, Serialize};

use crate::consts::{GATEWAY_ACTIVE, GATEWAY_PERIOD, OBJ_GRID_SIZE};
use crate::grid_to_world;
use crate::sim::geometry::Rect;
use crate::sim::grid::GridPos;
use crate::sim::ship::Ship;
use crate::sim::viewport::Viewport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectricGate {
    /// First post
    pub pos: GridPos,
    /// Cells between the posts
    pub length: i32,
    pub vertical: bool,
    /// Counts down each frame and reloads at `GATEWAY_PERIOD`
    pub timer: f32,
}

impl ElectricGate {
    pub fn new(pos: GridPos, length: i32, vertical: bool, timer: f32) -> Self {
        Self {
            pos,
            length,
            vertical,
            timer,
        }
    }

    /// Footprint in cells (width, height)
    pub fn footprint(length: i32, vertical: bool) -> (i32, i32) {
        if vertical { (1, length + 1) } else { (length + 1, 1) }
    }

    /// Grid offset from the first post to the second
    pub fn span(&self) -> (i32, i32) {
        if self.vertical { (0, self.length) } else { (self.length, 0) }
    }

    pub fn is_active(&self) -> bool {
        self.timer <= GATEWAY_ACTIVE
    }

    pub fn advance(&mut self, time_scale: f32) {
        self.timer -= time_scale;
        if self.timer < 0.0 {
            self.timer = GATEWAY_PERIOD;
        }
    }

    /// Second post's cell
    pub fn end(&self) -> GridPos {
        let (dx, dy) = self.span();
        GridPos::new(self.pos.x + dx, self.pos.y + dy)
    }

    /// Whole span including both posts
    pub fn bounds(&self) -> Rect {
        let (dx, dy) = self.span();
        let p = grid_to_world(self.pos.x, self.pos.y);
        let cell = OBJ_GRID_SIZE as f32;
        Rect::new(p.x, p.y, (dx + 1) as f32 * cell, (dy + 1) as f32 * cell)
    }

    fn post(cell: GridPos) -> Rect {
        let p = grid_to_world(cell.x, cell.y);
        Rect::new(p.x, p.y, OBJ_GRID_SIZE as f32, OBJ_GRID_SIZE as f32)
    }

    pub fn collides(&self, ship: &Ship, viewport: &Viewport, time_scale: f32) -> bool {
        if self.is_active() {
            ship.box_collision(&self.bounds(), viewport, time_scale)
        } else {
            ship.box_collision(&Self::post(self.pos), viewport, time_scale)
                || ship.box_collision(&Self::post(self.end()), viewport, time_scale)
        }
    }
}
