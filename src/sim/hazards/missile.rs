//! Wall missiles
//!
//! A missile waits in a cell on the left or right edge of the grid. When the
//! ship comes within its fire window it launches across the level,
//! accelerating to `MISSILE_MAX_SPEED`, until it leaves the level or hits.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::grid_to_world;
use crate::sim::geometry::Rect;
use crate::sim::grid::{GridPos, ObjectGrid};
use crate::sim::ship::Ship;
use crate::sim::viewport::Viewport;

/// Trail fade per frame after destruction
const TRAIL_FADE: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileState {
    Fixed,
    Flying,
    Destroyed,
}

/// Wall the launcher is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Grid column of the wall
    pub fn column(&self, grid_width: i32) -> i32 {
        match self {
            Side::Left => 0,
            Side::Right => grid_width - 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Missile {
    /// Launcher cell, claimed until launch
    pub cell: GridPos,
    pub side: Side,
    /// Top-left in world pixels
    pub pos: Vec2,
    pub speed: f32,
    pub state: MissileState,
    /// Smoke trail alpha for the renderer
    pub trail_alpha: f32,
}

impl Missile {
    pub fn new(cell: GridPos, side: Side) -> Self {
        let p = grid_to_world(cell.x, cell.y);
        Self {
            cell,
            side,
            pos: Vec2::new(p.x, p.y + (OBJ_GRID_SIZE as f32 - MISSILE_HEIGHT) / 2.0),
            speed: 0.0,
            state: MissileState::Fixed,
            trail_alpha: 1.0,
        }
    }

    /// Flight direction: away from the mounting wall
    pub fn heading(&self) -> Vec2 {
        match self.side {
            Side::Left => Vec2::X,
            Side::Right => Vec2::NEG_X,
        }
    }

    /// Sprite angle in degrees, clockwise from vertical
    pub fn angle(&self) -> f32 {
        match self.side {
            Side::Left => 90.0,
            Side::Right => 270.0,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, MISSILE_WIDTH, MISSILE_HEIGHT)
    }

    fn centre(&self) -> Vec2 {
        self.pos + Vec2::new(MISSILE_WIDTH, MISSILE_HEIGHT) / 2.0
    }

    /// Whether the ship is inside the fire window
    pub fn in_range(&self, ship: &Ship) -> bool {
        let d = ship.centre() - self.centre();
        d.x.abs() < MISSILE_HORIZ_FIRE_RANGE && d.y.abs() < MISSILE_VERT_FIRE_RANGE
    }

    /// Returns true on the frame the missile launches
    pub fn advance(
        &mut self,
        grid: &mut ObjectGrid,
        ship: &Ship,
        level_size: Vec2,
        time_scale: f32,
    ) -> bool {
        match self.state {
            MissileState::Fixed => {
                if self.in_range(ship) {
                    self.state = MissileState::Flying;
                    grid.unlock(self.cell.x, self.cell.y);
                    log::debug!("missile at ({}, {}) launched", self.cell.x, self.cell.y);
                    return true;
                }
            }
            MissileState::Flying => {
                self.speed = (self.speed + MISSILE_ACCEL * time_scale).min(MISSILE_MAX_SPEED);
                self.pos += self.heading() * self.speed * time_scale;
                let out = self.pos.x + MISSILE_WIDTH < 0.0
                    || self.pos.x > level_size.x
                    || self.pos.y + MISSILE_HEIGHT < 0.0
                    || self.pos.y > level_size.y;
                if out {
                    self.state = MissileState::Destroyed;
                }
            }
            MissileState::Destroyed => {
                self.trail_alpha = (self.trail_alpha - TRAIL_FADE * time_scale).max(0.0);
            }
        }
        false
    }

    pub fn collides(&self, ship: &Ship, viewport: &Viewport, time_scale: f32) -> bool {
        self.state != MissileState::Destroyed
            && ship.box_collision(&self.bounds(), viewport, time_scale)
    }

    /// Blow the missile up, releasing its launcher cell if still mounted
    pub fn destroy(&mut self, grid: &mut ObjectGrid) {
        if self.state == MissileState::Fixed {
            grid.unlock(self.cell.x, self.cell.y);
        }
        self.state = MissileState::Destroyed;
    }
}
