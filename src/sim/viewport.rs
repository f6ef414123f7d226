//! Scrolling viewport over the level
//!
//! Holds the top-left scroll offset, clamped so the screen never shows
//! anything outside the level.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{OBJ_GRID_SIZE, OBJ_GRID_TOP, SCREEN_HEIGHT, SCREEN_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Scroll offset (world pixels at the screen's top-left)
    pub offset: Vec2,
    pub screen_width: f32,
    pub screen_height: f32,
    pub level_width: f32,
    pub level_height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH as f32, SCREEN_HEIGHT as f32)
    }
}

impl Viewport {
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            screen_width,
            screen_height,
            level_width: screen_width,
            level_height: screen_height,
        }
    }

    pub fn set_level_size(&mut self, width: f32, height: f32) {
        self.level_width = width;
        self.level_height = height;
        self.set_offset(self.offset);
    }

    /// Scroll to `offset`, clamped to the level bounds
    pub fn set_offset(&mut self, offset: Vec2) {
        let max_x = (self.level_width - self.screen_width).max(0.0);
        let max_y = (self.level_height - self.screen_height).max(0.0);
        self.offset = Vec2::new(offset.x.clamp(0.0, max_x), offset.y.clamp(0.0, max_y));
    }

    /// Centre the screen on a world point
    pub fn centre_on(&mut self, point: Vec2) {
        let half = Vec2::new(self.screen_width, self.screen_height) / 2.0;
        self.set_offset(point - half);
    }

    /// Whether a world-space rectangle overlaps the screen
    pub fn rect_in_screen(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        x + w > self.offset.x
            && x - self.offset.x < self.screen_width
            && y + h > self.offset.y
            && y - self.offset.y < self.screen_height
    }

    /// Whether a block of grid cells overlaps the screen
    pub fn object_in_screen(&self, gx: i32, gy: i32, gw: i32, gh: i32) -> bool {
        let cell = OBJ_GRID_SIZE as f32;
        self.rect_in_screen(
            gx as f32 * cell,
            gy as f32 * cell + OBJ_GRID_TOP as f32,
            gw as f32 * cell,
            gh as f32 * cell,
        )
    }

    /// World to screen coordinates
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }
}
